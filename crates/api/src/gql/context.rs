//! Glue between the async-graphql request context and the plain service
//! functions, which take the viewer and cookie sink as explicit arguments.

use async_graphql::Context;

use crate::auth::{Claims, SessionCookies, Viewer};
use crate::gql::error::GqlError;

/// The authenticated viewer, if the request carried valid claims.
pub fn viewer(ctx: &Context<'_>) -> Result<Option<Viewer>, GqlError> {
    ctx.data_opt::<Claims>().map(Viewer::from_claims).transpose()
}

impl SessionCookies for Context<'_> {
    fn set_cookie(&self, value: String) {
        self.insert_http_header("Set-Cookie", value);
    }
}
