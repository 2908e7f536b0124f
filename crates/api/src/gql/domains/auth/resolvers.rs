use async_graphql::{Context, Object, Result};

use crate::gql::domains::users::types::LoggedInUserDetails;
use crate::gql::error::GqlResultExt;
use crate::state::AppState;

use super::service;

#[derive(Default)]
pub struct AuthMutation;

#[Object]
impl AuthMutation {
    /// Log in with email and password. Sets the `token` session cookie and
    /// returns the user with `token` populated.
    async fn login(
        &self,
        ctx: &Context<'_>,
        email: String,
        #[graphql(secret)] password: String,
    ) -> Result<LoggedInUserDetails> {
        let state = ctx.data::<AppState>()?;

        let outcome = service::login(
            state.store.as_ref(),
            state.jwt_service(),
            state.auth_config(),
            ctx,
            &email,
            &password,
        )
        .await
        .extended()?;

        Ok(LoggedInUserDetails::with_token(outcome.user, outcome.token))
    }
}
