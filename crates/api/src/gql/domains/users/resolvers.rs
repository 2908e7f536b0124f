use async_graphql::{Context, Object, Result, ID};
use uuid::Uuid;

use crate::gql::context::viewer;
use crate::gql::error::{GqlError, GqlResultExt};
use crate::state::AppState;

use super::service;
use super::types::{LoggedInUserDetails, UserDetails};

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// Profile of the authenticated user
    async fn get_logged_in_user_details(
        &self,
        ctx: &Context<'_>,
    ) -> Result<Option<LoggedInUserDetails>> {
        let state = ctx.data::<AppState>()?;
        let viewer = viewer(ctx).extended()?;

        let row = service::logged_in_user_details(state.store.as_ref(), viewer.as_ref())
            .await
            .extended()?;
        Ok(row.map(LoggedInUserDetails::from))
    }

    /// Public profile of any user
    async fn get_user_details_by_uuid(
        &self,
        ctx: &Context<'_>,
        uuid: ID,
    ) -> Result<Option<UserDetails>> {
        let state = ctx.data::<AppState>()?;
        let user_uuid = Uuid::parse_str(uuid.as_str())
            .map_err(GqlError::from)
            .extended()?;

        let row = service::user_details_by_uuid(state.store.as_ref(), user_uuid)
            .await
            .extended()?;
        Ok(row.map(UserDetails::from))
    }
}
