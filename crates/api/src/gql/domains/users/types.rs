use async_graphql::{ComplexObject, Context, Result, SimpleObject, ID};
use infra::models::{CommunityVisibility, UserRow};
use infra::VisibilityFilter;
use uuid::Uuid;

use crate::gql::domains::communities::{service, types::Community};
use crate::gql::error::GqlResultExt;
use crate::gql::scalars::Date;
use crate::state::AppState;

/// Full profile of the authenticated user.
#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct LoggedInUserDetails {
    pub uuid: ID,
    pub email: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_attributes: Option<String>,
    pub location: Option<String>,
    pub avatar_upload_uuid: Option<ID>,
    pub last_seen_at: Option<Date>,
    /// Session token; only populated by `login`.
    pub token: Option<String>,
    #[graphql(skip)]
    pub user_uuid: Uuid,
}

impl LoggedInUserDetails {
    pub fn with_token(row: UserRow, token: String) -> Self {
        Self {
            token: Some(token),
            ..Self::from(row)
        }
    }
}

impl From<UserRow> for LoggedInUserDetails {
    fn from(row: UserRow) -> Self {
        Self {
            uuid: row.uuid.into(),
            email: row.email,
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            user_attributes: row.user_attributes,
            location: row.location,
            avatar_upload_uuid: row.avatar_upload_uuid.map(Into::into),
            last_seen_at: row.last_seen_at.map(Date),
            token: None,
            user_uuid: row.uuid,
        }
    }
}

#[ComplexObject]
impl LoggedInUserDetails {
    /// Every community the user belongs to.
    async fn communities(&self, ctx: &Context<'_>) -> Result<Vec<Community>> {
        let state = ctx.data::<AppState>()?;
        let rows =
            service::communities_of(state.store.as_ref(), self.user_uuid, VisibilityFilter::Any)
                .await
                .extended()?;
        Ok(rows.into_iter().map(Community::from).collect())
    }
}

/// Public profile of any user.
#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct UserDetails {
    pub uuid: ID,
    pub username: Option<String>,
    pub location: Option<String>,
    pub avatar_upload_uuid: Option<ID>,
    pub last_seen_at: Option<Date>,
    #[graphql(skip)]
    pub user_uuid: Uuid,
}

impl From<UserRow> for UserDetails {
    fn from(row: UserRow) -> Self {
        Self {
            uuid: row.uuid.into(),
            username: row.username,
            location: row.location,
            avatar_upload_uuid: row.avatar_upload_uuid.map(Into::into),
            last_seen_at: row.last_seen_at.map(Date),
            user_uuid: row.uuid,
        }
    }
}

#[ComplexObject]
impl UserDetails {
    /// Public communities the user belongs to.
    async fn communities(&self, ctx: &Context<'_>) -> Result<Vec<Community>> {
        let state = ctx.data::<AppState>()?;
        let rows = service::communities_of(
            state.store.as_ref(),
            self.user_uuid,
            VisibilityFilter::Only(CommunityVisibility::Public),
        )
        .await
        .extended()?;
        Ok(rows.into_iter().map(Community::from).collect())
    }
}
