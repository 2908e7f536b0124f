use async_graphql::{Context, Object, Result, ID};
use uuid::Uuid;

use crate::gql::context::viewer;
use crate::gql::error::{GqlError, GqlResultExt};
use crate::gql::types::{CommunityTier, CommunityType};
use crate::state::AppState;

use super::service::{self, CreateCommunityParams};
use super::types::{Community, PopularCommunity};

// ── Queries ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct CommunityQuery;

#[Object]
impl CommunityQuery {
    /// Communities the authenticated user is a member of
    async fn get_logged_in_user_communities(&self, ctx: &Context<'_>) -> Result<Vec<Community>> {
        let state = ctx.data::<AppState>()?;
        let viewer = viewer(ctx).extended()?;

        let rows = service::logged_in_user_communities(state.store.as_ref(), viewer.as_ref())
            .await
            .extended()?;
        Ok(rows.into_iter().map(Community::from).collect())
    }

    /// Public communities the given user is a member of
    async fn get_user_communities_by_uuid(
        &self,
        ctx: &Context<'_>,
        uuid: ID,
    ) -> Result<Vec<Community>> {
        let state = ctx.data::<AppState>()?;
        let user_uuid = Uuid::parse_str(uuid.as_str())
            .map_err(GqlError::from)
            .extended()?;

        let rows = service::user_communities_by_uuid(state.store.as_ref(), user_uuid)
            .await
            .extended()?;
        Ok(rows.into_iter().map(Community::from).collect())
    }

    /// Communities whose name contains `name`
    async fn search_communities(&self, ctx: &Context<'_>, name: String) -> Result<Vec<Community>> {
        let state = ctx.data::<AppState>()?;
        let rows = service::search_communities(state.store.as_ref(), &name)
            .await
            .extended()?;
        Ok(rows.into_iter().map(Community::from).collect())
    }

    /// Top public communities by member count
    async fn popular_communities(&self, ctx: &Context<'_>) -> Result<Vec<PopularCommunity>> {
        let state = ctx.data::<AppState>()?;
        let rows = service::popular_communities(state.store.as_ref())
            .await
            .extended()?;
        Ok(rows.into_iter().map(PopularCommunity::from).collect())
    }
}

// ── Mutations ────────────────────────────────────────────────────────

#[derive(Default)]
pub struct CommunityMutation;

#[Object]
impl CommunityMutation {
    /// Create a community and return it
    #[allow(clippy::too_many_arguments)]
    async fn create_community(
        &self,
        ctx: &Context<'_>,
        name: Option<String>,
        tagline: Option<String>,
        desc: Option<String>,
        location: Option<String>,
        tier: Option<CommunityTier>,
        visibility: Option<CommunityType>,
    ) -> Result<Community> {
        let state = ctx.data::<AppState>()?;

        let params = CreateCommunityParams {
            name,
            tagline,
            description: desc,
            location,
            tier: tier.map(Into::into),
            visibility: visibility.map(Into::into),
        };

        let row = service::create_community(state.store.as_ref(), params)
            .await
            .extended()?;
        Ok(row.into())
    }
}
