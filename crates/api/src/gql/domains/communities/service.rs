use infra::models::{CommunityRow, CommunityTier, CommunityVisibility, PopularCommunityRow};
use infra::{CommunityStore, NewCommunity, VisibilityFilter};
use uuid::Uuid;

use crate::auth::viewer::{require_viewer, Viewer};
use crate::gql::error::GqlError;

pub const POPULAR_COMMUNITIES_LIMIT: i64 = 10;

/// Every community the viewer belongs to, whatever its visibility.
pub async fn logged_in_user_communities(
    store: &dyn CommunityStore,
    viewer: Option<&Viewer>,
) -> Result<Vec<CommunityRow>, GqlError> {
    let viewer = require_viewer(viewer)?;
    communities_of(store, viewer.uuid, VisibilityFilter::Any).await
}

/// Communities of another user: public ones only.
pub async fn user_communities_by_uuid(
    store: &dyn CommunityStore,
    user_uuid: Uuid,
) -> Result<Vec<CommunityRow>, GqlError> {
    communities_of(
        store,
        user_uuid,
        VisibilityFilter::Only(CommunityVisibility::Public),
    )
    .await
}

pub async fn communities_of(
    store: &dyn CommunityStore,
    user_uuid: Uuid,
    filter: VisibilityFilter,
) -> Result<Vec<CommunityRow>, GqlError> {
    Ok(store.find_communities_for_user(user_uuid, filter).await?)
}

pub async fn popular_communities(
    store: &dyn CommunityStore,
) -> Result<Vec<PopularCommunityRow>, GqlError> {
    Ok(store
        .find_popular_communities(POPULAR_COMMUNITIES_LIMIT)
        .await?)
}

/// Substring match on the community name across every visibility.
pub async fn search_communities(
    store: &dyn CommunityStore,
    name: &str,
) -> Result<Vec<CommunityRow>, GqlError> {
    Ok(store.search_communities_by_name(name).await?)
}

/// Arguments of `createCommunity` after GraphQL parsing.
#[derive(Debug, Clone, Default)]
pub struct CreateCommunityParams {
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub tier: Option<CommunityTier>,
    pub visibility: Option<CommunityVisibility>,
}

pub async fn create_community(
    store: &dyn CommunityStore,
    params: CreateCommunityParams,
) -> Result<CommunityRow, GqlError> {
    let data = NewCommunity {
        uuid: Uuid::new_v4(),
        name: params.name,
        tagline: params.tagline,
        description: params.description,
        location: params.location,
        tier: params.tier.unwrap_or(CommunityTier::Free),
        visibility: params.visibility.unwrap_or(CommunityVisibility::Public),
    };

    let row = store.create_community(data).await?;
    tracing::info!(
        community_uuid = %row.uuid,
        tier = row.tier.as_str(),
        visibility = row.visibility.as_str(),
        "Community created"
    );
    Ok(row)
}
