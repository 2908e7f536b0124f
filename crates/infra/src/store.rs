//! Data-access capability consumed by the GraphQL layer.
//!
//! Resolvers never talk to a database directly; they hold an
//! `Arc<dyn CommunityStore>` and issue one call per field. The PostgreSQL
//! adapter lives in [`crate::db`], the in-memory one in [`crate::memory`].

use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::models::{
    CommunityRow, CommunityTier, CommunityVisibility, PopularCommunityRow, UserRow,
};

/// Restricts community lookups to a single visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityFilter {
    #[default]
    Any,
    Only(CommunityVisibility),
}

impl VisibilityFilter {
    pub fn as_option(&self) -> Option<CommunityVisibility> {
        match self {
            VisibilityFilter::Any => None,
            VisibilityFilter::Only(v) => Some(*v),
        }
    }

    pub fn allows(&self, visibility: CommunityVisibility) -> bool {
        match self {
            VisibilityFilter::Any => true,
            VisibilityFilter::Only(v) => *v == visibility,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewCommunity {
    pub uuid: Uuid,
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub tier: CommunityTier,
    pub visibility: CommunityVisibility,
}

#[async_trait]
pub trait CommunityStore: Send + Sync {
    /// Cheap round trip used by the health endpoint.
    async fn ping(&self) -> StoreResult<()>;

    async fn find_user_by_uuid(&self, uuid: Uuid) -> StoreResult<Option<UserRow>>;

    /// Exact match; emails are unique so at most one row comes back.
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserRow>>;

    /// Communities `user_uuid` is a member of, ordered by name.
    async fn find_communities_for_user(
        &self,
        user_uuid: Uuid,
        visibility: VisibilityFilter,
    ) -> StoreResult<Vec<CommunityRow>>;

    /// Public communities ranked by member count, highest first. Ties fall
    /// back to name, then uuid.
    async fn find_popular_communities(&self, limit: i64) -> StoreResult<Vec<PopularCommunityRow>>;

    /// Communities whose name contains `needle` literally. An empty needle
    /// matches every community.
    async fn search_communities_by_name(&self, needle: &str) -> StoreResult<Vec<CommunityRow>>;

    async fn create_community(&self, data: NewCommunity) -> StoreResult<CommunityRow>;

    /// Members of each requested community, keyed by community uuid.
    /// Communities without members are absent from the map.
    async fn find_members(
        &self,
        community_uuids: &[Uuid],
    ) -> StoreResult<HashMap<Uuid, Vec<UserRow>>>;
}
