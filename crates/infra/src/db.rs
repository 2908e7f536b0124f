use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::models::{CommunityRow, PopularCommunityRow, UserRow};
use crate::repos::{communities, users};
use crate::store::{CommunityStore, NewCommunity, VisibilityFilter};

pub type Db = PgPool;

/// [`CommunityStore`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgStore {
    pool: Db,
}

impl PgStore {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommunityStore for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        let _one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    async fn find_user_by_uuid(&self, uuid: Uuid) -> StoreResult<Option<UserRow>> {
        Ok(users::get_by_uuid(&self.pool, uuid).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserRow>> {
        Ok(users::get_by_email(&self.pool, email).await?)
    }

    async fn find_communities_for_user(
        &self,
        user_uuid: Uuid,
        visibility: VisibilityFilter,
    ) -> StoreResult<Vec<CommunityRow>> {
        Ok(communities::list_for_user(&self.pool, user_uuid, visibility.as_option()).await?)
    }

    async fn find_popular_communities(&self, limit: i64) -> StoreResult<Vec<PopularCommunityRow>> {
        Ok(communities::list_popular(&self.pool, limit).await?)
    }

    async fn search_communities_by_name(&self, needle: &str) -> StoreResult<Vec<CommunityRow>> {
        Ok(communities::search_by_name(&self.pool, needle).await?)
    }

    async fn create_community(&self, data: NewCommunity) -> StoreResult<CommunityRow> {
        Ok(communities::create(&self.pool, &data).await?)
    }

    async fn find_members(
        &self,
        community_uuids: &[Uuid],
    ) -> StoreResult<HashMap<Uuid, Vec<UserRow>>> {
        if community_uuids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = communities::list_members(&self.pool, community_uuids).await?;
        let mut members: HashMap<Uuid, Vec<UserRow>> = HashMap::new();
        for row in rows {
            members.entry(row.community_uuid).or_default().push(row.user);
        }
        Ok(members)
    }
}
