//! In-process [`CommunityStore`] used by the test suite and by
//! `STORE_BACKEND=memory` local runs. Mirrors the ordering and filtering
//! rules of the PostgreSQL queries in [`crate::repos::communities`].

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::{CommunityRow, CommunityVisibility, PopularCommunityRow, UserRow};
use crate::store::{CommunityStore, NewCommunity, VisibilityFilter};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, UserRow>,
    communities: HashMap<Uuid, CommunityRow>,
    /// (community_uuid, user_uuid) in insertion order.
    memberships: Vec<(Uuid, Uuid)>,
}

impl Tables {
    fn member_count(&self, community_uuid: Uuid) -> i64 {
        self.memberships
            .iter()
            .filter(|(c, _)| *c == community_uuid)
            .count() as i64
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user. Fails when another user already owns the email.
    pub fn insert_user(&self, user: UserRow) -> StoreResult<()> {
        let mut tables = self.tables.write();
        if tables
            .users
            .values()
            .any(|u| u.email == user.email && u.uuid != user.uuid)
        {
            return Err(StoreError::backend(format!(
                "duplicate email: {}",
                user.email
            )));
        }
        tables.users.insert(user.uuid, user);
        Ok(())
    }

    pub fn insert_community(&self, community: CommunityRow) {
        self.tables
            .write()
            .communities
            .insert(community.uuid, community);
    }

    pub fn add_member(&self, community_uuid: Uuid, user_uuid: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write();
        if !tables.communities.contains_key(&community_uuid) {
            return Err(StoreError::backend(format!(
                "unknown community: {community_uuid}"
            )));
        }
        if !tables.users.contains_key(&user_uuid) {
            return Err(StoreError::backend(format!("unknown user: {user_uuid}")));
        }
        if !tables.memberships.contains(&(community_uuid, user_uuid)) {
            tables.memberships.push((community_uuid, user_uuid));
        }
        Ok(())
    }

    pub fn community_count(&self) -> usize {
        self.tables.read().communities.len()
    }
}

/// Name ascending with unnamed communities last, then uuid.
fn by_name(a: (&Option<String>, Uuid), b: (&Option<String>, Uuid)) -> Ordering {
    match (a.0, b.0) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.1.cmp(&b.1))
}

fn sort_communities(rows: &mut [CommunityRow]) {
    rows.sort_by(|a, b| by_name((&a.name, a.uuid), (&b.name, b.uuid)));
}

#[async_trait]
impl CommunityStore for InMemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn find_user_by_uuid(&self, uuid: Uuid) -> StoreResult<Option<UserRow>> {
        Ok(self.tables.read().users.get(&uuid).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserRow>> {
        Ok(self
            .tables
            .read()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_communities_for_user(
        &self,
        user_uuid: Uuid,
        visibility: VisibilityFilter,
    ) -> StoreResult<Vec<CommunityRow>> {
        let tables = self.tables.read();
        let mut rows: Vec<CommunityRow> = tables
            .memberships
            .iter()
            .filter(|(_, u)| *u == user_uuid)
            .filter_map(|(c, _)| tables.communities.get(c))
            .filter(|c| visibility.allows(c.visibility))
            .cloned()
            .collect();
        sort_communities(&mut rows);
        Ok(rows)
    }

    async fn find_popular_communities(&self, limit: i64) -> StoreResult<Vec<PopularCommunityRow>> {
        let tables = self.tables.read();
        let mut rows: Vec<PopularCommunityRow> = tables
            .communities
            .values()
            .filter(|c| c.visibility == CommunityVisibility::Public)
            .map(|c| PopularCommunityRow {
                uuid: c.uuid,
                name: c.name.clone(),
                tagline: c.tagline.clone(),
                description: c.description.clone(),
                location: c.location.clone(),
                user_count: tables.member_count(c.uuid),
            })
            .collect();
        rows.sort_by(|a, b| {
            b.user_count
                .cmp(&a.user_count)
                .then_with(|| by_name((&a.name, a.uuid), (&b.name, b.uuid)))
        });
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn search_communities_by_name(&self, needle: &str) -> StoreResult<Vec<CommunityRow>> {
        let mut rows: Vec<CommunityRow> = self
            .tables
            .read()
            .communities
            .values()
            .filter(|c| c.name.as_deref().unwrap_or_default().contains(needle))
            .cloned()
            .collect();
        sort_communities(&mut rows);
        Ok(rows)
    }

    async fn create_community(&self, data: NewCommunity) -> StoreResult<CommunityRow> {
        let mut tables = self.tables.write();
        if tables.communities.contains_key(&data.uuid) {
            return Err(StoreError::backend(format!(
                "duplicate community uuid: {}",
                data.uuid
            )));
        }

        let now = Utc::now();
        let row = CommunityRow {
            uuid: data.uuid,
            name: data.name,
            tagline: data.tagline,
            description: data.description,
            location: data.location,
            tier: data.tier,
            visibility: data.visibility,
            created_at: now,
            updated_at: now,
        };
        tables.communities.insert(row.uuid, row.clone());
        Ok(row)
    }

    async fn find_members(
        &self,
        community_uuids: &[Uuid],
    ) -> StoreResult<HashMap<Uuid, Vec<UserRow>>> {
        let tables = self.tables.read();
        let mut members: HashMap<Uuid, Vec<UserRow>> = HashMap::new();
        for (community_uuid, user_uuid) in &tables.memberships {
            if !community_uuids.contains(community_uuid) {
                continue;
            }
            if let Some(user) = tables.users.get(user_uuid) {
                members
                    .entry(*community_uuid)
                    .or_default()
                    .push(user.clone());
            }
        }
        Ok(members)
    }
}
