use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "community_tier", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CommunityTier {
    Free,
    Tier1,
    Tier2,
    Tier3,
}

impl CommunityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommunityTier::Free => "free",
            CommunityTier::Tier1 => "tier1",
            CommunityTier::Tier2 => "tier2",
            CommunityTier::Tier3 => "tier3",
        }
    }
}

/// Who may see a community outside of its own membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "community_visibility", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CommunityVisibility {
    Public,
    Private,
    Secret,
}

impl CommunityVisibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommunityVisibility::Public => "public",
            CommunityVisibility::Private => "private",
            CommunityVisibility::Secret => "secret",
        }
    }
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct UserRow {
    pub uuid: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_attributes: Option<String>,
    pub location: Option<String>,
    pub avatar_upload_uuid: Option<Uuid>,
    pub last_seen_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct CommunityRow {
    pub uuid: Uuid,
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub tier: CommunityTier,
    pub visibility: CommunityVisibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public community flattened together with its member count.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct PopularCommunityRow {
    pub uuid: Uuid,
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub user_count: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct MemberRow {
    pub community_uuid: Uuid,
    #[sqlx(flatten)]
    pub user: UserRow,
}
