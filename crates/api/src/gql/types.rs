use async_graphql::Enum;
use infra::models;

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub enum CommunityTier {
    #[graphql(name = "free")]
    Free,
    #[graphql(name = "tier1")]
    Tier1,
    #[graphql(name = "tier2")]
    Tier2,
    #[graphql(name = "tier3")]
    Tier3,
}

impl From<models::CommunityTier> for CommunityTier {
    fn from(tier: models::CommunityTier) -> Self {
        match tier {
            models::CommunityTier::Free => CommunityTier::Free,
            models::CommunityTier::Tier1 => CommunityTier::Tier1,
            models::CommunityTier::Tier2 => CommunityTier::Tier2,
            models::CommunityTier::Tier3 => CommunityTier::Tier3,
        }
    }
}

impl From<CommunityTier> for models::CommunityTier {
    fn from(tier: CommunityTier) -> Self {
        match tier {
            CommunityTier::Free => models::CommunityTier::Free,
            CommunityTier::Tier1 => models::CommunityTier::Tier1,
            CommunityTier::Tier2 => models::CommunityTier::Tier2,
            CommunityTier::Tier3 => models::CommunityTier::Tier3,
        }
    }
}

/// Community visibility.
#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub enum CommunityType {
    #[graphql(name = "public")]
    Public,
    #[graphql(name = "private")]
    Private,
    #[graphql(name = "secret")]
    Secret,
}

impl From<models::CommunityVisibility> for CommunityType {
    fn from(visibility: models::CommunityVisibility) -> Self {
        match visibility {
            models::CommunityVisibility::Public => CommunityType::Public,
            models::CommunityVisibility::Private => CommunityType::Private,
            models::CommunityVisibility::Secret => CommunityType::Secret,
        }
    }
}

impl From<CommunityType> for models::CommunityVisibility {
    fn from(visibility: CommunityType) -> Self {
        match visibility {
            CommunityType::Public => models::CommunityVisibility::Public,
            CommunityType::Private => models::CommunityVisibility::Private,
            CommunityType::Secret => models::CommunityVisibility::Secret,
        }
    }
}

// The enums below are part of the published schema but no field uses them
// yet; `build_schema` registers them explicitly.

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum ConversationCategoryType {
    #[graphql(name = "public")]
    Public,
    #[graphql(name = "private")]
    Private,
    #[graphql(name = "secret")]
    Secret,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum ConversationCategoryRole {
    #[graphql(name = "guest")]
    Guest,
    #[graphql(name = "member")]
    Member,
    #[graphql(name = "moderator")]
    Moderator,
    #[graphql(name = "admin")]
    Admin,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum UploadedItemType {
    #[graphql(name = "user_avatar")]
    UserAvatar,
    #[graphql(name = "community_avatar")]
    CommunityAvatar,
    #[graphql(name = "post_attachment")]
    PostAttachment,
}
