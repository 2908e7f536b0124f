use async_graphql::{dataloader::DataLoader, ComplexObject, Context, Result, SimpleObject};
use infra::models::{CommunityRow, PopularCommunityRow};
use uuid::Uuid;

use crate::gql::domains::users::types::UserDetails;
use crate::gql::error::{GqlError, GqlResultExt};
use crate::gql::loaders::MembersLoader;
use crate::gql::types::{CommunityTier, CommunityType};

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct Community {
    pub uuid: String,
    pub name: Option<String>,
    pub tagline: Option<String>,
    #[graphql(name = "desc")]
    pub description: Option<String>,
    pub location: Option<String>,
    pub tier: CommunityTier,
    pub visibility: CommunityType,
    #[graphql(skip)]
    pub community_uuid: Uuid,
}

impl From<CommunityRow> for Community {
    fn from(row: CommunityRow) -> Self {
        Self {
            uuid: row.uuid.to_string(),
            name: row.name,
            tagline: row.tagline,
            description: row.description,
            location: row.location,
            tier: row.tier.into(),
            visibility: row.visibility.into(),
            community_uuid: row.uuid,
        }
    }
}

#[ComplexObject]
impl Community {
    /// Members of this community.
    #[graphql(name = "Users")]
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<UserDetails>> {
        let loader = ctx.data::<DataLoader<MembersLoader>>()?;
        let members = loader
            .load_one(self.community_uuid)
            .await
            .map_err(GqlError::from)
            .extended()?
            .unwrap_or_default();

        Ok(members.into_iter().map(UserDetails::from).collect())
    }
}

/// Flattened community record ranked by member count.
#[derive(SimpleObject, Clone, Debug)]
pub struct PopularCommunity {
    pub uuid: String,
    pub name: Option<String>,
    pub tagline: Option<String>,
    #[graphql(name = "desc")]
    pub description: Option<String>,
    pub location: Option<String>,
    pub user_count: i32,
}

impl From<PopularCommunityRow> for PopularCommunity {
    fn from(row: PopularCommunityRow) -> Self {
        Self {
            uuid: row.uuid.to_string(),
            name: row.name,
            tagline: row.tagline,
            description: row.description,
            location: row.location,
            user_count: i32::try_from(row.user_count).unwrap_or(i32::MAX),
        }
    }
}
