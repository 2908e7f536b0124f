use async_graphql::MergedObject;

use crate::gql::domains::auth::AuthMutation;
use crate::gql::domains::communities::CommunityMutation;

#[derive(MergedObject, Default)]
pub struct MutationRoot(CommunityMutation, AuthMutation);
