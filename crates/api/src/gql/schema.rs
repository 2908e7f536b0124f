use async_graphql::dataloader::DataLoader;
use async_graphql::{EmptySubscription, Schema};

use super::loaders::MembersLoader;
use super::types::{ConversationCategoryRole, ConversationCategoryType, UploadedItemType};
use super::{MutationRoot, QueryRoot};
use crate::state::AppState;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the GraphQL schema and inject shared state (AppState) into the context.
pub fn build_schema(state: AppState, introspection_enabled: bool) -> AppSchema {
    let members_loader = DataLoader::new(MembersLoader::new(state.store.clone()), tokio::spawn);

    let mut builder = Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(state) // AppState is Clone; available in resolvers via ctx.data::<AppState>()
    .data(members_loader)
    .register_output_type::<ConversationCategoryType>()
    .register_output_type::<ConversationCategoryRole>()
    .register_output_type::<UploadedItemType>()
    .limit_depth(15)
    .limit_complexity(200);

    if !introspection_enabled {
        builder = builder.disable_introspection();
    }

    builder.finish()
}
