use async_graphql::dataloader::Loader;
use infra::{models::UserRow, CommunityStore, StoreError};
use std::{collections::HashMap, future::Future, sync::Arc};
use uuid::Uuid;

// MembersLoader - batch load community members by community uuid
#[derive(Clone)]
pub struct MembersLoader {
    store: Arc<dyn CommunityStore>,
}

impl MembersLoader {
    pub fn new(store: Arc<dyn CommunityStore>) -> Self {
        Self { store }
    }
}

impl Loader<Uuid> for MembersLoader {
    type Value = Vec<UserRow>;
    type Error = Arc<StoreError>;

    fn load(
        &self,
        keys: &[Uuid],
    ) -> impl Future<Output = std::result::Result<HashMap<Uuid, Self::Value>, Self::Error>> + Send
    {
        let store = self.store.clone();
        let ids: Vec<Uuid> = keys.to_vec();

        async move {
            if ids.is_empty() {
                return Ok(HashMap::new());
            }

            store.find_members(&ids).await.map_err(Arc::new)
        }
    }
}
