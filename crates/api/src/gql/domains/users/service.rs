use infra::{models::UserRow, CommunityStore};
use uuid::Uuid;

use crate::auth::viewer::{require_viewer, Viewer};
use crate::gql::error::GqlError;

pub async fn logged_in_user_details(
    store: &dyn CommunityStore,
    viewer: Option<&Viewer>,
) -> Result<Option<UserRow>, GqlError> {
    let viewer = require_viewer(viewer)?;
    Ok(store.find_user_by_uuid(viewer.uuid).await?)
}

pub async fn user_details_by_uuid(
    store: &dyn CommunityStore,
    user_uuid: Uuid,
) -> Result<Option<UserRow>, GqlError> {
    Ok(store.find_user_by_uuid(user_uuid).await?)
}
