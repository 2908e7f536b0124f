use uuid::Uuid;

use crate::auth::Claims;
use crate::gql::error::GqlError;

/// The authenticated user a request is resolved on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub uuid: Uuid,
}

impl Viewer {
    pub fn from_claims(claims: &Claims) -> Result<Self, GqlError> {
        Ok(Self {
            uuid: claims.user_uuid()?,
        })
    }
}

pub fn require_viewer(viewer: Option<&Viewer>) -> Result<&Viewer, GqlError> {
    viewer.ok_or(GqlError::Unauthenticated)
}
