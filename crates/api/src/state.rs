use std::sync::Arc;

use infra::CommunityStore;

use crate::auth::{AuthConfig, JwtService};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CommunityStore>,
    auth_config: AuthConfig,
    jwt_service: JwtService,
}

impl AppState {
    pub fn new(store: Arc<dyn CommunityStore>, auth_config: AuthConfig) -> Self {
        let jwt_service = JwtService::new(&auth_config);

        Self {
            store,
            auth_config,
            jwt_service,
        }
    }

    pub fn from_env(store: Arc<dyn CommunityStore>) -> anyhow::Result<Self> {
        Ok(Self::new(store, AuthConfig::from_env()?))
    }

    pub fn auth_config(&self) -> &AuthConfig {
        &self.auth_config
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }
}
