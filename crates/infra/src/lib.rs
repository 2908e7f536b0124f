pub mod db;
pub mod error;
pub mod memory;
pub mod models;
pub mod repos;
pub mod store;

pub use db::PgStore;
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use store::{CommunityStore, NewCommunity, VisibilityFilter};
