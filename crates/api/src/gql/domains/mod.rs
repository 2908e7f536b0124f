// Each domain contains: mod.rs, resolvers.rs, service.rs and (where it
// declares output types) types.rs

pub mod auth;
pub mod communities;
pub mod users;
