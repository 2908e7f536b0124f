pub mod resolvers;
pub mod service;

pub use resolvers::AuthMutation;
