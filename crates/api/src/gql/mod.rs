pub mod context;
pub mod domains;
pub mod error;
pub mod loaders;
pub mod root;
pub mod scalars;
pub mod schema;
pub mod types;

pub use root::{MutationRoot, QueryRoot};
pub use schema::{build_schema, AppSchema};
