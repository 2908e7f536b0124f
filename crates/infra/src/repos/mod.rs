pub mod communities;
pub mod users;
