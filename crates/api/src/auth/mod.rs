pub mod config;
pub mod cookie;
pub mod jwt;
pub mod password;
pub mod viewer;

pub use config::AuthConfig;
pub use cookie::SessionCookies;
pub use jwt::{Claims, JwtService};
pub use password::PasswordService;
pub use viewer::Viewer;
