pub mod config;
pub mod jwt;

pub use config::AuthConfig;
pub use jwt::{Claims, JwtService};
