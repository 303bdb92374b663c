pub mod auth;

pub use auth::{Claims, JwtService, TokenType};
