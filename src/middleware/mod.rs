pub mod auth;

pub use auth::{AdminUser, CurrentUser, JwtAuth};
