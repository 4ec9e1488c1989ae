pub mod auth_token;

pub use auth_token::require_auth_token;
