//! Middleware for the Talkboard REST API.

pub mod auth;
pub mod cors;

pub use auth::{token_layer, AuthMember, MaybeMember};
pub use cors::create_cors_layer;
