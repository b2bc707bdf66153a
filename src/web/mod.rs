//! REST API module for Talkboard.
//!
//! Routes live under `/api/v1`; identity comes from a bearer token resolved
//! by the extractors in [`middleware`].

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::{create_health_router, create_router};
pub use server::WebServer;
