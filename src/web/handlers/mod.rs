//! API handlers for the Talkboard REST API.

use std::sync::Arc;

use crate::auth::TokenService;
use crate::Database;

pub mod board;
pub mod member;
pub mod pinned;
pub mod post;

pub use board::*;
pub use member::*;
pub use pinned::*;
pub use post::*;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: Database,
    /// Token service.
    pub tokens: Arc<TokenService>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, tokens: Arc<TokenService>) -> Self {
        Self { db, tokens }
    }
}
