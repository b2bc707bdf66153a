//! Board domain types.

use crate::member::Audit;

/// A board (named post category).
#[derive(Debug, Clone)]
pub struct Board {
    /// Board id.
    pub id: i64,
    /// Managing member id.
    pub manager_id: i64,
    /// Board name.
    pub name: String,
    /// Board description.
    pub description: Option<String>,
    /// Whether this board is pinned automatically for new members.
    pub is_default: bool,
    /// Audit timestamps.
    pub audit: Audit,
}

/// Data for creating a board.
#[derive(Debug, Clone)]
pub struct NewBoard {
    /// Managing member id.
    pub manager_id: i64,
    /// Board name.
    pub name: String,
    /// Board description.
    pub description: Option<String>,
    /// Whether the board is part of the default pinned set.
    pub is_default: bool,
}

impl NewBoard {
    /// Create a new board owned by the given manager.
    pub fn new(manager_id: i64, name: impl Into<String>) -> Self {
        Self {
            manager_id,
            name: name.into(),
            description: None,
            is_default: false,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the board as default-pinned for new members.
    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }
}

/// A member's pinned board, joined with the board it points at.
#[derive(Debug, Clone)]
pub struct PinnedBoard {
    /// Pin row id.
    pub id: i64,
    /// Pinned board id.
    pub board_id: i64,
    /// Board name.
    pub board_name: String,
    /// Board description.
    pub description: Option<String>,
    /// Position in the member's pin order (1-based).
    pub order_rank: i64,
}
