//! Board module: boards and per-member pin state.

mod pinned;
mod repository;
mod types;

pub use pinned::{PinnedBoardRepository, PIN_LIMIT};
pub use repository::BoardRepository;
pub use types::{Board, NewBoard, PinnedBoard};
