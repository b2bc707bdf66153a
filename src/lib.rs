//! Talkboard - community forum backend.
//!
//! Boards, posts, comments, member accounts, pinned-board ordering, and
//! like/scrap activity tracking, exposed over a REST API with bearer-token
//! authentication.

pub mod auth;
pub mod board;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod member;
pub mod post;
pub mod web;

pub use auth::{
    hash_password, validate_password, verify_password, Claims, PasswordError, TokenError,
    TokenService,
};
pub use board::{
    Board, BoardRepository, NewBoard, PinnedBoard, PinnedBoardRepository, PIN_LIMIT,
};
pub use config::Config;
pub use db::{Database, DbPool};
pub use error::{Result, TalkboardError};
pub use member::{
    Audit, Member, MemberRepository, MemberRole, MemberUpdate, NewMember,
};
pub use post::{
    ActivityType, Comment, CommentRepository, MemberActivityRepository, NewComment, NewPost,
    Post, PostListItem, PostPreview, PostRepository, PostUpdate, ToggleOutcome,
};
pub use web::WebServer;
