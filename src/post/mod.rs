//! Post module: posts, comments, and member activity records.

mod activity;
mod comment;
mod repository;
mod types;

pub use activity::{MemberActivityRepository, ToggleOutcome};
pub use comment::CommentRepository;
pub use repository::PostRepository;
pub use types::{
    ActivityType, Comment, NewComment, NewPost, Post, PostListItem, PostPreview, PostUpdate,
};
