//! Post domain types.

use std::str::FromStr;

use crate::member::Audit;

/// Activity types tracked per member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityType {
    /// Post like.
    PostLike,
    /// Post scrap (bookmark).
    PostScrap,
}

impl ActivityType {
    /// String form stored in member_activities.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::PostLike => "POST_LIKE",
            ActivityType::PostScrap => "POST_SCRAP",
        }
    }

    /// The posts counter column this activity drives.
    pub fn counter_column(&self) -> &'static str {
        match self {
            ActivityType::PostLike => "like_count",
            ActivityType::PostScrap => "scrap_count",
        }
    }
}

impl FromStr for ActivityType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "POST_LIKE" => Ok(ActivityType::PostLike),
            "POST_SCRAP" => Ok(ActivityType::PostScrap),
            _ => Err(()),
        }
    }
}

/// A post.
#[derive(Debug, Clone)]
pub struct Post {
    /// Post id.
    pub id: i64,
    /// Owning board id.
    pub board_id: i64,
    /// Authoring member id.
    pub author_id: i64,
    /// Title.
    pub title: String,
    /// Body content.
    pub content: String,
    /// Whether the author is hidden.
    pub anonymous: bool,
    /// Whether comments are allowed.
    pub commentable: bool,
    /// Soft-delete flag.
    pub deleted: bool,
    /// View counter.
    pub view_count: i64,
    /// Like counter.
    pub like_count: i64,
    /// Scrap counter.
    pub scrap_count: i64,
    /// Audit timestamps.
    pub audit: Audit,
}

/// Data for creating a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Owning board id.
    pub board_id: i64,
    /// Authoring member id.
    pub author_id: i64,
    /// Title.
    pub title: String,
    /// Body content.
    pub content: String,
    /// Whether the author is hidden.
    pub anonymous: bool,
    /// Whether comments are allowed.
    pub commentable: bool,
    /// Hashtags attached to the post.
    pub hashtags: Vec<String>,
}

impl NewPost {
    /// Create a new post with the required fields.
    pub fn new(
        board_id: i64,
        author_id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            board_id,
            author_id,
            title: title.into(),
            content: content.into(),
            anonymous: false,
            commentable: true,
            hashtags: Vec::new(),
        }
    }

    /// Set the anonymity flag.
    pub fn with_anonymous(mut self, anonymous: bool) -> Self {
        self.anonymous = anonymous;
        self
    }

    /// Set the commentable flag.
    pub fn with_commentable(mut self, commentable: bool) -> Self {
        self.commentable = commentable;
        self
    }

    /// Attach hashtags.
    pub fn with_hashtags(mut self, hashtags: Vec<String>) -> Self {
        self.hashtags = hashtags;
        self
    }
}

/// Partial update of a post.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    /// New title.
    pub title: Option<String>,
    /// New content.
    pub content: Option<String>,
    /// New anonymity flag.
    pub anonymous: Option<bool>,
    /// New commentable flag.
    pub commentable: Option<bool>,
}

impl PostUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the anonymity flag.
    pub fn anonymous(mut self, anonymous: bool) -> Self {
        self.anonymous = Some(anonymous);
        self
    }

    /// Set the commentable flag.
    pub fn commentable(mut self, commentable: bool) -> Self {
        self.commentable = Some(commentable);
        self
    }

    /// Returns true when no fields are set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.anonymous.is_none()
            && self.commentable.is_none()
    }
}

/// A post in a board listing, with its comment count.
#[derive(Debug, Clone)]
pub struct PostListItem {
    /// The post.
    pub post: Post,
    /// Number of comments on the post.
    pub comment_count: i64,
}

/// Compact post preview used on the pinned-board overview.
#[derive(Debug, Clone)]
pub struct PostPreview {
    /// Post id.
    pub post_id: i64,
    /// Title.
    pub title: String,
    /// View counter.
    pub view_count: i64,
    /// Like counter.
    pub like_count: i64,
    /// Number of comments.
    pub comment_count: i64,
}

/// A comment on a post.
#[derive(Debug, Clone)]
pub struct Comment {
    /// Comment id.
    pub id: i64,
    /// Post id.
    pub post_id: i64,
    /// Authoring member id.
    pub author_id: i64,
    /// Parent comment id for replies (one level).
    pub parent_id: Option<i64>,
    /// Body content.
    pub content: String,
    /// Whether the author is hidden.
    pub anonymous: bool,
    /// Audit timestamps.
    pub audit: Audit,
}

/// Data for creating a comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// Post id.
    pub post_id: i64,
    /// Authoring member id.
    pub author_id: i64,
    /// Parent comment id for replies.
    pub parent_id: Option<i64>,
    /// Body content.
    pub content: String,
    /// Whether the author is hidden.
    pub anonymous: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_type_round_trip() {
        assert_eq!(
            "POST_LIKE".parse::<ActivityType>().unwrap(),
            ActivityType::PostLike
        );
        assert_eq!(ActivityType::PostScrap.as_str(), "POST_SCRAP");
        assert!("COMMENT_LIKE".parse::<ActivityType>().is_err());
    }

    #[test]
    fn test_counter_columns() {
        assert_eq!(ActivityType::PostLike.counter_column(), "like_count");
        assert_eq!(ActivityType::PostScrap.counter_column(), "scrap_count");
    }

    #[test]
    fn test_post_update_builder() {
        assert!(PostUpdate::new().is_empty());
        let update = PostUpdate::new().title("t").commentable(false);
        assert!(!update.is_empty());
        assert_eq!(update.commentable, Some(false));
    }
}
