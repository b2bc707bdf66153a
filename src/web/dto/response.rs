//! Response DTOs for the Talkboard REST API.

use serde::Serialize;

use crate::board::{Board, PinnedBoard};
use crate::member::Member;
use crate::post::{Comment, Post, PostListItem, PostPreview};

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    /// Response data.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PaginationMeta,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Create a new paginated response.
    pub fn new(data: Vec<T>, page: u32, per_page: u32, total: u64) -> Self {
        Self {
            data,
            meta: PaginationMeta {
                page,
                per_page,
                total,
            },
        }
    }
}

/// Pagination metadata.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items.
    pub total: u64,
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token (JWT).
    pub token: String,
    /// Token expiry in seconds.
    pub expires_in: u64,
    /// Authenticated member profile.
    pub member: MemberResponse,
}

/// Member profile in responses.
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    /// Member id.
    pub id: i64,
    /// Nickname.
    pub nickname: String,
    /// Display name.
    pub member_name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Role.
    pub role: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last modification timestamp.
    pub updated_at: String,
}

impl From<Member> for MemberResponse {
    fn from(m: Member) -> Self {
        Self {
            id: m.id,
            nickname: m.nickname,
            member_name: m.member_name,
            email: m.email,
            phone: m.phone,
            role: m.role.as_str().to_string(),
            created_at: m.audit.created_at,
            updated_at: m.audit.updated_at,
        }
    }
}

/// Board in responses.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    /// Board id.
    pub id: i64,
    /// Board name.
    pub name: String,
    /// Board description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Managing member id.
    pub manager_id: i64,
    /// Whether the board is pinned automatically for new members.
    pub is_default: bool,
    /// Creation timestamp.
    pub created_at: String,
}

impl From<Board> for BoardResponse {
    fn from(b: Board) -> Self {
        Self {
            id: b.id,
            name: b.name,
            description: b.description,
            manager_id: b.manager_id,
            is_default: b.is_default,
            created_at: b.audit.created_at,
        }
    }
}

/// Board with the current member's pinned flag.
#[derive(Debug, Serialize)]
pub struct BoardWithPinResponse {
    /// Board fields.
    #[serde(flatten)]
    pub board: BoardResponse,
    /// Whether the current member has pinned this board. Always false for
    /// anonymous callers.
    pub pinned: bool,
}

/// A pinned board with its post previews.
#[derive(Debug, Serialize)]
pub struct PinnedBoardResponse {
    /// Board id.
    pub board_id: i64,
    /// Board name.
    pub board_name: String,
    /// Board description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Position in the member's pin order (1-based).
    pub order_rank: i64,
    /// Most viewed posts of the board, at most two.
    pub previews: Vec<PostPreviewResponse>,
}

impl PinnedBoardResponse {
    /// Combine a pin row with its previews.
    pub fn new(pin: PinnedBoard, previews: Vec<PostPreview>) -> Self {
        Self {
            board_id: pin.board_id,
            board_name: pin.board_name,
            description: pin.description,
            order_rank: pin.order_rank,
            previews: previews.into_iter().map(Into::into).collect(),
        }
    }
}

/// Compact post preview.
#[derive(Debug, Serialize)]
pub struct PostPreviewResponse {
    /// Post id.
    pub id: i64,
    /// Title.
    pub title: String,
    /// View counter.
    pub view_count: i64,
    /// Like counter.
    pub like_count: i64,
    /// Number of comments.
    pub comment_count: i64,
}

impl From<PostPreview> for PostPreviewResponse {
    fn from(p: PostPreview) -> Self {
        Self {
            id: p.post_id,
            title: p.title,
            view_count: p.view_count,
            like_count: p.like_count,
            comment_count: p.comment_count,
        }
    }
}

/// Post in board listings.
#[derive(Debug, Serialize)]
pub struct PostListItemResponse {
    /// Post id.
    pub id: i64,
    /// Owning board id.
    pub board_id: i64,
    /// Authoring member id; absent for anonymous posts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<i64>,
    /// Title.
    pub title: String,
    /// Whether the author is hidden.
    pub anonymous: bool,
    /// Whether comments are allowed.
    pub commentable: bool,
    /// View counter.
    pub view_count: i64,
    /// Like counter.
    pub like_count: i64,
    /// Scrap counter.
    pub scrap_count: i64,
    /// Number of comments.
    pub comment_count: i64,
    /// Creation timestamp.
    pub created_at: String,
    /// Last modification timestamp.
    pub updated_at: String,
}

impl From<PostListItem> for PostListItemResponse {
    fn from(item: PostListItem) -> Self {
        let p = item.post;
        Self {
            id: p.id,
            board_id: p.board_id,
            author_id: visible_author(p.author_id, p.anonymous),
            title: p.title,
            anonymous: p.anonymous,
            commentable: p.commentable,
            view_count: p.view_count,
            like_count: p.like_count,
            scrap_count: p.scrap_count,
            comment_count: item.comment_count,
            created_at: p.audit.created_at,
            updated_at: p.audit.updated_at,
        }
    }
}

/// Post detail.
#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    /// Post id.
    pub id: i64,
    /// Owning board id.
    pub board_id: i64,
    /// Authoring member id; absent for anonymous posts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<i64>,
    /// Title.
    pub title: String,
    /// Body content.
    pub content: String,
    /// Whether the author is hidden.
    pub anonymous: bool,
    /// Whether comments are allowed.
    pub commentable: bool,
    /// View counter (already includes this fetch).
    pub view_count: i64,
    /// Like counter.
    pub like_count: i64,
    /// Scrap counter.
    pub scrap_count: i64,
    /// Hashtags attached to the post.
    pub hashtags: Vec<String>,
    /// Whether the current member has liked the post; absent for anonymous
    /// callers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked: Option<bool>,
    /// Whether the current member has scrapped the post; absent for anonymous
    /// callers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrapped: Option<bool>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last modification timestamp.
    pub updated_at: String,
}

impl PostDetailResponse {
    /// Build a detail response; `activity` is the caller's (liked, scrapped)
    /// state when authenticated.
    pub fn new(post: Post, hashtags: Vec<String>, activity: Option<(bool, bool)>) -> Self {
        Self {
            id: post.id,
            board_id: post.board_id,
            author_id: visible_author(post.author_id, post.anonymous),
            title: post.title,
            content: post.content,
            anonymous: post.anonymous,
            commentable: post.commentable,
            view_count: post.view_count,
            like_count: post.like_count,
            scrap_count: post.scrap_count,
            hashtags,
            liked: activity.map(|(liked, _)| liked),
            scrapped: activity.map(|(_, scrapped)| scrapped),
            created_at: post.audit.created_at,
            updated_at: post.audit.updated_at,
        }
    }
}

/// Comment in responses.
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    /// Comment id.
    pub id: i64,
    /// Post id.
    pub post_id: i64,
    /// Authoring member id; absent for anonymous comments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<i64>,
    /// Parent comment id for replies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    /// Body content.
    pub content: String,
    /// Whether the author is hidden.
    pub anonymous: bool,
    /// Creation timestamp.
    pub created_at: String,
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            post_id: c.post_id,
            author_id: visible_author(c.author_id, c.anonymous),
            parent_id: c.parent_id,
            content: c.content,
            anonymous: c.anonymous,
            created_at: c.audit.created_at,
        }
    }
}

/// Response for newly created resources.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    /// New resource id.
    pub id: i64,
}

/// Response for activity toggles.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    /// Whether the activity is active after the toggle.
    pub active: bool,
    /// The counter value after the toggle.
    pub count: i64,
}

fn visible_author(author_id: i64, anonymous: bool) -> Option<i64> {
    if anonymous {
        None
    } else {
        Some(author_id)
    }
}
