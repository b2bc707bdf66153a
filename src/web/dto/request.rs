//! Request DTOs for the Talkboard REST API.

use serde::Deserialize;
use validator::Validate;

use super::validation::{no_control_chars, not_empty_trimmed};

/// Member registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login nickname (unique).
    #[validate(
        length(min = 2, max = 32, message = "Nickname must be 2-32 characters"),
        custom(function = "no_control_chars")
    )]
    pub nickname: String,
    /// Display name.
    #[validate(
        length(min = 1, max = 64, message = "Name must be 1-64 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub username: String,
    /// Email address (unique).
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Phone number (optional).
    #[serde(default)]
    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub phone: Option<String>,
    /// Password (validated again by the password policy before hashing).
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login nickname.
    #[validate(custom(function = "not_empty_trimmed"))]
    pub nickname: String,
    /// Password.
    #[validate(custom(function = "not_empty_trimmed"))]
    pub password: String,
}

/// Member profile update request.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMemberRequest {
    /// New display name.
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub member_name: Option<String>,
    /// New email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    /// New phone number. Explicit null clears it; absent leaves it unchanged.
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
}

/// Deserialize an optional field so that an absent key and an explicit null
/// can be told apart.
fn double_option<'de, D>(de: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(de).map(Some)
}

/// Board creation request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBoardRequest {
    /// Board name.
    #[validate(
        length(min = 1, max = 64, message = "Name must be 1-64 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub name: String,
    /// Board description.
    #[serde(default)]
    #[validate(length(max = 256, message = "Description must be at most 256 characters"))]
    pub description: Option<String>,
    /// Whether the board is pinned automatically for new members.
    #[serde(default)]
    pub is_default: bool,
}

/// Pin/unpin request for the current member.
#[derive(Debug, Deserialize, Validate)]
pub struct PinRequest {
    /// Board ids to pin.
    #[serde(default)]
    pub pin_board_ids: Vec<i64>,
    /// Board ids to unpin.
    #[serde(default)]
    pub unpin_board_ids: Vec<i64>,
}

/// Pinned-board reorder request.
#[derive(Debug, Deserialize, Validate)]
pub struct ReorderRequest {
    /// Board ids in the desired order. Must cover exactly the pinned set.
    #[validate(length(min = 1, message = "At least one board id is required"))]
    pub board_ids: Vec<i64>,
}

/// Post creation request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    /// Post title.
    #[validate(
        length(min = 1, max = 128, message = "Title must be 1-128 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub title: String,
    /// Post body.
    #[validate(
        length(min = 1, max = 65536, message = "Content must be 1-65536 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub content: String,
    /// Hide the author in listings and details.
    #[serde(default)]
    pub anonymous: bool,
    /// Whether comments are allowed.
    #[serde(default = "default_true")]
    pub commentable: bool,
    /// Hashtags attached to the post.
    #[serde(default)]
    pub hashtags: Vec<String>,
}

fn default_true() -> bool {
    true
}

/// Partial post update request.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    /// New title.
    #[validate(length(min = 1, max = 128, message = "Title must be 1-128 characters"))]
    pub title: Option<String>,
    /// New body.
    #[validate(length(min = 1, max = 65536, message = "Content must be 1-65536 characters"))]
    pub content: Option<String>,
    /// New anonymity flag.
    pub anonymous: Option<bool>,
    /// New commentable flag.
    pub commentable: Option<bool>,
}

/// Comment creation request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    /// Comment body.
    #[validate(
        length(min = 1, max = 4096, message = "Content must be 1-4096 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub content: String,
    /// Parent comment id for replies (one level of nesting).
    #[serde(default)]
    pub parent_id: Option<i64>,
    /// Hide the author.
    #[serde(default)]
    pub anonymous: bool,
}

/// Pagination and keyword query for post listings.
#[derive(Debug, Deserialize)]
pub struct PostListQuery {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// Optional keyword filter on title and content.
    #[serde(default)]
    pub keyword: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl Default for PostListQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
            keyword: None,
        }
    }
}

impl PostListQuery {
    /// Maximum accepted page size.
    pub const MAX_PER_PAGE: u32 = 100;

    /// Convert page/per_page to an SQL offset and limit, clamping the page
    /// size to [`MAX_PER_PAGE`](Self::MAX_PER_PAGE).
    pub fn to_offset_limit(&self) -> (i64, i64) {
        let page = self.page.max(1);
        let per_page = self.per_page.clamp(1, Self::MAX_PER_PAGE);
        (((page - 1) as i64) * per_page as i64, per_page as i64)
    }
}
