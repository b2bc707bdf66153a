//! Post and comment handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::board::BoardRepository;
use crate::post::{
    ActivityType, CommentRepository, MemberActivityRepository, NewComment, NewPost, Post,
    PostRepository, PostUpdate,
};
use crate::web::dto::{
    ApiResponse, CommentResponse, CreateCommentRequest, CreatePostRequest, CreatedResponse,
    PaginatedResponse, PostDetailResponse, PostListItemResponse, PostListQuery, ToggleResponse,
    UpdatePostRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::{AuthMember, MaybeMember};

/// GET /api/v1/boards/:board_id/posts - Paginated post listing.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Path(board_id): Path<i64>,
    Query(query): Query<PostListQuery>,
) -> Result<Json<PaginatedResponse<PostListItemResponse>>, ApiError> {
    if !BoardRepository::new(state.db.pool()).exists(board_id).await? {
        return Err(ApiError::not_found("Board not found"));
    }

    let (offset, limit) = query.to_offset_limit();
    let keyword = query.keyword.as_deref();

    let posts = PostRepository::new(state.db.pool());
    let items = posts.list_by_board(board_id, keyword, offset, limit).await?;
    let total = posts.count_by_board(board_id, keyword).await?;

    Ok(Json(PaginatedResponse::new(
        items.into_iter().map(Into::into).collect(),
        query.page.max(1),
        limit as u32,
        total as u64,
    )))
}

/// POST /api/v1/boards/:board_id/posts - Create a post.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    AuthMember(claims): AuthMember,
    Path(board_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedResponse>>), ApiError> {
    if !BoardRepository::new(state.db.pool()).exists(board_id).await? {
        return Err(ApiError::not_found("Board not found"));
    }

    let new_post = NewPost::new(board_id, claims.member_id, req.title, req.content)
        .with_anonymous(req.anonymous)
        .with_commentable(req.commentable)
        .with_hashtags(req.hashtags);

    let id = PostRepository::new(state.db.pool()).create(&new_post).await?;

    tracing::info!(post_id = id, board_id, author_id = claims.member_id, "post created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(CreatedResponse { id })),
    ))
}

/// GET /api/v1/boards/:board_id/posts/:post_id - Post detail.
///
/// Increments the view counter atomically with the read; anonymous and
/// authenticated callers take the same path. Authenticated callers also get
/// their liked/scrapped state.
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    MaybeMember(claims): MaybeMember,
    Path((board_id, post_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<PostDetailResponse>>, ApiError> {
    let (post, hashtags) = PostRepository::new(state.db.pool())
        .get_detail_and_increment_view(board_id, post_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    let activity = match claims {
        Some(claims) => Some(
            MemberActivityRepository::new(state.db.pool())
                .post_activity_state(claims.member_id, post_id)
                .await?,
        ),
        None => None,
    };

    Ok(Json(ApiResponse::new(PostDetailResponse::new(
        post, hashtags, activity,
    ))))
}

/// PATCH /api/v1/boards/:board_id/posts/:post_id - Author-only partial update.
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    AuthMember(claims): AuthMember,
    Path((board_id, post_id)): Path<(i64, i64)>,
    ValidatedJson(req): ValidatedJson<UpdatePostRequest>,
) -> Result<Json<ApiResponse<PostDetailResponse>>, ApiError> {
    let posts = PostRepository::new(state.db.pool());
    let post = fetch_board_post(&posts, board_id, post_id).await?;

    if post.author_id != claims.member_id {
        return Err(ApiError::forbidden("Only the author may edit this post"));
    }

    let mut update = PostUpdate::new();
    if let Some(title) = req.title {
        update = update.title(title);
    }
    if let Some(content) = req.content {
        update = update.content(content);
    }
    if let Some(anonymous) = req.anonymous {
        update = update.anonymous(anonymous);
    }
    if let Some(commentable) = req.commentable {
        update = update.commentable(commentable);
    }

    let updated = posts
        .update(post_id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;
    let hashtags = posts.hashtags(post_id).await?;

    Ok(Json(ApiResponse::new(PostDetailResponse::new(
        updated, hashtags, None,
    ))))
}

/// DELETE /api/v1/boards/:board_id/posts/:post_id - Author-only soft delete.
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    AuthMember(claims): AuthMember,
    Path((board_id, post_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    let posts = PostRepository::new(state.db.pool());
    let post = fetch_board_post(&posts, board_id, post_id).await?;

    if post.author_id != claims.member_id {
        return Err(ApiError::forbidden("Only the author may delete this post"));
    }

    posts.soft_delete(post_id).await?;

    tracing::info!(post_id, "post deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/boards/:board_id/posts/:post_id/like - Toggle a like.
pub async fn toggle_like(
    State(state): State<Arc<AppState>>,
    AuthMember(claims): AuthMember,
    Path((board_id, post_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<ToggleResponse>>, ApiError> {
    toggle_activity(&state, claims.member_id, board_id, post_id, ActivityType::PostLike).await
}

/// POST /api/v1/boards/:board_id/posts/:post_id/scrap - Toggle a scrap.
pub async fn toggle_scrap(
    State(state): State<Arc<AppState>>,
    AuthMember(claims): AuthMember,
    Path((board_id, post_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<ToggleResponse>>, ApiError> {
    toggle_activity(&state, claims.member_id, board_id, post_id, ActivityType::PostScrap).await
}

async fn toggle_activity(
    state: &AppState,
    member_id: i64,
    board_id: i64,
    post_id: i64,
    activity: ActivityType,
) -> Result<Json<ApiResponse<ToggleResponse>>, ApiError> {
    let posts = PostRepository::new(state.db.pool());
    fetch_board_post(&posts, board_id, post_id).await?;

    let outcome = MemberActivityRepository::new(state.db.pool())
        .toggle(member_id, post_id, activity)
        .await?;

    Ok(Json(ApiResponse::new(ToggleResponse {
        active: outcome.active,
        count: outcome.count,
    })))
}

/// GET /api/v1/boards/:board_id/posts/:post_id/comments - List comments.
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path((board_id, post_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<Vec<CommentResponse>>>, ApiError> {
    let posts = PostRepository::new(state.db.pool());
    fetch_board_post(&posts, board_id, post_id).await?;

    let comments = CommentRepository::new(state.db.pool())
        .list_by_post(post_id)
        .await?;

    Ok(Json(ApiResponse::new(
        comments.into_iter().map(Into::into).collect(),
    )))
}

/// POST /api/v1/boards/:board_id/posts/:post_id/comments - Create a comment.
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    AuthMember(claims): AuthMember,
    Path((board_id, post_id)): Path<(i64, i64)>,
    ValidatedJson(req): ValidatedJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CommentResponse>>), ApiError> {
    let posts = PostRepository::new(state.db.pool());
    let post = fetch_board_post(&posts, board_id, post_id).await?;

    if !post.commentable {
        return Err(ApiError::unprocessable("Comments are disabled on this post"));
    }

    let comment = CommentRepository::new(state.db.pool())
        .create(&NewComment {
            post_id,
            author_id: claims.member_id,
            parent_id: req.parent_id,
            content: req.content,
            anonymous: req.anonymous,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(comment.into())),
    ))
}

/// Fetch a live post and check it belongs to the given board.
async fn fetch_board_post(
    posts: &PostRepository<'_>,
    board_id: i64,
    post_id: i64,
) -> Result<Post, ApiError> {
    posts
        .get_by_id(post_id)
        .await?
        .filter(|post| post.board_id == board_id)
        .ok_or_else(|| ApiError::not_found("Post not found"))
}
