//! Board handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::collections::HashSet;
use std::sync::Arc;

use crate::board::{BoardRepository, NewBoard, PinnedBoardRepository};
use crate::member::MemberRole;
use crate::post::PostRepository;
use crate::web::dto::{
    ApiResponse, BoardResponse, BoardWithPinResponse, CreateBoardRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::{AuthMember, MaybeMember};

/// GET /api/v1/boards - List all boards.
pub async fn list_boards(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<BoardResponse>>>, ApiError> {
    let boards = BoardRepository::new(state.db.pool()).list_all().await?;
    Ok(Json(ApiResponse::new(
        boards.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/v1/boards/with-pin - List boards with the caller's pinned flag.
///
/// Anonymous callers see every flag as false.
pub async fn list_boards_with_pin(
    State(state): State<Arc<AppState>>,
    MaybeMember(claims): MaybeMember,
) -> Result<Json<ApiResponse<Vec<BoardWithPinResponse>>>, ApiError> {
    let boards = BoardRepository::new(state.db.pool()).list_all().await?;

    let pinned: HashSet<i64> = match claims {
        Some(claims) => PinnedBoardRepository::new(state.db.pool())
            .list_by_member(claims.member_id)
            .await?
            .into_iter()
            .map(|p| p.board_id)
            .collect(),
        None => HashSet::new(),
    };

    let responses = boards
        .into_iter()
        .map(|b| {
            let is_pinned = pinned.contains(&b.id);
            BoardWithPinResponse {
                board: b.into(),
                pinned: is_pinned,
            }
        })
        .collect();

    Ok(Json(ApiResponse::new(responses)))
}

/// GET /api/v1/boards/:board_id - Board detail.
pub async fn get_board(
    State(state): State<Arc<AppState>>,
    Path(board_id): Path<i64>,
) -> Result<Json<ApiResponse<BoardResponse>>, ApiError> {
    let board = BoardRepository::new(state.db.pool())
        .get_by_id(board_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Board not found"))?;

    Ok(Json(ApiResponse::new(board.into())))
}

/// POST /api/v1/boards - Create a board managed by the current member.
pub async fn create_board(
    State(state): State<Arc<AppState>>,
    AuthMember(claims): AuthMember,
    ValidatedJson(req): ValidatedJson<CreateBoardRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BoardResponse>>), ApiError> {
    let mut new_board = NewBoard::new(claims.member_id, req.name).with_default(req.is_default);
    if let Some(description) = req.description {
        new_board = new_board.with_description(description);
    }

    let board = BoardRepository::new(state.db.pool()).create(&new_board).await?;

    tracing::info!(board_id = board.id, manager_id = claims.member_id, "board created");

    Ok((StatusCode::CREATED, Json(ApiResponse::new(board.into()))))
}

/// DELETE /api/v1/boards/:board_id - Delete an empty board.
///
/// Only the board's manager or an admin may delete it. A board that owns any
/// post, soft-deleted or not, cannot be removed.
pub async fn delete_board(
    State(state): State<Arc<AppState>>,
    AuthMember(claims): AuthMember,
    Path(board_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let boards = BoardRepository::new(state.db.pool());
    let board = boards
        .get_by_id(board_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Board not found"))?;

    let is_admin = claims.member_role.as_deref() == Some(MemberRole::Admin.as_str());
    if board.manager_id != claims.member_id && !is_admin {
        return Err(ApiError::forbidden("Only the board manager may delete it"));
    }

    let post_count = PostRepository::new(state.db.pool())
        .count_all_by_board(board_id)
        .await?;
    if post_count > 0 {
        return Err(ApiError::unprocessable("Board still owns posts"));
    }

    boards.delete(board_id).await?;

    tracing::info!(board_id, "board deleted");

    Ok(StatusCode::NO_CONTENT)
}
