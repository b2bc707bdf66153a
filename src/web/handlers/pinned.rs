//! Pinned-board handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::board::PinnedBoardRepository;
use crate::post::PostRepository;
use crate::web::dto::{
    ApiResponse, PinRequest, PinnedBoardResponse, ReorderRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthMember;

/// Number of post previews shown per pinned board.
const PREVIEW_LIMIT: i64 = 2;

/// GET /api/v1/boards/pinned - The caller's pinned boards in rank order.
///
/// Each entry carries up to two previews of the board's most viewed posts.
pub async fn list_pinned(
    State(state): State<Arc<AppState>>,
    AuthMember(claims): AuthMember,
) -> Result<Json<ApiResponse<Vec<PinnedBoardResponse>>>, ApiError> {
    let pins = PinnedBoardRepository::new(state.db.pool())
        .list_by_member(claims.member_id)
        .await?;

    let posts = PostRepository::new(state.db.pool());
    let mut responses = Vec::with_capacity(pins.len());
    for pin in pins {
        let previews = posts.previews_by_board(pin.board_id, PREVIEW_LIMIT).await?;
        responses.push(PinnedBoardResponse::new(pin, previews));
    }

    Ok(Json(ApiResponse::new(responses)))
}

/// POST /api/v1/boards/pinned - Apply unpins then pins for the caller.
pub async fn update_pins(
    State(state): State<Arc<AppState>>,
    AuthMember(claims): AuthMember,
    ValidatedJson(req): ValidatedJson<PinRequest>,
) -> Result<Json<ApiResponse<Vec<PinnedBoardResponse>>>, ApiError> {
    let pins = PinnedBoardRepository::new(state.db.pool());
    pins.pin_and_unpin(claims.member_id, &req.pin_board_ids, &req.unpin_board_ids)
        .await?;

    let updated = pins.list_by_member(claims.member_id).await?;
    let posts = PostRepository::new(state.db.pool());
    let mut responses = Vec::with_capacity(updated.len());
    for pin in updated {
        let previews = posts.previews_by_board(pin.board_id, PREVIEW_LIMIT).await?;
        responses.push(PinnedBoardResponse::new(pin, previews));
    }

    Ok(Json(ApiResponse::new(responses)))
}

/// PATCH /api/v1/boards/pinned/reorder - Rewrite the caller's pin order.
///
/// The body must list exactly the caller's pinned board ids.
pub async fn reorder_pins(
    State(state): State<Arc<AppState>>,
    AuthMember(claims): AuthMember,
    ValidatedJson(req): ValidatedJson<ReorderRequest>,
) -> Result<Json<ApiResponse<Vec<PinnedBoardResponse>>>, ApiError> {
    let pins = PinnedBoardRepository::new(state.db.pool());
    pins.reorder(claims.member_id, &req.board_ids).await?;

    let updated = pins.list_by_member(claims.member_id).await?;
    let posts = PostRepository::new(state.db.pool());
    let mut responses = Vec::with_capacity(updated.len());
    for pin in updated {
        let previews = posts.previews_by_board(pin.board_id, PREVIEW_LIMIT).await?;
        responses.push(PinnedBoardResponse::new(pin, previews));
    }

    Ok(Json(ApiResponse::new(responses)))
}
