//! Router configuration for the Talkboard REST API.

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::auth::TokenService;

use super::handlers::{
    create_board, create_comment, create_post, delete_board, delete_post, get_board, get_post,
    list_boards, list_boards_with_pin, list_comments, list_pinned, list_posts, login, me,
    register, reorder_pins, toggle_like, toggle_scrap, update_me, update_pins, update_post,
    AppState,
};
use super::middleware::{create_cors_layer, token_layer};

/// Create the main API router.
pub fn create_router(
    app_state: Arc<AppState>,
    tokens: Arc<TokenService>,
    cors_origins: &[String],
) -> Router {
    let member_routes = Router::new()
        .route("/", post(register))
        .route("/login", post(login))
        .route("/me", get(me).put(update_me));

    // Static segments (pinned, with-pin) must not be shadowed by :board_id;
    // the router gives statics priority, so they can live side by side.
    let board_routes = Router::new()
        .route("/", get(list_boards).post(create_board))
        .route("/with-pin", get(list_boards_with_pin))
        .route("/pinned", get(list_pinned).post(update_pins))
        .route("/pinned/reorder", patch(reorder_pins))
        .route("/:board_id", get(get_board).delete(delete_board))
        .route("/:board_id/posts", get(list_posts).post(create_post))
        .route(
            "/:board_id/posts/:post_id",
            get(get_post).patch(update_post).delete(delete_post),
        )
        .route("/:board_id/posts/:post_id/like", post(toggle_like))
        .route("/:board_id/posts/:post_id/scrap", post(toggle_scrap))
        .route(
            "/:board_id/posts/:post_id/comments",
            get(list_comments).post(create_comment),
        );

    let api_routes = Router::new()
        .nest("/members", member_routes)
        .nest("/boards", board_routes);

    let tokens_for_middleware = tokens.clone();

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let tokens = tokens_for_middleware.clone();
                    token_layer(tokens, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
