//! Member handlers: registration, login, and profile.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::auth::{hash_password, validate_password, verify_password};
use crate::board::{BoardRepository, PinnedBoardRepository};
use crate::member::{MemberRepository, MemberUpdate, NewMember};
use crate::web::dto::{
    ApiResponse, LoginRequest, LoginResponse, MemberResponse, RegisterRequest,
    UpdateMemberRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthMember;

/// POST /api/v1/members - Register a new member.
///
/// Creates the member and its credential record, then pins every default
/// board for the new account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MemberResponse>>), ApiError> {
    validate_password(&req.password).map_err(|e| ApiError::unprocessable(e.to_string()))?;

    let members = MemberRepository::new(state.db.pool());
    if members.nickname_exists(&req.nickname).await? {
        return Err(ApiError::conflict("Nickname is already taken"));
    }
    if members.email_exists(&req.email).await? {
        return Err(ApiError::conflict("Email is already registered"));
    }

    let hash = hash_password(&req.password).map_err(|e| {
        tracing::error!("password hashing failed: {}", e);
        ApiError::internal("Failed to create account")
    })?;

    let mut new_member = NewMember::new(&req.nickname, &req.username, &req.email, hash);
    if let Some(phone) = req.phone {
        new_member = new_member.with_phone(phone);
    }
    let member = members.create(&new_member).await?;

    let default_ids = BoardRepository::new(state.db.pool()).list_default_ids().await?;
    PinnedBoardRepository::new(state.db.pool())
        .pin_defaults(member.id, &default_ids)
        .await?;

    tracing::info!(member_id = member.id, nickname = %member.nickname, "member registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(member.into())),
    ))
}

/// POST /api/v1/members/login - Authenticate and issue a token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    // The same message for unknown nickname and wrong password, so login
    // probing can't tell accounts apart.
    let invalid = || ApiError::unauthorized("Invalid nickname or password");

    let (member, hash) = MemberRepository::new(state.db.pool())
        .get_credential(&req.nickname)
        .await?
        .ok_or_else(invalid)?;

    verify_password(&req.password, &hash).map_err(|_| invalid())?;

    let token = state
        .tokens
        .issue(&member.nickname, member.id, Some(member.role.as_str()))?;

    tracing::info!(member_id = member.id, "member logged in");

    Ok(Json(ApiResponse::new(LoginResponse {
        token,
        expires_in: state.tokens.expiry_secs(),
        member: member.into(),
    })))
}

/// GET /api/v1/members/me - Current member profile.
pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthMember(claims): AuthMember,
) -> Result<Json<ApiResponse<MemberResponse>>, ApiError> {
    let member = MemberRepository::new(state.db.pool())
        .get_by_id(claims.member_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Member not found"))?;

    Ok(Json(ApiResponse::new(member.into())))
}

/// PUT /api/v1/members/me - Update the current member profile.
pub async fn update_me(
    State(state): State<Arc<AppState>>,
    AuthMember(claims): AuthMember,
    ValidatedJson(req): ValidatedJson<UpdateMemberRequest>,
) -> Result<Json<ApiResponse<MemberResponse>>, ApiError> {
    let members = MemberRepository::new(state.db.pool());

    if let Some(ref email) = req.email {
        let current = members
            .get_by_id(claims.member_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Member not found"))?;
        if *email != current.email && members.email_exists(email).await? {
            return Err(ApiError::conflict("Email is already registered"));
        }
    }

    let mut update = MemberUpdate::new();
    if let Some(name) = req.member_name {
        update = update.member_name(name);
    }
    if let Some(email) = req.email {
        update = update.email(email);
    }
    if let Some(phone) = req.phone {
        update = update.phone(phone);
    }

    let member = members
        .update(claims.member_id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("Member not found"))?;

    Ok(Json(ApiResponse::new(member.into())))
}
