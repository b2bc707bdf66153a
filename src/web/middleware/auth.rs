//! Bearer-token authentication extractors.
//!
//! The [`TokenService`] is injected into request extensions by
//! [`token_layer`]; the extractors read it from there, so handlers declare
//! their identity requirement in their signature.

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::{Claims, TokenError, TokenService};
use crate::web::error::ApiError;

/// Extractor requiring an authenticated member.
///
/// Rejects with 401 when the Authorization header is missing or carries an
/// invalid token; the message names the specific failure reason.
#[derive(Debug, Clone)]
pub struct AuthMember(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthMember
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match resolve(parts)? {
            Some(claims) => Ok(AuthMember(claims)),
            None => Err(TokenError::Missing.into()),
        }
    }
}

/// Extractor for endpoints that accept anonymous callers.
///
/// An absent Authorization header yields `None`. A header that is present but
/// invalid is still an error: a caller who offers credentials gets told they
/// were bad rather than silently downgraded to anonymous.
#[derive(Debug, Clone)]
pub struct MaybeMember(pub Option<Claims>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeMember
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeMember(resolve(parts)?))
    }
}

fn resolve(parts: &Parts) -> Result<Option<Claims>, ApiError> {
    let tokens = parts
        .extensions
        .get::<Arc<TokenService>>()
        .ok_or_else(|| ApiError::internal("Token service not configured"))?;

    let header = parts
        .headers
        .get(AUTHORIZATION)
        .map(|v| v.to_str().map_err(|_| TokenError::Malformed))
        .transpose()?;

    tokens.resolve_bearer(header).map_err(|e| {
        tracing::debug!("token rejected: {}", e);
        e.into()
    })
}

/// Middleware function injecting the token service into request extensions.
pub async fn token_layer(
    tokens: Arc<TokenService>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(tokens);
    next.run(request).await
}
