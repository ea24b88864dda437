use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{IdentityError, VerifiedIdentity};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller, inserted into request extensions by `require_auth`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
}

impl From<VerifiedIdentity> for AuthUser {
    fn from(identity: VerifiedIdentity) -> Self {
        Self {
            uid: identity.uid,
            email: identity.email,
        }
    }
}

/// Bearer token gate for every protected route
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(|e| {
        tracing::warn!("Rejected {} {}: {}", request.method(), request.uri().path(), e);
        ApiError::from(e)
    })?;

    let identity = state.identity.verify(token).await.map_err(|e| {
        tracing::warn!("Token verification failed for {}: {}", request.uri().path(), e);
        ApiError::from(e)
    })?;

    tracing::debug!("Authenticated uid {}", identity.uid);
    request.extensions_mut().insert(AuthUser::from(identity));

    Ok(next.run(request).await)
}

/// Extract the token from `Authorization: Bearer <token>`
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, IdentityError> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(IdentityError::MissingCredentials)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| IdentityError::MalformedCredentials)?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(IdentityError::MalformedCredentials),
    }
}
