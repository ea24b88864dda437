//! Test utilities: a token table standing in for the identity provider and
//! a request helper that drives the router in-process.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::auth::{IdentityError, IdentityVerifier, VerifiedIdentity};
use crate::config::AppConfig;
use crate::database::MemoryStore;
use crate::state::AppState;

/// Accepts exactly the tokens it was given.
#[derive(Debug, Default, Clone)]
pub struct StaticIdentityVerifier {
    tokens: HashMap<String, VerifiedIdentity>,
}

impl StaticIdentityVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, token: &str, uid: &str, email: Option<&str>) -> Self {
        self.tokens.insert(
            token.to_string(),
            VerifiedIdentity {
                uid: uid.to_string(),
                email: email.map(str::to_string),
            },
        );
        self
    }
}

#[async_trait]
impl IdentityVerifier for StaticIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdentityError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| IdentityError::InvalidToken("unknown token".to_string()))
    }
}

pub const ALICE: &str = "alice-token";
pub const BOB: &str = "bob-token";

/// In-memory state knowing `ALICE` (uid "alice") and `BOB` (uid "bob").
pub fn test_state() -> AppState {
    let verifier = StaticIdentityVerifier::new()
        .with_user(ALICE, "alice", Some("alice@example.com"))
        .with_user(BOB, "bob", Some("bob@example.com"));
    test_state_with(AppConfig::default(), verifier)
}

pub fn test_state_with(config: AppConfig, verifier: StaticIdentityVerifier) -> AppState {
    AppState::new(config, Arc::new(MemoryStore::new()), Arc::new(verifier))
}

/// Sends one request through `app` and returns the status and JSON body
/// (`Value::Null` for an empty body).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
