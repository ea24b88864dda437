mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_ok() -> Result<()> {
    let server = common::ensure_server().await?;
    let resp = reqwest::get(server.url("/health")).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await?;
    assert_eq!(body["status"], "ok");
    assert!(body["time"].is_i64());
    Ok(())
}

#[tokio::test]
async fn protected_route_without_token_is_401() -> Result<()> {
    let server = common::ensure_server().await?;
    let resp = reqwest::get(server.url("/causes")).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await?;
    assert_eq!(body["status"], "error");
    Ok(())
}

#[tokio::test]
async fn token_signed_with_other_secret_is_401() -> Result<()> {
    let server = common::ensure_server().await?;
    let claims = guiver_api::auth::Claims::new("intruder", None, chrono::Duration::hours(1));
    let token = guiver_api::auth::jwt::sign_hs256(&claims, "not-the-secret")?;
    let resp = reqwest::Client::new()
        .get(server.url("/causes"))
        .bearer_auth(token)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
