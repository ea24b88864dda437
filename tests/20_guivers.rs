mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn create_get_update_guiver() -> Result<()> {
    let server = common::ensure_server().await?;
    let (uid, token) = common::new_user()?;
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/guivers"))
        .bearer_auth(&token)
        .json(&json!({"email": "a@x.com", "type": "helper", "displayName": "Ana"}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await?;
    assert_eq!(body["data"]["id"], uid.as_str());

    let resp = client
        .put(server.url(&format!("/guivers/{}", uid)))
        .bearer_auth(&token)
        .json(&json!({"displayName": "", "bio": "Dog lover"}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = client
        .get(server.url(&format!("/guivers/{}", uid)))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["data"]["displayName"], "Ana");
    assert_eq!(body["data"]["bio"], "Dog lover");
    assert_eq!(body["data"]["type"], "helper");
    Ok(())
}

#[tokio::test]
async fn other_users_cannot_edit_a_profile() -> Result<()> {
    let server = common::ensure_server().await?;
    let (uid, token) = common::new_user()?;
    let (_, other) = common::new_user()?;
    let client = reqwest::Client::new();

    client
        .post(server.url("/guivers"))
        .bearer_auth(&token)
        .json(&json!({"type": "entrepreneur"}))
        .send()
        .await?;

    let resp = client
        .delete(server.url(&format!("/guivers/{}", uid)))
        .bearer_auth(&other)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn invalid_guiver_type_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let (_, token) = common::new_user()?;
    let resp = reqwest::Client::new()
        .post(server.url("/guivers"))
        .bearer_auth(&token)
        .json(&json!({"email": "not-an-email", "type": "wizard"}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["fieldErrors"].get("email").is_some());
    assert!(body["fieldErrors"].get("type").is_some());
    Ok(())
}
