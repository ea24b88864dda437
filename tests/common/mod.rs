#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;

use guiver_api::auth::jwt::sign_hs256;
use guiver_api::auth::Claims;

pub const JWT_SECRET: &str = "integration-test-secret";

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}/api/v1", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_guiver-api"));
        cmd.env("PORT", port.to_string())
            .env("GIN_MODE", "test")
            .env("IDENTITY_JWT_SECRET", JWT_SECRET)
            .env_remove("IDENTITY_PROJECT_ID")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// A fresh user id and a signed ID token for it.
pub fn new_user() -> Result<(String, String)> {
    let uid = format!("user-{}", uuid::Uuid::new_v4().simple());
    let claims = Claims::new(uid.clone(), Some(format!("{}@example.com", uid)), chrono::Duration::hours(1));
    let token = sign_hs256(&claims, JWT_SECRET)?;
    Ok((uid, token))
}

/// Creates a cause owned by the token's user and returns its `data`.
pub async fn create_cause(server: &TestServer, token: &str, title: &str) -> Result<Value> {
    let resp = reqwest::Client::new()
        .post(server.url("/causes"))
        .bearer_auth(token)
        .json(&serde_json::json!({
            "title": title,
            "description": "Daily food for shelter dogs",
            "type": "animal",
            "location": "City"
        }))
        .send()
        .await?;
    anyhow::ensure!(resp.status() == StatusCode::OK, "create cause failed: {}", resp.status());
    let body: Value = resp.json().await?;
    Ok(body["data"].clone())
}
