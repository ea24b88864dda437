mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn product_for_unknown_cause_is_invalid() -> Result<()> {
    let server = common::ensure_server().await?;
    let (uid, token) = common::new_user()?;
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/products"))
        .bearer_auth(&token)
        .json(&json!({
            "causeId": "does-not-exist",
            "title": "Mug",
            "description": "Ceramic mug",
            "price": 10,
            "donationPercentage": 50
        }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert_eq!(body["message"], "Invalid cause ID");

    let body: Value = client
        .get(server.url(&format!("/guivers/{}/products", uid)))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["data"], json!([]));
    Ok(())
}

#[tokio::test]
async fn price_range_filter() -> Result<()> {
    let server = common::ensure_server().await?;
    let (uid, token) = common::new_user()?;
    let cause = common::create_cause(server, &token, "Feed Dogs").await?;
    let client = reqwest::Client::new();

    for (title, price) in [("Sticker", 2.0), ("Mug", 12.5), ("Hoodie", 40.0)] {
        let resp = client
            .post(server.url("/products"))
            .bearer_auth(&token)
            .json(&json!({
                "causeId": cause["id"],
                "title": title,
                "description": "Merch",
                "price": price,
                "donationPercentage": 25
            }))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let body: Value = client
        .get(server.url(&format!("/products?guiverId={}&minPrice=5&maxPrice=20", uid)))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["totalItems"], 1);
    assert_eq!(body["data"][0]["title"], "Mug");

    let resp = client
        .get(server.url("/products?minPrice=-3"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
