mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn refresh_requires_a_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let http = reqwest::Client::new();

    let res = http.post(format!("{}/api/refresh", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn refresh_reissues_a_bearer_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let http = reqwest::Client::new();
    let token = common::token_for("000000000000000000000001", "msgreen@test.com");

    let res = http
        .post(format!("{}/api/refresh", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    let reissued = body["authToken"].as_str().expect("authToken missing");
    assert!(!reissued.is_empty());
    Ok(())
}
