//! Guard-path behavior through the real HTTP surface. Every request in this
//! file is rejected by a validation guard before any storage call, so no
//! database is needed behind the spawned server.

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

const USER_ID: &str = "000000000000000000000001";
const OTHER_ID: &str = "000000000000000000000002";

async fn client() -> Result<(reqwest::Client, String, String)> {
    let server = common::ensure_server().await?;
    let token = common::token_for(USER_ID, "msgreen@test.com");
    Ok((reqwest::Client::new(), server.base_url.clone(), token))
}

#[tokio::test]
async fn protected_routes_require_a_bearer_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let http = reqwest::Client::new();

    for path in ["/api/folders", "/api/notes", "/api/tags"] {
        let res = http.get(format!("{}{}", server.base_url, path)).send().await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "no token on {}", path);
    }

    let res = http
        .get(format!("{}/api/notes", server.base_url))
        .header("Authorization", "Bearer not.a.token")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn malformed_ids_are_rejected_as_invalid_not_missing() -> Result<()> {
    let (http, base, token) = client().await?;

    for path in ["/api/folders/faaaaake", "/api/notes/faaaaake", "/api/tags/faaaaake"] {
        let res = http
            .get(format!("{}{}", base, path))
            .bearer_auth(&token)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "GET {}", path);

        let body = res.json::<Value>().await?;
        assert_eq!(body["message"], "Invalid `id` parameter.");
    }

    let res = http
        .delete(format!("{}/api/notes/not-a-hex-id", base))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn folder_create_requires_a_name() -> Result<()> {
    let (http, base, token) = client().await?;

    let res = http
        .post(format!("{}/api/folders", base))
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Missing `name` in request body.");
    Ok(())
}

#[tokio::test]
async fn folder_create_rejects_malformed_parent() -> Result<()> {
    let (http, base, token) = client().await?;

    let res = http
        .post(format!("{}/api/folders", base))
        .bearer_auth(&token)
        .json(&json!({ "name": "Work", "parent": "faaaaake" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Invalid `folderId` or `parent` in request body.");
    Ok(())
}

#[tokio::test]
async fn folder_update_rejects_self_parent_before_storage() -> Result<()> {
    let (http, base, token) = client().await?;
    let id = "222222222222222222222201";

    let res = http
        .put(format!("{}/api/folders/{}", base, id))
        .bearer_auth(&token)
        .json(&json!({ "id": id, "name": "Loop", "parent": id }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "`parent` cannot point to itself.");
    Ok(())
}

#[tokio::test]
async fn note_update_requires_matching_ids() -> Result<()> {
    let (http, base, token) = client().await?;

    // Body id disagrees with the route id; both are well-formed, and the
    // mismatch is rejected regardless of whether either note exists
    let res = http
        .put(format!("{}/api/notes/{}", base, USER_ID))
        .bearer_auth(&token)
        .json(&json!({ "id": OTHER_ID, "title": "Renamed" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Request body `id` and parameter `id` must be equivalent.");
    Ok(())
}

#[tokio::test]
async fn note_update_requires_an_id_in_the_body() -> Result<()> {
    let (http, base, token) = client().await?;

    let res = http
        .put(format!("{}/api/notes/{}", base, USER_ID))
        .bearer_auth(&token)
        .json(&json!({ "title": "Renamed" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Missing `id` in request body.");
    Ok(())
}

#[tokio::test]
async fn note_create_rejects_malformed_references() -> Result<()> {
    let (http, base, token) = client().await?;

    let res = http
        .post(format!("{}/api/notes", base))
        .bearer_auth(&token)
        .json(&json!({ "title": "T", "folderId": "faaaaake" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = http
        .post(format!("{}/api/notes", base))
        .bearer_auth(&token)
        .json(&json!({ "title": "T", "tags": "not-an-array" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "`tags` must be an array");

    let res = http
        .post(format!("{}/api/notes", base))
        .bearer_auth(&token)
        .json(&json!({ "title": "T", "tags": ["222222222222222222222200", "faaaaake"] }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Invalid tag `id` parameter at index 1.");
    Ok(())
}

#[tokio::test]
async fn registration_guards_run_before_storage() -> Result<()> {
    let server = common::ensure_server().await?;
    let http = reqwest::Client::new();
    let url = format!("{}/api/users", server.base_url);

    // Missing required field: 422
    let res = http
        .post(&url)
        .json(&json!({ "email": "a@b.com", "password": "12345678", "firstName": "A" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Missing `lastName` in request body.");

    // Non-string email: 400
    let res = http
        .post(&url)
        .json(&json!({ "email": 42, "password": "12345678", "firstName": "A", "lastName": "B" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Malformed email: 400
    let res = http
        .post(&url)
        .json(&json!({ "email": "nope", "password": "12345678", "firstName": "A", "lastName": "B" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "That is not a valid email.");

    // Leading whitespace in the email: 400
    let res = http
        .post(&url)
        .json(&json!({ "email": " a@b.com ", "password": "12345678", "firstName": "A", "lastName": "B" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // 7-character password: 400
    let res = http
        .post(&url)
        .json(&json!({ "email": "a@b.com", "password": "1234567", "firstName": "A", "lastName": "B" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Password must be between 8 and 72 characters long.");

    // Padded password: 400
    let res = http
        .post(&url)
        .json(&json!({ "email": "a@b.com", "password": " 12345678", "firstName": "A", "lastName": "B" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "email and password cannot begin or end with a space.");
    Ok(())
}

#[tokio::test]
async fn login_requires_both_credentials() -> Result<()> {
    let server = common::ensure_server().await?;
    let http = reqwest::Client::new();

    let res = http
        .post(format!("{}/api/login", server.base_url))
        .json(&json!({ "email": "a@b.com" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Missing `password` in request body.");
    Ok(())
}
