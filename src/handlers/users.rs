use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};

use crate::api::format::user_to_api_value;
use crate::api::helpers::{build_payload, location_for};
use crate::auth::password::hash_password;
use crate::database::blank_document;
use crate::database::store::{NoteStore, UserStore};
use crate::error::ApiError;
use crate::validate::{require_fields_with_status, validate_registration};

/// POST /api/users - register a new account.
///
/// Validates the registration rules, hashes the password, persists the user,
/// seeds the account with one empty note, and responds with the public user
/// representation (never the password hash).
pub async fn register(uri: Uri, Json(body): Json<Value>) -> Result<Response, ApiError> {
    require_fields_with_status(&["email", "password", "firstName", "lastName"], &body, 422)?;
    validate_registration(&body)?;

    // validate_registration guarantees these two are strings
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let (Some(first_name), Some(last_name)) =
        (body["firstName"].as_str(), body["lastName"].as_str())
    else {
        return Err(ApiError::invalid_input(
            "`firstName` and `lastName` must be of type string.",
        ));
    };

    let digest = hash_password(password).map_err(|e| {
        tracing::error!("Password hashing failed: {}", e);
        ApiError::internal_server_error("An error occurred while processing your request")
    })?;

    let user = UserStore::new()
        .await?
        .create(first_name.trim(), last_name.trim(), email, &digest)
        .await?;

    // Seed the new account with one empty note
    let seed_body = json!({ "title": "Untitled note", "document": blank_document() });
    let seed = build_payload(&["title", "document"], &seed_body, &user.id);
    NoteStore::new().await?.create(&seed).await?;

    let location = location_for(uri.path(), &user.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(user_to_api_value(&user)),
    )
        .into_response())
}
