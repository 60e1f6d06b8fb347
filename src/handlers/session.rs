use axum::{
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde_json::{json, Value};

use crate::auth::password::verify_password;
use crate::auth::{generate_jwt, Claims};
use crate::database::store::UserStore;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::validate::require_fields;

/// POST /api/login - verify credentials and issue a bearer token.
///
/// A missing user and a wrong password produce the same response; the error
/// never reveals which half failed.
pub async fn login(Json(body): Json<Value>) -> Result<Response, ApiError> {
    require_fields(&["email", "password"], &body)?;

    let (Some(email), Some(password)) = (body["email"].as_str(), body["password"].as_str())
    else {
        return Err(ApiError::invalid_input("`email` and `password` must be of type string."));
    };

    let user = UserStore::new()
        .await?
        .find_by_email(email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Incorrect email or password."))?;

    let valid = verify_password(password, &user.password_hash).map_err(|e| {
        tracing::error!("Stored password hash for {} is unreadable: {}", user.id, e);
        ApiError::internal_server_error("An error occurred while processing your request")
    })?;
    if !valid {
        return Err(ApiError::unauthorized("Incorrect email or password."));
    }

    let token = issue_token(user.id, user.email)?;
    Ok(Json(json!({ "authToken": token })).into_response())
}

/// POST /api/refresh - re-issue the caller's token with a fresh expiry
pub async fn refresh(Extension(user): Extension<AuthUser>) -> Result<Response, ApiError> {
    let token = issue_token(user.id, user.email)?;
    Ok(Json(json!({ "authToken": token })).into_response())
}

fn issue_token(user_id: String, email: String) -> Result<String, ApiError> {
    generate_jwt(Claims::new(user_id, email)).map_err(|e| {
        tracing::error!("JWT generation failed: {}", e);
        ApiError::internal_server_error("An error occurred while processing your request")
    })
}
