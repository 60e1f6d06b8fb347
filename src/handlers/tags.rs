use axum::{
    extract::Path,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde_json::Value;

use crate::api::format::{tag_to_api_value, tags_to_api_values};
use crate::api::helpers::{build_payload, location_for};
use crate::database::store::TagStore;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::validate::{require_fields, validate_id, validate_matching_ids};

/// GET /api/tags - all tags owned by the caller, name ascending
pub async fn list(Extension(user): Extension<AuthUser>) -> Result<Response, ApiError> {
    let tags = TagStore::new().await?.list(&user.id).await?;
    Ok(Json(tags_to_api_values(&tags)).into_response())
}

/// GET /api/tags/:id - a single tag scoped to the caller
pub async fn get(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    validate_id(Some(&id), &Value::Null)?;

    let tag = TagStore::new()
        .await?
        .find(&id, &user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tag not found."))?;
    Ok(Json(tag_to_api_value(&tag)).into_response())
}

/// POST /api/tags - create a tag
pub async fn create(
    Extension(user): Extension<AuthUser>,
    uri: Uri,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    require_fields(&["name"], &body)?;

    let payload = build_payload(&["name"], &body, &user.id);
    let tag = TagStore::new().await?.create(&payload).await?;

    let location = location_for(uri.path(), &tag.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(tag_to_api_value(&tag)),
    )
        .into_response())
}

/// PUT /api/tags/:id - partial update; body id and route id must agree
pub async fn update(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    require_fields(&["id", "name"], &body)?;
    validate_id(Some(&id), &body)?;
    validate_matching_ids(&id, &body)?;

    let payload = build_payload(&["name"], &body, &user.id);
    let tag = TagStore::new()
        .await?
        .update(&id, &user.id, &payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Tag not found."))?;
    Ok(Json(tag_to_api_value(&tag)).into_response())
}

/// DELETE /api/tags/:id - delete and pull the tag id from every note that
/// carried it
pub async fn delete(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    validate_id(Some(&id), &Value::Null)?;

    let deleted = TagStore::new().await?.delete(&id, &user.id).await?;
    if !deleted {
        return Err(ApiError::not_found("Tag not found."));
    }
    Ok(StatusCode::NO_CONTENT.into_response())
}
