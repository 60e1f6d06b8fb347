use axum::{
    extract::Path,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde_json::Value;

use crate::api::format::{folder_to_api_value, folders_to_api_values};
use crate::api::helpers::{build_payload, location_for};
use crate::database::store::FolderStore;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::validate::refs::validate_folder_ref;
use crate::validate::{require_fields, validate_id, validate_matching_ids};

/// GET /api/folders - all folders owned by the caller, name ascending
pub async fn list(Extension(user): Extension<AuthUser>) -> Result<Response, ApiError> {
    let folders = FolderStore::new().await?.list(&user.id).await?;
    Ok(Json(folders_to_api_values(&folders)).into_response())
}

/// GET /api/folders/:id - a single folder scoped to the caller
pub async fn get(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    validate_id(Some(&id), &Value::Null)?;

    let folder = FolderStore::new()
        .await?
        .find(&id, &user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Folder not found."))?;
    Ok(Json(folder_to_api_value(&folder)).into_response())
}

/// POST /api/folders - create a folder; duplicate names per user are a 400
pub async fn create(
    Extension(user): Extension<AuthUser>,
    uri: Uri,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    require_fields(&["name"], &body)?;
    validate_folder_ref(&user.id, &body).await?;

    let payload = build_payload(&["name", "parent"], &body, &user.id);
    let folder = FolderStore::new().await?.create(&payload).await?;

    let location = location_for(uri.path(), &folder.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(folder_to_api_value(&folder)),
    )
        .into_response())
}

/// PUT /api/folders/:id - partial update; body id and route id must agree
pub async fn update(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    require_fields(&["id", "name"], &body)?;
    validate_id(Some(&id), &body)?;
    validate_folder_ref(&user.id, &body).await?;
    validate_matching_ids(&id, &body)?;

    let payload = build_payload(&["name", "parent"], &body, &user.id);
    let folder = FolderStore::new()
        .await?
        .update(&id, &user.id, &payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Folder not found."))?;
    Ok(Json(folder_to_api_value(&folder)).into_response())
}

/// DELETE /api/folders/:id - delete and clear the folder reference on any
/// notes that pointed to it
pub async fn delete(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    validate_id(Some(&id), &Value::Null)?;

    let deleted = FolderStore::new().await?.delete(&id, &user.id).await?;
    if !deleted {
        return Err(ApiError::not_found("Folder not found."));
    }
    Ok(StatusCode::NO_CONTENT.into_response())
}
