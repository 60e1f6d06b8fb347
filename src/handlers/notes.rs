use axum::{
    extract::{Path, Query},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde::Deserialize;
use serde_json::Value;

use crate::api::format::{note_to_api_value, notes_to_api_values};
use crate::api::helpers::{build_payload, location_for};
use crate::database::blank_document;
use crate::database::store::{NoteFilters, NoteStore};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::validate::refs::{validate_folder_ref, validate_tag_refs};
use crate::validate::{require_fields, validate_id, validate_matching_ids};

#[derive(Debug, Default, Deserialize)]
pub struct NoteListQuery {
    #[serde(rename = "folderId")]
    pub folder_id: Option<String>,
    #[serde(rename = "tagId")]
    pub tag_id: Option<String>,
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

/// GET /api/notes?folderId&tagId&searchTerm - notes owned by the caller,
/// most recently updated first
pub async fn list(
    Extension(user): Extension<AuthUser>,
    Query(query): Query<NoteListQuery>,
) -> Result<Response, ApiError> {
    let filters = NoteFilters {
        folder_id: query.folder_id,
        tag_id: query.tag_id,
        search_term: query.search_term,
    };
    let notes = NoteStore::new().await?.list(&user.id, &filters).await?;
    Ok(Json(notes_to_api_values(&notes)).into_response())
}

/// GET /api/notes/:id - a single note scoped to the caller
pub async fn get(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    validate_id(Some(&id), &Value::Null)?;

    let note = NoteStore::new()
        .await?
        .find(&id, &user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Note not found."))?;
    Ok(Json(note_to_api_value(&note)).into_response())
}

/// POST /api/notes - create a note; an omitted title or document falls back
/// to the untitled-note defaults
pub async fn create(
    Extension(user): Extension<AuthUser>,
    uri: Uri,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    validate_id(None, &body)?;
    validate_folder_ref(&user.id, &body).await?;
    validate_tag_refs(&user.id, &body, true).await?;

    let mut payload = build_payload(&["title", "document", "folderId", "tags"], &body, &user.id);
    if !payload.contains_key("document") {
        payload.insert("document".to_string(), blank_document());
    }
    if !payload.contains_key("title") {
        payload.insert("title".to_string(), Value::String("Untitled note".to_string()));
    }

    let note = NoteStore::new().await?.create(&payload).await?;

    let location = location_for(uri.path(), &note.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(note_to_api_value(&note)),
    )
        .into_response())
}

/// PUT /api/notes/:id - partial update; body id and route id must agree
pub async fn update(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    require_fields(&["id"], &body)?;
    validate_id(Some(&id), &body)?;
    validate_tag_refs(&user.id, &body, true).await?;
    validate_folder_ref(&user.id, &body).await?;
    validate_matching_ids(&id, &body)?;

    let payload = build_payload(&["title", "document", "folderId", "tags"], &body, &user.id);
    let note = NoteStore::new()
        .await?
        .update(&id, &user.id, &payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Note not found."))?;
    Ok(Json(note_to_api_value(&note)).into_response())
}

/// DELETE /api/notes/:id
pub async fn delete(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    validate_id(Some(&id), &Value::Null)?;

    let deleted = NoteStore::new().await?.delete(&id, &user.id).await?;
    if !deleted {
        return Err(ApiError::not_found("Note not found."));
    }
    Ok(StatusCode::NO_CONTENT.into_response())
}
