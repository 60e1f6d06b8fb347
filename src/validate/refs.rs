//! Existence validators for foreign-key references in request bodies.
//!
//! Both validators succeed trivially when the reference is absent, reject
//! malformed references before touching storage, and only then confirm
//! existence (scoped to the caller) with a single count query.

use serde_json::Value;

use super::is_valid_id;
use crate::api::helpers::is_truthy;
use crate::database::store::{FolderStore, TagStore};
use crate::error::ApiError;

/// Validate the folder reference in a request body (`folderId` on notes,
/// `parent` on folders).
pub async fn validate_folder_ref(user_id: &str, body: &Value) -> Result<(), ApiError> {
    // Select the relevant reference depending on request type
    let candidate = [body.get("folderId"), body.get("parent")]
        .into_iter()
        .flatten()
        .find(|value| is_truthy(value));
    let Some(value) = candidate else { return Ok(()) };

    // Step 1: the reference must be syntactically valid
    let id = value.as_str().unwrap_or("");
    if !is_valid_id(Some(id)) {
        return Err(ApiError::invalid_reference(
            "Invalid `folderId` or `parent` in request body.",
        ));
    }

    // Step 2: a folder cannot be its own parent
    let parent = body.get("parent").and_then(Value::as_str);
    let own_id = body.get("id").and_then(Value::as_str);
    if let (Some(parent), Some(own_id)) = (parent, own_id) {
        if parent == own_id {
            return Err(ApiError::invalid_reference("`parent` cannot point to itself."));
        }
    }

    // Step 3: the referenced folder must exist and be owned by the caller
    let count = FolderStore::new().await?.count_owned(id, user_id).await?;
    if count < 1 {
        return Err(ApiError::reference_not_found(
            "`folderId` or `parent` in request body does not exist.",
        ));
    }
    Ok(())
}

/// Validate the `tags` reference list in a request body. When
/// `confirm_existence` is false (read/delete verbs), the storage count is
/// skipped as redundant.
pub async fn validate_tag_refs(
    user_id: &str,
    body: &Value,
    confirm_existence: bool,
) -> Result<(), ApiError> {
    let Some(tags_value) = body.get("tags") else { return Ok(()) };

    let Some(tags) = tags_value.as_array() else {
        return Err(ApiError::invalid_input("`tags` must be an array"));
    };
    if tags.is_empty() {
        return Ok(());
    }

    let mut ids = Vec::with_capacity(tags.len());
    for (i, tag) in tags.iter().enumerate() {
        let Some(id) = tag.as_str() else {
            return Err(ApiError::invalid_input("`tags` must be an array of strings."));
        };
        if !is_valid_id(Some(id)) {
            return Err(ApiError::invalid_reference(format!(
                "Invalid tag `id` parameter at index {}.",
                i
            )));
        }
        ids.push(id.to_string());
    }

    if !confirm_existence {
        return Ok(());
    }

    let count = TagStore::new().await?.count_owned_in(&ids, user_id).await?;
    if count != ids.len() as i64 {
        return Err(ApiError::reference_not_found("An id in `tags` does not exist."));
    }
    Ok(())
}
