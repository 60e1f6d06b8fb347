//! Explicit response mapping per entity type, invoked at the handler
//! boundary. Public representations use camelCase keys, expose only the
//! public `id`, and omit the owning `user_id`; the user mapping never
//! includes the password hash.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::database::models::{Folder, Note, Tag, User};

fn timestamp(dt: &DateTime<Utc>) -> Value {
    Value::String(dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// { id, name, parent?, createdAt, updatedAt }
pub fn folder_to_api_value(folder: &Folder) -> Value {
    let mut obj = Map::new();
    obj.insert("id".into(), Value::String(folder.id.clone()));
    obj.insert("name".into(), Value::String(folder.name.clone()));
    if let Some(parent) = &folder.parent {
        obj.insert("parent".into(), Value::String(parent.clone()));
    }
    obj.insert("createdAt".into(), timestamp(&folder.created_at));
    obj.insert("updatedAt".into(), timestamp(&folder.updated_at));
    Value::Object(obj)
}

pub fn folders_to_api_values(folders: &[Folder]) -> Vec<Value> {
    folders.iter().map(folder_to_api_value).collect()
}

/// { id, title, document, folderId?, tags, createdAt, updatedAt }
pub fn note_to_api_value(note: &Note) -> Value {
    let mut obj = Map::new();
    obj.insert("id".into(), Value::String(note.id.clone()));
    obj.insert("title".into(), Value::String(note.title.clone()));
    obj.insert("document".into(), note.document.clone());
    if let Some(folder_id) = &note.folder_id {
        obj.insert("folderId".into(), Value::String(folder_id.clone()));
    }
    obj.insert(
        "tags".into(),
        Value::Array(note.tags.iter().map(|t| Value::String(t.clone())).collect()),
    );
    obj.insert("createdAt".into(), timestamp(&note.created_at));
    obj.insert("updatedAt".into(), timestamp(&note.updated_at));
    Value::Object(obj)
}

pub fn notes_to_api_values(notes: &[Note]) -> Vec<Value> {
    notes.iter().map(note_to_api_value).collect()
}

/// { id, name, createdAt, updatedAt }
pub fn tag_to_api_value(tag: &Tag) -> Value {
    let mut obj = Map::new();
    obj.insert("id".into(), Value::String(tag.id.clone()));
    obj.insert("name".into(), Value::String(tag.name.clone()));
    obj.insert("createdAt".into(), timestamp(&tag.created_at));
    obj.insert("updatedAt".into(), timestamp(&tag.updated_at));
    Value::Object(obj)
}

pub fn tags_to_api_values(tags: &[Tag]) -> Vec<Value> {
    tags.iter().map(tag_to_api_value).collect()
}

/// { id, firstName, lastName, email } - never the password hash.
pub fn user_to_api_value(user: &User) -> Value {
    let mut obj = Map::new();
    obj.insert("id".into(), Value::String(user.id.clone()));
    obj.insert("firstName".into(), Value::String(user.first_name.clone()));
    obj.insert("lastName".into(), Value::String(user.last_name.clone()));
    obj.insert("email".into(), Value::String(user.email.clone()));
    Value::Object(obj)
}
