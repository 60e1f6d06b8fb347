use serde_json::{json, Value};

/// The empty rich-text document tree given to brand-new notes: one empty
/// paragraph block. Used when a note is created without a document and for
/// the note that seeds a freshly registered account.
pub fn blank_document() -> Value {
    json!({
        "document": {
            "nodes": [
                {
                    "object": "block",
                    "type": "paragraph",
                    "nodes": [
                        {
                            "object": "text",
                            "leaves": [{ "text": "" }]
                        }
                    ]
                }
            ]
        }
    })
}
