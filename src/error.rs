//! Error types shared by the graph, record, and grouping layers

use crate::graph::{ComponentLabel, VertexId, VertexKey, VertexKind};
use thiserror::Error;

/// Errors that can occur while merging contacts
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Empty {kind} value cannot identify a contact")]
    EmptyIdentifier { kind: VertexKind },

    #[error("Field '{field}' must be a string, found {found}")]
    FieldType { field: String, found: &'static str },

    #[error("Contact record must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("Vertex has no component label: {0}")]
    Unlabeled(VertexKey),

    #[error("Vertex {key} already labeled {existing}, refusing {attempted}")]
    Relabel {
        key: VertexKey,
        existing: ComponentLabel,
        attempted: ComponentLabel,
    },

    #[error("Vertex {0} does not belong to this graph")]
    UnknownVertex(VertexId),

    #[error("Connected vertices {left} ({left_label}) and {right} ({right_label}) carry different labels")]
    SplitComponent {
        left: VertexKey,
        left_label: ComponentLabel,
        right: VertexKey,
        right_label: ComponentLabel,
    },

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for merge operations
pub type MergeResult<T> = Result<T, MergeError>;

/// Name of a JSON value's type, for error messages
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
