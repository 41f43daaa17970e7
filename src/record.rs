//! Contact records as seen by the merge: two optional identifying fields
//!
//! Records are owned by the caller. The merge only reads the phone and
//! email of each record and hands the same records back, grouped.

use crate::error::{json_type_name, MergeError, MergeResult};
use crate::graph::VertexKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Access to the identifying fields of a record
///
/// Absent, empty, and whitespace-only values all read as `None`. A field
/// that is present with the wrong type is an error, not an absence.
pub trait Identified {
    /// Raw value of the identifying field, before blank filtering
    fn raw_identifier(&self, kind: VertexKind) -> MergeResult<Option<&str>>;

    /// Non-blank value of the identifying field
    fn identifier(&self, kind: VertexKind) -> MergeResult<Option<&str>> {
        Ok(self.raw_identifier(kind)?.filter(|v| !v.trim().is_empty()))
    }

    fn phone(&self) -> MergeResult<Option<&str>> {
        self.identifier(VertexKind::Phone)
    }

    fn email(&self) -> MergeResult<Option<&str>> {
        self.identifier(VertexKind::Email)
    }
}

impl<T: Identified + ?Sized> Identified for &T {
    fn raw_identifier(&self, kind: VertexKind) -> MergeResult<Option<&str>> {
        (**self).raw_identifier(kind)
    }
}

/// A typed contact with pass-through of any other fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Fields the merge does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Contact {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Attach an uninterpreted field (name, notes, ...)
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl Identified for Contact {
    fn raw_identifier(&self, kind: VertexKind) -> MergeResult<Option<&str>> {
        Ok(match kind {
            VertexKind::Phone => self.phone.as_deref(),
            VertexKind::Email => self.email.as_deref(),
        })
    }
}

/// JSON keys holding the identifying fields of untyped records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub phone: String,
    pub email: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            phone: VertexKind::Phone.as_str().to_string(),
            email: VertexKind::Email.as_str().to_string(),
        }
    }
}

impl FieldNames {
    pub fn new(phone: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            email: email.into(),
        }
    }

    pub fn get(&self, kind: VertexKind) -> &str {
        match kind {
            VertexKind::Phone => &self.phone,
            VertexKind::Email => &self.email,
        }
    }

    /// View each JSON record through these field names
    pub fn map<'a>(&'a self, records: &'a [Value]) -> Vec<MappedRecord<'a>> {
        records
            .iter()
            .map(|value| MappedRecord { value, fields: self })
            .collect()
    }
}

/// A borrowed JSON record read through custom field names
#[derive(Debug, Clone, Copy)]
pub struct MappedRecord<'a> {
    value: &'a Value,
    fields: &'a FieldNames,
}

impl<'a> MappedRecord<'a> {
    pub fn new(value: &'a Value, fields: &'a FieldNames) -> Self {
        Self { value, fields }
    }

    /// The underlying record, unchanged
    pub fn value(&self) -> &'a Value {
        self.value
    }
}

impl Identified for MappedRecord<'_> {
    fn raw_identifier(&self, kind: VertexKind) -> MergeResult<Option<&str>> {
        json_field(self.value, self.fields.get(kind))
    }
}

/// JSON objects are read with the default `phone` / `email` keys
impl Identified for Value {
    fn raw_identifier(&self, kind: VertexKind) -> MergeResult<Option<&str>> {
        json_field(self, kind.as_str())
    }
}

fn json_field<'a>(record: &'a Value, field: &str) -> MergeResult<Option<&'a str>> {
    let Value::Object(object) = record else {
        return Err(MergeError::NotAnObject(json_type_name(record)));
    };
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(MergeError::FieldType {
            field: field.to_string(),
            found: json_type_name(other),
        }),
    }
}
