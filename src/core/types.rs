use serde::{Serialize, Deserialize};
use std::borrow::Borrow;
use std::fmt;

/// Caller-supplied document identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        DocumentId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        DocumentId(id.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        DocumentId(id)
    }
}

impl Borrow<str> for DocumentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One weighted piece of document content, e.g. a title or a body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub tag: String,
    pub text: String,
    pub weight: f32,   // Must be finite and > 0
}

impl Field {
    pub fn new(tag: impl Into<String>, text: impl Into<String>, weight: f32) -> Self {
        Field {
            tag: tag.into(),
            text: text.into(),
            weight,
        }
    }

    /// Field with the neutral weight of 1.0
    pub fn text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Field::new(tag, text, 1.0)
    }
}

/// A document submitted to `SearchIndex::add_or_update`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentItem {
    pub id: DocumentId,
    pub fields: Vec<Field>,
}

impl DocumentItem {
    pub fn new(id: impl Into<DocumentId>) -> Self {
        DocumentItem {
            id: id.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Single-field document, mostly for tests and quick setups
    pub fn from_text(id: impl Into<DocumentId>, text: impl Into<String>) -> Self {
        DocumentItem::new(id).with_field(Field::text("body", text))
    }
}
