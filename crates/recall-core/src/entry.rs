//! The memory entry record shared by every store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque per-entry metadata. Stores do not interpret it except for the
/// reserved [`META_TEXT`] key on semantic retrieval paths.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Reserved metadata key used to recover original content when an entry's
/// content and its display text differ (semantic stores).
pub const META_TEXT: &str = "text";

pub const KEY_USER: &str = "user";
pub const KEY_ASSISTANT: &str = "assistant";
pub const KEY_SYSTEM: &str = "system";

/// One recorded unit of memory.
///
/// `key` is deliberately overloaded: buffer-style stores use it as the turn's
/// role (`"user"` / `"assistant"` / `"system"`), semantic stores use it as a
/// unique identifier for the embedded item. Each store's documentation fixes
/// which sense applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub key: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl MemoryEntry {
    pub fn new(key: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            content: content.into(),
            metadata: Metadata::new(),
            timestamp: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            key: KEY_USER.to_string(),
            content: content.into(),
            metadata: Metadata::new(),
            timestamp: Some(Utc::now()),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            key: KEY_ASSISTANT.to_string(),
            content: content.into(),
            metadata: Metadata::new(),
            timestamp: Some(Utc::now()),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            key: KEY_SYSTEM.to_string(),
            content: content.into(),
            metadata: Metadata::new(),
            timestamp: Some(Utc::now()),
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// The text a semantic result stands for: the reserved `"text"` metadata
    /// key, then the store's own `"content"` default, then the entry content.
    pub fn display_text(&self) -> &str {
        for key in [META_TEXT, "content"] {
            if let Some(text) = self.metadata.get(key).and_then(|v| v.as_str()) {
                return text;
            }
        }
        &self.content
    }
}
