//! Draft domain entity
//!
//! A generated newsletter kept around for preview and download.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Unique identifier for a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DraftId(pub Uuid);

impl DraftId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DraftId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DraftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DraftId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(DraftId)
    }
}

/// A stored, rendered newsletter
///
/// The document is shared, so cloning a draft out of the store does not copy it.
#[derive(Debug, Clone)]
pub struct Draft {
    pub id: DraftId,
    pub subject: String,
    pub html: Arc<str>,
    pub layer_count: usize,
    /// SHA-256 of the HTML, hex encoded
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Draft {
    /// Name offered when downloading this draft
    pub fn filename(&self) -> String {
        download_filename(&self.subject)
    }

    pub fn size_bytes(&self) -> usize {
        self.html.len()
    }

    /// Strong ETag derived from the content hash
    pub fn etag(&self) -> String {
        format!("\"{}\"", self.content_hash)
    }
}

/// Data needed to store a new draft
#[derive(Debug, Clone)]
pub struct NewDraft {
    pub subject: String,
    pub html: String,
    pub layer_count: usize,
}

impl NewDraft {
    /// Materialize into a draft with a fresh id and timestamp
    pub fn into_draft(self) -> Draft {
        let content_hash = hash_content(&self.html);
        Draft {
            id: DraftId::new(),
            subject: self.subject,
            html: self.html.into(),
            layer_count: self.layer_count,
            content_hash,
            created_at: Utc::now(),
        }
    }
}

/// `<subject with spaces as underscores>_newsletter.html`
pub fn download_filename(subject: &str) -> String {
    format!("{}_newsletter.html", subject.replace(' ', "_"))
}

/// Hex-encoded SHA-256 digest of the rendered document
pub fn hash_content(html: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(html.as_bytes());
    hex::encode(hasher.finalize())
}
