//! Repository port traits
//!
//! These traits define the interface for draft persistence.
//! Implementations are provided by adapters (e.g., in-memory store).

use async_trait::async_trait;

use crate::domain::entities::{Draft, DraftId, NewDraft};
use crate::error::DomainError;

/// Repository for generated newsletter drafts
#[async_trait]
pub trait DraftRepository: Send + Sync {
    /// Store a new draft
    async fn create(&self, draft: NewDraft) -> Result<Draft, DomainError>;

    /// Find a draft by ID
    async fn find_by_id(&self, id: &DraftId) -> Result<Option<Draft>, DomainError>;

    /// List drafts, newest first
    async fn list_recent(&self, limit: usize) -> Result<Vec<Draft>, DomainError>;

    /// Delete a draft. Returns false if it did not exist.
    async fn delete(&self, id: &DraftId) -> Result<bool, DomainError>;

    /// Number of stored drafts
    async fn count(&self) -> Result<usize, DomainError>;
}
