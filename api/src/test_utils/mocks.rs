//! Mock implementations of port traits
//!
//! Stand-ins for the image encoder and the draft store that let service
//! tests count calls or force failures.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::entities::{Draft, DraftId, ImageUpload, NewDraft};
use crate::domain::ports::{DraftRepository, ImageEncoder};
use crate::error::{DomainError, ImageError};

// ============================================================================
// Stub Image Encoder
// ============================================================================

/// Returns a fixed JPEG data URI without decoding anything
#[derive(Default)]
pub struct StubImageEncoder {
    calls: AtomicUsize,
    fail: bool,
}

impl StubImageEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with a decode error
    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    /// Number of images handed to the encoder so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ImageEncoder for StubImageEncoder {
    fn to_data_uri(&self, upload: &ImageUpload) -> Result<String, ImageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ImageError::Decode("stub decoder refused".to_string()));
        }
        upload.check_type()?;
        Ok(format!("data:image/jpeg;base64,STUB{}", upload.bytes.len()))
    }
}

// ============================================================================
// Failing Draft Repository
// ============================================================================

/// Every operation reports a storage failure
pub struct FailingDraftRepository;

fn storage_down() -> DomainError {
    DomainError::Storage("draft store unavailable".to_string())
}

#[async_trait]
impl DraftRepository for FailingDraftRepository {
    async fn create(&self, _draft: NewDraft) -> Result<Draft, DomainError> {
        Err(storage_down())
    }

    async fn find_by_id(&self, _id: &DraftId) -> Result<Option<Draft>, DomainError> {
        Err(storage_down())
    }

    async fn list_recent(&self, _limit: usize) -> Result<Vec<Draft>, DomainError> {
        Err(storage_down())
    }

    async fn delete(&self, _id: &DraftId) -> Result<bool, DomainError> {
        Err(storage_down())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Err(storage_down())
    }
}
