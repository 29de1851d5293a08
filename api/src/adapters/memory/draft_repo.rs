//! In-memory DraftRepository implementation
//!
//! Drafts live only as long as the process. The store is bounded: once it
//! holds `capacity` drafts, each insert evicts the oldest one.

use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::entities::{Draft, DraftId, NewDraft};
use crate::domain::ports::DraftRepository;
use crate::error::DomainError;

#[derive(Default)]
struct Store {
    drafts: HashMap<DraftId, Draft>,
    /// Insertion order, oldest at the front
    order: VecDeque<DraftId>,
}

pub struct InMemoryDraftRepository {
    store: RwLock<Store>,
    capacity: usize,
}

impl InMemoryDraftRepository {
    pub fn new(capacity: usize) -> Self {
        Self {
            store: RwLock::new(Store::default()),
            capacity: capacity.max(1),
        }
    }
}

fn poisoned<T>(_: T) -> DomainError {
    DomainError::Storage("draft store lock poisoned".to_string())
}

#[async_trait]
impl DraftRepository for InMemoryDraftRepository {
    async fn create(&self, draft: NewDraft) -> Result<Draft, DomainError> {
        let draft = draft.into_draft();
        let mut store = self.store.write().map_err(poisoned)?;

        while store.order.len() >= self.capacity {
            match store.order.pop_front() {
                Some(oldest) => {
                    store.drafts.remove(&oldest);
                    tracing::debug!(draft_id = %oldest, "Evicted oldest draft");
                }
                None => break,
            }
        }

        store.order.push_back(draft.id);
        store.drafts.insert(draft.id, draft.clone());
        Ok(draft)
    }

    async fn find_by_id(&self, id: &DraftId) -> Result<Option<Draft>, DomainError> {
        let store = self.store.read().map_err(poisoned)?;
        Ok(store.drafts.get(id).cloned())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Draft>, DomainError> {
        let store = self.store.read().map_err(poisoned)?;
        Ok(store
            .order
            .iter()
            .rev()
            .filter_map(|id| store.drafts.get(id).cloned())
            .take(limit)
            .collect())
    }

    async fn delete(&self, id: &DraftId) -> Result<bool, DomainError> {
        let mut store = self.store.write().map_err(poisoned)?;
        if store.drafts.remove(id).is_none() {
            return Ok(false);
        }
        store.order.retain(|existing| existing != id);
        Ok(true)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let store = self.store.read().map_err(poisoned)?;
        Ok(store.drafts.len())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn new_draft(subject: &str) -> NewDraft {
        NewDraft {
            subject: subject.to_string(),
            html: format!("<title>{}</title>", subject),
            layer_count: 1,
        }
    }

    #[tokio::test]
    async fn create_then_find() {
        let repo = InMemoryDraftRepository::new(10);
        let draft = repo.create(new_draft("Weekly")).await.unwrap();

        let found = repo.find_by_id(&draft.id).await.unwrap().unwrap();
        assert_eq!(found.subject, "Weekly");
        assert_eq!(&*found.html, "<title>Weekly</title>");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn find_missing_returns_none() {
        let repo = InMemoryDraftRepository::new(10);
        assert!(repo.find_by_id(&DraftId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_recent_is_newest_first_and_limited() {
        let repo = InMemoryDraftRepository::new(10);
        for subject in ["one", "two", "three"] {
            repo.create(new_draft(subject)).await.unwrap();
        }

        let subjects: Vec<String> = repo
            .list_recent(2)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.subject)
            .collect();
        assert_eq!(subjects, vec!["three", "two"]);
    }

    #[tokio::test]
    async fn listing_shares_stored_html() {
        let repo = InMemoryDraftRepository::new(10);
        let draft = repo.create(new_draft("Shared")).await.unwrap();

        let listed = repo.list_recent(10).await.unwrap();
        let found = repo.find_by_id(&draft.id).await.unwrap().unwrap();

        assert!(Arc::ptr_eq(&listed[0].html, &found.html));
        assert!(Arc::ptr_eq(&draft.html, &found.html));
    }

    #[tokio::test]
    async fn capacity_evicts_oldest() {
        let repo = InMemoryDraftRepository::new(2);
        let first = repo.create(new_draft("first")).await.unwrap();
        let second = repo.create(new_draft("second")).await.unwrap();
        let third = repo.create(new_draft("third")).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
        assert!(repo.find_by_id(&first.id).await.unwrap().is_none());
        assert!(repo.find_by_id(&second.id).await.unwrap().is_some());
        assert!(repo.find_by_id(&third.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_removes_draft() {
        let repo = InMemoryDraftRepository::new(10);
        let draft = repo.create(new_draft("gone")).await.unwrap();

        assert!(repo.delete(&draft.id).await.unwrap());
        assert!(!repo.delete(&draft.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo.list_recent(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn zero_capacity_still_keeps_latest() {
        let repo = InMemoryDraftRepository::new(0);
        repo.create(new_draft("first")).await.unwrap();
        let latest = repo.create(new_draft("latest")).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        assert!(repo.find_by_id(&latest.id).await.unwrap().is_some());
    }
}
