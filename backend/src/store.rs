//! In-memory keyed state for wizard sessions and admin drafts.
//!
//! Every update runs under the store's write lock and the closure either
//! finishes its change or returns an error before touching anything, so a
//! reader never sees half of an operation.

use crate::error::ServiceError;
use common::model::draft::TemplateDraft;
use common::session::Session;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct Store<T> {
    kind: &'static str,
    items: Arc<RwLock<HashMap<String, T>>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            items: self.items.clone(),
        }
    }
}

pub type SessionStore = Store<Session>;
pub type DraftStore = Store<TemplateDraft>;

impl<T: Clone> Store<T> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            items: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn not_found(&self, id: &str) -> ServiceError {
        ServiceError::NotFound(format!("{} '{}'", self.kind, id))
    }

    pub async fn insert(&self, id: String, item: T) {
        self.items.write().await.insert(id, item);
    }

    pub async fn snapshot(&self, id: &str) -> Result<T, ServiceError> {
        self.items
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| self.not_found(id))
    }

    pub async fn update<R, E, F>(&self, id: &str, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut T) -> Result<R, E>,
        ServiceError: From<E>,
    {
        let mut items = self.items.write().await;
        let item = items.get_mut(id).ok_or_else(|| self.not_found(id))?;
        Ok(f(item)?)
    }

    pub async fn remove(&self, id: &str) -> Result<T, ServiceError> {
        self.items
            .write()
            .await
            .remove(id)
            .ok_or_else(|| self.not_found(id))
    }
}

pub fn session_store() -> SessionStore {
    Store::new("Session")
}

pub fn draft_store() -> DraftStore {
    Store::new("Draft")
}
