//! In-memory adapters for unit tests, with switchable failures.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::{Status, StatusName, Transaction};
use crate::dto::TransactionDto;
use crate::ports::{
    DocumentMirror, MirrorError, Notifier, NotifyError, RepositoryError, RepositoryResult,
    StatusRepository, TransactionStore,
};

#[derive(Default)]
pub struct InMemoryStatusRepository {
    rows: Mutex<Vec<Status>>,
}

impl InMemoryStatusRepository {
    /// Catalog holding the four canonical statuses.
    pub fn seeded() -> Self {
        let rows = StatusName::ALL
            .iter()
            .map(|name| Status::new(Uuid::new_v4(), *name))
            .collect();
        Self {
            rows: Mutex::new(rows),
        }
    }

    /// Resolves an id the way the relational join does.
    pub fn name_of(&self, id: Uuid) -> Option<String> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.clone())
    }
}

#[async_trait]
impl StatusRepository for InMemoryStatusRepository {
    async fn create(&self, name: &str) -> RepositoryResult<Status> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|s| s.name == name) {
            return Err(RepositoryError::Conflict(format!("Status '{}' already exists", name)));
        }
        let status = Status::new(Uuid::new_v4(), name);
        rows.push(status.clone());
        Ok(status)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Status> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Status {} not found", id)))
    }

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Status>> {
        Ok(self.rows.lock().unwrap().iter().find(|s| s.name == name).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Status>> {
        Ok(self.rows.lock().unwrap().clone())
    }
}

/// Rows kept in insertion order. Status references resolve against the
/// shared catalog.
pub struct InMemoryTransactionStore {
    rows: Mutex<Vec<Transaction>>,
    catalog: Arc<InMemoryStatusRepository>,
}

impl InMemoryTransactionStore {
    pub fn with_catalog(catalog: Arc<InMemoryStatusRepository>) -> Self {
        Self {
            rows: Mutex::default(),
            catalog,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn row(&self, id: Uuid) -> Option<Transaction> {
        self.rows.lock().unwrap().iter().find(|t| t.id == id).cloned()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn insert(&self, tx: &Transaction) -> RepositoryResult<Uuid> {
        let mut row = tx.clone();
        row.id = Uuid::new_v4();
        let id = row.id;
        self.rows.lock().unwrap().push(row);
        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Transaction>> {
        Ok(self.row(id))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Transaction>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn save(&self, tx: &Transaction) -> RepositoryResult<()> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|t| t.id == tx.id) {
            Some(row) => {
                *row = tx.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound(format!("Transaction {} not found", tx.id))),
        }
    }

    async fn mark_deleted(
        &self,
        id: Uuid,
        status_id: Option<Uuid>,
        deleted_at: DateTime<Utc>,
    ) -> RepositoryResult<u64> {
        let status = status_id
            .and_then(|sid| self.catalog.name_of(sid).map(|name| Status::new(sid, name)))
            .unwrap_or_default();

        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|t| t.id == id) else {
            return Ok(0);
        };
        row.is_deleted = true;
        row.deleted_at = Some(deleted_at);
        row.status = status;
        Ok(1)
    }
}

#[derive(Default)]
pub struct InMemoryDocumentMirror {
    docs: Mutex<HashMap<Uuid, Transaction>>,
    failing: AtomicBool,
}

impl InMemoryDocumentMirror {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn get(&self, id: Uuid) -> Option<Transaction> {
        self.docs.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.docs.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), MirrorError> {
        if self.failing.load(Ordering::SeqCst) {
            let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "mirror down");
            return Err(MirrorError::Redis(io.into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentMirror for InMemoryDocumentMirror {
    async fn insert(&self, tx: &Transaction) -> Result<(), MirrorError> {
        self.check()?;
        let mut docs = self.docs.lock().unwrap();
        if docs.contains_key(&tx.id) {
            return Err(MirrorError::AlreadyExists(tx.id));
        }
        docs.insert(tx.id, tx.clone());
        Ok(())
    }

    async fn replace(&self, tx: &Transaction) -> Result<(), MirrorError> {
        self.check()?;
        self.docs.lock().unwrap().insert(tx.id, tx.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    published: Mutex<Vec<TransactionDto>>,
    failing: AtomicBool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.failing.store(true, Ordering::SeqCst);
        notifier
    }

    pub fn published(&self) -> Vec<TransactionDto> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(&self, message: &TransactionDto) -> Result<(), NotifyError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotifyError::Timeout(0));
        }
        self.published.lock().unwrap().push(message.clone());
        Ok(())
    }
}
