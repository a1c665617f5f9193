//! Document-style persistence for multi-question, conversational feedback.
//!
//! [`DocumentStore`] wraps a pooled connection to a JSON-capable SQL database and exposes
//! collection-like operations (insert one, insert batch, filtered find, option tallies).
//!
//! [`DocumentStoreHandle`] is what the application holds. It connects on first use and
//! reuses that pool for the rest of the process; the pool is never reopened or replaced.

pub mod feedback_document;
pub mod store;

pub use store::{DocumentCommon, DocumentStore, QuestionDocument};

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;

#[derive(Debug, Error)]
pub enum DocumentStoreError {
    #[error("document store not configured")]
    NotConfigured,
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

/// Lazily connected, shared document store.
#[derive(Clone)]
pub struct DocumentStoreHandle {
    url: Option<String>,
    cell: Arc<OnceCell<DocumentStore>>,
}

impl DocumentStoreHandle {
    /// An empty or blank `url` produces an unconfigured handle.
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            url: (!url.trim().is_empty()).then_some(url),
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// A handle around an already connected store.
    pub fn from_store(store: DocumentStore) -> Self {
        Self {
            url: None,
            cell: Arc::new(OnceCell::new_with(Some(store))),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some() || self.cell.initialized()
    }

    /// Returns the shared store, connecting on first call.
    ///
    /// Concurrent first callers wait on a single connection attempt. A failed attempt
    /// leaves the cell empty so a later call can retry.
    pub async fn get(&self) -> Result<&DocumentStore, DocumentStoreError> {
        if let Some(store) = self.cell.get() {
            return Ok(store);
        }
        let url = self.url.as_deref().ok_or(DocumentStoreError::NotConfigured)?;
        self.cell
            .get_or_try_init(|| async {
                tracing::info!("connecting document store");
                DocumentStore::connect(url).await
            })
            .await
            .map_err(DocumentStoreError::from)
    }
}
