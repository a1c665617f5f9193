//! Application state shared across Axum route handlers.
//!
//! Holds one relational pool, the lazily connected document store handle, and the
//! follow-up service. Every field is cheap to clone and safe to share; nothing here is
//! replaced after startup.

use db::documents::DocumentStoreHandle;
use followup::generators::gemini::GeminiGenerator;
use followup::{FollowUpEngine, GenerationError};
use migration::Migrator;
use sea_orm::{DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use services::conversation_service::ConversationService;
use services::feedback_service::FeedbackService;
use services::followup_service::FollowUpService;
use std::sync::Arc;
use std::time::Duration;
use util::config;

#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    documents: DocumentStoreHandle,
    followups: FollowUpService,
}

impl AppState {
    /// `engine` is `None` when the model credential is missing.
    pub fn new(
        db: DatabaseConnection,
        documents: DocumentStoreHandle,
        engine: Option<FollowUpEngine>,
    ) -> Self {
        Self {
            db,
            documents,
            followups: FollowUpService::new(engine, config::default_follow_ups()),
        }
    }

    /// Builds state from configuration: connects and migrates the relational store,
    /// prepares (but does not open) the document store, and wires the Gemini engine.
    pub async fn init() -> Result<Self, DbErr> {
        let db = db::connect().await?;
        Migrator::up(&db, None).await?;

        let documents = DocumentStoreHandle::new(config::document_store_url());
        if !documents.is_configured() {
            tracing::warn!("DOCUMENT_STORE_URL not set; conversation endpoints will reject writes");
        }

        Ok(Self::new(db, documents, engine_from_config()))
    }

    /// Returns a shared reference to the relational pool.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }

    /// Relational adapter bound to a clone of the pool, built per request.
    pub fn feedback(&self) -> FeedbackService {
        FeedbackService::new(self.db_clone())
    }

    pub fn conversations(&self) -> ConversationService {
        ConversationService::new(self.documents.clone())
    }

    pub fn followups(&self) -> &FollowUpService {
        &self.followups
    }
}

/// Gemini-backed engine, or `None` when `GEMINI_API_KEY` is empty.
pub fn engine_from_config() -> Option<FollowUpEngine> {
    let timeout = Duration::from_secs(config::llm_timeout_secs());
    match GeminiGenerator::new(config::gemini_api_key(), config::gemini_model(), timeout) {
        Ok(generator) => Some(FollowUpEngine::new(Arc::new(generator), timeout)),
        Err(GenerationError::NotConfigured) => {
            tracing::warn!("GEMINI_API_KEY not set; follow-up questions are disabled");
            None
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to build Gemini client; follow-up questions are disabled");
            None
        }
    }
}
