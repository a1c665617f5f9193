//! Stored shape of one question's answer within a conversational feedback batch.
//!
//! Per-question payloads (`slide_content`, `response`) and the reviewer identity are
//! schema-free JSON; the correlation keys are plain columns so they can be filtered.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "feedback_documents")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub presentation_id: String,
    pub module_id: Option<String>,
    pub form_id: Option<String>,
    pub session_id: Option<String>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub reviewer: Option<serde_json::Value>,

    pub slide_id: String,
    /// Position of this question within the batch it was submitted in.
    pub question_index: i32,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub slide_content: Option<serde_json::Value>,
    #[sea_orm(column_type = "JsonBinary")]
    pub response: serde_json::Value,
    pub feedback_type: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
