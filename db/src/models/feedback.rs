//! Flat, single-answer feedback rows (one answer to one slide question).
//!
//! Rows are written once and never mutated. Multi-form correlation columns
//! (`form_id`, `session_id`, `question_hash`, `form_context`) are optional for
//! single-form callers; `form_id` falls back to [`DEFAULT_FORM_ID`].

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_FORM_ID: &str = "default";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "feedback")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub presentation_id: String,
    pub slide_id: String,
    pub slide_index: Option<i32>,

    pub feedback_text: String,
    pub reviewer_name: Option<String>,
    pub reviewer_email: Option<String>,
    pub feedback_type: FeedbackType,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub metadata: Option<serde_json::Value>,

    pub form_id: String,
    pub session_id: Option<String>,
    pub question_hash: Option<String>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub form_context: Option<serde_json::Value>,

    pub created_at: DateTime<Utc>,
}

/// Category of a feedback answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    #[default]
    #[sea_orm(string_value = "general")]
    General,
    #[sea_orm(string_value = "content")]
    Content,
    #[sea_orm(string_value = "design")]
    Design,
    #[sea_orm(string_value = "accuracy")]
    Accuracy,
}

impl FeedbackType {
    pub const ALLOWED: [&'static str; 4] = ["general", "content", "design", "accuracy"];
}

impl fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FeedbackType::General => "general",
            FeedbackType::Content => "content",
            FeedbackType::Design => "design",
            FeedbackType::Accuracy => "accuracy",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for FeedbackType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(FeedbackType::General),
            "content" => Ok(FeedbackType::Content),
            "design" => Ok(FeedbackType::Design),
            "accuracy" => Ok(FeedbackType::Accuracy),
            other => Err(format!("invalid feedback type: {other}")),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Values for a new feedback row, already validated.
#[derive(Debug, Clone, Default)]
pub struct NewFeedback {
    pub presentation_id: String,
    pub slide_id: String,
    pub slide_index: Option<i32>,
    pub feedback_text: String,
    pub reviewer_name: Option<String>,
    pub reviewer_email: Option<String>,
    pub feedback_type: FeedbackType,
    pub metadata: Option<serde_json::Value>,
    pub form_id: Option<String>,
    pub session_id: Option<String>,
    pub question_hash: Option<String>,
    pub form_context: Option<serde_json::Value>,
}

impl Model {
    pub async fn create(db: &DbConn, new: NewFeedback) -> Result<Model, DbErr> {
        let form_id = new
            .form_id
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FORM_ID.to_string());

        let row = ActiveModel {
            presentation_id: Set(new.presentation_id),
            slide_id: Set(new.slide_id),
            slide_index: Set(new.slide_index),
            feedback_text: Set(new.feedback_text),
            reviewer_name: Set(new.reviewer_name),
            reviewer_email: Set(new.reviewer_email),
            feedback_type: Set(new.feedback_type),
            metadata: Set(new.metadata),
            form_id: Set(form_id),
            session_id: Set(new.session_id),
            question_hash: Set(new.question_hash),
            form_context: Set(new.form_context),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        row.insert(db).await
    }
}
