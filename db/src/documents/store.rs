use super::feedback_document::{ActiveModel, Column, Entity, Model};
use crate::filters::DocumentFilter;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr,
    EntityTrait, FromQueryResult, QueryFilter, QueryOrder, Schema, Statement,
};
use std::collections::BTreeMap;

/// Fields shared by every document in one submission.
#[derive(Debug, Clone, Default)]
pub struct DocumentCommon {
    pub presentation_id: String,
    pub module_id: Option<String>,
    pub form_id: Option<String>,
    pub session_id: Option<String>,
    pub reviewer: Option<serde_json::Value>,
}

/// Per-question part of a document.
#[derive(Debug, Clone)]
pub struct QuestionDocument {
    pub slide_id: String,
    pub slide_content: Option<serde_json::Value>,
    pub response: serde_json::Value,
    pub feedback_type: Option<String>,
}

#[derive(Debug, FromQueryResult)]
struct OptionCount {
    option_id: Option<String>,
    count: i64,
}

/// Collection-style access to `feedback_documents`.
#[derive(Clone)]
pub struct DocumentStore {
    db: DatabaseConnection,
}

impl DocumentStore {
    /// Opens a pool to `url` and makes sure the collection table exists.
    pub async fn connect(url: &str) -> Result<Self, DbErr> {
        let db = Database::connect(url).await?;
        Self::from_connection(db).await
    }

    pub async fn from_connection(db: DatabaseConnection) -> Result<Self, DbErr> {
        let backend = db.get_database_backend();
        let schema = Schema::new(backend);
        let mut create = schema.create_table_from_entity(Entity);
        create.if_not_exists();
        db.execute(backend.build(&create)).await?;
        Ok(Self { db })
    }

    fn to_active(
        id: String,
        common: &DocumentCommon,
        question: QuestionDocument,
        question_index: i32,
        now: chrono::DateTime<Utc>,
    ) -> ActiveModel {
        ActiveModel {
            id: Set(id),
            presentation_id: Set(common.presentation_id.clone()),
            module_id: Set(common.module_id.clone()),
            form_id: Set(common.form_id.clone()),
            session_id: Set(common.session_id.clone()),
            reviewer: Set(common.reviewer.clone()),
            slide_id: Set(question.slide_id),
            question_index: Set(question_index),
            slide_content: Set(question.slide_content),
            response: Set(question.response),
            feedback_type: Set(question.feedback_type),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    pub async fn insert_one(
        &self,
        common: &DocumentCommon,
        question: QuestionDocument,
    ) -> Result<String, DbErr> {
        let id = uuid::Uuid::new_v4().to_string();
        let active = Self::to_active(id.clone(), common, question, 0, Utc::now());
        Entity::insert(active).exec_without_returning(&self.db).await?;
        Ok(id)
    }

    /// Writes one document per question, all sharing `common` and one `created_at`.
    ///
    /// Issued as a single multi-row insert. No transaction wraps it, so a backend that
    /// splits the statement could leave a partial batch; counts per session reveal that.
    pub async fn insert_batch(
        &self,
        common: &DocumentCommon,
        questions: Vec<QuestionDocument>,
    ) -> Result<Vec<String>, DbErr> {
        if questions.is_empty() {
            return Ok(Vec::new());
        }

        let now = Utc::now();
        let mut ids = Vec::with_capacity(questions.len());
        let mut rows = Vec::with_capacity(questions.len());
        for (index, question) in questions.into_iter().enumerate() {
            let id = uuid::Uuid::new_v4().to_string();
            rows.push(Self::to_active(id.clone(), common, question, index as i32, now));
            ids.push(id);
        }

        Entity::insert_many(rows)
            .exec_without_returning(&self.db)
            .await?;
        tracing::debug!(count = ids.len(), "inserted feedback document batch");
        Ok(ids)
    }

    /// Newest batch first; questions within a batch keep their submitted order.
    pub async fn query(&self, filter: &DocumentFilter) -> Result<Vec<Model>, DbErr> {
        let mut condition = Condition::all();
        if let Some(presentation_id) = &filter.presentation_id {
            condition = condition.add(Column::PresentationId.eq(presentation_id.clone()));
        }
        if let Some(module_id) = &filter.module_id {
            condition = condition.add(Column::ModuleId.eq(module_id.clone()));
        }
        if let Some(form_id) = &filter.form_id {
            condition = condition.add(Column::FormId.eq(form_id.clone()));
        }
        if let Some(session_id) = &filter.session_id {
            condition = condition.add(Column::SessionId.eq(session_id.clone()));
        }
        if let Some(slide_id) = &filter.slide_id {
            condition = condition.add(Column::SlideId.eq(slide_id.clone()));
        }

        Entity::find()
            .filter(condition)
            .order_by_desc(Column::CreatedAt)
            .order_by_asc(Column::SessionId)
            .order_by_asc(Column::QuestionIndex)
            .all(&self.db)
            .await
    }

    /// Tallies `response.optionId` across documents for `slide_id`.
    ///
    /// Documents without an option (absent or JSON null) are left out of the map.
    pub async fn count_distinct_option(
        &self,
        slide_id: &str,
    ) -> Result<BTreeMap<String, u64>, DbErr> {
        let backend = self.db.get_database_backend();
        let (option_expr, placeholder) = match backend {
            DbBackend::Postgres => ("(response ->> 'optionId')", "$1"),
            DbBackend::MySql => ("JSON_UNQUOTE(JSON_EXTRACT(response, '$.optionId'))", "?"),
            _ => ("CAST(json_extract(response, '$.optionId') AS TEXT)", "?"),
        };
        let sql = format!(
            "SELECT {option_expr} AS option_id, COUNT(*) AS count \
             FROM feedback_documents \
             WHERE slide_id = {placeholder} AND {option_expr} IS NOT NULL \
             GROUP BY {option_expr}"
        );

        let rows = OptionCount::find_by_statement(Statement::from_sql_and_values(
            backend,
            sql,
            [slide_id.into()],
        ))
        .all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|r| r.option_id.map(|id| (id, r.count.max(0) as u64)))
            .collect())
    }
}
