use crate::filters::{FeedbackFilter, Pagination};
use crate::models::feedback::{Column, Entity, Model, NewFeedback};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};

/// Relational adapter for single-answer feedback rows.
///
/// Holds a handle to the pool it was built with and nothing else; construct one per
/// request from the application state.
pub struct FeedbackRepository {
    db: DatabaseConnection,
}

impl FeedbackRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn apply_filter(query: Select<Entity>, filter: &FeedbackFilter) -> Select<Entity> {
        let mut condition = Condition::all();
        if let Some(presentation_id) = &filter.presentation_id {
            condition = condition.add(Column::PresentationId.eq(presentation_id.clone()));
        }
        if let Some(slide_id) = &filter.slide_id {
            condition = condition.add(Column::SlideId.eq(slide_id.clone()));
        }
        if let Some(feedback_type) = filter.feedback_type {
            condition = condition.add(Column::FeedbackType.eq(feedback_type));
        }
        if let Some(form_id) = &filter.form_id {
            condition = condition.add(Column::FormId.eq(form_id.clone()));
        }
        if let Some(session_id) = &filter.session_id {
            condition = condition.add(Column::SessionId.eq(session_id.clone()));
        }
        query.filter(condition)
    }

    /// Newest first; `id` breaks ties between rows written in the same instant.
    pub fn apply_sorting(query: Select<Entity>) -> Select<Entity> {
        query
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
    }

    /// Writes one row and returns its id.
    pub async fn insert(&self, new: NewFeedback) -> Result<i64, DbErr> {
        let row = Model::create(&self.db, new).await?;
        Ok(row.id)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(&self.db).await
    }

    /// Conjunctive equality filters, newest first, offset/limit window.
    pub async fn query(
        &self,
        filter: &FeedbackFilter,
        pagination: Pagination,
    ) -> Result<Vec<Model>, DbErr> {
        let query = Self::apply_filter(Entity::find(), filter);
        Self::apply_sorting(query)
            .offset(pagination.offset)
            .limit(pagination.limit)
            .all(&self.db)
            .await
    }
}
