use crate::models::feedback::FeedbackType;

/// Equality filters for relational feedback queries. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct FeedbackFilter {
    pub presentation_id: Option<String>,
    pub slide_id: Option<String>,
    pub feedback_type: Option<FeedbackType>,
    pub form_id: Option<String>,
    pub session_id: Option<String>,
}

impl FeedbackFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_presentation_id(mut self, presentation_id: impl Into<String>) -> Self {
        self.presentation_id = Some(presentation_id.into());
        self
    }

    pub fn with_slide_id(mut self, slide_id: impl Into<String>) -> Self {
        self.slide_id = Some(slide_id.into());
        self
    }

    pub fn with_feedback_type(mut self, feedback_type: FeedbackType) -> Self {
        self.feedback_type = Some(feedback_type);
        self
    }

    pub fn with_form_id(mut self, form_id: impl Into<String>) -> Self {
        self.form_id = Some(form_id.into());
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// Equality filters for conversational feedback documents.
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    pub presentation_id: Option<String>,
    pub module_id: Option<String>,
    pub form_id: Option<String>,
    pub session_id: Option<String>,
    pub slide_id: Option<String>,
}

impl DocumentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_presentation_id(mut self, presentation_id: impl Into<String>) -> Self {
        self.presentation_id = Some(presentation_id.into());
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_slide_id(mut self, slide_id: impl Into<String>) -> Self {
        self.slide_id = Some(slide_id.into());
        self
    }
}

/// Offset/limit window. `limit` is clamped to `1..=MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
}

impl Pagination {
    pub const DEFAULT_LIMIT: u64 = 100;
    pub const MAX_LIMIT: u64 = 1000;

    pub fn new(limit: Option<u64>, offset: Option<u64>) -> Self {
        Self {
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}
