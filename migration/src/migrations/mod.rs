pub mod m202510010001_create_feedback;
pub mod m202510010002_create_feedback_indexes;
