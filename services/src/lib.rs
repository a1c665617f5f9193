pub mod conversation_service;
pub mod error;
pub mod feedback_service;
pub mod followup_service;
pub mod hashing;
pub mod validation;
