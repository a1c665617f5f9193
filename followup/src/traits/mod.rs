//! Traits Module
//!
//! - [`generator`]: the language-model collaborator seam used by the engine.

pub mod generator;
