//! # Generator Implementations
//!
//! - [`gemini`]: Google's Gemini `generateContent` API over `reqwest`.

pub mod gemini;
