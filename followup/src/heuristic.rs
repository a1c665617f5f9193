//! # Completion Heuristic
//!
//! Detects an explicit "I have nothing more to add" in a reviewer's answer without
//! calling out to the model. The check is plain substring containment on the
//! lowercased, trimmed text: no tokenization or stemming.
//!
//! A miss here is harmless because the model is asked the same question afterwards.

/// Phrases that end a conversation when they appear anywhere in an answer.
pub const TERMINAL_PHRASES: &[&str] = &[
    "that's all",
    "that’s all",
    "thats all",
    "that is all",
    "nothing else",
    "nothing more",
    "i'm done",
    "i’m done",
    "im done",
    "i am done",
    "no more to add",
    "nothing to add",
    "no further comments",
];

/// Returns `true` if `response` contains one of [`TERMINAL_PHRASES`].
pub fn wants_to_end(response: &str) -> bool {
    let normalized = response.trim().to_lowercase();
    TERMINAL_PHRASES
        .iter()
        .any(|phrase| normalized.contains(phrase))
}
