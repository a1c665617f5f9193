use sha2::{Digest, Sha256};

/// Length of the hex prefix kept from the digest.
pub const QUESTION_HASH_LEN: usize = 16;

/// Short fingerprint of a question's wording.
///
/// Surrounding whitespace is ignored so cosmetic edits don't change the hash, but any
/// change to the wording does.
pub fn hash_question(question_text: &str) -> String {
    let digest = Sha256::digest(question_text.trim().as_bytes());
    let mut hash = hex::encode(digest);
    hash.truncate(QUESTION_HASH_LEN);
    hash
}
