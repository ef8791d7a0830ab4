//! Encode/decode algorithms over a vocabulary, plus the placeholder codec.
//!
//! This is not a real BPE implementation: encoding is exact-word lookup
//! with a character-level fallback, and decoding is plain concatenation.
//! Whitespace consumed during encode is not reconstructed, so
//! `decode(encode(x))` is not `x` in general.

use std::fmt::Write as _;

use crate::vocabulary::VocabularyTable;

/// Sentinel emitted for characters with no vocabulary entry.
///
/// Constraint: this collides with a legitimately mapped ID 0. A vocabulary
/// that assigns a real token to 0 cannot distinguish that token from an
/// unknown character in the encoded stream.
pub const UNKNOWN_TOKEN_ID: i32 = 0;

/// Beginning-of-sequence ID emitted by the placeholder encoder.
pub const PLACEHOLDER_BOS_ID: i32 = 1;

/// Encode text against a vocabulary.
///
/// Splits on whitespace; each word is emitted as its verbatim ID when
/// present, otherwise per-character with [`UNKNOWN_TOKEN_ID`] for misses,
/// followed by the literal `" "` token's ID if the vocabulary has one.
/// Never returns an empty sequence: empty input yields `[0]`.
///
/// Deterministic: a pure function of (text, vocabulary).
pub fn encode(text: &str, vocab: &VocabularyTable) -> Vec<i32> {
    let mut ids = Vec::new();

    for word in text.split_whitespace() {
        if let Some(id) = vocab.id_of(word) {
            ids.push(id);
            continue;
        }

        // Character-level fallback for out-of-vocabulary words.
        let mut buf = [0u8; 4];
        for ch in word.chars() {
            let ch_str: &str = ch.encode_utf8(&mut buf);
            ids.push(vocab.id_of(ch_str).unwrap_or(UNKNOWN_TOKEN_ID));
        }
        if let Some(space_id) = vocab.id_of(" ") {
            ids.push(space_id);
        }
    }

    if ids.is_empty() {
        ids.push(UNKNOWN_TOKEN_ID);
    }
    ids
}

/// Decode token IDs against a vocabulary.
///
/// Known IDs append their token string; unknown IDs append `[UNK:<id>]`.
/// No separators are inserted between pieces.
pub fn decode(tokens: &[i32], vocab: &VocabularyTable) -> String {
    let mut out = String::new();
    for &id in tokens {
        match vocab.token_of(id) {
            Some(token) => out.push_str(token),
            None => {
                let _ = write!(out, "[UNK:{}]", id);
            }
        }
    }
    out
}

/// Placeholder-mode encode: a fixed BOS marker followed by one ID per
/// input byte (`byte mod 256`).
pub fn encode_placeholder(text: &str) -> Vec<i32> {
    let mut ids = Vec::with_capacity(text.len() + 1);
    ids.push(PLACEHOLDER_BOS_ID);
    ids.extend(text.bytes().map(|b| i32::from(b) % 256));
    ids
}

/// Placeholder-mode decode: a bracketed, comma-separated decimal rendering
/// of the IDs, e.g. `[1, 2, 3]`.
///
/// This is a diagnostic format, not text reconstruction; clients depend on
/// it verbatim.
pub fn decode_placeholder(tokens: &[i32]) -> String {
    let rendered: Vec<String> = tokens.iter().map(|id| id.to_string()).collect();
    format!("[{}]", rendered.join(", "))
}
