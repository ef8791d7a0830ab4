//! On-disk tokenizer format detection and parsing.
//!
//! Understands the HuggingFace `tokenizer.json` shape (a `model.vocab`
//! object) and the two-file BPE layout (vocab + merges). SentencePiece
//! `.model` files are recognized but never parsed; callers get a fixed-size
//! placeholder vocabulary instead.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, TokenizationError};
use crate::vocabulary::VocabularyTable;

/// Vocabulary size reported for placeholder-mode tokenizers.
pub const PLACEHOLDER_VOCAB_SIZE: usize = 32000;

/// Which on-disk representation a loaded tokenizer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatTag {
    /// HuggingFace `tokenizer.json` with a `model.vocab` object.
    HuggingFaceJson,
    /// Two-file BPE layout (vocab parsed, merges currently ignored).
    ByteLevelBpe,
    /// A `.model` file was named; SentencePiece parsing is unsupported,
    /// so a placeholder vocabulary stands in.
    SentencePiecePlaceholder,
    /// Nothing usable was read; placeholder vocabulary stands in.
    GenericPlaceholder,
}

impl FormatTag {
    /// True when no real vocabulary backs this tokenizer.
    pub fn is_placeholder(self) -> bool {
        matches!(
            self,
            FormatTag::SentencePiecePlaceholder | FormatTag::GenericPlaceholder
        )
    }
}

/// Result of the dispatching [`detect_and_load`] entry point.
pub enum DetectedFormat {
    /// A real vocabulary was parsed.
    Vocabulary(FormatTag, VocabularyTable),
    /// Detection chose a placeholder without reading anything.
    Placeholder(FormatTag),
}

/// Load a HuggingFace-style `tokenizer.json`.
///
/// Requires a nested `model.vocab` object mapping token strings to IDs.
/// IDs may be JSON integers or numeric strings; anything else is a parse
/// error. A successfully parsed vocabulary with zero entries is rejected:
/// a usable table needs at least one token.
pub fn load_hf_json(path: &Path) -> Result<VocabularyTable> {
    let contents = std::fs::read_to_string(path)
        .map_err(|_| TokenizationError::NotFound(path.display().to_string()))?;

    let root: Value = serde_json::from_str(&contents)
        .map_err(|e| TokenizationError::ParseError(format!("{}: {}", path.display(), e)))?;

    let vocab = root
        .get("model")
        .and_then(|m| m.get("vocab"))
        .and_then(Value::as_object)
        .ok_or_else(|| {
            TokenizationError::ParseError(format!(
                "{}: missing model.vocab object",
                path.display()
            ))
        })?;

    let mut entries = Vec::with_capacity(vocab.len());
    for (token, value) in vocab {
        let id = parse_token_id(value).ok_or_else(|| {
            TokenizationError::ParseError(format!(
                "{}: token {:?} has non-numeric ID {}",
                path.display(),
                token,
                value
            ))
        })?;
        entries.push((token.clone(), id));
    }

    if entries.is_empty() {
        return Err(TokenizationError::EmptyVocabulary(
            path.display().to_string(),
        ));
    }

    let table = VocabularyTable::from_entries(entries)?;
    debug!(
        path = %path.display(),
        vocab_size = table.size(),
        "Parsed HuggingFace JSON vocabulary"
    );
    Ok(table)
}

/// Load a two-file BPE tokenizer.
///
/// Only the vocab file is read; it must have the same `model.vocab` shape
/// as a HuggingFace JSON file. The merges file is accepted for interface
/// compatibility but is not used by the codec, which does exact-word and
/// character lookups rather than pair merging.
pub fn load_bpe(vocab_path: &Path, merges_path: &Path) -> Result<VocabularyTable> {
    warn!(
        merges = %merges_path.display(),
        "BPE merges file accepted but not used; codec does vocabulary lookups only"
    );
    load_hf_json(vocab_path)
}

/// SentencePiece parsing is not implemented in this design.
///
/// Always fails; callers fall back to a placeholder vocabulary.
pub fn load_sentencepiece(path: &Path) -> Result<VocabularyTable> {
    Err(TokenizationError::UnsupportedFormat(format!(
        "SentencePiece model not supported: {}",
        path.display()
    )))
}

/// Detect the tokenizer format for `path` and load it.
///
/// Tie-break policy, in order:
/// 1. path contains `.json` -> parse as HuggingFace JSON;
/// 2. path contains `.model` -> SentencePiece placeholder, nothing read;
/// 3. file missing -> generic placeholder, nothing read;
/// 4. anything else that exists -> attempt HuggingFace JSON anyway.
///
/// The placeholder branches succeed without touching the filesystem
/// contents; callers distinguish them via the returned tag.
pub fn detect_and_load(path: &Path) -> Result<DetectedFormat> {
    let name = path.to_string_lossy();

    if name.contains(".json") {
        let table = load_hf_json(path)?;
        return Ok(DetectedFormat::Vocabulary(FormatTag::HuggingFaceJson, table));
    }

    if name.contains(".model") {
        debug!(path = %name, "SentencePiece model named; using placeholder vocabulary");
        return Ok(DetectedFormat::Placeholder(
            FormatTag::SentencePiecePlaceholder,
        ));
    }

    if !path.exists() {
        warn!(path = %name, "Tokenizer file missing; using placeholder vocabulary");
        return Ok(DetectedFormat::Placeholder(FormatTag::GenericPlaceholder));
    }

    let table = load_hf_json(path)?;
    Ok(DetectedFormat::Vocabulary(FormatTag::HuggingFaceJson, table))
}

fn parse_token_id(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}
