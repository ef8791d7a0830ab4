//! Tokenization layer for the Castor inference server.
//!
//! Converts between raw text and token-ID sequences against a vocabulary
//! loaded from one of several on-disk formats. When no real vocabulary can
//! be read, the tokenizer degrades to a byte-level placeholder mode rather
//! than failing, so the server keeps answering requests.

pub mod codec;
pub mod error;
pub mod loader;
pub mod vocabulary;

use std::path::Path;

use parking_lot::RwLock;
use tracing::{info, warn};

pub use codec::{PLACEHOLDER_BOS_ID, UNKNOWN_TOKEN_ID};
pub use error::{Result, TokenizationError};
pub use loader::{DetectedFormat, FormatTag, PLACEHOLDER_VOCAB_SIZE};
pub use vocabulary::VocabularyTable;

/// How load failures are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Reproduce the original behavior: any read or parse failure degrades
    /// to a placeholder tokenizer and the load reports success. Loading
    /// only fails for a second load attempt.
    #[default]
    Permissive,
    /// Surface read and parse failures to the caller.
    Strict,
}

struct LoadedState {
    tag: FormatTag,
    // Present iff the tag is not a placeholder variant.
    vocabulary: Option<VocabularyTable>,
}

/// Load-once tokenizer owning a vocabulary and its format tag.
///
/// Encode and decode dispatch on the format tag: real-vocabulary formats
/// use [`codec::encode`]/[`codec::decode`], placeholder formats use the
/// byte-level placeholder codec. A handle can be loaded at most once;
/// there is no unload.
pub struct TokenizerHandle {
    policy: LoadPolicy,
    // Write-once: taken for writing only by load(), which also serializes
    // concurrent load attempts on a shared handle.
    state: RwLock<Option<LoadedState>>,
}

impl Default for TokenizerHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenizerHandle {
    /// Create an unloaded handle with the permissive load policy.
    pub fn new() -> Self {
        Self::with_policy(LoadPolicy::Permissive)
    }

    /// Create an unloaded handle with an explicit load policy.
    pub fn with_policy(policy: LoadPolicy) -> Self {
        Self {
            policy,
            state: RwLock::new(None),
        }
    }

    /// Load a tokenizer definition from `path`, detecting its format.
    ///
    /// Fails with [`TokenizationError::AlreadyLoaded`] on a second call,
    /// leaving the existing state untouched. Under the permissive policy
    /// every other failure degrades to a [`FormatTag::GenericPlaceholder`]
    /// success; under the strict policy load errors propagate.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<FormatTag> {
        let path = path.as_ref();
        let mut state = self.state.write();
        if state.is_some() {
            return Err(TokenizationError::AlreadyLoaded);
        }

        let loaded = match loader::detect_and_load(path) {
            Ok(DetectedFormat::Vocabulary(tag, table)) => LoadedState {
                tag,
                vocabulary: Some(table),
            },
            Ok(DetectedFormat::Placeholder(tag)) => LoadedState {
                tag,
                vocabulary: None,
            },
            Err(e) => self.degrade(path, e)?,
        };

        info!(
            path = %path.display(),
            format = ?loaded.tag,
            vocab_size = loaded
                .vocabulary
                .as_ref()
                .map_or(PLACEHOLDER_VOCAB_SIZE, VocabularyTable::size),
            "Tokenizer loaded"
        );
        let tag = loaded.tag;
        *state = Some(loaded);
        Ok(tag)
    }

    /// Load a two-file BPE tokenizer (vocab + merges).
    ///
    /// The merges file is accepted but unused; see [`loader::load_bpe`].
    /// Same load-once and policy semantics as [`Self::load`].
    pub fn load_bpe<P, Q>(&self, vocab_path: P, merges_path: Q) -> Result<FormatTag>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let vocab_path = vocab_path.as_ref();
        let mut state = self.state.write();
        if state.is_some() {
            return Err(TokenizationError::AlreadyLoaded);
        }

        let loaded = match loader::load_bpe(vocab_path, merges_path.as_ref()) {
            Ok(table) => LoadedState {
                tag: FormatTag::ByteLevelBpe,
                vocabulary: Some(table),
            },
            Err(e) => self.degrade(vocab_path, e)?,
        };

        let tag = loaded.tag;
        *state = Some(loaded);
        Ok(tag)
    }

    fn degrade(&self, path: &Path, err: TokenizationError) -> Result<LoadedState> {
        match self.policy {
            LoadPolicy::Strict => Err(err),
            LoadPolicy::Permissive => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "Tokenizer load failed; continuing with placeholder vocabulary"
                );
                Ok(LoadedState {
                    tag: FormatTag::GenericPlaceholder,
                    vocabulary: None,
                })
            }
        }
    }

    /// Encode text to token IDs. Returns an empty sequence when unloaded.
    pub fn encode(&self, text: &str) -> Vec<i32> {
        let state = self.state.read();
        match state.as_ref() {
            None => Vec::new(),
            Some(loaded) => match &loaded.vocabulary {
                Some(vocab) => codec::encode(text, vocab),
                None => codec::encode_placeholder(text),
            },
        }
    }

    /// Decode token IDs to a string. Returns an empty string when unloaded.
    pub fn decode(&self, tokens: &[i32]) -> String {
        let state = self.state.read();
        match state.as_ref() {
            None => String::new(),
            Some(loaded) => match &loaded.vocabulary {
                Some(vocab) => codec::decode(tokens, vocab),
                None => codec::decode_placeholder(tokens),
            },
        }
    }

    /// Vocabulary cardinality: 0 until loaded, the table size (or the
    /// placeholder constant) afterwards.
    pub fn vocab_size(&self) -> usize {
        let state = self.state.read();
        match state.as_ref() {
            None => 0,
            Some(loaded) => loaded
                .vocabulary
                .as_ref()
                .map_or(PLACEHOLDER_VOCAB_SIZE, VocabularyTable::size),
        }
    }

    /// Whether a load has succeeded. Never reverts to false.
    pub fn is_loaded(&self) -> bool {
        self.state.read().is_some()
    }

    /// The active format, or `None` before any load.
    pub fn format_tag(&self) -> Option<FormatTag> {
        self.state.read().as_ref().map(|s| s.tag)
    }
}
