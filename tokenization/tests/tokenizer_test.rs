//! Integration tests for the tokenization crate.
//!
//! Vocabulary fixtures are written to temp files so no external model
//! downloads are needed.

use std::fs;
use std::path::PathBuf;

use castor_tokenization::{
    FormatTag, LoadPolicy, TokenizationError, TokenizerHandle, PLACEHOLDER_VOCAB_SIZE,
};
use tempfile::TempDir;

/// Write a minimal HuggingFace-style tokenizer.json and return its path.
fn create_test_vocab() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("tokenizer.json");

    let vocab_json = r#"{
  "version": "1.0",
  "model": {
    "type": "BPE",
    "vocab": {
      "<unk>": "0",
      "<s>": "1",
      "hello": "4",
      "world": "5",
      "h": "10",
      "i": "11",
      " ": "20"
    }
  }
}"#;
    fs::write(&path, vocab_json).expect("Failed to write tokenizer.json");

    (temp_dir, path)
}

#[test]
fn test_unloaded_handle() {
    let tokenizer = TokenizerHandle::new();
    assert!(!tokenizer.is_loaded());
    assert_eq!(tokenizer.vocab_size(), 0);
    assert!(tokenizer.format_tag().is_none());
    assert!(tokenizer.encode("hello world").is_empty());
    assert_eq!(tokenizer.decode(&[1, 2, 3]), "");
}

#[test]
fn test_load_hf_json() {
    let (_temp_dir, path) = create_test_vocab();
    let tokenizer = TokenizerHandle::new();

    let tag = tokenizer.load(&path).expect("load should succeed");
    assert_eq!(tag, FormatTag::HuggingFaceJson);
    assert!(tokenizer.is_loaded());
    assert_eq!(tokenizer.vocab_size(), 7);
}

#[test]
fn test_double_load_fails_without_state_change() {
    let (_temp_dir, path) = create_test_vocab();
    let tokenizer = TokenizerHandle::new();
    tokenizer.load(&path).expect("first load should succeed");
    let size_before = tokenizer.vocab_size();

    let result = tokenizer.load(&path);
    assert!(matches!(result, Err(TokenizationError::AlreadyLoaded)));
    assert_eq!(tokenizer.vocab_size(), size_before);
    assert_eq!(tokenizer.format_tag(), Some(FormatTag::HuggingFaceJson));
}

#[test]
fn test_encode_known_words() {
    let (_temp_dir, path) = create_test_vocab();
    let tokenizer = TokenizerHandle::new();
    tokenizer.load(&path).expect("load should succeed");

    assert_eq!(tokenizer.encode("hello world"), vec![4, 5]);
}

#[test]
fn test_encode_character_fallback() {
    let (_temp_dir, path) = create_test_vocab();
    let tokenizer = TokenizerHandle::new();
    tokenizer.load(&path).expect("load should succeed");

    // "hi" is not in the vocabulary as a word: h(10) + i(11) + " "(20)
    assert_eq!(tokenizer.encode("hi"), vec![10, 11, 20]);
    // unknown character falls to the sentinel
    assert_eq!(tokenizer.encode("hx"), vec![10, 0, 20]);
}

#[test]
fn test_encode_empty_is_single_element() {
    let (_temp_dir, path) = create_test_vocab();
    let tokenizer = TokenizerHandle::new();
    tokenizer.load(&path).expect("load should succeed");

    assert_eq!(tokenizer.encode(""), vec![0]);
}

#[test]
fn test_encode_deterministic() {
    let (_temp_dir, path) = create_test_vocab();
    let tokenizer = TokenizerHandle::new();
    tokenizer.load(&path).expect("load should succeed");

    let text = "hello hi unknown world";
    assert_eq!(tokenizer.encode(text), tokenizer.encode(text));
}

#[test]
fn test_decode_unknown_id_renders_unk() {
    let (_temp_dir, path) = create_test_vocab();
    let tokenizer = TokenizerHandle::new();
    tokenizer.load(&path).expect("load should succeed");

    let decoded = tokenizer.decode(&[4, 99]);
    assert!(decoded.contains("UNK:99"));
    assert_eq!(decoded, "hello[UNK:99]");
}

#[test]
fn test_sentencepiece_path_degrades_to_placeholder() {
    let tokenizer = TokenizerHandle::new();
    let tag = tokenizer
        .load("models/spiece.model")
        .expect("placeholder load should succeed");

    assert_eq!(tag, FormatTag::SentencePiecePlaceholder);
    assert!(tokenizer.is_loaded());
    assert_eq!(tokenizer.vocab_size(), PLACEHOLDER_VOCAB_SIZE);
}

#[test]
fn test_missing_file_degrades_to_placeholder() {
    let tokenizer = TokenizerHandle::new();
    let tag = tokenizer
        .load("no/such/vocab.txt")
        .expect("placeholder load should succeed");

    assert_eq!(tag, FormatTag::GenericPlaceholder);
    assert_eq!(tokenizer.vocab_size(), PLACEHOLDER_VOCAB_SIZE);
}

#[test]
fn test_malformed_json_degrades_under_permissive_policy() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "not json at all").unwrap();

    let tokenizer = TokenizerHandle::new();
    let tag = tokenizer.load(&path).expect("permissive load should succeed");
    assert_eq!(tag, FormatTag::GenericPlaceholder);
}

#[test]
fn test_malformed_json_fails_under_strict_policy() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "not json at all").unwrap();

    let tokenizer = TokenizerHandle::with_policy(LoadPolicy::Strict);
    let result = tokenizer.load(&path);
    assert!(matches!(result, Err(TokenizationError::ParseError(_))));
    assert!(!tokenizer.is_loaded());
    assert_eq!(tokenizer.vocab_size(), 0);
}

#[test]
fn test_missing_json_fails_under_strict_policy() {
    let tokenizer = TokenizerHandle::with_policy(LoadPolicy::Strict);
    let result = tokenizer.load("no/such/tokenizer.json");
    assert!(matches!(result, Err(TokenizationError::NotFound(_))));
    assert!(!tokenizer.is_loaded());
}

#[test]
fn test_detection_placeholders_succeed_under_strict_policy() {
    // .model and missing unknown-extension paths are placeholder policy,
    // not read failures; strict loading does not reject them
    let tokenizer = TokenizerHandle::with_policy(LoadPolicy::Strict);
    let tag = tokenizer.load("spiece.model").expect("placeholder load");
    assert_eq!(tag, FormatTag::SentencePiecePlaceholder);
}

#[test]
fn test_placeholder_encode_is_bos_plus_bytes() {
    let tokenizer = TokenizerHandle::new();
    tokenizer.load("missing.bin").expect("placeholder load");

    assert_eq!(tokenizer.encode("AB"), vec![1, 65, 66]);
    assert_eq!(tokenizer.encode(""), vec![1]);
}

#[test]
fn test_placeholder_decode_is_debug_rendering() {
    let tokenizer = TokenizerHandle::new();
    tokenizer.load("missing.bin").expect("placeholder load");

    assert_eq!(tokenizer.decode(&[1, 2, 3]), "[1, 2, 3]");
}

#[test]
fn test_load_bpe_uses_vocab_only() {
    let (_temp_dir, vocab_path) = create_test_vocab();
    let merges_path = vocab_path.with_file_name("merges.txt");
    // merges file deliberately absent; it is accepted but never read

    let tokenizer = TokenizerHandle::new();
    let tag = tokenizer
        .load_bpe(&vocab_path, &merges_path)
        .expect("bpe load should succeed");

    assert_eq!(tag, FormatTag::ByteLevelBpe);
    assert_eq!(tokenizer.encode("hello world"), vec![4, 5]);
}

#[test]
fn test_unknown_extension_attempts_json_parse() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vocab.dat");
    fs::write(
        &path,
        r#"{"model": {"vocab": {"hello": 4, "world": 5}}}"#,
    )
    .unwrap();

    let tokenizer = TokenizerHandle::new();
    let tag = tokenizer.load(&path).expect("load should succeed");
    assert_eq!(tag, FormatTag::HuggingFaceJson);
    assert_eq!(tokenizer.vocab_size(), 2);
}

#[test]
fn test_concurrent_load_single_winner() {
    use std::sync::Arc;

    let (_temp_dir, path) = create_test_vocab();
    let tokenizer = Arc::new(TokenizerHandle::new());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tokenizer = tokenizer.clone();
            let path = path.clone();
            std::thread::spawn(move || tokenizer.load(&path).is_ok())
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|&ok| ok)
        .count();

    assert_eq!(successes, 1, "exactly one concurrent load may win");
    assert!(tokenizer.is_loaded());
}
