//! Persistent saved-word store: a single JSON document holding a flat,
//! insertion-ordered list of [`CachedWord`] records.
//!
//! Every operation is a full read-modify-write round trip; nothing holds a
//! writable handle between operations. Reads degrade gracefully (corrupt or
//! missing payloads are an empty list); writes and clears surface failures,
//! since silently losing a save would be worse than an explicit error.

use std::path::PathBuf;

use geirio_config::cache::CacheConfig;
use geirio_translate::Translator;
use geirio_types::{CachedWord, DefinitionBlock, Lang};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const STORE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    words: Vec<CachedWord>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write word store: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize word store: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub struct WordStore {
    path: PathBuf,
}

impl WordStore {
    pub fn new(config: &CacheConfig) -> Self {
        Self::at_path(PathBuf::from(&config.path))
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// All saved words in insertion order. Missing or corrupt payloads are
    /// an empty list, never an error.
    pub async fn get_all(&self) -> Vec<CachedWord> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read word store");
                return Vec::new();
            }
        };

        match parse_store(&raw) {
            Some(words) => words,
            None => {
                tracing::warn!(path = %self.path.display(), "corrupt word store, treating as empty");
                Vec::new()
            }
        }
    }

    /// Append a word unless one with the same Welsh headword already
    /// exists (trimmed, case-insensitive). First write wins; a duplicate
    /// add is a silent no-op returning `false`.
    pub async fn add(&self, word: CachedWord) -> Result<bool, StoreError> {
        let mut words = self.get_all().await;

        let exists = words.iter().any(|existing| same_welsh(existing, &word));
        if exists {
            tracing::debug!(welsh = ?word.welsh, "word already cached, skipping");
            return Ok(false);
        }

        words.push(word);
        self.persist(&words).await?;
        Ok(true)
    }

    /// Save a word, first backfilling its missing language side through the
    /// translator. The synthesized definition uses the side opposite the
    /// user's search direction. A translation miss falls back to a plain
    /// save.
    pub async fn add_with_translation(
        &self,
        word: CachedWord,
        preferred: Lang,
        translator: &dyn Translator,
    ) -> Result<bool, StoreError> {
        let mut word = word;
        fill_missing_side(&mut word, translator).await;

        if word.definitions.as_ref().is_none_or(|d| d.is_empty()) {
            let gloss = word.side(preferred.opposite()).map(str::to_string);
            if let Some(gloss) = gloss {
                word.definitions = Some(vec![DefinitionBlock::new(gloss)]);
            }
        }

        self.add(word).await
    }

    /// Fill the missing language side of every saved word that has exactly
    /// one side, marking those records as machine-translated. The whole
    /// rewritten list is persisted once at the end. Returns the number of
    /// fields filled.
    pub async fn backfill_missing_translations(
        &self,
        translator: &dyn Translator,
    ) -> Result<usize, StoreError> {
        let mut words = self.get_all().await;
        let mut filled = 0;

        // Strictly sequential: respects the provider rate limit and keeps
        // the final bulk persist consistent.
        for word in &mut words {
            let changed = fill_missing_side(word, translator).await;
            if !changed {
                continue;
            }
            filled += 1;

            if word.definitions.as_ref().is_none_or(|d| d.is_empty()) {
                let gloss = word
                    .english
                    .clone()
                    .or_else(|| word.welsh.clone());
                if let Some(gloss) = gloss {
                    word.definitions = Some(vec![DefinitionBlock::new(gloss)]);
                }
            }
        }

        if filled > 0 {
            self.persist(&words).await?;
        }
        tracing::info!(filled, "translation backfill complete");
        Ok(filled)
    }

    /// Delete the persisted collection entirely. Unlike reads, a failure
    /// here is surfaced to the caller.
    pub async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, words: &[CachedWord]) -> Result<(), StoreError> {
        let file = StoreFile {
            version: STORE_VERSION,
            words: words.to_vec(),
        };
        let json = serde_json::to_string(&file)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

/// Tolerant read: the current versioned envelope or the legacy bare array.
fn parse_store(raw: &str) -> Option<Vec<CachedWord>> {
    let value: Value = serde_json::from_str(raw).ok()?;
    match value {
        Value::Array(_) => serde_json::from_value(value).ok(),
        Value::Object(_) => serde_json::from_value::<StoreFile>(value)
            .ok()
            .map(|f| f.words),
        _ => None,
    }
}

fn same_welsh(a: &CachedWord, b: &CachedWord) -> bool {
    match (&a.welsh, &b.welsh) {
        (Some(a), Some(b)) => a.trim().to_lowercase() == b.trim().to_lowercase(),
        _ => false,
    }
}

/// Translate the missing side of a one-sided record in place. Returns
/// whether a field was filled. Records missing both sides cannot be
/// backfilled and are left untouched.
async fn fill_missing_side(word: &mut CachedWord, translator: &dyn Translator) -> bool {
    let (source, from) = match (&word.welsh, &word.english) {
        (Some(welsh), None) => (welsh.clone(), Lang::Welsh),
        (None, Some(english)) => (english.clone(), Lang::English),
        _ => return false,
    };

    match translator.translate(&source, from, from.opposite()).await {
        Some(translation) => {
            word.set_side(from.opposite(), translation);
            word.is_translated = Some(true);
            true
        }
        None => false,
    }
}
