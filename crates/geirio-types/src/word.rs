use serde::{Deserialize, Serialize};

/// Search direction. Welsh headwords map to GPC mode 1, English to mode 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Welsh,
    English,
}

impl Lang {
    pub fn opposite(self) -> Lang {
        match self {
            Lang::Welsh => Lang::English,
            Lang::English => Lang::Welsh,
        }
    }

    /// Direction flag used by the GPC search servlet.
    pub fn gpc_mode(self) -> u8 {
        match self {
            Lang::Welsh => 1,
            Lang::English => 2,
        }
    }

    /// ISO 639-1 code used by the translation providers.
    pub fn translation_code(self) -> &'static str {
        match self {
            Lang::Welsh => "cy",
            Lang::English => "en",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Lang::Welsh => "welsh",
            Lang::English => "english",
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "welsh" | "cy" | "cymraeg" => Ok(Lang::Welsh),
            "english" | "en" => Ok(Lang::English),
            other => Err(format!("unknown language: {other} (expected welsh or english)")),
        }
    }
}

/// One lexicon or remote-derived sense pair. Multiple records may share a
/// `welsh` value; polysemy is kept, not collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub welsh: String,
    pub english: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub part_of_speech: Option<String>,
}

impl WordRecord {
    /// The side of the pair matching the given search direction.
    pub fn field(&self, lang: Lang) -> &str {
        match lang {
            Lang::Welsh => &self.welsh,
            Lang::English => &self.english,
        }
    }
}

/// A search-result handle held between the search call and the entry fetch.
///
/// `ById` carries the backend-assigned opaque id (not stable across
/// sessions). `ByTerm` asks the entry endpoint to resolve a literal term
/// instead, used when the search response yielded no usable id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MatchCandidate {
    ById { id: String, headword: String },
    ByTerm { term: String },
}

impl MatchCandidate {
    pub fn headword(&self) -> &str {
        match self {
            MatchCandidate::ById { headword, .. } => headword,
            MatchCandidate::ByTerm { term } => term,
        }
    }
}

/// One sense/gloss of an entry. Only the first block of an entry carries the
/// part-of-speech tag; later blocks leave it unset.
///
/// Serde names (`defText`, `pos`) match the persisted cache format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionBlock {
    #[serde(rename = "defText")]
    pub text: String,
    #[serde(rename = "pos", skip_serializing_if = "Option::is_none", default)]
    pub part_of_speech: Option<String>,
}

impl DefinitionBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            part_of_speech: None,
        }
    }

    pub fn with_pos(text: impl Into<String>, pos: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            part_of_speech: Some(pos.into()),
        }
    }
}

/// A saved word as persisted on device. At least one of `welsh`/`english`
/// should be present for the record to be meaningful; the store does not
/// enforce this. `is_translated` marks that the missing side was filled in
/// by the translation backfill rather than observed from a dictionary
/// source, a distinction surfaced to the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CachedWord {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub welsh: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub english: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub definitions: Option<Vec<DefinitionBlock>>,
    #[serde(
        rename = "isTranslated",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub is_translated: Option<bool>,
}

impl CachedWord {
    /// Both sides of the language pair are populated.
    pub fn is_complete(&self) -> bool {
        self.welsh.is_some() && self.english.is_some()
    }

    pub fn side(&self, lang: Lang) -> Option<&str> {
        match lang {
            Lang::Welsh => self.welsh.as_deref(),
            Lang::English => self.english.as_deref(),
        }
    }

    pub fn set_side(&mut self, lang: Lang, value: String) {
        match lang {
            Lang::Welsh => self.welsh = Some(value),
            Lang::English => self.english = Some(value),
        }
    }
}
