use std::env;

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "assets/dictionary.xml".to_string()
}

/// Bundled offline lexicon settings.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LexiconConfig {
    #[serde(default = "default_path")]
    pub path: String,
}

impl LexiconConfig {
    pub fn new() -> Self {
        let path = env::var("LEXICON_PATH").unwrap_or_else(|_| default_path());
        Self { path }
    }
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}
