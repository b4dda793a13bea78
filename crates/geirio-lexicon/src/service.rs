use std::path::PathBuf;
use std::sync::Arc;

use geirio_config::lexicon::LexiconConfig;
use geirio_types::{Lang, WordRecord};
use tokio::sync::Mutex;

use crate::loader::Lexicon;

/// Process-scoped lexicon holder. The asset is parsed on first use and the
/// result memoized for the process lifetime; a failed load yields an empty
/// table without caching it, so the next call retries.
pub struct LexiconService {
    path: PathBuf,
    cached: Mutex<Option<Arc<Lexicon>>>,
}

impl LexiconService {
    pub fn new(config: &LexiconConfig) -> Self {
        Self::at_path(PathBuf::from(&config.path))
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self {
            path,
            cached: Mutex::new(None),
        }
    }

    pub async fn load(&self) -> Arc<Lexicon> {
        let mut cached = self.cached.lock().await;
        if let Some(lexicon) = cached.as_ref() {
            return Arc::clone(lexicon);
        }

        let loaded = match tokio::fs::read_to_string(&self.path).await {
            Ok(xml) => Lexicon::parse(&xml),
            Err(e) => Err(e.into()),
        };

        match loaded {
            Ok(lexicon) => {
                let lexicon = Arc::new(lexicon);
                *cached = Some(Arc::clone(&lexicon));
                lexicon
            }
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "failed to load lexicon");
                Arc::new(Lexicon::empty())
            }
        }
    }

    pub async fn search(&self, query: &str, lang: Lang) -> Vec<WordRecord> {
        self.load().await.search(query, lang)
    }
}
