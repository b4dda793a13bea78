use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use geirio_types::{DefinitionBlock, Lang, MatchCandidate};

use crate::provider::{LookupProvider, ProviderError};

/// The surfaced result of one lookup. `selected`/`definitions` are filled
/// when the provider direction auto-selects the top match; otherwise the
/// caller picks from `matches` and calls
/// [`Orchestrator::fetch_definitions`].
#[derive(Debug)]
pub struct LookupOutcome {
    pub matches: Vec<MatchCandidate>,
    pub selected: Option<MatchCandidate>,
    pub definitions: Vec<DefinitionBlock>,
    generation: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("please enter a word")]
    EmptyQuery,

    #[error("dictionary lookup failed: {0}")]
    Backend(#[from] ProviderError),
}

/// Public entry point of the lookup subsystem.
///
/// No cancellation exists for in-flight requests; instead each lookup takes
/// a generation ticket and [`Orchestrator::is_current`] lets the caller
/// discard a stale result that resolved after a newer lookup started.
pub struct Orchestrator {
    provider: Arc<dyn LookupProvider>,
    generation: AtomicU64,
    in_flight: AtomicBool,
}

impl Orchestrator {
    pub fn new(provider: Arc<dyn LookupProvider>) -> Self {
        Self {
            provider,
            generation: AtomicU64::new(0),
            in_flight: AtomicBool::new(false),
        }
    }

    /// A lookup or entry fetch is outstanding. UI hosts disable duplicate
    /// submission while this holds.
    pub fn in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Whether no newer lookup has started since this outcome's request.
    pub fn is_current(&self, outcome: &LookupOutcome) -> bool {
        outcome.generation == self.generation.load(Ordering::SeqCst)
    }

    pub async fn lookup(&self, query: &str, lang: Lang) -> Result<LookupOutcome, LookupError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(LookupError::EmptyQuery);
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.in_flight.store(true, Ordering::SeqCst);
        let result = self.run_lookup(query, lang, generation).await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn run_lookup(
        &self,
        query: &str,
        lang: Lang,
        generation: u64,
    ) -> Result<LookupOutcome, LookupError> {
        let search = self.provider.search(query, lang).await?;

        if search.matches.is_empty() {
            tracing::debug!(query, %lang, "no match found");
            return Ok(LookupOutcome {
                matches: Vec::new(),
                selected: None,
                definitions: Vec::new(),
                generation,
            });
        }

        if !self.provider.auto_select(lang) {
            return Ok(LookupOutcome {
                matches: search.matches,
                selected: None,
                definitions: Vec::new(),
                generation,
            });
        }

        let selected = search.matches[0].clone();
        let definitions = match search.prefetched {
            Some(prefetched) => prefetched,
            None => self.provider.fetch_entry(&selected, lang).await?,
        };

        Ok(LookupOutcome {
            matches: search.matches,
            selected: Some(selected),
            definitions,
            generation,
        })
    }

    /// Resolve the definitions of an explicitly picked candidate.
    pub async fn fetch_definitions(
        &self,
        candidate: &MatchCandidate,
        lang: Lang,
    ) -> Result<Vec<DefinitionBlock>, LookupError> {
        self.in_flight.store(true, Ordering::SeqCst);
        let result = self.provider.fetch_entry(candidate, lang).await;
        self.in_flight.store(false, Ordering::SeqCst);
        Ok(result?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderSearch;
    use std::sync::atomic::AtomicUsize;

    /// Scripted backend: fixed candidates, countable entry fetches,
    /// remote-style auto-select (Welsh only).
    struct Scripted {
        candidates: Vec<MatchCandidate>,
        prefetched: Option<Vec<DefinitionBlock>>,
        searches: AtomicUsize,
        fetches: AtomicUsize,
    }

    impl Scripted {
        fn with_candidates(candidates: Vec<MatchCandidate>) -> Self {
            Self {
                candidates,
                prefetched: None,
                searches: AtomicUsize::new(0),
                fetches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl LookupProvider for Scripted {
        async fn search(
            &self,
            _query: &str,
            _lang: Lang,
        ) -> Result<ProviderSearch, ProviderError> {
            self.searches.fetch_add(1, Ordering::SeqCst);
            Ok(ProviderSearch {
                matches: self.candidates.clone(),
                prefetched: self.prefetched.clone(),
            })
        }

        async fn fetch_entry(
            &self,
            candidate: &MatchCandidate,
            _lang: Lang,
        ) -> Result<Vec<DefinitionBlock>, ProviderError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(vec![DefinitionBlock::new(format!(
                "definition of {}",
                candidate.headword()
            ))])
        }

        fn auto_select(&self, lang: Lang) -> bool {
            lang == Lang::Welsh
        }
    }

    fn by_id(id: &str, headword: &str) -> MatchCandidate {
        MatchCandidate::ById {
            id: id.into(),
            headword: headword.into(),
        }
    }

    #[tokio::test]
    async fn empty_query_is_rejected_before_any_backend_call() {
        let provider = Arc::new(Scripted::with_candidates(vec![by_id("1", "ci")]));
        let orchestrator = Orchestrator::new(provider.clone());

        let err = orchestrator.lookup("   ", Lang::Welsh).await.unwrap_err();
        assert!(matches!(err, LookupError::EmptyQuery));
        assert_eq!(provider.searches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn zero_candidates_reports_empty_state_without_entry_fetch() {
        let provider = Arc::new(Scripted::with_candidates(Vec::new()));
        let orchestrator = Orchestrator::new(provider.clone());

        let outcome = orchestrator.lookup("ci", Lang::Welsh).await.unwrap();
        assert!(outcome.matches.is_empty());
        assert!(outcome.selected.is_none());
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn welsh_direction_auto_selects_the_top_match() {
        let provider = Arc::new(Scripted::with_candidates(vec![
            by_id("1", "bore"),
            by_id("2", "boreol"),
        ]));
        let orchestrator = Orchestrator::new(provider.clone());

        let outcome = orchestrator.lookup("bore", Lang::Welsh).await.unwrap();
        assert_eq!(outcome.selected, Some(by_id("1", "bore")));
        assert_eq!(outcome.definitions[0].text, "definition of bore");
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn english_direction_requires_an_explicit_pick() {
        let provider = Arc::new(Scripted::with_candidates(vec![
            by_id("1", "morning"),
            by_id("2", "morrow"),
        ]));
        let orchestrator = Orchestrator::new(provider.clone());

        let outcome = orchestrator.lookup("morning", Lang::English).await.unwrap();
        assert_eq!(outcome.matches.len(), 2);
        assert!(outcome.selected.is_none());
        assert!(outcome.definitions.is_empty());
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 0);

        let defs = orchestrator
            .fetch_definitions(&outcome.matches[1], Lang::English)
            .await
            .unwrap();
        assert_eq!(defs[0].text, "definition of morrow");
    }

    #[tokio::test]
    async fn prefetched_definitions_skip_the_entry_fetch() {
        let provider = Arc::new(Scripted {
            candidates: vec![by_id("1", "bore")],
            prefetched: Some(vec![DefinitionBlock::new("morning")]),
            searches: AtomicUsize::new(0),
            fetches: AtomicUsize::new(0),
        });
        let orchestrator = Orchestrator::new(provider.clone());

        let outcome = orchestrator.lookup("bore", Lang::Welsh).await.unwrap();
        assert_eq!(outcome.definitions[0].text, "morning");
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn a_newer_lookup_marks_earlier_outcomes_stale() {
        let provider = Arc::new(Scripted::with_candidates(vec![by_id("1", "ci")]));
        let orchestrator = Orchestrator::new(provider);

        let first = orchestrator.lookup("ci", Lang::Welsh).await.unwrap();
        assert!(orchestrator.is_current(&first));

        let second = orchestrator.lookup("cath", Lang::Welsh).await.unwrap();
        assert!(!orchestrator.is_current(&first));
        assert!(orchestrator.is_current(&second));
    }
}
