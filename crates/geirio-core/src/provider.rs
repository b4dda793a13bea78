use std::sync::Arc;

use async_trait::async_trait;
use geirio_gpc::{GpcClient, GpcError, ProxyClient};
use geirio_lexicon::LexiconService;
use geirio_types::{DefinitionBlock, Lang, MatchCandidate};

use crate::rank::rank_local;

/// The result of one backend search call. Backends that resolve the entry
/// in the same round trip (the proxy) hand its definitions back here so the
/// orchestrator does not refetch them.
pub struct ProviderSearch {
    pub matches: Vec<MatchCandidate>,
    pub prefetched: Option<Vec<DefinitionBlock>>,
}

impl ProviderSearch {
    pub fn empty() -> Self {
        Self {
            matches: Vec::new(),
            prefetched: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error(transparent)]
    Gpc(#[from] GpcError),
}

/// One interchangeable lookup backend: local lexicon, remote two-step
/// search+entry, or the single-call proxy.
#[async_trait]
pub trait LookupProvider: Send + Sync {
    async fn search(&self, query: &str, lang: Lang) -> Result<ProviderSearch, ProviderError>;

    async fn fetch_entry(
        &self,
        candidate: &MatchCandidate,
        lang: Lang,
    ) -> Result<Vec<DefinitionBlock>, ProviderError>;

    /// Whether the top-ranked match's definitions should be fetched
    /// automatically after a search in this direction.
    fn auto_select(&self, lang: Lang) -> bool;
}

/// Offline provider over the bundled lexicon.
pub struct LocalProvider {
    lexicon: Arc<LexiconService>,
}

impl LocalProvider {
    pub fn new(lexicon: Arc<LexiconService>) -> Self {
        Self { lexicon }
    }
}

#[async_trait]
impl LookupProvider for LocalProvider {
    async fn search(&self, query: &str, lang: Lang) -> Result<ProviderSearch, ProviderError> {
        let records = self.lexicon.search(query, lang).await;
        let ranked = rank_local(records, query, lang);

        // Polysemous headwords appear once in the match list; their senses
        // are all surfaced by the entry fetch.
        let mut matches: Vec<MatchCandidate> = Vec::new();
        for record in &ranked {
            let term = record.field(lang);
            let seen = matches
                .iter()
                .any(|m| m.headword().eq_ignore_ascii_case(term));
            if !seen {
                matches.push(MatchCandidate::ByTerm {
                    term: term.to_string(),
                });
            }
        }

        Ok(ProviderSearch {
            matches,
            prefetched: None,
        })
    }

    async fn fetch_entry(
        &self,
        candidate: &MatchCandidate,
        lang: Lang,
    ) -> Result<Vec<DefinitionBlock>, ProviderError> {
        let headword = candidate.headword();
        let definitions = self
            .lexicon
            .search(headword, lang)
            .await
            .into_iter()
            .filter(|r| r.field(lang).eq_ignore_ascii_case(headword))
            .map(|r| DefinitionBlock {
                text: r.field(lang.opposite()).to_string(),
                part_of_speech: r.part_of_speech,
            })
            .collect();
        Ok(definitions)
    }

    fn auto_select(&self, _lang: Lang) -> bool {
        true
    }
}

/// Two-step provider against the GPC servlet.
pub struct RemoteProvider {
    client: GpcClient,
}

impl RemoteProvider {
    pub fn new(client: GpcClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LookupProvider for RemoteProvider {
    async fn search(&self, query: &str, lang: Lang) -> Result<ProviderSearch, ProviderError> {
        let matches = self.client.search(query, lang).await?;
        Ok(ProviderSearch {
            matches,
            prefetched: None,
        })
    }

    async fn fetch_entry(
        &self,
        candidate: &MatchCandidate,
        _lang: Lang,
    ) -> Result<Vec<DefinitionBlock>, ProviderError> {
        Ok(self.client.fetch_entry(candidate).await?)
    }

    // English searches routinely return many senses; auto-selecting one
    // would be misleading, so the user picks explicitly.
    fn auto_select(&self, lang: Lang) -> bool {
        lang == Lang::Welsh
    }
}

/// Single-call provider through the proxy server. The proxy resolves the
/// entry itself, so its definitions arrive prefetched.
pub struct ProxyProvider {
    client: ProxyClient,
}

impl ProxyProvider {
    pub fn new(client: ProxyClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LookupProvider for ProxyProvider {
    async fn search(&self, query: &str, lang: Lang) -> Result<ProviderSearch, ProviderError> {
        match self.client.lookup(query, lang).await {
            Ok(lookup) => Ok(ProviderSearch {
                matches: vec![lookup.candidate],
                prefetched: Some(lookup.definitions),
            }),
            // The proxy reports no-match as an error envelope; to the
            // orchestrator it is a legitimate empty outcome.
            Err(GpcError::NoMatch) => Ok(ProviderSearch::empty()),
            Err(e) => Err(e.into()),
        }
    }

    async fn fetch_entry(
        &self,
        candidate: &MatchCandidate,
        lang: Lang,
    ) -> Result<Vec<DefinitionBlock>, ProviderError> {
        // The proxy only resolves by word, so re-lookup by headword.
        match self.client.lookup(candidate.headword(), lang).await {
            Ok(lookup) => Ok(lookup.definitions),
            Err(GpcError::NoMatch) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn auto_select(&self, _lang: Lang) -> bool {
        true
    }
}
