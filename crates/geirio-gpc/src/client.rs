use geirio_config::remote::GpcConfig;
use geirio_types::{DefinitionBlock, Lang, MatchCandidate};

use crate::GpcError;
use crate::extract;

/// Client for the GPC dictionary servlet: two-step search + entry fetch.
pub struct GpcClient {
    http: reqwest::Client,
    base_url: String,
    user_token: String,
    max_results: u32,
}

impl GpcClient {
    pub fn new(config: &GpcConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            user_token: config.user_token.clone(),
            max_results: config.max_results,
        }
    }

    /// Search for match candidates in the given direction.
    ///
    /// Returns an empty list when the response yields nothing across all
    /// extraction strategies, except in the Welsh direction where a
    /// synthetic by-term candidate is appended so the entry endpoint can be
    /// asked to resolve the literal query.
    pub async fn search(
        &self,
        query: &str,
        lang: Lang,
    ) -> Result<Vec<MatchCandidate>, GpcError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GpcError::EmptyQuery);
        }

        let url = format!("{}/gpc/servlet", self.base_url);
        let max = self.max_results.to_string();
        let mode = lang.gpc_mode().to_string();
        let body = self
            .http
            .get(&url)
            .query(&[
                ("func", "search"),
                ("str", query),
                ("first", "0"),
                ("max", max.as_str()),
                ("mode", mode.as_str()),
                ("user", self.user_token.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let candidates =
            extract::with_direct_fallback(extract::search_candidates(&body), query, lang);

        tracing::debug!(query, %lang, count = candidates.len(), "gpc search complete");
        Ok(candidates)
    }

    /// Fetch the full entry for a candidate and extract its definitions.
    /// Zero definitions is a legitimate empty outcome, not an error.
    pub async fn fetch_entry(
        &self,
        candidate: &MatchCandidate,
    ) -> Result<Vec<DefinitionBlock>, GpcError> {
        let url = format!("{}/gpc/servlet", self.base_url);
        let request = match candidate {
            MatchCandidate::ById { id, .. } => self.http.get(&url).query(&[
                ("func", "entry"),
                ("id", id.as_str()),
                ("user", self.user_token.as_str()),
            ]),
            MatchCandidate::ByTerm { term } => self.http.get(&url).query(&[
                ("func", "entry"),
                ("str", term.as_str()),
                ("user", self.user_token.as_str()),
            ]),
        };

        let body = request.send().await?.error_for_status()?.text().await?;
        let blocks = extract::definition_blocks(&body);
        tracing::debug!(
            headword = candidate.headword(),
            count = blocks.len(),
            "gpc entry fetched"
        );
        Ok(blocks)
    }
}
