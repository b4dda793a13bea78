use std::collections::HashMap;
use std::time::Duration;

use geirio_config::translator::TranslatorConfig;
use geirio_types::Lang;
use serde_json::json;

use crate::limiter::RateLimiter;
use crate::mymemory::{self, MyMemoryResponse};
use crate::{TranslateError, Translator};

/// Hard-corrections for terms the primary provider is known to mangle.
/// Checked before any network call.
const OVERRIDES: &[(&str, &str)] = &[("cymru", "Wales")];

/// Welsh/English translation backed by MyMemory with a LibreTranslate
/// fallback. Resolution order: override table, primary (filtered), then
/// fallback with the full text. Every stage may yield nothing.
pub struct TranslationService {
    http: reqwest::Client,
    mymemory_url: String,
    libretranslate_url: String,
    limiter: RateLimiter,
    overrides: HashMap<String, String>,
}

impl TranslationService {
    pub fn new(config: &TranslatorConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            mymemory_url: config.mymemory_url.clone(),
            libretranslate_url: config.libretranslate_url.clone(),
            limiter: RateLimiter::new(Duration::from_millis(config.rate_limit_ms)),
            overrides: OVERRIDES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    async fn primary(
        &self,
        text: &str,
        from: Lang,
        to: Lang,
    ) -> Result<Option<String>, TranslateError> {
        self.limiter.wait().await;

        let langpair = format!("{}|{}", from.translation_code(), to.translation_code());
        let response: MyMemoryResponse = self
            .http
            .get(&self.mymemory_url)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(mymemory::best_match(&response.matches, text))
    }

    async fn fallback(
        &self,
        text: &str,
        from: Lang,
        to: Lang,
    ) -> Result<Option<String>, TranslateError> {
        let body = json!({
            "q": text,
            "source": from.translation_code(),
            "target": to.translation_code(),
            "format": "text",
        });

        let response: serde_json::Value = self
            .http
            .post(&self.libretranslate_url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response
            .get("translatedText")
            .and_then(|t| t.as_str())
            .map(str::to_string)
            .filter(|t| !t.is_empty()))
    }
}

#[async_trait::async_trait]
impl Translator for TranslationService {
    async fn translate(&self, text: &str, from: Lang, to: Lang) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Some(fixed) = self.overrides.get(&text.to_lowercase()) {
            return Some(fixed.clone());
        }

        match self.primary(text, from, to).await {
            Ok(Some(translation)) => return Some(translation),
            Ok(None) => {
                tracing::debug!(text, "no accepted primary match, trying fallback");
            }
            Err(e) => {
                tracing::warn!(text, error = %e, "primary translation failed, trying fallback");
            }
        }

        match self.fallback(text, from, to).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(text, error = %e, "fallback translation failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_service() -> TranslationService {
        // Ports that refuse connection; only the override path may pass.
        TranslationService::new(&TranslatorConfig {
            mymemory_url: "http://127.0.0.1:1/get".into(),
            libretranslate_url: "http://127.0.0.1:1/translate".into(),
            rate_limit_ms: 0,
        })
    }

    #[tokio::test]
    async fn override_table_short_circuits_without_network() {
        let service = unreachable_service();
        let result = service.translate("Cymru", Lang::Welsh, Lang::English).await;
        assert_eq!(result.as_deref(), Some("Wales"));
    }

    #[tokio::test]
    async fn blank_input_yields_none_without_network() {
        let service = unreachable_service();
        assert_eq!(service.translate("   ", Lang::Welsh, Lang::English).await, None);
    }

    #[tokio::test]
    async fn unreachable_providers_yield_none_not_panic() {
        let service = unreachable_service();
        assert_eq!(service.translate("bore", Lang::Welsh, Lang::English).await, None);
    }
}
