use geirio_types::Lang;

pub mod limiter;
pub mod mymemory;
pub mod service;

pub use service::TranslationService;

/// Translation provider interface. Absence of a translation is a
/// legitimate outcome, not an error; callers leave the field blank.
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate one term, or `None` when no trusted translation exists.
    async fn translate(&self, text: &str, from: Lang, to: Lang) -> Option<String>;

    /// Translate a list sequentially, preserving one-to-one output ordering
    /// including absent entries. Sequential on purpose: the primary
    /// provider is rate limited.
    async fn translate_batch(&self, texts: &[String], from: Lang, to: Lang) -> Vec<Option<String>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.translate(text, from, to).await);
        }
        results
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("provider error: {0}")]
    Api(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Echoes uppercase for even-indexed calls, absent for odd ones.
    struct Alternating(std::sync::atomic::AtomicUsize);

    #[async_trait::async_trait]
    impl Translator for Alternating {
        async fn translate(&self, text: &str, _from: Lang, _to: Lang) -> Option<String> {
            let n = self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            (n % 2 == 0).then(|| text.to_uppercase())
        }
    }

    #[tokio::test]
    async fn batch_preserves_order_including_absent_entries() {
        let t = Alternating(std::sync::atomic::AtomicUsize::new(0));
        let texts = vec!["un".to_string(), "dau".to_string(), "tri".to_string()];
        let out = t.translate_batch(&texts, Lang::Welsh, Lang::English).await;
        assert_eq!(
            out,
            vec![Some("UN".to_string()), None, Some("TRI".to_string())]
        );
    }
}
