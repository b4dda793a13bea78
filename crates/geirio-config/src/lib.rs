use std::env;

use serde::{Deserialize, Serialize};

use self::cache::CacheConfig;
use self::lexicon::LexiconConfig;
use self::remote::GpcConfig;
use self::translator::TranslatorConfig;

pub mod cache;
pub mod lexicon;
pub mod remote;
pub mod translator;

/// Which backend answers dictionary lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Bundled offline lexicon.
    Local,
    /// Two-step search+entry against the GPC servlet.
    Remote,
    /// Single-call lookup through the proxy server.
    Proxy,
}

impl ProviderKind {
    fn from_env() -> Self {
        match env::var("GEIRIO_PROVIDER").as_deref() {
            Ok("remote") => ProviderKind::Remote,
            Ok("proxy") => ProviderKind::Proxy,
            _ => ProviderKind::Local,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct Config {
    pub provider: ProviderKind,
    pub gpc: GpcConfig,
    pub translator: TranslatorConfig,
    pub lexicon: LexiconConfig,
    pub cache: CacheConfig,
}

impl Config {
    pub fn new() -> Self {
        Config {
            provider: ProviderKind::from_env(),
            gpc: GpcConfig::new(),
            translator: TranslatorConfig::new(),
            lexicon: LexiconConfig::new(),
            cache: CacheConfig::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
