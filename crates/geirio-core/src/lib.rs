pub mod orchestrator;
pub mod provider;
pub mod rank;

pub use orchestrator::{LookupError, LookupOutcome, Orchestrator};
pub use provider::{
    LocalProvider, LookupProvider, ProviderError, ProviderSearch, ProxyProvider, RemoteProvider,
};
