pub mod loader;
pub mod service;

pub use loader::{Lexicon, LexiconError};
pub use service::LexiconService;
