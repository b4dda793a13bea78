pub mod word;

pub use word::{CachedWord, DefinitionBlock, Lang, MatchCandidate, WordRecord};
