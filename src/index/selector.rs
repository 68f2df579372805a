//! Engine selection from configuration.

use super::{BoundedKGramIndex, ContactIndex, HybridIndex, SubstringIndex};
use crate::ids::IdGenerator;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

/// The available index strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EngineKind {
    /// Every substring, case-sensitive
    Substring,
    /// Substrings up to 10 chars with a reverse index
    #[default]
    BoundedKGram,
    /// Multi-size n-grams intersected with delimiter tokens
    Hybrid,
}

impl EngineKind {
    pub const ALL: [EngineKind; 3] = [Self::Substring, Self::BoundedKGram, Self::Hybrid];

    /// The configuration value naming this engine.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Substring => "full_tokenization",
            Self::BoundedKGram => "k_gram_plus_inverted_index",
            Self::Hybrid => "k_gram_plus_partial_tokenization",
        }
    }

    /// Resolve a configuration value, falling back to the default engine for
    /// anything unrecognised.
    pub fn from_config(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            let fallback = Self::default();
            warn!(
                value = %value,
                fallback = fallback.as_str(),
                "Unknown index engine, using default"
            );
            fallback
        })
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| format!("unknown index engine: {}", s))
    }
}

/// Build the engine that will back the directory for the life of the process.
pub fn build_index(kind: EngineKind, ids: Arc<dyn IdGenerator>) -> Arc<dyn ContactIndex> {
    info!(engine = kind.as_str(), "Building contact index");
    match kind {
        EngineKind::Substring => Arc::new(SubstringIndex::new(ids)),
        EngineKind::BoundedKGram => Arc::new(BoundedKGramIndex::new(ids)),
        EngineKind::Hybrid => Arc::new(HybridIndex::new(ids)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialGenerator;

    #[test]
    fn test_parse_config_values() {
        assert_eq!(
            "full_tokenization".parse::<EngineKind>(),
            Ok(EngineKind::Substring)
        );
        assert_eq!(
            "K_GRAM_PLUS_INVERTED_INDEX".parse::<EngineKind>(),
            Ok(EngineKind::BoundedKGram)
        );
        assert_eq!(
            " k_gram_plus_partial_tokenization ".parse::<EngineKind>(),
            Ok(EngineKind::Hybrid)
        );
        assert!("trie".parse::<EngineKind>().is_err());
    }

    #[test]
    fn test_from_config_falls_back() {
        assert_eq!(EngineKind::from_config("trie"), EngineKind::BoundedKGram);
        assert_eq!(EngineKind::from_config(""), EngineKind::BoundedKGram);
        assert_eq!(
            EngineKind::from_config("Full_Tokenization"),
            EngineKind::Substring
        );
    }

    #[test]
    fn test_build_index_matches_kind() {
        for kind in EngineKind::ALL {
            let index = build_index(kind, Arc::new(SequentialGenerator::default()));
            assert_eq!(index.kind(), kind);
            assert!(index.is_empty());
        }
    }
}
