//! Analyzer resolution.
//!
//! Maps the owner-level analyzer identifier onto a finite registry of
//! tantivy text-analysis pipelines. Resolution never fails: an
//! identifier that matches nothing falls back to the standard
//! pipeline with a warning.
//!
//! Identifiers are accepted in two forms:
//!
//! - a registry name as-is (`standard`, `english`, ...)
//! - a qualified or suffixed name that normalizes to a registry name
//!   (`org.apache.lucene.analysis.standard.StandardAnalyzer`,
//!   `SimpleAnalyzer`, `tantivy::English`)

use tantivy::tokenizer::{
    Language, LowerCaser, RawTokenizer, RemoveLongFilter, SimpleTokenizer, Stemmer,
    StopWordFilter, TextAnalyzer, WhitespaceTokenizer,
};
use tantivy::Index;

/// Name under which the resolved analyzer is registered on every index
pub const CONTENT_TOKENIZER: &str = "blogdex_content";

/// Strategy used when nothing else resolves
pub const DEFAULT_ANALYZER: &str = "standard";

/// Tokens longer than this are dropped by the standard pipelines
const MAX_TOKEN_LEN: usize = 40;

type AnalyzerFactory = fn() -> TextAnalyzer;

/// Registry of named strategies
const STRATEGIES: &[(&str, AnalyzerFactory)] = &[
    ("standard", standard),
    ("simple", simple),
    ("whitespace", whitespace),
    ("english", english),
    ("stop", stop),
    ("keyword", keyword),
];

fn standard() -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LEN))
        .filter(LowerCaser)
        .build()
}

fn simple() -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .build()
}

fn whitespace() -> TextAnalyzer {
    TextAnalyzer::builder(WhitespaceTokenizer::default())
        .filter(LowerCaser)
        .build()
}

fn english() -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LEN))
        .filter(LowerCaser)
        .filter(english_stop_words())
        .filter(Stemmer::new(Language::English))
        .build()
}

fn stop() -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LEN))
        .filter(LowerCaser)
        .filter(english_stop_words())
        .build()
}

fn keyword() -> TextAnalyzer {
    TextAnalyzer::from(RawTokenizer::default())
}

fn english_stop_words() -> StopWordFilter {
    StopWordFilter::new(Language::English)
        .unwrap_or_else(|| StopWordFilter::remove(Vec::<String>::new()))
}

/// A resolved analyzer together with how it was resolved
#[derive(Clone)]
pub struct ResolvedAnalyzer {
    /// Identifier as configured
    pub requested: String,

    /// Registry name actually used
    pub name: &'static str,

    /// True when the identifier did not resolve and the default was used
    pub fell_back: bool,

    analyzer: TextAnalyzer,
}

impl std::fmt::Debug for ResolvedAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedAnalyzer")
            .field("requested", &self.requested)
            .field("name", &self.name)
            .field("fell_back", &self.fell_back)
            .finish_non_exhaustive()
    }
}

impl ResolvedAnalyzer {
    /// Fresh handle on the analyzer pipeline
    pub fn analyzer(&self) -> TextAnalyzer {
        self.analyzer.clone()
    }

    /// Register the analyzer on an index under [`CONTENT_TOKENIZER`].
    ///
    /// Tokenizers are not persisted by tantivy, so this must run every
    /// time an index is opened, for writing and for querying alike.
    pub fn register(&self, index: &Index) {
        index
            .tokenizers()
            .register(CONTENT_TOKENIZER, self.analyzer.clone());
    }
}

/// Resolves analyzer identifiers against the strategy registry
pub struct AnalyzerResolver;

impl AnalyzerResolver {
    /// Resolve an identifier, falling back to the standard analyzer.
    pub fn resolve(identifier: &str) -> ResolvedAnalyzer {
        if let Some((name, factory)) = Self::lookup(identifier) {
            return Self::resolved(identifier, name, factory, false);
        }

        let normalized = Self::normalize(identifier);
        if let Some((name, factory)) = Self::lookup(&normalized) {
            tracing::debug!(
                "Analyzer '{}' resolved as '{}' after normalization",
                identifier,
                name
            );
            return Self::resolved(identifier, name, factory, false);
        }

        tracing::warn!(
            "Analyzer '{}' not found, using {} analyzer",
            identifier,
            DEFAULT_ANALYZER
        );
        Self::resolved(identifier, DEFAULT_ANALYZER, standard, true)
    }

    /// Names of all registered strategies
    pub fn strategy_names() -> Vec<&'static str> {
        STRATEGIES.iter().map(|(name, _)| *name).collect()
    }

    /// Reduce a qualified identifier to a candidate registry name.
    ///
    /// Takes the last segment after `.`, `::` or `/`, lowercases it and
    /// strips a trailing `analyzer`.
    pub fn normalize(identifier: &str) -> String {
        let last = identifier
            .trim()
            .rsplit(|c: char| c == '.' || c == ':' || c == '/')
            .find(|segment| !segment.is_empty())
            .unwrap_or("");

        let lower = last.to_lowercase();
        match lower.strip_suffix("analyzer") {
            Some(stem) if !stem.is_empty() => stem.to_string(),
            _ => lower,
        }
    }

    fn lookup(name: &str) -> Option<(&'static str, AnalyzerFactory)> {
        STRATEGIES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .copied()
    }

    fn resolved(
        requested: &str,
        name: &'static str,
        factory: AnalyzerFactory,
        fell_back: bool,
    ) -> ResolvedAnalyzer {
        ResolvedAnalyzer {
            requested: requested.to_string(),
            name,
            fell_back,
            analyzer: factory(),
        }
    }
}
