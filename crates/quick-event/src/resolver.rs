//! The date/time resolver seam.
//!
//! Recognizing "next Tuesday at 1" inside free text is a capability, not a
//! fixed algorithm: the parser asks a [`DateTimeResolver`] for ranked
//! candidates and works with whichever one comes first. Resolvers are picked
//! per language code through a [`ResolverRegistry`]; the registry ships with
//! the English grammar from [`crate::temporal`] and falls back to it for any
//! language nobody registered.

use std::collections::HashMap;
use std::fmt;

use chrono::DateTime;
use chrono_tz::Tz;

use crate::temporal::EnglishResolver;

/// Language used when the caller does not ask for one, or asks for one that
/// has no registered resolver.
pub const DEFAULT_LANGUAGE: &str = "en";

/// One date/time span recognized in a piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct DateCandidate {
    /// Start of the span. `None` when the phrase was recognized but names a
    /// local time that does not exist (e.g. inside a DST gap).
    pub start: Option<DateTime<Tz>>,
    /// End of the span when the phrase was a range ("1pm to 2pm").
    pub end: Option<DateTime<Tz>>,
    /// The literal substring of the input that produced this candidate.
    pub matched_span: String,
    /// Byte offset of `matched_span` within the input.
    pub offset: usize,
}

impl DateCandidate {
    /// Byte range of the match within the resolved text.
    pub fn span(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.matched_span.len()
    }
}

/// Finds date/time phrases in free text.
///
/// `reference` is "now" expressed in the caller's timezone; relative phrases
/// ("tomorrow", "in 2 hours") resolve against it and wall-clock phrases
/// ("2pm") are interpreted in its timezone. Candidates are returned best
/// first; an empty vector means nothing was recognized.
pub trait DateTimeResolver: Send + Sync {
    fn resolve(&self, text: &str, reference: &DateTime<Tz>) -> Vec<DateCandidate>;
}

/// Language-code dispatch for resolvers.
pub struct ResolverRegistry {
    resolvers: HashMap<String, Box<dyn DateTimeResolver>>,
}

impl ResolverRegistry {
    /// An empty registry. [`ResolverRegistry::resolver_for`] on an empty
    /// registry still answers with the built-in English resolver.
    pub fn empty() -> Self {
        Self {
            resolvers: HashMap::new(),
        }
    }

    /// Register `resolver` for `language` (e.g. `"fr"`), replacing any
    /// previous registration.
    pub fn register(&mut self, language: &str, resolver: Box<dyn DateTimeResolver>) {
        self.resolvers
            .insert(normalize_language(language), resolver);
    }

    /// Whether a resolver is registered for exactly this language.
    pub fn supports(&self, language: &str) -> bool {
        self.resolvers.contains_key(&normalize_language(language))
    }

    /// The resolver for `language`. Region subtags are ignored (`en-GB`
    /// resolves as `en`); unknown languages fall back to
    /// [`DEFAULT_LANGUAGE`].
    pub fn resolver_for(&self, language: &str) -> &dyn DateTimeResolver {
        let code = normalize_language(language);
        if let Some(resolver) = self.resolvers.get(&code) {
            return resolver.as_ref();
        }
        tracing::debug!(language = %code, "no resolver registered, using default language");
        match self.resolvers.get(DEFAULT_LANGUAGE) {
            Some(resolver) => resolver.as_ref(),
            None => &EnglishResolver,
        }
    }
}

impl Default for ResolverRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(DEFAULT_LANGUAGE, Box::new(EnglishResolver));
        registry
    }
}

impl fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut languages: Vec<&String> = self.resolvers.keys().collect();
        languages.sort();
        f.debug_struct("ResolverRegistry")
            .field("languages", &languages)
            .finish()
    }
}

/// Lowercase the primary subtag of a BCP 47-ish code: `"en-US"` → `"en"`.
fn normalize_language(language: &str) -> String {
    let primary = language
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default();
    if primary.is_empty() {
        DEFAULT_LANGUAGE.to_string()
    } else {
        primary.to_ascii_lowercase()
    }
}
