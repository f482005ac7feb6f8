//! Suffix-based detection of Latin verb forms.
//!
//! This is a heuristic, not a morphological analyzer: it accepts any word
//! ending in one of the configured endings (infinitives in -are/-ere/-ire,
//! perfects in -avi/-ivi, participles in -atus/-itus) and will misfire on
//! nouns that happen to share those endings.

/// Default verb endings.
pub const LATIN_VERB_SUFFIXES: &[&str] = &["are", "ere", "ire", "avi", "ivi", "atus", "itus"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixClassifier {
    suffixes: Vec<String>,
}

impl Default for SuffixClassifier {
    fn default() -> Self {
        Self::new(LATIN_VERB_SUFFIXES.iter().copied())
    }
}

impl SuffixClassifier {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Whether a lowercase token looks like a verb form.
    pub fn is_verb_like(&self, token: &str) -> bool {
        self.suffixes
            .iter()
            .any(|suffix| token.ends_with(suffix.as_str()))
    }
}
