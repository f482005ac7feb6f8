use rustc_hash::FxHashSet;

/// Latin function words that never carry vocabulary weight.
pub const LATIN_STOPWORDS: &[&str] = &[
    "et", "in", "non", "est", "ad", "cum", "ex", "de", "ut", "sed", "si", "quod", "a", "ab", "per",
    "sine", "pro", "ante", "post", "inter", "sub", "super", "contra", "apud",
];

/// Words seen this many times or fewer in a batch are folded into the stopwords.
pub const RARE_WORD_THRESHOLD: u32 = 2;

/// A set of words to exclude from frequency tables.
///
/// The seed is a constant. Batch-local extensions produce a new set and
/// never touch the seed, so every batch starts from the same state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopwordSet {
    words: FxHashSet<String>,
}

impl StopwordSet {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn latin() -> Self {
        Self::from_words(LATIN_STOPWORDS.iter().copied())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Seed plus every word whose batch count is at most [`RARE_WORD_THRESHOLD`].
    pub fn extended_with_rare<'a>(&self, counts: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        let mut words = self.words.clone();
        words.extend(
            counts
                .into_iter()
                .filter(|(_, count)| *count <= RARE_WORD_THRESHOLD)
                .map(|(word, _)| word.to_string()),
        );
        Self { words }
    }
}
