pub mod text_cleanup;

#[derive(
    Clone, Debug, serde::Serialize, serde::Deserialize, Hash, Eq, PartialEq, Ord, PartialOrd, Copy,
)]
pub enum PartOfSpeech {
    #[serde(rename = "ADJ")]
    Adj, // adjective
    #[serde(rename = "ADP")]
    Adp, // adposition
    #[serde(rename = "ADV")]
    Adv, // adverb
    #[serde(rename = "AUX")]
    Aux, // auxiliary
    #[serde(rename = "CCONJ")]
    Cconj, // coordinating conjunction
    #[serde(rename = "DET")]
    Det, // determiner
    #[serde(rename = "INTJ")]
    Intj, // interjection
    #[serde(rename = "NOUN")]
    Noun, // noun
    #[serde(rename = "NUM")]
    Num, // numeral
    #[serde(rename = "PART")]
    Part, // particle
    #[serde(rename = "PRON")]
    Pron, // pronoun
    #[serde(rename = "PROPN")]
    Propn, // proper noun
    #[serde(rename = "PUNCT")]
    Punct, // punctuation
    #[serde(rename = "SCONJ")]
    Sconj, // subordinating conjunction
    #[serde(rename = "SYM")]
    Sym, // symbol
    #[serde(rename = "VERB")]
    Verb, // verb
    #[serde(rename = "SPACE")]
    Space, // space
    #[serde(rename = "X")]
    X, // other
}

#[derive(
    Copy, Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq, Ord, PartialOrd, Hash,
)]
pub enum Language {
    Latin,
    English,
    Spanish,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Latin => write!(f, "Latin"),
            Language::English => write!(f, "English"),
            Language::Spanish => write!(f, "Spanish"),
        }
    }
}

/// One scraped row: a Latin phrase, its English translation and any notes.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq, Hash)]
pub struct PhraseRecord {
    #[serde(alias = "latin_phrase")]
    pub source_phrase: String,
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PhraseRecord {
    pub fn new(source_phrase: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            source_phrase: source_phrase.into(),
            translation: translation.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq, Hash)]
pub struct FrequencyEntry {
    pub term: String,
    pub count: u32,
}

/// Terms ranked by descending count, ties in first-seen order.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FrequencyTable(Vec<FrequencyEntry>);

impl FrequencyTable {
    /// Ranks `(term, count)` pairs given in first-seen order and keeps the top `limit`.
    pub fn ranked(counts: impl IntoIterator<Item = (String, u32)>, limit: usize) -> Self {
        let mut entries: Vec<FrequencyEntry> = counts
            .into_iter()
            .map(|(term, count)| FrequencyEntry { term, count })
            .collect();
        // stable sort, so equal counts keep their first-seen order
        entries.sort_by_key(|entry| std::cmp::Reverse(entry.count));
        entries.truncate(limit);
        Self(entries)
    }

    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn count_of(&self, term: &str) -> Option<u32> {
        self.0
            .iter()
            .find(|entry| entry.term == term)
            .map(|entry| entry.count)
    }

    /// The first `n` terms, most frequent first.
    pub fn top_terms(&self, n: usize) -> Vec<String> {
        self.0.iter().take(n).map(|entry| entry.term.clone()).collect()
    }
}

/// A token as returned by the external tagging service.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct NlpToken {
    pub text: String,
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub is_alpha: bool,
    pub is_stop: bool,
}
