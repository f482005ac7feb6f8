use indexmap::IndexMap;
use language_utils::text_cleanup::ascii_words;
use language_utils::{FrequencyTable, NlpToken, PartOfSpeech, PhraseRecord};

use crate::morphology::SuffixClassifier;
use crate::stopwords::StopwordSet;

/// Shorter tokens are dropped before counting.
pub const MIN_TOKEN_LEN: usize = 3;
pub const WORD_LIMIT: usize = 20;
pub const VERB_LIMIT: usize = 10;

/// Word and verb rankings for one language of the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct LanguageFrequencies {
    pub words: FrequencyTable,
    pub verbs: FrequencyTable,
}

/// All source phrases of the batch joined into one text.
pub fn source_corpus(records: &[PhraseRecord]) -> String {
    records
        .iter()
        .map(|record| record.source_phrase.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// All translations of the batch joined into one text.
pub fn target_corpus(records: &[PhraseRecord]) -> String {
    records
        .iter()
        .map(|record| record.translation.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Count terms, remembering the order in which each was first seen.
fn count_terms<'a>(terms: impl IntoIterator<Item = &'a str>) -> IndexMap<&'a str, u32> {
    let mut counts: IndexMap<&str, u32> = IndexMap::new();
    for term in terms {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

fn rank<'a>(terms: impl IntoIterator<Item = &'a str>, limit: usize) -> FrequencyTable {
    FrequencyTable::ranked(
        count_terms(terms)
            .into_iter()
            .map(|(term, count)| (term.to_string(), count)),
        limit,
    )
}

/// Compute source-language frequencies.
///
/// Words seen at most twice in this batch are treated as stopwords on top
/// of `seed`, so only recurring vocabulary is ranked. Verb candidates are
/// picked from the same filtered tokens by suffix.
pub fn compute_source_frequencies(
    corpus: &str,
    seed: &StopwordSet,
    classifier: &SuffixClassifier,
) -> LanguageFrequencies {
    let tokens = ascii_words(corpus, MIN_TOKEN_LEN);
    let counts = count_terms(tokens.iter().map(String::as_str));
    let stopwords = seed.extended_with_rare(counts.iter().map(|(word, count)| (*word, *count)));

    log::debug!(
        "{} source tokens, {} distinct, {} stopwords after extension",
        tokens.len(),
        counts.len(),
        stopwords.len()
    );

    let filtered: Vec<&str> = tokens
        .iter()
        .map(String::as_str)
        .filter(|word| !stopwords.contains(word))
        .collect();

    LanguageFrequencies {
        words: rank(filtered.iter().copied(), WORD_LIMIT),
        verbs: rank(
            filtered
                .iter()
                .copied()
                .filter(|word| classifier.is_verb_like(word)),
            VERB_LIMIT,
        ),
    }
}

/// Compute target-language frequencies from tagged tokens.
///
/// Only alphabetic, non-stopword tokens count; terms are lowercased lemmas.
pub fn compute_target_frequencies(tokens: &[NlpToken]) -> LanguageFrequencies {
    let content: Vec<(String, PartOfSpeech)> = tokens
        .iter()
        .filter(|token| token.is_alpha && !token.is_stop)
        .map(|token| (token.lemma.to_lowercase(), token.pos))
        .collect();

    LanguageFrequencies {
        words: rank(content.iter().map(|(lemma, _)| lemma.as_str()), WORD_LIMIT),
        verbs: rank(
            content
                .iter()
                .filter(|(_, pos)| *pos == PartOfSpeech::Verb)
                .map(|(lemma, _)| lemma.as_str()),
            VERB_LIMIT,
        ),
    }
}
