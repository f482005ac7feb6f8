use language_utils::PhraseRecord;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::accumulator::RecordAccumulator;
use crate::backend::TextGenerator;
use crate::config::EngineConfig;
use crate::error::GenerationError;
use crate::frequencies::{
    LanguageFrequencies, compute_source_frequencies, compute_target_frequencies, source_corpus,
    target_corpus,
};
use crate::generation::PhraseGenerator;
use crate::morphology::SuffixClassifier;
use crate::nlp::Tagger;
use crate::report::AnalysisReport;
use crate::stopwords::StopwordSet;
use crate::translate::LexicalTranslator;

/// Source-language terms echoed in the summary and offered to the generator.
pub const SUMMARY_WORDS: usize = 5;
/// Target-language verbs translated for the generator.
pub const SUMMARY_VERBS: usize = 3;

/// The records of a finalized batch together with their analysis.
#[derive(Debug, Clone)]
pub struct BatchAnalysis {
    pub records: Vec<PhraseRecord>,
    pub report: AnalysisReport,
}

#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    /// Nothing was accumulated; no tables, phrases or report exist.
    NoData,
    Complete(Box<BatchAnalysis>),
}

/// Accumulates phrase records and turns each closed batch into a report.
pub struct PhraseEngine<T, G> {
    accumulator: RecordAccumulator,
    tagger: T,
    generator: PhraseGenerator<G>,
    seed_stopwords: StopwordSet,
    classifier: SuffixClassifier,
    translator: LexicalTranslator,
}

impl<T: Tagger, G: TextGenerator> PhraseEngine<T, G> {
    pub fn new(config: &EngineConfig, tagger: T, backend: Result<G, GenerationError>) -> Self {
        let seed = config.rng_seed.unwrap_or_else(rand::random);
        log::info!("Template generation seed: {seed}");

        Self {
            accumulator: RecordAccumulator::new(),
            tagger,
            generator: PhraseGenerator::new(
                backend,
                config.generation.clone(),
                ChaCha8Rng::seed_from_u64(seed),
            ),
            seed_stopwords: StopwordSet::latin(),
            classifier: config.classifier(),
            translator: config.translator(),
        }
    }

    pub fn accept(&mut self, record: PhraseRecord) {
        self.accumulator.accept(record);
    }

    pub fn pending(&self) -> usize {
        self.accumulator.len()
    }

    pub fn has_generation_backend(&self) -> bool {
        self.generator.has_backend()
    }

    /// Close the current batch and analyze it. The engine starts a fresh batch afterwards.
    pub async fn finalize(&mut self) -> AnalysisOutcome {
        let records = std::mem::take(&mut self.accumulator).finalize();
        self.analyze(records).await
    }

    /// Analyze a complete batch.
    ///
    /// Every intermediate structure is rebuilt from `records`, so running this
    /// twice on the same batch yields the same tables.
    pub async fn analyze(&mut self, records: Vec<PhraseRecord>) -> AnalysisOutcome {
        if records.is_empty() {
            log::warn!("No phrase records were collected, skipping analysis");
            return AnalysisOutcome::NoData;
        }
        log::info!("Analyzing {} phrase records", records.len());

        let latin = compute_source_frequencies(
            &source_corpus(&records),
            &self.seed_stopwords,
            &self.classifier,
        );

        let english = match self.tagger.analyze(&target_corpus(&records)).await {
            Ok(tokens) => compute_target_frequencies(&tokens),
            Err(e) => {
                log::error!("Failed to tag translations, English tables left empty: {e:#}");
                LanguageFrequencies::default()
            }
        };

        let top_words = latin.words.top_terms(SUMMARY_WORDS);
        let top_verbs = english.verbs.top_terms(SUMMARY_VERBS);
        let translated_verbs = self.translator.translate_all(&top_verbs);

        let generated = self
            .generator
            .generate_phrases(&top_words, &translated_verbs)
            .await;

        let report = AnalysisReport::new(
            latin,
            english,
            generated,
            top_words,
            top_verbs,
            translated_verbs,
        );
        AnalysisOutcome::Complete(Box::new(BatchAnalysis { records, report }))
    }
}
