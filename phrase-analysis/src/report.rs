use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use language_utils::text_cleanup::escape_table_cell;
use language_utils::{FrequencyTable, PhraseRecord};
use markdown_tables::MarkdownTableRow;

use crate::frequencies::LanguageFrequencies;
use crate::generation::{GeneratedPhrase, GenerationPath};

pub const REPORT_FILE: &str = "analisis_frecuencias.txt";
pub const REPORT_JSON_FILE: &str = "analysis.json";
pub const RECORDS_TABLE_FILE: &str = "latin_phrases.md";
pub const RECORDS_JSONL_FILE: &str = "latin_phrases.jsonl";

const NO_WORDS: &str = "Sin datos";
const NO_SOURCE_VERBS: &str = "No se identificaron verbos claros por sufijos";
const NO_TARGET_VERBS: &str = "No se identificaron verbos en inglés";

/// Which generation path the phrases of a batch came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum PathUsage {
    Model,
    Template,
    Mixed,
    None,
}

impl PathUsage {
    pub fn of(phrases: &[GeneratedPhrase]) -> Self {
        let model = phrases.iter().any(|p| p.path == GenerationPath::Model);
        let template = phrases.iter().any(|p| p.path == GenerationPath::Template);
        match (model, template) {
            (true, true) => PathUsage::Mixed,
            (true, false) => PathUsage::Model,
            (false, true) => PathUsage::Template,
            (false, false) => PathUsage::None,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            PathUsage::Model => "modelo de generación",
            PathUsage::Template => "plantillas",
            PathUsage::Mixed => "modelo de generación y plantillas",
            PathUsage::None => "ninguno",
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ExecutiveSummary {
    pub top_words: Vec<String>,
    pub top_verbs: Vec<String>,
    pub translated_verbs: Vec<String>,
    pub generation_path: PathUsage,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AnalysisReport {
    pub latin: LanguageFrequencies,
    pub english: LanguageFrequencies,
    pub phrases: Vec<String>,
    pub summary: ExecutiveSummary,
}

impl AnalysisReport {
    pub fn new(
        latin: LanguageFrequencies,
        english: LanguageFrequencies,
        generated: Vec<GeneratedPhrase>,
        top_words: Vec<String>,
        top_verbs: Vec<String>,
        translated_verbs: Vec<String>,
    ) -> Self {
        let generation_path = PathUsage::of(&generated);
        Self {
            latin,
            english,
            phrases: generated.into_iter().map(|phrase| phrase.text).collect(),
            summary: ExecutiveSummary {
                top_words,
                top_verbs,
                translated_verbs,
                generation_path,
            },
        }
    }

    /// Render the Spanish plain-text report.
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let banner = "=".repeat(60);
        writeln!(f, "{banner}\nANÁLISIS COMPLETO DE FRECUENCIAS\n{banner}\n")?;

        writeln!(f, "TOP 20 PALABRAS EN LATÍN (excluyendo stopwords):")?;
        write_table(f, &self.latin.words, NO_WORDS)?;

        writeln!(f, "\nTOP 10 VERBOS EN LATÍN (identificados por sufijos):")?;
        write_table(f, &self.latin.verbs, NO_SOURCE_VERBS)?;

        writeln!(f, "\nTOP 20 PALABRAS EN INGLÉS (lematizadas, sin stopwords):")?;
        write_table(f, &self.english.words, NO_WORDS)?;

        writeln!(f, "\nTOP 10 VERBOS EN INGLÉS (lematizados):")?;
        write_table(f, &self.english.verbs, NO_TARGET_VERBS)?;

        writeln!(
            f,
            "\n{banner}\n{} FRASES GENERADAS EN ESPAÑOL\n{banner}",
            self.phrases.len()
        )?;
        for (i, phrase) in self.phrases.iter().enumerate() {
            writeln!(f, "{}. {phrase}", i + 1)?;
        }

        let summary = &self.summary;
        writeln!(f, "\n{banner}\nRESUMEN EJECUTIVO\n{banner}")?;
        writeln!(f, "Palabras latín más usadas: {}", format_list(&summary.top_words))?;
        writeln!(f, "Verbos inglés más usados: {}", format_list(&summary.top_verbs))?;
        writeln!(
            f,
            "Verbos traducidos al español: {}",
            format_list(&summary.translated_verbs)
        )?;
        writeln!(
            f,
            "Método de generación: {}",
            summary.generation_path.describe()
        )
    }
}

fn write_table(
    f: &mut fmt::Formatter<'_>,
    table: &FrequencyTable,
    empty_marker: &str,
) -> fmt::Result {
    if table.is_empty() {
        return writeln!(f, "  {empty_marker}");
    }
    for entry in table.entries() {
        writeln!(f, "  {}: {}", entry.term, entry.count)?;
    }
    Ok(())
}

fn format_list(terms: &[String]) -> String {
    if terms.is_empty() {
        return "(ninguno)".to_string();
    }
    format!(
        "[{}]",
        terms
            .iter()
            .map(|term| format!("'{term}'"))
            .collect::<Vec<_>>()
            .join(", ")
    )
}

struct RecordRow<'a>(&'a PhraseRecord);

impl MarkdownTableRow for RecordRow<'_> {
    fn column_names() -> Vec<&'static str> {
        vec!["Latin phrase", "Translation", "Notes"]
    }

    fn column_values(&self) -> Vec<String> {
        vec![
            escape_table_cell(&self.0.source_phrase),
            escape_table_cell(&self.0.translation),
            escape_table_cell(self.0.notes.as_deref().unwrap_or("")),
        ]
    }
}

/// All raw records as a markdown table.
pub fn records_table(records: &[PhraseRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }
    let rows: Vec<RecordRow> = records.iter().map(RecordRow).collect();
    markdown_tables::as_table(&rows)
}

pub fn write_records_jsonl(records: &[PhraseRecord], output_path: &Path) -> anyhow::Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    for record in records {
        let json = serde_json::to_string(record)?;
        writeln!(writer, "{json}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Paths of everything [`write_artifacts`] produced.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub report: PathBuf,
    pub report_json: PathBuf,
    pub records_table: PathBuf,
    pub records_jsonl: PathBuf,
}

/// Write the text report, its JSON form and both record exports into `dir`.
pub fn write_artifacts(
    dir: &Path,
    records: &[PhraseRecord],
    report: &AnalysisReport,
) -> anyhow::Result<ArtifactPaths> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let paths = ArtifactPaths {
        report: dir.join(REPORT_FILE),
        report_json: dir.join(REPORT_JSON_FILE),
        records_table: dir.join(RECORDS_TABLE_FILE),
        records_jsonl: dir.join(RECORDS_JSONL_FILE),
    };

    std::fs::write(&paths.report, report.render_text())
        .with_context(|| format!("Failed to write {}", paths.report.display()))?;
    std::fs::write(&paths.report_json, serde_json::to_string_pretty(report)?)
        .with_context(|| format!("Failed to write {}", paths.report_json.display()))?;
    std::fs::write(&paths.records_table, records_table(records))
        .with_context(|| format!("Failed to write {}", paths.records_table.display()))?;
    write_records_jsonl(records, &paths.records_jsonl)?;

    log::info!("Report written to {}", paths.report.display());
    Ok(paths)
}
