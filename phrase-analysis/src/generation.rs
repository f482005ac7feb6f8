//! Spanish phrase synthesis from the extracted vocabulary.
//!
//! Each phrase first tries the model path (an external text generator) and
//! falls back to a fixed sentence template when the backend is missing, the
//! vocabulary is too thin, or the request fails. Template and conjugation
//! choices draw from an injected seeded RNG.

use language_utils::text_cleanup::{capitalize_first, normalize_whitespace};
use rand::prelude::IndexedRandom;
use rand_chacha::ChaCha8Rng;

use crate::backend::TextGenerator;
use crate::config::GenerationConfig;
use crate::error::GenerationError;

/// Phrases generated per batch.
pub const PHRASE_COUNT: usize = 5;

/// Vocabulary terms and verbs needed before the model path is tried.
pub const MODEL_MIN_WORDS: usize = 3;
pub const MODEL_MIN_VERBS: usize = 2;

pub const DEFAULT_TERM: &str = "sapientia";
pub const DEFAULT_VERB: &str = "ser";

/// Sentence skeletons. `{w0}`..`{w2}` take vocabulary terms, `{v0}` and `{v1}` take verbs.
pub const TEMPLATES: [&str; 5] = [
    "El concepto latino '{w0}' {v0} fundamental junto a '{w1}', y '{w2}' {v1} en la filosofía antigua.",
    "La expresión '{w0}' nos {v0} reflexionar sobre '{w1}' mientras '{w2}' {v1} el paso del tiempo.",
    "Mediante '{w0}' se {v0} entender '{w1}', y con '{w2}' se {v1} el conocimiento clásico.",
    "El principio de '{w0}' {v0} la base de '{w1}', y '{w2}' {v1} la jurisprudencia romana.",
    "La búsqueda de '{w0}' {v0} en el centro de la retórica, donde '{w1}' y '{w2}' {v1} juntos.",
];

/// Spanish verbs with their present singular, present plural, imperfect,
/// preterite and gerund forms.
pub const CONJUGATIONS: &[(&str, [&str; 5])] = &[
    ("ser", ["es", "son", "era", "fue", "siendo"]),
    ("tener", ["tiene", "tienen", "tenía", "tuvo", "teniendo"]),
    ("hacer", ["hace", "hacen", "hacía", "hizo", "haciendo"]),
    ("decir", ["dice", "dicen", "decía", "dijo", "diciendo"]),
    ("ver", ["ve", "ven", "veía", "vio", "viendo"]),
    ("dar", ["da", "dan", "daba", "dio", "dando"]),
    ("ir", ["va", "van", "iba", "fue", "yendo"]),
    ("saber", ["sabe", "saben", "sabía", "supo", "sabiendo"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum GenerationPath {
    Model,
    Template,
}

/// A finished phrase and the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPhrase {
    pub text: String,
    pub path: GenerationPath,
}

enum Attempt {
    Model,
    Template,
}

pub struct PhraseGenerator<G> {
    backend: Option<G>,
    config: GenerationConfig,
    rng: ChaCha8Rng,
}

impl<G: TextGenerator> PhraseGenerator<G> {
    /// A backend that failed to initialize is reported here once; every
    /// request then goes straight to the templates.
    pub fn new(
        backend: Result<G, GenerationError>,
        config: GenerationConfig,
        rng: ChaCha8Rng,
    ) -> Self {
        let backend = match backend {
            Ok(backend) => Some(backend),
            Err(e) => {
                log::warn!("Model-backed generation disabled, using templates only: {e}");
                None
            }
        };
        Self {
            backend,
            config,
            rng,
        }
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// Generate [`PHRASE_COUNT`] phrases. Repeats are kept.
    pub async fn generate_phrases(
        &mut self,
        words: &[String],
        verbs: &[String],
    ) -> Vec<GeneratedPhrase> {
        let mut phrases = Vec::with_capacity(PHRASE_COUNT);
        for _ in 0..PHRASE_COUNT {
            phrases.push(self.generate_one(words, verbs).await);
        }
        phrases
    }

    pub async fn generate_one(&mut self, words: &[String], verbs: &[String]) -> GeneratedPhrase {
        let mut attempt = if self.backend.is_some()
            && words.len() >= MODEL_MIN_WORDS
            && verbs.len() >= MODEL_MIN_VERBS
        {
            Attempt::Model
        } else {
            Attempt::Template
        };

        loop {
            match attempt {
                Attempt::Model => match self.model_phrase(words, verbs).await {
                    Ok(text) => {
                        log::debug!("Model generated: {text}");
                        return GeneratedPhrase {
                            text,
                            path: GenerationPath::Model,
                        };
                    }
                    Err(e) => {
                        log::warn!("Model generation failed, falling back to a template: {e}");
                        attempt = Attempt::Template;
                    }
                },
                Attempt::Template => {
                    let text = self.template_phrase(words, verbs);
                    log::debug!("Template generated: {text}");
                    return GeneratedPhrase {
                        text,
                        path: GenerationPath::Template,
                    };
                }
            }
        }
    }

    async fn model_phrase(
        &self,
        words: &[String],
        verbs: &[String],
    ) -> Result<String, GenerationError> {
        let Some(backend) = &self.backend else {
            return Err(GenerationError::Unavailable("no backend loaded".to_string()));
        };
        let prompt = build_prompt(&words[..MODEL_MIN_WORDS], &verbs[..MODEL_MIN_VERBS]);
        let outputs = backend.generate(&prompt, &self.config).await?;
        let output = outputs
            .into_iter()
            .next()
            .ok_or(GenerationError::EmptyResponse)?;
        clean_generated_text(&output, &prompt)
    }

    fn template_phrase(&mut self, words: &[String], verbs: &[String]) -> String {
        let template = TEMPLATES.choose(&mut self.rng).copied().unwrap_or(TEMPLATES[0]);
        let words: [String; 3] = fill_slots(words, DEFAULT_TERM);
        let verbs: [String; 2] = fill_slots(verbs, DEFAULT_VERB);
        let verbs = verbs.map(|verb| self.conjugate(verb));
        render_template(template, &words, &verbs)
    }

    fn conjugate(&mut self, verb: String) -> String {
        CONJUGATIONS
            .iter()
            .find(|(base, _)| *base == verb)
            .and_then(|(_, forms)| forms.choose(&mut self.rng))
            .map(|form| form.to_string())
            .unwrap_or(verb)
    }
}

/// Instruction prompt for the model path.
pub fn build_prompt(words: &[String], verbs: &[String]) -> String {
    let quote = |terms: &[String]| {
        terms
            .iter()
            .map(|term| format!("'{term}'"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "Escribe una frase breve en español sobre la cultura clásica que use las palabras latinas {} y los verbos {}. Frase:",
        quote(words),
        quote(verbs)
    )
}

/// Reduce raw model output to one capitalized sentence.
///
/// The echoed prompt is removed, then anything up to the first colon, then
/// everything after the first period.
pub fn clean_generated_text(raw: &str, prompt: &str) -> Result<String, GenerationError> {
    let trimmed = raw.trim_start();
    let mut text = match trimmed.strip_prefix(prompt) {
        Some(rest) => rest.to_string(),
        None => trimmed.replacen(prompt, "", 1),
    };

    if let Some((_, after)) = text.split_once(':') {
        text = after.to_string();
    }
    if let Some(end) = text.find('.') {
        text.truncate(end + 1);
    }

    let text = normalize_whitespace(&text);
    if !text.chars().any(char::is_alphabetic) {
        return Err(GenerationError::Malformed(raw.to_string()));
    }
    Ok(capitalize_first(&text))
}

/// Take the first `N` terms, reusing the first one (or `default`) for missing slots.
fn fill_slots<const N: usize>(available: &[String], default: &str) -> [String; N] {
    std::array::from_fn(|i| {
        available
            .get(i)
            .or_else(|| available.first())
            .cloned()
            .unwrap_or_else(|| default.to_string())
    })
}

/// Substitute `{wN}`/`{vN}` slots in a single pass; unknown slots stay verbatim.
pub fn render_template(template: &str, words: &[String; 3], verbs: &[String; 2]) -> String {
    let mut rendered = String::with_capacity(template.len() + 48);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        rendered.push_str(&rest[..start]);
        let slot_and_rest = &rest[start..];
        let Some(end) = slot_and_rest.find('}') else {
            rest = slot_and_rest;
            break;
        };
        match &slot_and_rest[1..end] {
            "w0" => rendered.push_str(&words[0]),
            "w1" => rendered.push_str(&words[1]),
            "w2" => rendered.push_str(&words[2]),
            "v0" => rendered.push_str(&verbs[0]),
            "v1" => rendered.push_str(&verbs[1]),
            _ => rendered.push_str(&slot_and_rest[..=end]),
        }
        rest = &slot_and_rest[end + 1..];
    }

    rendered.push_str(rest);
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::cell::Cell;

    struct FailingBackend {
        calls: Cell<usize>,
    }

    impl TextGenerator for FailingBackend {
        async fn generate(
            &self,
            _prompt: &str,
            _config: &GenerationConfig,
        ) -> Result<Vec<String>, GenerationError> {
            self.calls.set(self.calls.get() + 1);
            Err(GenerationError::Status(
                reqwest::StatusCode::SERVICE_UNAVAILABLE,
            ))
        }
    }

    struct EchoBackend;

    impl TextGenerator for EchoBackend {
        async fn generate(
            &self,
            prompt: &str,
            _config: &GenerationConfig,
        ) -> Result<Vec<String>, GenerationError> {
            Ok(vec![format!(
                "{prompt} respuesta: la verdad vence siempre. Y algo más."
            )])
        }
    }

    fn strings(terms: &[&str]) -> Vec<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn template_only() -> PhraseGenerator<FailingBackend> {
        PhraseGenerator::new(
            Err(GenerationError::Unavailable("test".to_string())),
            GenerationConfig::default(),
            rng(),
        )
    }

    /// Whether `phrase` is `template` with every slot filled by some non-empty text.
    fn matches_template(phrase: &str, template: &str) -> bool {
        let mut literals = Vec::new();
        let mut rest = template;
        while let Some(start) = rest.find('{') {
            literals.push(&rest[..start]);
            let end = rest[start..].find('}').unwrap();
            rest = &rest[start + end + 1..];
        }
        literals.push(rest);

        let Some(mut remaining) = phrase.strip_prefix(literals[0]) else {
            return false;
        };
        for (i, literal) in literals.iter().enumerate().skip(1) {
            let found = if i == literals.len() - 1 {
                remaining.strip_suffix(literal).map(|slot| (slot, ""))
            } else {
                remaining
                    .find(literal)
                    .map(|pos| (&remaining[..pos], &remaining[pos + literal.len()..]))
            };
            match found {
                Some((slot, next)) if !slot.is_empty() => remaining = next,
                _ => return false,
            }
        }
        true
    }

    #[test]
    fn test_render_template_fills_every_slot() {
        let words = ["amor".to_string(), "vita".to_string(), "lux".to_string()];
        let verbs = ["es".to_string(), "da".to_string()];
        for template in TEMPLATES {
            let rendered = render_template(template, &words, &verbs);
            assert!(!rendered.contains('{'), "{rendered}");
            assert!(rendered.contains("'amor'"));
            assert!(matches_template(&rendered, template));
        }
    }

    #[test]
    fn test_render_template_does_not_expand_slot_text_in_terms() {
        let words = ["{v0}".to_string(), "b".to_string(), "c".to_string()];
        let verbs = ["x".to_string(), "y".to_string()];
        let rendered = render_template("{w0} {v0}", &words, &verbs);
        assert_eq!(rendered, "{v0} x");
    }

    #[test]
    fn test_fill_slots_reuses_first_term() {
        let slots: [String; 3] = fill_slots(&strings(&["amor"]), DEFAULT_TERM);
        assert_eq!(slots, ["amor", "amor", "amor"].map(String::from));

        let slots: [String; 2] = fill_slots(&[], DEFAULT_VERB);
        assert_eq!(slots, [DEFAULT_VERB, DEFAULT_VERB].map(String::from));
    }

    #[test]
    fn test_clean_generated_text() {
        let prompt = "Escribe una frase:";
        let cleaned =
            clean_generated_text("Escribe una frase: el tiempo vuela. Otra cosa", prompt).unwrap();
        assert_eq!(cleaned, "El tiempo vuela.");

        let cleaned = clean_generated_text("respuesta: la luz vence", "no echo").unwrap();
        assert_eq!(cleaned, "La luz vence");
    }

    #[test]
    fn test_clean_generated_text_rejects_empty_output() {
        let prompt = "Escribe una frase:";
        assert!(matches!(
            clean_generated_text("Escribe una frase:   ", prompt),
            Err(GenerationError::Malformed(_))
        ));
        assert!(clean_generated_text("...", prompt).is_err());
    }

    #[tokio::test]
    async fn test_always_five_non_empty_phrases() {
        for (words, verbs) in [
            (vec![], vec![]),
            (strings(&["amor"]), vec![]),
            (strings(&["amor", "vita", "lux"]), strings(&["ser", "tener"])),
        ] {
            let phrases = template_only().generate_phrases(&words, &verbs).await;
            assert_eq!(phrases.len(), PHRASE_COUNT);
            assert!(phrases.iter().all(|p| !p.text.is_empty()));
        }
    }

    #[tokio::test]
    async fn test_failing_backend_falls_back_to_templates() {
        let mut generator = PhraseGenerator::new(
            Ok(FailingBackend {
                calls: Cell::new(0),
            }),
            GenerationConfig::default(),
            rng(),
        );
        let words = strings(&["amor", "vita", "lux"]);
        let verbs = strings(&["ser", "love"]);

        let phrases = generator.generate_phrases(&words, &verbs).await;
        assert_eq!(generator.backend.as_ref().unwrap().calls.get(), PHRASE_COUNT);
        for phrase in &phrases {
            assert_eq!(phrase.path, GenerationPath::Template);
            assert!(
                TEMPLATES.iter().any(|t| matches_template(&phrase.text, t)),
                "{}",
                phrase.text
            );
            assert!(phrase.text.contains("love"));
        }
    }

    #[tokio::test]
    async fn test_thin_vocabulary_skips_model() {
        let mut generator = PhraseGenerator::new(
            Ok(FailingBackend {
                calls: Cell::new(0),
            }),
            GenerationConfig::default(),
            rng(),
        );
        let phrases = generator
            .generate_phrases(&strings(&["amor", "vita"]), &strings(&["ser", "dar"]))
            .await;
        assert_eq!(generator.backend.as_ref().unwrap().calls.get(), 0);
        assert!(phrases.iter().all(|p| p.path == GenerationPath::Template));
    }

    #[tokio::test]
    async fn test_single_verb_skips_model() {
        let mut generator = PhraseGenerator::new(
            Ok(FailingBackend {
                calls: Cell::new(0),
            }),
            GenerationConfig::default(),
            rng(),
        );
        let phrases = generator
            .generate_phrases(&strings(&["amor", "vita", "lux", "fides"]), &strings(&["ser"]))
            .await;
        assert_eq!(generator.backend.as_ref().unwrap().calls.get(), 0);
        assert_eq!(phrases.len(), PHRASE_COUNT);
        assert!(phrases.iter().all(|p| p.path == GenerationPath::Template));
    }

    #[tokio::test]
    async fn test_model_path_output_is_cleaned() {
        let mut generator =
            PhraseGenerator::new(Ok(EchoBackend), GenerationConfig::default(), rng());
        let phrase = generator
            .generate_one(
                &strings(&["amor", "vita", "lux"]),
                &strings(&["ser", "tener"]),
            )
            .await;
        assert_eq!(phrase.path, GenerationPath::Model);
        assert_eq!(phrase.text, "La verdad vence siempre.");
    }

    #[tokio::test]
    async fn test_same_seed_same_phrases() {
        let words = strings(&["amor", "vita", "lux"]);
        let verbs = strings(&["ser", "hacer"]);
        let first = template_only().generate_phrases(&words, &verbs).await;
        let second = template_only().generate_phrases(&words, &verbs).await;
        assert_eq!(first, second);
    }

    #[test]
    fn test_known_verbs_are_conjugated() {
        let mut generator = template_only();
        let forms = CONJUGATIONS[0].1;
        for _ in 0..20 {
            let verb = generator.conjugate("ser".to_string());
            assert!(forms.contains(&verb.as_str()), "{verb}");
        }
        assert_eq!(generator.conjugate("amar".to_string()), "amar");
    }
}
