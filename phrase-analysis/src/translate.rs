use std::collections::BTreeMap;

/// English verb lemmas with a known Spanish infinitive.
pub const ENGLISH_TO_SPANISH_VERBS: &[(&str, &str)] = &[
    ("be", "ser"),
    ("have", "tener"),
    ("do", "hacer"),
    ("say", "decir"),
    ("make", "hacer"),
    ("take", "tomar"),
    ("see", "ver"),
    ("come", "venir"),
    ("use", "usar"),
    ("find", "encontrar"),
    ("give", "dar"),
    ("know", "saber"),
    ("get", "obtener"),
    ("go", "ir"),
    ("think", "pensar"),
    ("look", "mirar"),
    ("want", "querer"),
    ("live", "vivir"),
];

/// Static lemma lookup between English and Spanish verbs.
///
/// Not a translator: anything outside the table is returned unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalTranslator {
    table: BTreeMap<String, String>,
}

impl Default for LexicalTranslator {
    fn default() -> Self {
        Self::new(
            ENGLISH_TO_SPANISH_VERBS
                .iter()
                .map(|(english, spanish)| (english.to_string(), spanish.to_string())),
        )
    }
}

impl LexicalTranslator {
    pub fn new(table: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            table: table.into_iter().collect(),
        }
    }

    pub fn translate(&self, term: &str) -> String {
        self.table
            .get(term)
            .cloned()
            .unwrap_or_else(|| term.to_string())
    }

    pub fn translate_all(&self, terms: &[String]) -> Vec<String> {
        terms.iter().map(|term| self.translate(term)).collect()
    }
}
