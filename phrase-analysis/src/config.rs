use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::morphology::{LATIN_VERB_SUFFIXES, SuffixClassifier};
use crate::translate::{ENGLISH_TO_SPANISH_VERBS, LexicalTranslator};

/// Environment variable naming a config file when none is passed on the command line.
pub const CONFIG_PATH_ENV: &str = "PHRASE_ENGINE_CONFIG";

/// Sampling parameters sent with every generation request.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub max_length: u32,
    pub num_return_sequences: u32,
    pub temperature: f32,
    pub do_sample: bool,
    pub top_p: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_length: 60,
            num_return_sequences: 1,
            temperature: 0.8,
            do_sample: true,
            top_p: 0.92,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub generation: GenerationConfig,
    /// Fixed seed for template and conjugation choices; random when unset.
    pub rng_seed: Option<u64>,
    pub verb_suffixes: Vec<String>,
    pub verb_translations: BTreeMap<String, String>,
    pub backend_timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            rng_seed: None,
            verb_suffixes: LATIN_VERB_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            verb_translations: ENGLISH_TO_SPANISH_VERBS
                .iter()
                .map(|(english, spanish)| (english.to_string(), spanish.to_string()))
                .collect(),
            backend_timeout_secs: 30,
        }
    }
}

impl EngineConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn classifier(&self) -> SuffixClassifier {
        SuffixClassifier::new(self.verb_suffixes.iter().cloned())
    }

    pub fn translator(&self) -> LexicalTranslator {
        LexicalTranslator::new(self.verb_translations.clone())
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }
}
