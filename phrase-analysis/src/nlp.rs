use anyhow::Context;
use language_utils::{Language, NlpToken, PartOfSpeech};
use lexide::Lexide;

pub const DEFAULT_LEXIDE_URL: &str = "https://anchpop--lexide-gemma-3-27b-vllm-serve.modal.run";

/// English function words flagged as stopwords on tagged tokens.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "an", "the", "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your",
    "yours", "yourself", "he", "him", "his", "himself", "she", "her", "hers", "herself", "it",
    "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which", "who",
    "whom", "whose", "why", "when", "where", "how", "this", "that", "these", "those", "am", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "having", "do", "does",
    "did", "doing", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
    "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for", "with",
    "about", "against", "between", "into", "through", "during", "before", "after", "above",
    "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under", "again",
    "further", "then", "once", "here", "there", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "just", "also", "one", "every", "nothing", "everything",
];

/// The external linguistic tagging service.
#[allow(async_fn_in_trait)]
pub trait Tagger {
    /// Tokenize, lemmatize and tag `text`.
    async fn analyze(&self, text: &str) -> anyhow::Result<Vec<NlpToken>>;
}

fn to_lexide_language(lang: Language) -> Option<lexide::Language> {
    match lang {
        Language::English => Some(lexide::Language::English),
        Language::Spanish => Some(lexide::Language::Spanish),
        // not supported by lexide
        Language::Latin => None,
    }
}

/// Tags text in one language with a remote lexide server.
pub struct LexideTagger {
    lexide: Lexide,
    language: lexide::Language,
}

impl LexideTagger {
    pub fn from_server(url: &str, language: Language) -> anyhow::Result<Self> {
        let Some(lexide_language) = to_lexide_language(language) else {
            anyhow::bail!("lexide cannot tag {language} text");
        };
        let lexide = Lexide::from_server(url).context("Failed to initialize lexide")?;
        Ok(Self {
            lexide,
            language: lexide_language,
        })
    }

    /// An English tagger using `LEXIDE_URL` when set, otherwise the default server.
    pub fn from_env() -> anyhow::Result<Self> {
        let url = std::env::var("LEXIDE_URL").unwrap_or_else(|_| DEFAULT_LEXIDE_URL.to_string());
        log::info!("Using lexide server at {url}");
        Self::from_server(&url, Language::English)
    }
}

impl Tagger for LexideTagger {
    async fn analyze(&self, text: &str) -> anyhow::Result<Vec<NlpToken>> {
        let tokenization = self
            .lexide
            .analyze(text, self.language)
            .await
            .map_err(|e| anyhow::anyhow!("lexide failed to analyze text: {e}"))?;

        Ok(tokenization
            .tokens
            .iter()
            .map(|token| {
                tag_token(
                    &token.text.text,
                    &token.lemma.lemma,
                    convert_pos(token.pos),
                )
            })
            .collect())
    }
}

/// Both enums carry the same UPOS serde names, so convert through JSON.
fn convert_pos(pos: lexide::pos::PartOfSpeech) -> PartOfSpeech {
    serde_json::to_value(pos)
        .ok()
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or(PartOfSpeech::X)
}

/// Build a token, deriving the alphabetic and stopword flags from its text.
pub fn tag_token(text: &str, lemma: &str, pos: PartOfSpeech) -> NlpToken {
    let is_alpha = !text.is_empty() && text.chars().all(char::is_alphabetic);
    let is_stop = ENGLISH_STOPWORDS.contains(&text.to_lowercase().as_str());
    NlpToken {
        text: text.to_string(),
        lemma: lemma.to_string(),
        pos,
        is_alpha,
        is_stop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_token_flags() {
        let token = tag_token("Seize", "seize", PartOfSpeech::Verb);
        assert!(token.is_alpha);
        assert!(!token.is_stop);

        let token = tag_token("The", "the", PartOfSpeech::Det);
        assert!(token.is_stop);

        let token = tag_token("don't", "do", PartOfSpeech::Aux);
        assert!(!token.is_alpha);

        let token = tag_token("", "", PartOfSpeech::Space);
        assert!(!token.is_alpha);
    }

    #[test]
    fn test_latin_is_not_taggable() {
        assert!(to_lexide_language(Language::Latin).is_none());
        assert!(to_lexide_language(Language::English).is_some());

        let error = LexideTagger::from_server(DEFAULT_LEXIDE_URL, Language::Latin)
            .err()
            .unwrap();
        assert!(error.to_string().contains("Latin"));
    }
}
