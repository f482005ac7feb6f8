use std::time::Duration;

use crate::config::GenerationConfig;
use crate::error::GenerationError;

pub const GENERATION_URL_ENV: &str = "PHRASE_GENERATION_URL";
pub const GENERATION_API_KEY_ENV: &str = "PHRASE_GENERATION_API_KEY";

/// The external text-generation service.
#[allow(async_fn_in_trait)]
pub trait TextGenerator {
    /// Generate continuations of `prompt` with the given sampling parameters.
    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<Vec<String>, GenerationError>;
}

#[derive(serde::Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationConfig,
}

#[derive(serde::Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// Calls a text-generation inference endpoint over HTTP.
///
/// The endpoint receives `{"inputs": ..., "parameters": {...}}` and answers
/// with a list of `{"generated_text": ...}` objects.
pub struct HttpTextGenerator {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpTextGenerator {
    pub fn new(
        url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            api_key,
        })
    }

    pub fn from_env(timeout: Duration) -> Result<Self, GenerationError> {
        let url = std::env::var(GENERATION_URL_ENV)
            .map_err(|_| GenerationError::Unavailable(format!("{GENERATION_URL_ENV} not set")))?;
        let api_key = std::env::var(GENERATION_API_KEY_ENV).ok();
        Self::new(url, api_key, timeout)
    }
}

impl TextGenerator for HttpTextGenerator {
    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<Vec<String>, GenerationError> {
        let mut request = self.client.post(&self.url).json(&GenerationRequest {
            inputs: prompt,
            parameters: config,
        });
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(GenerationError::Status(response.status()));
        }

        decode_generated(&response.text().await?)
    }
}

/// Decode an endpoint response body into the generated texts.
fn decode_generated(body: &str) -> Result<Vec<String>, GenerationError> {
    let generated: Vec<GeneratedText> =
        serde_json::from_str(body).map_err(|e| GenerationError::Malformed(e.to_string()))?;
    if generated.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(generated
        .into_iter()
        .map(|text| text.generated_text)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let config = GenerationConfig::default();
        let body = serde_json::to_value(GenerationRequest {
            inputs: "Escribe una frase:",
            parameters: &config,
        })
        .unwrap();

        assert_eq!(body["inputs"], "Escribe una frase:");
        assert_eq!(body["parameters"]["num_return_sequences"], 1);
        assert_eq!(body["parameters"]["do_sample"], true);
        assert_eq!(body["parameters"]["max_length"], 60);
    }

    #[test]
    fn test_decode_generated() {
        let texts =
            decode_generated(r#"[{"generated_text": "uno"}, {"generated_text": "dos"}]"#).unwrap();
        assert_eq!(texts, vec!["uno".to_string(), "dos".to_string()]);

        assert!(matches!(
            decode_generated("[]"),
            Err(GenerationError::EmptyResponse)
        ));
        assert!(matches!(
            decode_generated("<html>Bad Gateway</html>"),
            Err(GenerationError::Malformed(_))
        ));
        assert!(matches!(
            decode_generated(r#"{"error": "model loading"}"#),
            Err(GenerationError::Malformed(_))
        ));
    }
}
