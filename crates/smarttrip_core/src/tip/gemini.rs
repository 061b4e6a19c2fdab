//! Gemini `generateContent` tip provider over blocking HTTP.

use super::{TipError, TipProvider, TipResult};
use crate::config::TipConfig;
use serde::{Deserialize, Serialize};

const PROVIDER_ID: &str = "gemini";
const API_KEY_HEADER: &str = "x-goog-api-key";
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Blocking Gemini client for single-turn tip prompts.
pub struct GeminiTipProvider {
    client: reqwest::blocking::Client,
    url: String,
    api_key: String,
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiTipProvider {
    /// Creates a client from tip configuration.
    ///
    /// # Errors
    /// - Returns `NotConfigured` when no credential is configured.
    /// - Returns `Http` when the HTTP client cannot be built.
    pub fn new(config: &TipConfig) -> TipResult<Self> {
        let api_key = config.api_key.clone().ok_or(TipError::NotConfigured)?;
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            url: generate_url(config.endpoint.as_str(), config.model.as_str()),
            api_key,
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }
}

impl TipProvider for GeminiTipProvider {
    fn provider_id(&self) -> &str {
        PROVIDER_ID
    }

    fn generate(&self, prompt: &str) -> TipResult<String> {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        };

        let response = self
            .client
            .post(self.url.as_str())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&body)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(TipError::HttpStatus {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let decoded: GenerateResponse = response.json()?;
        Ok(extract_text(decoded))
    }
}

fn generate_url(endpoint: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        endpoint.trim_end_matches('/'),
        model
    )
}

/// Concatenates text parts of the first candidate; empty when none.
fn extract_text(response: GenerateResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{extract_text, generate_url, GeminiTipProvider, GenerateResponse};
    use crate::config::TipConfig;
    use crate::tip::TipError;

    #[test]
    fn url_joins_endpoint_and_model() {
        assert_eq!(
            generate_url("https://generativelanguage.googleapis.com/v1beta/", "gemini-x"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-x:generateContent"
        );
    }

    #[test]
    fn extract_text_joins_first_candidate_parts() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [
                {"content": {"parts": [{"text": "先吃"}, {"text": "再逛"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .expect("decode response");
        assert_eq!(extract_text(response), "先吃再逛");
    }

    #[test]
    fn extract_text_is_empty_without_candidates() {
        let response: GenerateResponse =
            serde_json::from_value(serde_json::json!({})).expect("decode response");
        assert!(extract_text(response).is_empty());
    }

    #[test]
    fn new_requires_credential() {
        let err = GeminiTipProvider::new(&TipConfig::default())
            .err()
            .expect("missing key must fail");
        assert!(matches!(err, TipError::NotConfigured));
    }
}
