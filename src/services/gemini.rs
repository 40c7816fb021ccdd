//! Gemini `generateContent` client.
//!
//! Sends a single user turn with a fixed generation config and returns the
//! concatenated text of the first candidate.

use serde::{Deserialize, Serialize};

use crate::names;

use super::generation::{GenerationError, TextGenerator};

#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> color_eyre::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(names::GENERATION_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api_key,
            model,
            base_url: names::GEMINI_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different host, e.g. a proxy or a local fake.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    async fn request(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: names::GENERATION_TEMPERATURE,
                max_output_tokens: names::MAX_OUTPUT_TOKENS,
            },
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Provider(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GenerationError::Provider(e.to_string()))?;

        if !status.is_success() {
            return Err(GenerationError::Provider(format!("{status}: {text}")));
        }

        let parsed = serde_json::from_str::<GenerateContentResponse>(&text).map_err(|e| {
            GenerationError::Provider(format!("error decoding response body: {e}"))
        })?;

        if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(GenerationError::Provider(format!("prompt blocked: {reason}")));
        }

        let output: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if output.trim().is_empty() {
            return Err(GenerationError::Provider(
                "model returned no text".to_string(),
            ));
        }

        Ok(output)
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        tracing::debug!("sending {} byte prompt to {}", prompt.len(), self.model);
        let result = self.request(prompt).await;
        if let Err(e) = &result {
            tracing::error!("gemini request failed: {e}");
        }
        result
    }
}
