use std::time::Duration;

use serde::Deserialize;

use crate::models::QuizDraft;
use crate::names;
use crate::pipeline::{
    extract::{self, ExtractionError},
    prompt,
    validate::{self, ValidationResult},
    GenerationInput,
};

use super::gemini::GeminiClient;

// ---------------------------------------------------------------------------
// TextGenerator trait (the service depends on this, not on Gemini directly)
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait TextGenerator: Send + Sync {
    /// Send one prompt to the model and return its raw text output.
    fn generate(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, GenerationError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Google API Key is not configured")]
    MissingCredentials,
    #[error("generation request failed: {0}")]
    Provider(String),
    #[error("generation timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("generated questions failed validation: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// GenerationService
// ---------------------------------------------------------------------------

pub struct GenerationService<G: TextGenerator = GeminiClient> {
    generator: G,
    timeout: Duration,
}

impl<G: TextGenerator + Clone> Clone for GenerationService<G> {
    fn clone(&self) -> Self {
        Self {
            generator: self.generator.clone(),
            timeout: self.timeout,
        }
    }
}

#[derive(Deserialize)]
struct TitleResponse {
    title: Option<String>,
}

impl<G: TextGenerator> GenerationService<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            timeout: names::GENERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The single suspension point of a pipeline run, capped at `timeout`.
    async fn call_model(&self, prompt: &str) -> Result<String, GenerationError> {
        tokio::time::timeout(self.timeout, self.generator.generate(prompt))
            .await
            .map_err(|_| GenerationError::Timeout(self.timeout))?
    }

    /// Prompt -> model -> extract -> validate. One model call, no retries.
    pub async fn generate_quiz(&self, input: GenerationInput) -> Result<QuizDraft, GenerationError> {
        let prompt = prompt::quiz_prompt(input.main_topic(), input.sub_topics(), input.files());

        tracing::info!(
            "generating quiz for topic={} subtopics={} files={}",
            input.main_topic(),
            input.sub_topics().len(),
            input.files().len()
        );
        let raw = self.call_model(&prompt).await?;
        tracing::debug!("received {} bytes from model", raw.len());

        let value = extract::extract_json(&raw)?;

        let questions = match validate::validate_questions(value, input.sub_topics().len()) {
            ValidationResult::Valid(questions) => questions,
            ValidationResult::Invalid(reason) => return Err(GenerationError::Validation(reason)),
        };

        tracing::info!("generated {} questions", questions.len());

        Ok(QuizDraft {
            main_topic: input.main_topic().to_string(),
            sub_topics: input.sub_topics().to_vec(),
            questions,
        })
    }

    /// A title of at most three words; falls back to the default title.
    pub async fn generate_title(&self, file_names: &[String]) -> Result<String, GenerationError> {
        let raw = self.call_model(&prompt::title_prompt(file_names)).await?;
        let value = extract::extract_json(&raw)?;

        let title = serde_json::from_value::<TitleResponse>(value)
            .ok()
            .and_then(|r| r.title)
            .map(|t| {
                t.split_whitespace()
                    .take(names::MAX_TITLE_WORDS)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| names::DEFAULT_TITLE.to_string());

        Ok(title)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::EncodedFile;

    const TWO_QUESTIONS: &str = r#"[
        {"question":"Where does gas exchange happen?","options":["Alveoli","Trachea","Bronchi","Larynx","Pharynx"],"answer":"A","explanation":"Alveoli are thin-walled.","subtopic":0},
        {"question":"Which muscle contracts on inhalation?","options":["Biceps","Diaphragm","Deltoid","Soleus","Trapezius"],"answer":"B","explanation":"The diaphragm flattens.","subtopic":1}
    ]"#;

    fn input() -> GenerationInput {
        GenerationInput::new(
            "Respiratory System",
            &["Anatomy".to_string(), "Mechanics of Breathing".to_string()],
            vec![EncodedFile {
                name: "lungs.txt".to_string(),
                mime_type: "text/plain".to_string(),
                data: "data:text/plain;base64,THVuZ3M=".to_string(),
            }],
        )
        .unwrap()
    }

    fn replying(text: impl Into<String>) -> MockTextGenerator {
        let text = text.into();
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().times(1).returning(move |_| {
            let text = text.clone();
            Box::pin(async move { Ok(text) })
        });
        mock
    }

    #[tokio::test]
    async fn generate_quiz_returns_validated_draft() {
        let svc = GenerationService::new(replying(TWO_QUESTIONS));

        let draft = svc.generate_quiz(input()).await.unwrap();

        assert_eq!(draft.main_topic, "Respiratory System");
        assert_eq!(draft.sub_topics.len(), 2);
        assert_eq!(draft.questions.len(), 2);
        assert!(draft.questions.iter().all(|q| q.options.len() == 5));
    }

    #[tokio::test]
    async fn generate_quiz_accepts_fenced_output() {
        let svc = GenerationService::new(replying(format!("```json\n{TWO_QUESTIONS}\n```")));

        let draft = svc.generate_quiz(input()).await.unwrap();
        assert_eq!(draft.questions.len(), 2);
    }

    #[tokio::test]
    async fn prompt_reaches_the_model() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .withf(|prompt| {
                prompt.contains("Main Topic: Respiratory System") && prompt.contains("Content: Lungs")
            })
            .times(1)
            .returning(|_| Box::pin(async { Ok(TWO_QUESTIONS.to_string()) }));

        GenerationService::new(mock).generate_quiz(input()).await.unwrap();
    }

    #[tokio::test]
    async fn provider_failure_is_not_retried() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().times(1).returning(|_| {
            Box::pin(async { Err(GenerationError::Provider("503 Service Unavailable".into())) })
        });

        let err = GenerationService::new(mock).generate_quiz(input()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Provider(_)));
    }

    #[tokio::test]
    async fn slow_model_times_out() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().times(1).returning(|_| {
            Box::pin(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(TWO_QUESTIONS.to_string())
            })
        });

        let svc = GenerationService::new(mock).with_timeout(Duration::from_millis(20));
        let err = svc.generate_quiz(input()).await.unwrap_err();

        assert!(matches!(err, GenerationError::Timeout(d) if d == Duration::from_millis(20)));
    }

    #[tokio::test]
    async fn unparseable_output_is_an_extraction_error() {
        let svc = GenerationService::new(replying("I'm sorry, I can't do that."));

        let err = svc.generate_quiz(input()).await.unwrap_err();
        let GenerationError::Extraction(e) = err else {
            panic!("expected extraction error, got {err:?}");
        };
        assert_eq!(e.raw, "I'm sorry, I can't do that.");
    }

    #[tokio::test]
    async fn invalid_answer_fails_the_whole_quiz() {
        let svc = GenerationService::new(replying(
            r#"[{"question":"Q?","options":["a","b","c","d","e"],"answer":"F","explanation":"x","subtopic":0}]"#,
        ));

        let err = svc.generate_quiz(input()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Validation(_)));
    }

    #[tokio::test]
    async fn title_is_capped_at_three_words() {
        let svc = GenerationService::new(replying(
            r#"```json
{"title": "Human Respiratory System Basics"}
```"#,
        ));

        let title = svc.generate_title(&["lungs.txt".to_string()]).await.unwrap();
        assert_eq!(title, "Human Respiratory System");
    }

    #[tokio::test]
    async fn blank_title_falls_back_to_default() {
        let svc = GenerationService::new(replying(r#"{"title": "  "}"#));

        let title = svc.generate_title(&["1.txt".to_string()]).await.unwrap();
        assert_eq!(title, names::DEFAULT_TITLE);
    }
}
