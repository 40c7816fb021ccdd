// Quiz generation pipeline stages.
//
// encoder -> prompt -> (model call, see services::generation) -> extract -> validate

pub mod encoder;
pub mod extract;
pub mod prompt;
pub mod validate;

use crate::models::EncodedFile;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("main topic must not be empty")]
    EmptyTopic,
    #[error("at least one subtopic is required")]
    NoSubtopics,
    #[error("at least one valid file is required")]
    NoFiles,
}

/// Checked input for one generation run.
#[derive(Debug, Clone)]
pub struct GenerationInput {
    main_topic: String,
    sub_topics: Vec<String>,
    files: Vec<EncodedFile>,
}

impl GenerationInput {
    /// Trims the topic and subtopics and drops blank subtopics before checking.
    pub fn new(
        main_topic: &str,
        sub_topics: &[String],
        files: Vec<EncodedFile>,
    ) -> Result<Self, InputError> {
        let main_topic = main_topic.trim();
        if main_topic.is_empty() {
            return Err(InputError::EmptyTopic);
        }

        let sub_topics: Vec<String> = sub_topics
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if sub_topics.is_empty() {
            return Err(InputError::NoSubtopics);
        }

        if files.is_empty() {
            return Err(InputError::NoFiles);
        }

        Ok(Self {
            main_topic: main_topic.to_string(),
            sub_topics,
            files,
        })
    }

    pub fn main_topic(&self) -> &str {
        &self.main_topic
    }

    pub fn sub_topics(&self) -> &[String] {
        &self.sub_topics
    }

    pub fn files(&self) -> &[EncodedFile] {
        &self.files
    }
}

/// Split a comma-separated subtopic field the way the upload form sends it.
pub fn split_sub_topics(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
