use serde::{Deserialize, Serialize};

pub type Questions = Vec<Question>;

/// A generated multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub answer: AnswerLabel,
    pub explanation: String,
    /// Zero-based index into the quiz's subtopic list.
    pub subtopic: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerLabel {
    A,
    B,
    C,
    D,
    E,
}

impl AnswerLabel {
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
            Self::E => 4,
        }
    }
}

/// A file as received from the user, before encoding.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// A file in transport form: `data` is a `data:<mime>;base64,<payload>` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedFile {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub data: String,
}

/// Body of the JSON generation endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    #[serde(default)]
    pub files: Vec<EncodedFile>,
    #[serde(default)]
    pub main_topic: String,
    #[serde(default)]
    pub sub_topics: Vec<String>,
}

/// The result of one pipeline run. It has no identity until the store
/// assigns one on publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDraft {
    pub main_topic: String,
    pub sub_topics: Vec<String>,
    pub questions: Questions,
}
