// Database model structs

use color_eyre::Result;
use serde::{Deserialize, Serialize};

use crate::models::{QuizDraft, Questions};

/// Raw `quizzes` row as libSQL hands it back.
#[derive(Deserialize)]
pub(crate) struct QuizRow {
    pub id: String,
    pub title: String,
    pub user_id: Option<String>,
    pub creator_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub main_topic: String,
    pub sub_topics: String,
    pub questions: String,
    pub completions: i64,
    pub likes: i64,
    pub dislikes: i64,
    pub is_public: i64,
}

/// A persisted quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub user_id: Option<String>,
    pub creator_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub main_topic: String,
    pub sub_topics: Vec<String>,
    pub questions: Questions,
    pub completions: u64,
    pub likes: u64,
    pub dislikes: u64,
    pub is_public: bool,
}

impl TryFrom<QuizRow> for Quiz {
    type Error = color_eyre::Report;

    fn try_from(row: QuizRow) -> Result<Self> {
        Ok(Self {
            sub_topics: serde_json::from_str(&row.sub_topics)?,
            questions: serde_json::from_str(&row.questions)?,
            completions: u64::try_from(row.completions)?,
            likes: u64::try_from(row.likes)?,
            dislikes: u64::try_from(row.dislikes)?,
            is_public: row.is_public != 0,
            id: row.id,
            title: row.title,
            main_topic: row.main_topic,
            user_id: row.user_id,
            creator_name: row.creator_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Everything the store needs to persist a generated draft.
#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub title: String,
    pub user_id: Option<String>,
    pub creator_name: Option<String>,
    pub draft: QuizDraft,
}

/// Engagement counters that can only go up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Completions,
    Likes,
    Dislikes,
}

impl Counter {
    pub(crate) fn column(self) -> &'static str {
        match self {
            Self::Completions => "completions",
            Self::Likes => "likes",
            Self::Dislikes => "dislikes",
        }
    }
}
