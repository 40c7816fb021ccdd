use color_eyre::Result;
use libsql::params;
use ulid::Ulid;

use super::helpers::{fetch_quiz, fetch_quizzes, QUIZ_COLUMNS};
use super::models::{Counter, NewQuiz, Quiz};
use super::Db;

impl Db {
    /// Persist a generated draft as a private quiz with zeroed counters.
    /// Returns the new quiz id (ULID).
    pub async fn create_quiz(&self, quiz: NewQuiz) -> Result<String> {
        let id = Ulid::new().to_string();
        let sub_topics = serde_json::to_string(&quiz.draft.sub_topics)?;
        let questions = serde_json::to_string(&quiz.draft.questions)?;

        self.conn()
            .execute(
                r#"
                INSERT INTO quizzes (id, title, user_id, creator_name, main_topic, sub_topics, questions)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
                params![
                    id.clone(),
                    quiz.title,
                    quiz.user_id,
                    quiz.creator_name,
                    quiz.draft.main_topic,
                    sub_topics,
                    questions
                ],
            )
            .await?;

        tracing::info!(
            "new quiz created with id: {id} ({} questions)",
            quiz.draft.questions.len()
        );
        Ok(id)
    }

    pub async fn get_quiz(&self, id: &str) -> Result<Option<Quiz>> {
        let quiz = fetch_quiz(
            self.conn(),
            &format!("SELECT {QUIZ_COLUMNS} FROM quizzes WHERE id = ?"),
            params![id],
        )
        .await?;

        if quiz.is_none() {
            tracing::debug!("quiz not found: {id}");
        }
        Ok(quiz)
    }

    /// Public quizzes, newest first.
    pub async fn public_quizzes(&self, limit: u32) -> Result<Vec<Quiz>> {
        fetch_quizzes(
            self.conn(),
            &format!(
                "SELECT {QUIZ_COLUMNS} FROM quizzes WHERE is_public = 1 \
                 ORDER BY created_at DESC, rowid DESC LIMIT ?"
            ),
            params![i64::from(limit)],
        )
        .await
    }

    /// Every quiz owned by `user_id`, newest first.
    pub async fn user_quizzes(&self, user_id: &str) -> Result<Vec<Quiz>> {
        fetch_quizzes(
            self.conn(),
            &format!(
                "SELECT {QUIZ_COLUMNS} FROM quizzes WHERE user_id = ? \
                 ORDER BY created_at DESC, rowid DESC"
            ),
            params![user_id],
        )
        .await
    }

    /// Atomically add one to a counter. Returns `false` if the quiz does not exist.
    async fn increment(&self, id: &str, counter: Counter) -> Result<bool> {
        let column = counter.column();
        let changed = self
            .conn()
            .execute(
                &format!("UPDATE quizzes SET {column} = {column} + 1 WHERE id = ?"),
                params![id],
            )
            .await?;

        if changed > 0 {
            tracing::info!("quiz {id}: {column} incremented");
        }
        Ok(changed > 0)
    }

    pub async fn increment_completion(&self, id: &str) -> Result<bool> {
        self.increment(id, Counter::Completions).await
    }

    pub async fn like_quiz(&self, id: &str) -> Result<bool> {
        self.increment(id, Counter::Likes).await
    }

    pub async fn dislike_quiz(&self, id: &str) -> Result<bool> {
        self.increment(id, Counter::Dislikes).await
    }

    /// Make a quiz publicly visible. Returns `false` if the quiz does not exist.
    pub async fn set_public(&self, id: &str) -> Result<bool> {
        let changed = self
            .conn()
            .execute(
                r#"
                UPDATE quizzes
                SET is_public = 1, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                WHERE id = ?
                "#,
                params![id],
            )
            .await?;

        if changed > 0 {
            tracing::info!("quiz shared: {id}");
        }
        Ok(changed > 0)
    }
}
