use color_eyre::Result;
use libsql::params::IntoParams;

use super::models::{Quiz, QuizRow};

pub(crate) const QUIZ_COLUMNS: &str = "id, title, user_id, creator_name, created_at, updated_at, \
     main_topic, sub_topics, questions, completions, likes, dislikes, is_public";

/// Fetch all rows and convert each into a [`Quiz`].
pub async fn fetch_quizzes(
    conn: &libsql::Connection,
    sql: &str,
    params: impl IntoParams,
) -> Result<Vec<Quiz>> {
    let mut rows = conn.query(sql, params).await?;
    let mut quizzes = Vec::new();
    while let Some(row) = rows.next().await? {
        quizzes.push(Quiz::try_from(libsql::de::from_row::<QuizRow>(&row)?)?);
    }
    Ok(quizzes)
}

/// Fetch the first row as a [`Quiz`], or `None` if nothing matched.
pub async fn fetch_quiz(
    conn: &libsql::Connection,
    sql: &str,
    params: impl IntoParams,
) -> Result<Option<Quiz>> {
    match conn.query(sql, params).await?.next().await? {
        Some(row) => Ok(Some(Quiz::try_from(libsql::de::from_row::<QuizRow>(&row)?)?)),
        None => Ok(None),
    }
}
