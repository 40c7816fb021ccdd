// Database schema initialization

use color_eyre::Result;

pub async fn create_schema(conn: &libsql::Connection) -> Result<()> {
    // One row per quiz; subtopics and questions are JSON documents.
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS quizzes (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            user_id TEXT,
            creator_name TEXT,
            main_topic TEXT NOT NULL,
            sub_topics TEXT NOT NULL,
            questions TEXT NOT NULL,
            completions INTEGER NOT NULL DEFAULT 0 CHECK (completions >= 0),
            likes INTEGER NOT NULL DEFAULT 0 CHECK (likes >= 0),
            dislikes INTEGER NOT NULL DEFAULT 0 CHECK (dislikes >= 0),
            is_public INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )
        "#,
        (),
    )
    .await?;

    conn.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_quizzes_public_created
        ON quizzes(is_public, created_at)
        "#,
        (),
    )
    .await?;

    conn.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_quizzes_user_created
        ON quizzes(user_id, created_at)
        "#,
        (),
    )
    .await?;

    Ok(())
}
