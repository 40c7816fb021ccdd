use std::time::Duration;

pub const GENERATE_QUIZ_URL: &str = "/api/generate-quiz";
pub const UPLOAD_QUIZ_URL: &str = "/api/generate-quiz/upload";
pub const GENERATE_TITLE_URL: &str = "/api/generate-title";
pub const QUIZZES_URL: &str = "/api/quizzes";
pub const QUIZ_PATH: &str = "/api/quizzes/{id}";
pub const COMPLETE_QUIZ_PATH: &str = "/api/quizzes/{id}/complete";
pub const LIKE_QUIZ_PATH: &str = "/api/quizzes/{id}/like";
pub const DISLIKE_QUIZ_PATH: &str = "/api/quizzes/{id}/dislike";
pub const SHARE_QUIZ_PATH: &str = "/api/quizzes/{id}/share";
pub const USER_QUIZZES_PATH: &str = "/api/users/{user_id}/quizzes";

pub fn quiz_url(id: &str) -> String {
    format!("/api/quizzes/{id}")
}

pub fn complete_quiz_url(id: &str) -> String {
    format!("/api/quizzes/{id}/complete")
}

pub fn like_quiz_url(id: &str) -> String {
    format!("/api/quizzes/{id}/like")
}

pub fn dislike_quiz_url(id: &str) -> String {
    format!("/api/quizzes/{id}/dislike")
}

pub fn share_quiz_url(id: &str) -> String {
    format!("/api/quizzes/{id}/share")
}

pub fn user_quizzes_url(user_id: &str) -> String {
    format!("/api/users/{user_id}/quizzes")
}

// Identity forwarded by the auth layer in front of the service
pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";

pub const REJECTED_FILES_HEADER: &str = "x-rejected-files";

// Uploads
pub const MAX_FILE_BYTES: usize = 5 * 1024 * 1024;
pub const MAX_REQUEST_BYTES: usize = 32 * 1024 * 1024;
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "text/plain",
    "text/html",
    "text/css",
    "text/javascript",
    "application/json",
    "application/xml",
    "text/xml",
    "text/markdown",
];

// Generation
pub const OPTION_COUNT: usize = 5;
pub const GENERATION_TEMPERATURE: f32 = 0.7;
pub const MAX_OUTPUT_TOKENS: u32 = 2000;
pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-latest";
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TITLE: &str = "Quiz";
pub const MAX_TITLE_WORDS: usize = 3;

// Browsing
pub const DEFAULT_BROWSE_LIMIT: u32 = 8;
pub const MAX_BROWSE_LIMIT: u32 = 50;
