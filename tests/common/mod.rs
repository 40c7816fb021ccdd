#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json, Router};
use quizgen::{
    db::Db,
    models::{AnswerLabel, Question},
    services::{GeminiClient, GenerationService},
    AppState,
};
use serde_json::{json, Value};

pub async fn create_test_db() -> Db {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path =
        std::env::temp_dir().join(format!("quizgen_test_{}_{}.db", std::process::id(), id));
    // Clean up leftover file from previous runs
    let _ = std::fs::remove_file(&path);
    let url = format!("file:{}", path.display());
    Db::new(url, None).await.expect("failed to create test database")
}

pub fn question(subtopic: usize) -> Question {
    Question {
        question: format!("Question about subtopic {subtopic}?"),
        options: ["Alveoli", "Trachea", "Bronchi", "Larynx", "Pharynx"]
            .map(String::from)
            .to_vec(),
        answer: AnswerLabel::A,
        explanation: "Gas exchange happens in the alveoli.".to_string(),
        subtopic,
    }
}

/// Requests received by the fake model, for asserting on what was sent.
#[derive(Clone, Default)]
pub struct Received(Arc<Mutex<Vec<(Option<String>, Value)>>>);

impl Received {
    pub fn bodies(&self) -> Vec<Value> {
        self.0.lock().unwrap().iter().map(|(_, b)| b.clone()).collect()
    }

    pub fn api_keys(&self) -> Vec<Option<String>> {
        self.0.lock().unwrap().iter().map(|(k, _)| k.clone()).collect()
    }
}

#[derive(Clone)]
struct FakeModel {
    status: StatusCode,
    reply: Value,
    received: Received,
}

async fn fake_generate(
    State(model): State<FakeModel>,
    headers: axum::http::HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    model.received.0.lock().unwrap().push((key, body));
    (model.status, Json(model.reply))
}

/// Start a local stand-in for the Gemini API that answers every request
/// with `status` and `reply`. Returns its base URL.
pub async fn spawn_fake_model(status: StatusCode, reply: Value) -> (String, Received) {
    let received = Received::default();
    let app = Router::new().fallback(fake_generate).with_state(FakeModel {
        status,
        reply,
        received: received.clone(),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), received)
}

/// A Gemini response whose first candidate carries `text`.
pub fn model_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

pub async fn app_with_model(base_url: &str) -> (axum::Router, Db) {
    let db = create_test_db().await;
    let client = GeminiClient::new("test-key".to_string(), "gemini-test".to_string())
        .unwrap()
        .with_base_url(base_url);
    let state = AppState {
        db: db.clone(),
        generation: Some(GenerationService::new(client)),
    };
    (quizgen::router(state), db)
}

pub async fn app_without_model() -> (axum::Router, Db) {
    let db = create_test_db().await;
    let state = AppState {
        db: db.clone(),
        generation: None,
    };
    (quizgen::router(state), db)
}

pub async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
