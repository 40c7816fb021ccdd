use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    http::{HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    models::{GenerateQuizRequest, UploadedFile},
    names,
    pipeline::{
        encoder::{self, EncodedBatch},
        split_sub_topics, GenerationInput,
    },
    rejections::{AppError, ResultExt},
    services::{GenerationError, GenerationService},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::GENERATE_QUIZ_URL, post(generate_quiz))
        .route(names::UPLOAD_QUIZ_URL, post(upload_quiz))
        .route(names::GENERATE_TITLE_URL, post(generate_title))
}

fn generation_service(state: &AppState) -> Result<&GenerationService, GenerationError> {
    state.generation.as_ref().ok_or_else(|| {
        tracing::error!("Missing Google API Key");
        GenerationError::MissingCredentials
    })
}

fn log_failure(e: &GenerationError) {
    match e {
        GenerationError::Extraction(err) => {
            tracing::warn!(raw = %err.raw, "could not extract JSON from model output")
        }
        _ => tracing::error!("quiz generation failed: {e}"),
    }
}

/// Shared tail of both generation endpoints: check input, run the pipeline,
/// answer with the question array.
async fn run_generation(
    state: &AppState,
    main_topic: &str,
    sub_topics: &[String],
    batch: EncodedBatch,
) -> Result<Response, AppError> {
    let rejected = batch.rejected.len();
    let input = GenerationInput::new(main_topic, sub_topics, batch.files)?;
    let service = generation_service(state)?;

    let draft = service.generate_quiz(input).await.inspect_err(log_failure)?;

    let mut headers = HeaderMap::new();
    headers.insert(names::REJECTED_FILES_HEADER, HeaderValue::from(rejected));

    Ok((headers, Json(draft.questions)).into_response())
}

async fn generate_quiz(
    State(state): State<AppState>,
    payload: Result<Json<GenerateQuizRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = payload.reject_input("failed to decode request body")?;

    let batch = encoder::screen_encoded(body.files);
    run_generation(&state, &body.main_topic, &body.sub_topics, batch).await
}

async fn upload_quiz(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut main_topic = String::new();
    let mut sub_topics = Vec::new();
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .reject_input("failed to read multipart field")?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "mainTopic" => {
                main_topic = field.text().await.reject_input("failed to read field data")?;
            }
            "subTopics" => {
                let raw = field.text().await.reject_input("failed to read field data")?;
                sub_topics = split_sub_topics(&raw);
            }
            "files" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.reject_input("failed to read file data")?;
                uploads.push(UploadedFile {
                    name: file_name,
                    mime_type,
                    bytes: bytes.to_vec(),
                });
            }
            other => tracing::debug!("ignoring multipart field {other}"),
        }
    }

    let batch = encoder::encode_files(&uploads);
    run_generation(&state, &main_topic, &sub_topics, batch).await
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TitleRequest {
    #[serde(default)]
    file_names: Vec<String>,
}

#[derive(Serialize)]
struct TitleResponse {
    title: String,
}

async fn generate_title(
    State(state): State<AppState>,
    payload: Result<Json<TitleRequest>, JsonRejection>,
) -> Result<Json<TitleResponse>, AppError> {
    let Json(body) = payload.reject_input("failed to decode request body")?;
    if body.file_names.is_empty() {
        return Err(AppError::Input("at least one file name is required"));
    }

    let service = generation_service(&state)?;
    let title = service
        .generate_title(&body.file_names)
        .await
        .inspect_err(log_failure)?;

    Ok(Json(TitleResponse { title }))
}
