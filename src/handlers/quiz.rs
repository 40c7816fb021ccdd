use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    db::{NewQuiz, Quiz},
    extractors::Requester,
    models::QuizDraft,
    names,
    pipeline::{validate, InputError},
    rejections::{AppError, ResultExt},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::QUIZZES_URL, get(browse_quizzes).post(publish_quiz))
        .route(names::QUIZ_PATH, get(get_quiz))
        .route(names::COMPLETE_QUIZ_PATH, post(complete_quiz))
        .route(names::LIKE_QUIZ_PATH, post(like_quiz))
        .route(names::DISLIKE_QUIZ_PATH, post(dislike_quiz))
        .route(names::SHARE_QUIZ_PATH, post(share_quiz))
        .route(names::USER_QUIZZES_PATH, get(user_quizzes))
}

#[derive(Deserialize)]
struct BrowseQuery {
    limit: Option<u32>,
}

async fn browse_quizzes(
    State(state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> Result<Json<Vec<Quiz>>, AppError> {
    let limit = query
        .limit
        .unwrap_or(names::DEFAULT_BROWSE_LIMIT)
        .clamp(1, names::MAX_BROWSE_LIMIT);

    let quizzes = state
        .db
        .public_quizzes(limit)
        .await
        .reject("could not get public quizzes")?;
    Ok(Json(quizzes))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublishQuizBody {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    main_topic: String,
    #[serde(default)]
    sub_topics: Vec<String>,
    questions: serde_json::Value,
    #[serde(default)]
    creator_name: Option<String>,
}

#[derive(Serialize)]
struct CreatedQuiz {
    id: String,
}

/// Questions coming back from the client are checked again before they are stored.
async fn publish_quiz(
    State(state): State<AppState>,
    requester: Requester,
    payload: Result<Json<PublishQuizBody>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedQuiz>), AppError> {
    let Json(body) = payload.reject_input("failed to decode request body")?;

    let main_topic = body.main_topic.trim().to_string();
    if main_topic.is_empty() {
        return Err(InputError::EmptyTopic.into());
    }

    let sub_topics: Vec<String> = body
        .sub_topics
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if sub_topics.is_empty() {
        return Err(InputError::NoSubtopics.into());
    }

    let questions = validate::validate_questions(body.questions, sub_topics.len())
        .into_result()
        .map_err(AppError::InvalidQuestions)?;

    let title = body
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| main_topic.clone());

    let creator_name = requester.display_name.or(body.creator_name);

    let id = state
        .db
        .create_quiz(NewQuiz {
            title,
            user_id: requester.user_id,
            creator_name,
            draft: QuizDraft {
                main_topic,
                sub_topics,
                questions,
            },
        })
        .await
        .reject("could not create quiz")?;

    Ok((StatusCode::CREATED, Json(CreatedQuiz { id })))
}

async fn find_quiz(state: &AppState, id: &str) -> Result<Quiz, AppError> {
    state
        .db
        .get_quiz(id)
        .await
        .reject("could not get quiz")?
        .ok_or(AppError::NotFound)
}

fn is_owner(quiz: &Quiz, requester: &Requester) -> bool {
    quiz.user_id.as_deref().is_some_and(|owner| requester.is(owner))
}

/// Private quizzes are only visible to their owner; everyone else gets a 404.
async fn get_quiz(
    State(state): State<AppState>,
    requester: Requester,
    Path(id): Path<String>,
) -> Result<Json<Quiz>, AppError> {
    let quiz = find_quiz(&state, &id).await?;

    if quiz.is_public || is_owner(&quiz, &requester) {
        Ok(Json(quiz))
    } else {
        Err(AppError::NotFound)
    }
}

fn updated(found: bool) -> Result<StatusCode, AppError> {
    if found {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

async fn complete_quiz(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    updated(
        state
            .db
            .increment_completion(&id)
            .await
            .reject("could not record completion")?,
    )
}

async fn like_quiz(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    updated(state.db.like_quiz(&id).await.reject("could not like quiz")?)
}

async fn dislike_quiz(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    updated(
        state
            .db
            .dislike_quiz(&id)
            .await
            .reject("could not dislike quiz")?,
    )
}

/// Anonymous quizzes can be shared by anyone; owned ones only by the owner.
async fn share_quiz(
    State(state): State<AppState>,
    requester: Requester,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let quiz = find_quiz(&state, &id).await?;

    if quiz.user_id.is_some() && !is_owner(&quiz, &requester) {
        return Err(AppError::Forbidden);
    }

    updated(state.db.set_public(&id).await.reject("could not share quiz")?)
}

async fn user_quizzes(
    State(state): State<AppState>,
    requester: Requester,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Quiz>>, AppError> {
    let mut quizzes = state
        .db
        .user_quizzes(&user_id)
        .await
        .reject("could not get user quizzes")?;

    if !requester.is(&user_id) {
        quizzes.retain(|q| q.is_public);
    }

    Ok(Json(quizzes))
}
