use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{queries::categories::get_category, Question},
    quiz::{next_question, QuizScope},
    server::{
        app::AppState,
        deserializers::Stri64,
        error::{ApiError, ApiResponse},
        extract::JsonBody,
    },
    telemetry::{QUIZ_EXHAUSTED, QUIZ_QUESTIONS_SERVED},
};

#[derive(Deserialize)]
struct QuizCategory {
    id: Stri64,
    #[serde(rename = "type", default)]
    name: Option<String>,
}

#[derive(Deserialize)]
struct QuizTurn {
    #[serde(default)]
    previous_questions: Vec<Stri64>,
    quiz_category: QuizCategory,
}

#[derive(Serialize)]
struct QuizBody {
    success: bool,
    /// `None` once every question in scope has been played.
    question: Option<Question>,
}

/// Metric labels for a turn. Only stored category names become label values,
/// so clients cannot mint new series.
async fn metric_labels(
    pool: &SqlitePool,
    category_id: i64,
    scope: &QuizScope,
) -> sqlx::Result<(&'static str, String)> {
    let QuizScope::Category(name) = scope else {
        return Ok(("all", String::new()));
    };
    Ok(match get_category(pool, category_id).await? {
        Some(category) if &category.name == name => ("category", category.name),
        _ => ("unknown", String::new()),
    })
}

async fn play_turn(
    State(pool): State<SqlitePool>,
    JsonBody(turn): JsonBody<QuizTurn>,
) -> ApiResponse<QuizBody> {
    let category_id = turn.quiz_category.id.0;
    let scope = QuizScope::new(category_id, turn.quiz_category.name.as_deref()).ok_or_else(|| {
        tracing::debug!("Quiz category {category_id} sent without a type");
        ApiError::Unprocessable
    })?;
    let previous: Vec<i64> = turn.previous_questions.into_iter().map(|id| id.0).collect();

    let question = next_question(&pool, &previous, &scope).await?;
    let (kind, category) = metric_labels(&pool, category_id, &scope).await?;
    let labels = [kind, category.as_str()];
    match &question {
        Some(q) => {
            QUIZ_QUESTIONS_SERVED.with_label_values(&labels).inc();
            tracing::debug!("Serving question {} after {} previous", q.id, previous.len());
        }
        None => {
            QUIZ_EXHAUSTED.with_label_values(&labels).inc();
            tracing::debug!("No unseen questions left in {scope:?}");
        }
    }
    Ok(Json(QuizBody {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_turn))
        .with_state(state)
}
