use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::get_all_categories,
            questions::{self, get_all_questions, search_questions},
        },
        NewQuestion, Question,
    },
    pagination::paginate,
    server::{
        app::AppState,
        deserializers::Stri64,
        error::{ApiError, ApiResponse},
        extract::{IdPath, JsonBody, Page},
    },
};

use super::QuestionsPage;

/// Body of `POST /questions`. A non-empty `searchTerm` turns the request
/// into a search; otherwise the remaining fields describe a new question.
#[derive(Deserialize)]
struct QuestionsBody {
    question: Option<String>,
    answer: Option<String>,
    difficulty: Option<Stri64>,
    category: Option<Stri64>,
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

impl QuestionsBody {
    fn into_new_question(self) -> Option<NewQuestion> {
        let question = self.question.filter(|q| !q.trim().is_empty())?;
        let answer = self.answer.filter(|a| !a.trim().is_empty())?;
        Some(NewQuestion {
            question,
            answer,
            difficulty: self.difficulty?.0,
            category: self.category?.0,
        })
    }
}

#[derive(Serialize)]
struct CreatedBody {
    success: bool,
    question: Question,
}

#[derive(Serialize)]
struct DeletedBody {
    success: bool,
    deleted: i64,
}

async fn get_questions(
    State(pool): State<SqlitePool>,
    Page(page): Page,
) -> ApiResponse<QuestionsPage> {
    let questions = get_all_questions(&pool).await?;
    let current = paginate(page, &questions);
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }
    let categories = get_all_categories(&pool).await?;
    Ok(Json(QuestionsPage {
        success: true,
        questions: current.to_vec(),
        total_questions: questions.len(),
        current_category: None,
        categories: Some(categories),
    }))
}

async fn search_or_create(
    State(pool): State<SqlitePool>,
    Page(page): Page,
    JsonBody(mut body): JsonBody<QuestionsBody>,
) -> Result<Response, ApiError> {
    if let Some(term) = body.search_term.take().filter(|t| !t.is_empty()) {
        let found = search_questions(&pool, &term).await?;
        tracing::debug!("Search for {term:?} matched {} questions", found.len());
        let page = QuestionsPage {
            success: true,
            questions: paginate(page, &found).to_vec(),
            total_questions: found.len(),
            current_category: None,
            categories: None,
        };
        return Ok(Json(page).into_response());
    }

    let new_question = body.into_new_question().ok_or(ApiError::Unprocessable)?;
    let question = questions::create_question(&pool, new_question).await?;
    tracing::info!("Created question {} in {}", question.id, question.category);
    Ok(Json(CreatedBody {
        success: true,
        question,
    })
    .into_response())
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    IdPath(id): IdPath,
) -> ApiResponse<DeletedBody> {
    let deleted = questions::delete_question(&pool, id).await?;
    tracing::info!("Deleted question {deleted}");
    Ok(Json(DeletedBody {
        success: true,
        deleted,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(get_questions).post(search_or_create))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
