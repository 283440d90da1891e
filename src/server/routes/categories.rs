use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::queries::{categories::list_categories, questions::get_questions_for_category},
    pagination::paginate,
    server::{
        app::AppState,
        error::ApiResponse,
        extract::{IdPath, Page},
    },
};

use super::QuestionsPage;

#[derive(Serialize)]
struct CategoriesBody {
    success: bool,
    categories: BTreeMap<i64, String>,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesBody> {
    let categories = list_categories(&pool).await?;
    Ok(Json(CategoriesBody {
        success: true,
        categories,
    }))
}

async fn get_category_questions(
    State(pool): State<SqlitePool>,
    IdPath(id): IdPath,
    Page(page): Page,
) -> ApiResponse<QuestionsPage> {
    let (category, questions) = get_questions_for_category(&pool, id).await?;
    tracing::debug!(
        "Category {} holds {} questions",
        category.name,
        questions.len()
    );
    Ok(Json(QuestionsPage {
        success: true,
        questions: paginate(page, &questions).to_vec(),
        total_questions: questions.len(),
        current_category: Some(id),
        categories: None,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(get_category_questions))
        .with_state(state)
}
