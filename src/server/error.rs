use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::queries::categories::ListCategoriesError;
use crate::db::queries::questions::{
    CategoryQuestionsError, CreateQuestionError, DeleteQuestionError,
};

pub type ApiResponse<T> = Result<Json<T>, ApiError>;

/// Every failure a client can observe. The message is fixed per kind so
/// internal details never leave the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("bad request")]
    BadRequest,
    #[error("resource not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("unprocessable")]
    Unprocessable,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "success": false,
            "error": status.as_u16(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> Self {
        tracing::error!("Database error: {error}");
        ApiError::Unprocessable
    }
}

impl From<ListCategoriesError> for ApiError {
    fn from(error: ListCategoriesError) -> Self {
        match error {
            ListCategoriesError::Empty => ApiError::NotFound,
            ListCategoriesError::Database(e) => e.into(),
        }
    }
}

impl From<CategoryQuestionsError> for ApiError {
    fn from(error: CategoryQuestionsError) -> Self {
        match error {
            CategoryQuestionsError::UnknownCategory(id) => {
                tracing::debug!("Category {id} requested but not found");
                ApiError::NotFound
            }
            CategoryQuestionsError::Database(e) => e.into(),
        }
    }
}

impl From<CreateQuestionError> for ApiError {
    fn from(error: CreateQuestionError) -> Self {
        match error {
            CreateQuestionError::UnknownCategory(id) => {
                tracing::warn!("Refusing question for unknown category {id}");
                ApiError::Unprocessable
            }
            CreateQuestionError::Database(e) => e.into(),
        }
    }
}

impl From<DeleteQuestionError> for ApiError {
    fn from(error: DeleteQuestionError) -> Self {
        match error {
            DeleteQuestionError::NotFound(_) => ApiError::NotFound,
            DeleteQuestionError::Database(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_of(error: ApiError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn every_kind_has_the_same_shape() {
        let cases = [
            (ApiError::BadRequest, 400, "bad request"),
            (ApiError::NotFound, 404, "resource not found"),
            (ApiError::MethodNotAllowed, 405, "method not allowed"),
            (ApiError::Unprocessable, 422, "unprocessable"),
        ];
        for (error, code, message) in cases {
            let (status, body) = body_of(error).await;
            assert_eq!(status.as_u16(), code);
            assert_eq!(
                body,
                json!({"success": false, "error": code, "message": message})
            );
        }
    }

    #[test]
    fn operation_errors_pick_the_right_status() {
        assert_eq!(
            ApiError::from(DeleteQuestionError::NotFound(3)),
            ApiError::NotFound
        );
        assert_eq!(
            ApiError::from(DeleteQuestionError::Database(sqlx::Error::PoolTimedOut)),
            ApiError::Unprocessable
        );
        assert_eq!(
            ApiError::from(CreateQuestionError::UnknownCategory(3)),
            ApiError::Unprocessable
        );
        assert_eq!(
            ApiError::from(CategoryQuestionsError::UnknownCategory(3)),
            ApiError::NotFound
        );
        assert_eq!(ApiError::from(ListCategoriesError::Empty), ApiError::NotFound);
    }
}
