use serde::{Deserialize, Serialize};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use super::categories::{get_category, Category};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub difficulty: i64,
    /// Display name of the owning category.
    pub category: String,
}

/// A question as submitted by a client; `category` is a category id.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub difficulty: i64,
    pub category: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateQuestionError {
    #[error("category {0} does not exist")]
    UnknownCategory(i64),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteQuestionError {
    #[error("question {0} does not exist")]
    NotFound(i64),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum CategoryQuestionsError {
    #[error("category {0} does not exist")]
    UnknownCategory(i64),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Predicate over the questions table. Criteria combine with AND and results
/// come back ordered by id.
#[derive(Debug, Clone, Default)]
pub struct QuestionFilter {
    category: Option<String>,
    search: Option<String>,
    excluded: Vec<i64>,
}

impl QuestionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only questions whose category name equals `name`.
    pub fn in_category(mut self, name: impl Into<String>) -> Self {
        self.category = Some(name.into());
        self
    }

    /// Only questions whose text contains `term`, ignoring case.
    pub fn matching(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Skip the given question ids.
    pub fn excluding(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.excluded.extend(ids);
        self
    }

    fn build(&self) -> QueryBuilder<'static, Sqlite> {
        let mut builder = QueryBuilder::new(
            "SELECT id, question, answer, difficulty, category FROM questions WHERE 1 = 1",
        );
        if let Some(category) = &self.category {
            builder.push(" AND category = ").push_bind(category.clone());
        }
        if !self.excluded.is_empty() {
            builder.push(" AND id NOT IN (");
            let mut ids = builder.separated(", ");
            for id in &self.excluded {
                ids.push_bind(*id);
            }
            ids.push_unseparated(")");
        }
        builder.push(" ORDER BY id");
        builder
    }

    pub async fn fetch(&self, pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
        let mut builder = self.build();
        let mut questions = builder
            .build_query_as::<Question>()
            .fetch_all(pool)
            .await?;
        // sqlite LIKE only folds ASCII, so the text match runs here
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            questions.retain(|q| q.question.to_lowercase().contains(&term));
        }
        Ok(questions)
    }
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    QuestionFilter::new().fetch(pool).await
}

pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    QuestionFilter::new().matching(term).fetch(pool).await
}

/// Resolves `category_id` and returns it with every question filed under its name.
pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category_id: i64,
) -> Result<(Category, Vec<Question>), CategoryQuestionsError> {
    let category = get_category(pool, category_id)
        .await?
        .ok_or(CategoryQuestionsError::UnknownCategory(category_id))?;
    let questions = QuestionFilter::new()
        .in_category(category.name.as_str())
        .fetch(pool)
        .await?;
    Ok((category, questions))
}

pub async fn create_question(
    pool: &SqlitePool,
    new_question: NewQuestion,
) -> Result<Question, CreateQuestionError> {
    let category = get_category(pool, new_question.category)
        .await?
        .ok_or(CreateQuestionError::UnknownCategory(new_question.category))?;

    let id = sqlx::query(
        r#"
INSERT INTO questions (question, answer, difficulty, category) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&new_question.question)
    .bind(&new_question.answer)
    .bind(new_question.difficulty)
    .bind(&category.name)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(Question {
        id,
        question: new_question.question,
        answer: new_question.answer,
        difficulty: new_question.difficulty,
        category: category.name,
    })
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> Result<i64, DeleteQuestionError> {
    let deleted = sqlx::query(
        r#"
DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();

    if deleted == 0 {
        return Err(DeleteQuestionError::NotFound(id));
    }
    Ok(id)
}

pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for question in questions {
        sqlx::query(
            r#"
INSERT INTO questions (id, question, answer, difficulty, category) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(question.id)
        .bind(question.question)
        .bind(question.answer)
        .bind(question.difficulty)
        .bind(question.category)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}
