pub mod queries;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Error;

pub use queries::categories::Category;
pub use queries::questions::{NewQuestion, Question, QuestionFilter};

pub async fn establish_connection(path: &str) -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::from_str(format!("sqlite:{}", path).as_str())?
        .create_if_missing(true);
    SqlitePool::connect_with(options).await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Single-connection in-memory database with the schema applied.
///
/// Every connection to `sqlite::memory:` opens a fresh database, so the pool
/// is pinned to one connection that is never recycled.
pub async fn in_memory() -> Result<SqlitePool, Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect("sqlite::memory:")
        .await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use sqlx::SqlitePool;

    use super::queries::{categories, questions};
    use super::{Category, Question};

    /// Seeds the two-category store used across the tests:
    /// Science holds "Q1" and the "Title" question, Art holds "Q2".
    pub async fn seeded_pool() -> SqlitePool {
        let pool = super::in_memory().await.unwrap();
        categories::import_categories(
            &pool,
            vec![
                Category {
                    id: 1,
                    name: "Science".to_owned(),
                },
                Category {
                    id: 2,
                    name: "Art".to_owned(),
                },
            ],
        )
        .await
        .unwrap();
        questions::import_questions(
            &pool,
            vec![
                question(1, "Q1", "A1", 3, "Science"),
                question(2, "Q2", "A2", 2, "Art"),
                question(3, "What is the Title of this song?", "None", 1, "Science"),
            ],
        )
        .await
        .unwrap();
        pool
    }

    pub fn question(id: i64, text: &str, answer: &str, difficulty: i64, category: &str) -> Question {
        Question {
            id,
            question: text.to_owned(),
            answer: answer.to_owned(),
            difficulty,
            category: category.to_owned(),
        }
    }
}
