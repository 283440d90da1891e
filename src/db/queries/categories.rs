use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    // questions reference this display name, not the id
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ListCategoriesError {
    #[error("no categories are defined")]
    Empty,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub async fn get_all_categories(pool: &SqlitePool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
SELECT id, "type"
FROM categories
ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
SELECT id, "type" FROM categories WHERE categories.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Maps every category id to its display name.
pub async fn list_categories(
    pool: &SqlitePool,
) -> Result<BTreeMap<i64, String>, ListCategoriesError> {
    let categories = get_all_categories(pool).await?;
    if categories.is_empty() {
        return Err(ListCategoriesError::Empty);
    }
    Ok(categories.into_iter().map(|c| (c.id, c.name)).collect())
}

pub async fn import_categories(pool: &SqlitePool, categories: Vec<Category>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for category in categories {
        sqlx::query(
            r#"
INSERT INTO categories (id, "type") VALUES (?1, ?2)
            "#,
        )
        .bind(category.id)
        .bind(category.name)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}
