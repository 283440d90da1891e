use rand::seq::IteratorRandom;
use sqlx::SqlitePool;

use crate::db::{Question, QuestionFilter};

/// Category id clients send to ask for questions from every category.
pub const ANY_CATEGORY_ID: i64 = 0;

/// Which questions a quiz draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizScope {
    All,
    /// Questions filed under this category name.
    Category(String),
}

impl QuizScope {
    /// Scope for a client-supplied category. Any category other than
    /// [`ANY_CATEGORY_ID`] needs a non-blank name, otherwise `None`.
    pub fn new(category_id: i64, category_name: Option<&str>) -> Option<Self> {
        if category_id == ANY_CATEGORY_ID {
            return Some(QuizScope::All);
        }
        category_name
            .filter(|name| !name.trim().is_empty())
            .map(|name| QuizScope::Category(name.to_owned()))
    }
}

/// Picks a random question in `scope` that is not in `previous`.
///
/// `Ok(None)` means the quiz has run out of unseen questions.
pub async fn next_question(
    pool: &SqlitePool,
    previous: &[i64],
    scope: &QuizScope,
) -> sqlx::Result<Option<Question>> {
    let mut filter = QuestionFilter::new().excluding(previous.iter().copied());
    if let QuizScope::Category(name) = scope {
        filter = filter.in_category(name.as_str());
    }
    let candidates = filter.fetch(pool).await?;
    Ok(pick_random(candidates))
}

fn pick_random(candidates: Vec<Question>) -> Option<Question> {
    candidates.into_iter().choose(&mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures::seeded_pool;

    #[test]
    fn zero_id_means_every_category() {
        assert_eq!(QuizScope::new(0, Some("Science")), Some(QuizScope::All));
        assert_eq!(QuizScope::new(0, None), Some(QuizScope::All));
        assert_eq!(
            QuizScope::new(2, Some("Art")),
            Some(QuizScope::Category("Art".to_owned()))
        );
    }

    #[test]
    fn named_scope_needs_a_name() {
        assert_eq!(QuizScope::new(3, None), None);
        assert_eq!(QuizScope::new(3, Some("  ")), None);
    }

    #[test]
    fn picking_from_nothing_yields_none() {
        assert_eq!(pick_random(Vec::new()), None);
    }

    #[tokio::test]
    async fn never_repeats_a_previous_question() {
        let pool = seeded_pool().await;
        for _ in 0..20 {
            let question = next_question(&pool, &[1, 2], &QuizScope::All)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(question.id, 3);
        }
    }

    #[tokio::test]
    async fn stays_inside_the_category() {
        let pool = seeded_pool().await;
        let scope = QuizScope::Category("Science".to_owned());
        for _ in 0..20 {
            let question = next_question(&pool, &[], &scope).await.unwrap().unwrap();
            assert_eq!(question.category, "Science");
        }
    }

    #[tokio::test]
    async fn walks_every_question_then_runs_out() {
        let pool = seeded_pool().await;
        let mut seen = Vec::new();
        while let Some(question) = next_question(&pool, &seen, &QuizScope::All).await.unwrap() {
            assert!(!seen.contains(&question.id));
            seen.push(question.id);
        }
        seen.sort();
        assert_eq!(seen, vec![1, 2, 3]);
    }
}
