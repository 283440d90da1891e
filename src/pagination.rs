/// Number of questions returned per page.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Returns the slice of `items` shown on the 1-based `page`.
///
/// Pages below 1 behave like page 1. A page past the end yields an empty slice.
pub fn paginate<T>(page: i64, items: &[T]) -> &[T] {
    let page = usize::try_from(page.max(1)).unwrap_or(usize::MAX);
    let start = (page - 1).saturating_mul(QUESTIONS_PER_PAGE);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn first_page_holds_at_most_ten_items() {
        let items = numbers(25);
        assert_eq!(paginate(1, &items), &items[0..10]);
    }

    #[test]
    fn last_page_is_partial() {
        let items = numbers(25);
        assert_eq!(paginate(3, &items), &[21, 22, 23, 24, 25]);
    }

    #[test]
    fn non_positive_page_means_first_page() {
        let items = numbers(12);
        assert_eq!(paginate(0, &items), paginate(1, &items));
        assert_eq!(paginate(-4, &items), paginate(1, &items));
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let items = numbers(10);
        assert!(paginate(2, &items).is_empty());
        assert!(paginate(i64::MAX, &items).is_empty());
    }

    #[test]
    fn every_page_matches_the_window() {
        let items = numbers(47);
        for page in 1..=6i64 {
            let start = ((page - 1) * 10) as usize;
            let end = (start + 10).min(items.len());
            let expected: &[usize] = if start < items.len() { &items[start..end] } else { &[] };
            assert_eq!(paginate(page, &items), expected);
        }
    }
}
