use chrono::{DateTime, NaiveDate, NaiveDateTime};
use pulse_types::{Category, Post, RawPost};
use std::collections::HashSet;

use crate::text::clean_text;

/// Layouts accepted for naive timestamps, tried in order
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Statistics collected while cleaning a table
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleaningStats {
    /// Rows handed to the cleaner
    pub rows_in: usize,
    /// Rows dropped as duplicates of an earlier row
    pub duplicates_dropped: usize,
    /// Timestamps present but unparseable
    pub timestamps_coerced: usize,
    /// Like/retweet values present but unparseable
    pub counts_defaulted: usize,
    /// Rows with no category
    pub categories_filled: usize,
    /// Rows whose category label is outside the vocabulary
    pub categories_unrecognized: usize,
}

/// Parse a creation timestamp.
///
/// Returns `None` for missing or unparseable values; callers must tolerate
/// posts without a timestamp.
pub fn parse_timestamp(raw: Option<&str>) -> Option<NaiveDateTime> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }

    for format in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Parse a like or retweet count.
///
/// Integers and finite decimals (truncated) are accepted. Negative values
/// clamp to 0; missing or unparseable values default to 0.
pub fn parse_count(raw: Option<&str>) -> u64 {
    parse_count_checked(raw).unwrap_or(0)
}

fn parse_count_checked(raw: Option<&str>) -> Option<u64> {
    let raw = raw?.trim();

    if let Ok(value) = raw.parse::<i64>() {
        return Some(value.max(0) as u64);
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value.trunc().max(0.0) as u64),
        _ => None,
    }
}

fn is_present(raw: Option<&str>) -> bool {
    raw.is_some_and(|s| !s.trim().is_empty())
}

/// How a row's category label was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CategoryLabel {
    Known(Category),
    Missing,
    Unrecognized,
}

impl CategoryLabel {
    fn resolve(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => CategoryLabel::Missing,
            Some(label) => Category::parse(label)
                .map(CategoryLabel::Known)
                .unwrap_or(CategoryLabel::Unrecognized),
        }
    }

    /// Missing and unrecognized labels both become `unknown`
    fn category(self) -> Category {
        match self {
            CategoryLabel::Known(category) => category,
            CategoryLabel::Missing | CategoryLabel::Unrecognized => Category::Unknown,
        }
    }
}

/// Clean a single row. `position` is assigned later by [`clean_posts`].
pub fn clean_post(raw: &RawPost) -> Post {
    build_post(raw, CategoryLabel::resolve(raw.category.as_deref()).category())
}

fn build_post(raw: &RawPost, category: Category) -> Post {
    Post {
        position: 0,
        id: raw.id,
        text: raw.text.clone(),
        category,
        created_at: parse_timestamp(raw.created_at.as_deref()),
        likes: parse_count(raw.likes.as_deref()),
        retweets: parse_count(raw.retweets.as_deref()),
        text_clean: clean_text(raw.text.as_deref()),
    }
}

/// Clean a full table.
///
/// Rows sharing `(text_clean, created_at)` with an earlier row are dropped and
/// surviving rows are renumbered `0..n`.
pub fn clean_posts(raw_posts: &[RawPost]) -> (Vec<Post>, CleaningStats) {
    let mut stats = CleaningStats {
        rows_in: raw_posts.len(),
        ..CleaningStats::default()
    };
    let mut seen: HashSet<(String, Option<NaiveDateTime>)> = HashSet::new();
    let mut posts = Vec::with_capacity(raw_posts.len());

    for raw in raw_posts {
        let label = CategoryLabel::resolve(raw.category.as_deref());
        let mut post = build_post(raw, label.category());

        if is_present(raw.created_at.as_deref()) && post.created_at.is_none() {
            stats.timestamps_coerced += 1;
            tracing::debug!("Post {}: unparseable timestamp {:?}", raw.id, raw.created_at);
        }
        for field in [raw.likes.as_deref(), raw.retweets.as_deref()] {
            if is_present(field) && parse_count_checked(field).is_none() {
                stats.counts_defaulted += 1;
                tracing::debug!("Post {}: count {:?} defaulted to 0", raw.id, field);
            }
        }
        match label {
            CategoryLabel::Unrecognized => {
                stats.categories_unrecognized += 1;
                tracing::warn!(
                    "Post {}: category {:?} is not recognized, using unknown",
                    raw.id,
                    raw.category
                );
            }
            CategoryLabel::Missing => stats.categories_filled += 1,
            CategoryLabel::Known(_) => {}
        }

        if !seen.insert((post.text_clean.clone(), post.created_at)) {
            stats.duplicates_dropped += 1;
            continue;
        }

        post.position = posts.len();
        posts.push(post);
    }

    tracing::info!(
        rows_in = stats.rows_in,
        rows_out = posts.len(),
        duplicates = stats.duplicates_dropped,
        timestamps_coerced = stats.timestamps_coerced,
        counts_defaulted = stats.counts_defaulted,
        "Cleaned post table"
    );

    (posts, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn raw(id: u64, text: &str, category: Option<&str>, created_at: &str, likes: &str) -> RawPost {
        RawPost {
            id,
            text: Some(text.to_string()),
            category: category.map(str::to_string),
            created_at: Some(created_at.to_string()),
            likes: Some(likes.to_string()),
            retweets: Some("3".to_string()),
        }
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 2, 3)
            .unwrap()
            .and_hms_opt(4, 5, 6)
            .unwrap();
        assert_eq!(parse_timestamp(Some("2025-02-03T04:05:06")), Some(expected));
        assert_eq!(parse_timestamp(Some("2025-02-03 04:05:06")), Some(expected));
        assert_eq!(parse_timestamp(Some("2025-02-03T04:05:06Z")), Some(expected));
        assert_eq!(
            parse_timestamp(Some("2025-02-03T06:05:06+02:00")),
            Some(expected)
        );
        assert_eq!(
            parse_timestamp(Some("2025-02-03")),
            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap().and_hms_opt(0, 0, 0)
        );
    }

    #[test]
    fn test_parse_timestamp_is_permissive() {
        assert_eq!(parse_timestamp(None), None);
        assert_eq!(parse_timestamp(Some("")), None);
        assert_eq!(parse_timestamp(Some("yesterday")), None);
        assert_eq!(parse_timestamp(Some("2025-13-40")), None);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(Some("42")), 42);
        assert_eq!(parse_count(Some(" 17 ")), 17);
        assert_eq!(parse_count(Some("12.9")), 12);
        assert_eq!(parse_count(Some("-4")), 0);
        assert_eq!(parse_count(Some("lots")), 0);
        assert_eq!(parse_count(Some("NaN")), 0);
        assert_eq!(parse_count(Some("")), 0);
        assert_eq!(parse_count(None), 0);
    }

    #[test]
    fn test_missing_category_becomes_unknown() {
        let (posts, stats) = clean_posts(&[raw(1, "hello", None, "2025-01-01T00:00:00", "5")]);
        assert_eq!(posts[0].category, Category::Unknown);
        assert_eq!(stats.categories_filled, 1);

        let (posts, stats) =
            clean_posts(&[raw(1, "hello", Some("sports"), "2025-01-01T00:00:00", "5")]);
        assert_eq!(posts[0].category, Category::Unknown);
        assert_eq!(stats.categories_unrecognized, 1);
    }

    #[test]
    fn test_duplicates_collapse_to_first_and_renumber() {
        let rows = vec![
            raw(1, "Top 5 street foods", Some("food"), "2025-01-02T00:00:00", "10"),
            raw(2, "Top 5 street foods #yum", Some("food"), "2025-01-02T00:00:00", "99"),
            raw(3, "Top 5 street foods", Some("food"), "2025-01-03T00:00:00", "7"),
            raw(4, "Hidden beaches in Goa", Some("travel"), "2025-01-02T00:00:00", "1"),
        ];

        let (posts, stats) = clean_posts(&rows);
        assert_eq!(stats.duplicates_dropped, 1);
        let ids: Vec<u64> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
        let positions: Vec<usize> = posts.iter().map(|p| p.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert_eq!(posts[0].likes, 10);
    }

    #[test]
    fn test_missing_timestamps_dedupe_together() {
        let rows = vec![
            raw(1, "same", Some("tech"), "garbage", "1"),
            raw(2, "same", Some("tech"), "", "2"),
        ];
        let (posts, stats) = clean_posts(&rows);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].created_at, None);
        assert_eq!(stats.timestamps_coerced, 1);
    }

    #[test]
    fn test_bad_counts_are_tallied() {
        let mut row = raw(1, "x", Some("tech"), "2025-01-01", "many");
        row.retweets = None;
        let (posts, stats) = clean_posts(&[row]);
        assert_eq!(posts[0].likes, 0);
        assert_eq!(posts[0].retweets, 0);
        assert_eq!(stats.counts_defaulted, 1);
    }

    #[test]
    fn test_cleaning_cleaned_data_keeps_row_count() {
        let rows = vec![
            raw(1, "a @x", Some("tech"), "2025-01-01", "1"),
            raw(2, "a", Some("tech"), "2025-01-01", "2"),
            raw(3, "b", None, "nope", "3"),
        ];
        let (first, _) = clean_posts(&rows);
        let round: Vec<RawPost> = first.iter().map(RawPost::from).collect();
        let (second, stats) = clean_posts(&round);

        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), first.len());
        assert_eq!(stats.duplicates_dropped, 0);
        assert_eq!(second, first);
    }

    #[test]
    fn test_category_label_resolution() {
        assert_eq!(
            CategoryLabel::resolve(Some(" Food ")),
            CategoryLabel::Known(Category::Food)
        );
        assert_eq!(CategoryLabel::resolve(Some("  ")), CategoryLabel::Missing);
        assert_eq!(CategoryLabel::resolve(None), CategoryLabel::Missing);
        assert_eq!(CategoryLabel::resolve(Some("sports")), CategoryLabel::Unrecognized);
        assert_eq!(CategoryLabel::Unrecognized.category(), Category::Unknown);

        // A literal "unknown" label is a known category, not a filled one
        let (posts, stats) =
            clean_posts(&[raw(1, "hello", Some("unknown"), "2025-01-01", "5")]);
        assert_eq!(posts[0].category, Category::Unknown);
        assert_eq!(stats.categories_filled, 0);
        assert_eq!(stats.categories_unrecognized, 0);
    }

    #[test]
    fn test_sub_second_timestamps_survive_recleaning() {
        let rows = vec![
            raw(1, "same text", Some("food"), "2025-01-01T00:00:00.1", "1"),
            raw(2, "same text", Some("food"), "2025-01-01T00:00:00.2", "2"),
        ];
        let (first, _) = clean_posts(&rows);
        assert_eq!(first.len(), 2);

        let round: Vec<RawPost> = first.iter().map(RawPost::from).collect();
        let (second, stats) = clean_posts(&round);
        assert_eq!(stats.duplicates_dropped, 0);
        assert_eq!(second, first);
    }

    proptest! {
        #[test]
        fn prop_counts_never_fail(value in "\\PC*") {
            // Any input yields a count without panicking
            let _ = parse_count(Some(&value));
        }

        #[test]
        fn prop_integer_counts_round_trip(value in 0u64..1_000_000) {
            prop_assert_eq!(parse_count(Some(&value.to_string())), value);
        }

        #[test]
        fn prop_dedup_is_idempotent(
            texts in prop::collection::vec("[ab@# ]{0,4}", 0..20),
            days in prop::collection::vec(0u32..3, 20),
            millis in prop::collection::vec(prop::option::of(0u32..1000), 20),
        ) {
            let rows: Vec<RawPost> = texts
                .iter()
                .enumerate()
                .map(|(i, text)| {
                    let day = format!("2025-01-0{}", days[i] + 1);
                    let created_at = match millis[i] {
                        Some(ms) => format!("{}T00:00:00.{:03}", day, ms),
                        None => day,
                    };
                    raw(i as u64 + 1, text, Some("food"), &created_at, "5")
                })
                .collect();

            let (first, _) = clean_posts(&rows);
            let round: Vec<RawPost> = first.iter().map(RawPost::from).collect();
            let (second, _) = clean_posts(&round);
            prop_assert_eq!(first.len(), second.len());
        }
    }
}
