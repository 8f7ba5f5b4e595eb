use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::enums::{Category, PerformanceStatus};

/// Timestamp layout used when writing `created_at` back out.
///
/// `%.f` prints sub-second digits only when the value has them.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Number of columns in the cleaned post table
pub const POST_COLUMNS: usize = 7;

// Custom serde module so missing timestamps become empty fields instead of errors
mod optional_timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&date.format(TIMESTAMP_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: Option<String> = Option::deserialize(deserializer)?;
        match s.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// A post row as it arrives from a delimited file or the synthesizer.
///
/// Every field except `id` is kept as an untyped string so that the cleaner
/// decides how malformed values are coerced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPost {
    pub id: u64,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub likes: Option<String>,
    #[serde(default)]
    pub retweets: Option<String>,
}

/// A cleaned post with typed fields and normalized text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Contiguous row position after deduplication
    #[serde(skip)]
    pub position: usize,
    pub id: u64,
    pub text: Option<String>,
    pub category: Category,
    #[serde(with = "optional_timestamp", default)]
    pub created_at: Option<NaiveDateTime>,
    pub likes: u64,
    pub retweets: u64,
    pub text_clean: String,
}

impl From<&Post> for RawPost {
    fn from(post: &Post) -> Self {
        RawPost {
            id: post.id,
            text: post.text.clone(),
            category: Some(post.category.as_str().to_string()),
            created_at: post
                .created_at
                .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string()),
            likes: Some(post.likes.to_string()),
            retweets: Some(post.retweets.to_string()),
        }
    }
}

/// Per-category engagement summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    pub count: usize,
    pub sum: u64,
    pub mean: f64,
    pub median: f64,
    pub status: PerformanceStatus,
}

/// Result of aggregating a cleaned post table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Mean likes across every post, 0.0 for an empty table
    pub overall_mean: f64,
    pub total_posts: usize,
    /// Sorted by total likes, highest first
    pub categories: Vec<CategorySummary>,
}
