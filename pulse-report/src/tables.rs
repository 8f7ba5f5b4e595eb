//! ASCII tables for the console report, built with the [`tabled`] crate

use pulse_types::{CategorySummary, Post, TIMESTAMP_FORMAT};
use tabled::{Table, Tabled};

/// One post as shown in the sample rows table
#[derive(Debug, Clone, Tabled)]
pub struct PostRow {
    #[tabled(rename = "id")]
    pub id: u64,
    #[tabled(rename = "text")]
    pub text: String,
    #[tabled(rename = "category")]
    pub category: String,
    #[tabled(rename = "created_at")]
    pub created_at: String,
    #[tabled(rename = "likes")]
    pub likes: u64,
    #[tabled(rename = "retweets")]
    pub retweets: u64,
    #[tabled(rename = "text_clean")]
    pub text_clean: String,
}

impl From<&Post> for PostRow {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            text: post.text.clone().unwrap_or_default(),
            category: post.category.to_string(),
            created_at: post
                .created_at
                .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
                .unwrap_or_else(|| "NaT".to_string()),
            likes: post.likes,
            retweets: post.retweets,
            text_clean: post.text_clean.clone(),
        }
    }
}

/// Likes aggregate for one category
#[derive(Debug, Clone, Tabled)]
pub struct CategoryRow {
    #[tabled(rename = "category")]
    pub category: String,
    #[tabled(rename = "count")]
    pub count: usize,
    #[tabled(rename = "sum")]
    pub sum: u64,
    #[tabled(rename = "mean")]
    pub mean: String,
    #[tabled(rename = "median")]
    pub median: String,
}

impl From<&CategorySummary> for CategoryRow {
    fn from(summary: &CategorySummary) -> Self {
        Self {
            category: summary.category.to_string(),
            count: summary.count,
            sum: summary.sum,
            mean: format!("{:.2}", summary.mean),
            median: format!("{:.1}", summary.median),
        }
    }
}

/// Performance status for one category
#[derive(Debug, Clone, Tabled)]
pub struct StatusRow {
    #[tabled(rename = "category")]
    pub category: String,
    #[tabled(rename = "mean")]
    pub mean: String,
    #[tabled(rename = "status")]
    pub status: String,
}

impl From<&CategorySummary> for StatusRow {
    fn from(summary: &CategorySummary) -> Self {
        Self {
            category: summary.category.to_string(),
            mean: format!("{:.2}", summary.mean),
            status: summary.status.to_string(),
        }
    }
}

/// Render rows as a table, or a placeholder line when there are none
pub fn format_table<T: Tabled>(rows: &[T]) -> String {
    if rows.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(rows).to_string()
}

pub fn post_table(posts: &[Post]) -> String {
    let rows: Vec<PostRow> = posts.iter().map(PostRow::from).collect();
    format_table(&rows)
}

pub fn category_table(categories: &[CategorySummary]) -> String {
    let rows: Vec<CategoryRow> = categories.iter().map(CategoryRow::from).collect();
    format_table(&rows)
}

pub fn status_table(categories: &[CategorySummary]) -> String {
    let rows: Vec<StatusRow> = categories.iter().map(StatusRow::from).collect();
    format_table(&rows)
}
