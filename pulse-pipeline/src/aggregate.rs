use pulse_types::{Category, CategorySummary, PerformanceStatus, Post, Summary};
use std::collections::BTreeMap;

/// Group mean must exceed the overall mean by this factor to perform well
pub const WELL_FACTOR: f64 = 1.1;
/// Group mean below the overall mean by this factor underperforms
pub const UNDER_FACTOR: f64 = 0.9;

/// Classify a category mean against the overall mean.
///
/// Both comparisons are strict. A zero (or otherwise non-positive) overall
/// mean always yields `Average`.
pub fn classify(mean: f64, overall_mean: f64) -> PerformanceStatus {
    if !overall_mean.is_finite() || overall_mean <= 0.0 {
        return PerformanceStatus::Average;
    }

    if mean > overall_mean * WELL_FACTOR {
        PerformanceStatus::PerformingWell
    } else if mean < overall_mean * UNDER_FACTOR {
        PerformanceStatus::Underperforming
    } else {
        PerformanceStatus::Average
    }
}

/// Median of a set of counts; the mean of the middle pair for even sizes
pub fn median(values: &mut [u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_unstable();

    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] as f64 + values[mid] as f64) / 2.0
    } else {
        values[mid] as f64
    }
}

/// Mean likes across all posts, 0.0 when there are none
pub fn overall_mean(posts: &[Post]) -> f64 {
    if posts.is_empty() {
        return 0.0;
    }
    posts.iter().map(|p| p.likes as f64).sum::<f64>() / posts.len() as f64
}

/// Likes for every post grouped by category, in category order
pub fn likes_by_category(posts: &[Post]) -> BTreeMap<Category, Vec<u64>> {
    let mut groups: BTreeMap<Category, Vec<u64>> = BTreeMap::new();
    for post in posts {
        groups.entry(post.category).or_default().push(post.likes);
    }
    groups
}

/// Summarize likes per category, highest total first
pub fn summarize(posts: &[Post]) -> Summary {
    let overall_mean = overall_mean(posts);

    // Alphabetical first so the stable sort breaks ties by name
    let mut groups: Vec<(Category, Vec<u64>)> = likes_by_category(posts).into_iter().collect();
    groups.sort_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()));

    let mut categories: Vec<CategorySummary> = groups
        .into_iter()
        .map(|(category, mut likes)| {
            let count = likes.len();
            // Counts parsed from huge decimals sit at u64::MAX
            let sum = likes.iter().fold(0u64, |acc, l| acc.saturating_add(*l));
            let mean = likes.iter().map(|l| *l as f64).sum::<f64>() / count as f64;
            CategorySummary {
                category,
                count,
                sum,
                mean,
                median: median(&mut likes),
                status: classify(mean, overall_mean),
            }
        })
        .collect();
    categories.sort_by(|a, b| b.sum.cmp(&a.sum));

    tracing::info!(
        groups = categories.len(),
        overall_mean,
        "Aggregated likes by category"
    );

    Summary {
        overall_mean,
        total_posts: posts.len(),
        categories,
    }
}

/// Number of posts whose category is in `filter`
pub fn count_in_categories(posts: &[Post], filter: &[Category]) -> usize {
    posts.iter().filter(|p| filter.contains(&p.category)).count()
}
