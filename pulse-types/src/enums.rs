use serde::{Deserialize, Serialize};
use std::fmt;

/// Topical label assigned to a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fitness,
    Tech,
    Family,
    Beauty,
    Food,
    Health,
    Travel,
    Education,
    /// Sentinel for posts whose category was missing
    Unknown,
}

impl Category {
    /// The fixed vocabulary posts are synthesized from, in draw order
    pub const VOCABULARY: [Category; 8] = [
        Category::Fitness,
        Category::Tech,
        Category::Family,
        Category::Beauty,
        Category::Food,
        Category::Health,
        Category::Travel,
        Category::Education,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fitness => "fitness",
            Category::Tech => "tech",
            Category::Family => "family",
            Category::Beauty => "beauty",
            Category::Food => "food",
            Category::Health => "health",
            Category::Travel => "travel",
            Category::Education => "education",
            Category::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fitness" => Some(Category::Fitness),
            "tech" => Some(Category::Tech),
            "family" => Some(Category::Family),
            "beauty" => Some(Category::Beauty),
            "food" => Some(Category::Food),
            "health" => Some(Category::Health),
            "travel" => Some(Category::Travel),
            "education" => Some(Category::Education),
            "unknown" => Some(Category::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a category's mean likes compares to the overall mean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PerformanceStatus {
    #[serde(rename = "performing well")]
    PerformingWell,
    #[default]
    #[serde(rename = "average")]
    Average,
    #[serde(rename = "underperforming")]
    Underperforming,
}

impl PerformanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceStatus::PerformingWell => "performing well",
            PerformanceStatus::Average => "average",
            PerformanceStatus::Underperforming => "underperforming",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "performing well" => Some(PerformanceStatus::PerformingWell),
            "average" => Some(PerformanceStatus::Average),
            "underperforming" => Some(PerformanceStatus::Underperforming),
            _ => None,
        }
    }
}

impl fmt::Display for PerformanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
