//! Seeded synthetic post generation
//!
//! Two random sources are used: one for categorical draws (category, day
//! offset, like jitter, text template) and one for the Poisson engagement
//! counts. Each is seeded on its own so a given pair of seeds always
//! reproduces the same table.

use chrono::{Duration, NaiveDateTime};
use pulse_types::{Category, RawPost, TIMESTAMP_FORMAT};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Poisson};

use crate::config::Settings;
use crate::error::{PipelineError, Result};

/// Mean of the Poisson draw for likes
pub const LIKES_MEAN: f64 = 50.0;
/// Mean of the Poisson draw for retweets
pub const RETWEETS_MEAN: f64 = 8.0;
/// Largest day offset added to the base date (inclusive)
pub const MAX_DAY_OFFSET: i64 = 250;
/// Inclusive range of the uniform like jitter
pub const LIKES_JITTER: (i64, i64) = (-5, 20);

/// Fixed like bonus for categories that tend to trend
pub fn category_bonus(category: Category) -> i64 {
    match category {
        Category::Food | Category::Tech => 10,
        _ => 0,
    }
}

/// Text templates a post of the given category is drawn from.
///
/// `unknown` has none; the synthesizer only draws from the vocabulary.
pub fn text_samples(category: Category) -> &'static [&'static str] {
    match category {
        Category::Fitness => &["Morning workout done! 💪", "5 tips to build stamina"],
        Category::Tech => &["New AI library released", "How to optimize your pipeline"],
        Category::Family => &["Family dinner memories", "Parenting tips for toddlers"],
        Category::Beauty => &["Skincare routine for glowing skin", "Top makeup trends 2025"],
        Category::Food => &["Tried this pasta recipe — yum!", "Top 5 street foods"],
        Category::Health => &["Mental health matters", "Healthy meals under 500 cal"],
        Category::Travel => &["Hidden beaches in Goa", "Backpacking on a budget"],
        Category::Education => &["How to learn Python fast", "Study tips for exams"],
        Category::Unknown => &[],
    }
}

#[derive(Debug, Clone)]
pub struct SynthConfig {
    pub records: usize,
    pub choice_seed: u64,
    pub numeric_seed: u64,
    pub base_date: NaiveDateTime,
    pub categories: Vec<Category>,
}

impl SynthConfig {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            records: settings.dataset.records,
            choice_seed: settings.dataset.seed,
            numeric_seed: settings.numeric_seed(),
            base_date: settings.base_datetime()?,
            categories: Category::VOCABULARY.to_vec(),
        })
    }
}

/// Generates synthetic post rows
pub struct Synthesizer {
    config: SynthConfig,
    choice_rng: StdRng,
    numeric_rng: StdRng,
    likes: Poisson<f64>,
    retweets: Poisson<f64>,
}

impl Synthesizer {
    pub fn new(config: SynthConfig) -> Result<Self> {
        if config.categories.is_empty() {
            return Err(PipelineError::invalid_setting(
                "dataset.categories",
                "at least one category is required",
            ));
        }
        if let Some(category) = config
            .categories
            .iter()
            .find(|c| text_samples(**c).is_empty())
        {
            return Err(PipelineError::invalid_setting(
                "dataset.categories",
                format!("cannot synthesize posts for category {}", category),
            ));
        }

        let likes = Poisson::new(LIKES_MEAN)
            .map_err(|e| PipelineError::invalid_setting("likes_mean", e.to_string()))?;
        let retweets = Poisson::new(RETWEETS_MEAN)
            .map_err(|e| PipelineError::invalid_setting("retweets_mean", e.to_string()))?;

        Ok(Self {
            choice_rng: StdRng::seed_from_u64(config.choice_seed),
            numeric_rng: StdRng::seed_from_u64(config.numeric_seed),
            config,
            likes,
            retweets,
        })
    }

    /// Draw one post row with the given 1-based id
    fn next_post(&mut self, id: u64) -> RawPost {
        let categories = &self.config.categories;
        let category = categories[self.choice_rng.gen_range(0..categories.len())];

        let offset = self.choice_rng.gen_range(0..=MAX_DAY_OFFSET);
        let created = self.config.base_date + Duration::days(offset);

        let base_likes = self.likes.sample(&mut self.numeric_rng) as i64;
        let jitter = self.choice_rng.gen_range(LIKES_JITTER.0..=LIKES_JITTER.1);
        let likes = (base_likes + category_bonus(category) + jitter).max(0);

        let retweets = (self.retweets.sample(&mut self.numeric_rng) as i64).max(0);

        let samples = text_samples(category);
        let text = samples[self.choice_rng.gen_range(0..samples.len())];

        RawPost {
            id,
            text: Some(text.to_string()),
            category: Some(category.as_str().to_string()),
            created_at: Some(created.format(TIMESTAMP_FORMAT).to_string()),
            likes: Some(likes.to_string()),
            retweets: Some(retweets.to_string()),
        }
    }

    /// Generate the configured number of rows
    pub fn generate(&mut self) -> Vec<RawPost> {
        let posts: Vec<RawPost> = (1..=self.config.records as u64)
            .map(|id| self.next_post(id))
            .collect();

        tracing::info!(
            records = posts.len(),
            choice_seed = self.config.choice_seed,
            numeric_seed = self.config.numeric_seed,
            "Synthesized post table"
        );

        posts
    }
}

/// Convenience wrapper: build a synthesizer and generate its rows
pub fn synthesize(config: SynthConfig) -> Result<Vec<RawPost>> {
    Ok(Synthesizer::new(config)?.generate())
}
