//! Synthesize (or load) → clean → aggregate, with the table passed explicitly

use pulse_types::{Post, RawPost, Summary};

use crate::aggregate::{count_in_categories, summarize};
use crate::clean::{clean_posts, CleaningStats};
use crate::config::Settings;
use crate::dataset::{load_posts, save_posts};
use crate::error::Result;
use crate::synth::{synthesize, SynthConfig};

/// Everything the reporter needs from one run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub posts: Vec<Post>,
    pub cleaning: CleaningStats,
    pub summary: Summary,
    /// Posts in the configured filter categories
    pub filtered_count: usize,
}

/// Produce the raw table: the configured input file, or synthesized rows
pub fn acquire(settings: &Settings) -> Result<Vec<RawPost>> {
    match &settings.dataset.input {
        Some(path) => load_posts(path),
        None => synthesize(SynthConfig::from_settings(settings)?),
    }
}

/// Run every stage after acquisition on an owned raw table
pub fn process(raw: Vec<RawPost>, settings: &Settings) -> Result<PipelineOutput> {
    let filter = settings.filter_categories()?;

    let (posts, cleaning) = clean_posts(&raw);
    drop(raw);

    if settings.output.write_cleaned {
        save_posts(&posts, settings.cleaned_path())?;
    }

    let summary = summarize(&posts);
    let filtered_count = count_in_categories(&posts, &filter);

    Ok(PipelineOutput {
        posts,
        cleaning,
        summary,
        filtered_count,
    })
}

/// Acquire and process in one call
pub fn run(settings: &Settings) -> Result<PipelineOutput> {
    let raw = acquire(settings)?;
    process(raw, settings)
}
