use chrono::{NaiveDate, NaiveDateTime};
use config::{Config, ConfigError, File};
use pulse_types::Category;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};

/// Default settings file looked up in the working directory
pub const SETTINGS_FILE: &str = "pulse.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetSettings {
    /// Delimited file to load instead of synthesizing posts
    #[serde(default)]
    pub input: Option<PathBuf>,
    pub records: usize,
    pub seed: u64,
    /// Seed for the numeric source; falls back to `seed`
    #[serde(default)]
    pub numeric_seed: Option<u64>,
    pub base_date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    pub dir: PathBuf,
    pub write_cleaned: bool,
    pub cleaned_file: String,
    #[serde(default)]
    pub summary_json: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    pub head_rows: usize,
    pub filter_categories: Vec<String>,
    pub charts: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub dataset: DatasetSettings,
    pub output: OutputSettings,
    pub report: ReportSettings,
}

impl Settings {
    /// Load settings from defaults, then `pulse.toml` (or `explicit` when given).
    pub fn new(explicit: Option<&Path>) -> std::result::Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("dataset.records", 500)?
            .set_default("dataset.seed", 42)?
            .set_default("dataset.base_date", "2025-01-01")?
            .set_default("output.dir", "reports")?
            .set_default("output.write_cleaned", false)?
            .set_default("output.cleaned_file", "tweets_cleaned.csv")?
            .set_default("report.head_rows", 5)?
            .set_default("report.filter_categories", vec!["food", "tech"])?
            .set_default("report.charts", true)?;

        match explicit {
            // An explicitly named file has to exist
            Some(path) => {
                builder = builder.add_source(File::from(path.to_path_buf()).required(true));
            }
            None => {
                let current_dir_path = PathBuf::from(SETTINGS_FILE);
                if current_dir_path.exists() {
                    builder = builder.add_source(File::from(current_dir_path).required(false));
                }
            }
        }

        builder.build()?.try_deserialize()
    }

    /// Base date the synthesizer offsets creation timestamps from
    pub fn base_datetime(&self) -> Result<NaiveDateTime> {
        let raw = self.dataset.base_date.trim();
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            return Ok(ts);
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or_else(|| {
                PipelineError::invalid_setting(
                    "dataset.base_date",
                    format!("expected YYYY-MM-DD, got {:?}", raw),
                )
            })
    }

    /// Categories counted by the filter report
    pub fn filter_categories(&self) -> Result<Vec<Category>> {
        self.report
            .filter_categories
            .iter()
            .map(|name| {
                Category::parse(name).ok_or_else(|| {
                    PipelineError::invalid_setting(
                        "report.filter_categories",
                        format!("unknown category {:?}", name),
                    )
                })
            })
            .collect()
    }

    pub fn numeric_seed(&self) -> u64 {
        self.dataset.numeric_seed.unwrap_or(self.dataset.seed)
    }

    pub fn cleaned_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.cleaned_file)
    }
}
