use anyhow::{Context, Result};
use clap::Parser;
use pulse_pipeline::{pipeline, Settings};
use pulse_report::logging::init_tracing;
use pulse_report::report::export_summary;
use pulse_report::{ReportOptions, Reporter};
use std::path::PathBuf;

/// Pulse engagement report
///
/// Builds (or loads) a post table, cleans it, aggregates likes per category
/// and prints the summary tables. Charts are written as PNG files.
#[derive(Parser, Debug)]
#[command(name = "pulse-report")]
#[command(about = "Clean and summarize social post engagement", long_about = None)]
struct Args {
    /// Settings file (defaults to ./pulse.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV file to analyze instead of synthesized posts
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Number of posts to synthesize
    #[arg(short = 'n', long)]
    records: Option<usize>,

    /// Seed for both random sources
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory for charts and the cleaned CSV
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Save the cleaned table as CSV
    #[arg(long)]
    write_cleaned: bool,

    /// Write the category summary as JSON to this path
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Skip chart rendering
    #[arg(long)]
    no_charts: bool,

    /// Log pipeline details at debug level
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Apply command-line overrides on top of the loaded settings
    fn apply(&self, settings: &mut Settings) {
        if let Some(input) = &self.input {
            settings.dataset.input = Some(input.clone());
        }
        if let Some(records) = self.records {
            settings.dataset.records = records;
        }
        if let Some(seed) = self.seed {
            settings.dataset.seed = seed;
            settings.dataset.numeric_seed = None;
        }
        if let Some(dir) = &self.output_dir {
            settings.output.dir = dir.clone();
        }
        if self.write_cleaned {
            settings.output.write_cleaned = true;
        }
        if let Some(path) = &self.summary_json {
            settings.output.summary_json = Some(path.clone());
        }
        if self.no_charts {
            settings.report.charts = false;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut settings = Settings::new(args.config.as_deref()).context("Failed to load settings")?;
    args.apply(&mut settings);
    tracing::debug!("Settings: {:?}", settings);

    let raw = pipeline::acquire(&settings).context("Failed to acquire post table")?;
    let output = pipeline::process(raw, &settings).context("Failed to process post table")?;

    let options = ReportOptions::from_settings(&settings)?;
    let stdout = std::io::stdout();
    let mut reporter = Reporter::new(stdout.lock());
    reporter.render(&output, &options)?;

    if let Some(path) = &settings.output.summary_json {
        export_summary(&output.summary, path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keeps_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pulse.toml");
        std::fs::write(&path, "").unwrap();

        let mut settings = Settings::new(Some(path.as_path())).unwrap();
        Args::parse_from(["pulse-report"]).apply(&mut settings);

        assert_eq!(settings.dataset.records, 500);
        assert_eq!(settings.dataset.seed, 42);
        assert!(settings.dataset.input.is_none());
        assert!(settings.report.charts);
        assert!(!settings.output.write_cleaned);
    }

    #[test]
    fn test_flags_override_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pulse.toml");
        std::fs::write(&path, "[dataset]\nnumeric_seed = 3\n").unwrap();

        let mut settings = Settings::new(Some(path.as_path())).unwrap();
        Args::parse_from([
            "pulse-report",
            "-n",
            "40",
            "--seed",
            "9",
            "--input",
            "posts.csv",
            "--no-charts",
            "--write-cleaned",
        ])
        .apply(&mut settings);

        assert_eq!(settings.dataset.records, 40);
        assert_eq!(settings.numeric_seed(), 9);
        assert_eq!(settings.dataset.input, Some(PathBuf::from("posts.csv")));
        assert!(!settings.report.charts);
        assert!(settings.output.write_cleaned);
    }
}
