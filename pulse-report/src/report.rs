use anyhow::{Context, Result};
use pulse_pipeline::aggregate::likes_by_category;
use pulse_pipeline::{PipelineOutput, Settings};
use pulse_types::{Category, Post, Summary, POST_COLUMNS};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::charts;
use crate::tables;

/// What the report prints and where charts go
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub head_rows: usize,
    pub filter: Vec<Category>,
    /// Directory for chart files; `None` skips charts
    pub chart_dir: Option<PathBuf>,
}

impl ReportOptions {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            head_rows: settings.report.head_rows,
            filter: settings
                .filter_categories()
                .context("Invalid filter categories")?,
            chart_dir: settings
                .report
                .charts
                .then(|| settings.output.dir.clone()),
        })
    }
}

/// Writes the console report section by section
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Table dimensions as (rows, columns)
    pub fn shape(&mut self, posts: &[Post]) -> std::io::Result<()> {
        writeln!(self.out, "Dataset shape: ({}, {})", posts.len(), POST_COLUMNS)
    }

    pub fn sample_rows(&mut self, posts: &[Post], count: usize) -> std::io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Sample rows:")?;
        let head = &posts[..count.min(posts.len())];
        writeln!(self.out, "{}", tables::post_table(head))
    }

    pub fn likes_by_category(&mut self, summary: &Summary) -> std::io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Likes by category:")?;
        writeln!(self.out, "{}", tables::category_table(&summary.categories))
    }

    pub fn charts_written(&mut self, paths: &[PathBuf]) -> std::io::Result<()> {
        writeln!(self.out)?;
        for path in paths {
            writeln!(self.out, "Chart saved: {}", path.display())?;
        }
        Ok(())
    }

    pub fn filtered_count(&mut self, filter: &[Category], count: usize) -> std::io::Result<()> {
        let names: Vec<&str> = filter.iter().map(Category::as_str).collect();
        writeln!(self.out)?;
        writeln!(self.out, "Filtered ({}) count: {}", names.join(" + "), count)
    }

    pub fn status(&mut self, summary: &Summary) -> std::io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Category Performance Status:")?;
        writeln!(self.out, "{}", tables::status_table(&summary.categories))
    }

    /// Write the full report, rendering charts between the tables
    pub fn render(&mut self, output: &PipelineOutput, options: &ReportOptions) -> Result<()> {
        self.shape(&output.posts)?;
        self.sample_rows(&output.posts, options.head_rows)?;
        self.likes_by_category(&output.summary)?;

        if let Some(dir) = &options.chart_dir {
            let paths = render_charts(output, dir)?;
            self.charts_written(&paths)?;
        }

        self.filtered_count(&options.filter, output.filtered_count)?;
        self.status(&output.summary)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Likes per category in the same order as the summary table
pub fn ordered_groups(output: &PipelineOutput) -> Vec<(Category, Vec<u64>)> {
    let mut groups = likes_by_category(&output.posts);
    output
        .summary
        .categories
        .iter()
        .filter_map(|c| groups.remove(&c.category).map(|likes| (c.category, likes)))
        .collect()
}

fn render_charts(output: &PipelineOutput, dir: &Path) -> Result<Vec<PathBuf>> {
    if output.posts.is_empty() {
        tracing::warn!("No posts to chart, skipping charts");
        return Ok(Vec::new());
    }

    charts::render_charts(&output.summary, &ordered_groups(output), dir)
        .with_context(|| format!("Failed to render charts into {}", dir.display()))
}

/// Write the summary as pretty JSON
pub fn export_summary(summary: &Summary, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, summary).context("Failed to serialize summary")?;

    tracing::info!("Wrote summary JSON to {}", path.display());
    Ok(())
}
