//! Chart rendering for category engagement
//!
//! Charts are written as PNG files with the [`plotters`] bitmap backend, which
//! works in headless environments. Categories sit on a segmented integer axis
//! whose labels are mapped back to category names.

use plotters::prelude::*;
use pulse_types::{Category, Summary};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the total-likes bar chart
pub const BAR_CHART_FILE: &str = "likes_by_category.png";
/// File name of the likes box plot
pub const BOX_PLOT_FILE: &str = "likes_distribution.png";

const BAR_CHART_SIZE: (u32, u32) = (800, 500);
const BOX_PLOT_SIZE: (u32, u32) = (1000, 600);

/// Errors that can occur during chart generation
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to prepare chart directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, ChartError>;

/// Axis label for a segment of the category axis
fn segment_label(labels: &[String], value: &SegmentValue<u32>) -> String {
    match value {
        SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => {
            labels.get(*i as usize).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    }
}

/// Upper bound for a value axis with some headroom above the largest value
fn axis_max(max: f64) -> f64 {
    (max * 1.1).ceil() + 1.0
}

/// Draw a bar chart of total likes per category, in summary order
pub fn draw_likes_bar_chart(summary: &Summary, output_path: &Path) -> Result<()> {
    if summary.categories.is_empty() {
        return Err(ChartError::InvalidData(
            "No categories to chart".to_string(),
        ));
    }

    let labels: Vec<String> = summary
        .categories
        .iter()
        .map(|c| c.category.to_string())
        .collect();
    let max_sum = summary.categories.iter().map(|c| c.sum).max().unwrap_or(0);
    let y_max = axis_max(max_sum as f64) as u64;

    let root = BitMapBackend::new(output_path, BAR_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Total Likes per Category", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d((0u32..labels.len() as u32).into_segmented(), 0u64..y_max)
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Category")
        .y_desc("Total Likes")
        .x_labels(labels.len())
        .x_label_formatter(&|v: &SegmentValue<u32>| segment_label(&labels, v))
        .label_style(("sans-serif", 16))
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.mix(0.7).filled())
                .margin(10)
                .data(
                    summary
                        .categories
                        .iter()
                        .enumerate()
                        .map(|(i, c)| (i as u32, c.sum)),
                ),
        )
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    Ok(())
}

/// Draw a box plot of likes per category.
///
/// `groups` is drawn left to right; every group must hold at least one value.
pub fn draw_likes_box_plot(groups: &[(Category, Vec<u64>)], output_path: &Path) -> Result<()> {
    if groups.is_empty() {
        return Err(ChartError::InvalidData(
            "No categories to chart".to_string(),
        ));
    }
    if let Some((category, _)) = groups.iter().find(|(_, likes)| likes.is_empty()) {
        return Err(ChartError::InvalidData(format!(
            "Category {} has no values",
            category
        )));
    }

    let labels: Vec<String> = groups.iter().map(|(c, _)| c.to_string()).collect();
    let max_likes = groups
        .iter()
        .flat_map(|(_, likes)| likes.iter().copied())
        .max()
        .unwrap_or(0);
    let y_max = axis_max(max_likes as f64) as f32;

    let root = BitMapBackend::new(output_path, BOX_PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Likes Distribution by Category", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d((0u32..labels.len() as u32).into_segmented(), 0f32..y_max)
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Category")
        .y_desc("Likes")
        .x_labels(labels.len())
        .x_label_formatter(&|v: &SegmentValue<u32>| segment_label(&labels, v))
        .label_style(("sans-serif", 16))
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    let quartiles: Vec<Quartiles> = groups
        .iter()
        .map(|(_, likes)| {
            let values: Vec<f64> = likes.iter().map(|l| *l as f64).collect();
            Quartiles::new(&values)
        })
        .collect();

    chart
        .draw_series(quartiles.iter().enumerate().map(|(i, q)| {
            Boxplot::new_vertical(SegmentValue::CenterOf(i as u32), q)
                .width(30)
                .whisker_width(0.5)
                .style(&BLUE)
        }))
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    Ok(())
}

/// Render both charts into `dir`, returning the written paths
pub fn render_charts(
    summary: &Summary,
    groups: &[(Category, Vec<u64>)],
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let bar_path = dir.join(BAR_CHART_FILE);
    draw_likes_bar_chart(summary, &bar_path)?;
    tracing::info!("Wrote bar chart to {}", bar_path.display());

    let box_path = dir.join(BOX_PLOT_FILE);
    draw_likes_box_plot(groups, &box_path)?;
    tracing::info!("Wrote box plot to {}", box_path.display());

    Ok(vec![bar_path, box_path])
}
