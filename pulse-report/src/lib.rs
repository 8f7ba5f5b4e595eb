// Library exports for pulse-report
// The binary wires settings, the pipeline and these renderers together

pub mod charts;
pub mod logging;
pub mod report;
pub mod tables;

pub use charts::ChartError;
pub use report::{ReportOptions, Reporter};
