// Analyzer module: the three scans run over normalized series.

pub mod price_analysis;
pub mod trend;
pub mod extremum;
pub mod profit;

// Re-export the main Analyzer implementation for ease of use.
pub use price_analysis::{Analyzer, AnalyzerImpl};
