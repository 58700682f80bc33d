pub mod aggregate;
pub mod error;
pub mod fetch;
pub mod partition;
pub mod points;
pub mod report;
pub mod runner;
pub mod structs;

// Re-export public API
pub use aggregate::aggregate_daily;
pub use error::{BenchError, Result};
pub use fetch::{WeatherClient, WeatherSource, forecast_url, process_point};
pub use partition::partition;
pub use points::capitals;
pub use report::{format_point, format_summary, print_results};
pub use runner::{ExperimentSummary, Repetition, run_experiment, run_repetition};
pub use structs::{DailyStats, ExperimentConfig, Point, PointResult, SimpleLogger};
