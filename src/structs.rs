use crate::error::{BenchError, Result};
use chrono::NaiveDate;
use log::{Log, Metadata, Record};
use std::collections::BTreeMap;
use std::time::Duration;

/// Simple logger implementation
pub struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// A named geographic location queried by the experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Point {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

/// Temperature statistics for one calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub count: u32,
}

/// Outcome of fetching and aggregating one point in one repetition.
///
/// An empty `daily` map means the point was reached but produced no usable
/// series (non-200 reply or no `hourly` object).
#[derive(Debug, Clone, PartialEq)]
pub struct PointResult {
    pub point: String,
    pub daily: BTreeMap<NaiveDate, DailyStats>,
}

impl PointResult {
    pub fn empty(point: impl Into<String>) -> Self {
        Self {
            point: point.into(),
            daily: BTreeMap::new(),
        }
    }
}

/// Configuration for the benchmark
#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    pub threads: Vec<usize>,
    pub repetitions: usize,
    pub timeout: Duration,
    pub base_url: String,
}

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            threads: vec![1, 3, 9, 27],
            repetitions: 10,
            timeout: Duration::from_secs(60 * 60),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ExperimentConfig {
    /// Rejects worker counts and repetition counts that cannot run.
    pub fn validate(&self) -> Result<()> {
        if self.threads.is_empty() {
            return Err(BenchError::InvalidArgument(
                "at least one thread count is required".to_string(),
            ));
        }
        if self.threads.contains(&0) {
            return Err(BenchError::InvalidArgument(
                "thread count must be positive".to_string(),
            ));
        }
        if self.repetitions == 0 {
            return Err(BenchError::InvalidArgument(
                "repetitions must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
