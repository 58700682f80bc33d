use crate::error::{BenchError, Result};
use crate::structs::{DailyStats, PointResult};
use chrono::NaiveDate;
use log::{debug, warn};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_LEN: usize = 10;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: Option<HourlySeries>,
}

#[derive(Debug, Deserialize)]
struct HourlySeries {
    time: Vec<String>,
    temperature_2m: Vec<Option<f64>>,
}

/// Running min/max/sum for one date. Only created once a valid sample exists.
#[derive(Debug, Clone, Copy)]
struct DayAccumulator {
    min: f64,
    max: f64,
    sum: f64,
    count: u32,
}

impl DayAccumulator {
    fn new(reading: f64) -> Self {
        Self {
            min: reading,
            max: reading,
            sum: reading,
            count: 1,
        }
    }

    fn add_reading(&mut self, reading: f64) {
        if reading < self.min {
            self.min = reading;
        }
        if reading > self.max {
            self.max = reading;
        }
        self.sum += reading;
        self.count += 1;
    }

    fn finish(self, date: NaiveDate) -> DailyStats {
        DailyStats {
            date,
            min: self.min,
            max: self.max,
            mean: self.sum / self.count as f64,
            count: self.count,
        }
    }
}

/// Reduces an hourly forecast body to per-date temperature statistics.
///
/// Null samples are ignored entirely; a date whose samples are all null gets
/// no entry. The mean divides by the number of valid samples for that date.
///
/// A body without an `hourly` object is a soft failure: it is logged and an
/// empty result is returned.
///
/// # Errors
///
/// Returns `BenchError` if:
/// - the body is not JSON of the expected shape
/// - `time` and `temperature_2m` differ in length
/// - a timestamp does not start with a `YYYY-MM-DD` date
pub fn aggregate_daily(body: &str, point: &str) -> Result<PointResult> {
    let response: ForecastResponse = serde_json::from_str(body)?;

    let Some(hourly) = response.hourly else {
        let err = BenchError::MissingField {
            point: point.to_string(),
            field: "hourly",
        };
        warn!("{}", err);
        return Ok(PointResult::empty(point));
    };

    if hourly.time.len() != hourly.temperature_2m.len() {
        return Err(BenchError::MalformedResponse(format!(
            "{}: {} timestamps but {} temperatures",
            point,
            hourly.time.len(),
            hourly.temperature_2m.len()
        )));
    }

    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();
    for (timestamp, temp) in hourly.time.iter().zip(&hourly.temperature_2m) {
        let Some(temp) = *temp else {
            continue;
        };
        let date = parse_date(timestamp)?;
        match days.entry(date) {
            Entry::Vacant(slot) => {
                slot.insert(DayAccumulator::new(temp));
            }
            Entry::Occupied(mut slot) => slot.get_mut().add_reading(temp),
        }
    }

    debug!(
        "{}: {} hourly samples over {} days",
        point,
        hourly.time.len(),
        days.len()
    );

    let daily = days
        .into_iter()
        .map(|(date, acc)| (date, acc.finish(date)))
        .collect();

    Ok(PointResult {
        point: point.to_string(),
        daily,
    })
}

/// Takes the calendar date from the first ten characters of an ISO-8601 timestamp.
fn parse_date(timestamp: &str) -> Result<NaiveDate> {
    let prefix = timestamp
        .get(..DATE_LEN)
        .ok_or_else(|| BenchError::MalformedResponse(format!("Short timestamp: {timestamp}")))?;
    NaiveDate::parse_from_str(prefix, DATE_FORMAT)
        .map_err(|_| BenchError::MalformedResponse(format!("Invalid timestamp: {timestamp}")))
}
