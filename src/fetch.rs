use crate::aggregate::aggregate_daily;
use crate::error::{BenchError, Result};
use crate::structs::{DEFAULT_BASE_URL, Point, PointResult};
use log::{debug, warn};

/// Anything that can produce the raw forecast body for a point.
pub trait WeatherSource: Send + Sync {
    /// Returns the body of a successful (200) reply.
    ///
    /// # Errors
    /// `BenchError::Status` for any other status, transport or I/O errors
    /// when the request or body read fails.
    fn fetch(&self, point: &Point) -> Result<String>;
}

/// Blocking client for the forecast endpoint.
pub struct WeatherClient {
    agent: ureq::Agent,
    base_url: String,
}

impl WeatherClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            base_url: base_url.into(),
        }
    }
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Builds the hourly temperature request URL for a point's own coordinates.
pub fn forecast_url(base_url: &str, point: &Point) -> String {
    format!(
        "{}?latitude={}&longitude={}&hourly=temperature_2m",
        base_url, point.latitude, point.longitude
    )
}

impl WeatherSource for WeatherClient {
    fn fetch(&self, point: &Point) -> Result<String> {
        let url = forecast_url(&self.base_url, point);
        debug!("GET {}", url);

        let response = match self.agent.get(&url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => {
                return Err(BenchError::Status {
                    point: point.name.clone(),
                    code,
                });
            }
            Err(ureq::Error::Transport(transport)) => return Err(transport.into()),
        };

        // 2xx other than 200 still counts as a failed request
        if response.status() != 200 {
            return Err(BenchError::Status {
                point: point.name.clone(),
                code: response.status(),
            });
        }

        Ok(response.into_string()?)
    }
}

/// Fetches and aggregates a single point.
///
/// A non-200 reply is logged and turned into an empty result so the point
/// still shows up in the repetition.
///
/// # Errors
/// Transport, I/O, JSON and malformed-series errors are returned; the caller
/// drops the point for this repetition.
pub fn process_point<S: WeatherSource + ?Sized>(source: &S, point: &Point) -> Result<PointResult> {
    match source.fetch(point) {
        Ok(body) => aggregate_daily(&body, &point.name),
        Err(err @ BenchError::Status { .. }) => {
            warn!("{}", err);
            Ok(PointResult::empty(&point.name))
        }
        Err(err) => Err(err),
    }
}
