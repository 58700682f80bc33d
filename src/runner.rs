use crate::error::{BenchError, Result};
use crate::fetch::{WeatherSource, process_point};
use crate::partition::partition;
use crate::structs::{Point, PointResult};
use log::{debug, error, info};
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

/// Outcome of one full fetch-and-aggregate pass over the point set.
#[derive(Debug, Clone)]
pub struct Repetition {
    pub elapsed: Duration,
    /// Results in point-set order. Points lost to transport or parse errors
    /// are absent.
    pub results: Vec<PointResult>,
}

/// Timing for one worker-count configuration.
#[derive(Debug, Clone)]
pub struct ExperimentSummary {
    pub threads: usize,
    pub durations: Vec<Duration>,
    pub failed: usize,
}

impl ExperimentSummary {
    /// Arithmetic mean of the completed repetitions, in seconds.
    pub fn mean_secs(&self) -> Option<f64> {
        mean_secs(&self.durations)
    }
}

pub fn mean_secs(durations: &[Duration]) -> Option<f64> {
    if durations.is_empty() {
        return None;
    }
    let total: f64 = durations.iter().map(Duration::as_secs_f64).sum();
    Some(total / durations.len() as f64)
}

/// Runs one repetition on a fresh pool of exactly `threads` workers.
///
/// Each worker walks its contiguous group sequentially and sends its local
/// buffer back over a channel; buffers are merged here, then sorted back into
/// point-set order. Per-point failures are logged and never abort the pass.
///
/// # Errors
///
/// Returns `BenchError` if:
/// - `threads` is zero
/// - the pool cannot be built
/// - the workers have not all finished within `timeout`
pub fn run_repetition<S>(
    source: &Arc<S>,
    points: &[Point],
    threads: usize,
    timeout: Duration,
) -> Result<Repetition>
where
    S: WeatherSource + 'static,
{
    let dispatched = Instant::now();
    let groups = partition(points, threads)?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("fetch-worker-{i}"))
        .panic_handler(|_| error!("Worker panicked; its remaining points are lost"))
        .build()?;

    let (tx, rx) = mpsc::channel();
    let mut offset = 0;
    for group in groups {
        let tagged: Vec<(usize, Point)> = group
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, point)| (offset + i, point))
            .collect();
        offset += group.len();

        let tx = tx.clone();
        let source = Arc::clone(source);
        pool.spawn(move || {
            let mut local = Vec::with_capacity(tagged.len());
            for (index, point) in tagged {
                debug!("Fetching {}", point.name);
                match process_point(source.as_ref(), &point) {
                    Ok(result) => local.push((index, result)),
                    Err(err) => error!("Dropping {} from this repetition: {}", point.name, err),
                }
            }
            // receiver only goes away after a timeout
            let _ = tx.send(local);
        });
    }
    drop(tx);

    let deadline = dispatched + timeout;
    let mut merged = Vec::with_capacity(points.len());
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(local) => merged.extend(local),
            Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => return Err(BenchError::PoolTimeout(timeout)),
        }
    }
    let elapsed = dispatched.elapsed();

    merged.sort_by_key(|(index, _)| *index);
    Ok(Repetition {
        elapsed,
        results: merged.into_iter().map(|(_, result)| result).collect(),
    })
}

/// Repeats [`run_repetition`] `repetitions` times for one worker count.
///
/// `on_repetition` sees every completed repetition (for printing). A timed-out
/// repetition is logged, counted in `failed` and left out of the mean.
///
/// # Errors
/// Returns `BenchError::InvalidArgument` for zero threads or repetitions, and
/// pool build errors.
pub fn run_experiment<S, F>(
    source: &Arc<S>,
    points: &[Point],
    threads: usize,
    repetitions: usize,
    timeout: Duration,
    mut on_repetition: F,
) -> Result<ExperimentSummary>
where
    S: WeatherSource + 'static,
    F: FnMut(usize, &Repetition),
{
    if threads == 0 || repetitions == 0 {
        return Err(BenchError::InvalidArgument(format!(
            "threads={threads} repetitions={repetitions}; both must be positive"
        )));
    }

    info!(
        "Running {} repetitions with {} worker(s) over {} points",
        repetitions,
        threads,
        points.len()
    );
    let mut summary = ExperimentSummary {
        threads,
        durations: Vec::with_capacity(repetitions),
        failed: 0,
    };

    for round in 0..repetitions {
        match run_repetition(source, points, threads, timeout) {
            Ok(repetition) => {
                debug!(
                    "Repetition {} took {:.3}s, {} of {} points reported",
                    round + 1,
                    repetition.elapsed.as_secs_f64(),
                    repetition.results.len(),
                    points.len()
                );
                on_repetition(round, &repetition);
                summary.durations.push(repetition.elapsed);
            }
            Err(err @ BenchError::PoolTimeout(_)) => {
                error!("Repetition {} failed: {}", round + 1, err);
                summary.failed += 1;
            }
            Err(err) => return Err(err),
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    const BODY: &str = r#"{"hourly":{"time":["2024-05-01T00:00","2024-05-01T01:00"],"temperature_2m":[10.0,12.0]}}"#;

    struct CannedSource {
        calls: AtomicUsize,
        delay: Duration,
    }

    impl CannedSource {
        fn new(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                delay,
            })
        }
    }

    impl WeatherSource for CannedSource {
        fn fetch(&self, point: &Point) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            thread::sleep(self.delay);
            match point.name.as_str() {
                "down" => Err(BenchError::Io(std::io::Error::other("connection reset"))),
                "missing" => Err(BenchError::Status {
                    point: point.name.clone(),
                    code: 404,
                }),
                "garbled" => Ok("not json".to_string()),
                _ => Ok(BODY.to_string()),
            }
        }
    }

    fn points(names: &[&str]) -> Vec<Point> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Point::new(*name, i as f64, -(i as f64)))
            .collect()
    }

    #[test]
    fn every_point_reported_once_in_order() {
        let source = CannedSource::new(Duration::ZERO);
        let points = points(&["a", "b", "c", "d", "e"]);

        let repetition = run_repetition(&source, &points, 3, Duration::from_secs(30)).unwrap();
        let names: Vec<&str> = repetition.results.iter().map(|r| r.point.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d", "e"]);
        assert!(repetition.results.iter().all(|r| r.daily.len() == 1));
        assert_eq!(source.calls.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn failures_stay_with_their_point() {
        let source = CannedSource::new(Duration::ZERO);
        let points = points(&["a", "down", "missing", "garbled", "e"]);

        let repetition = run_repetition(&source, &points, 2, Duration::from_secs(30)).unwrap();
        let names: Vec<&str> = repetition.results.iter().map(|r| r.point.as_str()).collect();
        assert_eq!(names, vec!["a", "missing", "e"]);
        assert!(repetition.results[1].daily.is_empty());
    }

    #[test]
    fn more_workers_than_points() {
        let source = CannedSource::new(Duration::ZERO);
        let points = points(&["a", "b"]);

        let repetition = run_repetition(&source, &points, 27, Duration::from_secs(30)).unwrap();
        assert_eq!(repetition.results.len(), 2);
    }

    #[test]
    fn slow_workers_hit_the_ceiling() {
        let source = CannedSource::new(Duration::from_millis(500));
        let points = points(&["a", "b"]);

        assert!(matches!(
            run_repetition(&source, &points, 1, Duration::from_millis(50)),
            Err(BenchError::PoolTimeout(_))
        ));
    }

    #[test]
    fn mean_covers_exactly_the_requested_repetitions() {
        let source = CannedSource::new(Duration::from_millis(2));
        let points = points(&["a", "b", "c"]);
        let mut seen = Vec::new();

        let summary = run_experiment(&source, &points, 3, 10, Duration::from_secs(30), |round, rep| {
            seen.push((round, rep.results.len()));
        })
        .unwrap();

        assert_eq!(summary.threads, 3);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.durations.len(), 10);
        assert_eq!(seen.len(), 10);
        assert!(seen.iter().all(|(_, n)| *n == 3));
        assert_eq!(source.calls.load(Ordering::SeqCst), 30);

        let expected =
            summary.durations.iter().map(Duration::as_secs_f64).sum::<f64>() / 10.0;
        let mean = summary.mean_secs().unwrap();
        assert!((mean - expected).abs() < 1e-12);
    }

    #[test]
    fn timed_out_repetitions_are_counted_not_averaged() {
        let source = CannedSource::new(Duration::from_millis(200));
        let points = points(&["a"]);

        let summary =
            run_experiment(&source, &points, 1, 2, Duration::from_millis(20), |_, _| {}).unwrap();
        assert_eq!(summary.failed, 2);
        assert!(summary.durations.is_empty());
        assert_eq!(summary.mean_secs(), None);
    }

    #[test]
    fn mean_of_known_durations() {
        let durations = [
            Duration::from_millis(1000),
            Duration::from_millis(2000),
            Duration::from_millis(4500),
        ];
        assert_eq!(mean_secs(&durations), Some(2.5));
        assert_eq!(mean_secs(&[]), None);
    }

    #[test]
    fn zero_repetitions_is_invalid() {
        let source = CannedSource::new(Duration::ZERO);
        assert!(matches!(
            run_experiment(&source, &points(&["a"]), 1, 0, Duration::from_secs(1), |_, _| {}),
            Err(BenchError::InvalidArgument(_))
        ));
    }
}
