use crate::runner::ExperimentSummary;
use crate::structs::PointResult;
use std::fmt::Write;

/// Renders one point's daily table, dates ascending, values to two decimals.
pub fn format_point(result: &PointResult) -> String {
    let mut out = format!("City: {}\n", result.point);
    for stats in result.daily.values() {
        // writing to a String cannot fail
        let _ = writeln!(
            out,
            "Date: {} - Min: {:.2}, Max: {:.2}, Mean: {:.2}",
            stats.date, stats.min, stats.max, stats.mean
        );
    }
    out
}

pub fn print_results(results: &[PointResult]) {
    for result in results {
        print!("{}", format_point(result));
    }
}

fn threads_label(threads: usize) -> String {
    match threads {
        1 => "no threads".to_string(),
        n => format!("{n} threads"),
    }
}

/// Headline line for a configuration.
pub fn format_summary(summary: &ExperimentSummary) -> String {
    let label = threads_label(summary.threads);
    let mut line = match summary.mean_secs() {
        Some(mean) => format!("Mean time ({label}): {mean:.3} seconds"),
        None => format!("Mean time ({label}): n/a, no repetition completed"),
    };
    if summary.failed > 0 {
        let _ = write!(line, " ({} repetition(s) timed out)", summary.failed);
    }
    line
}
