use clap::Parser;
use lib::{
    BenchError, ExperimentConfig, SimpleLogger, WeatherClient, capitals, format_summary,
    print_results, run_experiment,
};
use log::debug;
use std::sync::Arc;
use std::time::{Duration, Instant};

static LOGGER: SimpleLogger = SimpleLogger;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Worker-pool sizes to measure, one configuration each (e.g. 1,3,9,27)
    #[arg(short, long, value_delimiter = ',', default_value = "1,3,9,27")]
    threads: Vec<usize>,

    /// Repetitions per configuration
    #[arg(short, long, default_value_t = 10)]
    repetitions: usize,

    /// Ceiling for a single repetition, in seconds
    #[arg(long, default_value_t = 3600)]
    timeout_secs: u64,

    /// Forecast endpoint
    #[arg(long, default_value = lib::structs::DEFAULT_BASE_URL)]
    base_url: String,

    /// Only print timing lines, not the per-city daily tables
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Log level for output
    #[arg(long, default_value = "false")]
    debug: bool,
}

fn main() -> Result<(), BenchError> {
    let total_start = Instant::now();
    log::set_logger(&LOGGER).unwrap();

    let args = Args::parse();
    if args.debug {
        log::set_max_level(log::LevelFilter::Debug);
    } else {
        log::set_max_level(log::LevelFilter::Info);
    }

    let config = ExperimentConfig {
        threads: args.threads,
        repetitions: args.repetitions,
        timeout: Duration::from_secs(args.timeout_secs),
        base_url: args.base_url,
    };
    config.validate()?;
    debug!("Configuration: {:?}", config);

    let points = capitals();
    let client = Arc::new(WeatherClient::new(config.base_url.clone()));

    for &threads in &config.threads {
        let summary = run_experiment(
            &client,
            &points,
            threads,
            config.repetitions,
            config.timeout,
            |_, repetition| {
                if !args.quiet {
                    print_results(&repetition.results);
                }
            },
        )?;
        println!("{}", format_summary(&summary));
    }

    debug!("Total runtime: {:.2?}", total_start.elapsed());
    Ok(())
}
