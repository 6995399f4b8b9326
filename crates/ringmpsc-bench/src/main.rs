//! Command-line entry point for the `ringmpsc-bench` throughput harness.
//! Parses CLI flags, delegates the measurement itself to
//! [`ringmpsc_bench::run_benchmark`], probes the environment once, and
//! appends a result record to the results file.

use clap::Parser;
use ringmpsc_bench::cpu_info::CpuInfo;
use ringmpsc_bench::error::BenchError;
use ringmpsc_bench::order_event::OrderEvent;
use ringmpsc_bench::results::{append_result, BenchmarkResult};
use ringmpsc_bench::{run_benchmark, BenchParams};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const ALLOWED_QUEUE_SIZES: &[usize] = &[32, 64, 128, 256, 512, 1024, 2048, 4096, 8192, 10240];

#[derive(Parser, Debug)]
#[command(
    name = "ringmpsc-bench",
    about = "Throughput benchmark for the ringmpsc bounded MPSC ring queue"
)]
struct Args {
    /// Ring capacity. Must be one of the supported sizes.
    #[arg(short = 'q', long = "queue-size", default_value_t = 1024, value_parser = parse_queue_size)]
    queue_size: usize,

    /// Number of concurrent producer threads.
    #[arg(short = 'p', long = "producer-count", default_value_t = 4)]
    producer_count: usize,

    /// How long to run the measured phase, in seconds.
    #[arg(short = 'd', long = "duration-secs", default_value_t = 1)]
    duration_secs: u64,

    /// Path to the JSON results file to append to.
    #[arg(
        short = 'r',
        long = "results-path",
        default_value = "./ringmpsc-bench-results.json"
    )]
    results_path: PathBuf,
}

fn parse_queue_size(raw: &str) -> Result<usize, String> {
    let value: usize = raw.parse().map_err(|_| format!("not a number: {raw}"))?;
    if ALLOWED_QUEUE_SIZES.contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "queue size must be one of {ALLOWED_QUEUE_SIZES:?}, got {value}"
        ))
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("ringmpsc-bench: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), BenchError> {
    log::info!(
        "starting run: queue_size={} producers={} duration_secs={}",
        args.queue_size,
        args.producer_count,
        args.duration_secs
    );

    let params = BenchParams {
        queue_size: args.queue_size,
        producer_count: args.producer_count,
        duration: Duration::from_secs(args.duration_secs),
    };
    let outcome = run_benchmark(&params)?;
    let throughput = outcome.throughput_events_per_sec();

    log::info!(
        "run complete: pushed={} total_pop_attempts={} successful_pops={} rejected_full={} throughput={throughput:.0} events/sec",
        outcome.events_pushed,
        outcome.total_pop_attempts,
        outcome.successful_pops,
        outcome.events_rejected_full,
    );

    let cpu_info = CpuInfo::probe();
    let queue_size_bytes = (args.queue_size * std::mem::size_of::<OrderEvent>()) as u64;
    let result = BenchmarkResult {
        producer_count: args.producer_count,
        queue_size_bytes,
        total_pops: outcome.total_pop_attempts,
        successful_pops: outcome.successful_pops,
        duration_secs: args.duration_secs,
        events_pushed: outcome.events_pushed,
        events_rejected_full: outcome.events_rejected_full,
        throughput_events_per_sec: throughput,
        unix_timestamp_secs: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
    };

    append_result(&args.results_path, result, &cpu_info)?;
    println!(
        "{} events/sec ({} pushed, {} successful pops of {} attempts, {} rejected as full)",
        throughput as u64,
        outcome.events_pushed,
        outcome.successful_pops,
        outcome.total_pop_attempts,
        outcome.events_rejected_full
    );

    Ok(())
}
