//! Conveyor - demo driver
//!
//! CLI entry point: builds the queue, spawns the two loops, scripts both
//! command streams, joins, and prints a run summary.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use conveyor::cli::{Cli, Command, OutputFormat};
use conveyor::config::Config;
use conveyor::coordinator::{Coordinator, RunReport};
use conveyor::queue::BoundedQueue;

fn setup_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    match cli.command {
        Some(Command::Run {
            capacity,
            items,
            policy,
            format,
        }) => {
            if let Some(capacity) = capacity {
                config.queue.capacity = capacity;
            }
            if let Some(items) = items {
                config.demo.items = items;
            }
            if let Some(policy) = policy {
                config.coordinator.terminate_policy = policy;
            }
            cmd_run(&config, format)
        }
        None => cmd_run(&config, OutputFormat::default()),
    }
}

/// Script both command streams, then join the loops
fn cmd_run(config: &Config, format: OutputFormat) -> Result<()> {
    let queue = Arc::new(BoundedQueue::new(config.queue.capacity).context("Invalid queue configuration")?);

    info!(
        capacity = queue.capacity(),
        items = config.demo.items,
        policy = %config.coordinator.terminate_policy,
        "starting demo run"
    );

    let handle = Coordinator::spawn(Arc::clone(&queue), &config.coordinator)?;

    let producer_delay = Duration::from_millis(config.demo.producer_delay_ms);
    let consumer_delay = Duration::from_millis(config.demo.consumer_delay_ms);

    for value in 0..config.demo.items {
        handle.push(value)?;
        if !producer_delay.is_zero() {
            thread::sleep(producer_delay);
        }
    }
    for _ in 0..config.demo.items {
        handle.pop()?;
        if !consumer_delay.is_zero() {
            thread::sleep(consumer_delay);
        }
    }
    handle.terminate()?;

    let report = handle.join()?;
    info!(remaining = queue.len(), "demo run complete");

    print_report(&report, format)
}

/// Print the run summary in the requested format
fn print_report(report: &RunReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            println!(
                "producer: pushed={} blocked-on-full={}",
                report.producer.pushed, report.producer.blocked_on_full
            );
            println!(
                "consumer: popped={} blocked-on-empty={}",
                report.consumer.popped, report.consumer.blocked_on_empty
            );
        }
    }
    Ok(())
}
