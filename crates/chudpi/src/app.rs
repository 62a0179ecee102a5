//! Application entry point and dispatch.

use anyhow::{Context, Result};
use serde_json::json;
use std::thread::JoinHandle;

use tracing::{debug, warn};

use chudpi_cli::output::write_to_file;
use chudpi_cli::presenter::CLIResultPresenter;
use chudpi_cli::progress::CLIProgressReporter;
use chudpi_core::calculator::PiError;
use chudpi_core::memory_budget::parse_memory_limit;
use chudpi_core::observer::ProgressObserver;
use chudpi_core::observers::{ChannelObserver, LoggingObserver, NoOpObserver};
use chudpi_core::options::Options;
use chudpi_core::registry::DefaultFactory;
use chudpi_core::split::SplitPolicy;
use chudpi_orchestration::calculator_selection::get_calculators_to_run;
use chudpi_orchestration::interfaces::{CalculationResult, ResultPresenter};
use chudpi_orchestration::orchestrator::{analyze_comparison_results, execute_calculations};

use crate::config::AppConfig;

/// Minimum interval between progress log lines in verbose mode.
const LOG_INTERVAL_MS: u64 = 500;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        chudpi_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    run_cli(config)
}

/// Build normalized calculation options from the CLI flags.
pub fn build_options(config: &AppConfig) -> Result<Options, PiError> {
    if !(config.split_ratio > 0.0 && config.split_ratio < 1.0) {
        return Err(PiError::Config(format!(
            "split ratio must be in (0, 1), got {}",
            config.split_ratio
        )));
    }
    let memory_limit = parse_memory_limit(&config.memory_limit).map_err(PiError::Config)?;

    Ok(Options {
        threads: config.threads,
        split: SplitPolicy::new(config.split_ratio, config.parallel_threshold),
        memory_limit,
        verbose: config.verbose,
        details: config.details,
    }
    .normalize())
}

fn run_cli(config: &AppConfig) -> Result<()> {
    let opts = build_options(config)?;
    let factory = DefaultFactory::new();
    let calculators = get_calculators_to_run(&config.backend, &factory)?;
    debug!(
        digits = config.digits,
        threads = opts.threads,
        backends = calculators.len(),
        "Dispatching"
    );

    let results = if config.progress && !config.quiet {
        let (tx, rx) = crossbeam_channel::unbounded();
        let progress = CLIProgressReporter::new().spawn(rx);
        let observer = ChannelObserver::new(tx);
        let results = execute_calculations(&calculators, config.digits, &opts, &observer);
        // Dropping the observer closes the channel and ends the bar.
        drop(observer);
        join_progress(progress);
        results
    } else {
        let observer: Box<dyn ProgressObserver> = if config.verbose {
            Box::new(LoggingObserver::new(LOG_INTERVAL_MS))
        } else {
            Box::new(NoOpObserver::new())
        };
        execute_calculations(&calculators, config.digits, &opts, observer.as_ref())
    };

    if config.json {
        print_json(&results)?;
    } else {
        present(config, &results);
    }

    // Write to file if requested
    if let Some(ref path) = config.output {
        if let Some(value) = results.iter().find_map(CalculationResult::value) {
            write_to_file(path, value).with_context(|| format!("writing digits to {path}"))?;
        }
    }

    if results.len() > 1 {
        analyze_comparison_results(&results)?;
    } else if let Some(Err(e)) = results.first().map(|r| &r.outcome) {
        return Err(e.clone().into());
    }
    Ok(())
}

/// Wait for the progress bar thread; a panic there is logged, not fatal.
fn join_progress(handle: JoinHandle<()>) -> bool {
    match handle.join() {
        Ok(()) => true,
        Err(panic) => {
            let reason = panic
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
                .unwrap_or("unknown panic");
            warn!(reason, "Progress bar thread panicked");
            false
        }
    }
}

fn present(config: &AppConfig, results: &[CalculationResult]) {
    let presenter = CLIResultPresenter::new(config.verbose, config.quiet, config.calculate);
    for result in results {
        match &result.outcome {
            Ok(value) => presenter.present_result(
                &result.algorithm,
                value,
                result.duration,
                config.details,
            ),
            // A lone failure is reported once, through the exit path.
            Err(e) if results.len() > 1 => presenter.present_error(&format!("{}: {e}", result.algorithm)),
            Err(_) => {}
        }
    }

    if results.len() > 1 {
        presenter.present_comparison(results);
    }
}

fn print_json(results: &[CalculationResult]) -> Result<()> {
    let entries: Vec<_> = results
        .iter()
        .map(|r| match &r.outcome {
            Ok(result) => json!({
                "backend": r.algorithm,
                "duration_secs": r.duration.as_secs_f64(),
                "result": result,
            }),
            Err(e) => json!({
                "backend": r.algorithm,
                "error": e.to_string(),
            }),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
