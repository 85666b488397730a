use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::process::ExitCode;

use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use max40080_util::{Options, RunSummary};

fn setup_logging(log_file_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // stdout carries samples, so diagnostics stay on stderr
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .without_time();

    let (file_layer, guard) = if let Some(path) = log_file_path {
        let log_file = File::create(path).with_context(|| format!("Failed to create log file at: {:?}", path))?;
        let (non_blocking_writer, guard) = tracing_appender::non_blocking(log_file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_writer)
            .with_ansi(false)
            .with_target(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(path) = log_file_path {
        info!("Logging to file: {:?}", path);
    }

    Ok(guard)
}

#[cfg(target_os = "linux")]
fn run_sensor(options: &Options) -> Result<RunSummary> {
    use max40080_lib::{I2cBus, Max40080};

    let controller = options.i2c_controller();
    let address = options.i2c_address();
    debug!(controller, address, "Opening I2C bus");

    let bus = I2cBus::open(controller, address)
        .with_context(|| format!("Opening I2C controller /dev/i2c-{} failed", controller))?;
    let mut sensor = Max40080::new(bus)
        .with_shunt_resistor(options.shunt_resistor())
        .context("Configuring shunt resistor failed")?;

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let summary = max40080_util::run(&mut sensor, options, &mut stdout.lock(), &mut stderr.lock())?;
    Ok(summary)
}

#[cfg(not(target_os = "linux"))]
fn run_sensor(_options: &Options) -> Result<RunSummary> {
    anyhow::bail!("I2C access through /dev/i2c-N is only available on Linux")
}

fn main() -> ExitCode {
    let options = match Options::from_args(std::env::args_os()) {
        Ok(options) => options,
        Err(e) => {
            let e = e.into_clap_error();
            // --help and --version also arrive here, on stdout
            let code = if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = e.print();
            return code;
        }
    };

    let _guard = match setup_logging(options.log_file()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };
    debug!("Options: {:?}", options);

    match run_sensor(&options) {
        Ok(summary) => {
            debug!("Run summary: {:?}", summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!("Acquisition failed: {:?}", e);
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
