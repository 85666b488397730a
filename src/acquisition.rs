//! Acquisition run: init, configure, sample, park in standby.
//!
//! Samples go to `out`, one per line. Warnings for the user go to `diag`.
//! Only setup failures and the final interrupt read abort the run; a sample
//! that cannot be read is retried up to [`MAX_ATTEMPTS`] times and then
//! skipped.

use crate::error::AcquisitionError;
use crate::options::{Options, Variable};
use crate::output::Sample;
use crate::setup::SensorSetup;
use max40080_lib::{Interrupts, Sensor, SensorError};
use std::fmt;
use std::io::{self, Write};
use tracing::{debug, info, trace, warn};

/// Read attempts per sample before it is skipped
pub const MAX_ATTEMPTS: u32 = 1000;

/// Which sensor read produces a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reader {
    RawCurrent,
    Current,
    RawVoltage,
    Voltage,
    RawCurrentAndVoltage,
    CurrentAndVoltage,
}

impl Reader {
    /// Current is measured when no variable was chosen.
    pub fn select(variable: Option<Variable>, raw: bool) -> Self {
        match (variable.unwrap_or(Variable::Current), raw) {
            (Variable::Current, true) => Reader::RawCurrent,
            (Variable::Current, false) => Reader::Current,
            (Variable::Voltage, true) => Reader::RawVoltage,
            (Variable::Voltage, false) => Reader::Voltage,
            (Variable::Both, true) => Reader::RawCurrentAndVoltage,
            (Variable::Both, false) => Reader::CurrentAndVoltage,
        }
    }

    /// One attempt at taking a sample out of the sensor FIFO.
    pub fn read<S: Sensor + ?Sized>(self, sensor: &mut S) -> Result<Sample, SensorError> {
        Ok(match self {
            Reader::RawCurrent => Sample::RawCurrent(sensor.read_raw_current()?),
            Reader::Current => Sample::Current(sensor.read_current()?),
            Reader::RawVoltage => Sample::RawVoltage(sensor.read_raw_voltage()?),
            Reader::Voltage => Sample::Voltage(sensor.read_voltage()?),
            Reader::RawCurrentAndVoltage => {
                let (current, voltage) = sensor.read_raw_current_and_voltage()?;
                Sample::RawCurrentAndVoltage { current, voltage }
            }
            Reader::CurrentAndVoltage => {
                let (current, voltage) = sensor.read_current_and_voltage()?;
                Sample::CurrentAndVoltage { current, voltage }
            }
        })
    }
}

/// Writes one line for the user. Failures only go to the log.
fn report<E: Write + ?Sized>(diag: &mut E, line: fmt::Arguments<'_>) {
    if let Err(e) = writeln!(diag, "{}", line) {
        warn!(error = %e, "Dropped diagnostic: {}", line);
    }
}

/// What a completed run produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub samples: u64,
    pub skipped: u64,
    pub fifo_overflown: bool,
}

/// Reads one sample, retrying for as long as [`MAX_ATTEMPTS`] allows.
///
/// An empty FIFO is expected when polling faster than the sensor converts, so
/// it is retried without a word. Any other error is reported to `diag` before
/// retrying. Returns `None` once every attempt failed.
pub fn collect_sample<S, E>(sensor: &mut S, reader: Reader, diag: &mut E) -> Option<Sample>
where
    S: Sensor + ?Sized,
    E: Write + ?Sized,
{
    for attempt in 1..=MAX_ATTEMPTS {
        match reader.read(sensor) {
            Ok(sample) => {
                trace!(attempt, "Sample collected");
                return Some(sample);
            }
            Err(e) if e.is_fifo_empty() => continue,
            Err(e) => {
                debug!(attempt, error = %e, "Sample read failed");
                let retry = if attempt < MAX_ATTEMPTS { "Trying again. " } else { "" };
                report(
                    diag,
                    format_args!("WARNING: Collecting sample failed with error. {}Error details: {}", retry, e),
                );
            }
        }
    }

    report(diag, format_args!("Collecting sample failed. Giving up."));
    None
}

/// Runs a complete acquisition against `sensor`.
pub fn run<S, O, E>(sensor: &mut S, options: &Options, out: &mut O, diag: &mut E) -> Result<RunSummary, AcquisitionError>
where
    S: Sensor + ?Sized,
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    sensor.init().map_err(AcquisitionError::Init)?;

    let setup = SensorSetup::from_options(options);
    debug!("Sensor setup: {:?}", setup);
    sensor
        .set_configuration(&setup.configuration)
        .map_err(AcquisitionError::Configuration)?;
    sensor
        .set_fifo_configuration(&setup.fifo_configuration)
        .map_err(AcquisitionError::FifoConfiguration)?;
    sensor.flush_fifo().map_err(AcquisitionError::FlushFifo)?;
    sensor
        .clear_pending_interrupts(Interrupts::all())
        .map_err(AcquisitionError::ClearInterrupts)?;

    let reader = Reader::select(options.variable(), options.raw_output());
    info!(?reader, count = ?options.count(), "Sampling");

    let mut summary = RunSummary::default();
    let mut remaining = options.count();
    while remaining.has_remaining() {
        match collect_sample(sensor, reader, diag) {
            Some(sample) => {
                if let Err(e) = writeln!(out, "{}", sample) {
                    if e.kind() == io::ErrorKind::BrokenPipe {
                        debug!("Output closed, stopping acquisition");
                        break;
                    }
                    return Err(e.into());
                }
                summary.samples += 1;
            }
            None => summary.skipped += 1,
        }
        remaining.consume();
    }

    if let Err(e) = sensor.set_configuration(&setup.standby()) {
        report(diag, format_args!("WARNING: Putting sensor into standby failed. Details: {}", e));
    }

    let pending = sensor
        .pending_interrupts()
        .map_err(AcquisitionError::PendingInterrupts)?;
    if pending.contains(Interrupts::FIFO_OVERFLOWN) {
        summary.fifo_overflown = true;
        report(
            diag,
            format_args!(
                "WARNING: FIFO overflown while reading samples. Some samples were missing. \
                 Try reduce sample rate and/or increase I2C clock frequency and/or increase averaging value."
            ),
        );
    }

    info!(
        samples = summary.samples,
        skipped = summary.skipped,
        "Acquisition finished"
    );
    Ok(summary)
}
