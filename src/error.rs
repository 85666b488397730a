// src/error.rs

use max40080_lib::SensorError;
use std::io;
use thiserror::Error;

/// Rejection of the command line before any device is touched.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Syntax problems found by clap, and `--help`/`--version` requests.
    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error("Unknown board '{0}'. Supported boards are 'mikroe-current-6-click' and 'MAX40080EVSYS'.")]
    UnknownBoard(String),

    #[error("Specifying board is not allowed when I2C address was manually specified.")]
    BoardWithI2cAddress,

    #[error("Specifying board is not allowed when shunt resistor value was manually specified.")]
    BoardWithShunt,

    #[error("Invalid I2C controller value '{0}'.")]
    InvalidI2cController(String),

    #[error("Invalid I2C address value '{0}'. I2C address must be entered as 2 digit hex value without any prefix.")]
    InvalidI2cAddress(String),

    #[error("Invalid shunt resistor value '{0}'. Enter resistance in ohms as a positive number.")]
    InvalidShunt(String),

    #[error("Invalid variable value '{0}'. Allowed values are current, voltage and both.")]
    InvalidVariable(String),

    #[error("Invalid sample rate value '{0}'.")]
    InvalidSampleRate(String),

    #[error(
        "Invalid sample rate '{0}'. Allowed sample rates are 15, 18.75, 23.45, 30, 37.5, 47.1, 60, 93.5, 120, 150, 234.5, 375, 468.5, 750, 1000 and 0.5."
    )]
    UnsupportedSampleRate(String),

    #[error(
        "You cant measure at specified sample rate when measurement of both current and voltage is selected. Allowed sample rate in this configuration is 0.5 kHz."
    )]
    SampleRateWithBoth,

    #[error("Invalid averaging value '{0}'.")]
    InvalidAveraging(String),

    #[error("Invalid averaging value '{0}'. Allowed averaging modes are 1 (no averaging), 8, 16, 32, 64 and 128.")]
    UnsupportedAveraging(String),

    #[error("Invalid samples count value '{0}'. Enter a positive number, or -1 to sample indefinitely.")]
    InvalidCount(String),
}

/// Fatal failure of an acquisition run, named after the phase that failed.
#[derive(Error, Debug)]
pub enum AcquisitionError {
    #[error("Sensor initialization failed. Details: {0}")]
    Init(SensorError),

    #[error("Setting sensor configuration failed. Details: {0}")]
    Configuration(SensorError),

    #[error("Setting sensor FIFO configuration failed. Details: {0}")]
    FifoConfiguration(SensorError),

    #[error("Flushing sensor FIFO failed. Details: {0}")]
    FlushFifo(SensorError),

    #[error("Clearing sensor pending interrupts failed. Details: {0}")]
    ClearInterrupts(SensorError),

    #[error("Error while reading sensor pending interrupts. Details: {0}")]
    PendingInterrupts(SensorError),

    #[error("Writing samples failed")]
    Output(#[from] io::Error),
}
