//! Command line options.
//!
//! clap takes care of the syntax (flag names, values present, `--help`); every
//! value is then parsed and cross-checked here, so the rules hold no matter in
//! which order the flags were given.

use crate::error::ValidationError;
use clap::{CommandFactory, Parser, error::ErrorKind};
use max40080_lib::{AdcSampleRate, DigitalFilter};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use strum_macros::Display;

/// Bus used when `--i2c-controler` is not given
pub const DEFAULT_I2C_CONTROLLER: u32 = 1;

/// Address used when neither `--board` nor `--i2c-address` is given
pub const DEFAULT_I2C_ADDRESS: u8 = 0x21;

/// Shunt used when neither `--board` nor `--shunt` is given (ohms)
pub const DEFAULT_SHUNT_RESISTOR: f32 = 0.010;

/// Two sample rates match when they differ by at most this much (kHz)
pub const SAMPLE_RATE_TOLERANCE: f64 = 0.01;

/// Utility for controlling MAX40080 sensor connected to the I2C bus.
#[derive(Parser, Debug)]
#[command(name = "max40080-util", author, version, about, long_about = None)]
pub struct Cli {
    /// Specify board. Supported boards are 'mikroe-current-6-click' and 'MAX40080EVSYS'.
    #[arg(short, long, value_name = "BOARD")]
    pub board: Option<String>,

    /// Specify I2C controller number. Device /dev/i2c-N will be used.
    #[arg(short = 'c', long = "i2c-controler", alias = "i2c-controller", value_name = "N")]
    pub i2c_controller: Option<String>,

    /// Specify I2C address of MAX40080 device as a 2 digit HEX number with no prefix.
    #[arg(short = 'a', long = "i2c-address", value_name = "HEX")]
    pub i2c_address: Option<String>,

    /// Specify resistance of shunt resistor used for current sensing (ohms).
    #[arg(short = 'r', long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub shunt: Option<String>,

    /// Specify variable to measure.
    #[arg(short, long, value_name = "current|voltage|both")]
    pub variable: Option<String>,

    /// Specify sample rate in kHz.
    #[arg(short, long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub sample_rate: Option<String>,

    /// Specify number of averaged samples.
    #[arg(short = 'f', long, value_name = "N", allow_negative_numbers = true)]
    pub averaging: Option<String>,

    /// Specify number of continuously collected samples, -1 to sample until interrupted.
    #[arg(short = 'n', long, value_name = "N", allow_negative_numbers = true)]
    pub count: Option<String>,

    /// Output raw values received from sensor.
    #[arg(short = 'w', long)]
    pub raw: bool,

    /// Optional path to a file to write logs to, in addition to the console.
    #[arg(short, long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Board {
    #[strum(to_string = "mikroe-current-6-click")]
    MikroeCurrent6Click,
    #[strum(to_string = "MAX40080EVSYS")]
    Max40080Evsys,
}

impl Board {
    pub fn i2c_address(&self) -> u8 {
        match self {
            Board::MikroeCurrent6Click => 0x21,
            Board::Max40080Evsys => 0x21,
        }
    }

    pub fn shunt_resistor(&self) -> f32 {
        match self {
            Board::MikroeCurrent6Click => 0.010,
            Board::Max40080Evsys => 0.050,
        }
    }
}

/// Quantity to sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Variable {
    Current,
    Voltage,
    Both,
}

/// How many samples to collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleCount {
    Limited(u32),
    /// Keep sampling until the process is stopped from outside.
    Unbounded,
}

impl Default for SampleCount {
    fn default() -> Self {
        SampleCount::Limited(1)
    }
}

impl SampleCount {
    pub fn has_remaining(&self) -> bool {
        match self {
            SampleCount::Limited(n) => *n > 0,
            SampleCount::Unbounded => true,
        }
    }

    /// Accounts for one sample; never changes an unbounded count.
    pub fn consume(&mut self) {
        if let SampleCount::Limited(n) = self {
            *n = n.saturating_sub(1);
        }
    }
}

/// Validated command line. Fields only hold what the user asked for; the
/// accessors resolve board presets and defaults.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Options {
    board: Option<Board>,
    i2c_address: Option<u8>,
    i2c_controller: Option<u32>,
    shunt_resistor: Option<f32>,
    variable: Option<Variable>,
    sample_rate: Option<AdcSampleRate>,
    averaging: Option<DigitalFilter>,
    count: SampleCount,
    raw_output: bool,
    log_file: Option<PathBuf>,
}

impl Options {
    /// Parses and validates a full argument list, program name first.
    pub fn from_args<I, T>(args: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        Options::try_from(cli)
    }

    pub fn board(&self) -> Option<Board> {
        self.board
    }

    pub fn i2c_address(&self) -> u8 {
        self.board
            .map(|board| board.i2c_address())
            .or(self.i2c_address)
            .unwrap_or(DEFAULT_I2C_ADDRESS)
    }

    pub fn i2c_controller(&self) -> u32 {
        self.i2c_controller.unwrap_or(DEFAULT_I2C_CONTROLLER)
    }

    pub fn shunt_resistor(&self) -> f32 {
        self.board
            .map(|board| board.shunt_resistor())
            .or(self.shunt_resistor)
            .unwrap_or(DEFAULT_SHUNT_RESISTOR)
    }

    pub fn variable(&self) -> Option<Variable> {
        self.variable
    }

    pub fn sample_rate(&self) -> Option<AdcSampleRate> {
        self.sample_rate
    }

    pub fn averaging(&self) -> Option<DigitalFilter> {
        self.averaging
    }

    pub fn count(&self) -> SampleCount {
        self.count
    }

    pub fn raw_output(&self) -> bool {
        self.raw_output
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}

impl TryFrom<Cli> for Options {
    type Error = ValidationError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let board = cli.board.as_deref().map(parse_board).transpose()?;
        let i2c_address = cli.i2c_address.as_deref().map(parse_i2c_address).transpose()?;
        let i2c_controller = cli.i2c_controller.as_deref().map(parse_i2c_controller).transpose()?;
        let shunt_resistor = cli.shunt.as_deref().map(parse_shunt).transpose()?;
        let variable = cli.variable.as_deref().map(parse_variable).transpose()?;
        let sample_rate = cli.sample_rate.as_deref().map(parse_sample_rate).transpose()?;
        let averaging = cli.averaging.as_deref().map(parse_averaging).transpose()?;
        let count = cli.count.as_deref().map(parse_count).transpose()?.unwrap_or_default();

        if board.is_some() {
            if i2c_address.is_some() {
                return Err(ValidationError::BoardWithI2cAddress);
            }
            if shunt_resistor.is_some() {
                return Err(ValidationError::BoardWithShunt);
            }
        }

        if variable == Some(Variable::Both) && sample_rate.is_some_and(|rate| rate != AdcSampleRate::Ksps0_5Both) {
            return Err(ValidationError::SampleRateWithBoth);
        }

        Ok(Options {
            board,
            i2c_address,
            i2c_controller,
            shunt_resistor,
            variable,
            sample_rate,
            averaging,
            count,
            raw_output: cli.raw,
            log_file: cli.log_file,
        })
    }
}

impl ValidationError {
    /// Renders the error the way clap renders its own, usage line included.
    pub fn into_clap_error(self) -> clap::Error {
        match self {
            ValidationError::Cli(e) => e,
            other => Cli::command().error(ErrorKind::ValueValidation, other),
        }
    }
}

pub fn parse_board(arg: &str) -> Result<Board, ValidationError> {
    match arg {
        "mikroe-current-6-click" => Ok(Board::MikroeCurrent6Click),
        "MAX40080EVSYS" => Ok(Board::Max40080Evsys),
        _ => Err(ValidationError::UnknownBoard(arg.to_string())),
    }
}

/// Exactly two hex digits, high nibble first.
pub fn parse_i2c_address(arg: &str) -> Result<u8, ValidationError> {
    let invalid = || ValidationError::InvalidI2cAddress(arg.to_string());

    let mut digits = arg.trim_start().chars().map(|c| c.to_digit(16));
    match (digits.next(), digits.next(), digits.next()) {
        (Some(Some(high)), Some(Some(low)), None) => Ok((high * 16 + low) as u8),
        _ => Err(invalid()),
    }
}

pub fn parse_i2c_controller(arg: &str) -> Result<u32, ValidationError> {
    arg.trim_start()
        .parse()
        .map_err(|_| ValidationError::InvalidI2cController(arg.to_string()))
}

pub fn parse_shunt(arg: &str) -> Result<f32, ValidationError> {
    match arg.trim_start().parse::<f32>() {
        Ok(ohms) if ohms.is_finite() && ohms > 0.0 => Ok(ohms),
        _ => Err(ValidationError::InvalidShunt(arg.to_string())),
    }
}

pub fn parse_variable(arg: &str) -> Result<Variable, ValidationError> {
    match arg {
        "current" => Ok(Variable::Current),
        "voltage" => Ok(Variable::Voltage),
        "both" => Ok(Variable::Both),
        _ => Err(ValidationError::InvalidVariable(arg.to_string())),
    }
}

/// Matches a rate in kHz against the rates the ADC supports.
pub fn parse_sample_rate(arg: &str) -> Result<AdcSampleRate, ValidationError> {
    let khz: f64 = arg
        .trim_start()
        .parse()
        .map_err(|_| ValidationError::InvalidSampleRate(arg.to_string()))?;

    // The slack keeps inputs exactly 0.01 away (93.49, 93.51) inside the tolerance
    AdcSampleRate::ALL
        .into_iter()
        .find(|rate| (khz - rate.as_khz()).abs() <= SAMPLE_RATE_TOLERANCE + 1e-9)
        .ok_or_else(|| ValidationError::UnsupportedSampleRate(arg.to_string()))
}

pub fn parse_averaging(arg: &str) -> Result<DigitalFilter, ValidationError> {
    let samples: i64 = arg
        .trim_start()
        .parse()
        .map_err(|_| ValidationError::InvalidAveraging(arg.to_string()))?;

    DigitalFilter::ALL
        .into_iter()
        .find(|filter| i64::from(filter.samples()) == samples)
        .ok_or_else(|| ValidationError::UnsupportedAveraging(arg.to_string()))
}

pub fn parse_count(arg: &str) -> Result<SampleCount, ValidationError> {
    let invalid = || ValidationError::InvalidCount(arg.to_string());

    match arg.trim_start().parse::<i32>().map_err(|_| invalid())? {
        -1 => Ok(SampleCount::Unbounded),
        n if n > 0 => Ok(SampleCount::Limited(n as u32)),
        _ => Err(invalid()),
    }
}
