use std::fmt;

/// One reading as it is printed. Raw variants carry register codes, the others
/// amperes and volts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    RawCurrent(i16),
    RawVoltage(i16),
    RawCurrentAndVoltage { current: i16, voltage: i16 },
    Current(f32),
    Voltage(f32),
    CurrentAndVoltage { current: f32, voltage: f32 },
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sample::RawCurrent(value) | Sample::RawVoltage(value) => write!(f, "{}", value),
            Sample::RawCurrentAndVoltage { current, voltage } => write!(f, "{}; {}", current, voltage),
            Sample::Current(current) => write!(f, "{:.6}A", current),
            Sample::Voltage(voltage) => write!(f, "{:.3}V", voltage),
            Sample::CurrentAndVoltage { current, voltage } => write!(f, "{:.6}A; {:.3}V", current, voltage),
        }
    }
}
