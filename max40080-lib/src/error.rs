use thiserror::Error;

/// Failure kinds reported by the MAX40080 driver and the bus below it.
///
/// `FifoIsEmpty` is not a fault: the sensor simply has no new sample yet.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    #[error("I2C Nack Received")]
    BusNack,

    #[error("Other I2C Error")]
    BusError,

    #[error("I2C Operation Timed Out")]
    BusTimeout,

    #[error("Packet Error Check Failed")]
    PacketCheckFailed,

    #[error("Specified operation is not implemented")]
    NotImplemented,

    #[error("Bad Argument")]
    BadArgument,

    #[error("Invalid Operation")]
    InvalidOperation,

    #[error("FIFO is empty")]
    FifoIsEmpty,

    #[error("Specified operation is not supported")]
    NotSupported,
}

impl SensorError {
    /// `true` for the one status that means "no data yet" rather than a failure.
    pub fn is_fifo_empty(&self) -> bool {
        matches!(self, SensorError::FifoIsEmpty)
    }
}

impl From<embedded_hal::i2c::ErrorKind> for SensorError {
    fn from(kind: embedded_hal::i2c::ErrorKind) -> Self {
        use embedded_hal::i2c::ErrorKind;

        match kind {
            ErrorKind::NoAcknowledge(_) => SensorError::BusNack,
            _ => SensorError::BusError,
        }
    }
}
