use crate::config::{Configuration, FifoConfiguration};
use crate::error::SensorError;
use crate::registers::Interrupts;

/// Operations a MAX40080 driver offers to its users.
///
/// Default configurations are the `Default` impls of [`Configuration`] and
/// [`FifoConfiguration`]. Every read takes the oldest entry out of the FIFO
/// and fails with [`SensorError::FifoIsEmpty`] when there is none.
pub trait Sensor {
    fn init(&mut self) -> Result<(), SensorError>;

    fn deinit(&mut self) -> Result<(), SensorError>;

    fn set_configuration(&mut self, config: &Configuration) -> Result<(), SensorError>;

    fn set_fifo_configuration(&mut self, config: &FifoConfiguration) -> Result<(), SensorError>;

    fn flush_fifo(&mut self) -> Result<(), SensorError>;

    fn clear_pending_interrupts(&mut self, mask: Interrupts) -> Result<(), SensorError>;

    fn pending_interrupts(&mut self) -> Result<Interrupts, SensorError>;

    fn read_raw_current(&mut self) -> Result<i16, SensorError>;

    /// Current in amperes.
    fn read_current(&mut self) -> Result<f32, SensorError>;

    fn read_raw_voltage(&mut self) -> Result<i16, SensorError>;

    /// Bus voltage in volts.
    fn read_voltage(&mut self) -> Result<f32, SensorError>;

    /// `(current, voltage)` taken from the same FIFO entry.
    fn read_raw_current_and_voltage(&mut self) -> Result<(i16, i16), SensorError>;

    fn read_current_and_voltage(&mut self) -> Result<(f32, f32), SensorError>;
}
