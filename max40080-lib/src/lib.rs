pub mod bus;
pub mod config;
pub mod constants;
pub mod device;
pub mod error;
pub mod pec;
pub mod registers;
pub mod sensor;

// Re-export the driver and its contract for easy access
pub use bus::{Bus, I2cBus, I2cSpeed};
pub use config::{
    AdcSampleRate, Configuration, DigitalFilter, FifoConfiguration, FifoRollOverMode, FifoStoringMode, InputRange,
    OperatingMode,
};
pub use device::Max40080;
pub use error::SensorError;
pub use registers::Interrupts;
pub use sensor::Sensor;
