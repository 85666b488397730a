use bitflags::bitflags;
use modular_bitfield::prelude::*;

/// Raw layout of the CFG register, least significant bit first.
#[bitfield(bytes = 2)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfigurationRegister {
    pub mode: B3,
    pub i2c_timeout_disabled: bool,
    pub alert_filtered: bool,
    pub pec_enabled: bool,
    pub input_range_10mv: bool,
    pub stay_hs_mode: bool,
    pub adc_sample_rate: B4,
    pub digital_filter: B3,
    #[skip]
    unused: B1,
}

/// Raw layout of the FIFO_CFG register.
#[bitfield(bytes = 2)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FifoConfigurationRegister {
    pub storing_mode: B2,
    #[skip]
    unused: B6,
    pub overflow_threshold: B6,
    pub roll_over: bool,
    pub flush: bool,
}

/// Raw layout of the STATUS register.
#[bitfield(bytes = 2)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusRegister {
    pub interrupts: u8,
    #[skip]
    unused: B2,
    pub fifo_data_count: B6,
}

bitflags! {
    /// Interrupt flags as laid out in the low byte of STATUS and in INTERRUPT_ENABLE.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Interrupts: u8 {
        const WAKE_UP = 1 << 0;
        const CONVERSION_READY = 1 << 1;
        const OVER_CURRENT = 1 << 2;
        const OVER_VOLTAGE = 1 << 3;
        const UNDER_VOLTAGE = 1 << 4;
        const I2C_TIMEOUT = 1 << 5;
        const FIFO_ALARM = 1 << 6;
        const FIFO_OVERFLOWN = 1 << 7;
    }
}
