// Register map and conversion constants for the MAX40080

/// Configuration register (2 bytes)
pub const REG_CONFIGURATION: u8 = 0x00;

/// Status register holding interrupt flags and the FIFO fill level (2 bytes)
pub const REG_STATUS: u8 = 0x02;

/// FIFO configuration register (2 bytes)
pub const REG_FIFO_CONFIGURATION: u8 = 0x0A;

/// Oldest current sample in the FIFO (2 bytes)
pub const REG_CURRENT_MEASUREMENT: u8 = 0x0C;

/// Oldest voltage sample in the FIFO (2 bytes)
pub const REG_VOLTAGE_MEASUREMENT: u8 = 0x0E;

/// Oldest current and voltage pair in the FIFO (4 bytes)
pub const REG_CURRENT_AND_VOLTAGE: u8 = 0x10;

/// Interrupt enable register (1 byte)
pub const REG_INTERRUPT_ENABLE: u8 = 0x14;

/// Bit 15 of a measurement word marks a valid FIFO entry
pub const MEASUREMENT_VALID: u16 = 0x8000;

/// Current samples are 13-bit two's complement
pub const CURRENT_BITS: u32 = 13;

/// Voltage samples are 12-bit unsigned
pub const VOLTAGE_MASK: u16 = 0x0FFF;

/// ADC reference voltage in volts
pub const ADC_REFERENCE_V: f32 = 1.25;

/// ADC full scale code
pub const ADC_FULL_SCALE: f32 = 4095.0;

/// Voltage divider ratio of the bus voltage input
pub const VOLTAGE_DIVIDER: f32 = 30.0;

/// Current sense amplifier gain in the 50 mV input range
pub const GAIN_50MV: f32 = 25.0;

/// Current sense amplifier gain in the 10 mV input range
pub const GAIN_10MV: f32 = 125.0;

/// Shunt resistance assumed until one is configured (ohms)
pub const DEFAULT_SHUNT_RESISTOR: f32 = 0.010;

/// Power-on FIFO overflow warning threshold
pub const DEFAULT_FIFO_OVERFLOW_THRESHOLD: u8 = 0x34;
