use crate::constants::DEFAULT_FIFO_OVERFLOW_THRESHOLD;
use crate::error::SensorError;
use crate::registers::{ConfigurationRegister, FifoConfigurationRegister};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Default, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum OperatingMode {
    #[default]
    Standby = 0,
    #[strum(to_string = "Low Power")]
    LowPower = 1,
    #[strum(to_string = "Single Conversion")]
    SingleConversion = 2,
    Active = 3,
    #[strum(to_string = "Active at 4 SPS")]
    Active4Sps = 4,
    #[strum(to_string = "Active at 1 SPS")]
    Active1Sps = 5,
    #[strum(to_string = "Active at 0.25 SPS")]
    Active0_25Sps = 6,
    #[strum(to_string = "Active at 0.0625 SPS")]
    Active0_0625Sps = 7,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Default, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum InputRange {
    #[default]
    #[strum(to_string = "50 mV")]
    Range50mV = 0,
    #[strum(to_string = "10 mV")]
    Range10mV = 1,
}

/// ADC conversion rate. The discriminant is the register encoding, so the
/// declaration order is the device's (not ascending) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Default, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum AdcSampleRate {
    #[default]
    #[strum(to_string = "15 ksps")]
    Ksps15 = 0,
    #[strum(to_string = "18.75 ksps")]
    Ksps18_75 = 1,
    #[strum(to_string = "23.45 ksps")]
    Ksps23_45 = 2,
    #[strum(to_string = "30 ksps")]
    Ksps30 = 3,
    #[strum(to_string = "37.5 ksps")]
    Ksps37_5 = 4,
    #[strum(to_string = "47.1 ksps")]
    Ksps47_1 = 5,
    #[strum(to_string = "60 ksps")]
    Ksps60 = 6,
    #[strum(to_string = "93.5 ksps")]
    Ksps93_5 = 7,
    #[strum(to_string = "120 ksps")]
    Ksps120 = 8,
    #[strum(to_string = "150 ksps")]
    Ksps150 = 9,
    #[strum(to_string = "234.5 ksps")]
    Ksps234_5 = 10,
    #[strum(to_string = "375 ksps")]
    Ksps375 = 11,
    #[strum(to_string = "468.5 ksps")]
    Ksps468_5 = 12,
    #[strum(to_string = "750 ksps")]
    Ksps750 = 13,
    #[strum(to_string = "1000 ksps")]
    Ksps1000 = 14,
    /// The only rate usable when current and voltage are both stored in the FIFO.
    #[strum(to_string = "0.5 ksps")]
    Ksps0_5Both = 15,
}

impl AdcSampleRate {
    /// Every rate in register order.
    pub const ALL: [AdcSampleRate; 16] = [
        AdcSampleRate::Ksps15,
        AdcSampleRate::Ksps18_75,
        AdcSampleRate::Ksps23_45,
        AdcSampleRate::Ksps30,
        AdcSampleRate::Ksps37_5,
        AdcSampleRate::Ksps47_1,
        AdcSampleRate::Ksps60,
        AdcSampleRate::Ksps93_5,
        AdcSampleRate::Ksps120,
        AdcSampleRate::Ksps150,
        AdcSampleRate::Ksps234_5,
        AdcSampleRate::Ksps375,
        AdcSampleRate::Ksps468_5,
        AdcSampleRate::Ksps750,
        AdcSampleRate::Ksps1000,
        AdcSampleRate::Ksps0_5Both,
    ];

    /// Conversion rate in kilosamples per second
    pub fn as_khz(&self) -> f64 {
        match self {
            AdcSampleRate::Ksps15 => 15.0,
            AdcSampleRate::Ksps18_75 => 18.75,
            AdcSampleRate::Ksps23_45 => 23.45,
            AdcSampleRate::Ksps30 => 30.0,
            AdcSampleRate::Ksps37_5 => 37.5,
            AdcSampleRate::Ksps47_1 => 47.1,
            AdcSampleRate::Ksps60 => 60.0,
            AdcSampleRate::Ksps93_5 => 93.5,
            AdcSampleRate::Ksps120 => 120.0,
            AdcSampleRate::Ksps150 => 150.0,
            AdcSampleRate::Ksps234_5 => 234.5,
            AdcSampleRate::Ksps375 => 375.0,
            AdcSampleRate::Ksps468_5 => 468.5,
            AdcSampleRate::Ksps750 => 750.0,
            AdcSampleRate::Ksps1000 => 1000.0,
            AdcSampleRate::Ksps0_5Both => 0.5,
        }
    }
}

/// Number of conversions averaged into one reported sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Default, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum DigitalFilter {
    #[default]
    #[strum(to_string = "no averaging")]
    NoAverage = 0,
    #[strum(to_string = "8 samples")]
    Average8 = 1,
    #[strum(to_string = "16 samples")]
    Average16 = 2,
    #[strum(to_string = "32 samples")]
    Average32 = 3,
    #[strum(to_string = "64 samples")]
    Average64 = 4,
    #[strum(to_string = "128 samples")]
    Average128 = 5,
}

impl DigitalFilter {
    pub const ALL: [DigitalFilter; 6] = [
        DigitalFilter::NoAverage,
        DigitalFilter::Average8,
        DigitalFilter::Average16,
        DigitalFilter::Average32,
        DigitalFilter::Average64,
        DigitalFilter::Average128,
    ];

    pub fn samples(&self) -> u32 {
        match self {
            DigitalFilter::NoAverage => 1,
            DigitalFilter::Average8 => 8,
            DigitalFilter::Average16 => 16,
            DigitalFilter::Average32 => 32,
            DigitalFilter::Average64 => 64,
            DigitalFilter::Average128 => 128,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Default, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum FifoStoringMode {
    #[default]
    #[strum(to_string = "current only")]
    CurrentOnly = 0,
    #[strum(to_string = "voltage only")]
    VoltageOnly = 1,
    #[strum(to_string = "current and voltage")]
    CurrentAndVoltage = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Default)]
pub enum FifoRollOverMode {
    /// New samples are dropped while the FIFO is full.
    #[default]
    KeepOldest,
    OverwriteOldest,
}

/// Contents of the CFG register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    pub operating_mode: OperatingMode,
    pub i2c_timeout_disabled: bool,
    pub alert_filtered: bool,
    pub packet_error_checking: bool,
    pub input_range: InputRange,
    pub stay_hs_mode: bool,
    pub adc_sample_rate: AdcSampleRate,
    pub digital_filter: DigitalFilter,
}

impl Default for Configuration {
    /// Power-on state of the sensor.
    fn default() -> Self {
        Self {
            operating_mode: OperatingMode::Standby,
            i2c_timeout_disabled: false,
            alert_filtered: false,
            packet_error_checking: true,
            input_range: InputRange::Range50mV,
            stay_hs_mode: false,
            adc_sample_rate: AdcSampleRate::Ksps15,
            digital_filter: DigitalFilter::NoAverage,
        }
    }
}

impl From<Configuration> for ConfigurationRegister {
    fn from(config: Configuration) -> Self {
        ConfigurationRegister::new()
            .with_mode(config.operating_mode.into())
            .with_i2c_timeout_disabled(config.i2c_timeout_disabled)
            .with_alert_filtered(config.alert_filtered)
            .with_pec_enabled(config.packet_error_checking)
            .with_input_range_10mv(config.input_range == InputRange::Range10mV)
            .with_stay_hs_mode(config.stay_hs_mode)
            .with_adc_sample_rate(config.adc_sample_rate.into())
            .with_digital_filter(config.digital_filter.into())
    }
}

impl TryFrom<ConfigurationRegister> for Configuration {
    type Error = SensorError;

    /// Fails on the reserved digital filter encodings 6 and 7.
    fn try_from(reg: ConfigurationRegister) -> Result<Self, Self::Error> {
        Ok(Self {
            operating_mode: OperatingMode::try_from(reg.mode()).map_err(|_| SensorError::BadArgument)?,
            i2c_timeout_disabled: reg.i2c_timeout_disabled(),
            alert_filtered: reg.alert_filtered(),
            packet_error_checking: reg.pec_enabled(),
            input_range: if reg.input_range_10mv() {
                InputRange::Range10mV
            } else {
                InputRange::Range50mV
            },
            stay_hs_mode: reg.stay_hs_mode(),
            adc_sample_rate: AdcSampleRate::try_from(reg.adc_sample_rate()).map_err(|_| SensorError::BadArgument)?,
            digital_filter: DigitalFilter::try_from(reg.digital_filter()).map_err(|_| SensorError::BadArgument)?,
        })
    }
}

/// Contents of the FIFO_CFG register (without the self-clearing flush bit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FifoConfiguration {
    pub storing_mode: FifoStoringMode,
    /// Fill level (0..=63) at which the FIFO alarm interrupt fires.
    pub overflow_warning_threshold: u8,
    pub roll_over_mode: FifoRollOverMode,
}

impl Default for FifoConfiguration {
    fn default() -> Self {
        Self {
            storing_mode: FifoStoringMode::CurrentOnly,
            overflow_warning_threshold: DEFAULT_FIFO_OVERFLOW_THRESHOLD,
            roll_over_mode: FifoRollOverMode::KeepOldest,
        }
    }
}

impl FifoConfiguration {
    /// Register image of this configuration, with the flush bit as requested.
    pub fn to_register(&self, flush: bool) -> Result<FifoConfigurationRegister, SensorError> {
        if self.overflow_warning_threshold > 0x3F {
            return Err(SensorError::BadArgument);
        }

        Ok(FifoConfigurationRegister::new()
            .with_storing_mode(self.storing_mode.into())
            .with_overflow_threshold(self.overflow_warning_threshold)
            .with_roll_over(self.roll_over_mode == FifoRollOverMode::OverwriteOldest)
            .with_flush(flush))
    }
}

impl TryFrom<FifoConfigurationRegister> for FifoConfiguration {
    type Error = SensorError;

    fn try_from(reg: FifoConfigurationRegister) -> Result<Self, Self::Error> {
        Ok(Self {
            storing_mode: FifoStoringMode::try_from(reg.storing_mode()).map_err(|_| SensorError::BadArgument)?,
            overflow_warning_threshold: reg.overflow_threshold(),
            roll_over_mode: if reg.roll_over() {
                FifoRollOverMode::OverwriteOldest
            } else {
                FifoRollOverMode::KeepOldest
            },
        })
    }
}
