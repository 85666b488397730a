use crate::options::{Options, Variable};
use max40080_lib::{AdcSampleRate, Configuration, FifoConfiguration, FifoStoringMode, OperatingMode};

/// Register contents an acquisition run programs into the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorSetup {
    pub configuration: Configuration,
    pub fifo_configuration: FifoConfiguration,
}

impl SensorSetup {
    /// Starts from the power-on defaults and applies only what the user asked for.
    pub fn from_options(options: &Options) -> Self {
        let mut configuration = Configuration {
            operating_mode: OperatingMode::Active,
            ..Configuration::default()
        };

        if let Some(rate) = options.sample_rate() {
            configuration.adc_sample_rate = rate;
        } else if options.variable() == Some(Variable::Both) {
            configuration.adc_sample_rate = AdcSampleRate::Ksps0_5Both;
        }

        if let Some(filter) = options.averaging() {
            configuration.digital_filter = filter;
        }

        let mut fifo_configuration = FifoConfiguration::default();
        if let Some(variable) = options.variable() {
            fifo_configuration.storing_mode = variable.into();
        }

        Self {
            configuration,
            fifo_configuration,
        }
    }

    /// Same setup with the sensor parked in standby.
    pub fn standby(&self) -> Configuration {
        Configuration {
            operating_mode: OperatingMode::Standby,
            ..self.configuration
        }
    }
}

impl From<Variable> for FifoStoringMode {
    fn from(variable: Variable) -> Self {
        match variable {
            Variable::Current => FifoStoringMode::CurrentOnly,
            Variable::Voltage => FifoStoringMode::VoltageOnly,
            Variable::Both => FifoStoringMode::CurrentAndVoltage,
        }
    }
}
