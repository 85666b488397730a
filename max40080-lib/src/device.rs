use crate::bus::{Bus, I2cSpeed};
use crate::config::{Configuration, FifoConfiguration, FifoStoringMode, InputRange, OperatingMode};
use crate::constants::*;
use crate::error::SensorError;
use crate::pec;
use crate::registers::{ConfigurationRegister, FifoConfigurationRegister, Interrupts, StatusRegister};
use crate::sensor::Sensor;
use byteorder::{ByteOrder, LittleEndian};
use tracing::{debug, info};

// Largest register is 4 bytes, plus one PEC byte
const MAX_FRAME: usize = 5;

/// MAX40080 driver over a register [`Bus`].
///
/// The driver mirrors the CFG and FIFO_CFG registers so it knows whether
/// transfers carry a PEC byte, which input range scales the current and
/// which measurement register the FIFO is filled through.
pub struct Max40080<B> {
    bus: B,
    shunt_resistor: f32,
    config: Configuration,
    fifo_config: FifoConfiguration,
    initialized: bool,
}

impl<B: Bus> Max40080<B> {
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            shunt_resistor: DEFAULT_SHUNT_RESISTOR,
            config: Configuration::default(),
            fifo_config: FifoConfiguration::default(),
            initialized: false,
        }
    }

    /// Sets the shunt resistance (ohms) used to turn the sensed voltage into a current.
    pub fn with_shunt_resistor(mut self, ohms: f32) -> Result<Self, SensorError> {
        if !ohms.is_finite() || ohms <= 0.0 {
            return Err(SensorError::BadArgument);
        }
        self.shunt_resistor = ohms;
        Ok(self)
    }

    pub fn shunt_resistor(&self) -> f32 {
        self.shunt_resistor
    }

    /// Last configuration written to (or read from) the sensor
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn fifo_configuration(&self) -> &FifoConfiguration {
        &self.fifo_config
    }

    /// Number of entries waiting in the FIFO.
    pub fn fifo_data_count(&mut self) -> Result<u8, SensorError> {
        Ok(self.read_status()?.fifo_data_count())
    }

    /// Selects which interrupts drive the ALERT pin.
    pub fn enable_interrupts(&mut self, mask: Interrupts) -> Result<(), SensorError> {
        self.ensure_initialized()?;
        self.write_register(REG_INTERRUPT_ENABLE, &[mask.bits()])
    }

    /// Starts one conversion. Only meaningful in single conversion mode.
    pub fn trigger_single_conversion(&mut self) -> Result<(), SensorError> {
        self.ensure_initialized()?;
        if self.config.operating_mode != OperatingMode::SingleConversion {
            return Err(SensorError::InvalidOperation);
        }
        self.bus.quick_command()
    }

    pub fn release(self) -> B {
        self.bus
    }

    fn ensure_initialized(&self) -> Result<(), SensorError> {
        if self.initialized {
            Ok(())
        } else {
            Err(SensorError::InvalidOperation)
        }
    }

    fn ensure_storing_mode(&self, mode: FifoStoringMode) -> Result<(), SensorError> {
        self.ensure_initialized()?;
        if self.fifo_config.storing_mode == mode {
            Ok(())
        } else {
            Err(SensorError::InvalidOperation)
        }
    }

    fn read_register(&mut self, register: u8, buf: &mut [u8]) -> Result<(), SensorError> {
        let pec_len = usize::from(self.config.packet_error_checking);
        let mut frame = [0u8; MAX_FRAME];
        let frame = &mut frame[..buf.len() + pec_len];
        self.bus.read(register, frame)?;

        let (data, received_pec) = frame.split_at(buf.len());
        if let Some(&received) = received_pec.first() {
            let expected = pec::for_read(self.bus.address(), register, data);
            if received != expected {
                debug!(
                    "PEC mismatch on reg 0x{:02x}: received 0x{:02x}, expected 0x{:02x}",
                    register, received, expected
                );
                return Err(SensorError::PacketCheckFailed);
            }
        }

        buf.copy_from_slice(data);
        Ok(())
    }

    fn write_register(&mut self, register: u8, data: &[u8]) -> Result<(), SensorError> {
        let mut frame = [0u8; MAX_FRAME];
        frame[..data.len()].copy_from_slice(data);
        let mut len = data.len();

        if self.config.packet_error_checking {
            frame[len] = pec::for_write(self.bus.address(), register, data);
            len += 1;
        }

        self.bus.write(register, &frame[..len])
    }

    fn read_status(&mut self) -> Result<StatusRegister, SensorError> {
        self.ensure_initialized()?;
        let mut raw = [0u8; 2];
        self.read_register(REG_STATUS, &mut raw)?;
        Ok(StatusRegister::from_bytes(raw))
    }

    fn read_word(&mut self, register: u8) -> Result<u16, SensorError> {
        let mut raw = [0u8; 2];
        self.read_register(register, &mut raw)?;
        let word = LittleEndian::read_u16(&raw);
        if word & MEASUREMENT_VALID == 0 {
            return Err(SensorError::FifoIsEmpty);
        }
        Ok(word)
    }

    fn current_from_raw(&self, raw: i16) -> f32 {
        let gain = match self.config.input_range {
            InputRange::Range50mV => GAIN_50MV,
            InputRange::Range10mV => GAIN_10MV,
        };
        raw as f32 * ADC_REFERENCE_V / ADC_FULL_SCALE / gain / self.shunt_resistor
    }

    fn voltage_from_raw(&self, raw: i16) -> f32 {
        raw as f32 * ADC_REFERENCE_V / ADC_FULL_SCALE * VOLTAGE_DIVIDER
    }
}

fn raw_current(word: u16) -> i16 {
    let shift = 16 - CURRENT_BITS;
    ((word << shift) as i16) >> shift
}

fn raw_voltage(word: u16) -> i16 {
    (word & VOLTAGE_MASK) as i16
}

impl<B: Bus> Sensor for Max40080<B> {
    fn init(&mut self) -> Result<(), SensorError> {
        info!("Initializing MAX40080 at address 0x{:02x}", self.bus.address());
        self.bus.set_speed(I2cSpeed::Fast)?;

        // The cached defaults match the power-on state, which enables PEC.
        let mut raw = [0u8; 2];
        self.read_register(REG_CONFIGURATION, &mut raw)?;
        self.config = Configuration::try_from(ConfigurationRegister::from_bytes(raw))?;
        self.read_register(REG_FIFO_CONFIGURATION, &mut raw)?;
        self.fifo_config = FifoConfiguration::try_from(FifoConfigurationRegister::from_bytes(raw))?;

        debug!("Sensor configuration: {:?}", self.config);
        debug!("Sensor FIFO configuration: {:?}", self.fifo_config);
        self.initialized = true;
        Ok(())
    }

    fn deinit(&mut self) -> Result<(), SensorError> {
        self.ensure_initialized()?;
        debug!("Releasing MAX40080");
        self.initialized = false;
        Ok(())
    }

    fn set_configuration(&mut self, config: &Configuration) -> Result<(), SensorError> {
        self.ensure_initialized()?;
        if config.stay_hs_mode {
            return Err(SensorError::NotImplemented);
        }

        let reg = ConfigurationRegister::from(*config);
        self.write_register(REG_CONFIGURATION, &reg.into_bytes())?;
        debug!(
            "Configured mode={}, rate={}, filter={}",
            config.operating_mode, config.adc_sample_rate, config.digital_filter
        );
        self.config = *config;
        Ok(())
    }

    fn set_fifo_configuration(&mut self, config: &FifoConfiguration) -> Result<(), SensorError> {
        self.ensure_initialized()?;
        let reg = config.to_register(false)?;
        self.write_register(REG_FIFO_CONFIGURATION, &reg.into_bytes())?;
        debug!("Configured FIFO storing mode={}", config.storing_mode);
        self.fifo_config = *config;
        Ok(())
    }

    fn flush_fifo(&mut self) -> Result<(), SensorError> {
        self.ensure_initialized()?;
        let reg = self.fifo_config.to_register(true)?;
        self.write_register(REG_FIFO_CONFIGURATION, &reg.into_bytes())
    }

    fn clear_pending_interrupts(&mut self, mask: Interrupts) -> Result<(), SensorError> {
        self.ensure_initialized()?;
        self.write_register(REG_STATUS, &[mask.bits(), 0])
    }

    fn pending_interrupts(&mut self) -> Result<Interrupts, SensorError> {
        let status = self.read_status()?;
        Ok(Interrupts::from_bits_truncate(status.interrupts()))
    }

    fn read_raw_current(&mut self) -> Result<i16, SensorError> {
        self.ensure_storing_mode(FifoStoringMode::CurrentOnly)?;
        let word = self.read_word(REG_CURRENT_MEASUREMENT)?;
        Ok(raw_current(word))
    }

    fn read_current(&mut self) -> Result<f32, SensorError> {
        let raw = self.read_raw_current()?;
        Ok(self.current_from_raw(raw))
    }

    fn read_raw_voltage(&mut self) -> Result<i16, SensorError> {
        self.ensure_storing_mode(FifoStoringMode::VoltageOnly)?;
        let word = self.read_word(REG_VOLTAGE_MEASUREMENT)?;
        Ok(raw_voltage(word))
    }

    fn read_voltage(&mut self) -> Result<f32, SensorError> {
        let raw = self.read_raw_voltage()?;
        Ok(self.voltage_from_raw(raw))
    }

    fn read_raw_current_and_voltage(&mut self) -> Result<(i16, i16), SensorError> {
        self.ensure_storing_mode(FifoStoringMode::CurrentAndVoltage)?;
        let mut raw = [0u8; 4];
        self.read_register(REG_CURRENT_AND_VOLTAGE, &mut raw)?;

        let current = LittleEndian::read_u16(&raw[..2]);
        let voltage = LittleEndian::read_u16(&raw[2..]);
        if voltage & MEASUREMENT_VALID == 0 {
            return Err(SensorError::FifoIsEmpty);
        }
        Ok((raw_current(current), raw_voltage(voltage)))
    }

    fn read_current_and_voltage(&mut self) -> Result<(f32, f32), SensorError> {
        let (current, voltage) = self.read_raw_current_and_voltage()?;
        Ok((self.current_from_raw(current), self.voltage_from_raw(voltage)))
    }
}
