//! Common test utilities and shared imports

// Not every test file uses every helper
#[allow(unused_imports)]
pub use max40080_lib::constants::*;
#[allow(unused_imports)]
pub use max40080_lib::pec;
#[allow(unused_imports)]
pub use max40080_lib::{
    AdcSampleRate, Bus, Configuration, DigitalFilter, FifoConfiguration, FifoStoringMode, I2cSpeed, InputRange,
    Interrupts, Max40080, OperatingMode, Sensor, SensorError,
};

use std::collections::{HashMap, VecDeque};
use tracing_subscriber::EnvFilter;

/// Routes driver logs into the test harness output. Level comes from `RUST_LOG`.
#[allow(dead_code)]
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Address of the MAX40080 on both supported boards
#[allow(dead_code)]
pub const ADDRESS: u8 = 0x21;

/// In-memory MAX40080 register file.
///
/// Reads answer from `queued` first (one entry per read, like the FIFO),
/// then from `registers`, then with zeros. A PEC byte is appended while PEC
/// is enabled, and written PEC bytes are checked. Writes to CFG toggle PEC
/// the way the real device does.
#[allow(dead_code)]
pub struct FakeBus {
    pub address: u8,
    pub pec: bool,
    pub corrupt_pec: bool,
    pub registers: HashMap<u8, Vec<u8>>,
    pub queued: HashMap<u8, VecDeque<Vec<u8>>>,
    pub writes: Vec<(u8, Vec<u8>)>,
    pub quick_commands: usize,
    pub speed: Option<I2cSpeed>,
}

#[allow(dead_code)]
impl FakeBus {
    /// Sensor in its power-on state.
    pub fn new() -> Self {
        let mut registers = HashMap::new();
        registers.insert(REG_CONFIGURATION, vec![0x20, 0x00]);
        registers.insert(REG_FIFO_CONFIGURATION, vec![0x00, 0x34]);
        registers.insert(REG_STATUS, vec![0x00, 0x00]);

        Self {
            address: ADDRESS,
            pec: true,
            corrupt_pec: false,
            registers,
            queued: HashMap::new(),
            writes: Vec::new(),
            quick_commands: 0,
            speed: None,
        }
    }

    pub fn queue(&mut self, register: u8, data: &[u8]) {
        self.queued.entry(register).or_default().push_back(data.to_vec());
    }

    /// Data bytes of every write to `register`, PEC stripped.
    pub fn writes_to(&self, register: u8) -> Vec<Vec<u8>> {
        self.writes
            .iter()
            .filter(|(reg, _)| *reg == register)
            .map(|(_, data)| data.clone())
            .collect()
    }
}

impl Bus for FakeBus {
    fn address(&self) -> u8 {
        self.address
    }

    fn read(&mut self, register: u8, buf: &mut [u8]) -> Result<(), SensorError> {
        let data_len = if self.pec { buf.len() - 1 } else { buf.len() };
        let data = self
            .queued
            .get_mut(&register)
            .and_then(VecDeque::pop_front)
            .or_else(|| self.registers.get(&register).cloned())
            .unwrap_or_else(|| vec![0; data_len]);

        buf[..data_len].copy_from_slice(&data[..data_len]);
        if self.pec {
            let mut crc = pec::for_read(self.address, register, &data[..data_len]);
            if self.corrupt_pec {
                crc ^= 0xFF;
            }
            buf[data_len] = crc;
        }
        Ok(())
    }

    fn write(&mut self, register: u8, data: &[u8]) -> Result<(), SensorError> {
        let payload = if self.pec {
            let (payload, crc) = data.split_at(data.len() - 1);
            if crc[0] != pec::for_write(self.address, register, payload) {
                return Err(SensorError::BusNack);
            }
            payload
        } else {
            data
        };

        if register == REG_CONFIGURATION {
            self.pec = payload[0] & 0x20 != 0;
        }
        if register != REG_STATUS {
            self.registers.insert(register, payload.to_vec());
        }
        self.writes.push((register, payload.to_vec()));
        Ok(())
    }

    fn quick_command(&mut self) -> Result<(), SensorError> {
        self.quick_commands += 1;
        Ok(())
    }

    fn set_speed(&mut self, speed: I2cSpeed) -> Result<(), SensorError> {
        self.speed = Some(speed);
        Ok(())
    }
}

/// Driver that already went through `init` on a power-on fake.
#[allow(dead_code)]
pub fn initialized_sensor(bus: &mut FakeBus) -> Max40080<&mut FakeBus> {
    init_logging();
    let mut sensor = Max40080::new(bus);
    sensor.init().expect("init on a power-on sensor");
    sensor
}
