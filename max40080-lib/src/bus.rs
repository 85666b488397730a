use crate::error::SensorError;
use embedded_hal::i2c::{Error as _, I2c};
use strum_macros::Display;
use tracing::{debug, trace};

/// I2C clock class requested by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Default)]
pub enum I2cSpeed {
    #[default]
    #[strum(to_string = "100 kHz")]
    Standard,
    #[strum(to_string = "400 kHz")]
    Fast,
    #[strum(to_string = "1 MHz")]
    FastPlus,
    #[strum(to_string = "3.4 MHz")]
    HighSpeed,
}

/// Register-level access to a single device on an SMBus-style bus.
///
/// `read` and `write` move raw bytes only; packet error checking is the
/// driver's business, so a PEC byte is simply part of `buf`/`data`.
pub trait Bus {
    /// 7-bit address of the device this bus talks to.
    fn address(&self) -> u8;

    fn read(&mut self, register: u8, buf: &mut [u8]) -> Result<(), SensorError>;

    fn write(&mut self, register: u8, data: &[u8]) -> Result<(), SensorError>;

    /// Address-only transfer (SMBus quick command).
    fn quick_command(&mut self) -> Result<(), SensorError>;

    fn set_speed(&mut self, speed: I2cSpeed) -> Result<(), SensorError>;
}

impl<B: Bus + ?Sized> Bus for &mut B {
    fn address(&self) -> u8 {
        (**self).address()
    }

    fn read(&mut self, register: u8, buf: &mut [u8]) -> Result<(), SensorError> {
        (**self).read(register, buf)
    }

    fn write(&mut self, register: u8, data: &[u8]) -> Result<(), SensorError> {
        (**self).write(register, data)
    }

    fn quick_command(&mut self) -> Result<(), SensorError> {
        (**self).quick_command()
    }

    fn set_speed(&mut self, speed: I2cSpeed) -> Result<(), SensorError> {
        (**self).set_speed(speed)
    }
}

/// [`Bus`] over any `embedded-hal` I2C controller.
pub struct I2cBus<I> {
    i2c: I,
    address: u8,
    speed: I2cSpeed,
}

impl<I: I2c> I2cBus<I> {
    pub fn new(i2c: I, address: u8) -> Self {
        Self {
            i2c,
            address,
            speed: I2cSpeed::default(),
        }
    }

    /// Clock class last requested through [`Bus::set_speed`].
    pub fn speed(&self) -> I2cSpeed {
        self.speed
    }

    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> Bus for I2cBus<I> {
    fn address(&self) -> u8 {
        self.address
    }

    fn read(&mut self, register: u8, buf: &mut [u8]) -> Result<(), SensorError> {
        self.i2c
            .write_read(self.address, &[register], buf)
            .map_err(|e| SensorError::from(e.kind()))?;
        trace!("read  reg 0x{:02x}: {:02x?}", register, buf);
        Ok(())
    }

    fn write(&mut self, register: u8, data: &[u8]) -> Result<(), SensorError> {
        let mut message = Vec::with_capacity(1 + data.len());
        message.push(register);
        message.extend_from_slice(data);

        trace!("write reg 0x{:02x}: {:02x?}", register, data);
        self.i2c
            .write(self.address, &message)
            .map_err(|e| SensorError::from(e.kind()))
    }

    fn quick_command(&mut self) -> Result<(), SensorError> {
        self.i2c
            .write(self.address, &[])
            .map_err(|e| SensorError::from(e.kind()))
    }

    /// The clock of an `embedded-hal` controller is fixed when it is created,
    /// so the request is only recorded. High speed mode needs a master code
    /// preamble that the trait cannot express.
    fn set_speed(&mut self, speed: I2cSpeed) -> Result<(), SensorError> {
        if speed == I2cSpeed::HighSpeed {
            return Err(SensorError::NotSupported);
        }

        debug!(%speed, "I2C speed requested");
        self.speed = speed;
        Ok(())
    }
}

#[cfg(target_os = "linux")]
impl I2cBus<linux_embedded_hal::I2cdev> {
    /// Opens `/dev/i2c-<controller>` for the device at `address`.
    pub fn open(controller: u32, address: u8) -> Result<Self, linux_embedded_hal::i2cdev::linux::LinuxI2CError> {
        let path = format!("/dev/i2c-{}", controller);
        debug!("Opening {} for device 0x{:02x}", path, address);
        let i2c = linux_embedded_hal::I2cdev::new(&path)?;
        Ok(Self::new(i2c, address))
    }
}
