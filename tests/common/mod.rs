//! Common test utilities and shared imports

// Not every test file uses every helper
#[allow(unused_imports)]
pub use max40080_lib::{Configuration, FifoConfiguration, Interrupts, OperatingMode, Sensor, SensorError};
#[allow(unused_imports)]
pub use max40080_util::{AcquisitionError, Options, RunSummary, ValidationError};

use std::collections::VecDeque;

/// Builds `Options` from flags, program name prepended.
#[allow(dead_code)]
pub fn options(args: &[&str]) -> Result<Options, ValidationError> {
    Options::from_args(std::iter::once("max40080-util").chain(args.iter().copied()))
}

/// Phase of the setup sequence a [`StubSensor`] can be told to fail.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Configuration,
    FifoConfiguration,
    FlushFifo,
    ClearInterrupts,
    Standby,
    PendingInterrupts,
}

/// Scripted sensor.
///
/// Each read pops the next scripted result; an exhausted script answers with
/// [`SensorError::FifoIsEmpty`] forever. Every call is recorded in `calls`.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct StubSensor {
    pub raw_currents: VecDeque<Result<i16, SensorError>>,
    pub raw_voltages: VecDeque<Result<i16, SensorError>>,
    pub currents: VecDeque<Result<f32, SensorError>>,
    pub voltages: VecDeque<Result<f32, SensorError>>,
    pub raw_pairs: VecDeque<Result<(i16, i16), SensorError>>,
    pub pairs: VecDeque<Result<(f32, f32), SensorError>>,
    pub pending: Interrupts,
    pub fail: Option<(Phase, SensorError)>,
    pub calls: Vec<&'static str>,
    pub reads: usize,
    pub configurations: Vec<Configuration>,
    pub fifo_configurations: Vec<FifoConfiguration>,
    pub cleared: Vec<Interrupts>,
}

#[allow(dead_code)]
impl StubSensor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(phase: Phase, error: SensorError) -> Self {
        Self {
            fail: Some((phase, error)),
            ..Self::default()
        }
    }

    fn check(&mut self, phase: Phase, call: &'static str) -> Result<(), SensorError> {
        self.calls.push(call);
        match self.fail {
            Some((failing, error)) if failing == phase => Err(error),
            _ => Ok(()),
        }
    }

    fn next<T>(reads: &mut usize, queue: &mut VecDeque<Result<T, SensorError>>) -> Result<T, SensorError> {
        *reads += 1;
        queue.pop_front().unwrap_or(Err(SensorError::FifoIsEmpty))
    }
}

impl Sensor for StubSensor {
    fn init(&mut self) -> Result<(), SensorError> {
        self.check(Phase::Init, "init")
    }

    fn deinit(&mut self) -> Result<(), SensorError> {
        self.calls.push("deinit");
        Ok(())
    }

    fn set_configuration(&mut self, config: &Configuration) -> Result<(), SensorError> {
        self.configurations.push(*config);
        if config.operating_mode == OperatingMode::Standby {
            self.check(Phase::Standby, "standby")
        } else {
            self.check(Phase::Configuration, "set_configuration")
        }
    }

    fn set_fifo_configuration(&mut self, config: &FifoConfiguration) -> Result<(), SensorError> {
        self.fifo_configurations.push(*config);
        self.check(Phase::FifoConfiguration, "set_fifo_configuration")
    }

    fn flush_fifo(&mut self) -> Result<(), SensorError> {
        self.check(Phase::FlushFifo, "flush_fifo")
    }

    fn clear_pending_interrupts(&mut self, mask: Interrupts) -> Result<(), SensorError> {
        self.cleared.push(mask);
        self.check(Phase::ClearInterrupts, "clear_pending_interrupts")
    }

    fn pending_interrupts(&mut self) -> Result<Interrupts, SensorError> {
        self.check(Phase::PendingInterrupts, "pending_interrupts")?;
        Ok(self.pending)
    }

    fn read_raw_current(&mut self) -> Result<i16, SensorError> {
        Self::next(&mut self.reads, &mut self.raw_currents)
    }

    fn read_current(&mut self) -> Result<f32, SensorError> {
        Self::next(&mut self.reads, &mut self.currents)
    }

    fn read_raw_voltage(&mut self) -> Result<i16, SensorError> {
        Self::next(&mut self.reads, &mut self.raw_voltages)
    }

    fn read_voltage(&mut self) -> Result<f32, SensorError> {
        Self::next(&mut self.reads, &mut self.voltages)
    }

    fn read_raw_current_and_voltage(&mut self) -> Result<(i16, i16), SensorError> {
        Self::next(&mut self.reads, &mut self.raw_pairs)
    }

    fn read_current_and_voltage(&mut self) -> Result<(f32, f32), SensorError> {
        Self::next(&mut self.reads, &mut self.pairs)
    }
}

/// Writer that refuses everything with a broken pipe.
#[allow(dead_code)]
pub struct ClosedPipe;

impl std::io::Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
