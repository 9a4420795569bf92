//! The transmit-channel seam and a host-side virtual channel.
//!
//! The pulse peripheral itself lives outside this crate; [`TxChannel`] is
//! the capability the driver consumes. [`VirtualChannel`] is an in-memory
//! implementor that behaves like the hardware pipeline (bounded symbol
//! window, push-driven encoder resumption) and records the pulse train, for
//! host tests and simulation.

use heapless::Vec;

use crate::encoder::{Encoder, FrameEncoder, SymbolWindow};
use crate::error::{Error, Result};
use crate::symbol::{DEFAULT_RESOLUTION_HZ, Symbol};

/// Creation parameters for a transmit channel, mirroring the pulse
/// peripheral's knobs.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelConfig {
    /// Data-line identifier (a GPIO number on most targets).
    pub pin: u8,
    /// Channel clock in hertz; symbol durations are in its ticks.
    pub resolution_hz: u32,
    /// Depth of the peripheral's transmit queue.
    pub queue_depth: usize,
}

impl ChannelConfig {
    /// Protocol defaults: 10 MHz clock, queue depth 4.
    #[must_use]
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            resolution_hz: DEFAULT_RESOLUTION_HZ,
            queue_depth: 4,
        }
    }
}

/// One hardware pulse-train channel.
///
/// The strip driver owns exactly one implementor for its lifetime: opened at
/// init, disabled at shutdown, released on drop. Implementations do not need
/// to defend against concurrent callers; the driver serializes access.
pub trait TxChannel: Sized {
    /// Channel creation parameters.
    type Config;

    /// Acquire the channel.
    fn open(config: Self::Config) -> Result<Self>;

    /// Clock the channel runs at; the frame encoder derives its tick
    /// durations from this.
    fn resolution_hz(&self) -> u32;

    /// Power the channel up for transmission.
    fn enable(&mut self) -> Result<()>;

    /// Stop the channel. It may be enabled again later.
    fn disable(&mut self) -> Result<()>;

    /// Queue one frame: drive `encoder` over `data` until it reports
    /// completion, shipping each filled symbol window to the line. The
    /// encoder may be re-invoked from the pipeline's own context, never
    /// from two invocations concurrently.
    fn submit(&mut self, encoder: &mut FrameEncoder, data: &[u8]) -> Result<()>;

    /// Block until everything submitted so far has left the line.
    /// Unbounded wait.
    fn wait_done(&mut self) -> Result<()>;
}

/// Raw status a [`VirtualChannel`] reports when a fault switch trips.
pub const VIRTUAL_FAULT: i32 = -1;
/// Raw status when the recorded pulse train overflows its capacity.
pub const VIRTUAL_OVERFLOW: i32 = -2;
/// Raw status for submitting on a disabled channel.
pub const VIRTUAL_DISABLED: i32 = -3;

/// Fault-injection switches for [`VirtualChannel`]. Each trips the matching
/// operation with [`VIRTUAL_FAULT`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Faults {
    pub open: bool,
    pub enable: bool,
    pub disable: bool,
    pub submit: bool,
    pub wait: bool,
}

/// Creation parameters for [`VirtualChannel`].
#[derive(Clone, Copy, Debug)]
pub struct VirtualConfig {
    pub channel: ChannelConfig,
    pub faults: Faults,
}

impl From<ChannelConfig> for VirtualConfig {
    fn from(channel: ChannelConfig) -> Self {
        Self {
            channel,
            faults: Faults::default(),
        }
    }
}

/// In-memory transmit channel with a bounded work window.
///
/// `submit` drives the encoder the way the hardware pipeline does: lend a
/// window of `WINDOW` symbol slots (the peripheral's memory block, 64
/// symbols by default), ship whatever was encoded, and re-invoke until the
/// frame completes. Shipped symbols accumulate in a recorded pulse train of
/// up to `TRAIN` symbols for later inspection.
#[derive(Debug)]
pub struct VirtualChannel<const WINDOW: usize = 64, const TRAIN: usize = 2048> {
    config: ChannelConfig,
    faults: Faults,
    enabled: bool,
    train: Vec<Symbol, TRAIN>,
    encode_calls: usize,
    frames: usize,
}

impl<const WINDOW: usize, const TRAIN: usize> VirtualChannel<WINDOW, TRAIN> {
    /// Every symbol shipped to the line so far, in order.
    #[must_use]
    pub fn train(&self) -> &[Symbol] {
        &self.train
    }

    /// Encoder invocations across all submits.
    #[must_use]
    pub fn encode_calls(&self) -> usize {
        self.encode_calls
    }

    /// Frames fully shipped.
    #[must_use]
    pub fn frames(&self) -> usize {
        self.frames
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn config(&self) -> ChannelConfig {
        self.config
    }

    /// Forget the recorded train and counters; the channel stays usable.
    pub fn clear(&mut self) {
        self.train.clear();
        self.encode_calls = 0;
        self.frames = 0;
    }
}

impl<const WINDOW: usize, const TRAIN: usize> TxChannel for VirtualChannel<WINDOW, TRAIN> {
    type Config = VirtualConfig;

    fn open(config: Self::Config) -> Result<Self> {
        if config.faults.open {
            return Err(Error::Hardware(VIRTUAL_FAULT));
        }
        Ok(Self {
            config: config.channel,
            faults: config.faults,
            enabled: false,
            train: Vec::new(),
            encode_calls: 0,
            frames: 0,
        })
    }

    fn resolution_hz(&self) -> u32 {
        self.config.resolution_hz
    }

    fn enable(&mut self) -> Result<()> {
        if self.faults.enable {
            return Err(Error::Hardware(VIRTUAL_FAULT));
        }
        self.enabled = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<()> {
        if self.faults.disable {
            return Err(Error::Hardware(VIRTUAL_FAULT));
        }
        self.enabled = false;
        Ok(())
    }

    fn submit(&mut self, encoder: &mut FrameEncoder, data: &[u8]) -> Result<()> {
        if self.faults.submit {
            return Err(Error::Hardware(VIRTUAL_FAULT));
        }
        if !self.enabled {
            return Err(Error::Hardware(VIRTUAL_DISABLED));
        }

        let mut slots = [Symbol::default(); WINDOW];
        loop {
            let mut window = SymbolWindow::new(&mut slots);
            self.encode_calls += 1;
            let outcome = encoder.encode(data, &mut window);
            self.train
                .extend_from_slice(window.as_slice())
                .map_err(|()| Error::Hardware(VIRTUAL_OVERFLOW))?;
            if outcome.complete {
                break;
            }
            // A yield without progress means the window cannot carry the
            // protocol at all.
            if outcome.symbols == 0 {
                return Err(Error::Hardware(VIRTUAL_OVERFLOW));
            }
        }

        self.frames += 1;
        Ok(())
    }

    fn wait_done(&mut self) -> Result<()> {
        // Shipping is synchronous here, so waiting only reports the
        // injected outcome.
        if self.faults.wait {
            return Err(Error::Hardware(VIRTUAL_FAULT));
        }
        Ok(())
    }
}
