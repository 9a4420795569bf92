//! The strip driver facade.

use crate::Rgb;
use crate::channel::{ChannelConfig, TxChannel};
use crate::encoder::{Encoder as _, FrameEncoder};
use crate::error::Result;
use crate::pixel_buffer::PixelBuffer;

/// Per-strip construction parameters.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StripConfig {
    /// Data-line identifier, handed to the transmit channel.
    pub pin: u8,
    /// Number of LEDs on the data line.
    pub len: usize,
    /// Initial brightness, 0-255. Zero *here* means full brightness; call
    /// [`LedStrip::set_brightness`] with zero after construction to
    /// actually blank the strip.
    pub brightness: u8,
}

/// Driver for one WS2812-family LED strip.
///
/// Owns the pixel buffer, the frame encoder session, and the transmit
/// channel. `set`/`fill` stage colors in the buffer; nothing reaches the
/// LEDs until [`flush`](Self::flush). Callers issue operations from one
/// logical task; the driver takes no locks of its own.
///
/// # Example
/// ```
/// use led_strip::{LedStrip, StripConfig, VirtualChannel, colors};
///
/// fn example() -> led_strip::Result<()> {
///     let mut strip: LedStrip<VirtualChannel, 8> = LedStrip::new(StripConfig {
///         pin: 2,
///         len: 5,
///         brightness: 0, // zero at init means full brightness
///     })?;
///
///     strip.fill(0, 5, colors::RED);
///     strip.set(0, colors::GREEN);
///     strip.flush()?;
///     strip.shutdown()?;
///     Ok(())
/// }
/// # example().expect("virtual strip");
/// ```
pub struct LedStrip<C: TxChannel, const MAX_LEDS: usize> {
    buffer: PixelBuffer<MAX_LEDS>,
    encoder: FrameEncoder,
    channel: C,
    brightness: u8,
}

impl<C: TxChannel, const MAX_LEDS: usize> LedStrip<C, MAX_LEDS> {
    /// Build a strip with protocol-default channel parameters on
    /// `config.pin`.
    pub fn new(config: StripConfig) -> Result<Self>
    where
        C::Config: From<ChannelConfig>,
    {
        Self::with_channel(config, ChannelConfig::new(config.pin).into())
    }

    /// Build a strip with explicit channel creation parameters.
    ///
    /// Acquisition order is buffer, channel, encoder, enable. A failure at
    /// any step releases everything acquired so far (ownership unwinds in
    /// reverse order) and returns that first failure.
    pub fn with_channel(config: StripConfig, channel_config: C::Config) -> Result<Self> {
        let brightness = if config.brightness == 0 {
            255
        } else {
            config.brightness
        };
        let buffer = PixelBuffer::new(config.len)?;
        let mut channel = C::open(channel_config)?;
        let encoder = FrameEncoder::new(channel.resolution_hz());
        channel.enable()?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "led strip: {} LEDs on pin {}, brightness {}",
            config.len,
            config.pin,
            brightness
        );

        Ok(Self {
            buffer,
            encoder,
            channel,
            brightness,
        })
    }

    /// Number of LEDs on the strip.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Brightness applied by `set`/`fill`.
    #[must_use]
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Change the brightness for subsequent `set`/`fill` calls. Colors
    /// already staged keep the scaling they were written with.
    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    /// Stage one LED color. Out-of-range indices silently address the last
    /// LED. No transmission happens until [`flush`](Self::flush).
    pub fn set(&mut self, index: usize, color: Rgb) {
        self.buffer.set(index, color, self.brightness);
    }

    /// Stage `count` LED colors starting at `index`, clamped to the strip
    /// length. No transmission happens until [`flush`](Self::flush).
    pub fn fill(&mut self, index: usize, count: usize, color: Rgb) {
        self.buffer.fill(index, count, color, self.brightness);
    }

    /// Transmit the staged pixel buffer and block until the strip has
    /// latched it. Not retried on failure; the caller decides.
    pub fn flush(&mut self) -> Result<()> {
        // A previously aborted transmission must not leak phase state into
        // this frame.
        self.encoder.reset();
        self.channel
            .submit(&mut self.encoder, self.buffer.as_bytes())?;
        self.channel.wait_done()
    }

    /// Raw wire-order bytes (`g,r,b` per LED) as the encoder will see them.
    #[must_use]
    pub fn wire_bytes(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    /// The owned transmit channel.
    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Tear the strip down. Best-effort: the channel is disabled and every
    /// resource is released even when a step fails; the first failure is
    /// reported. Dropping the strip without calling this is also safe, it
    /// just skips the explicit disable.
    pub fn shutdown(mut self) -> Result<()> {
        #[cfg(feature = "defmt")]
        defmt::debug!("led strip: shutdown");
        let result = self.channel.disable();
        // Buffer, encoder, and channel handle are all released by drop,
        // regardless of the disable outcome.
        drop(self);
        result
    }
}
