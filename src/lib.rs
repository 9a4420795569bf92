//! Driver for WS2812-family addressable RGB LED strips.
//!
//! Callers work with logical colors through a small set/fill/flush surface;
//! the crate handles wire reordering, video brightness scaling, and the
//! bit-exact pulse timing of the strip's serial protocol. The pulse
//! peripheral itself stays outside the crate behind the [`TxChannel`] seam,
//! so the core - including the resumable [`FrameEncoder`] session that
//! feeds the peripheral's bounded symbol memory - runs anywhere, host tests
//! included.
//!
//! See [`LedStrip`] for the main usage example; [`VirtualChannel`] stands in
//! for the peripheral when there is no hardware.
#![no_std]

mod channel;
mod encoder;
mod error;
mod pixel_buffer;
mod scale;
mod strip;
mod symbol;

// Re-export commonly used items
pub use channel::{
    ChannelConfig, Faults, TxChannel, VIRTUAL_DISABLED, VIRTUAL_FAULT, VIRTUAL_OVERFLOW,
    VirtualChannel, VirtualConfig,
};
pub use encoder::{
    BitOrder, BitPatternEncoder, EncodeOutcome, EncodePhase, Encoder, FixedPatternEncoder,
    FrameEncoder, SymbolWindow,
};
pub use error::{Error, Result};
pub use pixel_buffer::{COMPONENTS_PER_LED, PixelBuffer};
pub use scale::{scale8, scale8_video};
pub use strip::{LedStrip, StripConfig};
pub use symbol::{
    DEFAULT_RESOLUTION_HZ, RESET_US, Symbol, T0H_NS, T0L_NS, T1H_NS, T1L_NS,
};

/// RGB color representation re-exported from `smart_leds`.
pub type Rgb = smart_leds::RGB8;
/// RGB color constants.
pub use smart_leds::colors;
