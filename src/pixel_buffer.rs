//! Wire-order pixel storage.

use heapless::Vec;

use crate::Rgb;
use crate::error::{Error, Result};
use crate::scale::scale8_video;

/// Color components per LED on the wire.
pub const COMPONENTS_PER_LED: usize = 3;

/// Per-LED wire-order byte buffer: `g,r,b | g,r,b | ...`
///
/// The strip latches bytes in green-red-blue order, so the reordering from
/// the caller's logical `Rgb` happens here at write time, together with
/// video brightness scaling. `MAX_LEDS` bounds the backing storage; the live
/// length is fixed at construction and never changes.
#[derive(Debug)]
pub struct PixelBuffer<const MAX_LEDS: usize> {
    pixels: Vec<[u8; COMPONENTS_PER_LED], MAX_LEDS>,
}

impl<const MAX_LEDS: usize> PixelBuffer<MAX_LEDS> {
    /// Allocate a zeroed buffer for `len` LEDs.
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(Error::InvalidArgument);
        }
        let mut pixels = Vec::new();
        pixels
            .resize(len, [0; COMPONENTS_PER_LED])
            .map_err(|()| Error::OutOfMemory)?;
        Ok(Self { pixels })
    }

    /// Number of LEDs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Stage one LED color. Out-of-range indices silently address the last
    /// LED rather than failing.
    pub fn set(&mut self, index: usize, color: Rgb, brightness: u8) {
        let index = self.clamp_index(index);
        self.pixels[index] = wire_triple(color, brightness);
    }

    /// Stage `count` LED colors starting at `index`. The start index is
    /// clamped like [`set`](Self::set) and the end is clamped to the buffer
    /// length, so the write can never run past the last LED.
    pub fn fill(&mut self, index: usize, count: usize, color: Rgb, brightness: u8) {
        let index = self.clamp_index(index);
        let end = index.saturating_add(count).min(self.pixels.len());
        let triple = wire_triple(color, brightness);
        for pixel in &mut self.pixels[index..end] {
            *pixel = triple;
        }
    }

    /// Flat wire view, exactly `3 * len` bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_slice().as_flattened()
    }

    fn clamp_index(&self, index: usize) -> usize {
        index.min(self.pixels.len() - 1)
    }
}

fn wire_triple(color: Rgb, brightness: u8) -> [u8; COMPONENTS_PER_LED] {
    [
        scale8_video(color.g, brightness),
        scale8_video(color.r, brightness),
        scale8_video(color.b, brightness),
    ]
}
