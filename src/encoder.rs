//! Resumable protocol encoding: bytes in, two-level timing symbols out.
//!
//! The transmit channel owns a bounded block of symbol memory, so one frame
//! usually cannot be encoded in a single call. Each [`Encoder`] keeps its
//! position between invocations: when the lent [`SymbolWindow`] fills, the
//! encoder yields with [`EncodeOutcome::full`] set and picks up where it
//! left off on the next call.

use crate::symbol::Symbol;

/// Bounded symbol memory lent by the transmit channel for one encode call.
pub struct SymbolWindow<'a> {
    slots: &'a mut [Symbol],
    len: usize,
}

impl<'a> SymbolWindow<'a> {
    /// Wrap a block of symbol slots as an empty window.
    pub fn new(slots: &'a mut [Symbol]) -> Self {
        Self { slots, len: 0 }
    }

    /// Append a symbol; returns `false` when the window is full.
    pub fn push(&mut self, symbol: Symbol) -> bool {
        let Some(slot) = self.slots.get_mut(self.len) else {
            return false;
        };
        *slot = symbol;
        self.len += 1;
        true
    }

    /// Symbols appended so far.
    #[must_use]
    pub fn as_slice(&self) -> &[Symbol] {
        &self.slots[..self.len]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }
}

/// What one encoder invocation accomplished.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncodeOutcome {
    /// Symbols appended to the window during this call.
    pub symbols: usize,
    /// The whole input has been emitted; the session is back at its initial
    /// state, ready for the next frame.
    pub complete: bool,
    /// The window filled before the input was exhausted; call again with
    /// fresh window space to resume.
    pub full: bool,
}

/// A resumable symbol encoder fed through a bounded window.
pub trait Encoder {
    /// Encode as much of `data` as the window allows, starting from the
    /// position the previous invocation reached.
    fn encode(&mut self, data: &[u8], window: &mut SymbolWindow<'_>) -> EncodeOutcome;

    /// Abandon any in-progress session and return to the initial state.
    /// Used when a transmission is aborted.
    fn reset(&mut self);
}

/// Order in which the bits of each byte go onto the wire.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    /// WS2812 order: G7..G0 R7..R0 B7..B0.
    #[default]
    MsbFirst,
    LsbFirst,
}

/// Emits one timing symbol per source bit, resumable at bit granularity.
#[derive(Debug)]
pub struct BitPatternEncoder {
    bit0: Symbol,
    bit1: Symbol,
    order: BitOrder,
    /// Bits of the current buffer already emitted.
    pos: usize,
}

impl BitPatternEncoder {
    #[must_use]
    pub const fn new(bit0: Symbol, bit1: Symbol, order: BitOrder) -> Self {
        Self {
            bit0,
            bit1,
            order,
            pos: 0,
        }
    }
}

impl Encoder for BitPatternEncoder {
    fn encode(&mut self, data: &[u8], window: &mut SymbolWindow<'_>) -> EncodeOutcome {
        let total_bits = data.len() * 8;
        let mut outcome = EncodeOutcome::default();

        while self.pos < total_bits {
            let byte = data[self.pos / 8];
            let shift = match self.order {
                BitOrder::MsbFirst => 7 - (self.pos % 8),
                BitOrder::LsbFirst => self.pos % 8,
            };
            let symbol = if (byte >> shift) & 1 == 1 {
                self.bit1
            } else {
                self.bit0
            };
            if !window.push(symbol) {
                outcome.full = true;
                return outcome;
            }
            self.pos += 1;
            outcome.symbols += 1;
        }

        self.pos = 0;
        outcome.complete = true;
        outcome
    }

    fn reset(&mut self) {
        self.pos = 0;
    }
}

/// Copies a symbol pattern fixed at construction, resumable at symbol
/// granularity. The `data` argument of [`Encoder::encode`] is ignored.
#[derive(Debug)]
pub struct FixedPatternEncoder<const N: usize> {
    pattern: [Symbol; N],
    /// Pattern symbols already emitted.
    pos: usize,
}

impl<const N: usize> FixedPatternEncoder<N> {
    #[must_use]
    pub const fn new(pattern: [Symbol; N]) -> Self {
        Self { pattern, pos: 0 }
    }
}

impl<const N: usize> Encoder for FixedPatternEncoder<N> {
    fn encode(&mut self, _data: &[u8], window: &mut SymbolWindow<'_>) -> EncodeOutcome {
        let mut outcome = EncodeOutcome::default();

        while self.pos < N {
            if !window.push(self.pattern[self.pos]) {
                outcome.full = true;
                return outcome;
            }
            self.pos += 1;
            outcome.symbols += 1;
        }

        self.pos = 0;
        outcome.complete = true;
        outcome
    }

    fn reset(&mut self) {
        self.pos = 0;
    }
}

/// Session phase of the frame encoder.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodePhase {
    /// Emitting pixel data bits.
    #[default]
    Data,
    /// Emitting the reset/latch pulse.
    Reset,
}

/// Two-phase session encoder for one WS2812 frame: the pixel bytes, then
/// the latch pulse.
///
/// Invariant: the phase returns to [`EncodePhase::Data`] exactly when a full
/// frame's worth of symbols has been emitted, so no partial state can leak
/// into the next flush. A frame over `data` is `8 * data.len() + 1` symbols.
#[derive(Debug)]
pub struct FrameEncoder {
    bytes: BitPatternEncoder,
    latch: FixedPatternEncoder<1>,
    phase: EncodePhase,
}

impl FrameEncoder {
    /// Build the encoder for a channel clocked at `resolution_hz`.
    #[must_use]
    pub const fn new(resolution_hz: u32) -> Self {
        Self {
            bytes: BitPatternEncoder::new(
                Symbol::bit0(resolution_hz),
                Symbol::bit1(resolution_hz),
                BitOrder::MsbFirst,
            ),
            latch: FixedPatternEncoder::new([Symbol::reset(resolution_hz)]),
            phase: EncodePhase::Data,
        }
    }

    /// Current session phase.
    #[must_use]
    pub const fn phase(&self) -> EncodePhase {
        self.phase
    }
}

impl Encoder for FrameEncoder {
    fn encode(&mut self, data: &[u8], window: &mut SymbolWindow<'_>) -> EncodeOutcome {
        let mut outcome = EncodeOutcome::default();

        if matches!(self.phase, EncodePhase::Data) {
            let step = self.bytes.encode(data, window);
            outcome.symbols += step.symbols;
            if step.full {
                outcome.full = true;
                return outcome;
            }
            // The data finished with window space possibly left; the latch
            // starts within this same invocation.
            self.phase = EncodePhase::Reset;
        }

        let step = self.latch.encode(&[], window);
        outcome.symbols += step.symbols;
        if step.full {
            outcome.full = true;
            return outcome;
        }

        self.phase = EncodePhase::Data;
        outcome.complete = true;
        outcome
    }

    fn reset(&mut self) {
        self.bytes.reset();
        self.latch.reset();
        self.phase = EncodePhase::Data;
    }
}
