//! Two-level pulse timing primitives for the WS2812 serial protocol.

/// Default channel clock: 10 MHz, 1 tick = 0.1 us. The WS2812 timings are
/// tight enough to need sub-microsecond resolution.
pub const DEFAULT_RESOLUTION_HZ: u32 = 10_000_000;

/// High time of a 0 bit, nanoseconds.
pub const T0H_NS: u32 = 300;
/// Low time of a 0 bit, nanoseconds.
pub const T0L_NS: u32 = 900;
/// High time of a 1 bit, nanoseconds.
pub const T1H_NS: u32 = 900;
/// Low time of a 1 bit, nanoseconds.
pub const T1L_NS: u32 = 300;
/// Latch duration, microseconds. The strip displays the frame after the
/// line has been held low this long.
pub const RESET_US: u32 = 50;

#[allow(clippy::cast_possible_truncation)]
const fn ns_to_ticks(resolution_hz: u32, ns: u32) -> u16 {
    ((resolution_hz / 1_000_000) * ns / 1000) as u16
}

/// One two-level timing pulse pair emitted to the data line.
///
/// Durations are in ticks of the transmit channel's clock.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Symbol {
    pub level0: bool,
    pub duration0: u16,
    pub level1: bool,
    pub duration1: u16,
}

impl Symbol {
    /// Wire encoding of a 0 bit at `resolution_hz`: high 0.3 us, low 0.9 us.
    #[must_use]
    pub const fn bit0(resolution_hz: u32) -> Self {
        Self {
            level0: true,
            duration0: ns_to_ticks(resolution_hz, T0H_NS),
            level1: false,
            duration1: ns_to_ticks(resolution_hz, T0L_NS),
        }
    }

    /// Wire encoding of a 1 bit at `resolution_hz`: high 0.9 us, low 0.3 us.
    #[must_use]
    pub const fn bit1(resolution_hz: u32) -> Self {
        Self {
            level0: true,
            duration0: ns_to_ticks(resolution_hz, T1H_NS),
            level1: false,
            duration1: ns_to_ticks(resolution_hz, T1L_NS),
        }
    }

    /// Reset/latch pulse: both halves low, [`RESET_US`] in total.
    ///
    /// Split into two halves so each duration stays within the 15-bit range
    /// peripherals typically allow per half.
    #[must_use]
    pub const fn reset(resolution_hz: u32) -> Self {
        let half = ns_to_ticks(resolution_hz, RESET_US * 1000 / 2);
        Self {
            level0: false,
            duration0: half,
            level1: false,
            duration1: half,
        }
    }

    /// Total duration of both halves, in ticks.
    #[must_use]
    pub const fn ticks(&self) -> u32 {
        self.duration0 as u32 + self.duration1 as u32
    }
}
