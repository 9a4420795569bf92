//! Host-level tests for the resumable frame encoder.

use led_strip::{
    BitOrder, BitPatternEncoder, DEFAULT_RESOLUTION_HZ, EncodeOutcome, EncodePhase, Encoder,
    FixedPatternEncoder, FrameEncoder, Symbol, SymbolWindow,
};

/// Re-invoke the encoder with fresh windows of `window` slots until it
/// reports completion, the way a transmit pipeline does.
fn drive(
    encoder: &mut FrameEncoder,
    data: &[u8],
    window: usize,
) -> (Vec<Symbol>, Vec<EncodeOutcome>) {
    let mut slots = vec![Symbol::default(); window];
    let mut train = Vec::new();
    let mut outcomes = Vec::new();
    loop {
        let mut lent = SymbolWindow::new(&mut slots);
        let outcome = encoder.encode(data, &mut lent);
        train.extend_from_slice(lent.as_slice());
        outcomes.push(outcome);
        if outcome.complete {
            break;
        }
        assert!(
            outcome.full,
            "encoder yielded without completing or filling the window"
        );
    }
    (train, outcomes)
}

/// Recover a bit from its pulse widths: a 1 bit is high longer than low.
fn decode_bit(symbol: Symbol) -> u8 {
    assert!(symbol.level0, "data symbols start high");
    assert!(!symbol.level1, "data symbols end low");
    u8::from(symbol.duration0 > symbol.duration1)
}

fn decode_bytes(symbols: &[Symbol]) -> Vec<u8> {
    assert_eq!(symbols.len() % 8, 0);
    symbols
        .chunks(8)
        .map(|bits| bits.iter().fold(0u8, |acc, &s| (acc << 1) | decode_bit(s)))
        .collect()
}

fn micros(ticks: u32, resolution_hz: u32) -> u32 {
    ticks / (resolution_hz / 1_000_000)
}

#[test]
fn round_trip_recovers_bytes_msb_first() {
    let data = [0b1010_0011, 0xFF, 0x00, 0x5A];
    let mut encoder = FrameEncoder::new(DEFAULT_RESOLUTION_HZ);

    let (train, outcomes) = drive(&mut encoder, &data, 256);
    assert_eq!(outcomes.len(), 1, "a roomy window finishes in one call");
    assert_eq!(train.len(), data.len() * 8 + 1);

    let (reset, bits) = train.split_last().expect("train is not empty");
    assert_eq!(decode_bytes(bits), data);

    assert!(!reset.level0 && !reset.level1, "latch is all low");
    assert!(micros(reset.ticks(), DEFAULT_RESOLUTION_HZ) >= 50);
}

#[test]
fn pulse_widths_match_the_protocol() {
    // 10 MHz: 1 tick = 0.1 us.
    let bit0 = Symbol::bit0(DEFAULT_RESOLUTION_HZ);
    assert_eq!((bit0.duration0, bit0.duration1), (3, 9));
    let bit1 = Symbol::bit1(DEFAULT_RESOLUTION_HZ);
    assert_eq!((bit1.duration0, bit1.duration1), (9, 3));

    // Absolute widths hold at other resolutions too.
    let bit0 = Symbol::bit0(20_000_000);
    assert_eq!((bit0.duration0, bit0.duration1), (6, 18));
    let reset = Symbol::reset(20_000_000);
    assert_eq!(micros(reset.ticks(), 20_000_000), 50);
}

#[test]
fn small_window_forces_multiple_calls_with_exact_symbol_total() {
    let data = [0xC3, 0x18];
    let mut encoder = FrameEncoder::new(DEFAULT_RESOLUTION_HZ);

    let (train, outcomes) = drive(&mut encoder, &data, 10);
    assert!(outcomes.len() >= 2);
    let total: usize = outcomes.iter().map(|o| o.symbols).sum();
    assert_eq!(total, data.len() * 8 + 1);
    assert_eq!(train.len(), total);

    let (reset, bits) = train.split_last().expect("train is not empty");
    assert_eq!(decode_bytes(bits), data);
    assert!(micros(reset.ticks(), DEFAULT_RESOLUTION_HZ) >= 50);
}

#[test]
fn window_exactly_fitting_the_data_yields_in_reset_phase() {
    let data = [0xAB, 0xCD];
    let mut encoder = FrameEncoder::new(DEFAULT_RESOLUTION_HZ);
    let mut slots = [Symbol::default(); 16];

    let mut window = SymbolWindow::new(&mut slots);
    let first = encoder.encode(&data, &mut window);
    assert_eq!(first.symbols, 16);
    assert!(first.full && !first.complete);
    // The data phase finished inside this invocation; only the latch is
    // left over.
    assert_eq!(encoder.phase(), EncodePhase::Reset);

    let mut window = SymbolWindow::new(&mut slots);
    let second = encoder.encode(&data, &mut window);
    assert_eq!(second.symbols, 1);
    assert!(second.complete && !second.full);
    assert_eq!(encoder.phase(), EncodePhase::Data);
}

#[test]
fn data_and_latch_fit_one_invocation_when_the_window_allows() {
    let data = [0xAB, 0xCD];
    let mut encoder = FrameEncoder::new(DEFAULT_RESOLUTION_HZ);
    let mut slots = [Symbol::default(); 17];

    let mut window = SymbolWindow::new(&mut slots);
    let outcome = encoder.encode(&data, &mut window);
    assert_eq!(outcome.symbols, 17);
    assert!(outcome.complete && !outcome.full);
    assert_eq!(encoder.phase(), EncodePhase::Data);
}

#[test]
fn manual_reset_abandons_a_partial_session() {
    let data = [0xFF, 0xFF];
    let mut encoder = FrameEncoder::new(DEFAULT_RESOLUTION_HZ);
    let mut slots = [Symbol::default(); 16];

    let mut window = SymbolWindow::new(&mut slots);
    let _ = encoder.encode(&data, &mut window);
    assert_eq!(encoder.phase(), EncodePhase::Reset);

    encoder.reset();
    assert_eq!(encoder.phase(), EncodePhase::Data);

    // A fresh session emits the whole frame from the top.
    let (train, _) = drive(&mut encoder, &data, 64);
    assert_eq!(train.len(), data.len() * 8 + 1);
}

#[test]
fn bit_pattern_encoder_honors_lsb_first_order() {
    let bit0 = Symbol::bit0(DEFAULT_RESOLUTION_HZ);
    let bit1 = Symbol::bit1(DEFAULT_RESOLUTION_HZ);
    let mut encoder = BitPatternEncoder::new(bit0, bit1, BitOrder::LsbFirst);
    let mut slots = [Symbol::default(); 8];

    let mut window = SymbolWindow::new(&mut slots);
    let outcome = encoder.encode(&[0b0000_0001], &mut window);
    assert!(outcome.complete);
    assert_eq!(window.as_slice()[0], bit1);
    assert_eq!(window.as_slice()[7], bit0);
}

#[test]
fn fixed_pattern_encoder_resumes_mid_pattern() {
    let reset = Symbol::reset(DEFAULT_RESOLUTION_HZ);
    let mut encoder = FixedPatternEncoder::new([reset; 3]);
    let mut slots = [Symbol::default(); 2];

    let mut window = SymbolWindow::new(&mut slots);
    let first = encoder.encode(&[], &mut window);
    assert_eq!(first.symbols, 2);
    assert!(first.full && !first.complete);

    let mut window = SymbolWindow::new(&mut slots);
    let second = encoder.encode(&[], &mut window);
    assert_eq!(second.symbols, 1);
    assert!(second.complete);
}
