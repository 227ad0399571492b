//! Determinism and end-to-end synthesis tests.

use rand::Rng;
use snipweave_audio::rng::create_rng;
use snipweave_audio::{synthesize, AudioBuffer, NoProgress};
use snipweave_spec::{SynthesisParams, WindowChoice};

fn noise(frames: usize, channels: usize, amplitude: f32, seed: u64) -> AudioBuffer {
    let mut rng = create_rng(seed);
    let samples = (0..frames * channels)
        .map(|_| rng.gen_range(-amplitude..=amplitude))
        .collect();
    AudioBuffer::new(samples, channels).unwrap()
}

fn params(clip_ms: f64, overlap_ms: f64, output_seconds: f64) -> SynthesisParams {
    SynthesisParams {
        clip_ms,
        overlap_ms,
        output_seconds,
        ..SynthesisParams::default()
    }
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_same_seed_is_bit_identical() {
    let source = noise(48_000, 1, 0.5, 1);
    let p = params(250.0, 100.0, 2.0).with_seed(42u64);

    let a = synthesize(&source, 48_000, &p, &mut NoProgress).unwrap();
    let b = synthesize(&source, 48_000, &p, &mut NoProgress).unwrap();

    assert_eq!(a.buffer.frames(), 96_000);
    assert_eq!(a.buffer, b.buffer);
    assert_eq!(a.pcm_hash, b.pcm_hash);
}

#[test]
fn test_different_seeds_differ() {
    let source = noise(48_000, 1, 0.5, 1);
    let a = synthesize(
        &source,
        48_000,
        &params(250.0, 100.0, 2.0).with_seed(42u64),
        &mut NoProgress,
    )
    .unwrap();
    let b = synthesize(
        &source,
        48_000,
        &params(250.0, 100.0, 2.0).with_seed(43u64),
        &mut NoProgress,
    )
    .unwrap();

    assert_eq!(b.buffer.frames(), 96_000);
    assert_ne!(a.pcm_hash, b.pcm_hash);
}

#[test]
fn test_text_seed_matches_its_hash() {
    let source = noise(8_000, 1, 0.5, 2);
    let by_text = synthesize(
        &source,
        8_000,
        &params(100.0, 20.0, 1.0).with_seed("ocean-take-3"),
        &mut NoProgress,
    )
    .unwrap();
    let by_number = synthesize(
        &source,
        8_000,
        &params(100.0, 20.0, 1.0).with_seed(snipweave_spec::hash_seed_text("ocean-take-3") as u64),
        &mut NoProgress,
    )
    .unwrap();

    assert_eq!(by_text.seed, by_number.seed);
    assert_eq!(by_text.buffer, by_number.buffer);
}

#[test]
fn test_numeric_text_seed_is_used_directly() {
    let source = noise(8_000, 1, 0.5, 2);
    let a = synthesize(
        &source,
        8_000,
        &params(100.0, 20.0, 1.0).with_seed(" 1234 "),
        &mut NoProgress,
    )
    .unwrap();
    assert_eq!(a.seed, 1234);
}

// ============================================================================
// Behavior
// ============================================================================

#[test]
fn test_degenerate_source_ignores_seed() {
    // Clip equals the whole source: every snippet starts at 0.
    let source = noise(500, 1, 0.5, 3);
    let p = params(500.0, 100.0, 3.0);

    let a = synthesize(&source, 1_000, &p.clone().with_seed(1u64), &mut NoProgress).unwrap();
    let b = synthesize(&source, 1_000, &p.with_seed(999u64), &mut NoProgress).unwrap();

    assert_eq!(a.buffer.frames(), 3_000);
    assert_eq!(a.buffer, b.buffer);
}

#[test]
fn test_stereo_channel_count_is_preserved() {
    let source = noise(4_000, 2, 0.5, 4);
    let result = synthesize(
        &source,
        4_000,
        &params(100.0, 25.0, 1.5).with_seed(5u64),
        &mut NoProgress,
    )
    .unwrap();
    assert_eq!(result.buffer.channels(), 2);
    assert_eq!(result.buffer.frames(), 6_000);
}

#[test]
fn test_gain_scales_unclipped_output() {
    // Linear crossfades sum to at most 1, so a 0.4 source never clips at 2x.
    let source = noise(10_000, 1, 0.4, 6);
    let base = params(200.0, 50.0, 2.0).with_seed(8u64);
    let doubled = SynthesisParams {
        gain: 2.0,
        ..base.clone()
    };

    let unity = synthesize(&source, 10_000, &base, &mut NoProgress).unwrap();
    let loud = synthesize(&source, 10_000, &doubled, &mut NoProgress).unwrap();

    for (&u, &l) in unity.buffer.samples().iter().zip(loud.buffer.samples()) {
        assert_eq!(l, u * 2.0);
    }
}

#[test]
fn test_loud_source_is_clipped() {
    let source = noise(4_000, 1, 1.0, 7);
    let p = SynthesisParams {
        gain: 2.0,
        ..params(100.0, 0.0, 1.0).with_seed(9u64)
    };
    let result = synthesize(&source, 4_000, &p, &mut NoProgress).unwrap();
    assert!(result.buffer.peak() <= 1.0);
    assert_eq!(result.buffer.peak(), 1.0);
}

#[test]
fn test_hann_accepts_large_overlap() {
    let source = noise(8_000, 1, 0.5, 10);
    let p = params(100.0, 75.0, 1.0)
        .with_window(WindowChoice::Hann)
        .with_seed(11u64);
    let result = synthesize(&source, 8_000, &p, &mut NoProgress).unwrap();
    assert_eq!(result.hop, 200);
    assert_eq!(result.buffer.frames(), 8_000);
    assert_eq!(result.snippets, 40);
}

#[test]
fn test_source_is_untouched() {
    let source = noise(8_000, 1, 0.9, 12);
    let before = source.clone();
    let p = SynthesisParams {
        gain: 2.0,
        ..params(100.0, 20.0, 2.0).with_seed(13u64)
    };
    synthesize(&source, 8_000, &p, &mut NoProgress).unwrap();
    assert_eq!(source, before);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_clip_longer_than_source_is_rejected() {
    let source = noise(11_999, 1, 0.5, 14);
    let err = synthesize(
        &source,
        48_000,
        &params(250.0, 0.0, 1.0),
        &mut NoProgress,
    )
    .unwrap_err();
    assert_eq!(err.code(), "E005");
}

#[test]
fn test_gain_out_of_range_is_rejected() {
    let source = noise(1_000, 1, 0.5, 15);
    for gain in [0.0, 0.04, 2.01, f64::NAN] {
        let p = SynthesisParams {
            gain,
            ..params(10.0, 0.0, 1.0)
        };
        let err = synthesize(&source, 1_000, &p, &mut NoProgress).unwrap_err();
        assert_eq!(err.code(), "E004", "gain={}", gain);
    }
}

#[test]
fn test_linear_overlap_at_half_clip_is_rejected() {
    let source = noise(1_000, 1, 0.5, 16);
    let err = synthesize(
        &source,
        1_000,
        &params(100.0, 50.0, 1.0),
        &mut NoProgress,
    )
    .unwrap_err();
    assert_eq!(err.code(), "E002");
}

#[test]
fn test_empty_seed_text_is_rejected() {
    let source = noise(1_000, 1, 0.5, 17);
    let err = synthesize(
        &source,
        1_000,
        &params(100.0, 10.0, 1.0).with_seed("   "),
        &mut NoProgress,
    )
    .unwrap_err();
    assert_eq!(err.code(), "E006");
}
