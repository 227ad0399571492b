//! Codec integration tests: files written by `save_audio` decode back to
//! the same audio within the quantization step of their encoding.

use snipweave_audio::AudioBuffer;
use snipweave_cli::codec::{encode, load_audio, save_audio, CodecError};
use snipweave_spec::{SampleSubtype, SaveFormat};
use std::path::Path;

fn stereo_sweep(frames: usize) -> AudioBuffer {
    let mut samples = Vec::with_capacity(frames * 2);
    for i in 0..frames {
        let t = i as f32 / frames as f32;
        samples.push((t * 40.0).sin() * 0.8);
        samples.push(t * 2.0 - 1.0);
    }
    AudioBuffer::new(samples, 2).unwrap()
}

fn assert_close(a: &AudioBuffer, b: &AudioBuffer, tolerance: f32) {
    assert_eq!(a.channels(), b.channels());
    assert_eq!(a.frames(), b.frames());
    for (i, (x, y)) in a.samples().iter().zip(b.samples()).enumerate() {
        assert!(
            (x - y).abs() <= tolerance,
            "sample {}: {} vs {} (tolerance {})",
            i,
            x,
            y,
            tolerance
        );
    }
}

fn roundtrip(dir: &Path, name: &str, format: SaveFormat, subtype: SampleSubtype) {
    let original = stereo_sweep(2_000);
    let path = dir.join(name);
    save_audio(&path, &original, 44_100, format, subtype).unwrap();

    let decoded = load_audio(&path).unwrap();
    assert_eq!(decoded.sample_rate, 44_100, "{}", name);

    // Written with a 2^(bits-1) - 1 scale, read back with 2^(bits-1).
    let tolerance = match subtype {
        SampleSubtype::Float => 0.0,
        other => 2.0 / (1u64 << (other.bits() - 1)) as f32,
    };
    assert_close(&original, &decoded.buffer, tolerance + 1e-6);
}

// ============================================================================
// WAV
// ============================================================================

#[test]
fn test_wav_pcm16_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    roundtrip(dir.path(), "a.wav", SaveFormat::Wav, SampleSubtype::Pcm16);
    let decoded = load_audio(&dir.path().join("a.wav")).unwrap();
    assert_eq!(decoded.subtype, SampleSubtype::Pcm16);
}

#[test]
fn test_wav_pcm24_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    roundtrip(dir.path(), "a.wav", SaveFormat::Wav, SampleSubtype::Pcm24);
    let decoded = load_audio(&dir.path().join("a.wav")).unwrap();
    assert_eq!(decoded.subtype, SampleSubtype::Pcm24);
}

#[test]
fn test_wav_pcm8_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let original = stereo_sweep(500);
    let path = dir.path().join("a.wav");
    save_audio(&path, &original, 8_000, SaveFormat::Wav, SampleSubtype::Pcm8).unwrap();
    let decoded = load_audio(&path).unwrap();
    assert_eq!(decoded.subtype, SampleSubtype::Pcm8);
    assert_close(&original, &decoded.buffer, 0.02);
}

#[test]
fn test_wav_float_roundtrip_is_exact() {
    let dir = tempfile::tempdir().unwrap();
    roundtrip(dir.path(), "a.wav", SaveFormat::Wav, SampleSubtype::Float);
    let decoded = load_audio(&dir.path().join("a.wav")).unwrap();
    assert_eq!(decoded.subtype, SampleSubtype::Float);
}

#[test]
fn test_wav_clamps_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hot.wav");
    let hot = AudioBuffer::mono(vec![1.5, -3.0, 0.0]);
    save_audio(&path, &hot, 8_000, SaveFormat::Wav, SampleSubtype::Pcm16).unwrap();
    let decoded = load_audio(&path).unwrap();
    let s = decoded.buffer.samples();
    assert!((s[0] - 32_767.0 / 32_768.0).abs() < 1e-6);
    assert!((s[1] + 32_767.0 / 32_768.0).abs() < 1e-6);
    assert_eq!(s[2], 0.0);
}

// ============================================================================
// AIFF
// ============================================================================

#[test]
fn test_aiff_pcm16_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    roundtrip(dir.path(), "a.aiff", SaveFormat::Aiff, SampleSubtype::Pcm16);
}

#[test]
fn test_aiff_pcm24_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    roundtrip(dir.path(), "a.aif", SaveFormat::Aiff, SampleSubtype::Pcm24);
}

#[test]
fn test_aiff_rejects_float() {
    let err = encode(
        &stereo_sweep(10),
        44_100,
        SaveFormat::Aiff,
        SampleSubtype::Float,
    )
    .unwrap_err();
    assert!(matches!(err, CodecError::UnsupportedSubtype { .. }));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_missing_and_unreadable_are_distinct() {
    let dir = tempfile::tempdir().unwrap();

    let missing = load_audio(&dir.path().join("nope.aiff")).unwrap_err();
    assert!(matches!(missing, CodecError::NotFound { .. }));

    let junk = dir.path().join("junk.aiff");
    std::fs::write(&junk, vec![0u8; 128]).unwrap();
    let unreadable = load_audio(&junk).unwrap_err();
    assert!(matches!(unreadable, CodecError::Unreadable { .. }));
}

#[test]
fn test_write_into_missing_directory_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("out.wav");
    let err = save_audio(
        &path,
        &stereo_sweep(10),
        44_100,
        SaveFormat::Wav,
        SampleSubtype::Pcm16,
    )
    .unwrap_err();
    assert!(matches!(err, CodecError::Io { .. }));
    assert!(!path.exists());
}
