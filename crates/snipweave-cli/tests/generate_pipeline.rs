//! End-to-end tests for the generate pipeline: decode, synthesize, save.

use pretty_assertions::assert_eq;
use snipweave_audio::{AudioBuffer, NoProgress};
use snipweave_cli::codec::{load_audio, save_audio};
use snipweave_cli::commands::generate::{execute, GenerateError, GenerateOptions};
use snipweave_cli::commands::validate::{check, ValidateOptions};
use snipweave_cli::input::ParamOverrides;
use snipweave_spec::{SampleSubtype, SaveFormat};
use std::path::{Path, PathBuf};

fn write_source(dir: &Path, name: &str, channels: usize, sample_rate: u32) -> PathBuf {
    let frames = sample_rate as usize;
    let samples = (0..frames * channels)
        .map(|i| ((i as f32) * 0.013).sin() * 0.6)
        .collect();
    let path = dir.join(name);
    save_audio(
        &path,
        &AudioBuffer::new(samples, channels).unwrap(),
        sample_rate,
        SaveFormat::from_path(&path).unwrap_or_default(),
        SampleSubtype::Pcm24,
    )
    .unwrap();
    path
}

fn seeded(seed: &str) -> ParamOverrides {
    ParamOverrides {
        clip_ms: Some(250.0),
        overlap_ms: Some(100.0),
        output_seconds: Some(2.0),
        seed: Some(seed.to_string()),
        ..ParamOverrides::default()
    }
}

#[test]
fn test_seeded_runs_write_identical_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "source.wav", 1, 48_000);

    let mut outputs = Vec::new();
    for name in ["a.wav", "b.wav"] {
        let options = GenerateOptions {
            input: input.clone(),
            output: dir.path().join(name),
            overrides: seeded("harbour"),
            quiet: true,
            ..GenerateOptions::default()
        };
        execute(&options, &mut NoProgress, &mut |_: String| {}).unwrap();
        outputs.push(std::fs::read(&options.output).unwrap());
    }
    assert_eq!(outputs[0], outputs[1]);

    let decoded = load_audio(&dir.path().join("a.wav")).unwrap();
    assert_eq!(decoded.frames(), 96_000);
    assert_eq!(decoded.sample_rate, 48_000);
    assert_eq!(decoded.subtype, SampleSubtype::Pcm16);
}

#[test]
fn test_aiff_source_to_aiff_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "source.aiff", 2, 22_050);
    let options = GenerateOptions {
        input,
        output: dir.path().join("texture.aif"),
        overrides: ParamOverrides {
            output_seconds: Some(1.5),
            ..seeded("7")
        },
        keep_subtype: true,
        quiet: true,
        ..GenerateOptions::default()
    };

    let generated = execute(&options, &mut NoProgress, &mut |_: String| {}).unwrap();
    assert_eq!(generated.settings.format, SaveFormat::Aiff);
    assert_eq!(generated.synthesis.seed, 7);

    let decoded = load_audio(&options.output).unwrap();
    assert_eq!(decoded.channels(), 2);
    assert_eq!(decoded.frames(), 33_075);
    assert_eq!(decoded.sample_rate, 22_050);
}

#[test]
fn test_progress_reaches_completion() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "source.wav", 1, 8_000);
    let options = GenerateOptions {
        input,
        output: dir.path().join("out.wav"),
        overrides: seeded("1"),
        quiet: true,
        ..GenerateOptions::default()
    };

    let mut seen = Vec::new();
    let mut record = |p: u8| seen.push(p);
    execute(&options, &mut record, &mut |_: String| {}).unwrap();
    assert_eq!(seen.last(), Some(&100));
    assert!(seen.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_failed_run_keeps_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "source.wav", 1, 8_000);
    let output = dir.path().join("out.wav");
    std::fs::write(&output, b"previous render").unwrap();

    // 2 s clip against a 1 s source.
    let options = GenerateOptions {
        input,
        output: output.clone(),
        overrides: ParamOverrides {
            clip_ms: Some(2_000.0),
            overlap_ms: Some(0.0),
            ..ParamOverrides::default()
        },
        quiet: true,
        ..GenerateOptions::default()
    };
    let err = execute(&options, &mut NoProgress, &mut |_: String| {}).unwrap_err();
    assert!(matches!(err, GenerateError::Synthesis(_)));
    assert_eq!(err.to_json().code, "E005");
    assert_eq!(std::fs::read(&output).unwrap(), b"previous render".to_vec());
}

#[test]
fn test_params_file_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "source.wav", 1, 8_000);
    let params = dir.path().join("params.json");
    std::fs::write(
        &params,
        r#"{"clip_ms": 50.0, "overlap_ms": 40.0, "output_seconds": 0.5, "window": "hann", "seed": 3}"#,
    )
    .unwrap();

    let options = GenerateOptions {
        input,
        output: dir.path().join("out.wav"),
        params_file: Some(params),
        quiet: true,
        ..GenerateOptions::default()
    };
    let generated = execute(&options, &mut NoProgress, &mut |_: String| {}).unwrap();
    assert_eq!(generated.synthesis.clip_len, 400);
    assert_eq!(generated.synthesis.hop, 80);
    assert_eq!(generated.synthesis.buffer.frames(), 4_000);
    assert!(generated.params_hash.is_some());
}

#[test]
fn test_validate_against_source() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "source.wav", 1, 48_000);

    let ok = check(&ValidateOptions {
        overrides: seeded("42"),
        input: Some(input.clone()),
        ..ValidateOptions::default()
    })
    .unwrap();
    assert_eq!(ok.hop_samples, Some(7_200));
    assert_eq!(ok.seed, Some(42));

    let err = check(&ValidateOptions {
        overrides: ParamOverrides {
            overlap_ms: Some(125.0),
            ..seeded("42")
        },
        input: Some(input),
        ..ValidateOptions::default()
    })
    .unwrap_err();
    assert_eq!(err.code, "E002");
}
