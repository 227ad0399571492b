//! Source file decoding.

use snipweave_audio::AudioBuffer;
use snipweave_spec::SampleSubtype;
use std::fs::File;
use std::io;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::SampleFormat;
use symphonia::default::{get_codecs, get_probe};

use super::CodecError;

/// A decoded source file.
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// Samples normalized to `[-1.0, 1.0]`, interleaved.
    pub buffer: AudioBuffer,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Native sample encoding; `PCM_16` when the container does not say.
    pub subtype: SampleSubtype,
}

impl DecodedAudio {
    /// Channel count.
    pub fn channels(&self) -> usize {
        self.buffer.channels()
    }

    /// Frame count.
    pub fn frames(&self) -> usize {
        self.buffer.frames()
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.buffer.duration_seconds(self.sample_rate)
    }

    /// One-line description, e.g. `rain.wav — 48000 Hz, 2 ch, 12.50 s, subtype PCM_24`.
    pub fn summary(&self, name: &str) -> String {
        format!(
            "{} — {} Hz, {} ch, {:.2} s, subtype {}",
            name,
            self.sample_rate,
            self.channels(),
            self.duration_seconds(),
            self.subtype
        )
    }
}

/// Decodes an audio file into a normalized buffer.
///
/// `.wav` files are read with `hound`; everything else is format-detected with
/// `symphonia`, using the extension as a hint.
///
/// # Errors
/// [`CodecError::NotFound`] when the path does not exist and
/// [`CodecError::Unreadable`] when the content cannot be decoded.
pub fn load_audio(path: &Path) -> Result<DecodedAudio, CodecError> {
    if !path.exists() {
        return Err(CodecError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase());

    let decoded = match extension.as_deref() {
        Some("wav") | Some("wave") => decode_wav(path)?,
        _ => decode_detected(path, extension.as_deref())?,
    };

    tracing::debug!(
        path = %path.display(),
        sample_rate = decoded.sample_rate,
        channels = decoded.channels(),
        frames = decoded.frames(),
        subtype = %decoded.subtype,
        "decoded source"
    );
    Ok(decoded)
}

fn open(path: &Path) -> Result<File, CodecError> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CodecError::NotFound {
            path: path.to_path_buf(),
        },
        _ => CodecError::unreadable(path, e),
    })
}

/// Decodes RIFF WAVE with hound. Integer PCM is scaled by `2^(bits-1)`.
fn decode_wav(path: &Path) -> Result<DecodedAudio, CodecError> {
    let file = open(path)?;
    let reader =
        hound::WavReader::new(io::BufReader::new(file)).map_err(|e| CodecError::unreadable(path, e))?;
    let spec = reader.spec();
    if spec.channels == 0 || spec.bits_per_sample == 0 {
        return Err(CodecError::unreadable(path, "header declares no channels or bits"));
    }

    let (samples, subtype) = match spec.sample_format {
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            let samples = reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<Vec<f32>, _>>()
                .map_err(|e| CodecError::unreadable(path, e))?;
            let subtype =
                SampleSubtype::from_int_bits(spec.bits_per_sample as u32).unwrap_or_default();
            (samples, subtype)
        }
        hound::SampleFormat::Float => {
            let samples = reader
                .into_samples::<f32>()
                .collect::<Result<Vec<f32>, _>>()
                .map_err(|e| CodecError::unreadable(path, e))?;
            (samples, SampleSubtype::Float)
        }
    };

    let buffer = AudioBuffer::new(samples, spec.channels as usize)
        .map_err(|e| CodecError::unreadable(path, e))?;
    Ok(DecodedAudio {
        buffer,
        sample_rate: spec.sample_rate,
        subtype,
    })
}

/// Decodes any container symphonia can detect (AIFF, AIFC, ...).
fn decode_detected(path: &Path, extension: Option<&str>) -> Result<DecodedAudio, CodecError> {
    let file = open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let detected = get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| CodecError::unreadable(path, e))?;
    let mut format = detected.format;

    let track = format
        .default_track()
        .ok_or_else(|| CodecError::unreadable(path, "no audio track"))?;
    let track_id = track.id;
    let params = track.codec_params.clone();

    let sample_rate = params
        .sample_rate
        .ok_or_else(|| CodecError::unreadable(path, "unknown sample rate"))?;
    let channels = params
        .channels
        .map(|c| c.count())
        .ok_or_else(|| CodecError::unreadable(path, "unknown channel count"))?;
    let subtype = match params.sample_format {
        Some(SampleFormat::F32) | Some(SampleFormat::F64) => SampleSubtype::Float,
        _ => params
            .bits_per_sample
            .and_then(SampleSubtype::from_int_bits)
            .unwrap_or_default(),
    };

    let mut decoder = get_codecs()
        .make(&params, &DecoderOptions::default())
        .map_err(|e| CodecError::unreadable(path, e))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut buf_frames = 0usize;
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(_)) => break,
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(e) => return Err(CodecError::unreadable(path, e)),
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder
            .decode(&packet)
            .map_err(|e| CodecError::unreadable(path, e))?;
        if sample_buf.is_none() || decoded.capacity() > buf_frames {
            buf_frames = decoded.capacity();
            sample_buf = Some(SampleBuffer::<f32>::new(
                buf_frames as u64,
                *decoded.spec(),
            ));
        }
        if let Some(buf) = sample_buf.as_mut() {
            buf.copy_interleaved_ref(decoded);
            samples.extend_from_slice(buf.samples());
        }
    }

    let buffer =
        AudioBuffer::new(samples, channels).map_err(|e| CodecError::unreadable(path, e))?;
    Ok(DecodedAudio {
        buffer,
        sample_rate,
        subtype,
    })
}
