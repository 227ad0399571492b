//! Output encoding and atomic saves.

use snipweave_audio::AudioBuffer;
use snipweave_spec::{SampleSubtype, SaveFormat};
use std::io::{Cursor, Write};
use std::path::Path;

use super::aiff::{write_aiff, AiffFormat};
use super::CodecError;

/// Encodes a buffer into a complete file image.
///
/// # Arguments
/// * `buffer` - Samples to encode; values outside `[-1.0, 1.0]` are clamped
/// * `sample_rate` - Sample rate in Hz
/// * `format` - Container
/// * `subtype` - Sample encoding
///
/// # Errors
/// [`CodecError::UnsupportedSubtype`] for float AIFF, [`CodecError::Encode`]
/// when the buffer does not fit the container.
pub fn encode(
    buffer: &AudioBuffer,
    sample_rate: u32,
    format: SaveFormat,
    subtype: SampleSubtype,
) -> Result<Vec<u8>, CodecError> {
    let channels = u16::try_from(buffer.channels())
        .map_err(|_| CodecError::encode(format!("{} channels", buffer.channels())))?;
    match format {
        SaveFormat::Wav => encode_wav(buffer.samples(), channels, sample_rate, subtype),
        SaveFormat::Aiff => encode_aiff(buffer.samples(), channels, sample_rate, subtype),
    }
}

fn encode_wav(
    samples: &[f32],
    channels: u16,
    sample_rate: u32,
    subtype: SampleSubtype,
) -> Result<Vec<u8>, CodecError> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: subtype.bits(),
        sample_format: if subtype.is_float() {
            hound::SampleFormat::Float
        } else {
            hound::SampleFormat::Int
        },
    };

    let bits = subtype.bits();
    let mut cursor = Cursor::new(Vec::with_capacity(44 + samples.len() * bits as usize / 8));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).map_err(CodecError::encode)?;
        for &sample in samples {
            let written = match subtype {
                SampleSubtype::Float => writer.write_sample(sample.clamp(-1.0, 1.0)),
                SampleSubtype::Pcm8 => writer.write_sample(quantize(sample, bits) as i8),
                SampleSubtype::Pcm16 => writer.write_sample(quantize(sample, bits) as i16),
                SampleSubtype::Pcm24 | SampleSubtype::Pcm32 => {
                    writer.write_sample(quantize(sample, bits))
                }
            };
            written.map_err(CodecError::encode)?;
        }
        writer.finalize().map_err(CodecError::encode)?;
    }
    Ok(cursor.into_inner())
}

fn encode_aiff(
    samples: &[f32],
    channels: u16,
    sample_rate: u32,
    subtype: SampleSubtype,
) -> Result<Vec<u8>, CodecError> {
    if subtype.is_float() {
        return Err(CodecError::UnsupportedSubtype {
            format: SaveFormat::Aiff.as_str(),
            subtype,
        });
    }

    let format = AiffFormat {
        channels,
        sample_rate,
        bits_per_sample: subtype.bits(),
    };
    let data_len = format.data_len(samples.len());
    if data_len > (u32::MAX - 64) as usize {
        return Err(CodecError::encode("sample data exceeds the 4 GiB AIFF limit"));
    }

    let mut bytes = Vec::with_capacity(54 + data_len + 1);
    write_aiff(&mut bytes, &format, samples).map_err(CodecError::encode)?;
    Ok(bytes)
}

/// Clamps to `[-1.0, 1.0]` and scales to a signed integer of `bits` width.
pub(super) fn quantize(sample: f32, bits: u16) -> i32 {
    let max = ((1i64 << (bits - 1)) - 1) as f64;
    (sample.clamp(-1.0, 1.0) as f64 * max).round() as i32
}

/// Encodes and writes a file, replacing `path` only on success.
///
/// The file image is built in memory and written to a temporary file in the
/// destination directory, which is then renamed over `path`. Any failure
/// leaves an existing file at `path` untouched.
///
/// # Returns
/// Number of bytes written.
pub fn save_audio(
    path: &Path,
    buffer: &AudioBuffer,
    sample_rate: u32,
    format: SaveFormat,
    subtype: SampleSubtype,
) -> Result<usize, CodecError> {
    let bytes = encode(buffer, sample_rate, format, subtype)?;

    let io_err = |source: std::io::Error| CodecError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(&bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    tracing::debug!(
        path = %path.display(),
        format = %format,
        subtype = %subtype,
        bytes = bytes.len(),
        "saved output"
    );
    Ok(bytes.len())
}
