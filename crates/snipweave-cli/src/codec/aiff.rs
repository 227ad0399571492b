//! Plain AIFF writer.
//!
//! Emits `FORM`/`COMM`/`SSND` with big-endian signed integer PCM. AIFF has no
//! float encoding; callers reject float subtypes before getting here.

use byteorder::{BigEndian, WriteBytesExt};
use std::io::{self, Write};

use super::encode::quantize;

/// Fixed AIFF stream parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct AiffFormat {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
}

impl AiffFormat {
    fn bytes_per_sample(&self) -> usize {
        (self.bits_per_sample as usize).div_ceil(8)
    }

    /// Size of the sample data in bytes, without the pad byte.
    pub fn data_len(&self, samples: usize) -> usize {
        samples * self.bytes_per_sample()
    }
}

/// Writes a complete AIFF file.
///
/// `samples` are interleaved and are clamped and quantized on the way out.
pub(super) fn write_aiff<W: Write>(
    writer: &mut W,
    format: &AiffFormat,
    samples: &[f32],
) -> io::Result<()> {
    let channels = format.channels.max(1) as usize;
    let frames = (samples.len() / channels) as u32;
    let data_len = format.data_len(samples.len()) as u32;
    let pad = data_len % 2;

    let comm_len = 18u32;
    let ssnd_len = 8 + data_len;
    let form_len = 4 + (8 + comm_len) + (8 + ssnd_len + pad);

    writer.write_all(b"FORM")?;
    writer.write_u32::<BigEndian>(form_len)?;
    writer.write_all(b"AIFF")?;

    writer.write_all(b"COMM")?;
    writer.write_u32::<BigEndian>(comm_len)?;
    writer.write_i16::<BigEndian>(format.channels as i16)?;
    writer.write_u32::<BigEndian>(frames)?;
    writer.write_i16::<BigEndian>(format.bits_per_sample as i16)?;
    writer.write_all(&extended_from_u32(format.sample_rate))?;

    writer.write_all(b"SSND")?;
    writer.write_u32::<BigEndian>(ssnd_len)?;
    writer.write_u32::<BigEndian>(0)?; // offset
    writer.write_u32::<BigEndian>(0)?; // block size

    for &sample in samples {
        let value = quantize(sample, format.bits_per_sample);
        match format.bits_per_sample {
            8 => writer.write_i8(value as i8)?,
            16 => writer.write_i16::<BigEndian>(value as i16)?,
            24 => writer.write_i24::<BigEndian>(value)?,
            _ => writer.write_i32::<BigEndian>(value)?,
        }
    }
    if pad == 1 {
        writer.write_u8(0)?;
    }

    Ok(())
}

/// Encodes a sample rate as an 80-bit IEEE 754 extended float.
pub(super) fn extended_from_u32(value: u32) -> [u8; 10] {
    let mut out = [0u8; 10];
    if value == 0 {
        return out;
    }
    let msb = 31 - value.leading_zeros();
    let exponent = 16_383 + msb as u16;
    let mantissa = (value as u64) << (63 - msb);

    out[..2].copy_from_slice(&exponent.to_be_bytes());
    out[2..].copy_from_slice(&mantissa.to_be_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extended_known_rates() {
        assert_eq!(
            extended_from_u32(44_100),
            [0x40, 0x0E, 0xAC, 0x44, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            extended_from_u32(48_000),
            [0x40, 0x0E, 0xBB, 0x80, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(extended_from_u32(1), [0x3F, 0xFF, 0x80, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(extended_from_u32(0), [0; 10]);
    }

    #[test]
    fn test_chunk_layout() {
        let format = AiffFormat {
            channels: 2,
            sample_rate: 44_100,
            bits_per_sample: 16,
        };
        let mut bytes = Vec::new();
        write_aiff(&mut bytes, &format, &[0.0, 1.0, -1.0, 0.5]).unwrap();

        assert_eq!(&bytes[0..4], b"FORM");
        assert_eq!(u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize, bytes.len() - 8);
        assert_eq!(&bytes[8..12], b"AIFF");
        assert_eq!(&bytes[12..16], b"COMM");
        // 2 channels, 2 frames, 16 bits
        assert_eq!(&bytes[20..22], &[0, 2]);
        assert_eq!(&bytes[22..26], &[0, 0, 0, 2]);
        assert_eq!(&bytes[26..28], &[0, 16]);
        assert_eq!(&bytes[38..42], b"SSND");
        let data = &bytes[54..];
        assert_eq!(data, &[0x00, 0x00, 0x7F, 0xFF, 0x80, 0x01, 0x40, 0x00]);
    }

    #[test]
    fn test_odd_data_is_padded() {
        let format = AiffFormat {
            channels: 1,
            sample_rate: 8_000,
            bits_per_sample: 8,
        };
        let mut bytes = Vec::new();
        write_aiff(&mut bytes, &format, &[0.0, 0.5, -0.5]).unwrap();
        // 54-byte header, 3 data bytes, 1 pad byte
        assert_eq!(bytes.len(), 58);
        assert_eq!(u32::from_be_bytes([bytes[42], bytes[43], bytes[44], bytes[45]]), 11);
        assert_eq!(u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]), 50);
    }
}
