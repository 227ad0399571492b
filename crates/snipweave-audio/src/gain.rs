//! Output gain and hard clipping.

use crate::buffer::AudioBuffer;

/// Scales every sample by `gain`, then hard-clips to `[-1.0, 1.0]`.
///
/// The gain is not range-checked here; callers validate it beforehand.
pub fn apply_gain(buffer: &mut AudioBuffer, gain: f64) {
    apply_gain_slice(buffer.samples_mut(), gain);
}

/// Slice form of [`apply_gain`].
pub fn apply_gain_slice(samples: &mut [f32], gain: f64) {
    let gain = gain as f32;
    for sample in samples.iter_mut() {
        *sample = hard_clip(*sample * gain);
    }
}

/// Clamps a sample into `[-1.0, 1.0]`.
#[inline]
pub fn hard_clip(sample: f32) -> f32 {
    sample.clamp(-1.0, 1.0)
}
