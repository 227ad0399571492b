//! Window curves that taper each snippet before accumulation.
//!
//! Coefficients are computed in `f64` and stored as `f32`, matching the
//! precision of the sample buffers they multiply.

use snipweave_spec::WindowKind;
use std::f64::consts::PI;
use std::ops::Deref;

/// Immutable per-run window coefficients, exactly `clip_len` long.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowCurve {
    coefficients: Vec<f32>,
}

impl WindowCurve {
    /// Builds the curve for a window kind.
    pub fn for_kind(kind: WindowKind, clip_len: usize) -> Self {
        match kind {
            WindowKind::LinearCrossfade { overlap } => linear_window(clip_len, overlap),
            WindowKind::HannCosine => hann_window(clip_len),
        }
    }

    /// Coefficients as a slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.coefficients
    }
}

impl Deref for WindowCurve {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.coefficients
    }
}

/// Linear fade-in, sustain, fade-out window.
///
/// `overlap_len` is the ramp length at each end. With no overlap the curve
/// is flat. The result is trimmed or padded with 1.0 to exactly `clip_len`,
/// which only matters when the ramps are longer than half the clip.
///
/// # Arguments
/// * `clip_len` - Curve length in samples (at least 1)
/// * `overlap_len` - Ramp length in samples
pub fn linear_window(clip_len: usize, overlap_len: usize) -> WindowCurve {
    let clip_len = clip_len.max(1);
    if overlap_len == 0 {
        return WindowCurve {
            coefficients: vec![1.0; clip_len],
        };
    }

    let fade = linspace_unit(overlap_len);
    let sustain_len = clip_len.saturating_sub(2 * overlap_len);

    let mut coefficients = Vec::with_capacity(2 * overlap_len + sustain_len);
    coefficients.extend_from_slice(&fade);
    coefficients.resize(overlap_len + sustain_len, 1.0);
    coefficients.extend(fade.iter().rev());

    coefficients.resize(clip_len, 1.0);
    WindowCurve { coefficients }
}

/// Hann (raised cosine) window across the whole clip.
///
/// Zero at both ends and 1.0 at the centre for odd lengths. A length of one
/// yields `[1.0]`. The second half mirrors the first, so the curve is exactly
/// palindromic.
pub fn hann_window(clip_len: usize) -> WindowCurve {
    let clip_len = clip_len.max(1);
    if clip_len == 1 {
        return WindowCurve {
            coefficients: vec![1.0],
        };
    }

    let denom = (clip_len - 1) as f64;
    let mut coefficients = vec![0.0_f32; clip_len];
    for i in 0..=(clip_len - 1) / 2 {
        let value = (0.5 - 0.5 * (2.0 * PI * i as f64 / denom).cos()) as f32;
        coefficients[i] = value;
        coefficients[clip_len - 1 - i] = value;
    }
    WindowCurve { coefficients }
}

/// `n` evenly spaced points from 0.0 to 1.0 inclusive.
fn linspace_unit(n: usize) -> Vec<f32> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = 1.0 / (n - 1) as f64;
            let mut points: Vec<f32> = (0..n).map(|i| (i as f64 * step) as f32).collect();
            points[n - 1] = 1.0;
            points
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_linear_no_overlap_is_flat() {
        let curve = linear_window(64, 0);
        assert_eq!(curve.len(), 64);
        assert!(curve.iter().all(|&c| c == 1.0));
    }

    #[test]
    fn test_linear_shape() {
        let curve = linear_window(10, 3);
        assert_eq!(
            curve.as_slice(),
            &[0.0, 0.5, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.5, 0.0]
        );
    }

    #[test]
    fn test_linear_crossfade_complement() {
        let clip = 120;
        let overlap = 48;
        let curve = linear_window(clip, overlap);
        let hop = clip - overlap;
        for i in 0..overlap {
            let sum = curve[i] + curve[hop + i];
            assert!((sum - 1.0).abs() < EPS, "i={} sum={}", i, sum);
        }
    }

    #[test]
    fn test_linear_is_palindromic() {
        let curve = linear_window(101, 30);
        for i in 0..curve.len() {
            assert_eq!(curve[i], curve[curve.len() - 1 - i]);
        }
    }

    #[test]
    fn test_linear_single_point_ramp() {
        let curve = linear_window(5, 1);
        assert_eq!(curve.as_slice(), &[0.0, 1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_linear_length_is_forced_when_ramps_overrun() {
        // Ramps longer than half the clip: concatenation is 12 long, trimmed to 8.
        let curve = linear_window(8, 6);
        assert_eq!(curve.len(), 8);
        assert_eq!(curve[0], 0.0);
        assert_eq!(curve[5], 1.0);
    }

    #[test]
    fn test_linear_values_in_unit_range() {
        let curve = linear_window(1000, 333);
        assert!(curve.iter().all(|&c| (0.0..=1.0).contains(&c)));
    }

    #[test]
    fn test_hann_endpoints_are_zero() {
        let curve = hann_window(256);
        assert_eq!(curve[0], 0.0);
        assert_eq!(curve[255], 0.0);
    }

    #[test]
    fn test_hann_is_palindromic() {
        for len in [2, 3, 17, 256, 1001] {
            let curve = hann_window(len);
            assert_eq!(curve.len(), len);
            for i in 0..len {
                assert_eq!(curve[i], curve[len - 1 - i], "len={} i={}", len, i);
            }
        }
    }

    #[test]
    fn test_hann_odd_centre_is_one() {
        let curve = hann_window(9);
        assert_eq!(curve[4], 1.0);
    }

    #[test]
    fn test_hann_degenerate_length() {
        assert_eq!(hann_window(1).as_slice(), &[1.0]);
    }

    #[test]
    fn test_hann_values_in_unit_range() {
        let curve = hann_window(500);
        assert!(curve.iter().all(|&c| (0.0..=1.0).contains(&c)));
    }

    #[test]
    fn test_for_kind_dispatch() {
        let linear = WindowCurve::for_kind(WindowKind::LinearCrossfade { overlap: 3 }, 10);
        assert_eq!(linear, linear_window(10, 3));
        let hann = WindowCurve::for_kind(WindowKind::HannCosine, 10);
        assert_eq!(hann, hann_window(10));
    }
}
