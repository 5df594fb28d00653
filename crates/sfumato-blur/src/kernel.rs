//! Kernel weight construction.

use smallvec::SmallVec;

/// Tap vector with inline storage for radii up to 7.
pub type Taps = SmallVec<[f32; 16]>;

/// Gaussian bell at `x` for standard deviation `sigma`, mean 0.
fn gaussian(sigma: f32, x: f32) -> f32 {
    let s2 = sigma * sigma;
    (-(x * x) / (2.0 * s2)).exp() / (core::f32::consts::TAU * s2).sqrt()
}

/// Fill an odd-length kernel with mirrored gaussian taps.
///
/// The bell is sampled at `((i - R) / R) * 3` so the outermost tap sits
/// three widths out, scaled by `gain`, and the left half (center
/// included) is mirrored onto the right. The taps are NOT normalized;
/// fold any normalization into `gain`.
///
/// # Panics
///
/// Panics if `kernel.len()` is even or shorter than 3.
pub fn fill_gaussian(kernel: &mut [f32], sigma: f32, gain: f32) {
    let len = kernel.len();
    assert!(
        len >= 3 && len % 2 == 1,
        "gaussian kernel needs an odd length >= 3, got {len}"
    );
    let r = len / 2;
    for i in 0..=r {
        let x = ((i as f32 - r as f32) / r as f32) * 3.0;
        let y = gaussian(sigma, x) * gain;
        kernel[i] = y;
        kernel[len - 1 - i] = y;
    }
}

/// Build a full gaussian tap vector for `radius` (length `2*radius + 1`).
///
/// # Panics
///
/// Panics if `radius` is 0.
pub fn gaussian_taps(radius: usize, sigma: f32, gain: f32) -> Taps {
    assert!(radius >= 1, "kernel radius must be >= 1, got {radius}");
    let mut taps = Taps::from_elem(0.0, 2 * radius + 1);
    fill_gaussian(&mut taps, sigma, gain);
    taps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taps_are_mirror_symmetric() {
        let taps = gaussian_taps(4, 1.3, 1.0);
        assert_eq!(taps.len(), 9);
        for i in 0..taps.len() {
            assert_eq!(
                taps[i],
                taps[taps.len() - 1 - i],
                "tap {i} breaks mirror symmetry"
            );
        }
    }

    #[test]
    fn center_tap_is_the_peak() {
        let taps = gaussian_taps(3, 1.0, 1.0);
        let center = taps[3];
        for (i, &t) in taps.iter().enumerate() {
            assert!(t <= center, "tap {i} ({t}) exceeds the center ({center})");
            assert!(t > 0.0, "tap {i} must be positive");
        }
    }

    #[test]
    fn gain_scales_linearly() {
        let unit = gaussian_taps(2, 1.0, 1.0);
        let doubled = gaussian_taps(2, 1.0, 2.0);
        for (a, b) in unit.iter().zip(doubled.iter()) {
            assert_eq!(a * 2.0, *b);
        }
    }

    #[test]
    #[should_panic(expected = "odd length")]
    fn even_kernel_is_rejected() {
        let mut kernel = [0.0f32; 4];
        fill_gaussian(&mut kernel, 1.0, 1.0);
    }
}
