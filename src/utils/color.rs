//! Color interpolation for parameter sweeps
//!
//! Grid runs sweep a material parameter across cells; these helpers
//! generate the color steps. Linear RGB interpolation is the default, with
//! an Oklab variant for sweeps that should look perceptually even.

/// RGB color with channels in [0, 1] (radiance values may exceed 1).
pub type Rgb = [f64; 3];

fn lerp(start: Rgb, end: Rgb, t: f64) -> Rgb {
    [
        start[0] * (1.0 - t) + end[0] * t,
        start[1] * (1.0 - t) + end[1] * t,
        start[2] * (1.0 - t) + end[2] * t,
    ]
}

fn steps(n: usize) -> impl Iterator<Item = f64> {
    (0..n).map(move |i| if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 })
}

/// Generate `n` colors linearly interpolated between `start` and `end`,
/// endpoints included. `n == 1` yields `start` alone.
pub fn color_range(start: Rgb, end: Rgb, n: usize) -> Vec<Rgb> {
    steps(n).map(|t| lerp(start, end, t)).collect()
}

/// Like [`color_range`] but interpolating in Oklab space; results are
/// converted back to RGB and clamped to the unit cube.
pub fn color_range_oklab(start: Rgb, end: Rgb, n: usize) -> Vec<Rgb> {
    let start = rgb_to_oklab(start);
    let end = rgb_to_oklab(end);
    steps(n).map(|t| oklab_to_rgb(lerp(start, end, t))).collect()
}

pub fn rgb_to_oklab(rgb: Rgb) -> Rgb {
    let [r, g, b] = rgb;

    let l = 0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b;
    let m = 0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b;
    let s = 0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b;

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    [
        0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
        1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
        0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
    ]
}

pub fn oklab_to_rgb(lab: Rgb) -> Rgb {
    let [l_ch, a, b_ch] = lab;

    let l_ = l_ch + 0.3963377774 * a + 0.2158037573 * b_ch;
    let m_ = l_ch - 0.1055613458 * a - 0.0638541728 * b_ch;
    let s_ = l_ch - 0.0894841775 * a - 1.2914855480 * b_ch;

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    let r = 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s;
    let g = -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s;
    let b = -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s;

    [r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0)]
}

/// Two-decimal display form, for grid cell labels.
pub fn color_to_str(color: Rgb) -> String {
    format!("({:.2}, {:.2}, {:.2})", color[0], color[1], color[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_range_hits_endpoints_and_midpoint() {
        let colors = color_range([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], 3);
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[0], [1.0, 0.0, 0.0]);
        assert_eq!(colors[1], [0.5, 0.0, 0.5]);
        assert_eq!(colors[2], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_single_step_range_yields_start() {
        let colors = color_range([0.2, 0.4, 0.6], [1.0, 1.0, 1.0], 1);
        assert_eq!(colors, vec![[0.2, 0.4, 0.6]]);
    }

    #[test]
    fn test_oklab_round_trip() {
        for color in [
            [0.0, 0.0, 0.0],
            [1.0, 1.0, 1.0],
            [1.0, 0.25, 0.0],
            [0.01, 0.1, 0.3],
            [0.5, 0.0, 0.05],
        ] {
            let round_tripped = oklab_to_rgb(rgb_to_oklab(color));
            for channel in 0..3 {
                assert!(
                    (round_tripped[channel] - color[channel]).abs() < 1e-6,
                    "channel {} of {:?} round-tripped to {:?}",
                    channel,
                    color,
                    round_tripped
                );
            }
        }
    }

    #[test]
    fn test_oklab_output_is_clamped() {
        // A point far outside the gamut clamps instead of going negative.
        let rgb = oklab_to_rgb([0.5, 1.0, 1.0]);
        for channel in rgb {
            assert!((0.0..=1.0).contains(&channel));
        }
    }

    #[test]
    fn test_oklab_range_endpoints() {
        let colors = color_range_oklab([0.01, 0.1, 0.3], [0.5, 0.0, 0.05], 5);
        assert_eq!(colors.len(), 5);
        for channel in 0..3 {
            assert!((colors[0][channel] - [0.01, 0.1, 0.3][channel]).abs() < 1e-6);
            assert!((colors[4][channel] - [0.5, 0.0, 0.05][channel]).abs() < 1e-6);
        }
    }

    #[test]
    fn test_color_to_str() {
        assert_eq!(color_to_str([1.0, 0.25, 0.0]), "(1.00, 0.25, 0.00)");
    }
}
