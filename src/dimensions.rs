// dimensions.rs - Target size for the downscale step

/// Number of equal steps the shrink is divided into; each step removes
/// 1/STEPS of the original width and height.
const STEPS: u64 = 1000;

pub fn is_below_threshold(width: u32, height: u32, min_dimension: u32) -> bool {
    width < min_dimension || height < min_dimension
}

/// Shrinks both axes by the same whole number of 0.1% steps of their
/// original size, stopping at the first step where either axis drops below
/// `min_dimension`. Images already below the threshold are returned as-is.
///
/// The smaller axis always crosses first, so with `s = min(width, height)`
/// the fraction kept is `k / 1000` where `k` is the largest integer with
/// `s * k / 1000 < min_dimension`. Axes are never reduced below 1 pixel.
/// A zero threshold never triggers a shrink.
pub fn target_dimensions(width: u32, height: u32, min_dimension: u32) -> (u32, u32) {
    if min_dimension == 0 || is_below_threshold(width, height, min_dimension) {
        return (width, height);
    }

    let smaller = u64::from(width.min(height));
    let bound = STEPS * u64::from(min_dimension);
    // ceil(bound / smaller) - 1; smaller >= min_dimension keeps this within 0..STEPS
    let kept = (bound + smaller - 1) / smaller - 1;

    (scale(width, kept), scale(height, kept))
}

fn scale(axis: u32, kept: u64) -> u32 {
    let scaled = u64::from(axis) * kept / STEPS;
    // scaled <= axis, so the conversion cannot fail
    u32::try_from(scaled).unwrap_or(axis).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Decrement both axes by a thousandth of their starting size until one
    /// of them falls under the threshold, then truncate.
    fn stepwise(width: u32, height: u32, min_dimension: u32) -> (u32, u32) {
        let min = f64::from(min_dimension);
        let (mut w, mut h) = (f64::from(width), f64::from(height));
        if w < min || h < min {
            return (width, height);
        }
        let (dw, dh) = (w / 1000.0, h / 1000.0);
        loop {
            w -= dw;
            h -= dh;
            if w < min || h < min {
                return ((w as u32).max(1), (h as u32).max(1));
            }
        }
    }

    #[test]
    fn large_image_is_shrunk_below_threshold() {
        let (w, h) = target_dimensions(2000, 1500, 700);
        assert_eq!((w, h), (932, 699));
        assert!(w < 700 || h < 700);
        assert!(w > 0 && h > 0);
    }

    #[test]
    fn small_image_is_left_alone() {
        assert_eq!(target_dimensions(500, 400, 700), (500, 400));
        assert_eq!(target_dimensions(4000, 699, 700), (4000, 699));
        assert_eq!(target_dimensions(10, 10_000, 11), (10, 10_000));
    }

    #[test]
    fn exact_threshold_takes_one_step() {
        assert_eq!(target_dimensions(700, 700, 700), (699, 699));
        assert_eq!(target_dimensions(1000, 700, 700), (999, 699));
    }

    #[test]
    fn zero_threshold_leaves_image_alone() {
        assert_eq!(target_dimensions(800, 600, 0), (800, 600));
        assert_eq!(target_dimensions(0, 0, 0), (0, 0));
    }

    #[test]
    fn huge_ratio_clamps_to_one_pixel() {
        let (w, h) = target_dimensions(100_000, 100_000, 2);
        assert_eq!((w, h), (1, 1));

        let (w, h) = target_dimensions(u32::MAX, u32::MAX, u32::MAX);
        assert!(w < u32::MAX && h < u32::MAX);
    }

    #[test]
    fn shrink_invariant_holds_across_sizes() {
        for min in [2u32, 3, 64, 333, 700, 1024] {
            for width in (min..min * 6).step_by(37) {
                for height in (min..min * 6).step_by(53) {
                    let (w, h) = target_dimensions(width, height, min);
                    assert!(w < min || h < min, "{width}x{height} min {min} -> {w}x{h}");
                    assert!(w > 0 && h > 0);
                    assert!(w <= width && h <= height);
                }
            }
        }
    }

    #[test]
    fn matches_stepwise_shrink() {
        for min in [50u32, 600, 700, 1080] {
            for width in (min..min * 5).step_by(41) {
                for height in (min..min * 5).step_by(29) {
                    let closed = target_dimensions(width, height, min);
                    let stepped = stepwise(width, height, min);
                    // float accumulation in the loop can land one step apart
                    let dw = closed.0.abs_diff(stepped.0);
                    let dh = closed.1.abs_diff(stepped.1);
                    assert!(
                        dw <= width / 1000 + 1 && dh <= height / 1000 + 1,
                        "{width}x{height} min {min}: {closed:?} vs {stepped:?}"
                    );
                }
            }
        }
    }
}
