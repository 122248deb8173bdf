//! Easing curves for camera and fade animations.

/// Easing curves. Cubic variants, so `EaseInOut` matches the classic
/// cubic in-out camera feel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed, no acceleration.
    Linear,
    /// Slow start, fast end.
    EaseIn,
    /// Fast start, slow end.
    EaseOut,
    /// Slow start, fast middle, slow end.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map a linear progress value (0.0..=1.0) to an eased value.
    #[must_use]
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_curves_start_at_zero_end_at_one() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ] {
            assert!((easing.apply(0.0)).abs() < 1e-6, "{easing:?} at t=0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at t=1");
        }
    }

    #[test]
    fn test_ease_in_starts_slow() {
        assert!(Easing::EaseIn.apply(0.25) < 0.25);
    }

    #[test]
    fn test_ease_out_ends_slow() {
        assert!(Easing::EaseOut.apply(0.75) > 0.75);
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let lo = Easing::EaseInOut.apply(0.25);
        let hi = Easing::EaseInOut.apply(0.75);
        assert!((lo + hi - 1.0).abs() < 1e-6);
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_apply_clamps_out_of_range() {
        assert!((Easing::EaseInOut.apply(-1.0)).abs() < 1e-6);
        assert!((Easing::EaseInOut.apply(2.0) - 1.0).abs() < 1e-6);
    }
}
