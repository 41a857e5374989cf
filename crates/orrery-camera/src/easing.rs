//! Easing curves for camera flights.

/// Maps linear flight progress to eased progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EasingFunction {
    /// Constant speed, no acceleration.
    Linear,
    /// `1 - (1 - t)^3`: fast start, decelerating into the target.
    #[default]
    EaseOutCubic,
}

impl EasingFunction {
    /// Map a linear progress value (0.0..=1.0) to an eased value.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_midpoint() {
        assert!((EasingFunction::Linear.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_ease_out_cubic_values() {
        let e = EasingFunction::EaseOutCubic;
        assert!((e.apply(0.5) - 0.875).abs() < 1e-6);
        assert!((e.apply(0.25) - 0.578_125).abs() < 1e-6);
        assert!(e.apply(0.1) > 0.1, "ease-out should lead linear early on");
    }

    #[test]
    fn test_endpoints_and_clamping() {
        for easing in [EasingFunction::Linear, EasingFunction::EaseOutCubic] {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing:?} at t=0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at t=1");
            assert!((easing.apply(2.0) - 1.0).abs() < 1e-6, "{easing:?} above range");
            assert!(easing.apply(-1.0).abs() < 1e-6, "{easing:?} below range");
        }
    }

    #[test]
    fn test_ease_out_cubic_is_monotonic() {
        let e = EasingFunction::EaseOutCubic;
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = e.apply(i as f32 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }
}
