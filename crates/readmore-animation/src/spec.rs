use crate::Easing;
use std::time::Duration;

/// How long a height transition runs for a given pixel delta.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DurationPolicy {
    Fixed(Duration),
    /// `per_pixel × |delta|`, capped at `max`.
    Proportional { per_pixel: Duration, max: Duration },
}

impl DurationPolicy {
    pub fn duration_for(&self, delta: f32) -> Duration {
        match *self {
            DurationPolicy::Fixed(duration) => duration,
            DurationPolicy::Proportional { per_pixel, max } => {
                let delta = f64::from(delta.abs());
                if !delta.is_finite() {
                    return max;
                }
                let nanos = per_pixel.as_nanos() as f64 * delta;
                let capped = nanos.min(max.as_nanos() as f64);
                Duration::from_nanos(capped.round() as u64)
            }
        }
    }
}

impl Default for DurationPolicy {
    fn default() -> Self {
        DurationPolicy::Proportional {
            per_pixel: Duration::from_millis(2),
            max: Duration::from_millis(300),
        }
    }
}

/// Curve and duration strategy for expand/collapse transitions.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct AnimationSpec {
    pub easing: Easing,
    pub duration: DurationPolicy,
}

impl AnimationSpec {
    /// Fixed-length transition with the given curve.
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self {
            easing,
            duration: DurationPolicy::Fixed(duration),
        }
    }

    /// Transition that completes on the first frame.
    pub fn snap() -> Self {
        Self::tween(Duration::ZERO, Easing::Linear)
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_duration(mut self, duration: DurationPolicy) -> Self {
        self.duration = duration;
        self
    }

    pub fn duration_between(&self, from: f32, to: f32) -> Duration {
        self.duration.duration_for(to - from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_duration_is_two_millis_per_pixel() {
        let spec = AnimationSpec::default();
        assert_eq!(spec.duration_between(60.0, 100.0), Duration::from_millis(80));
        assert_eq!(spec.duration_between(100.0, 60.0), Duration::from_millis(80));
    }

    #[test]
    fn default_duration_caps_at_300_millis() {
        let spec = AnimationSpec::default();
        assert_eq!(spec.duration_between(0.0, 150.0), Duration::from_millis(300));
        assert_eq!(spec.duration_between(0.0, 5_000.0), Duration::from_millis(300));
        assert_eq!(
            spec.duration_between(0.0, f32::INFINITY),
            Duration::from_millis(300)
        );
    }

    #[test]
    fn no_delta_means_no_duration() {
        assert_eq!(AnimationSpec::default().duration_between(42.0, 42.0), Duration::ZERO);
    }

    #[test]
    fn fixed_policy_ignores_delta() {
        let spec = AnimationSpec::tween(Duration::from_millis(120), Easing::Linear);
        assert_eq!(spec.duration_between(0.0, 1.0), Duration::from_millis(120));
        assert_eq!(spec.duration_between(0.0, 900.0), Duration::from_millis(120));
    }
}
