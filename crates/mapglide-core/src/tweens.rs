//! Generic tweening/interpolation types.

use keyframe::{ease, functions};
use serde::{Deserialize, Serialize};

/// Easing function type for animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EaseType {
    /// Constant speed interpolation
    #[default]
    Linear,
    /// Slow start, fast end
    EaseIn,
    /// Fast start, slow end
    EaseOut,
    /// Slow start and end, fast middle
    EaseInOut,
    /// Quadratic ease out
    QuadOut,
    /// Quadratic ease in and out, used for camera flights
    QuadInOut,
    /// Cubic ease out
    CubicOut,
}

impl EaseType {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    pub fn apply(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            EaseType::Linear => ease(functions::Linear, 0.0, 1.0, t),
            EaseType::EaseIn => ease(functions::EaseIn, 0.0, 1.0, t),
            EaseType::EaseOut => ease(functions::EaseOut, 0.0, 1.0, t),
            EaseType::EaseInOut => ease(functions::EaseInOut, 0.0, 1.0, t),
            EaseType::QuadOut => ease(functions::EaseOutQuad, 0.0, 1.0, t),
            EaseType::QuadInOut => ease(functions::EaseInOutQuad, 0.0, 1.0, t),
            EaseType::CubicOut => ease(functions::EaseOutCubic, 0.0, 1.0, t),
        }
    }
}

/// Trait for types that can be interpolated (tweened).
pub trait Tweenable: Copy {
    /// Interpolation between two values.
    /// `t` should be 0.0 to 1.0, where 0.0 returns `a` and 1.0 returns `b`.
    fn lerp(a: Self, b: Self, t: f64) -> Self;
}

impl Tweenable for f64 {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Tweenable for [f64; 2] {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        [f64::lerp(a[0], b[0], t), f64::lerp(a[1], b[1], t)]
    }
}

/// A value that moves from a start to a target over a fixed duration.
///
/// Completion always lands exactly on the target, so callers can compare the final
/// value against the requested target without a tolerance.
#[derive(Debug, Clone)]
pub struct AnimatedValue<T: Tweenable> {
    /// Current interpolated value
    current: T,
    /// Starting value for current animation
    start: T,
    /// Target value to animate toward
    target: T,
    /// Elapsed time in current animation (seconds)
    elapsed: f64,
    /// Total duration of current animation (seconds)
    duration: f64,
    easing: EaseType,
}

impl<T: Tweenable> AnimatedValue<T> {
    /// Create a new animated value resting at `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            current: initial,
            start: initial,
            target: initial,
            elapsed: 0.0,
            duration: 0.0,
            easing: EaseType::Linear,
        }
    }

    /// Start animating from the current value toward `target`.
    ///
    /// # Arguments
    /// * `target` - The value to animate toward
    /// * `duration` - How long the animation should take (seconds)
    /// * `easing` - The easing function to use
    pub fn animate_to(&mut self, target: T, duration: f64, easing: EaseType) {
        self.start = self.current;
        self.target = target;
        self.elapsed = 0.0;
        self.duration = if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        };
        self.easing = easing;
    }

    /// Set the value immediately without animation.
    pub fn set_immediate(&mut self, value: T) {
        self.current = value;
        self.start = value;
        self.target = value;
        self.elapsed = 0.0;
        self.duration = 0.0;
    }

    /// Advance the animation by `dt` seconds.
    ///
    /// Returns `true` if the animation is still in progress, `false` if complete.
    pub fn update(&mut self, dt: f64) -> bool {
        if self.duration <= 0.0 {
            self.current = self.target;
            return false;
        }

        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }

        if self.elapsed >= self.duration {
            self.current = self.target;
            self.elapsed = self.duration;
            return false;
        }

        let eased_t = self.easing.apply(self.elapsed / self.duration);
        self.current = T::lerp(self.start, self.target, eased_t);
        true
    }

    /// Get the current interpolated value.
    pub fn value(&self) -> T {
        self.current
    }

    /// Get the value the current animation started from.
    pub fn start(&self) -> T {
        self.start
    }

    /// Get the target value.
    pub fn target(&self) -> T {
        self.target
    }

    /// Check if the animation is currently in progress.
    pub fn is_animating(&self) -> bool {
        self.elapsed < self.duration && self.duration > 0.0
    }

    /// Normalized, un-eased progress in [0, 1]. Zero-length animations report 1.
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Get remaining animation time in seconds.
    pub fn remaining(&self) -> f64 {
        (self.duration - self.elapsed).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animated_value_linear() {
        let mut val = AnimatedValue::new(0.0f64);
        val.animate_to(100.0, 1.0, EaseType::Linear);

        // At t=0, should be at start
        assert!((val.value() - 0.0).abs() < 0.01);

        val.update(0.5);
        assert!((val.value() - 50.0).abs() < 1.0);

        val.update(0.5);
        assert_eq!(val.value(), 100.0);
        assert!(!val.is_animating());
    }

    #[test]
    fn test_animated_value_immediate() {
        let mut val = AnimatedValue::new(0.0f64);
        val.set_immediate(50.0);
        assert_eq!(val.value(), 50.0);
        assert!(!val.is_animating());
        assert_eq!(val.progress(), 1.0);
    }

    #[test]
    fn test_animated_value_pair() {
        let mut val = AnimatedValue::new([0.0f64, 0.0]);
        val.animate_to([100.0, 200.0], 1.0, EaseType::Linear);

        val.update(0.5);
        let v = val.value();
        assert!((v[0] - 50.0).abs() < 1.0);
        assert!((v[1] - 100.0).abs() < 1.0);
    }

    #[test]
    fn test_quad_in_out_is_symmetric() {
        let ease = EaseType::QuadInOut;
        assert!(ease.apply(0.0).abs() < 1e-9);
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-9);
        assert!((ease.apply(0.5) - 0.5).abs() < 1e-6);
        // Slow start, slow finish
        assert!(ease.apply(0.25) < 0.25);
        assert!(ease.apply(0.75) > 0.75);
    }

    #[test]
    fn test_ease_out_faster_at_start() {
        let mut val_linear = AnimatedValue::new(0.0f64);
        let mut val_ease_out = AnimatedValue::new(0.0f64);

        val_linear.animate_to(100.0, 1.0, EaseType::Linear);
        val_ease_out.animate_to(100.0, 1.0, EaseType::QuadOut);

        val_linear.update(0.25);
        val_ease_out.update(0.25);

        assert!(val_ease_out.value() > val_linear.value());
    }

    #[test]
    fn test_retarget_starts_from_current_value() {
        let mut val = AnimatedValue::new(0.0f64);
        val.animate_to(100.0, 1.0, EaseType::Linear);
        val.update(0.5);
        let midway = val.value();

        val.animate_to(-10.0, 2.0, EaseType::Linear);
        assert_eq!(val.start(), midway);
        assert_eq!(val.progress(), 0.0);
        assert!((val.remaining() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_bad_dt_does_not_advance() {
        let mut val = AnimatedValue::new(0.0f64);
        val.animate_to(1.0, 1.0, EaseType::Linear);
        assert!(val.update(-1.0));
        assert!(val.update(f64::NAN));
        assert_eq!(val.value(), 0.0);
    }
}
