//! Easing curves and time-driven tweens.

use cords_core::EasingKind;

/// Bisection steps used to invert the x axis of a bezier curve.
const BISECTION_STEPS: usize = 24;

/// Map a time fraction in `[0, 1]` to a progress fraction under `kind`.
///
/// Inputs outside the unit range are clamped, NaN is treated as 0. Every
/// curve maps 0 to 0 and 1 to 1 exactly and is non-decreasing in between.
pub fn ease(t: f32, kind: EasingKind) -> f32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

    match kind.control_points() {
        None => t,
        Some((x1, y1, x2, y2)) => cubic_bezier(x1, y1, x2, y2, t),
    }
}

/// Evaluate a CSS-style cubic bezier easing at `x`.
///
/// The end points are fixed at (0, 0) and (1, 1). The curve's x component
/// is monotonic for control x values in `[0, 1]`, so bisection always
/// converges on the single matching parameter.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let mut lo = 0.0_f32;
    let mut hi = 1.0_f32;
    for _ in 0..BISECTION_STEPS {
        let mid = (lo + hi) * 0.5;
        if bezier_axis(x1, x2, mid) < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    bezier_axis(y1, y2, (lo + hi) * 0.5).clamp(0.0, 1.0)
}

/// One axis of a cubic bezier with end points 0 and 1.
fn bezier_axis(p1: f32, p2: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

/// A single running interpolation from `start` to `target`.
///
/// The value only ever moves toward the target and is pinned there once
/// the duration has elapsed, after which the tween is finished for good.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    start: f32,
    target: f32,
    duration_ms: u64,
    easing: EasingKind,
    started_at_ms: u64,
    value: f32,
    finished: bool,
}

impl Tween {
    /// Create a tween that starts at time zero.
    pub fn new(start: f32, target: f32, duration_ms: u64, easing: EasingKind) -> Self {
        Self {
            start,
            target,
            duration_ms,
            easing,
            started_at_ms: 0,
            value: start,
            finished: false,
        }
    }

    /// Anchor the tween's clock at `now_ms`.
    pub fn starting_at(mut self, now_ms: u64) -> Self {
        self.started_at_ms = now_ms;
        self
    }

    /// Advance the tween to `now_ms` and return the current value.
    pub fn update(&mut self, now_ms: u64) -> f32 {
        if self.finished {
            return self.value;
        }

        let elapsed = now_ms.saturating_sub(self.started_at_ms);
        if elapsed >= self.duration_ms {
            self.value = self.target;
            self.finished = true;
            return self.value;
        }

        let t = elapsed as f32 / self.duration_ms as f32;
        let next = self.start + (self.target - self.start) * ease(t, self.easing);

        self.value = if self.target >= self.start {
            next.clamp(self.value, self.target)
        } else {
            next.clamp(self.target, self.value)
        };
        self.value
    }

    /// Current value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Whether the value has reached its target.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [EasingKind; 3] = [
        EasingKind::Linear,
        EasingKind::FastOutLinearIn,
        EasingKind::FastOutSlowIn,
    ];

    #[test]
    fn test_ease_end_points() {
        for kind in ALL_KINDS {
            assert_eq!(ease(0.0, kind), 0.0, "{kind:?}");
            assert_eq!(ease(1.0, kind), 1.0, "{kind:?}");
        }
    }

    #[test]
    fn test_ease_is_monotonic() {
        for kind in ALL_KINDS {
            let mut prev = 0.0;
            for i in 0..=200 {
                let v = ease(i as f32 / 200.0, kind);
                assert!(v >= prev, "{kind:?} decreased at step {i}");
                assert!((0.0..=1.0).contains(&v));
                prev = v;
            }
        }
    }

    #[test]
    fn test_ease_clamps_out_of_range() {
        assert_eq!(ease(-0.5, EasingKind::Linear), 0.0);
        assert_eq!(ease(1.5, EasingKind::FastOutLinearIn), 1.0);
        assert_eq!(ease(f32::NAN, EasingKind::Linear), 0.0);
        assert!((ease(0.25, EasingKind::Linear) - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_fast_out_linear_in_lags_linear() {
        // Accelerating curve stays below the diagonal in the middle.
        let mid = ease(0.5, EasingKind::FastOutLinearIn);
        assert!(mid < 0.5, "got {mid}");
        assert!(mid > 0.0);
    }

    #[test]
    fn test_tween_pins_to_target() {
        let mut tween = Tween::new(0.0, 100.0, 400, EasingKind::Linear).starting_at(1_000);
        assert_eq!(tween.update(1_000), 0.0);
        assert!((tween.update(1_200) - 50.0).abs() < 1e-3);
        assert!(!tween.is_finished());
        assert_eq!(tween.update(1_400), 100.0);
        assert!(tween.is_finished());
        assert_eq!(tween.update(5_000), 100.0);
    }

    #[test]
    fn test_tween_never_moves_backwards() {
        let mut tween = Tween::new(-20.0, 100.0, 500, EasingKind::Linear);
        let late = tween.update(250);
        let early = tween.update(100);
        assert_eq!(late, early);
        assert!((late - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let mut tween = Tween::new(0.0, 1.0, 0, EasingKind::FastOutSlowIn);
        assert_eq!(tween.update(0), 1.0);
        assert!(tween.is_finished());
    }
}
