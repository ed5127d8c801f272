//! Interpolation math.
//!
//! `tween_property` is the single-value primitive; `tween_state` batch-applies
//! it across every tracked property of a state object, in place.

use crate::easing::EasingMap;
use crate::state::TweenState;

/// Interpolate one value: `start + (end - start) * easing(position)`.
///
/// Pure and unclamped; positions outside [0, 1] extrapolate. Callers clamp
/// when they want clamped behavior.
#[inline]
pub fn tween_property(start: f64, end: f64, easing: impl Fn(f64) -> f64, position: f64) -> f64 {
    start + (end - start) * easing(position)
}

/// Advance every property of `current` to its value at `for_time`.
///
/// `position` is 0 before `start_time` and `(for_time - start_time) /
/// duration` afterwards; avoiding a zero `duration` is the caller's job
/// (instantaneous snaps pass `duration = 1`). Properties missing from the
/// easing map fall back to linear; composition makes the map total, so that
/// path only exists as a guard.
pub fn tween_state(
    for_time: f64,
    current: &mut TweenState,
    original: &TweenState,
    target: &TweenState,
    duration: f64,
    start_time: f64,
    easing: &EasingMap,
) {
    let position = if for_time < start_time {
        0.0
    } else {
        (for_time - start_time) / duration
    };
    for (key, slot) in current.iter_mut() {
        let from = original.get(key).unwrap_or(*slot);
        let to = target.get(key).unwrap_or(from);
        *slot = match easing.get(key) {
            Some(f) => tween_property(from, to, |t| f(t), position),
            None => tween_property(from, to, |t| t, position),
        };
    }
}
