//! Tween configuration.

use serde_json::Value as JsonValue;

use crate::easing::EasingSpec;
use crate::state::TweenState;

/// Duration used when a config does not specify one.
pub const DEFAULT_DURATION_MS: f64 = 500.0;

/// Fired once when the tween starts, with the initial state and attachment.
pub type StartFn = Box<dyn FnMut(&TweenState, Option<&JsonValue>)>;

/// Fired once per tick with the current state, the attachment, and the offset
/// in milliseconds by which this tick overshot the ideal end (useful for
/// caller-side extrapolation/smoothing).
pub type StepFn = Box<dyn FnMut(&TweenState, Option<&JsonValue>, f64)>;

/// Configuration applied by [`Tween::configure`](crate::Tween::configure).
///
/// `from` defaults to the tween's current state; any tracked key absent from
/// `to` keeps its current value as its destination. `duration` and `delay`
/// are milliseconds and must be finite and non-negative.
pub struct TweenConfig {
    /// Opaque caller value carried through callbacks and the final outcome.
    pub attachment: Option<JsonValue>,
    pub delay: f64,
    pub duration: f64,
    pub easing: EasingSpec,
    pub from: Option<TweenState>,
    pub to: Option<TweenState>,
    pub start: Option<StartFn>,
    pub step: Option<StepFn>,
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self {
            attachment: None,
            delay: 0.0,
            duration: DEFAULT_DURATION_MS,
            easing: EasingSpec::default(),
            from: None,
            to: None,
            start: None,
            step: None,
        }
    }
}
