//! Tween execution engine (host-agnostic).
//!
//! Given a starting set of named numeric properties, a target set, a duration,
//! and a per-property easing curve, a [`Tween`] produces a continuously
//! updated current state transitioning smoothly from start to target, firing a
//! caller-supplied step callback once per scheduling tick. A [`Timeline`] owns
//! the run queue, the shared clock, and the easing/filter registries, and is
//! typically ticked once per display refresh.
//!
//! The crate never touches pixels or a scene graph: state is an opaque mapping
//! of property names to numbers, and applying it is the host's job.

pub mod clock;
pub mod config;
pub mod easing;
pub mod error;
pub mod filters;
pub mod interp;
pub mod promise;
pub mod state;
pub mod timeline;
pub mod tween;

// Re-exports for consumers (adapters)
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{StartFn, StepFn, TweenConfig, DEFAULT_DURATION_MS};
pub use easing::{
    compose, CurveRef, EasingFn, EasingMap, EasingRegistry, EasingSpec, DEFAULT_EASING,
};
pub use error::TweenError;
pub use filters::{FilterContext, FilterHook, FilterRegistry, FilterSet, HookFn};
pub use interp::{tween_property, tween_state};
pub use promise::{TweenOutcome, TweenPromise};
pub use state::TweenState;
pub use timeline::{
    tween, with_default_timeline, SleepDriver, TickDriver, Timeline, TweenRun, FRAME_INTERVAL_MS,
};
pub use tween::Tween;
