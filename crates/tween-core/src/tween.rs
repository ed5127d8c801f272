//! Per-tween state machine.
//!
//! Lifecycle: unconfigured → configured → playing ⇄ paused → ended; a stopped
//! instance is reusable via configure + start. A `Tween` is a cheap cloneable
//! handle; the run queue holds clones of it, and membership there is the sole
//! source of truth for tick eligibility.
//!
//! Everything is single-threaded and tick-driven. Step callbacks, filter
//! hooks, and promise observers all run while the instance is borrowed, so
//! none of them may call back into the same tween; observers are handed the
//! final state directly and should work from that.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::debug;
use serde_json::Value as JsonValue;

use crate::clock::Clock;
use crate::config::{StartFn, StepFn, TweenConfig, DEFAULT_DURATION_MS};
use crate::easing::{compose, EasingMap, EasingRegistry};
use crate::error::TweenError;
use crate::filters::{FilterContext, FilterHook, FilterRegistry};
use crate::interp::tween_state;
use crate::promise::TweenPromise;
use crate::state::TweenState;

pub(crate) type RunQueue = Rc<RefCell<Vec<Tween>>>;

/// Handle to one interpolation task. Created by
/// [`Timeline::new_tween`](crate::Timeline::new_tween).
#[derive(Clone)]
pub struct Tween {
    pub(crate) inner: Rc<RefCell<TweenInner>>,
}

pub(crate) struct TweenInner {
    self_ref: Weak<RefCell<TweenInner>>,
    queue: RunQueue,
    clock: Rc<dyn Clock>,
    easing_registry: Rc<RefCell<EasingRegistry>>,
    filters: Rc<RefCell<FilterRegistry>>,

    configured: bool,
    attachment: Option<JsonValue>,
    delay: f64,
    duration: f64,
    start_cb: Option<StartFn>,
    step_cb: Option<StepFn>,

    current: TweenState,
    original: TweenState,
    target: TweenState,
    easing: EasingMap,

    /// Clock-ms at which the tween logically began; shifted forward on resume
    /// by the paused span so elapsed-time accounting ignores pauses.
    timestamp: f64,
    is_tweening: bool,
    is_paused: bool,
    paused_at: Option<f64>,
    promise: TweenPromise,
}

impl Tween {
    pub(crate) fn new(
        queue: RunQueue,
        clock: Rc<dyn Clock>,
        easing_registry: Rc<RefCell<EasingRegistry>>,
        filters: Rc<RefCell<FilterRegistry>>,
    ) -> Self {
        Tween {
            inner: Rc::new_cyclic(|weak| {
                RefCell::new(TweenInner {
                    self_ref: weak.clone(),
                    queue,
                    clock,
                    easing_registry,
                    filters,
                    configured: false,
                    attachment: None,
                    delay: 0.0,
                    duration: DEFAULT_DURATION_MS,
                    start_cb: None,
                    step_cb: None,
                    current: TweenState::new(),
                    original: TweenState::new(),
                    target: TweenState::new(),
                    easing: EasingMap::new(),
                    timestamp: 0.0,
                    is_tweening: false,
                    is_paused: false,
                    paused_at: None,
                    promise: TweenPromise::new(),
                })
            }),
        }
    }

    /// Apply a configuration, fixing the tracked key set and creating a fresh
    /// promise handle. Re-entrant before `start`: calling again simply
    /// overwrites the previous configuration.
    pub fn configure(&self, config: TweenConfig) -> Result<TweenPromise, TweenError> {
        self.inner.borrow_mut().configure(config)
    }

    /// Begin playing. No-op returning the existing promise when already
    /// playing; auto-configures with defaults when never configured.
    pub fn start(&self) -> Result<TweenPromise, TweenError> {
        self.inner.borrow_mut().start()
    }

    /// Freeze the timeline at the current position.
    pub fn pause(&self) {
        self.inner.borrow_mut().pause();
    }

    /// Continue after a pause. Idempotent: every resume of an un-stopped
    /// tween returns the same promise handle. On a never-started or stopped
    /// instance this is a no-op (starting is `configure` + `start`'s job).
    pub fn resume(&self) -> TweenPromise {
        self.inner.borrow_mut().resume()
    }

    /// Jump to `ms` into the tween (clamped to ≥ 0). When the tween is not
    /// playing this forces one synchronous tick, so step callbacks and hooks
    /// fire, and then restores the not-running state: a paused tween stays
    /// paused, a never-started one stays unstarted, and a seek past the end
    /// completes the tween.
    pub fn seek(&self, ms: f64) {
        self.inner.borrow_mut().seek(ms);
    }

    /// Halt and leave the run queue. With `goto_end` the state snaps to the
    /// target and the promise resolves; otherwise the state freezes in place
    /// and the promise rejects (normal cancellation, not a fault).
    pub fn stop(&self, goto_end: bool) {
        self.inner.borrow_mut().stop(goto_end);
    }

    pub fn is_playing(&self) -> bool {
        let inner = self.inner.borrow();
        inner.is_tweening && !inner.is_paused
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> TweenState {
        self.inner.borrow().current.clone()
    }

    /// Overwrite current-state entries with `patch`.
    pub fn set_state(&self, patch: &TweenState) {
        self.inner.borrow_mut().current.apply(patch);
    }

    /// The deferred-result handle created by the last configure.
    pub fn promise(&self) -> TweenPromise {
        self.inner.borrow().promise.clone()
    }

    /// Clear all instance fields for reclamation. Errors if the tween is
    /// still queued (playing or paused); stop it first.
    pub fn dispose(&self) -> Result<(), TweenError> {
        self.inner.borrow_mut().dispose()
    }

    pub(crate) fn tick(&self, now: f64) {
        self.inner.borrow_mut().tick(now);
    }
}

impl TweenInner {
    fn is_playing(&self) -> bool {
        self.is_tweening && !self.is_paused
    }

    fn configure(&mut self, config: TweenConfig) -> Result<TweenPromise, TweenError> {
        if !config.duration.is_finite() || config.duration < 0.0 {
            return Err(TweenError::InvalidDuration(config.duration));
        }
        if !config.delay.is_finite() || config.delay < 0.0 {
            return Err(TweenError::InvalidDelay(config.delay));
        }
        let TweenConfig {
            attachment,
            delay,
            duration,
            easing,
            from,
            to,
            start,
            step,
        } = config;

        self.attachment = attachment;
        self.delay = delay;
        self.duration = duration;
        self.start_cb = start;
        self.step_cb = step;

        if let Some(from) = from {
            self.current = from;
        }
        if let Some(to) = to.as_ref() {
            // keys present only in `to` join the tracked set at their
            // destination value, so every property has both ends defined
            for (key, value) in to.iter() {
                if !self.current.contains(key) {
                    self.current.set(key, value);
                }
            }
        }
        self.original = self.current.clone();
        self.target = match to {
            Some(to) => self.current.merged_with(&to),
            None => self.current.clone(),
        };

        let registry = self.easing_registry.borrow();
        self.easing = compose(&self.current, &easing, &registry)?;
        drop(registry);

        self.promise = TweenPromise::new();
        self.configured = true;

        self.apply_filter(FilterHook::TweenCreated);
        Ok(self.promise.clone())
    }

    fn start(&mut self) -> Result<TweenPromise, TweenError> {
        if self.is_playing() {
            // a started-twice call must not double-queue
            return Ok(self.promise.clone());
        }
        if !self.configured {
            self.configure(TweenConfig::default())?;
        }
        self.timestamp = self.clock.now_ms();
        self.is_paused = false;
        self.paused_at = None;
        debug!(
            "tween start: duration={}ms delay={}ms properties={}",
            self.duration,
            self.delay,
            self.current.len()
        );
        if let Some(cb) = self.start_cb.as_mut() {
            cb(&self.current, self.attachment.as_ref());
        }
        self.is_tweening = true;
        Ok(self.resume())
    }

    fn resume(&mut self) -> TweenPromise {
        if !self.is_tweening {
            // never started or already stopped; entering the queue is
            // configure + start's job
            return self.promise.clone();
        }
        if let Some(paused_at) = self.paused_at.take() {
            // the timeline freezes while paused: shift the logical start
            // forward by exactly the paused span
            let now = self.clock.now_ms();
            self.timestamp += now - paused_at;
        }
        self.is_paused = false;
        self.enqueue();
        self.promise.clone()
    }

    fn pause(&mut self) {
        if self.is_paused {
            return;
        }
        self.paused_at = Some(self.clock.now_ms());
        self.is_paused = true;
        debug!("tween paused");
    }

    fn seek(&mut self, ms: f64) {
        let ms = ms.max(0.0);
        let now = self.clock.now_ms();
        let new_timestamp = now - ms;
        if new_timestamp == self.timestamp {
            return;
        }
        self.timestamp = new_timestamp;
        if !self.is_playing() {
            // drive one synchronous tick so current state, hooks, and step
            // callbacks all advance, then restore the not-running state
            let was_tweening = self.is_tweening;
            self.is_tweening = true;
            self.is_paused = false;
            self.tick(now);
            if !self.is_tweening {
                // the forced tick crossed the end and stopped the tween
                return;
            }
            if was_tweening {
                self.pause();
            } else {
                // never started: flags and queue membership stay unstarted
                self.is_tweening = false;
            }
        }
    }

    fn stop(&mut self, goto_end: bool) {
        self.is_tweening = false;
        self.is_paused = false;
        self.paused_at = None;
        self.dequeue();
        if goto_end {
            debug!("tween complete");
            self.apply_filter(FilterHook::BeforeTween);
            // position-1 pass: for curves honoring f(1) = 1 the eased result
            // is the target itself, assigned directly so the landing is exact
            self.current = self.target.clone();
            self.apply_filter(FilterHook::AfterTween);
            self.apply_filter(FilterHook::AfterTweenEnd);
            self.promise
                .resolve(self.current.clone(), self.attachment.clone());
        } else {
            debug!("tween cancelled");
            self.promise
                .reject(self.current.clone(), self.attachment.clone());
        }
    }

    /// One step of the core algorithm, against the shared per-loop `now`.
    fn tick(&mut self, now: f64) {
        let end_time = self.timestamp + self.delay + self.duration;
        let current_time = now.min(end_time);
        let has_ended = current_time >= end_time;
        // ms by which this tick overshot the ideal end
        let offset = self.duration - (end_time - current_time);

        if has_ended {
            if let Some(cb) = self.step_cb.as_mut() {
                cb(&self.target, self.attachment.as_ref(), offset);
            }
            self.stop(true);
            return;
        }

        self.apply_filter(FilterHook::BeforeTween);
        if current_time < self.timestamp + self.delay {
            // inside the delay window: degenerate time values force position
            // 0, holding the state at the original values
            tween_state(
                0.0,
                &mut self.current,
                &self.original,
                &self.target,
                1.0,
                1.0,
                &self.easing,
            );
        } else {
            if self.delay > 0.0 {
                // fold the delay into the start timestamp once; subsequent
                // ticks compute position purely from the post-delay window
                self.timestamp += self.delay;
                self.delay = 0.0;
            }
            tween_state(
                current_time,
                &mut self.current,
                &self.original,
                &self.target,
                self.duration,
                self.timestamp,
                &self.easing,
            );
        }
        self.apply_filter(FilterHook::AfterTween);
        if let Some(cb) = self.step_cb.as_mut() {
            cb(&self.current, self.attachment.as_ref(), offset);
        }
    }

    fn dispose(&mut self) -> Result<(), TweenError> {
        if self.is_tweening {
            return Err(TweenError::DisposedWhilePlaying);
        }
        self.configured = false;
        self.attachment = None;
        self.delay = 0.0;
        self.duration = DEFAULT_DURATION_MS;
        self.start_cb = None;
        self.step_cb = None;
        self.current.clear();
        self.original.clear();
        self.target.clear();
        self.easing.clear();
        self.timestamp = 0.0;
        self.paused_at = None;
        self.promise = TweenPromise::new();
        Ok(())
    }

    fn enqueue(&self) {
        if let Some(me) = self.self_ref.upgrade() {
            let mut queue = self.queue.borrow_mut();
            if !queue.iter().any(|t| Rc::ptr_eq(&t.inner, &me)) {
                // most-recently-started first
                queue.insert(0, Tween { inner: me });
            }
        }
    }

    fn dequeue(&self) {
        let me = self.self_ref.as_ptr();
        self.queue
            .borrow_mut()
            .retain(|t| Rc::as_ptr(&t.inner) != me);
    }

    fn apply_filter(&mut self, hook: FilterHook) {
        let mut ctx = FilterContext {
            current: &mut self.current,
            original: &self.original,
            target: &mut self.target,
            easing: &self.easing,
        };
        self.filters.borrow_mut().apply(hook, &mut ctx);
    }
}
