//! Run queue and the shared tick loop.
//!
//! A `Timeline` owns the queue of live tweens, the clock, and the easing and
//! filter registries; every tween it creates shares them. One call to `tick`
//! captures `now` once and hands it to every playing tween, so all tweens
//! ticked together perceive identical elapsed time.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log::trace;

use crate::clock::{Clock, SystemClock};
use crate::config::TweenConfig;
use crate::easing::EasingRegistry;
use crate::error::TweenError;
use crate::filters::{FilterRegistry, FilterSet};
use crate::promise::TweenPromise;
use crate::tween::{RunQueue, Tween};

/// Target interval between ticks (~60 Hz).
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// The injected frame-scheduling primitive. The engine depends only on
/// "will eventually signal the next frame", not on exact timing.
pub trait TickDriver {
    /// Block until the next frame is due. Returning false stops the loop.
    fn next_tick(&mut self) -> bool;
}

/// Sleep-based driver ticking at a fixed interval.
#[derive(Debug)]
pub struct SleepDriver {
    interval: Duration,
}

impl SleepDriver {
    pub fn new() -> Self {
        Self::with_interval(Duration::from_secs_f64(FRAME_INTERVAL_MS / 1000.0))
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for SleepDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl TickDriver for SleepDriver {
    fn next_tick(&mut self) -> bool {
        std::thread::sleep(self.interval);
        true
    }
}

/// Result of the fire-and-forget entry point: the deferred-result handle
/// annotated with a back-reference to the instance, so a fire-and-forget
/// tween can still be paused or stopped externally.
pub struct TweenRun {
    pub tween: Tween,
    pub promise: TweenPromise,
}

pub struct Timeline {
    queue: RunQueue,
    clock: Rc<dyn Clock>,
    easing: Rc<RefCell<EasingRegistry>>,
    filters: Rc<RefCell<FilterRegistry>>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self::with_clock(Rc::new(SystemClock::new()))
    }

    /// Build a timeline around an injected time source (see
    /// [`ManualClock`](crate::ManualClock) for deterministic driving).
    pub fn with_clock(clock: Rc<dyn Clock>) -> Self {
        Self {
            queue: Rc::new(RefCell::new(Vec::new())),
            clock,
            easing: Rc::new(RefCell::new(EasingRegistry::new())),
            filters: Rc::new(RefCell::new(FilterRegistry::new())),
        }
    }

    /// Register a named easing curve for every tween on this timeline.
    pub fn register_easing(&self, name: impl Into<String>, f: impl Fn(f64) -> f64 + 'static) {
        self.easing.borrow_mut().register(name, f);
    }

    /// Register a named filter set, applied to every tween on this timeline.
    pub fn register_filters(&self, name: impl Into<String>, set: FilterSet) {
        self.filters.borrow_mut().register(name, set);
    }

    pub fn unregister_filters(&self, name: &str) -> bool {
        self.filters.borrow_mut().unregister(name)
    }

    /// Create an unconfigured tween wired to this timeline's queue, clock,
    /// and registries.
    pub fn new_tween(&self) -> Tween {
        Tween::new(
            self.queue.clone(),
            self.clock.clone(),
            self.easing.clone(),
            self.filters.clone(),
        )
    }

    /// Fire-and-forget entry point: configure and start in one call.
    pub fn tween(&self, config: TweenConfig) -> Result<TweenRun, TweenError> {
        let tween = self.new_tween();
        tween.configure(config)?;
        let promise = tween.start()?;
        Ok(TweenRun { tween, promise })
    }

    /// Number of tweens currently in the run queue (playing or paused).
    pub fn active_count(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    /// Advance every playing tween against the clock's current time.
    pub fn tick(&self) {
        self.tick_at(self.clock.now_ms());
    }

    /// Advance every playing tween against an explicit `now`.
    ///
    /// The queue is walked back-to-front by index: an entry that stops itself
    /// mid-walk (reaching end-of-life during this exact tick) only removes
    /// the slot currently being visited, leaving the indices of not-yet-
    /// visited entries intact. Paused entries are skipped, not evicted.
    pub fn tick_at(&self, now: f64) {
        trace!("tick at {now}ms, {} queued", self.queue.borrow().len());
        let mut index = self.queue.borrow().len();
        while index > 0 {
            index -= 1;
            let entry = {
                let queue = self.queue.borrow();
                match queue.get(index) {
                    Some(tween) => tween.clone(),
                    None => continue,
                }
            };
            if entry.is_playing() {
                entry.tick(now);
            }
        }
    }

    /// Drive repeated ticks from `driver` until the queue drains or the
    /// driver stops. The driver owns cadence; each wait is issued before the
    /// tick's work begins.
    pub fn run(&self, driver: &mut dyn TickDriver) {
        while !self.queue.borrow().is_empty() && driver.next_tick() {
            self.tick();
        }
    }
}

thread_local! {
    static DEFAULT_TIMELINE: Timeline = Timeline::new();
}

/// Configure and start a tween on the thread-local default timeline.
///
/// Convenience only; hosts that drive ticks themselves or need registries
/// should build their own [`Timeline`].
pub fn tween(config: TweenConfig) -> Result<TweenRun, TweenError> {
    DEFAULT_TIMELINE.with(|timeline| timeline.tween(config))
}

/// Run `f` against the thread-local default timeline (e.g. to tick it or
/// register curves for [`tween`]).
pub fn with_default_timeline<R>(f: impl FnOnce(&Timeline) -> R) -> R {
    DEFAULT_TIMELINE.with(f)
}
