//! Deferred-result handle for awaiting tween completion.
//!
//! A fresh handle is created at configure time only; every `start`/`resume`
//! of the same un-stopped tween returns the same handle, and a reconfigured
//! instance gets a new one. Rejection models normal cancellation
//! (`stop(false)`), not a fault; an unobserved rejection is silent.

use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::state::TweenState;

pub type SettleFn = Box<dyn FnOnce(&TweenState, Option<&JsonValue>)>;

/// Final result of a tween run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TweenOutcome {
    /// True when the tween reached its target (naturally or via `stop(true)`);
    /// false when it was cancelled mid-flight.
    pub completed: bool,
    /// Current state at settle time: the target on completion, the in-flight
    /// values on cancellation.
    pub state: TweenState,
    /// The caller-supplied attachment, if any.
    pub attachment: Option<JsonValue>,
}

#[derive(Default)]
struct PromiseInner {
    outcome: Option<TweenOutcome>,
    on_resolve: Vec<SettleFn>,
    on_reject: Vec<SettleFn>,
}

/// Cloneable handle settled exactly once by the engine.
#[derive(Clone, Default)]
pub struct TweenPromise {
    inner: Rc<RefCell<PromiseInner>>,
}

impl std::fmt::Debug for TweenPromise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenPromise")
            .field("outcome", &self.inner.borrow().outcome)
            .finish()
    }
}

impl TweenPromise {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_settled(&self) -> bool {
        self.inner.borrow().outcome.is_some()
    }

    pub fn outcome(&self) -> Option<TweenOutcome> {
        self.inner.borrow().outcome.clone()
    }

    /// True when both handles refer to the same underlying deferred result.
    pub fn same_handle(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Observe completion. Fires immediately if already resolved.
    pub fn on_resolve(&self, cb: impl FnOnce(&TweenState, Option<&JsonValue>) + 'static) {
        self.observe(true, Box::new(cb));
    }

    /// Observe cancellation. Fires immediately if already rejected.
    pub fn on_reject(&self, cb: impl FnOnce(&TweenState, Option<&JsonValue>) + 'static) {
        self.observe(false, Box::new(cb));
    }

    fn observe(&self, on_completed: bool, cb: SettleFn) {
        let settled = self.inner.borrow().outcome.clone();
        match settled {
            Some(outcome) => {
                if outcome.completed == on_completed {
                    cb(&outcome.state, outcome.attachment.as_ref());
                }
            }
            None => {
                let mut inner = self.inner.borrow_mut();
                if on_completed {
                    inner.on_resolve.push(cb);
                } else {
                    inner.on_reject.push(cb);
                }
            }
        }
    }

    pub(crate) fn resolve(&self, state: TweenState, attachment: Option<JsonValue>) {
        self.settle(true, state, attachment);
    }

    pub(crate) fn reject(&self, state: TweenState, attachment: Option<JsonValue>) {
        self.settle(false, state, attachment);
    }

    fn settle(&self, completed: bool, state: TweenState, attachment: Option<JsonValue>) {
        let (callbacks, outcome) = {
            let mut inner = self.inner.borrow_mut();
            if inner.outcome.is_some() {
                // already settled; later settles are no-ops
                return;
            }
            let outcome = TweenOutcome {
                completed,
                state,
                attachment,
            };
            inner.outcome = Some(outcome.clone());
            let callbacks = if completed {
                mem::take(&mut inner.on_resolve)
            } else {
                mem::take(&mut inner.on_reject)
            };
            inner.on_resolve.clear();
            inner.on_reject.clear();
            (callbacks, outcome)
        };
        for cb in callbacks {
            cb(&outcome.state, outcome.attachment.as_ref());
        }
    }
}
