//! Filter hooks: named extension points in the tick pipeline.
//!
//! Collaborators register a named `FilterSet` against a timeline; each set may
//! carry a callback for any of the four hook points. Hooks run synchronously
//! in registration order with the tween's live state references and are
//! expected to mutate them in place (clamp, round, transform). There is no
//! isolation between sets: a later filter sees an earlier filter's mutations.

use std::fmt;

use crate::easing::EasingMap;
use crate::state::TweenState;

/// Live references handed to a hook callback.
pub struct FilterContext<'a> {
    pub current: &'a mut TweenState,
    pub original: &'a TweenState,
    pub target: &'a mut TweenState,
    pub easing: &'a EasingMap,
}

pub type HookFn = Box<dyn FnMut(&mut FilterContext<'_>)>;

/// The four hook points, in pipeline order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterHook {
    /// Fired once at configure time.
    TweenCreated,
    /// Fired each tick before interpolation.
    BeforeTween,
    /// Fired each tick after interpolation, before the step callback.
    AfterTween,
    /// Fired once when the tween completes (naturally or via `stop(true)`).
    AfterTweenEnd,
}

/// One collaborator's callbacks, any subset of the four hooks.
#[derive(Default)]
pub struct FilterSet {
    pub tween_created: Option<HookFn>,
    pub before_tween: Option<HookFn>,
    pub after_tween: Option<HookFn>,
    pub after_tween_end: Option<HookFn>,
}

impl FilterSet {
    fn hook_mut(&mut self, hook: FilterHook) -> Option<&mut HookFn> {
        match hook {
            FilterHook::TweenCreated => self.tween_created.as_mut(),
            FilterHook::BeforeTween => self.before_tween.as_mut(),
            FilterHook::AfterTween => self.after_tween.as_mut(),
            FilterHook::AfterTweenEnd => self.after_tween_end.as_mut(),
        }
    }
}

impl fmt::Debug for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSet")
            .field("tween_created", &self.tween_created.is_some())
            .field("before_tween", &self.before_tween.is_some())
            .field("after_tween", &self.after_tween.is_some())
            .field("after_tween_end", &self.after_tween_end.is_some())
            .finish()
    }
}

/// Ordered collection of named filter sets. Applies to every tween on the
/// owning timeline; there is no per-instance opt-out.
#[derive(Debug, Default)]
pub struct FilterRegistry {
    sets: Vec<(String, FilterSet)>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a set under `name`. Re-registering an existing name replaces
    /// that set in place, keeping its position in the invocation order.
    pub fn register(&mut self, name: impl Into<String>, set: FilterSet) {
        let name = name.into();
        match self.sets.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = set,
            None => self.sets.push((name, set)),
        }
    }

    /// Remove the set registered under `name`, if any.
    pub fn unregister(&mut self, name: &str) -> bool {
        let before = self.sets.len();
        self.sets.retain(|(n, _)| n != name);
        self.sets.len() != before
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Invoke `hook` for every registered set, in registration order.
    pub fn apply(&mut self, hook: FilterHook, ctx: &mut FilterContext<'_>) {
        for (_, set) in self.sets.iter_mut() {
            if let Some(f) = set.hook_mut(hook) {
                f(ctx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reregistering_replaces_in_place() {
        let mut registry = FilterRegistry::new();
        registry.register("a", FilterSet::default());
        registry.register("b", FilterSet::default());
        registry.register(
            "a",
            FilterSet {
                before_tween: Some(Box::new(|_| {})),
                ..Default::default()
            },
        );
        assert_eq!(registry.len(), 2);
        assert!(registry.sets[0].1.before_tween.is_some());
    }

    #[test]
    fn unregister_reports_removal() {
        let mut registry = FilterRegistry::new();
        registry.register("a", FilterSet::default());
        assert!(registry.unregister("a"));
        assert!(!registry.unregister("a"));
        assert!(registry.is_empty());
    }
}
