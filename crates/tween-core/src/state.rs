//! Tween state: a mapping from property name to a numeric value.
//!
//! Each tween tracks three of these with an identical key set after
//! configuration: the current state (mutated every tick), the original
//! snapshot, and the target. BTreeMap keeps iteration order stable, which
//! keeps per-tick output deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TweenState {
    props: BTreeMap<String, f64>,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        self.props.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.props.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.props.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.props.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut f64)> {
        self.props.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn clear(&mut self) {
        self.props.clear();
    }

    /// Merge with fallback: start from `self`'s entries and overwrite with any
    /// entry present in `overrides`. Keys unique to `overrides` are included
    /// too, so the result covers the union of both key sets.
    pub fn merged_with(&self, overrides: &TweenState) -> TweenState {
        let mut out = self.clone();
        for (k, v) in overrides.iter() {
            out.props.insert(k.to_string(), v);
        }
        out
    }

    /// Overwrite entries of `self` with every entry of `patch`.
    pub fn apply(&mut self, patch: &TweenState) {
        for (k, v) in patch.iter() {
            self.props.insert(k.to_string(), v);
        }
    }
}

impl FromIterator<(String, f64)> for TweenState {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            props: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(&str, f64); N]> for TweenState {
    fn from(entries: [(&str, f64); N]) -> Self {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }
}
