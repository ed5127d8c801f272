//! Easing curves: registry, spec, and composition.
//!
//! An easing curve maps normalized progress in [0, 1] to a normalized output
//! (overshoot allowed). The full curve library is the host's concern; the
//! registry ships with only `"linear"` and is user-registrable. A terse
//! `EasingSpec` (one curve for everything, or a partial per-property mapping)
//! is resolved exactly once at configure time into a total `EasingMap`, so no
//! name lookup or spec inspection happens on the tick path.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::error::TweenError;
use crate::state::TweenState;

/// A normalized easing function.
pub type EasingFn = Rc<dyn Fn(f64) -> f64>;

/// Curve assigned to every property missing an explicit entry.
pub const DEFAULT_EASING: &str = "linear";

/// Reference to one curve, either by registry name or as a direct callable.
#[derive(Clone)]
pub enum CurveRef {
    Named(String),
    Direct(EasingFn),
}

impl fmt::Debug for CurveRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveRef::Named(name) => write!(f, "Named({name:?})"),
            CurveRef::Direct(_) => write!(f, "Direct(<fn>)"),
        }
    }
}

impl From<&str> for CurveRef {
    fn from(name: &str) -> Self {
        CurveRef::Named(name.to_string())
    }
}

impl From<String> for CurveRef {
    fn from(name: String) -> Self {
        CurveRef::Named(name)
    }
}

impl From<EasingFn> for CurveRef {
    fn from(f: EasingFn) -> Self {
        CurveRef::Direct(f)
    }
}

/// How a tween's easing is specified: one curve for all tracked properties,
/// or a partial per-property mapping (gaps fill with [`DEFAULT_EASING`]).
#[derive(Clone, Debug)]
pub enum EasingSpec {
    Uniform(CurveRef),
    PerProperty(BTreeMap<String, CurveRef>),
}

impl EasingSpec {
    /// Uniform spec from a direct callable.
    pub fn direct(f: impl Fn(f64) -> f64 + 'static) -> Self {
        EasingSpec::Uniform(CurveRef::Direct(Rc::new(f)))
    }

    /// Per-property spec from `(property, curve)` pairs.
    pub fn per_property<K, C, I>(entries: I) -> Self
    where
        K: Into<String>,
        C: Into<CurveRef>,
        I: IntoIterator<Item = (K, C)>,
    {
        EasingSpec::PerProperty(
            entries
                .into_iter()
                .map(|(k, c)| (k.into(), c.into()))
                .collect(),
        )
    }
}

impl Default for EasingSpec {
    fn default() -> Self {
        EasingSpec::Uniform(CurveRef::Named(DEFAULT_EASING.to_string()))
    }
}

impl From<&str> for EasingSpec {
    fn from(name: &str) -> Self {
        EasingSpec::Uniform(CurveRef::Named(name.to_string()))
    }
}

/// Total per-property easing assignment; always covers exactly the tween's
/// tracked key set.
pub type EasingMap = BTreeMap<String, EasingFn>;

/// Name → curve registry. User-registrable; only `"linear"` is built in.
pub struct EasingRegistry {
    curves: BTreeMap<String, EasingFn>,
}

impl fmt::Debug for EasingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EasingRegistry")
            .field("curves", &self.curves.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for EasingRegistry {
    fn default() -> Self {
        let mut curves: BTreeMap<String, EasingFn> = BTreeMap::new();
        curves.insert(DEFAULT_EASING.to_string(), Rc::new(|t| t));
        Self { curves }
    }
}

impl EasingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, f: impl Fn(f64) -> f64 + 'static) {
        self.curves.insert(name.into(), Rc::new(f));
    }

    pub fn get(&self, name: &str) -> Option<EasingFn> {
        self.curves.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.curves.contains_key(name)
    }

    fn resolve(&self, curve: &CurveRef) -> Result<EasingFn, TweenError> {
        match curve {
            CurveRef::Named(name) => self
                .get(name)
                .ok_or_else(|| TweenError::UnknownEasing(name.clone())),
            CurveRef::Direct(f) => Ok(f.clone()),
        }
    }
}

/// Build a total easing map over `state`'s keys from a terse spec.
///
/// A uniform spec assigns its curve to every key; a per-property spec uses its
/// entry where present and [`DEFAULT_EASING`] elsewhere. Unknown curve names
/// error here rather than at tick time.
pub fn compose(
    state: &TweenState,
    spec: &EasingSpec,
    registry: &EasingRegistry,
) -> Result<EasingMap, TweenError> {
    let mut map = EasingMap::new();
    match spec {
        EasingSpec::Uniform(curve) => {
            let f = registry.resolve(curve)?;
            for key in state.keys() {
                map.insert(key.to_string(), f.clone());
            }
        }
        EasingSpec::PerProperty(entries) => {
            let default = registry.resolve(&CurveRef::Named(DEFAULT_EASING.to_string()))?;
            for key in state.keys() {
                let f = match entries.get(key) {
                    Some(curve) => registry.resolve(curve)?,
                    None => default.clone(),
                };
                map.insert(key.to_string(), f);
            }
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_registry() -> EasingRegistry {
        let mut registry = EasingRegistry::new();
        registry.register("easeInQuad", |t| t * t);
        registry
    }

    #[test]
    fn uniform_spec_covers_every_key() {
        let registry = quad_registry();
        let state = TweenState::from([("x", 0.0), ("y", 0.0)]);
        let map = compose(&state, &"easeInQuad".into(), &registry).unwrap();
        assert_eq!(map.len(), 2);
        // quad: f(0.5) == 0.25 on both keys
        assert_eq!(map["x"](0.5), 0.25);
        assert_eq!(map["y"](0.5), 0.25);
    }

    #[test]
    fn partial_spec_fills_gaps_with_linear() {
        let registry = quad_registry();
        let state = TweenState::from([("x", 0.0), ("y", 0.0)]);
        let spec = EasingSpec::per_property([("x", "easeInQuad")]);
        let map = compose(&state, &spec, &registry).unwrap();
        assert_eq!(map["x"](0.5), 0.25);
        assert_eq!(map["y"](0.5), 0.5); // linear fallback
    }

    #[test]
    fn direct_callable_bypasses_registry() {
        let registry = EasingRegistry::new();
        let state = TweenState::from([("x", 0.0)]);
        let map = compose(&state, &EasingSpec::direct(|t| 1.0 - t), &registry).unwrap();
        assert_eq!(map["x"](0.25), 0.75);
    }

    #[test]
    fn unknown_name_fails_fast() {
        let registry = EasingRegistry::new();
        let state = TweenState::from([("x", 0.0)]);
        let err = compose(&state, &"easeOutBogus".into(), &registry).err();
        assert_eq!(err, Some(TweenError::UnknownEasing("easeOutBogus".to_string())));
    }
}
