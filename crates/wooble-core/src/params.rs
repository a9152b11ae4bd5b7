//! Component parameters and the default/override merge.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use serde_json::Value;

/// An ordered mapping from parameter name to value.
///
/// Used both for a component's registered defaults and for the overrides a
/// caller passes to `init`. Values are JSON by default; a host whose values
/// cannot be expressed as JSON (functions, live nodes) picks its own `V`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params<V = Value>(IndexMap<String, V>);

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }
}

impl<V> Params<V> {
    /// Add a parameter, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<V>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a parameter, returning the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<V>) -> Option<V> {
        self.0.insert(name.into(), value.into())
    }

    /// Get a parameter by name.
    pub fn get(&self, name: &str) -> Option<&V> {
        self.0.get(name)
    }

    /// Check if a parameter exists.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Parameter names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V: Clone> Params<V> {
    /// Merge caller overrides over these defaults.
    ///
    /// Returns a fresh set with the same keys, in the same order, as `self`.
    /// Overrides for keys that are not defaults are dropped. `self` is never
    /// modified, so the same defaults can back any number of calls. Values
    /// are cloned, never converted.
    pub fn merged_with(&self, overrides: &Params<V>) -> Params<V> {
        let mut merged = self.clone();
        for (name, value) in overrides.iter() {
            if let Some(slot) = merged.0.get_mut(name) {
                *slot = value.clone();
            } else {
                tracing::debug!(param = name, "ignoring override with no default");
            }
        }
        merged
    }
}

impl<V> Default for Params<V> {
    fn default() -> Self {
        Self(IndexMap::new())
    }
}

impl<V: fmt::Debug> fmt::Debug for Params<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl<V> From<IndexMap<String, V>> for Params<V> {
    fn from(map: IndexMap<String, V>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, T: Into<V>, V> FromIterator<(K, T)> for Params<V> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_merge_honors_only_default_keys() {
        let defaults = Params::new().with("a", 1).with("b", 2);
        let overrides = Params::new().with("a", 9).with("c", 5);

        let merged = defaults.merged_with(&overrides);

        assert_eq!(merged, Params::new().with("a", 9).with("b", 2));
        assert!(!merged.contains("c"));
    }

    #[test]
    fn test_merge_keeps_default_order() {
        let defaults = Params::new().with("first", "x").with("second", "y");
        let overrides = Params::new().with("second", "z").with("first", "w");

        let merged = defaults.merged_with(&overrides);

        assert_eq!(merged.names().collect::<Vec<_>>(), vec!["first", "second"]);
        assert_eq!(merged.get("first"), Some(&json!("w")));
    }

    #[test]
    fn test_merge_with_empty_overrides_is_defaults() {
        let defaults = Params::new().with("color", "red").with("size", json!({ "w": 10 }));
        assert_eq!(defaults.merged_with(&Params::new()), defaults);
    }

    #[test]
    fn test_json_object_roundtrip_shape() {
        let params: Params = serde_json::from_str(r#"{"par1":"value1","par2":[1,2]}"#).unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("par2"), Some(&json!([1, 2])));
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({"par1":"value1","par2":[1,2]}));
    }

    #[test]
    fn test_nested_objects_keep_key_order() {
        let source = r#"{"style":{"z":1,"a":2}}"#;
        let params: Params = serde_json::from_str(source).unwrap();
        assert_eq!(serde_json::to_string(&params).unwrap(), source);
    }

    #[test]
    fn test_merge_shares_live_values() {
        // A value type with identity: overrides must reach the merged set
        // as the same object, not a copy.
        let handler: Rc<str> = Rc::from("onClick");
        let defaults: Params<Rc<str>> = Params::default().with("handler", Rc::<str>::from("noop"));
        let overrides: Params<Rc<str>> = Params::default().with("handler", Rc::clone(&handler));

        let merged = defaults.merged_with(&overrides);

        assert!(Rc::ptr_eq(merged.get("handler").unwrap(), &handler));
        assert_eq!(&**defaults.get("handler").unwrap(), "noop");
    }

    fn params_strategy() -> impl Strategy<Value = Params> {
        prop::collection::vec(("[a-e]", any::<i64>()), 0..6)
            .prop_map(|pairs| pairs.into_iter().collect::<Params>())
    }

    proptest! {
        #[test]
        fn merge_never_mutates_defaults(
            defaults in params_strategy(),
            calls in prop::collection::vec(params_strategy(), 0..8),
        ) {
            let before = defaults.clone();
            for overrides in &calls {
                let _ = defaults.merged_with(overrides);
            }
            prop_assert_eq!(defaults, before);
        }

        #[test]
        fn merge_keys_equal_default_keys(
            defaults in params_strategy(),
            overrides in params_strategy(),
        ) {
            let merged = defaults.merged_with(&overrides);
            prop_assert_eq!(
                merged.names().collect::<Vec<_>>(),
                defaults.names().collect::<Vec<_>>()
            );
            for (name, value) in merged.iter() {
                let expected = overrides.get(name).or_else(|| defaults.get(name));
                prop_assert_eq!(Some(value), expected);
            }
        }
    }
}
