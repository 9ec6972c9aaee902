//! Core identifier types for the cart.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a product held in the cart.
///
/// Serialized as a bare integer; as a JSON object key it becomes its decimal
/// string form.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl fmt::Debug for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProductId({})", self.0)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId(id)
    }
}

/// Selected product options, e.g. `size=M`, `color=red`.
///
/// Only fields named in the configured variation list take part in key
/// derivation; anything else is ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariationSpec(BTreeMap<String, String>);

impl VariationSpec {
    /// An empty spec (no options selected).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariationSpec {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        VariationSpec(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Nested map key for one product variation, e.g. `size=M&color=`.
///
/// Produced by [`VariationFields::derive`](crate::VariationFields::derive);
/// never stored apart from the cart it indexes.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariationKey(pub(crate) String);

impl VariationKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for VariationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VariationKey({:?})", self.0)
    }
}

impl fmt::Display for VariationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VariationKey {
    fn from(s: &str) -> Self {
        VariationKey(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_as_json_key() {
        let mut map = BTreeMap::new();
        map.insert(ProductId(42), 1);
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"42":1}"#);

        let back: BTreeMap<ProductId, i32> = serde_json::from_str(r#"{"42":1}"#).unwrap();
        assert_eq!(back.get(&ProductId(42)), Some(&1));
    }

    #[test]
    fn test_variation_spec_builder() {
        let spec = VariationSpec::new().with("size", "M").with("color", "red");
        assert_eq!(spec.get("size"), Some("M"));
        assert_eq!(spec.get("color"), Some("red"));
        assert_eq!(spec.get("material"), None);

        let collected: VariationSpec = [("size", "M"), ("color", "red")].into_iter().collect();
        assert_eq!(collected, spec);
    }
}
