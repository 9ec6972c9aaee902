//! Configured variation fields and key encoding.

use crate::types::{VariationKey, VariationSpec};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Ordered list of option fields that make up a variation key.
///
/// An empty list disables variation support: every product then holds a
/// bare quantity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariationFields(Vec<String>);

impl VariationFields {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        VariationFields(fields.into_iter().map(Into::into).collect())
    }

    /// The configured field names, in declaration order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Derive the nested map key for `spec`.
    ///
    /// Returns `None` when no fields are configured. Otherwise every
    /// configured field appears in the key, in order, with its value from
    /// `spec` or the empty string. Fields not configured are ignored, and a
    /// field listed more than once appears only once.
    pub fn derive(&self, spec: &VariationSpec) -> Option<VariationKey> {
        if self.0.is_empty() {
            return None;
        }

        let mut query = form_urlencoded::Serializer::new(String::new());
        let mut seen: Vec<&str> = Vec::with_capacity(self.0.len());
        for field in &self.0 {
            // A repeated field keeps its first position.
            if seen.contains(&field.as_str()) {
                continue;
            }
            seen.push(field);
            query.append_pair(field, spec.get(field).unwrap_or(""));
        }
        Some(VariationKey(query.finish()))
    }
}

impl VariationKey {
    /// Decode the key back into the spec it was derived from.
    ///
    /// Fields defaulted to the empty string during derivation come back as
    /// empty values.
    pub fn to_spec(&self) -> VariationSpec {
        form_urlencoded::parse(self.0.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}
