//! Variation key derivation.
//!
//! A product variation is identified by the values of a configured, ordered
//! list of option fields. The values are encoded as a URL query string in
//! field order, so two specs over the same field list map to the same key
//! exactly when they agree on every configured field.

mod fields;

pub use fields::VariationFields;
