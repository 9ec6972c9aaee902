//! The cart value and its pure mutation core.
//!
//! A [`Cart`] maps product ids to a [`Quantity`], which is either a bare
//! count or a map of variation key to count. All mutations go through
//! [`apply_operation`], which takes the cart by value and returns the
//! updated one, so the request-scoped store only loads, applies and persists.

mod operations;

pub use operations::{apply_operation, CartOperation};

use crate::types::{ProductId, VariationKey, VariationSpec};
use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

/// Quantity stored for one product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    /// Plain count, used when no variation fields are configured.
    Bare(i64),
    /// Count per variation. Never left empty after a removal.
    Variants(BTreeMap<VariationKey, i64>),
}

impl Quantity {
    /// Sum of all counts under this entry.
    pub fn total(&self) -> i64 {
        match self {
            Quantity::Bare(n) => *n,
            Quantity::Variants(map) => map.values().fold(0i64, |acc, n| acc.saturating_add(*n)),
        }
    }

    fn is_empty_variants(&self) -> bool {
        matches!(self, Quantity::Variants(map) if map.is_empty())
    }
}

/// One flattened cart entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartLine {
    pub product: ProductId,
    /// Decoded variation, `None` for bare quantities.
    pub variation: Option<VariationSpec>,
    pub quantity: i64,
}

/// Product id to quantity mapping held in the cart cookie.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: BTreeMap<ProductId, Quantity>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, id: ProductId) -> Option<&Quantity> {
        self.items.get(&id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, ProductId, Quantity> {
        self.items.iter()
    }

    /// Quantity stored for `id`, or for `id` under `key` when given.
    ///
    /// A bare entry does not answer keyed lookups and vice versa.
    pub fn quantity(&self, id: ProductId, key: Option<&VariationKey>) -> Option<i64> {
        match (self.items.get(&id)?, key) {
            (Quantity::Bare(n), None) => Some(*n),
            (Quantity::Variants(map), Some(key)) => map.get(key).copied(),
            _ => None,
        }
    }

    /// Sum of every quantity in the cart.
    pub fn total_items(&self) -> i64 {
        self.items
            .values()
            .fold(0i64, |acc, q| acc.saturating_add(q.total()))
    }

    /// Flatten the cart into one line per product or product variation.
    pub fn lines(&self) -> Vec<CartLine> {
        let mut lines = Vec::new();
        for (id, quantity) in &self.items {
            match quantity {
                Quantity::Bare(n) => lines.push(CartLine {
                    product: *id,
                    variation: None,
                    quantity: *n,
                }),
                Quantity::Variants(map) => {
                    for (key, n) in map {
                        lines.push(CartLine {
                            product: *id,
                            variation: Some(key.to_spec()),
                            quantity: *n,
                        });
                    }
                }
            }
        }
        lines
    }

    pub(crate) fn items_mut(&mut self) -> &mut BTreeMap<ProductId, Quantity> {
        &mut self.items
    }
}

impl FromIterator<(ProductId, Quantity)> for Cart {
    fn from_iter<I: IntoIterator<Item = (ProductId, Quantity)>>(iter: I) -> Self {
        Cart {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = (&'a ProductId, &'a Quantity);
    type IntoIter = btree_map::Iter<'a, ProductId, Quantity>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// Accepts the object form written by this crate, and the array form older
// writers produce for an empty cart (`[]`) or for ids that are exactly 0..n.
// Empty variation maps are dropped on the way in.
impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CartVisitor;

        impl<'de> Visitor<'de> for CartVisitor {
            type Value = Cart;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of product id to quantity")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Cart, A::Error> {
                let mut items = BTreeMap::new();
                while let Some((id, quantity)) = map.next_entry::<ProductId, Quantity>()? {
                    if !quantity.is_empty_variants() {
                        items.insert(id, quantity);
                    }
                }
                Ok(Cart { items })
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Cart, A::Error> {
                let mut items = BTreeMap::new();
                let mut index = 0i64;
                while let Some(quantity) = seq.next_element::<Quantity>()? {
                    if !quantity.is_empty_variants() {
                        items.insert(ProductId(index), quantity);
                    }
                    index += 1;
                }
                Ok(Cart { items })
            }
        }

        deserializer.deserialize_any(CartVisitor)
    }
}
