//! Cart operation application.

use super::{Cart, Quantity};
use crate::types::{ProductId, VariationKey};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// A single mutation of the cart.
///
/// `key` is the derived variation key, or `None` when variations are not
/// configured and the product holds a bare quantity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CartOperation {
    /// Overwrite the quantity. No validation of `count`.
    Put {
        id: ProductId,
        key: Option<VariationKey>,
        count: i64,
    },
    /// Increment the quantity by one, starting from zero.
    Append {
        id: ProductId,
        key: Option<VariationKey>,
    },
    /// Drop the entry; missing entries are a no-op.
    Remove {
        id: ProductId,
        key: Option<VariationKey>,
    },
    /// Empty the cart.
    Clear,
}

/// Apply an operation to a cart.
///
/// A keyed write onto a bare quantity replaces it with a variation map. A
/// keyed removal never touches a bare quantity.
pub fn apply_operation(mut cart: Cart, operation: CartOperation) -> Cart {
    match operation {
        CartOperation::Put { id, key: None, count } => {
            cart.items_mut().insert(id, Quantity::Bare(count));
        }

        CartOperation::Put { id, key: Some(key), count } => {
            update_variants(&mut cart, id, |map| {
                map.insert(key, count);
            });
        }

        CartOperation::Append { id, key: None } => {
            let items = cart.items_mut();
            let current = match items.get(&id) {
                Some(Quantity::Bare(n)) => *n,
                _ => 0,
            };
            items.insert(id, Quantity::Bare(current.saturating_add(1)));
        }

        CartOperation::Append { id, key: Some(key) } => {
            update_variants(&mut cart, id, |map| {
                let count = map.entry(key).or_insert(0);
                *count = count.saturating_add(1);
            });
        }

        CartOperation::Remove { id, key: None } => {
            cart.items_mut().remove(&id);
        }

        CartOperation::Remove { id, key: Some(key) } => {
            if let Entry::Occupied(mut entry) = cart.items_mut().entry(id) {
                if let Quantity::Variants(map) = entry.get_mut() {
                    map.remove(&key);
                    if map.is_empty() {
                        entry.remove();
                    }
                }
            }
        }

        CartOperation::Clear => {
            cart = Cart::new();
        }
    }
    cart
}

/// Run `f` on the variation map for `id`, created (or replacing a bare
/// count) if needed.
fn update_variants<F>(cart: &mut Cart, id: ProductId, f: F)
where
    F: FnOnce(&mut BTreeMap<VariationKey, i64>),
{
    let items = cart.items_mut();
    let mut map = match items.remove(&id) {
        Some(Quantity::Variants(map)) => map,
        Some(Quantity::Bare(_)) | None => BTreeMap::new(),
    };
    f(&mut map);
    items.insert(id, Quantity::Variants(map));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> Option<VariationKey> {
        Some(VariationKey::from(s))
    }

    fn put(id: i64, key: Option<VariationKey>, count: i64) -> CartOperation {
        CartOperation::Put {
            id: ProductId(id),
            key,
            count,
        }
    }

    #[test]
    fn test_put_bare() {
        let cart = apply_operation(Cart::new(), put(1, None, 3));
        assert_eq!(cart.get(ProductId(1)), Some(&Quantity::Bare(3)));

        // Overwrites, including zero and negative.
        let cart = apply_operation(cart, put(1, None, 0));
        assert_eq!(cart.get(ProductId(1)), Some(&Quantity::Bare(0)));
        let cart = apply_operation(cart, put(1, None, -2));
        assert_eq!(cart.get(ProductId(1)), Some(&Quantity::Bare(-2)));
    }

    #[test]
    fn test_put_variant_creates_map() {
        let cart = apply_operation(Cart::new(), put(5, key("size=M"), 2));
        let cart = apply_operation(cart, put(5, key("size=L"), 1));

        assert_eq!(cart.quantity(ProductId(5), key("size=M").as_ref()), Some(2));
        assert_eq!(cart.quantity(ProductId(5), key("size=L").as_ref()), Some(1));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_put_variant_replaces_bare() {
        let cart = apply_operation(Cart::new(), put(5, None, 7));
        let cart = apply_operation(cart, put(5, key("size=M"), 2));

        let expected: BTreeMap<VariationKey, i64> =
            [(VariationKey::from("size=M"), 2)].into_iter().collect();
        assert_eq!(cart.get(ProductId(5)), Some(&Quantity::Variants(expected)));
    }

    #[test]
    fn test_append_counts_from_zero() {
        let mut cart = Cart::new();
        for _ in 0..4 {
            cart = apply_operation(cart, CartOperation::Append { id: ProductId(2), key: None });
        }
        assert_eq!(cart.quantity(ProductId(2), None), Some(4));
    }

    #[test]
    fn test_append_variant() {
        let cart = apply_operation(Cart::new(), put(1, key("size=L"), 3));
        let cart = apply_operation(cart, CartOperation::Append { id: ProductId(1), key: key("size=L") });
        let cart = apply_operation(cart, CartOperation::Append { id: ProductId(1), key: key("size=S") });

        assert_eq!(cart.quantity(ProductId(1), key("size=L").as_ref()), Some(4));
        assert_eq!(cart.quantity(ProductId(1), key("size=S").as_ref()), Some(1));
    }

    #[test]
    fn test_append_variant_replaces_bare() {
        let cart = apply_operation(Cart::new(), put(4, None, 9));
        let cart = apply_operation(cart, CartOperation::Append { id: ProductId(4), key: key("size=S") });

        let expected: BTreeMap<VariationKey, i64> =
            [(VariationKey::from("size=S"), 1)].into_iter().collect();
        assert_eq!(cart.get(ProductId(4)), Some(&Quantity::Variants(expected)));
    }

    #[test]
    fn test_append_saturates() {
        let cart = apply_operation(Cart::new(), put(1, None, i64::MAX));
        let cart = apply_operation(cart, CartOperation::Append { id: ProductId(1), key: None });
        assert_eq!(cart.quantity(ProductId(1), None), Some(i64::MAX));
    }

    #[test]
    fn test_remove_last_variant_drops_product() {
        let cart = apply_operation(Cart::new(), put(5, key("size=M"), 2));
        let cart = apply_operation(cart, CartOperation::Remove { id: ProductId(5), key: key("size=M") });
        assert!(!cart.contains(ProductId(5)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_one_of_many_variants() {
        let cart = apply_operation(Cart::new(), put(5, key("size=M"), 2));
        let cart = apply_operation(cart, put(5, key("size=L"), 1));
        let cart = apply_operation(cart, CartOperation::Remove { id: ProductId(5), key: key("size=M") });

        assert_eq!(cart.quantity(ProductId(5), key("size=M").as_ref()), None);
        assert_eq!(cart.quantity(ProductId(5), key("size=L").as_ref()), Some(1));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let before = apply_operation(Cart::new(), put(1, None, 1));

        let after = apply_operation(before.clone(), CartOperation::Remove { id: ProductId(9), key: None });
        assert_eq!(after, before);

        let after = apply_operation(before.clone(), CartOperation::Remove { id: ProductId(9), key: key("size=M") });
        assert_eq!(after, before);
    }

    #[test]
    fn test_keyed_remove_leaves_bare_quantity() {
        let before = apply_operation(Cart::new(), put(1, None, 3));
        let after = apply_operation(before.clone(), CartOperation::Remove { id: ProductId(1), key: key("size=M") });
        assert_eq!(after, before);
    }

    #[test]
    fn test_clear() {
        let cart = apply_operation(Cart::new(), put(1, None, 1));
        let cart = apply_operation(cart, put(2, key("size=M"), 1));
        let cart = apply_operation(cart, CartOperation::Clear);
        assert!(cart.is_empty());
    }
}
