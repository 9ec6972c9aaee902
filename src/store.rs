//! Request-scoped cart store tying the cart to its cookie.

use crate::cart::{apply_operation, Cart, CartOperation};
use crate::cookie::{CookieAttributes, CookieTransport, OutgoingCookie};
use crate::error::{CartError, Result};
use crate::types::{ProductId, VariationKey, VariationSpec};
use crate::variation::VariationFields;
use serde::Deserialize;
use time::{Duration, OffsetDateTime};
use tracing::{debug, warn};

const DEFAULT_LIFETIME_DAYS: i64 = 365;

const SECONDS_PER_DAY: i64 = 86_400;

/// Cart configuration.
///
/// Deserializable with per-field defaults so it can sit inside a host's own
/// configuration file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Name of the cookie holding the cart.
    pub cookie_name: String,

    /// Ordered option fields forming the variation key. Empty disables
    /// variations.
    pub variation_fields: VariationFields,

    /// Cookie `Path` attribute.
    pub path: String,

    /// Cookie `HttpOnly` flag.
    pub http_only: bool,

    /// Cookie `Secure` flag. Off by default; enable when served over HTTPS.
    pub secure: bool,

    /// Days until the cookie expires, counted from each write.
    pub lifetime_days: i64,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            cookie_name: "Cart".to_string(),
            variation_fields: VariationFields::default(),
            path: "/".to_string(),
            http_only: true,
            secure: false,
            lifetime_days: DEFAULT_LIFETIME_DAYS,
        }
    }
}

impl CartConfig {
    pub fn with_variation_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variation_fields = VariationFields::new(fields);
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Cookie attributes for a write happening at `now`.
    ///
    /// A `lifetime_days` too large to represent as a date falls back to the
    /// default of 365 days.
    pub fn attributes(&self, now: OffsetDateTime) -> CookieAttributes {
        let expires = self
            .lifetime_days
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|secs| now.checked_add(Duration::seconds(secs)))
            .unwrap_or_else(|| {
                warn!(lifetime_days = self.lifetime_days, "cookie lifetime out of range, using default");
                now + Duration::days(DEFAULT_LIFETIME_DAYS)
            });

        CookieAttributes {
            path: self.path.clone(),
            http_only: self.http_only,
            secure: self.secure,
            expires,
        }
    }
}

/// The cart for one request.
///
/// Loads the cart cookie on construction, applies mutations in memory and
/// writes the whole cart back through the transport after every mutation.
/// Mutations never fail; transport or encoding problems are logged.
///
/// Quantities are not validated: zero and negative counts are stored as
/// given.
pub struct CartStore<T> {
    config: CartConfig,
    cart: Cart,
    transport: T,
}

impl<T: CookieTransport> CartStore<T> {
    /// Load the cart, treating an undecodable cookie as an empty cart.
    pub fn load(config: CartConfig, transport: T) -> Self {
        let cart = match Self::read_cart(&config, &transport) {
            Ok(cart) => cart,
            Err(e) => {
                warn!(cookie = %config.cookie_name, error = %e, "discarding undecodable cart cookie");
                Cart::new()
            }
        };
        Self {
            config,
            cart,
            transport,
        }
    }

    /// Load the cart, failing with [`CartError::Decode`] on a malformed
    /// cookie.
    pub fn try_load(config: CartConfig, transport: T) -> Result<Self> {
        let cart = Self::read_cart(&config, &transport)?;
        Ok(Self {
            config,
            cart,
            transport,
        })
    }

    fn read_cart(config: &CartConfig, transport: &T) -> Result<Cart> {
        let raw = match transport.read(&config.cookie_name) {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => {
                debug!(cookie = %config.cookie_name, "no cart cookie, starting empty");
                return Ok(Cart::new());
            }
        };

        let cart: Cart =
            serde_json::from_str(&raw).map_err(|e| CartError::Decode(e.to_string()))?;
        debug!(cookie = %config.cookie_name, products = cart.len(), "cart loaded");
        Ok(cart)
    }

    // --- Queries ---

    /// The configured variation fields, unmodified.
    pub fn variations(&self) -> &[String] {
        self.config.variation_fields.as_slice()
    }

    /// Variation key for `spec`, or `None` without configured fields.
    pub fn derive_key(&self, spec: &VariationSpec) -> Option<VariationKey> {
        self.config.variation_fields.derive(spec)
    }

    pub fn get(&self) -> &Cart {
        &self.cart
    }

    /// Stored quantity for `id` under the key derived from `spec`.
    pub fn quantity(&self, id: i64, spec: &VariationSpec) -> Option<i64> {
        self.cart.quantity(ProductId(id), self.derive_key(spec).as_ref())
    }

    pub fn total_items(&self) -> i64 {
        self.cart.total_items()
    }

    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    // --- Mutations ---

    /// Set the quantity, overwriting whatever was there.
    pub fn put(&mut self, id: i64, count: i64, spec: &VariationSpec) {
        let key = self.derive_key(spec);
        self.apply(CartOperation::Put {
            id: ProductId(id),
            key,
            count,
        });
    }

    /// Increase the quantity by one.
    pub fn append(&mut self, id: i64, spec: &VariationSpec) {
        let key = self.derive_key(spec);
        self.apply(CartOperation::Append {
            id: ProductId(id),
            key,
        });
    }

    /// Remove the product, or just one of its variations.
    pub fn remove(&mut self, id: i64, spec: &VariationSpec) {
        let key = self.derive_key(spec);
        self.apply(CartOperation::Remove {
            id: ProductId(id),
            key,
        });
    }

    /// Empty the cart.
    pub fn delete(&mut self) {
        self.apply(CartOperation::Clear);
    }

    /// End the request scope.
    pub fn into_parts(self) -> (Cart, T) {
        (self.cart, self.transport)
    }

    fn apply(&mut self, operation: CartOperation) {
        let cart = std::mem::take(&mut self.cart);
        self.set(apply_operation(cart, operation));
    }

    fn set(&mut self, cart: Cart) {
        self.cart = cart;

        let value = match serde_json::to_string(&self.cart) {
            Ok(value) => value,
            Err(e) => {
                let error = CartError::Encode(e.to_string());
                warn!(error = %error, "cart not persisted");
                return;
            }
        };

        let cookie = OutgoingCookie {
            name: self.config.cookie_name.clone(),
            value,
            attributes: self.config.attributes(OffsetDateTime::now_utc()),
        };

        match self.transport.write(cookie) {
            Ok(()) => debug!(products = self.cart.len(), "cart persisted"),
            Err(e) => warn!(error = %e, "cart cookie write failed"),
        }
    }
}
