//! # Cookie Cart
//!
//! A shopping cart kept entirely in a client cookie as JSON.
//!
//! ## Core Concepts
//!
//! - **Cart**: product id to quantity, where a quantity is a bare count or a
//!   map of variation key to count
//! - **Variation keys**: deterministic URL-query strings built from a
//!   configured, ordered list of option fields
//! - **CartStore**: the cart for one request; loads the cookie, mutates, and
//!   writes the cookie back after every change
//! - **Transports**: the seam to the host framework's cookie handling
//!
//! ## Example
//!
//! ```ignore
//! use cookie_cart::{CartConfig, CartStore, MemoryTransport, VariationSpec};
//!
//! let transport = MemoryTransport::from_cookie_header(request_cookie_header);
//! let mut cart = CartStore::load(
//!     CartConfig::default().with_variation_fields(["size", "color"]),
//!     transport,
//! );
//!
//! cart.append(42, &VariationSpec::new().with("size", "M"));
//! cart.remove(7, &VariationSpec::new());
//!
//! let (_, transport) = cart.into_parts();
//! for cookie in transport.written() {
//!     response.add_header("Set-Cookie", cookie.to_set_cookie_header()?);
//! }
//! ```

pub mod cart;
pub mod cookie;
pub mod error;
pub mod store;
pub mod types;
pub mod variation;

// Re-exports
pub use cart::{apply_operation, Cart, CartLine, CartOperation, Quantity};
pub use cookie::{CookieAttributes, CookieTransport, HeaderTransport, MemoryTransport, OutgoingCookie};
pub use error::{CartError, Result};
pub use store::{CartConfig, CartStore};
pub use types::*;
pub use variation::VariationFields;
