//! Cookie plumbing at the edge of the cart.
//!
//! The cart is handed to a [`CookieTransport`] as an [`OutgoingCookie`]
//! whose value is the cart JSON. Transports own header encoding; the value
//! is percent-encoded on the way out and decoded on the way in.

mod attributes;
mod transport;

pub use attributes::{CookieAttributes, OutgoingCookie};
pub use transport::{CookieTransport, HeaderTransport, MemoryTransport};
