//! Outgoing cookie and its attributes.

use crate::error::{CartError, Result};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// Bytes that may not appear raw in a cookie value (RFC 6265 cookie-octet),
/// plus `%` and `+` so decoding is unambiguous.
const COOKIE_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b',')
    .add(b';')
    .add(b'\\')
    .add(b'%')
    .add(b'+');

/// Attributes attached to the cart cookie on every write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieAttributes {
    pub path: String,
    pub http_only: bool,
    pub secure: bool,
    pub expires: OffsetDateTime,
}

/// A cookie handed to a [`CookieTransport`](super::CookieTransport).
///
/// `value` is the unencoded JSON; encoding for the header happens in
/// [`to_set_cookie_header`](Self::to_set_cookie_header).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingCookie {
    pub name: String,
    pub value: String,
    pub attributes: CookieAttributes,
}

impl OutgoingCookie {
    /// Render the `Set-Cookie` header value.
    ///
    /// `Expires` is written as an IMF-fixdate in GMT.
    pub fn to_set_cookie_header(&self) -> Result<String> {
        if !is_valid_name(&self.name) {
            return Err(CartError::InvalidAttribute(format!(
                "cookie name {:?}",
                self.name
            )));
        }
        if !is_valid_path(&self.attributes.path) {
            return Err(CartError::InvalidAttribute(format!(
                "cookie path {:?}",
                self.attributes.path
            )));
        }

        let expires = self
            .attributes
            .expires
            .to_offset(UtcOffset::UTC)
            .format(format_description!(
                "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
            ))?;

        let mut header = format!(
            "{}={}; Path={}; Expires={}",
            self.name,
            encode_value(&self.value),
            self.attributes.path,
            expires
        );
        if self.attributes.http_only {
            header.push_str("; HttpOnly");
        }
        if self.attributes.secure {
            header.push_str("; Secure");
        }
        Ok(header)
    }
}

/// RFC 6265 cookie-name: a non-empty token, no separators or controls.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_graphic()
                && !matches!(
                    b,
                    b'(' | b')' | b'<' | b'>' | b'@' | b',' | b';' | b':' | b'\\' | b'"'
                        | b'/' | b'[' | b']' | b'?' | b'=' | b'{' | b'}'
                )
        })
}

/// RFC 6265 path-value: any printable ASCII except `;`.
fn is_valid_path(path: &str) -> bool {
    path.bytes().all(|b| (b' '..=b'~').contains(&b) && b != b';')
}

pub(crate) fn encode_value(value: &str) -> String {
    utf8_percent_encode(value, COOKIE_VALUE).to_string()
}

pub(crate) fn decode_value(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}
