//! Cookie transports: where the cart cookie is read from and written to.

use super::attributes::{decode_value, OutgoingCookie};
use crate::error::Result;
use http::header::{COOKIE, SET_COOKIE};
use http::{HeaderMap, HeaderValue};
use std::collections::HashMap;

/// The host framework's cookie plumbing.
///
/// `read` returns the decoded value of a request cookie; `write` queues a
/// cookie on the response.
pub trait CookieTransport {
    fn read(&self, name: &str) -> Option<String>;

    fn write(&mut self, cookie: OutgoingCookie) -> Result<()>;
}

impl<T: CookieTransport + ?Sized> CookieTransport for &mut T {
    fn read(&self, name: &str) -> Option<String> {
        (**self).read(name)
    }

    fn write(&mut self, cookie: OutgoingCookie) -> Result<()> {
        (**self).write(cookie)
    }
}

/// Split a `Cookie` request header into name/value pairs.
///
/// Values are percent-decoded. Pairs without `=` are skipped. When a name
/// repeats, readers take the first occurrence.
fn parse_cookie_header(header: &str) -> impl Iterator<Item = (&str, String)> {
    header.split(';').filter_map(|part| {
        let (name, value) = part.trim().split_once('=')?;
        Some((name.trim(), decode_value(value.trim())))
    })
}

/// In-memory request/response cookie pair.
///
/// Request cookies come from a `Cookie` header string; written cookies are
/// kept in order, so the last write for a name is what the client keeps.
#[derive(Debug, Default, Clone)]
pub struct MemoryTransport {
    request: HashMap<String, String>,
    written: Vec<OutgoingCookie>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `Cookie` header, e.g. `Cart=%7B%7D; theme=dark`.
    pub fn from_cookie_header(header: &str) -> Self {
        let mut transport = Self::new();
        for (name, value) in parse_cookie_header(header) {
            transport.request.entry(name.to_string()).or_insert(value);
        }
        transport
    }

    /// Set a request cookie to an already-decoded value.
    pub fn with_request_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.insert(name.into(), value.into());
        self
    }

    /// Every cookie written so far, oldest first.
    pub fn written(&self) -> &[OutgoingCookie] {
        &self.written
    }

    /// The most recent write for `name`.
    pub fn last_written(&self, name: &str) -> Option<&OutgoingCookie> {
        self.written.iter().rev().find(|c| c.name == name)
    }

    /// Carry the written cookies over as the next request's cookies.
    pub fn next_request(&self) -> Self {
        let mut next = Self {
            request: self.request.clone(),
            written: Vec::new(),
        };
        for cookie in &self.written {
            next.request.insert(cookie.name.clone(), cookie.value.clone());
        }
        next
    }
}

impl CookieTransport for MemoryTransport {
    fn read(&self, name: &str) -> Option<String> {
        self.request.get(name).cloned()
    }

    fn write(&mut self, cookie: OutgoingCookie) -> Result<()> {
        self.written.push(cookie);
        Ok(())
    }
}

/// Transport over `http` header maps.
///
/// Reads every `Cookie` header of the request and appends one `Set-Cookie`
/// header to the response per write.
pub struct HeaderTransport<'a> {
    request: &'a HeaderMap,
    response: &'a mut HeaderMap,
}

impl<'a> HeaderTransport<'a> {
    pub fn new(request: &'a HeaderMap, response: &'a mut HeaderMap) -> Self {
        Self { request, response }
    }
}

impl CookieTransport for HeaderTransport<'_> {
    fn read(&self, name: &str) -> Option<String> {
        self.request
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|header| parse_cookie_header(header))
            .find(|(n, _)| *n == name)
            .map(|(_, value)| value)
    }

    fn write(&mut self, cookie: OutgoingCookie) -> Result<()> {
        let header = HeaderValue::from_str(&cookie.to_set_cookie_header()?)?;
        self.response.append(SET_COOKIE, header);
        Ok(())
    }
}
