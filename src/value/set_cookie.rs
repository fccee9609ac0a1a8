//! The `Set-Cookie` header value.
use std::fmt::Display;

use crate::error::{ParseError, ParseErrorKind};

use super::date::Timestamp;

/// A `Set-Cookie` header value: one mandatory name-value pair plus
/// optional attributes.
///
/// Attribute names are matched without case-sensitivity. Unrecognized
/// attributes and recognized attributes with malformed values are
/// dropped; they never fail the parse of the rest of the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetCookie {
    name: String,
    value: String,
    expires: Option<Timestamp>,
    max_age: Option<i64>,
    domain: Option<String>,
    path: Option<String>,
    secure: bool,
    http_only: bool,
}

impl SetCookie {
    /// Header field name this value is carried in.
    pub const FIELD_NAME: &'static str = "Set-Cookie";

    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    /// Parses a `name=value[; Attr[=val]]*` header value.
    ///
    /// The mandatory pair before the first `';'` must contain `'='`.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut tokens = input.split(';');

        let pair = tokens.next().unwrap_or_default();
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| ParseError::new(ParseErrorKind::Syntax).with_snippet(pair))?;

        let mut cookie = Self::new(name, value);

        for token in tokens {
            cookie.apply_attribute(token.trim_start());
        }

        Ok(cookie)
    }

    fn apply_attribute(&mut self, token: &str) {
        let (key, value) = match token.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (token, None),
        };

        if key.eq_ignore_ascii_case("Expires") {
            match value.map(Timestamp::from_rfc7231) {
                Some(Ok(timestamp)) => self.expires = Some(timestamp),
                Some(Err(_)) | None => {
                    tracing::trace!(token, "malformed cookie attribute dropped")
                }
            }
        } else if key.eq_ignore_ascii_case("Max-Age") {
            match value.map(str::parse) {
                Some(Ok(seconds)) => self.max_age = Some(seconds),
                Some(Err(_)) | None => {
                    tracing::trace!(token, "malformed cookie attribute dropped")
                }
            }
        } else if key.eq_ignore_ascii_case("Domain") {
            self.domain = value.map(str::to_owned);
        } else if key.eq_ignore_ascii_case("Path") {
            self.path = value.map(str::to_owned);
        } else if key.eq_ignore_ascii_case("Secure") {
            self.secure = true;
        } else if key.eq_ignore_ascii_case("HttpOnly") {
            self.http_only = true;
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn expires(&self) -> Option<Timestamp> {
        self.expires
    }

    /// Returns the lifetime in seconds. Zero and negative values mean
    /// the cookie expires immediately.
    pub fn max_age(&self) -> Option<i64> {
        self.max_age
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn is_http_only(&self) -> bool {
        self.http_only
    }

    pub fn set_name<N: Into<String>>(&mut self, name: N) {
        self.name = name.into();
    }

    pub fn set_value<V: Into<String>>(&mut self, value: V) {
        self.value = value.into();
    }

    pub fn set_expires(&mut self, expires: Option<Timestamp>) {
        self.expires = expires;
    }

    pub fn set_max_age(&mut self, max_age: Option<i64>) {
        self.max_age = max_age;
    }

    pub fn set_domain<S: Into<String>>(&mut self, domain: Option<S>) {
        self.domain = domain.map(Into::into);
    }

    pub fn set_path<S: Into<String>>(&mut self, path: Option<S>) {
        self.path = path.map(Into::into);
    }

    pub fn set_secure(&mut self, secure: bool) {
        self.secure = secure;
    }

    pub fn set_http_only(&mut self, http_only: bool) {
        self.http_only = http_only;
    }
}

impl Display for SetCookie {
    /// Serializes with the recognized attributes in a fixed canonical
    /// order: Expires, Max-Age, Domain, Path, Secure, HttpOnly.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.name, self.value)?;

        if let Some(expires) = &self.expires {
            write!(f, "; Expires={}", expires.to_rfc7231())?;
        }

        if let Some(max_age) = self.max_age {
            write!(f, "; Max-Age={}", max_age)?;
        }

        if let Some(domain) = &self.domain {
            write!(f, "; Domain={}", domain)?;
        }

        if let Some(path) = &self.path {
            write!(f, "; Path={}", path)?;
        }

        if self.secure {
            f.write_str("; Secure")?;
        }

        if self.http_only {
            f.write_str("; HttpOnly")?;
        }

        Ok(())
    }
}
