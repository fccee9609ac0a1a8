//! Structured header-shaped values.
//!
//! Parsing then serializing an unmodified value reproduces the original
//! wire bytes, except for attributes dropped as unrecognized or
//! malformed.
pub mod cookie;
pub mod date;
pub mod query;
pub mod set_cookie;

pub use cookie::Cookie;
pub use date::{HttpDate, Timestamp};
pub use query::QueryString;
pub use set_cookie::SetCookie;
