//! HTTP status code taxonomy.
use std::fmt::Display;

/// A status code with its canonical reason phrase.
///
/// The known codes form a closed table of process-wide constants; handlers
/// pick a status by its literal name (for example [`NOT_FOUND`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status {
    pub code: u16,
    pub reason: &'static str,
}

/// The four families of the status taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusFamily {
    Informational,
    Success,
    Redirect,
    Error,
}

impl Status {
    /// Looks up a known status by its numeric code.
    pub fn from_code(code: u16) -> Option<Status> {
        ALL.iter().find(|status| status.code == code).copied()
    }

    pub fn family(&self) -> StatusFamily {
        match self.code {
            100..=199 => StatusFamily::Informational,
            200..=299 => StatusFamily::Success,
            300..=399 => StatusFamily::Redirect,
            _ => StatusFamily::Error,
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:03} {}", self.code, self.reason)
    }
}

macro_rules! statuses {
    ($( $name:ident = ($code:expr, $reason:expr); )+) => {
        $(
            pub const $name: Status = Status {
                code: $code,
                reason: $reason,
            };
        )+

        const ALL: &[Status] = &[ $( $name, )+ ];
    };
}

statuses! {
    // Informational
    CONTINUE = (100, "Continue");
    SWITCHING_PROTOCOLS = (101, "Switching Protocols");

    // Success
    OK = (200, "OK");
    CREATED = (201, "Created");
    ACCEPTED = (202, "Accepted");
    NO_CONTENT = (204, "No Content");
    PARTIAL_CONTENT = (206, "Partial Content");

    // Redirect
    MOVED_PERMANENTLY = (301, "Moved Permanently");
    FOUND = (302, "Found");
    SEE_OTHER = (303, "See Other");
    NOT_MODIFIED = (304, "Not Modified");
    TEMPORARY_REDIRECT = (307, "Temporary Redirect");
    PERMANENT_REDIRECT = (308, "Permanent Redirect");

    // Error
    BAD_REQUEST = (400, "Bad Request");
    UNAUTHORIZED = (401, "Unauthorized");
    FORBIDDEN = (403, "Forbidden");
    NOT_FOUND = (404, "Not Found");
    METHOD_NOT_ALLOWED = (405, "Method Not Allowed");
    REQUEST_TIMEOUT = (408, "Request Timeout");
    CONFLICT = (409, "Conflict");
    LENGTH_REQUIRED = (411, "Length Required");
    PAYLOAD_TOO_LARGE = (413, "Payload Too Large");
    URI_TOO_LONG = (414, "URI Too Long");
    HEADER_FIELDS_TOO_LARGE = (431, "Request Header Fields Too Large");
    INTERNAL_SERVER_ERROR = (500, "Internal Server Error");
    NOT_IMPLEMENTED = (501, "Not Implemented");
    BAD_GATEWAY = (502, "Bad Gateway");
    SERVICE_UNAVAILABLE = (503, "Service Unavailable");
    GATEWAY_TIMEOUT = (504, "Gateway Timeout");
    HTTP_VERSION_NOT_SUPPORTED = (505, "HTTP Version Not Supported");
}
