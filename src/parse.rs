//! Parsing utilities.
use crate::buffer::RewindBuffer;

pub(crate) mod date;
pub(crate) mod fields;
pub(crate) mod start_line;

/// Scans the buffer for the empty line that terminates a head.
///
/// Bytes are consumed speculatively from the buffer; whether the
/// terminator is found or not, the consumption cursor is rewound to where
/// it was on entry so the bytes remain readable. On a partial match the
/// bytes stay unread for the next attempt once more input has arrived.
///
/// Returns the length (inclusive of the terminator) of the head in front
/// of the cursor, or `None` when no empty line has arrived yet. Both CRLF
/// and bare LF line endings are recognized.
pub fn scan_head_end(buf: &mut RewindBuffer<u8>) -> Option<usize> {
    let entry = buf.consumed();
    let mut scanned = 0usize;
    let mut line_len = 0usize;
    let mut pending_cr = false;
    let mut found = None;

    while let Some(&byte) = buf.pop_front() {
        scanned += 1;

        match byte {
            b'\n' => {
                if line_len == 0 {
                    found = Some(scanned);
                    break;
                }

                line_len = 0;
                pending_cr = false;
            }
            b'\r' => {
                // Part of a CRLF ending unless another byte follows.
                if pending_cr {
                    line_len += 1;
                }
                pending_cr = true;
            }
            _ => {
                if pending_cr {
                    line_len += 1;
                    pending_cr = false;
                }
                line_len += 1;
            }
        }
    }

    while buf.consumed() > entry {
        buf.unpop_front();
    }

    found
}

/// Parse a value into a `u64`.
///
/// Unlike [`str::parse()`], only ASCII digits are permitted. Use of std
/// library parsing functions may lead to security issues.
pub fn parse_u64_strict(value: &str) -> Result<u64, std::num::ParseIntError> {
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return "?".parse();
    }

    value.parse()
}
