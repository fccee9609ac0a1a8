use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while, take_while1},
    character::complete::{digit1, line_ending},
    combinator::{map, recognize, verify},
    sequence::terminated,
};

pub enum StartLineRef<'a> {
    Request(RequestLineRef<'a>),
    Status(StatusLineRef<'a>),
}

pub struct RequestLineRef<'a> {
    pub method: &'a [u8],
    pub target: &'a [u8],
    pub version: &'a [u8],
}

pub struct StatusLineRef<'a> {
    pub version: &'a [u8],
    pub status_code: &'a [u8],
    pub reason_phrase: &'a [u8],
}

pub fn start_line(input: &[u8]) -> IResult<&[u8], StartLineRef<'_>> {
    let status = map(status_line, StartLineRef::Status);
    let request = map(request_line, StartLineRef::Request);

    terminated(alt((status, request)), line_ending).parse(input)
}

pub fn request_line(input: &[u8]) -> IResult<&[u8], RequestLineRef<'_>> {
    let parts = (method, tag(" "), request_target, tag(" "), http_version);

    map(parts, |output| RequestLineRef {
        method: output.0,
        target: output.2,
        version: output.4,
    })
    .parse(input)
}

pub fn status_line(input: &[u8]) -> IResult<&[u8], StatusLineRef<'_>> {
    alt((status_line_strict, status_line_bare)).parse(input)
}

fn status_line_strict(input: &[u8]) -> IResult<&[u8], StatusLineRef<'_>> {
    let parts = (http_version, tag(" "), status_code, tag(" "), reason_phrase);

    map(parts, |output| StatusLineRef {
        version: output.0,
        status_code: output.2,
        reason_phrase: output.4,
    })
    .parse(input)
}

// Some servers omit the space and reason phrase entirely.
fn status_line_bare(input: &[u8]) -> IResult<&[u8], StatusLineRef<'_>> {
    let parts = (http_version, tag(" "), status_code);

    map(parts, |output: (&[u8], &[u8], &[u8])| StatusLineRef {
        version: output.0,
        status_code: output.2,
        reason_phrase: b"",
    })
    .parse(input)
}

fn method(input: &[u8]) -> IResult<&[u8], &[u8]> {
    super::fields::token(input)
}

fn request_target(input: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while1(|c: u8| c.is_ascii_graphic()).parse(input)
}

fn http_version(input: &[u8]) -> IResult<&[u8], &[u8]> {
    // Newer HTTP specifications require the http-name to be
    // case-sensitive, but we should be lenient instead.
    recognize((
        tag_no_case("HTTP"),
        tag("/"),
        one_digit,
        tag("."),
        one_digit,
    ))
    .parse(input)
}

fn one_digit(input: &[u8]) -> IResult<&[u8], &[u8]> {
    verify(digit1, |i: &[u8]| i.len() == 1).parse(input)
}

fn status_code(input: &[u8]) -> IResult<&[u8], &[u8]> {
    verify(digit1, |i: &[u8]| i.len() == 3).parse(input)
}

fn reason_phrase(input: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while(|b: u8| {
        b.is_ascii_graphic() || b == b' ' || b == b'\t' || super::fields::is_obs_text(b)
    })
    .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_line() {
        let (_remain, output) = start_line(b"GET /index.html HTTP/1.1\r\n").unwrap();

        let StartLineRef::Request(line) = output else {
            panic!()
        };

        assert_eq!(line.method, b"GET");
        assert_eq!(line.target, b"/index.html");
        assert_eq!(line.version, b"HTTP/1.1");
    }

    #[test]
    fn test_status_line() {
        let (_remain, output) = start_line(b"HTTP/1.1 404 Not Found\r\n").unwrap();

        let StartLineRef::Status(line) = output else {
            panic!()
        };

        assert_eq!(line.version, b"HTTP/1.1");
        assert_eq!(line.status_code, b"404");
        assert_eq!(line.reason_phrase, b"Not Found");
    }

    #[test]
    fn test_status_line_bare() {
        let (_remain, output) = start_line(b"HTTP/1.0 204\r\n").unwrap();

        let StartLineRef::Status(line) = output else {
            panic!()
        };

        assert_eq!(line.status_code, b"204");
        assert_eq!(line.reason_phrase, b"");
    }

    #[test]
    fn test_bad_start_line() {
        assert!(start_line(b"ICY 200 OK\r\n").is_err());
        assert!(start_line(b"\r\n").is_err());
    }
}
