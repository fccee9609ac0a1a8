use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    combinator::{all_consuming, map, map_res, value},
};

/// Raw calendar fields of an IMF-fixdate.
///
/// The weekday token is required for shape but its value is discarded;
/// the weekday is always recomputed from the date fields.
pub struct DateParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

pub fn imf_fixdate(input: &str) -> IResult<&str, DateParts> {
    let parts = (
        weekday_name,
        tag(", "),
        two_digits,
        tag(" "),
        month_name,
        tag(" "),
        four_digits,
        tag(" "),
        two_digits,
        tag(":"),
        two_digits,
        tag(":"),
        two_digits,
        tag(" GMT"),
    );

    map(all_consuming(parts), |output| DateParts {
        year: output.6,
        month: output.4,
        day: output.2,
        hour: output.8,
        minute: output.10,
        second: output.12,
    })
    .parse(input)
}

fn weekday_name(input: &str) -> IResult<&str, &str> {
    alt((
        tag("Mon"),
        tag("Tue"),
        tag("Wed"),
        tag("Thu"),
        tag("Fri"),
        tag("Sat"),
        tag("Sun"),
    ))
    .parse(input)
}

fn month_name(input: &str) -> IResult<&str, u32> {
    alt((
        value(1u32, tag("Jan")),
        value(2, tag("Feb")),
        value(3, tag("Mar")),
        value(4, tag("Apr")),
        value(5, tag("May")),
        value(6, tag("Jun")),
        value(7, tag("Jul")),
        value(8, tag("Aug")),
        value(9, tag("Sep")),
        value(10, tag("Oct")),
        value(11, tag("Nov")),
        value(12, tag("Dec")),
    ))
    .parse(input)
}

fn two_digits(input: &str) -> IResult<&str, u32> {
    map_res(
        take_while_m_n(2, 2, |c: char| c.is_ascii_digit()),
        str::parse,
    )
    .parse(input)
}

fn four_digits(input: &str) -> IResult<&str, i32> {
    map_res(
        take_while_m_n(4, 4, |c: char| c.is_ascii_digit()),
        str::parse,
    )
    .parse(input)
}
