//! HTTP-dates and the calendar points behind them.
use std::{fmt::Display, str::FromStr};

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};

use crate::error::{ParseError, ParseErrorKind};

/// Day 1 of the epoch used by [`Timestamp::day_of_epoch()`].
fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1583, 1, 1).unwrap()
}

/// A proleptic-Gregorian calendar point with second precision.
///
/// Ordering compares the date first and the time of day second, which is
/// the same as comparing `(day_of_epoch, hour, minute, second)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    date: NaiveDate,
    time: NaiveTime,
}

impl Timestamp {
    /// Creates a timestamp from calendar fields.
    ///
    /// Returns `None` for fields that do not name a real calendar point,
    /// such as a February 30th.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<Self> {
        Some(Self {
            date: NaiveDate::from_ymd_opt(year, month, day)?,
            time: NaiveTime::from_hms_opt(hour, minute, second)?,
        })
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    pub fn second(&self) -> u32 {
        self.time.second()
    }

    /// Returns the weekday computed from the date fields.
    pub fn day_of_week(&self) -> Weekday {
        self.date.weekday()
    }

    /// Returns the day of the year, starting at 1.
    pub fn day_of_year(&self) -> u32 {
        self.date.ordinal()
    }

    /// Returns the day counted from the epoch; 1583-01-01 is day 1.
    pub fn day_of_epoch(&self) -> i64 {
        self.date.signed_duration_since(epoch()).num_days() + 1
    }

    /// Replaces the date fields, keeping the time of day.
    ///
    /// Returns `false` and leaves the timestamp unchanged when the fields
    /// do not name a real calendar point.
    pub fn set_date(&mut self, year: i32, month: u32, day: u32) -> bool {
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => {
                self.date = date;
                true
            }
            None => false,
        }
    }

    /// Replaces the date fields by a day counted from the epoch, keeping
    /// the time of day.
    ///
    /// Exact inverse of [`day_of_epoch()`](Self::day_of_epoch): setting
    /// day `n` makes `day_of_epoch()` return `n` for every representable
    /// date.
    pub fn set_day_of_epoch(&mut self, day: i64) -> bool {
        match chrono::Duration::try_days(day - 1)
            .and_then(|delta| epoch().checked_add_signed(delta))
        {
            Some(date) => {
                self.date = date;
                true
            }
            None => false,
        }
    }

    /// Replaces the time of day, keeping the date.
    pub fn set_time(&mut self, hour: u32, minute: u32, second: u32) -> bool {
        match NaiveTime::from_hms_opt(hour, minute, second) {
            Some(time) => {
                self.time = time;
                true
            }
            None => false,
        }
    }

    /// Parses the fixed `"Wkday, DD Mon YYYY HH:MM:SS GMT"` format.
    ///
    /// The weekday token is checked for shape only; the stored weekday is
    /// always derived from the date fields.
    pub fn from_rfc7231(input: &str) -> Result<Self, ParseError> {
        let (_remain, parts) = crate::parse::date::imf_fixdate(input)?;

        Self::from_ymd_hms(
            parts.year,
            parts.month,
            parts.day,
            parts.hour,
            parts.minute,
            parts.second,
        )
        .ok_or_else(|| ParseError::new(ParseErrorKind::Syntax).with_snippet(input))
    }

    /// Formats as `"Wkday, DD Mon YYYY HH:MM:SS GMT"` with the computed
    /// weekday.
    pub fn to_rfc7231(&self) -> String {
        format!(
            "{}, {:02} {} {:04} {:02}:{:02}:{:02} GMT",
            weekday_abbrev(self.date.weekday()),
            self.date.day(),
            MONTH_ABBREVS[self.date.month0() as usize],
            self.date.year(),
            self.time.hour(),
            self.time.minute(),
            self.time.second(),
        )
    }
}

const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn weekday_abbrev(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// An HTTP-date header value wrapping a [`Timestamp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HttpDate(pub Timestamp);

impl HttpDate {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Ok(Self(Timestamp::from_rfc7231(input)?))
    }

    pub fn format(&self) -> String {
        self.0.to_rfc7231()
    }

    pub fn timestamp(&self) -> Timestamp {
        self.0
    }
}

impl FromStr for HttpDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for HttpDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format_round_trip() {
        let input = "Wed, 06 Apr 1983 17:00:00 GMT";
        let date = HttpDate::parse(input).unwrap();

        assert_eq!(date.format(), input);
        assert_eq!(date.timestamp().day_of_week(), Weekday::Wed);
    }

    #[test]
    fn test_weekday_recomputed_on_output() {
        let date = HttpDate::parse("Sun, 06 Apr 1983 17:00:00 GMT").unwrap();

        assert_eq!(date.format(), "Wed, 06 Apr 1983 17:00:00 GMT");
    }

    #[test]
    fn test_reject_invalid_date() {
        assert!(HttpDate::parse("Wed, 30 Feb 1983 17:00:00 GMT").is_err());
        assert!(HttpDate::parse("Wed, 06 Apr 1983 25:00:00 GMT").is_err());
        assert!(HttpDate::parse("today").is_err());
    }

    #[test]
    fn test_day_of_epoch() {
        let mut ts = Timestamp::from_ymd_hms(1583, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(ts.day_of_epoch(), 1);

        assert!(ts.set_day_of_epoch(365));
        assert_eq!((ts.year(), ts.month(), ts.day()), (1583, 12, 31));

        assert!(ts.set_day_of_epoch(366));
        assert_eq!((ts.year(), ts.month(), ts.day()), (1584, 1, 1));

        assert!(ts.set_day_of_epoch(365 + 31 + 29));
        assert_eq!((ts.year(), ts.month(), ts.day()), (1584, 2, 29));
    }

    #[test]
    fn test_set_date_inverse() {
        let mut ts = Timestamp::from_ymd_hms(2000, 6, 15, 12, 30, 45).unwrap();

        for day in [1i64, 2, 365, 366, 1000, 100_000, 162_211] {
            assert!(ts.set_day_of_epoch(day));
            assert_eq!(ts.day_of_epoch(), day);

            let (year, month, dom) = (ts.year(), ts.month(), ts.day());
            assert!(ts.set_date(year, month, dom));
            assert_eq!(ts.day_of_epoch(), day);
        }

        assert_eq!(ts.hour(), 12);
        assert_eq!(ts.minute(), 30);
        assert_eq!(ts.second(), 45);
    }

    #[test]
    fn test_set_date_rejects_invalid() {
        let mut ts = Timestamp::from_ymd_hms(2000, 6, 15, 12, 30, 45).unwrap();

        assert!(!ts.set_date(1900, 2, 29));
        assert_eq!((ts.year(), ts.month(), ts.day()), (2000, 6, 15));

        assert!(ts.set_date(2000, 2, 29));
    }

    #[test]
    fn test_day_of_year() {
        let ts = Timestamp::from_ymd_hms(1584, 2, 29, 0, 0, 0).unwrap();
        assert_eq!(ts.day_of_year(), 31 + 29);

        let ts = Timestamp::from_ymd_hms(1583, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(ts.day_of_year(), 1);
    }

    #[test]
    fn test_ordering() {
        let earlier = Timestamp::from_ymd_hms(1999, 12, 31, 23, 59, 59).unwrap();
        let later = Timestamp::from_ymd_hms(2000, 1, 1, 0, 0, 0).unwrap();

        assert!(earlier < later);

        let morning = Timestamp::from_ymd_hms(2000, 1, 1, 8, 0, 0).unwrap();
        let evening = Timestamp::from_ymd_hms(2000, 1, 1, 20, 0, 0).unwrap();

        assert!(morning < evening);
        assert!(morning == morning);
    }
}
