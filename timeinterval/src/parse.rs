//! Range values and the parsers turning human authored tokens into them.
//!
//! Every dimension of a [`TimeInterval`](../struct.TimeInterval.html) is a set of ranges. Tokens
//! are parsed one at a time by the functions in this module and the resulting ranges are handed
//! to the interval. Parsing fails closed: any token that isn't recognized is an error.

#[cfg(not(feature = "std"))]
use alloc::{
    format,
    string::{String, ToString},
    vec::{self, Vec},
};

use core::fmt::{self, Display, Formatter};
use core::iter::{Chain, Once};
use core::slice;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    character::complete::{char, digit1},
    combinator::{all_consuming, map, map_res, opt, recognize, verify},
    sequence::{pair, tuple},
    IResult,
};
use thiserror::Error;

#[cfg(feature = "std")]
use std::vec;

pub use crate::describe::*;

/// The number of minutes in a day. `24:00` parses to this value.
pub const MINUTES_PER_DAY: u16 = 1440;

/// The lower case names of the days of the week, indexed by their ordinal starting at Sunday.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// The lower case names of the months, indexed by their ordinal minus one.
pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// The classification of a [`ParseError`].
///
/// [`ParseError`]: enum.ParseError.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The token does not have the expected shape
    Format,
    /// The token is well formed but violates a bound of its dimension
    Range,
    /// A symbolic name, like a weekday, wasn't recognized
    UnknownValue,
}

/// An error indicating that a token of an interval failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The token doesn't match the shape expected for its dimension.
    #[error("couldn't parse {expected} `{token}`, invalid format")]
    Format {
        /// What the token was expected to be
        expected: &'static str,
        /// The offending token
        token: String,
    },
    /// A time range is missing its start or its end.
    #[error("both start_time and end_time must be provided")]
    MissingTime,
    /// The token is well formed but out of the bounds of its dimension.
    #[error("{reason}: `{token}`")]
    OutOfRange {
        /// The violated bound
        reason: &'static str,
        /// The offending token
        token: String,
    },
    /// A name wasn't recognized.
    #[error("unknown {expected} `{token}`")]
    UnknownValue {
        /// What the name was expected to be
        expected: &'static str,
        /// The offending name
        token: String,
    },
}

impl ParseError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Format { .. } | ParseError::MissingTime => ErrorKind::Format,
            ParseError::OutOfRange { .. } => ErrorKind::Range,
            ParseError::UnknownValue { .. } => ErrorKind::UnknownValue,
        }
    }

    fn format(expected: &'static str, token: &str) -> Self {
        ParseError::Format {
            expected,
            token: token.to_string(),
        }
    }

    fn out_of_range(reason: &'static str, token: &str) -> Self {
        ParseError::OutOfRange {
            reason,
            token: token.to_string(),
        }
    }

    fn unknown(expected: &'static str, token: &str) -> Self {
        ParseError::UnknownValue {
            expected,
            token: token.to_string(),
        }
    }
}

/// A closed range `[begin, end]` over one calendar dimension.
///
/// What the values mean depends on the dimension holding the range:
///
/// | Dimension    | Values                                             |
/// | ------------ | -------------------------------------------------- |
/// | weekday      | 0-6, Sunday is 0                                   |
/// | day of month | 1-31, or -31 to -1 counting from the end of month |
/// | month        | 1-12                                               |
/// | year         | any year                                           |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InclusiveRange {
    begin: i32,
    end: i32,
}

impl InclusiveRange {
    #[inline]
    const fn new(begin: i32, end: i32) -> Self {
        Self { begin, end }
    }

    /// The first value of the range
    #[inline]
    pub const fn begin(&self) -> i32 {
        self.begin
    }

    /// The last value of the range, included in the range
    #[inline]
    pub const fn end(&self) -> i32 {
        self.end
    }

    /// Returns whether the range holds exactly one value.
    #[inline]
    pub const fn is_single(&self) -> bool {
        self.begin == self.end
    }

    /// Returns whether `value` lies within `[begin, end]`.
    #[inline]
    pub const fn contains(&self, value: i32) -> bool {
        self.begin <= value && value <= self.end
    }
}

/// Encodes the range as a token: `begin` for a single value, `begin:end` otherwise.
impl Display for InclusiveRange {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.begin)
        } else {
            write!(f, "{}:{}", self.begin, self.end)
        }
    }
}

/// A half-open range `[start, end)` of minutes in a day, where 0 is 00:00 and 1440 is 24:00.
///
/// 5:00 PM to the end of the day is the range `[1020, 1440)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinuteRange {
    start: u16,
    end: u16,
}

impl MinuteRange {
    /// Creates a new range from minutes of the day, checking `start < end <= 1440`.
    ///
    /// # Example
    /// ```
    /// use timeinterval::parse::MinuteRange;
    ///
    /// assert!(MinuteRange::new(540, 1020).is_ok());
    /// assert!(MinuteRange::new(540, 540).is_err());
    /// assert!(MinuteRange::new(0, 1441).is_err());
    /// ```
    pub fn new(start: u16, end: u16) -> Result<Self, ParseError> {
        if end > MINUTES_PER_DAY {
            return Err(ParseError::out_of_range(
                "end time out of range",
                &format!("{}", Clock(end)),
            ));
        }
        if start >= end {
            return Err(ParseError::out_of_range(
                "start time must be strictly before end time",
                &format!("{}-{}", Clock(start), Clock(end)),
            ));
        }
        Ok(Self { start, end })
    }

    /// The first minute of the range
    #[inline]
    pub const fn start(&self) -> u16 {
        self.start
    }

    /// The minute the range ends at, excluded from the range
    #[inline]
    pub const fn end(&self) -> u16 {
        self.end
    }

    /// The start of the range as an `HH:MM` token
    pub fn start_time(&self) -> impl Display {
        Clock(self.start)
    }

    /// The end of the range as an `HH:MM` token
    pub fn end_time(&self) -> impl Display {
        Clock(self.end)
    }

    /// Returns whether the minute of the day lies within `[start, end)`.
    #[inline]
    pub const fn contains(&self, minute: u32) -> bool {
        self.start as u32 <= minute && minute < self.end as u32
    }
}

impl Display for MinuteRange {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}-{}", Clock(self.start), Clock(self.end))
    }
}

/// Formats a minute of the day as `HH:MM`
#[derive(Clone, Copy)]
struct Clock(u16);

impl Display for Clock {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// A set of ranges with at least one item. The ranges of a set are ORed together.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ranges<R> {
    /// The first range
    pub first: R,
    /// The rest of the ranges in the set.
    pub tail: Vec<R>,
}

/// An immutable iterator over all ranges in a set of [`Ranges`]
///
/// [`Ranges`]: struct.Ranges.html
pub type RangesIter<'a, R> = Chain<Once<&'a R>, slice::Iter<'a, R>>;

/// An owned iterator over all ranges in a set of [`Ranges`]
///
/// [`Ranges`]: struct.Ranges.html
pub type IntoRangesIter<R> = Chain<Once<R>, vec::IntoIter<R>>;

impl<R> Ranges<R> {
    /// Creates a new set of [`Ranges`] using the first given range
    ///
    /// [`Ranges`]: struct.Ranges.html
    pub fn new(first: R) -> Self {
        Self {
            first,
            tail: Vec::new(),
        }
    }

    /// Collects the ranges into a set, returning `None` if there are none.
    pub fn try_collect<I>(iter: I) -> Option<Self>
    where
        I: IntoIterator<Item = R>,
    {
        let mut iter = iter.into_iter();
        let first = iter.next()?;
        Some(Self {
            first,
            tail: iter.collect(),
        })
    }

    /// Iterates over all ranges in this set
    pub fn iter(&self) -> RangesIter<R> {
        core::iter::once(&self.first).chain(self.tail.iter())
    }

    /// The number of ranges in this set, always at least one
    pub fn len(&self) -> usize {
        self.tail.len() + 1
    }
}

impl<R> IntoIterator for Ranges<R> {
    type Item = R;
    type IntoIter = IntoRangesIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        core::iter::once(self.first).chain(self.tail.into_iter())
    }
}

impl<'a, R> IntoIterator for &'a Ranges<R> {
    type Item = &'a R;
    type IntoIter = RangesIter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[inline]
fn two_digits(input: &str) -> IResult<&str, u16> {
    map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_digit()), |s: &str| {
        s.parse::<u16>()
    })(input)
}

/// `HH:MM` with hours 00-23 and minutes 00-59, or exactly `24:00`
fn clock(input: &str) -> IResult<&str, u16> {
    alt((
        map(tag("24:00"), |_| MINUTES_PER_DAY),
        map(
            tuple((
                verify(two_digits, |h: &u16| *h < 24),
                char(':'),
                verify(two_digits, |m: &u16| *m < 60),
            )),
            |(hour, _, minute)| hour * 60 + minute,
        ),
    ))(input)
}

/// An optionally negative decimal integer
fn integer(input: &str) -> IResult<&str, i32> {
    map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
        s.parse::<i32>()
    })(input)
}

/// Parses an `HH:MM` token into the minute of the day it represents.
///
/// `24:00` is the only token accepted with an hour of 24 and represents the end of the day.
///
/// # Example
/// ```
/// use timeinterval::parse::time_of_day;
///
/// assert_eq!(time_of_day("15:23").unwrap(), 923);
/// assert_eq!(time_of_day("24:00").unwrap(), 1440);
/// assert!(time_of_day("24:01").is_err());
/// ```
pub fn time_of_day(token: &str) -> Result<u16, ParseError> {
    all_consuming(clock)(token)
        .map(|(_, minutes)| minutes)
        .map_err(|_| ParseError::format("timestamp", token))
}

/// Parses a pair of `HH:MM` tokens into a [`MinuteRange`]. Either token may be missing in the
/// source, which is an error.
///
/// [`MinuteRange`]: struct.MinuteRange.html
pub fn time_range(start: Option<&str>, end: Option<&str>) -> Result<MinuteRange, ParseError> {
    let start = start.filter(|s| !s.is_empty());
    let end = end.filter(|s| !s.is_empty());
    let (start, end) = match (start, end) {
        (Some(start), Some(end)) => (time_of_day(start)?, time_of_day(end)?),
        _ => return Err(ParseError::MissingTime),
    };
    MinuteRange::new(start, end)
}

/// Splits a `begin` or `begin:end` token
fn split_range<'a>(
    token: &'a str,
    expected: &'static str,
) -> Result<(&'a str, &'a str), ParseError> {
    let mut parts = token.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(one), None, None) if !one.is_empty() => Ok((one, one)),
        (Some(begin), Some(end), None) if !begin.is_empty() && !end.is_empty() => Ok((begin, end)),
        _ => Err(ParseError::format(expected, token)),
    }
}

/// Looks up a case insensitive name in a table of names, returning its index
fn lookup(names: &[&str], name: &str) -> Option<usize> {
    names.iter().position(|n| n.eq_ignore_ascii_case(name))
}

fn weekday(name: &str) -> Result<i32, ParseError> {
    lookup(&WEEKDAY_NAMES, name)
        .map(|day| day as i32)
        .ok_or_else(|| ParseError::unknown("day of week", name))
}

/// Parses a weekday token, either a single day name or a `name:name` range.
///
/// Names are case insensitive. Ranges don't wrap around the end of the week, so the start day
/// can't come after the end day.
///
/// # Example
/// ```
/// use timeinterval::parse::weekday_range;
///
/// let range = weekday_range("Monday:friday").unwrap();
/// assert_eq!((range.begin(), range.end()), (1, 5));
///
/// assert!(weekday_range("friday:monday").is_err());
/// ```
pub fn weekday_range(token: &str) -> Result<InclusiveRange, ParseError> {
    let (begin, end) = split_range(token, "day of week range")?;
    let (begin, end) = (weekday(begin)?, weekday(end)?);
    if begin > end {
        return Err(ParseError::out_of_range(
            "start day cannot be after end day",
            token,
        ));
    }
    Ok(InclusiveRange::new(begin, end))
}

fn parse_integer(value: &str, expected: &'static str) -> Result<i32, ParseError> {
    all_consuming(integer)(value)
        .map(|(_, v)| v)
        .map_err(|_| ParseError::format(expected, value))
}

fn integer_range(token: &str, expected: &'static str) -> Result<(i32, i32), ParseError> {
    let (begin, end) = split_range(token, expected)?;
    Ok((parse_integer(begin, expected)?, parse_integer(end, expected)?))
}

/// Parses a day of the month token, either one day or a `begin:end` range.
///
/// Negative days count from the end of the month, -1 being the last day. Both ends of a range
/// must be on the same side of zero, except for ranges running from a positive day to `-1`, the
/// last day of the month.
///
/// # Example
/// ```
/// use timeinterval::parse::day_of_month_range;
///
/// assert!(day_of_month_range("-3:-1").is_ok());
/// assert!(day_of_month_range("1:-1").is_ok());
///
/// assert!(day_of_month_range("0").is_err());
/// assert!(day_of_month_range("-15:5").is_err());
/// assert!(day_of_month_range("10:-25").is_err());
/// ```
pub fn day_of_month_range(token: &str) -> Result<InclusiveRange, ParseError> {
    let (begin, end) = integer_range(token, "day of month range")?;
    for day in [begin, end].iter() {
        if *day == 0 {
            return Err(ParseError::out_of_range(
                "0 is not a valid day of the month",
                token,
            ));
        }
        if *day < -31 || *day > 31 {
            return Err(ParseError::out_of_range(
                "day of the month out of range",
                token,
            ));
        }
    }
    match (begin > 0, end > 0) {
        (true, true) | (false, false) if begin <= end => Ok(InclusiveRange::new(begin, end)),
        (true, true) | (false, false) => Err(ParseError::out_of_range(
            "start day cannot be after end day",
            token,
        )),
        (true, false) if end == -1 => Ok(InclusiveRange::new(begin, end)),
        _ => Err(ParseError::out_of_range(
            "days on both sides of zero can only range up to -1",
            token,
        )),
    }
}

fn month(value: &str) -> Result<i32, ParseError> {
    if value.chars().all(|c| c.is_ascii_alphabetic()) {
        return lookup(&MONTH_NAMES, value)
            .map(|m| m as i32 + 1)
            .ok_or_else(|| ParseError::unknown("month", value));
    }
    let month = parse_integer(value, "month")?;
    if !(1..=12).contains(&month) {
        return Err(ParseError::out_of_range("month out of range", value));
    }
    Ok(month)
}

/// Parses a month token: a month from 1 to 12 or a month name, or a `begin:end` range of them.
///
/// # Example
/// ```
/// use timeinterval::parse::month_range;
///
/// assert_eq!(month_range("january:march").unwrap(), month_range("1:3").unwrap());
/// assert!(month_range("13").is_err());
/// ```
pub fn month_range(token: &str) -> Result<InclusiveRange, ParseError> {
    let (begin, end) = split_range(token, "month range")?;
    let (begin, end) = (month(begin)?, month(end)?);
    if begin > end {
        return Err(ParseError::out_of_range(
            "start month cannot be after end month",
            token,
        ));
    }
    Ok(InclusiveRange::new(begin, end))
}

/// Parses a year token, either one year or a `begin:end` range.
pub fn year_range(token: &str) -> Result<InclusiveRange, ParseError> {
    let (begin, end) = integer_range(token, "year range")?;
    if begin > end {
        return Err(ParseError::out_of_range(
            "start year cannot be after end year",
            token,
        ));
    }
    Ok(InclusiveRange::new(begin, end))
}

/// Formats a weekday range using day names, the inverse of [`weekday_range`].
///
/// [`weekday_range`]: fn.weekday_range.html
pub fn weekday_token(range: &InclusiveRange) -> String {
    let name = |day: i32| WEEKDAY_NAMES[day.rem_euclid(7) as usize];
    if range.is_single() {
        name(range.begin()).to_string()
    } else {
        format!("{}:{}", name(range.begin()), name(range.end()))
    }
}
