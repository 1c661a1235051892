//! The structured shape of an interval in configuration files.
//!
//! ```yaml
//! - times:
//!     - start_time: '09:00'
//!       end_time: '17:00'
//!   weekdays: ['monday:friday', 'saturday']
//!   days_of_month: ['1:-1', 15]
//!   months: ['january:march', 12]
//!   years: ['2020:2025']
//! ```
//!
//! Integer tokens may be written as bare integers or as strings. Decoding validates every token
//! and rejects the whole interval on the first invalid one.

#[cfg(not(feature = "std"))]
use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use core::convert::TryFrom;
use serde::{Deserialize, Serialize};

use crate::parse::{self, InclusiveRange, MinuteRange, ParseError, Ranges};
use crate::TimeInterval;

/// A time range as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TimeRangeDef {
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    end_time: Option<String>,
}

/// An integer range token, either a bare integer or a `begin:end` string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum Token {
    Integer(i32),
    Text(String),
}

impl Token {
    fn parse<F>(&self, f: F) -> Result<InclusiveRange, ParseError>
    where
        F: Fn(&str) -> Result<InclusiveRange, ParseError>,
    {
        match self {
            Token::Integer(value) => f(&value.to_string()),
            Token::Text(text) => f(text),
        }
    }

    fn encode(range: &InclusiveRange) -> Self {
        if range.is_single() {
            Token::Integer(range.begin())
        } else {
            Token::Text(range.to_string())
        }
    }
}

/// A time interval as written in configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TimeIntervalDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    times: Option<Vec<TimeRangeDef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weekdays: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    days_of_month: Option<Vec<Token>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    months: Option<Vec<Token>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    years: Option<Vec<Token>>,
}

fn parse_all<T, U, F>(tokens: Option<Vec<T>>, f: F) -> Result<Vec<U>, ParseError>
where
    F: Fn(&T) -> Result<U, ParseError>,
{
    tokens.unwrap_or_default().iter().map(f).collect()
}

fn encode_all<R, T, F>(ranges: Option<&Ranges<R>>, f: F) -> Option<Vec<T>>
where
    F: Fn(&R) -> T,
{
    ranges.map(|ranges| ranges.iter().map(f).collect())
}

impl TryFrom<TimeIntervalDef> for TimeInterval {
    type Error = ParseError;

    fn try_from(def: TimeIntervalDef) -> Result<Self, Self::Error> {
        let decode = || -> Result<Self, ParseError> {
            let times = parse_all(def.times, |t: &TimeRangeDef| {
                parse::time_range(t.start_time.as_deref(), t.end_time.as_deref())
            })?;
            let weekdays = parse_all(def.weekdays, |w: &String| parse::weekday_range(w))?;
            let days_of_month = parse_all(def.days_of_month, |t: &Token| {
                t.parse(parse::day_of_month_range)
            })?;
            let months = parse_all(def.months, |t: &Token| t.parse(parse::month_range))?;
            let years = parse_all(def.years, |t: &Token| t.parse(parse::year_range))?;

            Ok(TimeInterval::new()
                .with_times(times)
                .with_weekdays(weekdays)
                .with_days_of_month(days_of_month)
                .with_months(months)
                .with_years(years))
        };

        decode().map_err(|err| {
            tracing::debug!(kind = ?err.kind(), error = %err, "rejected time interval");
            err
        })
    }
}

impl From<TimeInterval> for TimeIntervalDef {
    fn from(interval: TimeInterval) -> Self {
        TimeIntervalDef {
            times: encode_all(interval.times(), |range: &MinuteRange| TimeRangeDef {
                start_time: Some(range.start_time().to_string()),
                end_time: Some(range.end_time().to_string()),
            }),
            weekdays: encode_all(interval.weekdays(), parse::weekday_token),
            days_of_month: encode_all(interval.days_of_month(), Token::encode),
            months: encode_all(interval.months(), Token::encode),
            years: encode_all(interval.years(), Token::encode),
        }
    }
}
