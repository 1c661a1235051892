//! Checks whether an instant falls within a recurring time window, like a maintenance window
//! or the hours an alert should stay muted.
//!
//! A [`TimeInterval`] is a conjunction of independent dimensions: times of the day, days of the
//! week, days of the month, months, and years. Each dimension is a set of ranges, any of which
//! can match, and a dimension that isn't set matches everything.
//!
//! [`TimeInterval`]: struct.TimeInterval.html

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod describe;
#[cfg(feature = "serde")]
mod encoding;
pub mod parse;

use chrono::{Datelike, Timelike};

use self::parse::{InclusiveRange, Language, LanguageFormatter, MinuteRange, Ranges};

/// Returns the number of days in the month, 28-31
///
/// # Panics
/// Panics if the month isn't within 1-12.
///
/// # Example
/// ```
/// use timeinterval::days_in_month;
///
/// assert_eq!(days_in_month(2020, 2), 29);
/// assert_eq!(days_in_month(2100, 2), 28);
/// assert_eq!(days_in_month(2021, 4), 30);
/// ```
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if year % 4 != 0 {
                28
            } else if year % 100 != 0 {
                29
            } else if year % 400 != 0 {
                28
            } else {
                29
            }
        }
        _ => unreachable!(),
    }
}

trait TimePattern {
    /// The name of the dimension, as it's written in configuration
    const NAME: &'static str;

    /// Checks if any range of the pattern contains the given date and time.
    fn contains<T: Datelike + Timelike>(&self, dt: &T) -> bool;
}

/// Ranges of minutes in a day.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
struct Times(Ranges<MinuteRange>);
impl TimePattern for Times {
    const NAME: &'static str = "times";

    #[inline]
    fn contains<T: Datelike + Timelike>(&self, dt: &T) -> bool {
        let minute = dt.hour() * 60 + dt.minute();
        self.0.iter().any(|range| range.contains(minute))
    }
}

/// Ranges of days of the week, 0-6 starting on Sunday.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
struct Weekdays(Ranges<InclusiveRange>);
impl TimePattern for Weekdays {
    const NAME: &'static str = "weekdays";

    #[inline]
    fn contains<T: Datelike + Timelike>(&self, dt: &T) -> bool {
        let weekday = dt.weekday().num_days_from_sunday() as i32;
        self.0.iter().any(|range| range.contains(weekday))
    }
}

/// Ranges of days of the month. Negative days are resolved against the length of the month of
/// every checked date, so `-1` is the 29th in February 2020 and the 31st in March.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
struct DaysOfMonth(Ranges<InclusiveRange>);
impl TimePattern for DaysOfMonth {
    const NAME: &'static str = "days_of_month";

    #[inline]
    fn contains<T: Datelike + Timelike>(&self, dt: &T) -> bool {
        let days = days_in_month(dt.year(), dt.month()) as i32;
        let resolve = |day: i32| if day < 0 { days + day + 1 } else { day };
        let day = dt.day() as i32;

        self.0
            .iter()
            .any(|range| resolve(range.begin()) <= day && day <= resolve(range.end()))
    }
}

/// Ranges of months, 1-12.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
struct Months(Ranges<InclusiveRange>);
impl TimePattern for Months {
    const NAME: &'static str = "months";

    #[inline]
    fn contains<T: Datelike + Timelike>(&self, dt: &T) -> bool {
        let month = dt.month() as i32;
        self.0.iter().any(|range| range.contains(month))
    }
}

/// Ranges of years.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
struct Years(Ranges<InclusiveRange>);
impl TimePattern for Years {
    const NAME: &'static str = "years";

    #[inline]
    fn contains<T: Datelike + Timelike>(&self, dt: &T) -> bool {
        let year = dt.year();
        self.0.iter().any(|range| range.contains(year))
    }
}

/// Checks an optional pattern, an unset pattern matches everything.
#[inline]
fn check<P: TimePattern, T: Datelike + Timelike>(pattern: &Option<P>, dt: &T) -> bool {
    match pattern {
        Some(pattern) if !pattern.contains(dt) => {
            tracing::trace!(dimension = P::NAME, "time is outside of the interval");
            false
        }
        _ => true,
    }
}

/// A recurring time window. An interval contains a time when every dimension it sets has at
/// least one range containing that time.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use timeinterval::{parse, TimeInterval};
///
/// // 9 AM to 5 PM, Monday to Friday
/// let interval = TimeInterval::new()
///     .with_times(Some(parse::time_range(Some("09:00"), Some("17:00"))?))
///     .with_weekdays(Some(parse::weekday_range("monday:friday")?));
///
/// // Wednesday
/// let wednesday = NaiveDate::from_ymd_opt(2020, 7, 8).unwrap();
/// assert!(interval.contains(wednesday.and_hms_opt(9, 0, 0).unwrap()));
/// assert!(interval.contains(wednesday.and_hms_opt(16, 59, 59).unwrap()));
/// assert!(!interval.contains(wednesday.and_hms_opt(17, 0, 0).unwrap()));
///
/// // Sunday
/// let sunday = NaiveDate::from_ymd_opt(2020, 7, 12).unwrap();
/// assert!(!interval.contains(sunday.and_hms_opt(12, 0, 0).unwrap()));
/// # Ok::<(), timeinterval::parse::ParseError>(())
/// ```
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "encoding::TimeIntervalDef",
        into = "encoding::TimeIntervalDef"
    )
)]
pub struct TimeInterval {
    times: Option<Times>,
    weekdays: Option<Weekdays>,
    days_of_month: Option<DaysOfMonth>,
    months: Option<Months>,
    years: Option<Years>,
}

impl TimeInterval {
    /// Creates an interval without any set dimension, containing every time.
    pub const fn new() -> Self {
        Self {
            times: None,
            weekdays: None,
            days_of_month: None,
            months: None,
            years: None,
        }
    }

    /// Restricts the interval to the given ranges of minutes in the day. If no ranges are
    /// given, the times of the day are left unrestricted.
    pub fn with_times<I>(self, ranges: I) -> Self
    where
        I: IntoIterator<Item = MinuteRange>,
    {
        Self {
            times: Ranges::try_collect(ranges).map(Times),
            ..self
        }
    }

    /// Restricts the interval to the given ranges of weekdays, as parsed by
    /// [`weekday_range`](parse/fn.weekday_range.html).
    pub fn with_weekdays<I>(self, ranges: I) -> Self
    where
        I: IntoIterator<Item = InclusiveRange>,
    {
        Self {
            weekdays: Ranges::try_collect(ranges).map(Weekdays),
            ..self
        }
    }

    /// Restricts the interval to the given ranges of days of the month, as parsed by
    /// [`day_of_month_range`](parse/fn.day_of_month_range.html).
    pub fn with_days_of_month<I>(self, ranges: I) -> Self
    where
        I: IntoIterator<Item = InclusiveRange>,
    {
        Self {
            days_of_month: Ranges::try_collect(ranges).map(DaysOfMonth),
            ..self
        }
    }

    /// Restricts the interval to the given ranges of months, as parsed by
    /// [`month_range`](parse/fn.month_range.html).
    pub fn with_months<I>(self, ranges: I) -> Self
    where
        I: IntoIterator<Item = InclusiveRange>,
    {
        Self {
            months: Ranges::try_collect(ranges).map(Months),
            ..self
        }
    }

    /// Restricts the interval to the given ranges of years, as parsed by
    /// [`year_range`](parse/fn.year_range.html).
    pub fn with_years<I>(self, ranges: I) -> Self
    where
        I: IntoIterator<Item = InclusiveRange>,
    {
        Self {
            years: Ranges::try_collect(ranges).map(Years),
            ..self
        }
    }

    /// The ranges of minutes in the day, if set
    pub fn times(&self) -> Option<&Ranges<MinuteRange>> {
        self.times.as_ref().map(|t| &t.0)
    }

    /// The ranges of weekdays, if set
    pub fn weekdays(&self) -> Option<&Ranges<InclusiveRange>> {
        self.weekdays.as_ref().map(|w| &w.0)
    }

    /// The ranges of days of the month, if set
    pub fn days_of_month(&self) -> Option<&Ranges<InclusiveRange>> {
        self.days_of_month.as_ref().map(|d| &d.0)
    }

    /// The ranges of months, if set
    pub fn months(&self) -> Option<&Ranges<InclusiveRange>> {
        self.months.as_ref().map(|m| &m.0)
    }

    /// The ranges of years, if set
    pub fn years(&self) -> Option<&Ranges<InclusiveRange>> {
        self.years.as_ref().map(|y| &y.0)
    }

    /// Returns whether no dimension is set, in which case the interval contains every time.
    pub fn is_unrestricted(&self) -> bool {
        self.times.is_none()
            && self.weekdays.is_none()
            && self.days_of_month.is_none()
            && self.months.is_none()
            && self.years.is_none()
    }

    /// Returns whether this interval contains the given time.
    ///
    /// The calendar fields of the value are used as is, so a `DateTime` should already be in
    /// the time zone the interval was written for.
    #[inline]
    pub fn contains<T>(&self, dt: T) -> bool
    where
        T: Datelike + Timelike,
    {
        check(&self.times, &dt)
            && check(&self.weekdays, &dt)
            && check(&self.days_of_month, &dt)
            && check(&self.months, &dt)
            && check(&self.years, &dt)
    }

    /// Returns a formatter to display the interval in the provided language
    ///
    /// # Example
    /// ```
    /// use timeinterval::{parse::{self, English}, TimeInterval};
    ///
    /// let interval = TimeInterval::new()
    ///     .with_times(Some(parse::time_range(Some("09:00"), Some("17:00")).unwrap()))
    ///     .with_weekdays(Some(parse::weekday_range("monday:friday").unwrap()))
    ///     .with_months(Some(parse::month_range("december").unwrap()));
    ///
    /// assert_eq!(
    ///     interval.describe(English::default()).to_string(),
    ///     "Between 9:00 AM and 5:00 PM, on Monday through Friday, in December"
    /// );
    /// ```
    pub fn describe<L: Language>(&self, lang: L) -> LanguageFormatter<L> {
        LanguageFormatter::new(self, lang)
    }
}

/// Returns whether any of the intervals contains the given time.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use timeinterval::{contains_any, parse, TimeInterval};
///
/// let intervals = [
///     TimeInterval::new().with_weekdays(Some(parse::weekday_range("saturday").unwrap())),
///     TimeInterval::new().with_days_of_month(Some(parse::day_of_month_range("-1").unwrap())),
/// ];
///
/// // Friday, the last day of July
/// let time = NaiveDate::from_ymd_opt(2020, 7, 31).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// assert!(contains_any(&intervals, time));
/// assert!(!contains_any(&intervals, time - chrono::Duration::days(1)));
/// ```
pub fn contains_any<'a, I, T>(intervals: I, dt: T) -> bool
where
    I: IntoIterator<Item = &'a TimeInterval>,
    T: Datelike + Timelike + Copy,
{
    intervals.into_iter().any(|interval| interval.contains(dt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "std"))]
    use alloc::vec;

    use crate::parse::{
        day_of_month_range, month_range, time_range, weekday_range, year_range,
    };
    use chrono::NaiveDateTime;

    const FORMAT: &str = "%F %T";

    fn time(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, FORMAT).expect("Failed to parse expected date")
    }

    fn check_does_contain(interval: &TimeInterval, dates: &[&str]) {
        for date in dates {
            assert!(
                interval.contains(time(date)),
                "Interval {:#?} should contain {}",
                interval,
                date
            );
        }
    }

    fn check_does_not_contain(interval: &TimeInterval, dates: &[&str]) {
        for date in dates {
            assert!(
                !interval.contains(time(date)),
                "Interval {:#?} shouldn't contain {}",
                interval,
                date
            );
        }
    }

    fn times(start: &str, end: &str) -> MinuteRange {
        time_range(Some(start), Some(end)).unwrap()
    }

    #[test]
    fn days_in_months() {
        assert_eq!(days_in_month(2020, 1), 31);
        assert_eq!(days_in_month(2020, 2), 29);
        assert_eq!(days_in_month(2019, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2020, 6), 30);
        assert_eq!(days_in_month(2020, 12), 31);
    }

    #[test]
    fn unrestricted_contains_anytime() {
        let interval = TimeInterval::new();
        assert!(interval.is_unrestricted());
        assert_eq!(interval, TimeInterval::default());

        check_does_contain(
            &interval,
            &[
                "2006-01-02 15:04:00",
                "2007-01-03 10:04:00",
                "1970-01-01 00:00:00",
                "2072-02-29 23:59:59",
            ],
        );
    }

    #[test]
    fn business_hours() {
        // 9am to 5pm, monday to friday
        let interval = TimeInterval::new()
            .with_times(Some(times("09:00", "17:00")))
            .with_weekdays(Some(weekday_range("monday:friday").unwrap()));

        check_does_contain(
            &interval,
            &[
                "2020-05-04 15:04:00",
                "2020-05-05 10:04:00",
                "2020-06-09 09:04:00",
                "2020-07-08 09:00:00",
                "2020-07-08 16:59:59",
            ],
        );
        check_does_not_contain(
            &interval,
            &[
                // Sunday
                "2020-05-03 15:04:00",
                "2020-05-04 08:59:00",
                "2020-05-05 05:00:00",
                "2020-07-08 08:59:59",
                "2020-07-08 17:00:00",
            ],
        );
    }

    #[test]
    fn time_boundaries() {
        let interval = TimeInterval::new().with_times(Some(times("09:00", "17:00")));

        check_does_contain(&interval, &["2020-07-08 09:00:00", "2020-07-08 16:59:59"]);
        check_does_not_contain(&interval, &["2020-07-08 08:59:59", "2020-07-08 17:00:00"]);

        let whole_day = TimeInterval::new().with_times(Some(times("00:00", "24:00")));
        check_does_contain(&whole_day, &["2020-07-08 00:00:00", "2020-07-08 23:59:59"]);
    }

    #[test]
    fn easter_2020() {
        let interval = TimeInterval::new()
            .with_days_of_month(Some(day_of_month_range("4:6").unwrap()))
            .with_months(Some(month_range("april").unwrap()))
            .with_years(Some(year_range("2020").unwrap()));

        check_does_contain(
            &interval,
            &[
                "2020-04-04 15:04:00",
                "2020-04-05 00:00:00",
                "2020-04-06 23:05:00",
            ],
        );
        check_does_not_contain(
            &interval,
            &[
                "2018-05-03 15:04:00",
                "2020-04-03 23:59:00",
                "2020-06-04 23:59:00",
                "2019-04-06 23:59:00",
                "2020-04-07 00:00:00",
            ],
        );
    }

    #[test]
    fn last_days_of_month() {
        // last 3 days of each month
        let interval =
            TimeInterval::new().with_days_of_month(Some(day_of_month_range("-3:-1").unwrap()));

        check_does_contain(
            &interval,
            &[
                "2020-01-29 15:04:00",
                "2020-01-30 15:04:00",
                "2020-01-31 15:04:00",
                "2020-06-30 00:00:00",
                // leap year
                "2020-02-27 00:00:00",
                "2020-02-29 23:05:00",
                "2021-02-26 00:00:00",
                "2021-02-28 00:00:00",
            ],
        );
        check_does_not_contain(
            &interval,
            &[
                "2018-05-03 15:04:00",
                "2020-01-27 15:04:00",
                "2020-01-28 23:59:59",
                "2020-04-03 23:59:00",
                "2020-03-01 00:00:00",
                "2020-02-26 23:59:59",
                "2021-02-25 23:59:59",
            ],
        );
    }

    #[test]
    fn last_day_resolves_per_month() {
        let interval =
            TimeInterval::new().with_days_of_month(Some(day_of_month_range("-1").unwrap()));

        check_does_contain(
            &interval,
            &[
                "2020-02-29 12:00:00",
                "2021-02-28 12:00:00",
                "2020-03-31 12:00:00",
                "2020-04-30 12:00:00",
            ],
        );
        check_does_not_contain(
            &interval,
            &[
                "2021-02-27 12:00:00",
                "2020-03-30 12:00:00",
                "2020-04-29 12:00:00",
            ],
        );
    }

    #[test]
    fn first_to_last_day_matches_every_day() {
        let interval =
            TimeInterval::new().with_days_of_month(Some(day_of_month_range("1:-1").unwrap()));

        for year in &[2019, 2020, 2100] {
            for month in 1..=12 {
                for day in 1..=days_in_month(*year, month) {
                    let date = chrono::NaiveDate::from_ymd_opt(*year, month, day)
                        .unwrap()
                        .and_hms_opt(12, 0, 0)
                        .unwrap();
                    assert!(interval.contains(date), "{} should be contained", date);
                }
            }
        }
    }

    #[test]
    fn days_past_the_end_of_the_month_never_match() {
        let interval =
            TimeInterval::new().with_days_of_month(Some(day_of_month_range("31").unwrap()));

        check_does_contain(&interval, &["2020-01-31 00:00:00"]);
        check_does_not_contain(&interval, &["2020-04-30 00:00:00", "2020-05-01 00:00:00"]);

        let interval =
            TimeInterval::new().with_days_of_month(Some(day_of_month_range("-31").unwrap()));

        check_does_contain(&interval, &["2020-01-01 00:00:00", "2020-03-01 00:00:00"]);
        check_does_not_contain(&interval, &["2020-02-01 00:00:00", "2020-04-01 00:00:00"]);
    }

    #[test]
    fn ranges_within_a_dimension_are_ored() {
        let interval = TimeInterval::new().with_weekdays(vec![
            weekday_range("monday:friday").unwrap(),
            weekday_range("saturday").unwrap(),
        ]);

        check_does_contain(
            &interval,
            &[
                // Wednesday
                "2020-07-08 12:00:00",
                // Saturday
                "2020-07-11 12:00:00",
            ],
        );
        // Sunday
        check_does_not_contain(&interval, &["2020-07-12 12:00:00"]);

        // A later range matches even though the first one doesn't
        let interval = TimeInterval::new()
            .with_times(vec![times("09:00", "10:00"), times("17:00", "18:00")])
            .with_days_of_month(vec![
                day_of_month_range("1:2").unwrap(),
                day_of_month_range("-2:-1").unwrap(),
            ])
            .with_months(vec![month_range("1").unwrap(), month_range("6:7").unwrap()])
            .with_years(vec![year_range("2018").unwrap(), year_range("2020").unwrap()]);

        check_does_contain(
            &interval,
            &[
                "2020-06-30 17:30:00",
                "2018-07-01 09:59:00",
                "2020-01-31 17:00:00",
            ],
        );
        check_does_not_contain(
            &interval,
            &[
                "2019-06-30 17:30:00",
                "2020-06-30 12:00:00",
                "2020-06-15 17:30:00",
                "2020-05-31 17:30:00",
            ],
        );
    }

    #[test]
    fn dimensions_are_anded() {
        let interval = TimeInterval::new()
            .with_times(Some(times("09:00", "17:00")))
            .with_weekdays(Some(weekday_range("saturday:saturday").unwrap()));

        // matches only the time
        check_does_not_contain(&interval, &["2020-07-08 12:00:00"]);
        // matches only the weekday
        check_does_not_contain(&interval, &["2020-07-11 08:00:00"]);
        // matches both
        check_does_contain(&interval, &["2020-07-11 12:00:00"]);
    }

    #[test]
    fn first_quarter_last_week() {
        // Last week, excluding Saturday, of the first quarter of the year during business
        // hours from 2020 to 2025 and 2030-2035
        let interval = TimeInterval::new()
            .with_weekdays(vec![
                weekday_range("monday:friday").unwrap(),
                weekday_range("sunday").unwrap(),
            ])
            .with_months(Some(month_range("january:march").unwrap()))
            .with_days_of_month(Some(day_of_month_range("-7:-1").unwrap()))
            .with_years(vec![
                year_range("2020:2025").unwrap(),
                year_range("2030:2035").unwrap(),
            ])
            .with_times(Some(times("09:00", "17:00")));

        check_does_contain(
            &interval,
            &[
                "2021-03-31 09:00:00",
                "2023-03-31 16:59:00",
                "2022-03-27 13:00:00",
                "2033-01-30 09:00:00",
            ],
        );
        check_does_not_contain(
            &interval,
            &[
                // Saturday
                "2021-03-27 13:00:00",
                // April
                "2021-04-30 13:00:00",
                // 2026
                "2026-01-30 13:00:00",
                // after 5pm
                "2035-01-31 17:01:00",
                // not the last week
                "2021-03-20 13:00:00",
            ],
        );
    }

    #[test]
    fn timezone_aware_values_use_their_local_fields() {
        use chrono::{FixedOffset, TimeZone};

        let interval = TimeInterval::new().with_times(Some(times("09:00", "17:00")));
        let offset = FixedOffset::east_opt(9 * 3600).unwrap();

        // 10:00 in UTC+9 is 01:00 UTC
        let local = offset.with_ymd_and_hms(2020, 7, 8, 10, 0, 0).unwrap();
        assert!(interval.contains(local));
        assert!(!interval.contains(local.naive_utc()));
    }

    #[test]
    fn any_of_several_intervals() {
        let intervals = vec![
            TimeInterval::new().with_weekdays(Some(weekday_range("saturday").unwrap())),
            TimeInterval::new().with_times(Some(times("00:00", "06:00"))),
        ];

        assert!(contains_any(&intervals, time("2020-07-11 12:00:00")));
        assert!(contains_any(&intervals, time("2020-07-08 05:59:00")));
        assert!(!contains_any(&intervals, time("2020-07-08 06:00:00")));
        assert!(!contains_any(&[], time("2020-07-08 06:00:00")));
    }

    #[test]
    fn empty_ranges_leave_a_dimension_unrestricted() {
        let interval = TimeInterval::new()
            .with_weekdays(Some(weekday_range("monday").unwrap()))
            .with_weekdays(None);

        assert!(interval.weekdays().is_none());
        assert!(interval.is_unrestricted());
    }
}
