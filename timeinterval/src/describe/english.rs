use crate::describe::{display, Language};
use crate::parse::*;
use crate::TimeInterval;
use core::fmt::{self, Display, Formatter};

fn postfixed(x: u32) -> impl Display {
    display(move |f| match x % 100 {
        1 => write!(f, "{}st", x),
        2 => write!(f, "{}nd", x),
        3 => write!(f, "{}rd", x),
        20..=99 => match x % 10 {
            1 => write!(f, "{}st", x),
            2 => write!(f, "{}nd", x),
            3 => write!(f, "{}rd", x),
            _ => write!(f, "{}th", x),
        },
        _ => write!(f, "{}th", x),
    })
}

/// Writes a lower case name with its first letter in upper case
fn capitalized(name: &'static str) -> impl Display {
    display(move |f| {
        let mut chars = name.chars();
        if let Some(first) = chars.next() {
            write!(f, "{}{}", first.to_ascii_uppercase(), chars.as_str())?;
        }
        Ok(())
    })
}

fn weekday(day: i32) -> impl Display {
    capitalized(WEEKDAY_NAMES[day.rem_euclid(7) as usize])
}

fn month(month: i32) -> impl Display {
    capitalized(MONTH_NAMES[(month - 1).rem_euclid(12) as usize])
}

/// A day of the month, counting from the end of the month for negative days
fn day_of_month(day: i32) -> impl Display {
    display(move |f| match day {
        -1 => write!(f, "last"),
        d if d < 0 => write!(f, "{} to last", postfixed(d.unsigned_abs())),
        d => write!(f, "{}", postfixed(d as u32)),
    })
}

/// Writes a list of ranges, i.e. "a", "a and b", or "a, b, and c"
fn list<'a, R, D, F>(ranges: &'a Ranges<R>, item: F) -> impl Display + 'a
where
    F: Fn(&'a R) -> D + 'a,
    D: Display + 'a,
{
    display(move |f| match ranges.tail.as_slice() {
        [] => write!(f, "{}", item(&ranges.first)),
        [second] => write!(f, "{} and {}", item(&ranges.first), item(second)),
        [middle @ .., last] => {
            write!(f, "{}, ", item(&ranges.first))?;
            for range in middle {
                write!(f, "{}, ", item(range))?;
            }
            write!(f, "and {}", item(last))
        }
    })
}

/// Writes an inclusive range with the given value formatter
fn through<D, F>(range: &InclusiveRange, value: F) -> impl Display
where
    F: Fn(i32) -> D,
    D: Display,
{
    let begin = value(range.begin());
    let end = if range.is_single() {
        None
    } else {
        Some(value(range.end()))
    };
    display(move |f| match &end {
        None => write!(f, "{}", begin),
        Some(end) => write!(f, "{} through {}", begin, end),
    })
}

/// Specifies whether to display times with a 12 hour or 24 hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourFormat {
    /// Format using a 12 hour clock (i.e. 6:30 PM)
    Hour12,
    /// Format using a 24 hour clock (i.e. 18:30)
    Hour24,
}

impl Default for HourFormat {
    fn default() -> Self {
        HourFormat::Hour12
    }
}

/// English language formatting
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct English {
    /// Configures how hours are formatted in descriptions
    pub hour: HourFormat,
}

impl English {
    /// Creates a new instance of the english configuration with its default values
    pub const fn new() -> Self {
        Self {
            hour: HourFormat::Hour12,
        }
    }

    /// Creates a new instance of the english configuration using the given clock
    pub const fn with_hour_format(hour: HourFormat) -> Self {
        Self { hour }
    }
}

impl Default for English {
    fn default() -> Self {
        Self::new()
    }
}

impl English {
    fn time(&self, minute: u16) -> impl Display {
        let format = self.hour;
        display(move |f| {
            let (hour, min) = (minute / 60, minute % 60);
            match format {
                HourFormat::Hour24 => write!(f, "{:02}:{:02}", hour, min),
                HourFormat::Hour12 if minute == MINUTES_PER_DAY => write!(f, "midnight"),
                HourFormat::Hour12 => {
                    let period = if hour < 12 { "AM" } else { "PM" };
                    let hour = match hour % 12 {
                        0 => 12,
                        h => h,
                    };
                    write!(f, "{}:{:02} {}", hour, min, period)
                }
            }
        })
    }

    fn between<'a>(&'a self, range: &'a MinuteRange) -> impl Display + 'a {
        display(move |f| {
            write!(
                f,
                "between {} and {}",
                self.time(range.start()),
                self.time(range.end())
            )
        })
    }

    fn fmt_times(&self, times: Option<&Ranges<MinuteRange>>, f: &mut Formatter) -> fmt::Result {
        let Ranges { first, tail } = match times {
            Some(times) => times,
            None => return write!(f, "Any time"),
        };
        write!(
            f,
            "Between {} and {}",
            self.time(first.start()),
            self.time(first.end())
        )?;
        match tail.as_slice() {
            [] => Ok(()),
            [second] => write!(f, " or {}", self.between(second)),
            [middle @ .., last] => {
                for range in middle {
                    write!(f, ", {}", self.between(range))?;
                }
                write!(f, ", or {}", self.between(last))
            }
        }
    }
}

impl Language for English {
    fn fmt_interval(&self, interval: &TimeInterval, f: &mut Formatter) -> fmt::Result {
        self.fmt_times(interval.times(), f)?;

        if let Some(weekdays) = interval.weekdays() {
            write!(f, ", on {}", list(weekdays, |r| through(r, weekday)))?;
        }

        if let Some(days) = interval.days_of_month() {
            let day = |r: &InclusiveRange| {
                through(r, |d| display(move |f| write!(f, "the {}", day_of_month(d))))
            };
            write!(f, ", on {} day of the month", list(days, day))?;
        }

        if let Some(months) = interval.months() {
            write!(f, ", in {}", list(months, |r| through(r, month)))?;
        }

        if let Some(years) = interval.years() {
            write!(f, ", in {}", list(years, |r| through(r, |y| y)))?;
        }

        Ok(())
    }
}
