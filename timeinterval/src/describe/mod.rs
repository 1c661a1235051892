mod english;

pub use english::{English, HourFormat};

use crate::TimeInterval;
use core::fmt::{self, Display, Formatter};

/// A language formatting configuration
pub trait Language {
    /// Formats a time interval into the specified formatter
    fn fmt_interval(&self, interval: &TimeInterval, f: &mut Formatter) -> fmt::Result;
}

impl<'a, L: Language> Language for &'a L {
    fn fmt_interval(&self, interval: &TimeInterval, f: &mut Formatter) -> fmt::Result {
        (*self).fmt_interval(interval, f)
    }
}

/// A formatter for displaying a time interval description in a specified language
#[derive(Debug, Clone, Copy)]
pub struct LanguageFormatter<'a, L> {
    interval: &'a TimeInterval,
    lang: L,
}

impl<'a, L> LanguageFormatter<'a, L> {
    pub(crate) fn new(interval: &'a TimeInterval, lang: L) -> Self {
        Self { interval, lang }
    }
}

impl<'a, L: Language> Display for LanguageFormatter<'a, L> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.lang.fmt_interval(self.interval, f)
    }
}

struct Displayer<F>(pub F);
impl<F> Display for Displayer<F>
where
    F: Fn(&mut Formatter) -> fmt::Result,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.0(f)
    }
}

fn display<F>(f: F) -> Displayer<F>
where
    F: Fn(&mut Formatter) -> fmt::Result,
{
    Displayer(f)
}
