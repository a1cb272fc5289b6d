//! Compact duration strings such as `4h06m24s`, `10m06s` or `45s`.
//!
//! Higher units are omitted when zero; once a higher unit is present the
//! lower ones are zero-padded to two digits.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{QuizError, Result};

/// Largest number of seconds that can be formatted (one day).
pub const MAX_SECONDS: i64 = 24 * 60 * 60;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d+)h)?(?:(\d+)m)?(\d+)s$").expect("duration pattern is valid")
});

/// A parsed duration, component by component.
///
/// Components are kept as written: `90m70s` parses to 90 minutes and 70
/// seconds. [`Hms::total_seconds`] normalizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hms {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Hms {
    /// Total length in seconds. Fails when the components overflow `u64`.
    pub fn total_seconds(&self) -> Result<u64> {
        self.hours
            .checked_mul(3600)
            .and_then(|h| self.minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
            .and_then(|hm| hm.checked_add(self.seconds))
            .ok_or_else(|| self.out_of_range())
    }

    /// Component-wise sum. Fails when a component overflows `u64`.
    pub fn checked_add(&self, rhs: &Hms) -> Result<Hms> {
        let sum = |a: u64, b: u64| a.checked_add(b).ok_or_else(|| self.out_of_range());
        Ok(Hms {
            hours: sum(self.hours, rhs.hours)?,
            minutes: sum(self.minutes, rhs.minutes)?,
            seconds: sum(self.seconds, rhs.seconds)?,
        })
    }

    fn out_of_range(&self) -> QuizError {
        QuizError::bad_arguments(format!("duration {self} is out of range"))
    }
}

impl fmt::Display for Hms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h{}m{}s", self.hours, self.minutes, self.seconds)
    }
}

/// Format a number of seconds in `[1, MAX_SECONDS]` as a duration string.
pub fn format_seconds(total: i64) -> Result<String> {
    if total < 1 {
        return Err(QuizError::bad_arguments(format!(
            "a duration must last at least one second: {total} given"
        )));
    }
    if total > MAX_SECONDS {
        return Err(QuizError::bad_arguments(format!(
            "a duration cannot exceed {MAX_SECONDS} seconds: {total} given"
        )));
    }

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    Ok(if hours > 0 {
        format!("{hours}h{minutes:02}m{seconds:02}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds:02}s")
    } else {
        format!("{seconds}s")
    })
}

/// Parse a duration string into its components.
///
/// The seconds component is mandatory, so `"23m"` is rejected.
pub fn parse_duration(input: &str) -> Result<Hms> {
    let invalid = || QuizError::bad_arguments(format!("'{input}' is not a valid duration"));

    let caps = DURATION_RE.captures(input.trim()).ok_or_else(invalid)?;
    let component = |idx: usize| -> Result<u64> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse().map_err(|_| invalid()),
            None => Ok(0),
        }
    };

    Ok(Hms {
        hours: component(1)?,
        minutes: component(2)?,
        seconds: component(3)?,
    })
}

/// Re-format parsed components in canonical form.
pub fn format_duration(hms: Hms) -> Result<String> {
    let total = i64::try_from(hms.total_seconds()?).map_err(|_| hms.out_of_range())?;
    format_seconds(total)
}
