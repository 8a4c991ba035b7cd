//! Daily cron schedules (`<minute> <hour> * * *`).

use core::fmt;
use core::str::FromStr;

use chrono::{Duration, NaiveTime};

use pricebook_core::{DomainError, DomainResult, Timestamp};

/// Midnight UTC every day.
pub const DAILY_JOB_SCHEDULE: &str = "0 0 * * *";

/// A five-field cron expression restricted to a fixed minute and hour, with
/// day-of-month, month and day-of-week all `*`. Evaluated in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Schedule {
    minute: u32,
    hour: u32,
}

impl Schedule {
    pub fn daily_at(hour: u32, minute: u32) -> DomainResult<Self> {
        if hour > 23 {
            return Err(DomainError::validation(format!("hour out of range: {hour}")));
        }
        if minute > 59 {
            return Err(DomainError::validation(format!("minute out of range: {minute}")));
        }
        Ok(Self { minute, hour })
    }

    pub fn daily_at_midnight() -> Self {
        Self { minute: 0, hour: 0 }
    }

    pub fn parse(expr: &str) -> DomainResult<Self> {
        let fields: Vec<&str> = expr.split_whitespace().collect();
        let &[minute, hour, dom, month, dow] = fields.as_slice() else {
            return Err(DomainError::validation(format!(
                "cron expression needs 5 fields, got {}: {expr:?}",
                fields.len()
            )));
        };
        if [dom, month, dow].iter().any(|f| *f != "*") {
            return Err(DomainError::validation(format!(
                "only daily schedules are supported (`m h * * *`), got {expr:?}"
            )));
        }
        Self::daily_at(field(hour, "hour")?, field(minute, "minute")?)
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// First firing instant strictly after `instant`.
    pub fn next_after(&self, instant: Timestamp) -> Timestamp {
        let fire_at = NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN);
        let today = instant.date_naive().and_time(fire_at).and_utc();
        if today > instant {
            today
        } else {
            today + Duration::days(1)
        }
    }
}

/// Plain ASCII digits only; `str::parse` would also take a sign.
fn field(raw: &str, name: &str) -> DomainResult<u32> {
    let invalid = || DomainError::validation(format!("{name} must be a number, got {raw:?}"));
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<u32>().map_err(|_| invalid())
}

impl Default for Schedule {
    fn default() -> Self {
        Self::daily_at_midnight()
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} * * *", self.minute, self.hour)
    }
}

impl FromStr for Schedule {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
