//! Date and time display utilities.

use std::fmt;

use jiff::{civil::Date, tz::TimeZone, Timestamp};

/// Formats a timestamp in the system time zone as
/// `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// A due date relative to a reference day, e.g. `2026-03-08 (2 days overdue)`.
pub struct DueDate {
    pub due: Date,
    pub today: Date,
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = (self.due - self.today).get_days();
        write!(f, "{}", self.due)?;
        match days {
            0 => write!(f, " (today)"),
            1 => write!(f, " (tomorrow)"),
            -1 => write!(f, " (1 day overdue)"),
            d if d < 0 => write!(f, " ({} days overdue)", -d),
            d => write!(f, " (in {d} days)"),
        }
    }
}
