//! Class-date policy.
//!
//! Classes run on a fixed set of weekdays (Tuesday and Thursday unless the
//! settings say otherwise). Memberships expire on the last class day on or
//! before the calendar date `months` after they start.
//!
//! Behavior change: sheets produced before the two-weekday check only ever
//! rounded to Tuesdays. Configure `class_weekdays = ["Tue"]` to reproduce
//! those expiration dates.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// How far back `nearest_class_date` walks before giving up.
pub const MAX_LOOKBACK_DAYS: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePolicy {
    class_weekdays: Vec<Weekday>,
}

impl Default for DatePolicy {
    fn default() -> Self {
        Self::new(vec![Weekday::Tue, Weekday::Thu])
    }
}

impl DatePolicy {
    pub fn new(class_weekdays: Vec<Weekday>) -> Self {
        Self { class_weekdays }
    }

    pub fn is_class_day(&self, date: NaiveDate) -> bool {
        self.class_weekdays.contains(&date.weekday())
    }

    /// The class day on or before `date`, looking back at most
    /// [`MAX_LOOKBACK_DAYS`] days. Returns `date` itself when no class day
    /// falls inside that window.
    pub fn nearest_class_date(&self, date: NaiveDate) -> NaiveDate {
        let mut day = date;
        for _ in 0..=MAX_LOOKBACK_DAYS {
            if self.is_class_day(day) {
                return day;
            }
            match day.pred_opt() {
                Some(prev) => day = prev,
                None => break,
            }
        }
        date
    }
}

/// Add whole calendar months, keeping the day of month.
///
/// A day that does not exist in the target month spills into the next
/// one (Jan 31 + 1 month is Mar 3 in a common year), the way spreadsheet
/// date arithmetic does. `None` only when the result leaves chrono's range.
pub fn add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let total = date.year() * 12 + date.month0() as i32 + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(u64::from(date.day() - 1)))
}

/// `M/D/YYYY`, no zero padding.
pub fn format_mdy(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}
