use crate::error::{ConfigError, CoreError};
use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Where a timestamp falls relative to a [`MonthWindow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCheck {
    /// Newer than the window; the stream has not reached it yet.
    Newer,
    Within,
    /// Older than the window; on a newest-first stream nothing later
    /// can be inside it.
    Older,
}

/// The bounded calendar month used to scope extraction, held both as
/// (year, month) and as a closed-open `[start, end)` interval of Unix
/// timestamps. Fixed at run start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub year: i32,
    pub month: u32,
    start: i64,
    end: i64,
}

impl MonthWindow {
    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            CoreError::Config(ConfigError::InvalidValue {
                field: "month".to_string(),
                value: format!("{year}-{month}"),
            })
        })?;
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        // from_ymd_opt only fails on out-of-range input, which the
        // rollover above cannot produce.
        let next = NaiveDate::from_ymd_opt(next_year, next_month, 1).ok_or_else(|| {
            CoreError::Internal {
                message: format!("month rollover out of range: {next_year}-{next_month}"),
            }
        })?;

        Ok(Self {
            year,
            month,
            start: midnight_utc(first),
            end: midnight_utc(next),
        })
    }

    /// The month containing "now", UTC.
    pub fn current() -> Result<Self, CoreError> {
        let now = Utc::now();
        Self::new(now.year(), now.month())
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    /// Compares a submission timestamp against the `[start, end)` bounds.
    /// Equivalent to comparing the timestamp's (year, month) against the
    /// window's lexicographically, so a walk run mid-year still stops at
    /// the first pre-window month instead of scanning back to January.
    pub fn check(&self, timestamp: i64) -> WindowCheck {
        if timestamp < self.start {
            WindowCheck::Older
        } else if timestamp >= self.end {
            WindowCheck::Newer
        } else {
            WindowCheck::Within
        }
    }

    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

fn midnight_utc(date: NaiveDate) -> i64 {
    // and_hms_opt(0, 0, 0) is valid for every date.
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or(i64::MIN)
}

/// Formats a Unix timestamp as `YYYY-MM-DD`, UTC.
pub fn format_date(timestamp: i64) -> String {
    match DateTime::<Utc>::from_timestamp(timestamp, 0) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => "unknown-date".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(year: i32, month: u32, day: u32) -> i64 {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp()
    }

    #[test]
    fn test_window_bounds_are_closed_open() {
        let window = MonthWindow::new(2026, 1).unwrap();
        assert!(window.start() < window.end());
        assert_eq!(window.check(window.start()), WindowCheck::Within);
        assert_eq!(window.check(window.end()), WindowCheck::Newer);
        assert_eq!(window.check(window.start() - 1), WindowCheck::Older);
    }

    #[test]
    fn test_check_classifies_surrounding_months() {
        let window = MonthWindow::new(2026, 1).unwrap();
        assert_eq!(window.check(ts(2026, 1, 15)), WindowCheck::Within);
        assert_eq!(window.check(ts(2026, 2, 1)), WindowCheck::Newer);
        assert_eq!(window.check(ts(2025, 12, 31)), WindowCheck::Older);
    }

    #[test]
    fn test_check_mid_year_window() {
        // Months of the same year before the window must read as Older,
        // not merely "different month".
        let window = MonthWindow::new(2026, 6).unwrap();
        assert_eq!(window.check(ts(2026, 5, 20)), WindowCheck::Older);
        assert_eq!(window.check(ts(2026, 7, 2)), WindowCheck::Newer);
        assert_eq!(window.check(ts(2026, 6, 30)), WindowCheck::Within);
    }

    #[test]
    fn test_december_rollover() {
        let window = MonthWindow::new(2025, 12).unwrap();
        assert_eq!(window.check(ts(2025, 12, 31)), WindowCheck::Within);
        assert_eq!(window.check(ts(2026, 1, 1)), WindowCheck::Newer);
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert!(MonthWindow::new(2026, 0).is_err());
        assert!(MonthWindow::new(2026, 13).is_err());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(ts(2026, 1, 15)), "2026-01-15");
    }

    #[test]
    fn test_label() {
        assert_eq!(MonthWindow::new(2026, 1).unwrap().label(), "2026-01");
    }
}
