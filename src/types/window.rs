//! The forward window every provider adapter normalizes into.

use chrono::{Days, NaiveDate};

/// What to do with the first day a provider reports.
///
/// Providers start their data "today", usually mid-day. With [`LeadingDay::Skip`]
/// that first day is dropped everywhere, so "day 1" means tomorrow for every
/// provider alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LeadingDay {
    /// Drop exactly the first reported day.
    #[default]
    Skip,
    /// Keep the first reported day as day 1.
    Keep,
}

impl LeadingDay {
    pub(crate) fn skipped(&self) -> usize {
        match self {
            LeadingDay::Skip => 1,
            LeadingDay::Keep => 0,
        }
    }
}

/// The number of days wanted per location and the leading-day policy.
///
/// # Examples
///
/// ```
/// use forecastkit::{ForecastWindow, LeadingDay};
/// use chrono::NaiveDate;
///
/// let window = ForecastWindow::new(3, LeadingDay::Skip);
/// let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
/// let (start, end) = window.request_dates(today).unwrap();
/// assert_eq!(start, today);
/// assert_eq!(end, NaiveDate::from_ymd_opt(2024, 3, 13).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ForecastWindow {
    pub days: usize,
    pub leading_day: LeadingDay,
}

impl Default for ForecastWindow {
    fn default() -> Self {
        Self {
            days: 3,
            leading_day: LeadingDay::Skip,
        }
    }
}

impl ForecastWindow {
    pub fn new(days: usize, leading_day: LeadingDay) -> Self {
        Self { days, leading_day }
    }

    /// Inclusive `(start, end)` dates to request so that, after the leading day
    /// policy is applied, `days` entries remain.
    ///
    /// Returns `None` when `days` is zero or the end date overflows.
    pub fn request_dates(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        if self.days == 0 {
            return None;
        }
        let span = self.days + self.leading_day.skipped();
        let last_offset = u64::try_from(span.checked_sub(1)?).ok()?;
        let end = today.checked_add_days(Days::new(last_offset))?;
        Some((today, end))
    }

    /// Applies the window to an ordered sequence: skips the leading day if
    /// asked to, then keeps at most `days` items. Shorter input yields a
    /// shorter output, never padding.
    pub fn select<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.leading_day.skipped())
            .take(self.days)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_skips_leading_day() {
        let window = ForecastWindow::new(3, LeadingDay::Skip);
        assert_eq!(window.select(0..10), vec![1, 2, 3]);
    }

    #[test]
    fn test_select_keep_leading_day() {
        let window = ForecastWindow::new(2, LeadingDay::Keep);
        assert_eq!(window.select(0..10), vec![0, 1]);
    }

    #[test]
    fn test_select_shortfall_is_not_padded() {
        let window = ForecastWindow::new(5, LeadingDay::Skip);
        assert_eq!(window.select(vec!["today", "tomorrow"]), vec!["tomorrow"]);
        assert!(window.select(Vec::<i32>::new()).is_empty());
    }

    #[test]
    fn test_request_dates_keep() {
        let window = ForecastWindow::new(3, LeadingDay::Keep);
        let today = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        let (start, end) = window.request_dates(today).unwrap();
        assert_eq!(start, today);
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn test_request_dates_zero_days() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(ForecastWindow::new(0, LeadingDay::Keep)
            .request_dates(today)
            .is_none());
        assert!(ForecastWindow::new(0, LeadingDay::Skip)
            .request_dates(today)
            .is_none());
    }
}
