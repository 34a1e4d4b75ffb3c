//! The half-open date interval a report covers.
//!
//! By default a run reports on the previous ISO week: the window starts on that
//! week's Monday and ends (exclusively) on its Sunday.
//!
//! # Examples
//!
//! ```
//! use arxiv_weekly::window::ReportWindow;
//! use chrono::NaiveDate;
//!
//! // A Wednesday
//! let today = NaiveDate::from_ymd_opt(2024, 3, 13).unwrap();
//! let window = ReportWindow::previous_week(today);
//! assert_eq!(window.start(), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
//! assert_eq!(window.end(), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
//! assert_eq!(window.file_name(), "arxiv_submissions_2024-03-04_2024-03-10.md");
//! ```

use chrono::{Datelike, Days};

use super::*;

/// A half-open interval `[start, end)` of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
  /// First day included
  start: NaiveDate,
  /// First day no longer included
  end:   NaiveDate,
}

impl ReportWindow {
  /// Creates a window from explicit bounds.
  ///
  /// # Errors
  ///
  /// Returns [`WeeklyError::InvalidWindow`] when `start` is after `end`. An empty
  /// window (`start == end`) is allowed and simply matches nothing.
  pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, WeeklyError> {
    if start > end {
      return Err(WeeklyError::InvalidWindow { start, end });
    }
    Ok(Self { start, end })
  }

  /// The previous ISO week relative to `today`: Monday through the following
  /// Sunday, with the Sunday as the exclusive end.
  pub fn previous_week(today: NaiveDate) -> Self {
    let since_monday = u64::from(today.weekday().num_days_from_monday());
    let end = today - Days::new(since_monday + 1);
    let start = end - Days::new(6);
    Self { start, end }
  }

  /// Builds the window for a run from optional overrides.
  ///
  /// Missing bounds are taken from [`ReportWindow::previous_week`].
  ///
  /// # Errors
  ///
  /// Returns [`WeeklyError::InvalidWindow`] if the resulting start is after its end.
  pub fn resolve(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
  ) -> Result<Self, WeeklyError> {
    let default = Self::previous_week(today);
    Self::new(start.unwrap_or(default.start), end.unwrap_or(default.end))
  }

  /// First day included in the window.
  pub fn start(&self) -> NaiveDate { self.start }

  /// First day after the window.
  pub fn end(&self) -> NaiveDate { self.end }

  /// Whether `date` falls inside `[start, end)`.
  pub fn contains(&self, date: NaiveDate) -> bool { self.start <= date && date < self.end }

  /// Name of the markdown file a report for this window is written to.
  pub fn file_name(&self) -> String {
    format!("arxiv_submissions_{}_{}.md", self.start, self.end)
  }
}

impl std::fmt::Display for ReportWindow {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} - {}", self.start, self.end)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

  #[test]
  fn test_previous_week_from_every_weekday() {
    // 2024-03-11 is a Monday
    for offset in 0..7 {
      let today = date(2024, 3, 11) + Days::new(offset);
      let window = ReportWindow::previous_week(today);
      assert_eq!(window.start(), date(2024, 3, 4), "today = {today}");
      assert_eq!(window.end(), date(2024, 3, 10), "today = {today}");
    }
  }

  #[test]
  fn test_previous_week_across_year_boundary() {
    let window = ReportWindow::previous_week(date(2025, 1, 2));
    assert_eq!(window.start(), date(2024, 12, 23));
    assert_eq!(window.end(), date(2024, 12, 29));
  }

  #[test]
  fn test_contains_is_half_open() {
    let window = ReportWindow::new(date(2024, 3, 4), date(2024, 3, 10)).unwrap();
    assert!(window.contains(date(2024, 3, 4)));
    assert!(window.contains(date(2024, 3, 9)));
    assert!(!window.contains(date(2024, 3, 10)));
    assert!(!window.contains(date(2024, 3, 3)));
  }

  #[test]
  fn test_new_rejects_inverted_window() {
    let result = ReportWindow::new(date(2024, 3, 10), date(2024, 3, 4));
    assert!(matches!(result, Err(WeeklyError::InvalidWindow { .. })));
    assert!(ReportWindow::new(date(2024, 3, 4), date(2024, 3, 4)).is_ok());
  }

  #[test]
  fn test_resolve() {
    let today = date(2024, 3, 13);
    assert_eq!(
      ReportWindow::resolve(None, None, today).unwrap(),
      ReportWindow::previous_week(today)
    );

    let explicit =
      ReportWindow::resolve(Some(date(2024, 1, 1)), Some(date(2024, 2, 1)), today).unwrap();
    assert_eq!(explicit.start(), date(2024, 1, 1));
    assert_eq!(explicit.end(), date(2024, 2, 1));

    let only_start = ReportWindow::resolve(Some(date(2024, 3, 1)), None, today).unwrap();
    assert_eq!(only_start.start(), date(2024, 3, 1));
    assert_eq!(only_start.end(), date(2024, 3, 10));

    assert!(ReportWindow::resolve(Some(date(2024, 3, 12)), None, today).is_err());
  }

  #[test]
  fn test_file_name() {
    let window = ReportWindow::new(date(2024, 1, 1), date(2024, 1, 7)).unwrap();
    assert_eq!(window.file_name(), "arxiv_submissions_2024-01-01_2024-01-07.md");
    assert_eq!(window.to_string(), "2024-01-01 - 2024-01-07");
  }
}
