//! Error types for the arxiv-weekly library.
//!
//! Every stage of the pipeline is fatal on failure: there is no retry and no
//! partial recovery, so a single error type covers:
//! - Network and API errors from arXiv and Reddit
//! - Feed and token response parsing
//! - Configuration and report window validation
//! - Writing the report to disk
//!
//! # Examples
//!
//! ```
//! use arxiv_weekly::{errors::WeeklyError, window::ReportWindow};
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! match ReportWindow::new(start, end) {
//!   Err(WeeklyError::InvalidWindow { .. }) => println!("start must not be after end"),
//!   Err(e) => println!("Other error: {}", e),
//!   Ok(window) => println!("Window: {}", window),
//! }
//! ```

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while building or publishing a weekly digest.
#[derive(Error, Debug)]
pub enum WeeklyError {
  /// A network request failed.
  ///
  /// This can occur when:
  /// - The network is unavailable
  /// - The server is unreachable
  /// - The request times out
  /// - TLS/SSL errors occur
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// An API answered with a non-success status or an unusable body.
  ///
  /// The string contains the endpoint, status and response body for debugging.
  #[error("API error: {0}")]
  ApiError(String),

  /// The arXiv feed could not be parsed.
  #[error("Failed to parse arXiv feed: {0}")]
  Xml(#[from] quick_xml::de::DeError),

  /// An endpoint URL in the configuration is malformed.
  #[error(transparent)]
  InvalidUrl(#[from] url::ParseError),

  /// Writing the report failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// The configuration file is not valid TOML for [`crate::config::Config`].
  #[error(transparent)]
  Config(#[from] toml::de::Error),

  /// The configuration parsed, but its values are unusable.
  #[error("Invalid configuration: {0}")]
  InvalidConfig(String),

  /// A report window whose start lies after its end.
  #[error("Invalid report window: start {start} is after end {end}")]
  InvalidWindow {
    /// First day of the requested window
    start: NaiveDate,
    /// Exclusive last day of the requested window
    end:   NaiveDate,
  },
}
