//! Error types for the arxiv-weekly command line runner.
//!
//! Errors are transparent so the underlying message reaches the user unchanged;
//! returning one from `main` exits with a non-zero status.

use thiserror::Error;

/// Errors that can abort a command line run.
#[derive(Error, Debug)]
pub enum CliError {
  /// Errors from the underlying arxiv-weekly library
  #[error(transparent)]
  Weekly(#[from] arxiv_weekly::errors::WeeklyError),

  /// File system and IO operation errors
  #[error(transparent)]
  IO(#[from] std::io::Error),
}
