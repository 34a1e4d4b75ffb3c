//! A library for building weekly digests of arXiv submissions in a set of categories,
//! rendering them as markdown and optionally posting them to a subreddit.
//!
//! The pipeline is linear: fetch every paper updated since the start of a
//! [`ReportWindow`], render the ones inside the window into a [`Report`], write the
//! report to disk and, when credentials are available, submit it to Reddit.
//!
//! # Example
//! ```rust,no_run
//! use arxiv_weekly::{config::Config, window::ReportWindow, RunOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!   let today = chrono::Local::now().date_naive();
//!   let options = RunOptions {
//!     window:     ReportWindow::previous_week(today),
//!     output_dir: ".".into(),
//!     publish:    None,
//!   };
//!
//!   let outcome = arxiv_weekly::run(&Config::default(), &options).await?;
//!   println!("Wrote {} papers to {}", outcome.papers_rendered, outcome.path.display());
//!
//!   Ok(())
//! }
//! ```

#![warn(missing_docs, clippy::missing_docs_in_private_items)]
use std::{path::PathBuf, time::Duration};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};
#[cfg(test)] use tracing_test::traced_test;

pub mod clients;
pub mod config;
pub mod errors;
pub mod format;
pub mod paper;
pub mod report;
pub mod window;
#[cfg(test)] mod tests;

use clients::{
  arxiv::ArxivClient,
  reddit::{PublishTarget, RedditClient},
};
use config::Config;
use errors::WeeklyError;
use paper::{CategoryLookup, CategorySet, Paper};
use report::Report;
use window::ReportWindow;

/// Everything a single run needs beyond the static [`Config`].
#[derive(Debug, Clone)]
pub struct RunOptions {
  /// Papers updated inside this window are reported.
  pub window:     ReportWindow,
  /// Directory the markdown report is written into.
  pub output_dir: PathBuf,
  /// Where to publish the report, if anywhere.
  pub publish:    Option<PublishTarget>,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
  /// Path of the written report.
  pub path:            PathBuf,
  /// Number of papers that made it into the report.
  pub papers_rendered: usize,
  /// Whether the report was submitted to Reddit.
  pub published:       bool,
}

/// Runs the whole pipeline: fetch, render, write and (optionally) publish.
///
/// The report file is written before any publication attempt, so it exists even
/// when publishing fails.
///
/// # Errors
///
/// Any network failure, non-success response, malformed feed or filesystem error
/// aborts the run. Missing publication credentials are not an error; pass
/// `publish: None` to skip that stage.
pub async fn run(config: &Config, options: &RunOptions) -> Result<RunOutcome, WeeklyError> {
  config.validate()?;
  let window = options.window;

  let arxiv = ArxivClient::with_base_url(config.arxiv_url()?)
    .with_page_size(config.page_size)
    .with_delay(config.delay());
  let papers = arxiv.fetch_since(&config.categories, window.start()).await?;

  let report = Report::render(&papers, &config.category_names, &window);
  let path = report.write_to(&options.output_dir)?;

  let published = match &options.publish {
    Some(target) => {
      let reddit = RedditClient::new(&target.credentials.app_name)
        .with_endpoints(config.reddit_auth_url()?, config.reddit_api_url()?);
      reddit.publish(target, &report).await?;
      true
    },
    None => {
      info!("Skipping Reddit publication, credentials or subreddit not supplied.");
      false
    },
  };

  Ok(RunOutcome { path, papers_rendered: report.paper_count(), published })
}
