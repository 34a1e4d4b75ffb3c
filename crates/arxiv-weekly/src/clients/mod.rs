//! Clients for the two remote services a digest run talks to.
//!
//! - [`arxiv`] - pages through the arXiv search API and converts feed entries into
//!   [`Paper`]s
//! - [`reddit`] - exchanges account credentials for a token and submits the rendered
//!   report as a self post
//!
//! # Examples
//!
//! ```no_run
//! use arxiv_weekly::{clients::ArxivClient, paper::CategorySet};
//! use chrono::NaiveDate;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let categories: CategorySet = ["q-fin.PR", "q-fin.TR"].into_iter().collect();
//! let since = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
//! let papers = ArxivClient::new().fetch_since(&categories, since).await?;
//! println!("{} papers updated since {since}", papers.len());
//! # Ok(())
//! # }
//! ```

use quick_xml::de::from_str;
use url::Url;

pub mod arxiv;
pub mod reddit;

pub use arxiv::ArxivClient;
pub use reddit::RedditClient;

use super::*;
