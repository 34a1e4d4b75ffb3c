//! Client for paging through the arXiv search API.
//!
//! Results are requested newest-update first, so the client can stop as soon as a
//! page reaches back past the start of the report window. arXiv asks API users to
//! pace their requests, and the client sleeps for a fixed delay between pages.
//!
//! The client uses arXiv's Atom feed API (http://export.arxiv.org/api/query).
//!
//! # Examples
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use arxiv_weekly::{clients::ArxivClient, paper::CategorySet};
//! use chrono::NaiveDate;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ArxivClient::new().with_page_size(50).with_delay(Duration::from_secs(3));
//! let categories: CategorySet = ["q-fin.ST"].into_iter().collect();
//! let papers = client.fetch_since(&categories, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()).await?;
//!
//! for paper in papers {
//!   println!("{} ({})", paper.title, paper.updated);
//! }
//! # Ok(())
//! # }
//! ```

use super::*;
use crate::{config::ARXIV_API_URL, format::clean_wrapped_text};

/// Internal representation of the arXiv API's Atom feed response.
#[derive(Debug, Deserialize)]
struct Feed {
  /// A page of results; empty once the offset runs past the last match
  #[serde(rename = "entry", default)]
  entries: Vec<Entry>,
}

/// Internal representation of a paper entry from arXiv's API response.
#[derive(Debug, Deserialize)]
struct Entry {
  /// arXiv URL (e.g., "http://arxiv.org/abs/2301.07041v2")
  #[serde(rename = "id")]
  arxiv_url:        String,
  /// When this version was submitted
  updated:          DateTime<Utc>,
  /// When the first version was submitted
  published:        DateTime<Utc>,
  /// Paper title, hard-wrapped
  title:            String,
  /// Paper abstract, hard-wrapped
  summary:          String,
  /// List of paper authors
  #[serde(rename = "author", default)]
  authors:          Vec<Author>,
  /// Abstract page, PDF and DOI links
  #[serde(rename = "link", default)]
  links:            Vec<Link>,
  /// The main classification
  #[serde(rename = "primary_category", alias = "arxiv:primary_category")]
  primary_category: Option<Category>,
  /// Every listed classification, usually including the primary one
  #[serde(rename = "category", default)]
  categories:       Vec<Category>,
}

/// Internal representation of an author from arXiv's API response.
#[derive(Debug, Deserialize)]
struct Author {
  /// Author's full name
  name: String,
}

/// A `<link>` element of an entry.
#[derive(Debug, Deserialize)]
struct Link {
  /// Target URL
  #[serde(rename = "@href")]
  href:  String,
  /// `pdf` for the PDF link, `doi` for the DOI link, absent otherwise
  #[serde(rename = "@title")]
  title: Option<String>,
}

/// A `<category>` or `<arxiv:primary_category>` element of an entry.
#[derive(Debug, Deserialize)]
struct Category {
  /// The category code
  #[serde(rename = "@term")]
  term: String,
}

impl From<Entry> for Paper {
  fn from(entry: Entry) -> Self {
    // Prefer the explicit PDF link, otherwise derive it from the abstract URL
    let pdf_url = entry
      .links
      .iter()
      .find(|link| link.title.as_deref() == Some("pdf"))
      .map(|link| link.href.clone())
      .unwrap_or_else(|| entry.arxiv_url.replace("/abs/", "/pdf/"));

    let mut categories: CategorySet = entry.categories.into_iter().map(|c| c.term).collect();
    if let Some(primary) = entry.primary_category {
      categories.insert(primary.term);
    }

    Paper {
      authors: entry.authors.into_iter().map(|a| clean_wrapped_text(&a.name)).collect(),
      title: clean_wrapped_text(&entry.title),
      summary: clean_wrapped_text(&entry.summary),
      updated: entry.updated.date_naive(),
      published: entry.published.date_naive(),
      categories,
      pdf_url,
    }
  }
}

/// Client for paging through the arXiv search API by category.
pub struct ArxivClient {
  /// Internal web client used to connect to the API.
  client:    reqwest::Client,
  /// The search endpoint.
  base_url:  Url,
  /// Results requested per page.
  page_size: usize,
  /// Pause between consecutive pages.
  delay:     Duration,
}

impl ArxivClient {
  /// Creates a client for the public arXiv API, 20 results per page and a two second
  /// pause between pages.
  pub fn new() -> Self {
    Self::with_base_url(Url::parse(ARXIV_API_URL).expect("ARXIV_API_URL is a valid URL"))
  }

  /// Creates a client for an arbitrary search endpoint speaking the arXiv API.
  pub fn with_base_url(base_url: Url) -> Self {
    Self { client: reqwest::Client::new(), base_url, page_size: 20, delay: Duration::from_secs(2) }
  }

  /// Sets the number of results requested per page.
  pub fn with_page_size(mut self, page_size: usize) -> Self {
    self.page_size = page_size;
    self
  }

  /// Sets the pause between pages.
  pub fn with_delay(mut self, delay: Duration) -> Self {
    self.delay = delay;
    self
  }

  /// Builds the search expression matching any of `categories`, e.g.
  /// `cat:q-fin.PR OR cat:q-fin.TR`.
  pub fn search_query(categories: &CategorySet) -> String {
    categories.iter().map(|code| format!("cat:{code}")).collect::<Vec<_>>().join(" OR ")
  }

  /// Fetches one page of results, most recently updated first.
  ///
  /// Entries are returned in feed order and are not filtered.
  ///
  /// # Errors
  ///
  /// This function will return an error if:
  /// - The network request fails
  /// - The API answers with a non-success status
  /// - The feed cannot be parsed
  pub async fn fetch_page(
    &self,
    categories: &CategorySet,
    offset: usize,
  ) -> Result<Vec<Paper>, WeeklyError> {
    let response = self
      .client
      .get(self.base_url.clone())
      .query(&[
        ("search_query", Self::search_query(categories)),
        ("start", offset.to_string()),
        ("max_results", self.page_size.to_string()),
        ("sortBy", "lastUpdatedDate".to_string()),
        ("sortOrder", "descending".to_string()),
      ])
      .send()
      .await?;

    debug!("Fetched arXiv page via: {}", response.url());

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
      return Err(WeeklyError::ApiError(format!("arXiv returned {status}: {body}")));
    }

    trace!("arXiv response: {body}");

    let feed: Feed = from_str(&body)?;
    Ok(feed.entries.into_iter().map(Paper::from).collect())
  }

  /// Fetches every paper in `categories` updated on or after `start`.
  ///
  /// Pages are requested until one comes back empty or its last entry was updated
  /// before `start`. The decision is made on the raw page, so a page in which no
  /// entry matches `categories` does not end or stall the walk.
  ///
  /// # Errors
  ///
  /// Returns [`WeeklyError::InvalidConfig`] for an empty category set and otherwise
  /// fails as [`ArxivClient::fetch_page`] does, on the first failing page.
  pub async fn fetch_since(
    &self,
    categories: &CategorySet,
    start: NaiveDate,
  ) -> Result<Vec<Paper>, WeeklyError> {
    if categories.is_empty() {
      return Err(WeeklyError::InvalidConfig("at least one category is required".into()));
    }

    info!("Downloading {} results per batch, back to {start}.", self.page_size);

    let mut papers = Vec::new();
    let mut offset = 0;
    for batch in 0.. {
      info!("Batch {batch}...");
      let page = self.fetch_page(categories, offset).await?;

      let Some(oldest) = page.last().map(|paper| paper.updated) else {
        info!("Batch {batch} was empty, no further results.");
        break;
      };

      let page_len = page.len();
      let before = papers.len();
      papers.extend(
        page
          .into_iter()
          .filter(|paper| paper.categories.intersects(categories) && paper.updated >= start),
      );
      debug!("Kept {} of {page_len} entries from batch {batch}.", papers.len() - before);

      if oldest < start {
        info!("Breaking at a result dated {oldest}.");
        break;
      }

      offset += self.page_size;
      tokio::time::sleep(self.delay).await;
    }

    Ok(papers)
  }
}

impl Default for ArxivClient {
  fn default() -> Self { Self::new() }
}
