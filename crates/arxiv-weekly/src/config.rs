//! Run configuration: which categories to follow, how to name them, how to page
//! through arXiv and which endpoints to talk to.
//!
//! The defaults describe the weekly quantitative finance digest. A TOML file can
//! override any subset of the keys:
//!
//! ```toml
//! categories = ["q-fin.PR", "q-fin.TR"]
//! page_size = 50
//! delay_secs = 3
//!
//! [category_names]
//! "q-fin.PR" = "Pricing of Securities"
//! "q-fin.TR" = "Trading and Market Microstructure"
//! ```

use std::path::Path;

use url::Url;

use super::*;

/// arXiv Atom search endpoint.
pub const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";
/// Reddit OAuth token endpoint.
pub const REDDIT_AUTH_URL: &str = "https://www.reddit.com/api/v1/access_token";
/// Reddit post submission endpoint.
pub const REDDIT_API_URL: &str = "https://oauth.reddit.com/api/submit";

/// The quantitative finance categories and their display names.
const QUANT_FINANCE: [(&str, &str); 9] = [
  ("q-fin.CP", "Computational Finance"),
  ("q-fin.EC", "Economics"),
  ("q-fin.GN", "General Finance"),
  ("q-fin.MF", "Mathematical Finance"),
  ("q-fin.PM", "Portfolio Management"),
  ("q-fin.PR", "Pricing of Securities"),
  ("q-fin.RM", "Risk Management"),
  ("q-fin.ST", "Statistical Finance"),
  ("q-fin.TR", "Trading and Market Microstructure"),
];

/// Settings for a digest run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Papers listing any of these categories are fetched
  pub categories:      CategorySet,
  /// Display names used when rendering categories
  pub category_names:  CategoryLookup,
  /// Results requested per arXiv page
  pub page_size:       usize,
  /// Pause between arXiv pages, in seconds
  pub delay_secs:      u64,
  /// arXiv search endpoint
  pub arxiv_url:       String,
  /// Reddit token endpoint
  pub reddit_auth_url: String,
  /// Reddit submission endpoint
  pub reddit_api_url:  String,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      categories:      QUANT_FINANCE.iter().map(|(code, _)| *code).collect(),
      category_names:  QUANT_FINANCE.into_iter().collect(),
      page_size:       20,
      delay_secs:      2,
      arxiv_url:       ARXIV_API_URL.to_string(),
      reddit_auth_url: REDDIT_AUTH_URL.to_string(),
      reddit_api_url:  REDDIT_API_URL.to_string(),
    }
  }
}

impl Config {
  /// Reads a TOML configuration file. Keys the file leaves out keep their defaults.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self, WeeklyError> {
    let path = path.as_ref();
    debug!("Reading configuration from {}", path.display());
    let config: Config = toml::from_str(&std::fs::read_to_string(path)?)?;
    config.validate()?;
    Ok(config)
  }

  /// Checks the values a run depends on.
  ///
  /// # Errors
  ///
  /// Returns [`WeeklyError::InvalidConfig`] for an empty category set, a
  /// malformed category code or a zero page size, and
  /// [`WeeklyError::InvalidUrl`] for an unparsable endpoint.
  pub fn validate(&self) -> Result<(), WeeklyError> {
    if self.categories.is_empty() {
      return Err(WeeklyError::InvalidConfig("at least one category is required".into()));
    }
    if let Some(code) = self.categories.first_invalid() {
      return Err(WeeklyError::InvalidConfig(format!("malformed category code {code:?}")));
    }
    if self.page_size == 0 {
      return Err(WeeklyError::InvalidConfig("page_size must be positive".into()));
    }
    self.arxiv_url()?;
    self.reddit_auth_url()?;
    self.reddit_api_url()?;
    Ok(())
  }

  /// Pause between arXiv pages.
  pub fn delay(&self) -> Duration { Duration::from_secs(self.delay_secs) }

  /// Parsed arXiv search endpoint.
  pub fn arxiv_url(&self) -> Result<Url, WeeklyError> { Ok(Url::parse(&self.arxiv_url)?) }

  /// Parsed Reddit token endpoint.
  pub fn reddit_auth_url(&self) -> Result<Url, WeeklyError> {
    Ok(Url::parse(&self.reddit_auth_url)?)
  }

  /// Parsed Reddit submission endpoint.
  pub fn reddit_api_url(&self) -> Result<Url, WeeklyError> { Ok(Url::parse(&self.reddit_api_url)?) }
}
