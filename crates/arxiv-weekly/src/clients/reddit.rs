//! Client for posting a rendered report to a subreddit.
//!
//! Publishing uses Reddit's "script" application flow: the app's client id and
//! secret plus the account's username and password are exchanged for a bearer
//! token, which is then used to submit a self post.
//!
//! Publishing is optional. [`PublishTarget::from_parts`] only yields a target when
//! every credential and the subreddit are present, and callers skip publication
//! otherwise.
//!
//! # Examples
//!
//! ```no_run
//! use arxiv_weekly::clients::reddit::{PublishTarget, RedditClient};
//!
//! # async fn example(report: arxiv_weekly::report::Report) -> Result<(), Box<dyn std::error::Error>> {
//! let target = PublishTarget::from_parts(
//!   Some("weekly-digest".into()),
//!   Some("client-id".into()),
//!   Some("client-secret".into()),
//!   Some("digest-bot".into()),
//!   Some("hunter2".into()),
//!   Some("quant".into()),
//! );
//!
//! if let Some(target) = target {
//!   RedditClient::new(&target.credentials.app_name).publish(&target, &report).await?;
//! }
//! # Ok(())
//! # }
//! ```

use reqwest::header::USER_AGENT;

use super::*;
use crate::{
  config::{REDDIT_API_URL, REDDIT_AUTH_URL},
  report::Report,
};

/// Credentials of a Reddit script application and the account it posts as.
#[derive(Clone, PartialEq, Eq)]
pub struct RedditCredentials {
  /// Application name, sent as the user agent
  pub app_name:      String,
  /// OAuth client id of the application
  pub client_id:     String,
  /// OAuth client secret of the application
  pub client_secret: String,
  /// Account username
  pub username:      String,
  /// Account password
  pub password:      String,
}

impl std::fmt::Debug for RedditCredentials {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RedditCredentials")
      .field("app_name", &self.app_name)
      .field("client_id", &self.client_id)
      .field("client_secret", &"<redacted>")
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .finish()
  }
}

/// Where and as whom a report is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTarget {
  /// Who posts
  pub credentials: RedditCredentials,
  /// Subreddit name, without the `r/` prefix
  pub subreddit:   String,
}

impl PublishTarget {
  /// Assembles a target from optional parts.
  ///
  /// Returns `None` unless all six values are present and non-empty, in which case
  /// the report is not published.
  pub fn from_parts(
    app_name: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    username: Option<String>,
    password: Option<String>,
    subreddit: Option<String>,
  ) -> Option<Self> {
    let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
    Some(Self {
      credentials: RedditCredentials {
        app_name:      present(app_name)?,
        client_id:     present(client_id)?,
        client_secret: present(client_secret)?,
        username:      present(username)?,
        password:      present(password)?,
      },
      subreddit:   present(subreddit)?,
    })
  }
}

/// A bearer token from the password grant.
#[derive(Clone, Deserialize)]
pub struct AccessToken {
  /// The token itself
  access_token: String,
}

impl AccessToken {
  /// The raw token value.
  pub fn secret(&self) -> &str { &self.access_token }
}

impl std::fmt::Debug for AccessToken {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str("AccessToken(<redacted>)")
  }
}

/// Client for Reddit's token and submission endpoints.
pub struct RedditClient {
  /// Internal web client used to connect to the API.
  client:   reqwest::Client,
  /// Sent as the `User-Agent` of every request.
  app_name: String,
  /// Token endpoint.
  auth_url: Url,
  /// Submission endpoint.
  api_url:  Url,
}

impl RedditClient {
  /// Creates a client for reddit.com identifying itself as `app_name`.
  pub fn new(app_name: &str) -> Self {
    Self {
      client:   reqwest::Client::new(),
      app_name: app_name.to_string(),
      auth_url: Url::parse(REDDIT_AUTH_URL).expect("REDDIT_AUTH_URL is a valid URL"),
      api_url:  Url::parse(REDDIT_API_URL).expect("REDDIT_API_URL is a valid URL"),
    }
  }

  /// Points the client at other token and submission endpoints.
  pub fn with_endpoints(mut self, auth_url: Url, api_url: Url) -> Self {
    self.auth_url = auth_url;
    self.api_url = api_url;
    self
  }

  /// Exchanges account credentials for a bearer token.
  ///
  /// # Errors
  ///
  /// Fails on network errors, on any non-success status and when the response
  /// carries no `access_token`.
  pub async fn access_token(
    &self,
    credentials: &RedditCredentials,
  ) -> Result<AccessToken, WeeklyError> {
    debug!("Requesting Reddit access token for {}", credentials.username);

    let response = self
      .client
      .post(self.auth_url.clone())
      .header(USER_AGENT, &self.app_name)
      .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
      .form(&[
        ("grant_type", "password"),
        ("username", credentials.username.as_str()),
        ("password", credentials.password.as_str()),
      ])
      .send()
      .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
      return Err(WeeklyError::ApiError(format!("Reddit token request returned {status}: {body}")));
    }

    // Reddit reports bad credentials as a 200 with an `error` field and no token
    serde_json::from_str(&body).map_err(|e| {
      WeeklyError::ApiError(format!("Reddit token response has no access token ({e}): {body}"))
    })
  }

  /// Submits a self post to `subreddit`.
  ///
  /// # Errors
  ///
  /// Fails on network errors and on any non-success status.
  pub async fn submit(
    &self,
    token: &AccessToken,
    subreddit: &str,
    title: &str,
    text: &str,
  ) -> Result<(), WeeklyError> {
    info!("Submitting post to r/{subreddit}: {title}");

    let response = self
      .client
      .post(self.api_url.clone())
      .header(USER_AGENT, &self.app_name)
      .bearer_auth(token.secret())
      .query(&[
        ("kind", "self"),
        ("sr", subreddit),
        ("title", title),
        ("nsfw", "false"),
        ("ad", "false"),
      ])
      .form(&[("text", text)])
      .send()
      .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
      return Err(WeeklyError::ApiError(format!("Reddit submission returned {status}: {body}")));
    }

    debug!("Reddit submission response: {body}");
    Ok(())
  }

  /// Obtains a token for `target` and submits `report` with it.
  pub async fn publish(&self, target: &PublishTarget, report: &Report) -> Result<(), WeeklyError> {
    let token = self.access_token(&target.credentials).await?;
    self.submit(&token, &target.subreddit, report.title(), report.body()).await
  }
}
