use wiremock::{
  matchers::{method, path, query_param},
  Mock, MockServer, ResponseTemplate,
};

use super::*;

pub(crate) fn date(iso: &str) -> NaiveDate { iso.parse().unwrap() }

pub(crate) fn paper(title: &str, published: &str, updated: &str, categories: &[&str]) -> Paper {
  Paper {
    authors:    vec!["Ada Lovelace".into(), "Louis Bachelier".into()],
    title:      title.into(),
    summary:    format!("Abstract of {title}."),
    updated:    date(updated),
    published:  date(published),
    categories: categories.iter().copied().collect(),
    pdf_url:    format!("http://arxiv.org/pdf/{title}"),
  }
}

/// One `<entry>` laid out the way the arXiv API lays it out, wrapped text included.
pub(crate) fn atom_entry(
  id: &str,
  updated: &str,
  published: &str,
  primary: &str,
  categories: &[&str],
) -> String {
  let categories: String = categories
    .iter()
    .map(|c| format!(r#"<category term="{c}" scheme="http://arxiv.org/schemas/atom"/>"#))
    .collect();
  format!(
    r#"<entry>
    <id>http://arxiv.org/abs/{id}v1</id>
    <updated>{updated}T17:59:59Z</updated>
    <published>{published}T09:00:00Z</published>
    <title>Paper {id} about
      option pricing</title>
    <summary>  We price options
  with a   wrapped abstract.
</summary>
    <author>
      <name>Ada Lovelace</name>
    </author>
    <author>
      <name>Louis Bachelier</name>
      <arxiv:affiliation>Sorbonne</arxiv:affiliation>
    </author>
    <arxiv:doi>10.0000/example.{id}</arxiv:doi>
    <link title="doi" href="http://dx.doi.org/10.0000/example.{id}" rel="related"/>
    <arxiv:comment>12 pages</arxiv:comment>
    <link href="http://arxiv.org/abs/{id}v1" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/{id}v1" rel="related" type="application/pdf"/>
    <arxiv:primary_category term="{primary}" scheme="http://arxiv.org/schemas/atom"/>
    {categories}
  </entry>"#
  )
}

pub(crate) fn atom_feed(entries: &[String]) -> String {
  format!(
    r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/" xmlns:arxiv="http://arxiv.org/schemas/atom">
  <link href="http://arxiv.org/api/query" rel="self" type="application/atom+xml"/>
  <title type="html">ArXiv Query: search_query=cat:q-fin.PR</title>
  <id>http://arxiv.org/api/example</id>
  <updated>2024-03-11T00:00:00-05:00</updated>
  <opensearch:totalResults>{}</opensearch:totalResults>
  <opensearch:startIndex>0</opensearch:startIndex>
  <opensearch:itemsPerPage>20</opensearch:itemsPerPage>
  {}
</feed>"#,
    entries.len(),
    entries.join("\n  ")
  )
}

fn config(server: &MockServer) -> Config {
  Config {
    categories: ["q-fin.PR", "q-fin.TR"].into_iter().collect(),
    category_names: [("q-fin.PR", "Pricing of Securities")].into_iter().collect(),
    delay_secs: 0,
    arxiv_url: format!("{}/api/query", server.uri()),
    reddit_auth_url: format!("{}/api/v1/access_token", server.uri()),
    reddit_api_url: format!("{}/api/submit", server.uri()),
    ..Config::default()
  }
}

fn options(output_dir: &std::path::Path, publish: Option<PublishTarget>) -> RunOptions {
  RunOptions {
    window: ReportWindow::new(date("2024-03-04"), date("2024-03-10")).unwrap(),
    output_dir: output_dir.to_path_buf(),
    publish,
  }
}

/// Two in-window papers in the target categories and one from before the window.
async fn mount_feed(server: &MockServer) {
  Mock::given(method("GET"))
    .and(path("/api/query"))
    .and(query_param("start", "0"))
    .respond_with(ResponseTemplate::new(200).set_body_string(atom_feed(&[
      atom_entry("2403.00002", "2024-03-08", "2024-01-15", "q-fin.TR", &["q-fin.TR"]),
      atom_entry("2403.00001", "2024-03-06", "2024-03-06", "q-fin.PR", &["q-fin.PR", "stat.ML"]),
      atom_entry("2402.00003", "2024-02-27", "2024-02-27", "q-fin.PR", &["q-fin.PR"]),
    ])))
    .expect(1)
    .mount(server)
    .await;
}

fn publish_target(subreddit: Option<String>) -> Option<PublishTarget> {
  PublishTarget::from_parts(
    Some("weekly-digest".into()),
    Some("client-id".into()),
    Some("client-secret".into()),
    Some("digest-bot".into()),
    Some("hunter2".into()),
    subreddit,
  )
}

#[traced_test]
#[tokio::test]
async fn test_run_writes_report() -> anyhow::Result<()> {
  let server = MockServer::start().await;
  mount_feed(&server).await;
  let dir = tempfile::tempdir()?;

  let outcome = run(&config(&server), &options(dir.path(), None)).await?;

  assert_eq!(outcome.path, dir.path().join("arxiv_submissions_2024-03-04_2024-03-10.md"));
  assert_eq!(outcome.papers_rendered, 2);
  assert!(!outcome.published);

  let body = std::fs::read_to_string(&outcome.path)?;
  assert!(body.starts_with("# Quant Finance Arxiv submissions 2024-03-04 - 2024-03-10\n\n"));
  assert!(body.contains("This is your weekly snap of quant finance submissions to the Arxiv."));
  assert!(body.contains("Or in this thread, what do I care I'm not your boss."));
  assert_eq!(body.matches("### ").count(), 2);

  // Newest original submission first, regardless of update order
  let newer = body.find("### Paper 2403.00001 about option pricing").unwrap();
  let older = body.find("### Paper 2403.00002 about option pricing").unwrap();
  assert!(newer < older);
  assert!(!body.contains("2402.00003"));

  assert!(body.contains("**Authors**: Ada Lovelace, Louis Bachelier"));
  assert!(body.contains("**PDF**: http://arxiv.org/pdf/2403.00001v1"));
  assert!(body.contains("**Summary**: We price options with a wrapped abstract."));
  assert!(body.contains("**Dates**: originally published: 2024-01-15, updated: 2024-03-08"));
  assert!(logs_contain("Skipping Reddit publication"));
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_run_without_subreddit_never_requests_token() -> anyhow::Result<()> {
  let server = MockServer::start().await;
  mount_feed(&server).await;
  Mock::given(method("POST"))
    .respond_with(ResponseTemplate::new(200))
    .expect(0)
    .mount(&server)
    .await;
  let dir = tempfile::tempdir()?;

  let publish = publish_target(None);
  assert!(publish.is_none());

  let outcome = run(&config(&server), &options(dir.path(), publish)).await?;
  assert!(!outcome.published);
  assert!(outcome.path.exists());
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_run_publishes_report() -> anyhow::Result<()> {
  let server = MockServer::start().await;
  mount_feed(&server).await;
  Mock::given(method("POST"))
    .and(path("/api/v1/access_token"))
    .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"access_token": "tok-123"}"#))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("POST"))
    .and(path("/api/submit"))
    .and(query_param("sr", "quant"))
    .and(query_param("title", "Quant Finance Arxiv submissions 2024-03-04 - 2024-03-10"))
    .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
    .expect(1)
    .mount(&server)
    .await;
  let dir = tempfile::tempdir()?;

  let outcome =
    run(&config(&server), &options(dir.path(), publish_target(Some("quant".into())))).await?;
  assert!(outcome.published);
  assert_eq!(outcome.papers_rendered, 2);
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_run_keeps_file_when_publishing_fails() -> anyhow::Result<()> {
  let server = MockServer::start().await;
  mount_feed(&server).await;
  Mock::given(method("POST"))
    .and(path("/api/v1/access_token"))
    .respond_with(ResponseTemplate::new(500))
    .mount(&server)
    .await;
  let dir = tempfile::tempdir()?;

  let result =
    run(&config(&server), &options(dir.path(), publish_target(Some("quant".into())))).await;
  assert!(matches!(result, Err(WeeklyError::ApiError(_))));
  assert!(dir.path().join("arxiv_submissions_2024-03-04_2024-03-10.md").exists());
  Ok(())
}

#[tokio::test]
async fn test_run_rejects_invalid_config() {
  let config = Config { categories: CategorySet::new(), ..Config::default() };
  let dir = tempfile::tempdir().unwrap();
  let result = run(&config, &options(dir.path(), None)).await;
  assert!(matches!(result, Err(WeeklyError::InvalidConfig(_))));
}
