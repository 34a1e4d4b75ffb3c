//! Rendering fetched papers into the weekly markdown post.
//!
//! Only papers updated inside the [`ReportWindow`] are rendered, newest original
//! submission first. Revisions of older papers therefore sink towards the bottom
//! of the list.

use std::path::Path;

use super::*;

/// Heading prefix shared by the post title and the first line of the body.
const TITLE_PREFIX: &str = "Quant Finance Arxiv submissions";

/// Paragraphs following the heading.
const PREAMBLE: [&str; 2] = [
  "This is your weekly snap of quant finance submissions to the Arxiv. Papers are sorted in \
   reverse chronological order of the *original* publication date. i.e. the newest papers are at \
   the top, revisions are lower down the list.",
  "If any paper take your fancy, you're encouraged to submit a link post to the subreddit, and \
   start the discussion in the comments. Or in this thread, what do I care I'm not your boss.",
];

/// A rendered digest, ready to be written or posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
  /// Post title
  title:       String,
  /// Markdown body
  body:        String,
  /// Window the report covers
  window:      ReportWindow,
  /// Number of papers rendered into the body
  paper_count: usize,
}

impl Report {
  /// Renders `papers` updated inside `window`.
  ///
  /// Categories are shown by their display name in `lookup`; codes without a name
  /// are left out.
  pub fn render(papers: &[Paper], lookup: &CategoryLookup, window: &ReportWindow) -> Self {
    info!("Creating reddit post text.");

    let title = format!("{TITLE_PREFIX} {} - {}", window.start(), window.end());

    let mut included: Vec<&Paper> =
      papers.iter().filter(|paper| window.contains(paper.updated)).collect();
    included.sort_by(|a, b| b.published.cmp(&a.published));

    let mut lines = vec![format!("# {title}")];
    lines.extend(PREAMBLE.iter().map(|paragraph| paragraph.to_string()));
    for paper in &included {
      lines.push(format!("### {}", paper.title));
      lines.push(format!("**Authors**: {}", paper.authors.join(", ")));
      lines.push(format!(
        "**Categories**: {}",
        lookup.display_names(&paper.categories).collect::<Vec<_>>().join(", ")
      ));
      lines.push(format!("**PDF**: {}", paper.pdf_url));
      lines.push(format!(
        "**Dates**: originally published: {}, updated: {}",
        paper.published, paper.updated
      ));
      lines.push(format!("**Summary**: {}", paper.summary));
      lines.push(String::new());
    }

    debug!("Rendered {} of {} papers for {window}", included.len(), papers.len());

    Self { title, body: lines.join("\n\n"), window: *window, paper_count: included.len() }
  }

  /// Post title, e.g. `Quant Finance Arxiv submissions 2024-03-04 - 2024-03-10`.
  pub fn title(&self) -> &str { &self.title }

  /// Markdown body.
  pub fn body(&self) -> &str { &self.body }

  /// Number of papers in the body.
  pub fn paper_count(&self) -> usize { self.paper_count }

  /// Writes the body to `dir`, named after the window, and returns the file's path.
  pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf, WeeklyError> {
    let path = dir.as_ref().join(self.window.file_name());
    info!("Saving reddit post text to {}.", path.display());
    std::fs::write(&path, &self.body)?;
    Ok(path)
  }
}
