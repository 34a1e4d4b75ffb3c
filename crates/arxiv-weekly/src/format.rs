//! Text cleanup for strings pulled out of the arXiv feed.
//!
//! Titles and abstracts in the Atom feed are hard-wrapped and indented, so a
//! title like `"Optimal Execution\n  with Price Impact"` must be collapsed back
//! into one line before it is rendered.
//!
//! # Examples
//!
//! ```
//! use arxiv_weekly::format;
//!
//! assert_eq!(format::clean_wrapped_text("Some\n  wrapped   text"), "Some wrapped text");
//! ```

/// Collapses every run of whitespace (line breaks included) into a single space
/// and trims both ends.
///
/// # Examples
///
/// ```
/// use arxiv_weekly::format;
///
/// assert_eq!(format::clean_wrapped_text("  Deep\nHedging  "), "Deep Hedging");
/// assert_eq!(format::clean_wrapped_text("\n\t \n"), "");
/// ```
pub fn clean_wrapped_text(text: &str) -> String {
  text.split_whitespace().collect::<Vec<&str>>().join(" ")
}
