//! Paper metadata and category types.
//!
//! A [`Paper`] is one metadata entry from the arXiv feed for a single version of a
//! document. Its categories are held in a [`CategorySet`], and a
//! [`CategoryLookup`] maps category codes to the names shown in the report.
//!
//! # Examples
//!
//! ```
//! use arxiv_weekly::paper::{CategoryLookup, CategorySet};
//!
//! let paper_categories: CategorySet = ["q-fin.PR", "stat.ML"].into_iter().collect();
//! let targets: CategorySet = ["q-fin.PR", "q-fin.TR"].into_iter().collect();
//! assert!(paper_categories.intersects(&targets));
//!
//! let lookup: CategoryLookup = [("q-fin.PR", "Pricing of Securities")].into_iter().collect();
//! let names: Vec<&str> = lookup.display_names(&paper_categories).collect();
//! assert_eq!(names, vec!["Pricing of Securities"]);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use lazy_static::lazy_static;
use regex::Regex;

use super::*;

lazy_static! {
  /// Shape of an arXiv category code, e.g. `q-fin.PR`, `stat.ML` or `econ`.
  static ref CATEGORY_CODE: Regex = Regex::new(r"^[a-zA-Z-]+(\.[a-zA-Z-]+)?$").unwrap();
}

/// An ordered set of arXiv category codes.
///
/// Iteration is in lexicographic order, which keeps rendered category lists stable
/// from run to run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySet(BTreeSet<String>);

impl CategorySet {
  /// Creates an empty set.
  pub fn new() -> Self { Self::default() }

  /// Adds a code, returning whether it was newly inserted.
  pub fn insert(&mut self, code: impl Into<String>) -> bool { self.0.insert(code.into()) }

  /// Whether `code` is in the set.
  pub fn contains(&self, code: &str) -> bool { self.0.contains(code) }

  /// Whether the two sets share at least one code.
  pub fn intersects(&self, other: &CategorySet) -> bool { !self.0.is_disjoint(&other.0) }

  /// All codes in either set.
  pub fn union(&self, other: &CategorySet) -> CategorySet {
    CategorySet(self.0.union(&other.0).cloned().collect())
  }

  /// Codes present in both sets.
  pub fn intersection(&self, other: &CategorySet) -> CategorySet {
    CategorySet(self.0.intersection(&other.0).cloned().collect())
  }

  /// Codes in lexicographic order.
  pub fn iter(&self) -> impl Iterator<Item = &str> { self.0.iter().map(String::as_str) }

  /// Number of codes in the set.
  pub fn len(&self) -> usize { self.0.len() }

  /// Whether the set holds no codes.
  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  /// Returns the first code that does not look like an arXiv category, if any.
  pub fn first_invalid(&self) -> Option<&str> {
    self.iter().find(|code| !CATEGORY_CODE.is_match(code))
  }
}

impl<S: Into<String>> FromIterator<S> for CategorySet {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    CategorySet(iter.into_iter().map(Into::into).collect())
  }
}

impl<S: Into<String>> Extend<S> for CategorySet {
  fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
    self.0.extend(iter.into_iter().map(Into::into));
  }
}

/// Maps category codes to human readable names.
///
/// Codes without an entry are simply not named; looking them up is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryLookup(BTreeMap<String, String>);

impl CategoryLookup {
  /// The display name for `code`, or `None` when the code is unmapped.
  pub fn display_name(&self, code: &str) -> Option<&str> { self.0.get(code).map(String::as_str) }

  /// Display names for every mapped code in `categories`, skipping unmapped ones.
  pub fn display_names<'s, 'c>(
    &'s self,
    categories: &'c CategorySet,
  ) -> impl Iterator<Item = &'s str> + 'c
  where
    's: 'c,
  {
    categories.iter().filter_map(move |code| self.display_name(code))
  }

  /// Number of mapped codes.
  pub fn len(&self) -> usize { self.0.len() }

  /// Whether no code is mapped.
  pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CategoryLookup {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    CategoryLookup(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
  }
}

/// One version of an arXiv paper as reported by the search feed.
///
/// `published` is the date of the first version, `updated` the date of the version
/// this record describes, so `published <= updated` holds for upstream data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
  /// Author display names, in feed order
  pub authors:    Vec<String>,
  /// Title with line wrapping removed
  pub title:      String,
  /// Abstract with line wrapping removed
  pub summary:    String,
  /// Date of this version
  pub updated:    NaiveDate,
  /// Date of the original submission
  pub published:  NaiveDate,
  /// Primary category together with every listed category
  pub categories: CategorySet,
  /// Link to the PDF of this version
  pub pdf_url:    String,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn set(codes: &[&str]) -> CategorySet { codes.iter().copied().collect() }

  #[test]
  fn test_intersects() {
    assert!(set(&["A", "B"]).intersects(&set(&["B", "C"])));
    assert!(!set(&["A", "B"]).intersects(&set(&["D"])));
    assert!(!set(&[]).intersects(&set(&["D"])));
  }

  #[test]
  fn test_union_and_intersection() {
    let a = set(&["q-fin.PR", "stat.ML"]);
    let b = set(&["q-fin.PR", "q-fin.TR"]);
    assert_eq!(a.union(&b), set(&["q-fin.PR", "q-fin.TR", "stat.ML"]));
    assert_eq!(a.intersection(&b), set(&["q-fin.PR"]));
  }

  #[test]
  fn test_iteration_is_sorted() {
    let codes = set(&["stat.ML", "q-fin.TR", "q-fin.PR"]);
    assert_eq!(codes.iter().collect::<Vec<_>>(), vec!["q-fin.PR", "q-fin.TR", "stat.ML"]);
  }

  #[test]
  fn test_first_invalid() {
    assert_eq!(set(&["q-fin.PR", "econ", "cs.LG"]).first_invalid(), None);
    assert_eq!(set(&["q-fin.PR", "cat:q-fin OR all"]).first_invalid(), Some("cat:q-fin OR all"));
  }

  #[test]
  fn test_display_names_skip_unmapped() {
    let lookup: CategoryLookup = [("q-fin.PR", "Pricing of Securities")].into_iter().collect();
    let names: Vec<&str> = lookup.display_names(&set(&["q-fin.PR", "stat.ML"])).collect();
    assert_eq!(names, vec!["Pricing of Securities"]);
    assert_eq!(lookup.display_name("stat.ML"), None);
  }

  #[test]
  fn test_empty_lookup_names_nothing() {
    let lookup = CategoryLookup::default();
    assert!(lookup.is_empty());
    assert_eq!(lookup.display_names(&set(&["q-fin.PR"])).count(), 0);
  }

  #[test]
  fn test_insert() {
    let mut codes = CategorySet::new();
    assert!(codes.insert("q-fin.PR"));
    assert!(!codes.insert("q-fin.PR"));
    assert_eq!(codes.len(), 1);
  }
}
