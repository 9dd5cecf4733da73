//! The report index: the project → date → report-name mapping.
//!
//! The index is a single JSON document published next to the reports
//! themselves:
//!
//! ```json
//! {
//!   "checkout-service": {
//!     "2024-01-01": ["coverage.html", "load-test.html"],
//!     "2024-01-02": ["coverage.html"]
//!   }
//! }
//! ```
//!
//! Dates are ISO calendar dates, so their lexicographic order equals their
//! chronological order. The inner maps are `BTreeMap`s to make date
//! iteration deterministic and already sorted; project iteration order is
//! not semantically significant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Mapping from project name to dated report listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ReportIndex {
    projects: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl ReportIndex {
    /// Parse an index document from its JSON text.
    ///
    /// Beyond the mapping shape, only one structural check is enforced:
    /// a date key must carry a non-empty report list. Anything else in the
    /// inner values propagates as-is.
    pub fn from_json(text: &str) -> Result<Self> {
        let index: ReportIndex = serde_json::from_str(text)?;
        index.check_shape()?;
        Ok(index)
    }

    fn check_shape(&self) -> Result<()> {
        for (project, dates) in &self.projects {
            for (date, reports) in dates {
                if reports.is_empty() {
                    return Err(Error::Load {
                        status: None,
                        message: format!("empty report list for {}/{}", project, date),
                    });
                }
            }
        }
        Ok(())
    }

    /// True when the index contains no projects at all.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Number of projects in the index.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Project names, as the map yields them.
    pub fn projects(&self) -> Vec<&str> {
        self.projects.keys().map(String::as_str).collect()
    }

    /// Date keys under a project, sorted ascending. Empty if the project
    /// is absent.
    pub fn dates(&self, project: &str) -> Vec<&str> {
        self.projects
            .get(project)
            .map(|dates| dates.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// The report names published for (project, date). Empty if either key
    /// is absent.
    pub fn reports(&self, project: &str, date: &str) -> &[String] {
        self.projects
            .get(project)
            .and_then(|dates| dates.get(date))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// True iff `date` is a key under `project`.
    pub fn is_date_valid(&self, project: &str, date: &str) -> bool {
        self.projects
            .get(project)
            .is_some_and(|dates| dates.contains_key(date))
    }

    /// The earliest and latest dates published for a project, or `None`
    /// when the project has no dates.
    ///
    /// ISO dates compare lexicographically, so the `BTreeMap`'s first and
    /// last keys are the chronological bounds.
    pub fn date_bounds(&self, project: &str) -> Option<(&str, &str)> {
        let dates = self.projects.get(project)?;
        let min = dates.keys().next()?;
        let max = dates.keys().next_back()?;
        Some((min.as_str(), max.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReportIndex {
        ReportIndex::from_json(
            r#"{
                "proj1": {
                    "2024-01-01": ["a.html", "b.html"],
                    "2024-01-15": ["a.html"]
                },
                "proj2": {
                    "2023-12-31": ["summary.html"]
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_and_query() {
        let index = sample();
        assert_eq!(index.len(), 2);
        assert_eq!(index.projects(), vec!["proj1", "proj2"]);
        assert_eq!(index.dates("proj1"), vec!["2024-01-01", "2024-01-15"]);
        assert_eq!(index.reports("proj1", "2024-01-01"), ["a.html", "b.html"]);
    }

    #[test]
    fn test_empty_index() {
        let index = ReportIndex::from_json("{}").unwrap();
        assert!(index.is_empty());
        assert!(index.projects().is_empty());
        assert!(index.dates("anything").is_empty());
    }

    #[test]
    fn test_absent_keys_yield_empty() {
        let index = sample();
        assert!(index.dates("no-such-project").is_empty());
        assert!(index.reports("proj1", "2024-02-01").is_empty());
        assert!(index.reports("no-such-project", "2024-01-01").is_empty());
    }

    #[test]
    fn test_is_date_valid() {
        let index = sample();
        assert!(index.is_date_valid("proj1", "2024-01-01"));
        assert!(!index.is_date_valid("proj1", "2024-01-02"));
        assert!(!index.is_date_valid("no-such-project", "2024-01-01"));
    }

    #[test]
    fn test_date_bounds() {
        let index = sample();
        let (min, max) = index.date_bounds("proj1").unwrap();
        assert_eq!(min, "2024-01-01");
        assert_eq!(max, "2024-01-15");
        for d in index.dates("proj1") {
            assert!(min <= d && d <= max);
        }

        // Single date: min == max
        assert_eq!(
            index.date_bounds("proj2"),
            Some(("2023-12-31", "2023-12-31"))
        );
        assert_eq!(index.date_bounds("no-such-project"), None);
    }

    #[test]
    fn test_rejects_empty_report_list() {
        let err = ReportIndex::from_json(r#"{"proj1": {"2024-01-01": []}}"#).unwrap_err();
        assert!(err.to_string().contains("proj1/2024-01-01"));
    }

    #[test]
    fn test_rejects_wrong_shape() {
        assert!(ReportIndex::from_json(r#"["not", "a", "mapping"]"#).is_err());
        assert!(ReportIndex::from_json(r#"{"proj1": ["flat"]}"#).is_err());
    }
}
