//! The cascading selection state machine.
//!
//! A [`Selection`] walks the index top-down: project, then date, then
//! report. Choosing a level clears everything below it, so stale
//! combinations can never survive a change higher up. Once all three
//! levels are chosen and consistent with the index, the selection derives
//! the location of the report's content under the configured origin.
//!
//! Dates are deliberately permissive: the UI lets the user type an
//! arbitrary date, and an absent one simply leaves the report level empty
//! and the derived location blank. Report names are strict: `set_report`
//! rejects anything the index does not list for the current pair.

use crate::config::ContentOrigin;
use crate::error::{Error, Result};
use crate::index::ReportIndex;

/// Current (project, date, report) choice over a report index.
#[derive(Debug, Clone)]
pub struct Selection {
    index: ReportIndex,
    origin: ContentOrigin,
    project: Option<String>,
    date: Option<String>,
    report: Option<String>,
    /// Recomputed on every mutation; empty while the cascade is incomplete.
    derived_location: String,
}

impl Selection {
    /// Create an empty selection over an index.
    pub fn new(index: ReportIndex, origin: ContentOrigin) -> Self {
        Self {
            index,
            origin,
            project: None,
            date: None,
            report: None,
            derived_location: String::new(),
        }
    }

    /// The index this selection draws its options from.
    pub fn index(&self) -> &ReportIndex {
        &self.index
    }

    /// Currently selected project, if any.
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    /// Currently selected date, if any. May be absent from the index; see
    /// [`Selection::is_current_date_valid`].
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// Currently selected report, if any.
    pub fn report(&self) -> Option<&str> {
        self.report.as_deref()
    }

    /// Select a project, clearing date and report unconditionally.
    ///
    /// Re-selecting the current project is an idempotent reset: the lower
    /// levels are cleared all the same.
    pub fn set_project(&mut self, name: &str) {
        self.project = Some(name.to_string());
        self.date = None;
        self.report = None;
        self.recompute_location();
    }

    /// Select a date, clearing the report unconditionally.
    ///
    /// The date is accepted even when the index has no entry for it under
    /// the current project; that is a soft condition the caller can observe
    /// via [`Selection::is_current_date_valid`] and recover from.
    pub fn set_date(&mut self, date: &str) {
        self.date = Some(date.to_string());
        self.report = None;
        self.recompute_location();
    }

    /// Select a report.
    ///
    /// The name must be one the index lists for the current (project, date)
    /// pair; anything else is rejected and leaves the selection untouched.
    pub fn set_report(&mut self, name: &str) -> Result<()> {
        let offered = self.available_reports();
        if !offered.iter().any(|r| r == name) {
            return Err(Error::Selection(format!(
                "report {:?} is not available for the current project/date",
                name
            )));
        }
        self.report = Some(name.to_string());
        self.recompute_location();
        Ok(())
    }

    /// Reset all three levels.
    pub fn clear(&mut self) {
        self.project = None;
        self.date = None;
        self.report = None;
        self.recompute_location();
    }

    /// The derived content location, or `""` while the cascade is
    /// incomplete or the date is not in the index.
    pub fn derived_location(&self) -> &str {
        &self.derived_location
    }

    /// Projects offered by the index.
    pub fn available_projects(&self) -> Vec<&str> {
        self.index.projects()
    }

    /// Dates offered for the current project; empty when no project is
    /// selected.
    pub fn available_dates(&self) -> Vec<&str> {
        match &self.project {
            Some(project) => self.index.dates(project),
            None => Vec::new(),
        }
    }

    /// Reports offered for the current (project, date) pair; empty when
    /// either level is unselected or the date is absent from the index.
    pub fn available_reports(&self) -> &[String] {
        match (&self.project, &self.date) {
            (Some(project), Some(date)) => self.index.reports(project, date),
            _ => &[],
        }
    }

    /// True iff the current date is a key under the current project.
    /// False when either is unselected.
    pub fn is_current_date_valid(&self) -> bool {
        match (&self.project, &self.date) {
            (Some(project), Some(date)) => self.index.is_date_valid(project, date),
            _ => false,
        }
    }

    /// Earliest and latest dates for the current project, if any.
    pub fn date_bounds(&self) -> Option<(&str, &str)> {
        self.index.date_bounds(self.project.as_deref()?)
    }

    /// Derive the location from the current state. Requires the full
    /// cascade: all three levels set, the date present in the index, and
    /// the report among those offered for the pair.
    fn recompute_location(&mut self) {
        self.derived_location = match (&self.project, &self.date, &self.report) {
            (Some(project), Some(date), Some(report))
                if self.index.is_date_valid(project, date)
                    && self.index.reports(project, date).iter().any(|r| r == report) =>
            {
                self.origin.resolve(project, date, report)
            }
            _ => String::new(),
        };
    }
}
