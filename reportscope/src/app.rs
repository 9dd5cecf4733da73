//! Application state for the TUI.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::ListState;
use reportscope_core::{ContentOrigin, Error, ReportIndex, Selection};

/// Which selector pane has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    /// Project selector
    #[default]
    Projects,
    /// Date selector
    Dates,
    /// Report selector
    Reports,
}

impl Pane {
    fn next(self) -> Self {
        match self {
            Pane::Projects => Pane::Dates,
            Pane::Dates => Pane::Reports,
            Pane::Reports => Pane::Projects,
        }
    }

    fn previous(self) -> Self {
        match self {
            Pane::Projects => Pane::Reports,
            Pane::Dates => Pane::Projects,
            Pane::Reports => Pane::Dates,
        }
    }
}

/// Main application state.
pub struct App {
    /// The selection cascade; absent when the index never loaded
    pub selection: Option<Selection>,
    /// Load failure shown as a persistent banner; selectors stay disabled
    pub load_error: Option<String>,
    /// Index URL, shown in the header
    pub index_url: String,
    /// Pane with keyboard focus
    pub active_pane: Pane,
    /// Project list selection state
    pub projects_state: ListState,
    /// Date list selection state
    pub dates_state: ListState,
    /// Report list selection state
    pub reports_state: ListState,
    /// Whether the date pane is in free-form entry mode
    pub editing_date: bool,
    /// Buffer for free-form date entry
    pub date_input: String,
    /// Whether the app should exit
    pub should_quit: bool,
}

impl App {
    /// Create the App from the startup fetch result.
    ///
    /// A load failure leaves the selection absent: every pane renders
    /// disabled and only quitting works, with the error shown as a banner.
    pub fn new(
        load_result: Result<ReportIndex, Error>,
        origin: ContentOrigin,
        index_url: String,
    ) -> Self {
        let (selection, load_error) = match load_result {
            Ok(index) => (Some(Selection::new(index, origin)), None),
            Err(e) => (None, Some(describe_load_error(&e))),
        };

        let mut projects_state = ListState::default();
        if let Some(sel) = &selection {
            if !sel.available_projects().is_empty() {
                projects_state.select(Some(0));
            }
        }

        Self {
            selection,
            load_error,
            index_url,
            active_pane: Pane::default(),
            projects_state,
            dates_state: ListState::default(),
            reports_state: ListState::default(),
            editing_date: false,
            date_input: String::new(),
            should_quit: false,
        }
    }

    /// Project options for display.
    pub fn projects(&self) -> Vec<String> {
        self.selection
            .as_ref()
            .map(|s| s.available_projects().iter().map(|p| p.to_string()).collect())
            .unwrap_or_default()
    }

    /// Date options for the committed project.
    pub fn dates(&self) -> Vec<String> {
        self.selection
            .as_ref()
            .map(|s| s.available_dates().iter().map(|d| d.to_string()).collect())
            .unwrap_or_default()
    }

    /// Report options for the committed (project, date) pair.
    pub fn reports(&self) -> Vec<String> {
        self.selection
            .as_ref()
            .map(|s| s.available_reports().to_vec())
            .unwrap_or_default()
    }

    /// The derived content location, empty while the cascade is incomplete.
    pub fn derived_location(&self) -> &str {
        self.selection
            .as_ref()
            .map(|s| s.derived_location())
            .unwrap_or("")
    }

    /// True when a date is committed but the index has no entry for it.
    pub fn date_is_invalid(&self) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|s| s.date().is_some() && !s.is_current_date_valid())
    }

    /// Handle keyboard input.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.editing_date {
            self.handle_date_entry_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                if self.selection.is_some() {
                    self.active_pane = self.active_pane.next();
                }
            }
            KeyCode::BackTab => {
                if self.selection.is_some() {
                    self.active_pane = self.active_pane.previous();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.select_first();
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.select_last();
            }
            KeyCode::Enter => {
                self.commit_highlighted();
            }
            KeyCode::Char('e') => {
                if self.active_pane == Pane::Dates && self.selection.is_some() {
                    self.start_date_entry();
                }
            }
            _ => {}
        }
    }

    /// Handle keyboard input while typing a date.
    fn handle_date_entry_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.editing_date = false;
                self.date_input.clear();
            }
            KeyCode::Enter => {
                let date = self.date_input.trim().to_string();
                self.editing_date = false;
                self.date_input.clear();
                if !date.is_empty() {
                    self.commit_date(&date);
                }
            }
            KeyCode::Backspace => {
                self.date_input.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                // ISO date shape; keep entry short
                if self.date_input.len() < 10 {
                    self.date_input.push(c);
                }
            }
            _ => {}
        }
    }

    /// Enter free-form date entry, prefilled with the committed date.
    fn start_date_entry(&mut self) {
        self.editing_date = true;
        self.date_input = self
            .selection
            .as_ref()
            .and_then(|s| s.date())
            .unwrap_or("")
            .to_string();
    }

    /// Commit the highlighted option of the active pane to the cascade.
    fn commit_highlighted(&mut self) {
        match self.active_pane {
            Pane::Projects => {
                if let Some(project) = self.highlighted(&self.projects_state, self.projects()) {
                    self.commit_project(&project);
                }
            }
            Pane::Dates => {
                if let Some(date) = self.highlighted(&self.dates_state, self.dates()) {
                    self.commit_date(&date);
                }
            }
            Pane::Reports => {
                if let Some(report) = self.highlighted(&self.reports_state, self.reports()) {
                    self.commit_report(&report);
                }
            }
        }
    }

    fn highlighted(&self, state: &ListState, options: Vec<String>) -> Option<String> {
        state.selected().and_then(|i| options.into_iter().nth(i))
    }

    /// Select a project: everything below it resets.
    fn commit_project(&mut self, project: &str) {
        let Some(sel) = self.selection.as_mut() else {
            return;
        };
        sel.set_project(project);
        tracing::debug!(project, "Project selected");

        self.dates_state = ListState::default();
        self.reports_state = ListState::default();
        if !self.dates().is_empty() {
            self.dates_state.select(Some(0));
        }
        self.active_pane = Pane::Dates;
    }

    /// Select a date: the report level resets. Absent dates are accepted
    /// and flagged by the date pane instead of being rejected.
    fn commit_date(&mut self, date: &str) {
        let Some(sel) = self.selection.as_mut() else {
            return;
        };
        sel.set_date(date);
        let valid = sel.is_current_date_valid();
        tracing::debug!(date, valid, "Date selected");

        self.reports_state = ListState::default();
        if valid {
            self.reports_state.select(Some(0));
            self.active_pane = Pane::Reports;
        }
    }

    /// Select a report and derive the content location.
    fn commit_report(&mut self, report: &str) {
        let Some(sel) = self.selection.as_mut() else {
            return;
        };
        // The pane only offers index members, so rejection means the UI and
        // the cascade disagree; log it rather than crash.
        match sel.set_report(report) {
            Ok(()) => {
                tracing::info!(location = sel.derived_location(), "Report selected");
            }
            Err(e) => {
                tracing::warn!(report, error = %e, "Report selection rejected");
            }
        }
    }

    fn active_len(&self) -> usize {
        match self.active_pane {
            Pane::Projects => self.projects().len(),
            Pane::Dates => self.dates().len(),
            Pane::Reports => self.reports().len(),
        }
    }

    fn active_state(&mut self) -> &mut ListState {
        match self.active_pane {
            Pane::Projects => &mut self.projects_state,
            Pane::Dates => &mut self.dates_state,
            Pane::Reports => &mut self.reports_state,
        }
    }

    /// Select the next row in the active pane.
    fn select_next(&mut self) {
        let len = self.active_len();
        if len == 0 {
            return;
        }
        let state = self.active_state();
        let i = match state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        state.select(Some(i));
    }

    /// Select the previous row in the active pane.
    fn select_previous(&mut self) {
        let len = self.active_len();
        if len == 0 {
            return;
        }
        let state = self.active_state();
        let i = match state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        state.select(Some(i));
    }

    /// Select the first row.
    fn select_first(&mut self) {
        if self.active_len() > 0 {
            self.active_state().select(Some(0));
        }
    }

    /// Select the last row.
    fn select_last(&mut self) {
        let len = self.active_len();
        if len > 0 {
            self.active_state().select(Some(len - 1));
        }
    }
}

/// Format a load failure for the banner.
fn describe_load_error(error: &Error) -> String {
    match error {
        Error::Load {
            status: Some(code),
            message,
        } => format!("HTTP {}: {}", code, message),
        other => other.to_string(),
    }
}
