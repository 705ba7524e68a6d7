//! Application state for the dashboard TUI.

use std::time::Duration;

use crate::model::DashboardSnapshot;
use crate::report::ReportData;
use crate::view::DashboardView;

/// Refresh intervals selectable with `+` / `-`, in milliseconds.
pub const REFRESH_INTERVALS_MS: [u64; 11] = [25, 30, 35, 40, 50, 100, 200, 500, 1000, 2000, 5000];

pub const DEFAULT_INTERVAL_MS: u64 = 1000;

/// Position of `ms` in [`REFRESH_INTERVALS_MS`], if it is one of them.
pub fn interval_index(ms: u64) -> Option<usize> {
    REFRESH_INTERVALS_MS.iter().position(|&v| v == ms)
}

/// Active popup.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PopupState {
    #[default]
    None,
    /// Report preview built from a fresh snapshot.
    Preview(Box<ReportData>),
    QuitConfirm,
}

/// Main application state.
pub struct AppState {
    pub snapshot: Option<DashboardSnapshot>,
    pub view: Option<DashboardView>,
    pub popup: PopupState,
    /// Auto-refresh disabled.
    pub paused: bool,
    interval_index: usize,
    /// Label of the monitored database (header).
    pub database_label: String,
    /// Transient message shown in the footer.
    pub status_message: Option<String>,
}

impl AppState {
    /// Unknown intervals fall back to the default.
    pub fn new(interval_ms: u64, database_label: String) -> Self {
        let interval_index = interval_index(interval_ms)
            .or_else(|| interval_index(DEFAULT_INTERVAL_MS))
            .unwrap_or(0);
        Self {
            snapshot: None,
            view: None,
            popup: PopupState::None,
            paused: false,
            interval_index,
            database_label,
            status_message: None,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms())
    }

    pub fn interval_ms(&self) -> u64 {
        REFRESH_INTERVALS_MS[self.interval_index]
    }

    /// Next longer interval; stays at the longest one.
    pub fn slower(&mut self) {
        self.interval_index = (self.interval_index + 1).min(REFRESH_INTERVALS_MS.len() - 1);
    }

    /// Next shorter interval; stays at the shortest one.
    pub fn faster(&mut self) {
        self.interval_index = self.interval_index.saturating_sub(1);
    }

    pub fn apply_snapshot(&mut self, snapshot: DashboardSnapshot) {
        self.view = Some(DashboardView::build(&snapshot));
        self.snapshot = Some(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_cycles_within_allowed_set() {
        let mut state = AppState::new(25, String::new());
        state.faster();
        assert_eq!(state.interval_ms(), 25);
        for _ in 0..20 {
            state.slower();
        }
        assert_eq!(state.interval_ms(), 5000);
        state.faster();
        assert_eq!(state.interval_ms(), 2000);
    }

    #[test]
    fn unknown_interval_falls_back_to_default() {
        let state = AppState::new(1234, String::new());
        assert_eq!(state.interval_ms(), DEFAULT_INTERVAL_MS);
        assert_eq!(state.interval(), Duration::from_secs(1));
    }
}
