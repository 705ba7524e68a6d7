//! Main TUI application.

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing::{info, warn};

use crate::provider::SnapshotProvider;
use crate::report::{self, ReportData};

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::{AppState, PopupState};

/// Poll timeout while auto-refresh is paused.
const PAUSED_POLL: Duration = Duration::from_millis(250);

/// Main TUI application.
pub struct App {
    provider: Box<dyn SnapshotProvider>,
    state: AppState,
    report_dir: PathBuf,
    /// Deadline of the next automatic cycle, set after the first render of
    /// the current one.
    next_refresh: Option<Instant>,
}

impl App {
    /// Creates a new App with the given provider.
    pub fn new(provider: Box<dyn SnapshotProvider>, interval_ms: u64, report_dir: PathBuf) -> Self {
        let label = provider.database_label();
        Self {
            provider,
            state: AppState::new(interval_ms, label),
            report_dir,
            next_refresh: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Runs the TUI application until the user quits.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_loop(&mut terminal, &EventHandler);

        // Restore the terminal even when the loop failed.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn run_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &EventHandler,
    ) -> io::Result<()> {
        self.advance();

        loop {
            self.draw(terminal)?;

            let now = Instant::now();
            let deadline = *self
                .next_refresh
                .get_or_insert_with(|| now + self.state.interval());
            let timeout = if self.state.paused {
                PAUSED_POLL
            } else {
                deadline.saturating_duration_since(now)
            };

            match events.next(timeout)? {
                Event::Tick => {
                    if !self.state.paused && Instant::now() >= deadline {
                        self.advance();
                    }
                }
                Event::Key(key) => {
                    if self.handle_key_event(key) {
                        return Ok(());
                    }
                }
                Event::Redraw => {}
            }
        }
    }

    /// Draws one frame.
    pub fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| render(frame, &self.state))?;
        Ok(())
    }

    /// Applies a key press. Returns `true` when the app should quit.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        let interval = self.state.interval();
        let action = handle_key(&mut self.state, key);
        if self.state.interval() != interval {
            // The next deadline is taken from the new interval.
            self.next_refresh = None;
        }
        match action {
            KeyAction::Quit => return true,
            KeyAction::Refresh => self.manual_refresh(),
            KeyAction::Preview => self.open_preview(),
            KeyAction::Export => self.export(),
            KeyAction::None => {}
        }
        false
    }

    /// Runs one refresh cycle.
    pub fn advance(&mut self) {
        let snapshot = self.provider.advance().clone();
        self.state.apply_snapshot(snapshot);
        self.state.database_label = self.provider.database_label();
        self.next_refresh = None;
    }

    /// Drops the collector and starts a new cycle from scratch.
    fn manual_refresh(&mut self) {
        self.provider.rebuild();
        self.advance();
        self.state.status_message = Some("Refreshed".to_string());
    }

    fn open_preview(&mut self) {
        let snapshot = self.provider.fresh_snapshot();
        let data = ReportData::from_snapshot(&snapshot, &self.provider.database_label());
        self.state.popup = PopupState::Preview(Box::new(data));
    }

    /// Exports the report shown in the preview, or a fresh snapshot when no
    /// preview is open.
    fn export(&mut self) {
        let data = match &self.state.popup {
            PopupState::Preview(data) => (**data).clone(),
            _ => {
                let snapshot = self.provider.fresh_snapshot();
                ReportData::from_snapshot(&snapshot, &self.provider.database_label())
            }
        };
        self.state.status_message = Some(match report::export(&data, &self.report_dir) {
            Ok(path) => {
                info!("Report exported to {}", path.display());
                format!("Report saved to {}", path.display())
            }
            Err(e) => {
                warn!("Report export failed: {}", e);
                format!("Export failed: {}", e)
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use chrono::{Duration as ChronoDuration, Utc};
    use crossterm::event::{KeyCode, KeyEventKind, KeyEventState, KeyModifiers};
    use ratatui::backend::TestBackend;

    use crate::model::{
        ConnectionRow, ConnectionStatus, DashboardSnapshot, DatabaseInfo, IndexUsageRow,
        PerformanceMetrics, ProbeOutcome, QueryProbeResult, TableSizeRow,
    };

    /// Serves the same snapshot every cycle.
    struct FixtureProvider {
        snapshot: DashboardSnapshot,
        current: Option<DashboardSnapshot>,
        cycles: u64,
        rebuilds: Rc<Cell<u32>>,
    }

    impl SnapshotProvider for FixtureProvider {
        fn current(&self) -> Option<&DashboardSnapshot> {
            self.current.as_ref()
        }

        fn advance(&mut self) -> &DashboardSnapshot {
            self.cycles += 1;
            self.current.insert(self.snapshot.clone())
        }

        fn fresh_snapshot(&mut self) -> DashboardSnapshot {
            self.snapshot.clone()
        }

        fn rebuild(&mut self) {
            self.rebuilds.set(self.rebuilds.get() + 1);
        }

        fn database_label(&self) -> String {
            "shop@db.internal:5432".to_string()
        }

        fn cycles(&self) -> u64 {
            self.cycles
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn session(pid: i32, state: &str, query: &str) -> ConnectionRow {
        ConnectionRow {
            pid,
            username: Some("shop".to_string()),
            application_name: "checkout".to_string(),
            client_address: Some("10.1.2.3".to_string()),
            client_port: Some(40000 + pid),
            backend_start: Some(Utc::now() - ChronoDuration::minutes(5)),
            query_start: Some(Utc::now() - ChronoDuration::seconds(2)),
            state_change: None,
            state: state.to_string(),
            query_text: query.to_string(),
        }
    }

    fn healthy_snapshot() -> DashboardSnapshot {
        let now = Utc::now();
        DashboardSnapshot {
            taken_at: now,
            connection: ConnectionStatus::up(1.8, Some("shop".to_string())),
            server: Some(DatabaseInfo {
                version: "PostgreSQL 16.2 on x86_64-pc-linux-gnu".to_string(),
                server_start_time: now - ChronoDuration::days(3),
                current_time: now,
                timezone: "UTC".to_string(),
                database_size_bytes: 52_428_800,
                active_connections: 3,
                max_connections: 100,
                uptime_seconds: 259_200.0,
            }),
            performance: Some(PerformanceMetrics {
                cache_hit_ratio_pct: 99.5,
                commits_ratio: 0.99,
                rollbacks_ratio: 0.01,
                blocks_read_ratio: 0.005,
                lock_count: 7,
                deadlock_count: 0,
                temp_file_count: 4,
                temp_bytes: 2048,
            }),
            probes: QueryProbeResult::from_fn(|_| ProbeOutcome::succeeded(0.0012)),
            sessions: Some(vec![
                session(4101, "active", "SELECT * FROM orders WHERE id = $1"),
                session(4102, "idle", "COMMIT"),
                session(4103, "idle in transaction", "UPDATE carts SET total = 0"),
            ]),
            tables: Some(vec![TableSizeRow {
                schema: "public".to_string(),
                table_name: "orders".to_string(),
                size_pretty: "48 MB".to_string(),
                size_bytes: 50_331_648,
            }]),
            indexes: Some(vec![IndexUsageRow {
                schema: "public".to_string(),
                table_name: "orders".to_string(),
                index_name: "orders_pkey".to_string(),
                index_scans: 1200,
                tuples_read: 1300,
                tuples_fetched: 1200,
                index_size: "2208 kB".to_string(),
                index_size_bytes: 2_260_992,
            }]),
        }
    }

    fn app_with(snapshot: DashboardSnapshot, report_dir: PathBuf) -> (App, Rc<Cell<u32>>) {
        let rebuilds = Rc::new(Cell::new(0));
        let provider = FixtureProvider {
            snapshot,
            current: None,
            cycles: 0,
            rebuilds: Rc::clone(&rebuilds),
        };
        (App::new(Box::new(provider), 1000, report_dir), rebuilds)
    }

    fn screen(app: &App) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(160, 50)).unwrap();
        app.draw(&mut terminal).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect()
    }

    /// Text of the tile titled `label`, read from the line under its title.
    fn tile_value(lines: &[String], label: &str) -> Option<String> {
        let (row, col) = lines.iter().enumerate().find_map(|(i, line)| {
            line.find(&format!(" {} ", label))
                .map(|byte| (i, line[..byte].chars().count()))
        })?;
        let value_line: Vec<char> = lines.get(row + 1)?.chars().collect();
        let end = (col + 14).min(value_line.len());
        let value: String = value_line[col.saturating_sub(1)..end]
            .iter()
            .filter(|c| **c != '│' && !c.is_whitespace())
            .collect();
        Some(value)
    }

    #[test]
    fn healthy_database_renders_connected_sessions_and_deadlocks() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = app_with(healthy_snapshot(), dir.path().to_path_buf());
        app.advance();
        let lines = screen(&app);
        let text = lines.join("\n");

        assert!(text.contains("CONNECTED"));
        assert!(!text.contains("DISCONNECTED"));
        for pid in ["4101", "4102", "4103"] {
            assert_eq!(
                lines.iter().filter(|l| l.contains(pid)).count(),
                1,
                "session {pid} should be listed once"
            );
        }
        assert!(text.contains("Total 3"));
        assert_eq!(tile_value(&lines, "Deadlocks").as_deref(), Some("0"));
        assert!(text.contains("orders_pkey"));
        assert!(text.contains("LIVE"));
    }

    #[test]
    fn unreachable_database_renders_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = DashboardSnapshot::unreachable(Utc::now(), "connection refused");
        let (mut app, _) = app_with(snapshot, dir.path().to_path_buf());
        app.advance();
        let text = screen(&app).join("\n");

        assert!(text.contains("DISCONNECTED"));
        assert!(text.contains("connection refused"));
        for placeholder in [
            "Server info unavailable",
            "Performance metrics unavailable",
            "Query probes unavailable",
            "Sessions unavailable",
            "Table sizes unavailable",
            "Index usage unavailable",
        ] {
            assert!(text.contains(placeholder), "missing '{placeholder}'");
        }
    }

    #[test]
    fn manual_refresh_rebuilds_collector() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, rebuilds) = app_with(healthy_snapshot(), dir.path().to_path_buf());
        app.advance();
        assert!(!app.handle_key_event(key(KeyCode::Char('r'))));
        assert_eq!(rebuilds.get(), 1);
        assert_eq!(app.state().status_message.as_deref(), Some("Refreshed"));
    }

    #[test]
    fn preview_then_export_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = app_with(healthy_snapshot(), dir.path().to_path_buf());
        app.advance();

        app.handle_key_event(key(KeyCode::Char('p')));
        assert!(matches!(app.state().popup, PopupState::Preview(_)));
        assert!(screen(&app).join("\n").contains("Report preview"));

        app.handle_key_event(key(KeyCode::Char('e')));
        let status = app.state().status_message.clone().unwrap();
        assert!(status.starts_with("Report saved to "), "{status}");

        let written: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(written.len(), 1);

        app.handle_key_event(key(KeyCode::Esc));
        assert_eq!(app.state().popup, PopupState::None);
    }

    #[test]
    fn interval_change_drops_pending_deadline() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = app_with(healthy_snapshot(), dir.path().to_path_buf());
        app.advance();
        let far = Instant::now() + Duration::from_secs(5);

        app.next_refresh = Some(far);
        app.handle_key_event(key(KeyCode::Char('-')));
        assert_eq!(app.state().interval_ms(), 500);
        assert_eq!(app.next_refresh, None);

        app.next_refresh = Some(far);
        app.handle_key_event(key(KeyCode::Char('+')));
        assert_eq!(app.state().interval_ms(), 1000);
        assert_eq!(app.next_refresh, None);

        // Keys that leave the interval alone keep the deadline.
        app.next_refresh = Some(far);
        app.handle_key_event(key(KeyCode::Char('a')));
        assert_eq!(app.next_refresh, Some(far));
    }

    #[test]
    fn quit_requires_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = app_with(healthy_snapshot(), dir.path().to_path_buf());
        assert!(!app.handle_key_event(key(KeyCode::Char('q'))));
        assert!(screen(&app).join("\n").contains("Exit pgdash"));
        assert!(app.handle_key_event(key(KeyCode::Char('q'))));
    }
}
