//! pgdash - read-only PostgreSQL monitoring dashboard.
//!
//! Supports three modes:
//! - TUI (default): live dashboard refreshed on a fixed interval
//! - `--export-only`: take one fresh snapshot, write the PNG report and exit
//! - `--headless`: run refresh cycles without a UI, logging one line per cycle
//!
//! Usage:
//!   pgdash --dsn postgres://app@db/shop
//!   pgdash --interval 5000                 # libpq env vars, 5 s refresh
//!   pgdash --export-only --report-dir ./out
//!   pgdash --headless -v

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

use pgdash::config::{
    DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_CONNECT_TIMEOUT, DEFAULT_POOL_SIZE,
    DEFAULT_STATEMENT_TIMEOUT, DbConfig,
};
use pgdash::fmt;
use pgdash::model::DashboardSnapshot;
use pgdash::provider::{LiveProvider, SnapshotProvider};
use pgdash::report::{self, ReportData};
use pgdash::tui::{App, DEFAULT_INTERVAL_MS, REFRESH_INTERVALS_MS, interval_index};

/// Read-only PostgreSQL monitoring dashboard.
#[derive(Parser)]
#[command(name = "pgdash", version, about = "PostgreSQL monitoring dashboard")]
struct Args {
    /// Connection string (URL or libpq key=value form).
    /// Falls back to PGHOST, PGPORT, PGUSER, PGPASSWORD, PGDATABASE.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    dsn: Option<String>,

    /// Refresh interval in milliseconds.
    /// One of 25, 30, 35, 40, 50, 100, 200, 500, 1000, 2000, 5000.
    #[arg(short, long, value_name = "MS", default_value_t = DEFAULT_INTERVAL_MS, value_parser = parse_interval)]
    interval: u64,

    /// Timeout for every dial to the server, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_CONNECT_TIMEOUT.as_millis() as u64)]
    connect_timeout: u64,

    /// How long a query waits for a pooled connection, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_ACQUIRE_TIMEOUT.as_millis() as u64)]
    acquire_timeout: u64,

    /// Server-side statement_timeout for every query, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_STATEMENT_TIMEOUT.as_millis() as u64)]
    statement_timeout: u64,

    /// Maximum number of pooled connections.
    #[arg(long, default_value_t = DEFAULT_POOL_SIZE)]
    pool_size: u32,

    /// Accept invalid or self-signed TLS certificates.
    #[arg(long)]
    accept_invalid_certs: bool,

    /// Directory for exported PNG reports.
    #[arg(long, value_name = "PATH", default_value = ".")]
    report_dir: PathBuf,

    /// Write one report and exit.
    #[arg(long, conflicts_with = "headless")]
    export_only: bool,

    /// Run refresh cycles without a terminal UI until Ctrl-C.
    #[arg(long)]
    headless: bool,

    /// Log file for TUI mode (logs are discarded otherwise).
    /// Headless modes always log to stderr.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

fn parse_interval(s: &str) -> Result<u64, String> {
    let ms: u64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number of milliseconds", s))?;
    match interval_index(ms) {
        Some(_) => Ok(ms),
        None => Err(format!(
            "{} ms is not a supported interval (allowed: {:?})",
            ms, REFRESH_INTERVALS_MS
        )),
    }
}

/// Where log lines go.
enum LogTarget {
    Stderr,
    File(PathBuf),
    Discard,
}

/// Initializes the tracing subscriber with the appropriate log level.
/// Default level is INFO. Use -q for quiet mode (errors only).
fn init_logging(verbose: u8, quiet: bool, target: LogTarget) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("pgdash={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).init(),
        LogTarget::File(path) => {
            match OpenOptions::new().create(true).append(true).open(&path) {
                Ok(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).init(),
                Err(e) => {
                    eprintln!("Warning: cannot open log file {}: {}", path.display(), e);
                    builder.with_writer(std::io::sink).init();
                }
            }
        }
        LogTarget::Discard => builder.with_writer(std::io::sink).init(),
    }
}

/// One-line summary of a refresh cycle.
fn describe_snapshot(snapshot: &DashboardSnapshot) -> String {
    let connection = &snapshot.connection;
    let mut parts = Vec::new();
    match (connection.connected, connection.ping_ms) {
        (true, Some(ping)) => parts.push(format!("connected ({})", fmt::format_ms(ping))),
        (true, None) => parts.push("connected".to_string()),
        (false, _) => parts.push(format!(
            "disconnected ({})",
            connection.error.as_deref().unwrap_or("unknown error")
        )),
    }
    if let Some(server) = &snapshot.server {
        parts.push(format!(
            "{} connections, {}",
            server.active_connections,
            fmt::format_bytes(server.database_size_bytes)
        ));
    }
    if let Some(perf) = &snapshot.performance {
        parts.push(format!("cache hit {}", fmt::format_pct(perf.cache_hit_ratio_pct)));
    }
    parts.push(format!(
        "{}/{} probes ok",
        snapshot.probes.success_count(),
        snapshot.probes.len()
    ));
    if let Some(sessions) = &snapshot.sessions {
        parts.push(format!("{} sessions", sessions.len()));
    }
    parts.push(format!("{}/6 sections", snapshot.available_sections()));
    parts.join(", ")
}

fn run_export_only(provider: &mut LiveProvider, report_dir: &std::path::Path) -> i32 {
    let snapshot = provider.fresh_snapshot();
    if !snapshot.connection.connected {
        warn!("Database unreachable, exporting a report with unavailable sections");
    }
    let data = ReportData::from_snapshot(&snapshot, &provider.database_label());
    match report::export(&data, report_dir) {
        Ok(path) => {
            info!("Report saved to {}", path.display());
            println!("{}", path.display());
            0
        }
        Err(e) => {
            error!("Report export failed: {}", e);
            eprintln!("Error: report export failed: {}", e);
            1
        }
    }
}

fn run_headless(provider: &mut LiveProvider, interval: Duration) {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    info!("Starting refresh loop (every {} ms)", interval.as_millis());

    while running.load(Ordering::SeqCst) {
        let started = Instant::now();
        let summary = describe_snapshot(provider.advance());
        info!("Cycle #{}: {}", provider.cycles(), summary);

        // Sleep in short slices so Ctrl-C is honoured promptly.
        let deadline = started + interval;
        while running.load(Ordering::SeqCst) {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                break;
            }
            std::thread::sleep(left.min(Duration::from_millis(100)));
        }
    }

    info!("Stopped after {} cycles", provider.cycles());
}

fn main() {
    let args = Args::parse();

    let target = if args.export_only || args.headless {
        LogTarget::Stderr
    } else if let Some(path) = args.log_file.clone() {
        LogTarget::File(path)
    } else {
        LogTarget::Discard
    };
    init_logging(args.verbose, args.quiet, target);

    let config = DbConfig::resolve(args.dsn)
        .with_connect_timeout(Duration::from_millis(args.connect_timeout))
        .with_acquire_timeout(Duration::from_millis(args.acquire_timeout))
        .with_statement_timeout(Duration::from_millis(args.statement_timeout))
        .with_pool_size(args.pool_size)
        .with_accept_invalid_certs(args.accept_invalid_certs);

    let mut provider = LiveProvider::new(config);
    info!("Monitoring {}", provider.database_label());

    if args.export_only {
        std::process::exit(run_export_only(&mut provider, &args.report_dir));
    }

    if args.headless {
        run_headless(&mut provider, Duration::from_millis(args.interval));
        return;
    }

    let app = App::new(Box::new(provider), args.interval, args.report_dir);
    if let Err(e) = app.run() {
        eprintln!("Error running TUI: {}", e);
        std::process::exit(1);
    }
}
