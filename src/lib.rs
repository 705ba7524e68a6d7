//! pgdash - read-only PostgreSQL monitoring dashboard library.
//!
//! This library provides the core functionality used by the `pgdash` binary:
//! - `collector` - fixed introspection queries against one database
//! - `provider` - refresh cycles on top of the collector
//! - `view` - UI-agnostic view models shared by the TUI and the report
//! - `tui` - interactive terminal dashboard
//! - `report` - static PNG report export

pub mod collector;
pub mod config;
pub mod fmt;
pub mod model;
pub mod provider;
pub mod report;
pub mod tui;
pub mod view;
