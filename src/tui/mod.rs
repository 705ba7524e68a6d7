//! Terminal dashboard for pgdash.
//!
//! Single-threaded: collection, rendering and key handling share the UI
//! thread, and the wait between refresh cycles is a bounded terminal poll.

mod app;
mod event;
mod input;
mod render;
pub(crate) mod state;
pub(crate) mod style;
mod widgets;

pub use app::App;
pub use state::{AppState, DEFAULT_INTERVAL_MS, PopupState, REFRESH_INTERVALS_MS, interval_index};
