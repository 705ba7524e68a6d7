//! UI-agnostic view model types.
//!
//! These types represent presentation data without any dependency on a specific
//! rendering framework. The TUI maps them to ratatui styles, the report maps
//! them to plotters colors.

/// Row-level style classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowStyleClass {
    #[default]
    Normal,
    /// Warning level (TUI: yellow).
    Warning,
    /// Critical level (TUI: red).
    Critical,
    /// Positive/healthy (TUI: green). E.g. "active" state, CONNECTED.
    Active,
    /// Dimmed (TUI: dark gray). E.g. idle sessions.
    Dimmed,
    /// Accent (TUI: cyan).
    Accent,
}

/// A single table cell with optional per-cell style override.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewCell {
    pub text: String,
    /// `None` = inherit row style.
    pub style: Option<RowStyleClass>,
}

impl ViewCell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    pub fn styled(text: impl Into<String>, style: RowStyleClass) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }
}

/// One table row, parameterized by entity ID type.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow<Id> {
    pub id: Id,
    pub cells: Vec<ViewCell>,
    pub style: RowStyleClass,
}

/// Complete table ready to be rendered by any frontend.
#[derive(Debug, Clone, PartialEq)]
pub struct TableViewModel<Id> {
    pub title: String,
    pub headers: Vec<String>,
    pub widths: Vec<u16>,
    pub rows: Vec<ViewRow<Id>>,
}

impl<Id> TableViewModel<Id> {
    pub fn new(title: impl Into<String>, headers: &[&str], widths: &[u16]) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            widths: widths.to_vec(),
            rows: Vec::new(),
        }
    }
}

/// Labelled key/value card (connection, server info).
#[derive(Debug, Clone, PartialEq)]
pub struct CardViewModel {
    pub title: String,
    /// Headline, e.g. CONNECTED.
    pub headline: Option<ViewCell>,
    pub fields: Vec<(String, ViewCell)>,
}

impl CardViewModel {
    pub fn field(&self, label: &str) -> Option<&ViewCell> {
        self.fields.iter().find(|(l, _)| l == label).map(|(_, v)| v)
    }
}

/// One metric tile: label over a big value.
#[derive(Debug, Clone, PartialEq)]
pub struct TileViewModel {
    pub label: String,
    pub value: String,
    pub style: RowStyleClass,
}

/// One bar of a bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarPoint {
    pub label: String,
    pub value: f64,
}

/// A dashboard section: either its view model or a placeholder text.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Available(T),
    Unavailable(String),
}

impl<T> Section<T> {
    /// Placeholder for a section whose data did not come back.
    pub fn unavailable(section: &str) -> Self {
        Section::Unavailable(format!("{} unavailable", section))
    }

    pub fn available(&self) -> Option<&T> {
        match self {
            Section::Available(v) => Some(v),
            Section::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Section::Available(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Section<U> {
        match self {
            Section::Available(v) => Section::Available(f(v)),
            Section::Unavailable(text) => Section::Unavailable(text),
        }
    }
}
