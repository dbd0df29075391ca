//! Error types for widget derivation.

use serde::Serialize;

/// Result type for widget operations
pub type WidgetResult<T> = Result<T, WidgetError>;

/// Error type for widget derivation and batch aggregation.
///
/// Value errors (`Malformed*`) belong to a single attribute and are reported
/// per entry by the batch builder. Definition errors (see
/// [`WidgetError::is_definition_error`]) are shared by every entry of a batch
/// and abort it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail")]
pub enum WidgetError {
    #[error("Malformed time '{0}': expected HH:MM")]
    MalformedTime(String),

    #[error("Malformed date '{0}': expected YYYY-MM-DD")]
    MalformedDate(String),

    #[error("Malformed number '{0}'")]
    MalformedNumber(String),

    #[error("Malformed value for widget '{widget_key}' at {path}: {message}")]
    MalformedValue {
        widget_key: String,
        path: String,
        message: String,
    },

    #[error("Selection '{selection}' is not an option of widget '{widget_key}'")]
    UnknownSelection {
        widget_key: String,
        selection: String,
    },

    #[error("Widget '{widget_key}' is missing required option '{option}'")]
    MissingWidgetOptions { widget_key: String, option: String },

    #[error("Invalid options for widget '{widget_key}' at {path}: {message}")]
    InvalidOptions {
        widget_key: String,
        path: String,
        message: String,
    },

    #[error("Widget key '{0}' is defined more than once")]
    DuplicateWidgetKey(String),

    #[error("Widget '{0}' is tagged more than once on the entry")]
    DuplicateAttribute(String),

    #[error("Unknown widget '{0}'")]
    UnknownWidget(String),

    #[error("Widget '{0}' has no transformer for its type")]
    UnsupportedWidget(String),
}

impl WidgetError {
    /// Errors caused by the widget definition rather than by one entry's value.
    pub fn is_definition_error(&self) -> bool {
        matches!(
            self,
            WidgetError::MissingWidgetOptions { .. }
                | WidgetError::InvalidOptions { .. }
                | WidgetError::DuplicateWidgetKey(_)
        )
    }
}
