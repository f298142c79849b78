//! Error types for loading and validating scenes

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Errors that can occur while reading a scene description
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("failed to read scene file: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML or a value of the wrong type
    #[error("invalid scene: {message}")]
    Toml { message: String, span: Option<Span> },

    /// Reference to a node id that no node declares
    #[error("undefined node '{name}'")]
    UndefinedNode {
        name: String,
        span: Span,
        suggestions: Vec<String>,
    },

    #[error("node '{id}' is declared more than once")]
    DuplicateNode { id: String, span: Span },

    /// Box geometry the router cannot work with
    #[error("invalid box for node '{id}': {reason}")]
    InvalidBox {
        id: String,
        reason: String,
        span: Span,
    },

    /// Branch whose target is not a direct child of its container
    #[error("branch target '{target}' is not a child of container '{container}'")]
    InvalidBranch {
        target: String,
        container: String,
        span: Span,
    },
}

impl From<toml::de::Error> for SceneError {
    fn from(err: toml::de::Error) -> Self {
        SceneError::Toml {
            message: err.message().to_string(),
            span: err.span(),
        }
    }
}

impl SceneError {
    /// Create an undefined node error with suggestions
    pub fn undefined(name: impl Into<String>, span: Span, suggestions: Vec<String>) -> Self {
        Self::UndefinedNode {
            name: name.into(),
            span,
            suggestions,
        }
    }

    /// Get the source span if available
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::Io(_) => None,
            Self::Toml { span, .. } => span.as_ref(),
            Self::UndefinedNode { span, .. }
            | Self::DuplicateNode { span, .. }
            | Self::InvalidBox { span, .. }
            | Self::InvalidBranch { span, .. } => Some(span),
        }
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::UndefinedNode { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    ///
    /// Errors without a span fall back to their plain message.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span() else {
            return self.to_string();
        };

        let mut report = Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span.clone()))
                    .with_message(self.to_string())
                    .with_color(Color::Red),
            );
        if let Some(suggestions) = self.suggestions().filter(|s| !s.is_empty()) {
            report = report.with_note(format!("did you mean: {}?", suggestions.join(", ")));
        }

        let mut buf = Vec::new();
        let written = report
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_node_display() {
        let err = SceneError::undefined("gw", 0..2, vec!["gw1".to_string()]);
        assert_eq!(err.to_string(), "undefined node 'gw'");
        assert_eq!(err.suggestions(), Some(&["gw1".to_string()][..]));
    }

    #[test]
    fn test_toml_error_keeps_span() {
        let err: SceneError = toml::from_str::<toml::Table>("a = ").unwrap_err().into();
        assert!(matches!(err, SceneError::Toml { span: Some(_), .. }));
    }

    #[test]
    fn test_format_includes_source_and_suggestion() {
        let source = "to = \"hubb\"";
        let err = SceneError::undefined("hubb", 5..11, vec!["hub".to_string()]);
        let report = err.format(source, "scene.toml");
        assert!(report.contains("scene.toml"));
        assert!(report.contains("did you mean: hub?"));
    }

    #[test]
    fn test_format_without_span_is_plain_message() {
        let err = SceneError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.format("", "x.toml"), err.to_string());
    }
}
