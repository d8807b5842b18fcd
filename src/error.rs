//! Error types for configuration loading and validation

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config TOML: {}", .0.message())]
    Parse(#[from] toml::de::Error),

    #[error("unknown preset '{name}' in tier #{tier}")]
    UnknownPreset {
        name: String,
        tier: usize,
        suggestions: Vec<String>,
    },

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// Raised only in strict mode; otherwise reported as a lint warning
    #[error("preset of tier #{tier} does not fit its box: {reason}")]
    PresetOverlap { tier: usize, reason: String },
}

impl ConfigError {
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::UnknownPreset { suggestions, .. } if !suggestions.is_empty() => {
                Some(suggestions)
            }
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    ///
    /// Only TOML syntax and type errors carry a span; other variants fall back
    /// to their message plus any suggestions.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let span = match self {
            ConfigError::Parse(err) => err.span(),
            _ => None,
        };
        let Some(span) = span else {
            return match self.suggestions() {
                Some(suggestions) => {
                    format!("{self}\nDid you mean: {}?", suggestions.join(", "))
                }
                None => self.to_string(),
            };
        };

        let message = match self {
            ConfigError::Parse(err) => err.message().to_string(),
            _ => self.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message("invalid configuration")
            .with_label(
                Label::new((filename, span))
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);
        if written.is_err() {
            return self.to_string();
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}
