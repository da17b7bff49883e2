//! # Diagnostics
//!
//! A [`Diagnostic`] is one finding: which file, which rule, what is wrong.

use std::fmt;

/// A single reported finding.
///
/// `location_hint` is the identifier of the rule that fired. It is an
/// opaque label, not a computed line number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    source_label: String,
    location_hint: String,
    message: String,
}

impl Diagnostic {
    /// Create a diagnostic.
    pub fn new(
        source_label: impl Into<String>,
        location_hint: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source_label: source_label.into(),
            location_hint: location_hint.into(),
            message: message.into(),
        }
    }

    /// Label of the document the finding belongs to, usually the file's base name.
    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    /// Identifier of the rule that produced this finding.
    pub fn location_hint(&self) -> &str {
        &self.location_hint
    }

    /// Human-readable description of the finding.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Renders as `<source_label>:<location_hint> <message>`.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {}",
            self.source_label, self.location_hint, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_line_format() {
        let d = Diagnostic::new("pod.yaml", "4", "name is required");
        assert_eq!(d.to_string(), "pod.yaml:4 name is required");
    }

    #[test]
    fn accessors_return_fields() {
        let d = Diagnostic::new("a.yaml", "15", "containerPort value out of range");
        assert_eq!(d.source_label(), "a.yaml");
        assert_eq!(d.location_hint(), "15");
        assert_eq!(d.message(), "containerPort value out of range");
    }
}
