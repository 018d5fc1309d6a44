use ansi_term::Color;
use heeler_lint_config::Severity;
use tree_sitter::Node;

/// Position of a diagnostic in a source file. Lines and columns are
/// 1-based, matching editor conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

/// Convert a tree-sitter node position to a span
pub fn node_span(node: Node<'_>) -> Span {
    Span {
        line: node.start_position().row + 1,
        column: node.start_position().column + 1,
    }
}

/// Represents a lint result
#[derive(Debug, Clone)]
pub struct LintResult {
    // The stable identifier of the lint itself ('no-direct-env-access', etc.)
    pub lint: String,

    // The name of this configured lint rule (user supplied)
    pub lint_name: String,

    // Project-relative path of the offending file
    pub file: String,

    pub span: Span,
    pub message_id: String,
    pub message: String,
    pub help: String,
    pub severity: Severity,
}

/// Result of a lint run
impl LintResult {
    /// Convert the lint result to a user-readable block with file and line
    /// information
    pub fn render(&self) -> String {
        format!(
            "{}[{}]: {}\n  --> {}:{}:{}\n   = help: {}\n   = note: applied by heeler rule '{}'\n",
            self.severity_to_string(),
            self.lint,
            self.message,
            self.file,
            self.span.line,
            self.span.column,
            self.help,
            self.lint_name,
        )
    }

    /// Converts severity into a user-readable string
    fn severity_to_string(&self) -> String {
        match self.severity {
            Severity::Warn => Color::Yellow.bold().paint("warning").to_string(),
            Severity::Error => Color::Red.bold().paint("error").to_string(),
        }
    }
}
