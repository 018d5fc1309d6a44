use crate::helpers::lint_helpers::interpolate_message;
use crate::lint_result::{LintResult, node_span};
use crate::source_file::SourceFile;
use heeler_lint_config::Severity;
use std::path::Path;
use tree_sitter::Node;

///
/// Per-file reporting context handed to a lint rule while it walks one
/// source file. Collects the diagnostics the rule emits; the rule itself
/// stays stateless across files.
///
pub struct LintContext<'a> {
    file: &'a SourceFile,
    project_root: &'a Path,
    lint: &'static str,
    lint_name: String,
    severity: Severity,
    messages: &'static [(&'static str, &'static str)],
    results: Vec<LintResult>,
}

impl<'a> LintContext<'a> {
    pub fn new(
        file: &'a SourceFile,
        project_root: &'a Path,
        lint: &'static str,
        lint_name: String,
        severity: Severity,
        messages: &'static [(&'static str, &'static str)],
    ) -> Self {
        LintContext {
            file,
            project_root,
            lint,
            lint_name,
            severity,
            messages,
            results: Vec::new(),
        }
    }

    /// The file being linted. Borrowed for the lifetime of the file pass,
    /// not of this context, so callers can hold node handles across
    /// `report` calls.
    pub fn file(&self) -> &'a SourceFile {
        self.file
    }

    /// Directory that project-relative paths resolve against. Only the
    /// property-test rule needs it, to read sibling test files.
    pub fn project_root(&self) -> &'a Path {
        self.project_root
    }

    ///
    /// Emits one diagnostic anchored at a node. The message id selects a
    /// template from the rule's message table and `data` fills its
    /// `{{key}}` placeholders. An id missing from the table falls back to
    /// rendering the id itself rather than dropping the diagnostic.
    ///
    pub fn report(&mut self, node: Node<'_>, message_id: &str, data: &[(&str, String)], help: &str) {
        let template = self
            .messages
            .iter()
            .find(|(id, _)| *id == message_id)
            .map(|(_, template)| *template)
            .unwrap_or(message_id);

        self.results.push(LintResult {
            lint: self.lint.to_string(),
            lint_name: self.lint_name.clone(),
            file: self.file.path.clone(),
            span: node_span(node),
            message_id: message_id.to_string(),
            message: interpolate_message(template, data),
            help: help.to_string(),
            severity: self.severity,
        });
    }

    pub fn into_results(self) -> Vec<LintResult> {
        self.results
    }
}
