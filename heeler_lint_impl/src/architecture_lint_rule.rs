use crate::lint_context::LintContext;
use crate::lint_result::LintResult;
use crate::source_file::SourceFile;
use heeler_lint_config::Severity;
use std::path::Path;
use tree_sitter::Node;

///
/// One of our lints. These are an abstraction over the top of a
/// tree-sitter walk of a single TypeScript file - the runner does the
/// traversal and hands each rule the node kinds it subscribed to.
///
/// They add:
/// * A name, which is used in the diagnostics to refer back to the configuration
///   item.
/// * The ability to check if certain files or functions are targeted by our lint,
///   so that we can print a diagnostic tree of what our rules are actually
///   doing.
pub trait ArchitectureLintRule: Sync + Send {
    ///
    /// Returns the name of the lint rule. This is the name specified
    /// in heeler.ron
    ///
    fn name(&self) -> String;

    ///
    /// Stable identifier of the underlying rule ("no-direct-env-access",
    /// "require-property-tests", ...). Shown in brackets in rendered
    /// diagnostics.
    ///
    fn lint_id(&self) -> &'static str;

    /// The severity this rule was configured with.
    fn severity(&self) -> Severity;

    ///
    /// Message templates keyed by message id. `{{key}}` placeholders are
    /// interpolated from the data a `report` call supplies.
    ///
    fn messages(&self) -> &'static [(&'static str, &'static str)];

    ///
    /// Returns true if the given lint applies to the particular file, false
    /// otherwise. This decides which files the rule walks, and it annotates
    /// the diagnostic tree of `heeler print-files` to indicate which rules
    /// apply to a particular file.
    ///
    fn applies_to_file(&self, path: &str) -> bool;

    ///
    /// Returns true if the given lint constrains the particular exported
    /// function. A lint only applies to a function if it is directly
    /// constraining it in some fashion.
    ///
    /// This is used to annotate function information in
    /// `heeler print-functions` to indicate which rules apply to a
    /// particular function
    fn applies_to_function(&self, _path: &str, _function_name: &str) -> bool {
        // Default implementation: file-scoped lints don't constrain single functions
        false
    }

    /// Whole-file callback, run once before any node callbacks.
    fn check_source_file(&self, _ctx: &mut LintContext<'_>) {}

    /// Called for every member and subscript expression in the file.
    fn check_member_expression(&self, _ctx: &mut LintContext<'_>, _node: Node<'_>) {}

    /// Called for every throw statement in the file.
    fn check_throw_statement(&self, _ctx: &mut LintContext<'_>, _node: Node<'_>) {}

    ///
    /// Called for every function declaration, function expression, arrow
    /// function and class method definition in the file.
    ///
    fn check_function(&self, _ctx: &mut LintContext<'_>, _node: Node<'_>) {}
}

impl std::fmt::Debug for dyn ArchitectureLintRule + Send {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ArchitectureLintRule({})", self.name())
    }
}

///
/// Runs a single lint over one parsed source file, dispatching syntax
/// nodes to the callbacks the rule implements, and returns whatever the
/// rule reported.
///
pub fn run_lint_on_file(
    lint: &dyn ArchitectureLintRule,
    file: &SourceFile,
    project_root: &Path,
) -> Vec<LintResult> {
    let mut ctx = LintContext::new(
        file,
        project_root,
        lint.lint_id(),
        lint.name(),
        lint.severity(),
        lint.messages(),
    );

    lint.check_source_file(&mut ctx);
    walk_node(lint, &mut ctx, file.root());

    ctx.into_results()
}

fn walk_node(lint: &dyn ArchitectureLintRule, ctx: &mut LintContext<'_>, node: Node<'_>) {
    match node.kind() {
        // Computed access like process.env["PORT"] parses as a subscript
        // expression, so both kinds route to the member callback.
        "member_expression" | "subscript_expression" => lint.check_member_expression(ctx, node),
        "throw_statement" => lint.check_throw_statement(ctx, node),
        "function_declaration" | "function_expression" | "arrow_function" | "method_definition" => {
            lint.check_function(ctx, node)
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk_node(lint, ctx, child);
    }
}
