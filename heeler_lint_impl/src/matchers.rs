// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Syntax and raw-text predicates shared by the lint rules. Each matcher
//! answers one narrow question about a node or a file's text; the rules
//! decide where and when to ask.

use crate::source_file::SourceFile;
use tree_sitter::Node;

/// A matched `process.env` access.
pub struct EnvAccess {
    /// The accessed variable name, or `<computed>` for dynamic indices
    /// like `process.env[key]`.
    pub property: String,
}

///
/// Matches a member or subscript expression reading `process.env`. The
/// match is structural: the node's object must itself be a member
/// expression whose object is the identifier `process` and whose property
/// is `env`. The inner `process.env` expression never matches on its own,
/// only the outer access does, so each read reports once.
///
pub fn match_env_access(file: &SourceFile, node: Node<'_>) -> Option<EnvAccess> {
    let object = node.child_by_field_name("object")?;
    if object.kind() != "member_expression" {
        return None;
    }

    let inner_object = object.child_by_field_name("object")?;
    let inner_property = object.child_by_field_name("property")?;
    if inner_object.kind() != "identifier"
        || file.node_text(inner_object) != "process"
        || file.node_text(inner_property) != "env"
    {
        return None;
    }

    let property = match node.kind() {
        "member_expression" => node
            .child_by_field_name("property")
            .map(|p| file.node_text(p).to_string()),
        "subscript_expression" => node
            .child_by_field_name("index")
            .filter(|index| index.kind() == "string")
            .map(|index| {
                file.node_text(index)
                    .trim_matches(|c| c == '"' || c == '\'' || c == '`')
                    .to_string()
            }),
        _ => None,
    }
    .unwrap_or_else(|| "<computed>".to_string());

    Some(EnvAccess { property })
}

///
/// Matches a throw statement whose thrown value is a plain
/// `new Error(...)` construction. Subclasses and namespaced constructors
/// (`new NotFoundError(...)`, `new http.Error(...)`) do not match.
///
pub fn match_throw_new_error(file: &SourceFile, node: Node<'_>) -> bool {
    let Some(argument) = node.named_child(0) else {
        return false;
    };
    if argument.kind() != "new_expression" {
        return false;
    }

    argument
        .child_by_field_name("constructor")
        .is_some_and(|constructor| file.node_text(constructor) == "Error")
}

/// Returns true when a function-ish node carries the `async` modifier.
pub fn is_async_function(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor).any(|child| child.kind() == "async")
}

///
/// Declared name of a function-ish node: the `name` field for function
/// declarations and method definitions, or the binding a function
/// expression or arrow is assigned to (`const name = () => ...`,
/// `{ name: () => ... }`).
///
pub fn function_name(file: &SourceFile, node: Node<'_>) -> Option<String> {
    if let Some(name) = node.child_by_field_name("name") {
        return Some(file.node_text(name).to_string());
    }

    let parent = node.parent()?;
    match parent.kind() {
        "variable_declarator" => parent
            .child_by_field_name("name")
            .map(|name| file.node_text(name).to_string()),
        "pair" => parent
            .child_by_field_name("key")
            .map(|key| file.node_text(key).to_string()),
        _ => None,
    }
}

/// Rendered return-type annotation text, without the leading `:`.
pub fn return_type_text<'a>(file: &'a SourceFile, node: Node<'a>) -> Option<&'a str> {
    let annotation = node.child_by_field_name("return_type")?;
    Some(file.node_text(annotation).trim_start_matches(':').trim_start())
}

/// Wrapper types that satisfy the explicit-Result convention.
const RESULT_TYPE_NAMES: [&str; 5] = [
    "Result<",
    "AsyncResult<",
    "ServiceResult<",
    "AsyncServiceResult<",
    "Promise<Result<",
];

///
/// Returns true when a function's declared return type is one of the
/// Result wrappers. A missing annotation fails the check rather than
/// counting as unknown.
///
pub fn has_result_return_type(file: &SourceFile, node: Node<'_>) -> bool {
    match return_type_text(file, node) {
        Some(text) => RESULT_TYPE_NAMES.iter().any(|name| text.contains(name)),
        None => false,
    }
}

///
/// Walks ancestors to the nearest enclosing function-ish node. Returns
/// that node and its declared name when it is async. The nearest function
/// wins: a synchronous inner function shields an async outer one.
///
pub fn enclosing_async_function<'a>(
    file: &SourceFile,
    node: Node<'a>,
) -> Option<(Node<'a>, String)> {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if matches!(
            ancestor.kind(),
            "function_declaration" | "function_expression" | "arrow_function" | "method_definition"
        ) {
            if is_async_function(ancestor) {
                let name = function_name(file, ancestor)
                    .unwrap_or_else(|| "<anonymous>".to_string());
                return Some((ancestor, name));
            }
            return None;
        }
        current = ancestor.parent();
    }
    None
}

// Whole-file substring checks used by the route, service and plugin
// rules. Intentionally shallow: one file-level pass, no per-declaration
// resolution.

/// The file reads `request.body` somewhere.
pub fn reads_request_body(text: &str) -> bool {
    text.contains("request.body")
}

/// The file declares a route schema option.
pub fn declares_schema(text: &str) -> bool {
    text.contains("schema:")
}

/// The file declares at least one class.
pub fn declares_class(text: &str) -> bool {
    text.contains("class ")
}

/// The file declares at least one constructor.
pub fn declares_constructor(text: &str) -> bool {
    text.contains("constructor(")
}

/// The file goes through the fastify-plugin wrapper.
pub fn wraps_fastify_plugin(text: &str) -> bool {
    text.contains("fastify-plugin")
}
