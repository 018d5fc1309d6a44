use anyhow::{Result, anyhow};
use tree_sitter::{Node, Parser, Tree};

///
/// A TypeScript source file parsed into a tree-sitter syntax tree,
/// together with the project-relative path diagnostics will point at.
///
pub struct SourceFile {
    /// Path relative to the project root, with forward slashes.
    pub path: String,
    /// Raw file contents.
    pub text: String,
    tree: Tree,
}

impl SourceFile {
    ///
    /// Parses TypeScript source text. Returns an error if the grammar
    /// cannot be loaded or the parser produces no tree, so the caller can
    /// skip the file and keep linting the rest of the project.
    ///
    pub fn parse(path: String, text: String) -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .map_err(|e| anyhow!("failed to load TypeScript grammar: {e}"))?;

        let tree = parser
            .parse(&text, None)
            .ok_or_else(|| anyhow!("tree-sitter produced no syntax tree for {path}"))?;

        Ok(SourceFile { path, text, tree })
    }

    /// Root node of the syntax tree.
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by a node. Nodes carry byte ranges into the
    /// text they were parsed from, so decoding failures collapse to "".
    pub fn node_text(&self, node: Node<'_>) -> &str {
        node.utf8_text(self.text.as_bytes()).unwrap_or("")
    }
}
