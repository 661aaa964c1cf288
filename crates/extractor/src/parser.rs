use crate::error::{ExtractError, Result};
use crate::language::Language;
use crate::types::{Component, ComponentKind, SourceFile};
use tree_sitter::{Node, Parser};

const MAX_IMPORTS_PER_FILE: usize = 20;
const MAX_REFERENCES_PER_COMPONENT: usize = 32;

/// Parse output for a single file: the file itself plus the raw dependency
/// material (import targets and referenced names) the graph resolves later.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub file: SourceFile,
    /// Import/use targets as written in the source (module paths, specifiers)
    pub imports: Vec<String>,
    /// `(component_id, referenced_name)` pairs seen inside component bodies
    pub references: Vec<(String, String)>,
}

/// AST-based component parser for a single language
pub struct ComponentParser {
    parser: Parser,
    language: Language,
}

impl ComponentParser {
    /// Create a new parser for a language
    pub fn new(language: Language) -> Result<Self> {
        if !language.supports_ast() {
            return Err(ExtractError::UnsupportedLanguage(
                language.as_str().to_string(),
            ));
        }

        let ts_language = language.tree_sitter_language()?;
        let mut parser = Parser::new();
        parser
            .set_language(&ts_language)
            .map_err(|e| ExtractError::tree_sitter(format!("Failed to set language: {e}")))?;

        Ok(Self { parser, language })
    }

    /// Parse file content into components and dependency material
    pub fn parse(&mut self, content: &str, file_path: &str, size_bytes: u64) -> Result<ParsedFile> {
        let tree = self
            .parser
            .parse(content, None)
            .ok_or_else(|| ExtractError::parse(file_path, "tree-sitter produced no tree"))?;

        let root = tree.root_node();
        let mut components = Vec::new();
        let mut degraded = false;

        self.extract_components(content, file_path, root, None, &mut components, &mut degraded);

        let imports = self.extract_imports(content, root);

        let mut references = Vec::new();
        for component in &components {
            let refs = self.collect_references(content, root, component);
            for name in refs {
                references.push((component.id.clone(), name));
            }
        }

        let file = SourceFile {
            path: file_path.to_string(),
            language: self.language,
            size_bytes,
            line_count: content.lines().count(),
            components,
            parse_degraded: degraded,
        };

        Ok(ParsedFile {
            file,
            imports,
            references,
        })
    }

    /// Extract components from top-level (and module-nested) declarations
    fn extract_components(
        &self,
        content: &str,
        file_path: &str,
        node: Node,
        scope: Option<&str>,
        out: &mut Vec<Component>,
        degraded: &mut bool,
    ) {
        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();

        for child in children {
            if child.is_error() {
                *degraded = true;
                continue;
            }

            match self.language {
                Language::Rust => {
                    self.extract_rust_decl(content, file_path, child, scope, out, degraded);
                }
                Language::Python => {
                    self.extract_python_decl(content, file_path, child, scope, out);
                }
                Language::JavaScript | Language::TypeScript => {
                    self.extract_js_decl(content, file_path, child, scope, out);
                }
                Language::Unknown => {}
            }
        }
    }

    fn extract_rust_decl(
        &self,
        content: &str,
        file_path: &str,
        node: Node,
        scope: Option<&str>,
        out: &mut Vec<Component>,
        degraded: &mut bool,
    ) {
        match node.kind() {
            "struct_item" | "enum_item" | "trait_item" => {
                if let Some(name) = field_text(content, node, "name") {
                    let members = self.rust_member_names(content, node);
                    out.push(self.component(
                        content,
                        file_path,
                        node,
                        &name,
                        scope,
                        ComponentKind::Class,
                        members,
                    ));
                    // Trait default methods become function components as well.
                    if node.kind() == "trait_item" {
                        if let Some(body) = node.child_by_field_name("body") {
                            self.extract_member_functions(content, file_path, body, &name, out);
                        }
                    }
                }
            }
            "function_item" => {
                if let Some(name) = field_text(content, node, "name") {
                    let params = self.parameter_names(content, node);
                    out.push(self.component(
                        content,
                        file_path,
                        node,
                        &name,
                        scope,
                        ComponentKind::Function,
                        params,
                    ));
                }
            }
            "const_item" | "static_item" => {
                if let Some(name) = field_text(content, node, "name") {
                    out.push(self.component(
                        content,
                        file_path,
                        node,
                        &name,
                        scope,
                        ComponentKind::Constant,
                        Vec::new(),
                    ));
                }
            }
            "impl_item" => {
                let target = impl_target(content, node);
                if let Some(body) = node.child_by_field_name("body") {
                    let target = target.as_deref().unwrap_or("impl");
                    self.extract_member_functions(content, file_path, body, target, out);
                }
            }
            "mod_item" => {
                // Inline modules keep their declarations reachable.
                if let Some(body) = node.child_by_field_name("body") {
                    self.extract_components(content, file_path, body, scope, out, degraded);
                }
            }
            _ => {}
        }
    }

    fn extract_python_decl(
        &self,
        content: &str,
        file_path: &str,
        node: Node,
        scope: Option<&str>,
        out: &mut Vec<Component>,
    ) {
        match node.kind() {
            "class_definition" => {
                if let Some(name) = field_text(content, node, "name") {
                    let members = self.class_body_member_names(content, node);
                    out.push(self.component(
                        content,
                        file_path,
                        node,
                        &name,
                        scope,
                        ComponentKind::Class,
                        members,
                    ));
                    if let Some(body) = node.child_by_field_name("body") {
                        self.extract_member_functions(content, file_path, body, &name, out);
                    }
                }
            }
            "function_definition" => {
                if let Some(name) = field_text(content, node, "name") {
                    let params = self.parameter_names(content, node);
                    out.push(self.component(
                        content,
                        file_path,
                        node,
                        &name,
                        scope,
                        ComponentKind::Function,
                        params,
                    ));
                }
            }
            "decorated_definition" => {
                if let Some(inner) = node.child_by_field_name("definition") {
                    self.extract_python_decl(content, file_path, inner, scope, out);
                }
            }
            "expression_statement" => {
                // Module-level SCREAMING_CASE assignments count as constants.
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    if child.kind() != "assignment" {
                        continue;
                    }
                    if let Some(left) = child.child_by_field_name("left") {
                        if left.kind() == "identifier" {
                            let name = node_text(content, left);
                            if is_constant_name(&name) {
                                out.push(self.component(
                                    content,
                                    file_path,
                                    node,
                                    &name,
                                    scope,
                                    ComponentKind::Constant,
                                    Vec::new(),
                                ));
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn extract_js_decl(
        &self,
        content: &str,
        file_path: &str,
        node: Node,
        scope: Option<&str>,
        out: &mut Vec<Component>,
    ) {
        match node.kind() {
            "class_declaration" | "interface_declaration" | "enum_declaration" => {
                if let Some(name) = field_text(content, node, "name") {
                    let members = self.class_body_member_names(content, node);
                    out.push(self.component(
                        content,
                        file_path,
                        node,
                        &name,
                        scope,
                        ComponentKind::Class,
                        members,
                    ));
                    if let Some(body) = node.child_by_field_name("body") {
                        self.extract_member_functions(content, file_path, body, &name, out);
                    }
                }
            }
            "function_declaration" => {
                if let Some(name) = field_text(content, node, "name") {
                    let params = self.parameter_names(content, node);
                    out.push(self.component(
                        content,
                        file_path,
                        node,
                        &name,
                        scope,
                        ComponentKind::Function,
                        params,
                    ));
                }
            }
            "lexical_declaration" | "variable_declaration" => {
                let is_const_decl = node.child(0).is_some_and(|c| c.kind() == "const");
                let mut cursor = node.walk();
                for declarator in node.children(&mut cursor) {
                    if declarator.kind() != "variable_declarator" {
                        continue;
                    }
                    let Some(name) = field_text(content, declarator, "name") else {
                        continue;
                    };
                    let value_kind = declarator
                        .child_by_field_name("value")
                        .map(|v| v.kind())
                        .unwrap_or("");
                    if matches!(value_kind, "arrow_function" | "function_expression" | "function") {
                        let params = declarator
                            .child_by_field_name("value")
                            .map(|v| self.parameter_names(content, v))
                            .unwrap_or_default();
                        out.push(self.component(
                            content,
                            file_path,
                            node,
                            &name,
                            scope,
                            ComponentKind::Function,
                            params,
                        ));
                    } else if is_const_decl || is_constant_name(&name) {
                        out.push(self.component(
                            content,
                            file_path,
                            node,
                            &name,
                            scope,
                            ComponentKind::Constant,
                            Vec::new(),
                        ));
                    }
                }
            }
            "export_statement" => {
                if let Some(inner) = node.child_by_field_name("declaration") {
                    self.extract_js_decl(content, file_path, inner, scope, out);
                }
            }
            _ => {}
        }
    }

    /// Extract methods from a class/impl/trait body as function components
    fn extract_member_functions(
        &self,
        content: &str,
        file_path: &str,
        body: Node,
        parent: &str,
        out: &mut Vec<Component>,
    ) {
        let mut cursor = body.walk();
        for member in body.children(&mut cursor) {
            let member = if member.kind() == "decorated_definition" {
                member.child_by_field_name("definition").unwrap_or(member)
            } else {
                member
            };
            if !matches!(
                member.kind(),
                "function_item" | "function_definition" | "method_definition"
            ) {
                continue;
            }
            if let Some(name) = field_text(content, member, "name") {
                let params = self.parameter_names(content, member);
                out.push(self.component(
                    content,
                    file_path,
                    member,
                    &name,
                    Some(parent),
                    ComponentKind::Function,
                    params,
                ));
            }
        }
    }

    /// Build a component from an AST node
    #[allow(clippy::too_many_arguments)]
    fn component(
        &self,
        content: &str,
        file_path: &str,
        node: Node,
        name: &str,
        scope: Option<&str>,
        kind: ComponentKind,
        signature: Vec<String>,
    ) -> Component {
        let qualified_name = match scope {
            Some(parent) => format!("{parent}{}{name}", self.language.scope_separator()),
            None => name.to_string(),
        };

        Component {
            id: Component::make_id(file_path, &qualified_name),
            name: name.to_string(),
            qualified_name,
            kind,
            file_path: file_path.to_string(),
            start_line: node.start_position().row + 1,
            end_line: node.end_position().row + 1,
            signature,
            description: self.doc_description(content, node),
        }
    }

    /// Collect parameter names (names only, no types) from a callable node
    fn parameter_names(&self, content: &str, node: Node) -> Vec<String> {
        let params = node
            .child_by_field_name("parameters")
            .or_else(|| node.child_by_field_name("formal_parameters"));
        let Some(params) = params else {
            return Vec::new();
        };

        let mut names = Vec::new();
        let mut cursor = params.walk();
        for param in params.named_children(&mut cursor) {
            if param.kind() == "self_parameter" {
                names.push("self".to_string());
                continue;
            }
            if param.kind() == "comment" {
                continue;
            }
            if let Some(name) = first_identifier_text(content, param) {
                names.push(name);
            }
        }
        names
    }

    /// Member names for a Rust struct/enum/trait body
    fn rust_member_names(&self, content: &str, node: Node) -> Vec<String> {
        let Some(body) = node.child_by_field_name("body") else {
            return Vec::new();
        };
        let mut names = Vec::new();
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            match member.kind() {
                "field_declaration" | "enum_variant" => {
                    if let Some(name) = field_text(content, member, "name") {
                        names.push(name);
                    }
                }
                "function_item" | "function_signature_item" => {
                    if let Some(name) = field_text(content, member, "name") {
                        names.push(name);
                    }
                }
                _ => {}
            }
        }
        names
    }

    /// Member names for a Python/JS/TS class body
    fn class_body_member_names(&self, content: &str, node: Node) -> Vec<String> {
        let Some(body) = node.child_by_field_name("body") else {
            return Vec::new();
        };
        let mut names = Vec::new();
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            let member = if member.kind() == "decorated_definition" {
                member.child_by_field_name("definition").unwrap_or(member)
            } else {
                member
            };
            if matches!(
                member.kind(),
                "function_definition"
                    | "method_definition"
                    | "field_definition"
                    | "public_field_definition"
                    | "property_signature"
            ) {
                if let Some(name) = field_text(content, member, "name") {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Extract import/use targets from the file root
    fn extract_imports(&self, content: &str, root: Node) -> Vec<String> {
        let mut imports = Vec::new();
        let mut cursor = root.walk();

        for child in root.children(&mut cursor) {
            let target = match (self.language, child.kind()) {
                (Language::Rust, "use_declaration") => {
                    let text = node_text(content, child);
                    Some(
                        text.trim_start_matches("use ")
                            .trim_end_matches(';')
                            .trim()
                            .to_string(),
                    )
                }
                (Language::Python, "import_statement") => {
                    let text = node_text(content, child);
                    Some(text.trim_start_matches("import ").trim().to_string())
                }
                (Language::Python, "import_from_statement") => child
                    .child_by_field_name("module_name")
                    .map(|m| node_text(content, m)),
                (Language::JavaScript | Language::TypeScript, "import_statement") => child
                    .child_by_field_name("source")
                    .map(|s| node_text(content, s).trim_matches(['"', '\'']).to_string()),
                _ => None,
            };

            if let Some(target) = target {
                if !target.is_empty() {
                    imports.push(target);
                }
            }
        }

        imports.truncate(MAX_IMPORTS_PER_FILE);
        imports
    }

    /// Collect identifiers referenced inside a component's source range
    fn collect_references(&self, content: &str, root: Node, component: &Component) -> Vec<String> {
        let Some(node) = node_covering_lines(root, component.start_line, component.end_line) else {
            return Vec::new();
        };

        let mut names = Vec::new();
        collect_reference_names(content, node, &mut names);
        names.retain(|n| n != &component.name);
        names.sort();
        names.dedup();
        names.truncate(MAX_REFERENCES_PER_COMPONENT);
        names
    }

    /// First line of the doc comment immediately preceding a node.
    ///
    /// Tree-sitter keeps comments out of most declaration nodes, so this scans
    /// backwards over the raw lines the way editors resolve hover docs.
    fn doc_description(&self, content: &str, node: Node) -> String {
        let node_start_line = node.start_position().row;
        let lines: Vec<&str> = content.lines().collect();

        if node_start_line == 0 || node_start_line > lines.len() {
            return self.python_docstring(content, node).unwrap_or_default();
        }

        let mut doc_lines = Vec::new();
        let mut line_idx = node_start_line;
        while line_idx > 0 {
            line_idx -= 1;
            let line = lines[line_idx].trim();

            let is_doc = match self.language {
                Language::Rust => line.starts_with("///") || line.starts_with("//!"),
                Language::Python => line.starts_with('#'),
                Language::JavaScript | Language::TypeScript => {
                    line.starts_with("//") || line.starts_with("/*") || line.starts_with('*')
                }
                Language::Unknown => false,
            };

            if is_doc {
                doc_lines.push(line);
            } else if !line.is_empty() {
                break;
            }
        }

        if doc_lines.is_empty() {
            return self.python_docstring(content, node).unwrap_or_default();
        }

        doc_lines.reverse();
        doc_lines
            .first()
            .map(|line| strip_comment_markers(line))
            .unwrap_or_default()
    }

    /// First line of a Python-style docstring inside a definition body
    fn python_docstring(&self, content: &str, node: Node) -> Option<String> {
        if self.language != Language::Python {
            return None;
        }
        let body = node.child_by_field_name("body")?;
        let first = body.named_child(0)?;
        if first.kind() != "expression_statement" {
            return None;
        }
        let string = first.named_child(0)?;
        if string.kind() != "string" {
            return None;
        }
        let raw = node_text(content, string);
        let cleaned = raw.trim_matches(['"', '\'']).trim();
        cleaned.lines().next().map(|l| l.trim().to_string())
    }
}

/// Names an identifier should match to count as a constant in dynamic languages
fn is_constant_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

fn node_text(content: &str, node: Node) -> String {
    content[node.start_byte()..node.end_byte()].to_string()
}

fn field_text(content: &str, node: Node, field: &str) -> Option<String> {
    node.child_by_field_name(field)
        .map(|child| node_text(content, child))
}

/// DFS for the first identifier-like descendant (parameter patterns nest)
fn first_identifier_text(content: &str, node: Node) -> Option<String> {
    if node.kind().ends_with("identifier") {
        return Some(node_text(content, node));
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if let Some(text) = first_identifier_text(content, child) {
            return Some(text);
        }
    }
    None
}

/// The target type name of a Rust impl block
fn impl_target(content: &str, node: Node) -> Option<String> {
    let ty = node.child_by_field_name("type")?;
    match ty.kind() {
        "type_identifier" => Some(node_text(content, ty)),
        "generic_type" | "scoped_type_identifier" => {
            let mut cursor = ty.walk();
            for child in ty.named_children(&mut cursor) {
                if child.kind() == "type_identifier" {
                    return Some(node_text(content, child));
                }
            }
            None
        }
        _ => None,
    }
}

/// Smallest named node that spans the given 1-indexed line range
fn node_covering_lines(root: Node, start_line: usize, end_line: usize) -> Option<Node> {
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        let child_start = child.start_position().row + 1;
        let child_end = child.end_position().row + 1;
        if child_start <= start_line && child_end >= end_line {
            return node_covering_lines(child, start_line, end_line).or(Some(child));
        }
    }
    if root.start_position().row + 1 <= start_line && root.end_position().row + 1 >= end_line {
        Some(root)
    } else {
        None
    }
}

/// Collect call targets and type references from a subtree
fn collect_reference_names(content: &str, node: Node, out: &mut Vec<String>) {
    match node.kind() {
        "call_expression" | "call" | "new_expression" => {
            let callee = node
                .child_by_field_name("function")
                .or_else(|| node.child_by_field_name("constructor"));
            if let Some(callee) = callee {
                if let Some(name) = callee_name(content, callee) {
                    out.push(name);
                }
            }
        }
        "type_identifier" => {
            out.push(node_text(content, node));
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_reference_names(content, child, out);
    }
}

/// Final identifier of a possibly-qualified callee expression
fn callee_name(content: &str, node: Node) -> Option<String> {
    match node.kind() {
        "identifier" => Some(node_text(content, node)),
        "attribute" | "member_expression" | "field_expression" => {
            let attr = node
                .child_by_field_name("attribute")
                .or_else(|| node.child_by_field_name("property"))
                .or_else(|| node.child_by_field_name("field"))?;
            Some(node_text(content, attr))
        }
        "scoped_identifier" => {
            let name = node.child_by_field_name("name")?;
            Some(node_text(content, name))
        }
        _ => first_identifier_text(content, node),
    }
}

/// Strip leading comment markers from a doc line
fn strip_comment_markers(line: &str) -> String {
    line.trim_start_matches(['/', '!', '#', '*', ' '])
        .trim_end_matches(['*', '/'])
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(language: Language, code: &str, path: &str) -> ParsedFile {
        let mut parser = ComponentParser::new(language).unwrap();
        parser.parse(code, path, code.len() as u64).unwrap()
    }

    #[test]
    fn rust_components_and_methods() {
        let code = r#"
/// Service wrapper.
pub struct AuthService {
    token: String,
}

impl AuthService {
    /// Log a user in.
    pub fn login(&self, username: &str, password: &str) -> bool {
        verify(username, password)
    }

    fn rotate(&mut self) {}
}

/// Check credentials.
fn verify(user: &str, pass: &str) -> bool {
    true
}

const MAX_RETRIES: usize = 3;
"#;

        let parsed = parse(Language::Rust, code, "src/auth.rs");
        let file = &parsed.file;

        let class = file
            .components
            .iter()
            .find(|c| c.kind == ComponentKind::Class)
            .unwrap();
        assert_eq!(class.name, "AuthService");
        assert_eq!(class.description, "Service wrapper.");
        assert_eq!(class.signature, vec!["token"]);

        let login = file
            .components
            .iter()
            .find(|c| c.qualified_name == "AuthService::login")
            .unwrap();
        assert_eq!(login.kind, ComponentKind::Function);
        assert_eq!(login.signature, vec!["self", "username", "password"]);
        assert_eq!(login.description, "Log a user in.");

        let constant = file
            .components
            .iter()
            .find(|c| c.kind == ComponentKind::Constant)
            .unwrap();
        assert_eq!(constant.name, "MAX_RETRIES");

        assert!(file
            .components
            .iter()
            .any(|c| c.qualified_name == "AuthService::rotate"));
        assert!(file.components.iter().any(|c| c.name == "verify"));
    }

    #[test]
    fn rust_references_resolve_calls() {
        let code = r#"
fn verify(user: &str) -> bool { true }

fn login(user: &str) -> bool {
    verify(user)
}
"#;
        let parsed = parse(Language::Rust, code, "a.rs");
        let login_id = "a.rs:login";
        assert!(parsed
            .references
            .iter()
            .any(|(from, name)| from == login_id && name == "verify"));
    }

    #[test]
    fn python_class_with_methods() {
        let code = r#"
class AuthService:
    """Handles user login."""

    def login(self, username, password):
        """Validate and open a session."""
        return True

    def logout(self, session):
        return None


def hash_password(password, salt):
    """Derive a salted hash."""
    return password
"#;

        let parsed = parse(Language::Python, code, "auth.py");
        let file = &parsed.file;

        let classes: Vec<_> = file
            .components
            .iter()
            .filter(|c| c.kind == ComponentKind::Class)
            .collect();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].name, "AuthService");
        assert_eq!(classes[0].description, "Handles user login.");
        assert_eq!(classes[0].signature, vec!["login", "logout"]);

        let functions: Vec<_> = file
            .components
            .iter()
            .filter(|c| c.kind == ComponentKind::Function)
            .collect();
        assert_eq!(functions.len(), 3);

        let login = file
            .components
            .iter()
            .find(|c| c.qualified_name == "AuthService.login")
            .unwrap();
        assert_eq!(login.signature, vec!["self", "username", "password"]);
        assert_eq!(login.description, "Validate and open a session.");
    }

    #[test]
    fn python_module_constant() {
        let code = "MAX_RETRIES = 3\nlowercase = 4\n";
        let parsed = parse(Language::Python, code, "config.py");
        let constants: Vec<_> = parsed
            .file
            .components
            .iter()
            .filter(|c| c.kind == ComponentKind::Constant)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(constants, vec!["MAX_RETRIES"]);
    }

    #[test]
    fn javascript_class_and_imports() {
        let code = r#"
import { api } from './api';

// Session container.
class Session {
    open(user) { return user; }
    close() {}
}

function helper(a, b) { return a + b; }

const LIMIT = 10;
"#;

        let parsed = parse(Language::JavaScript, code, "session.js");
        let file = &parsed.file;

        assert!(file
            .components
            .iter()
            .any(|c| c.kind == ComponentKind::Class && c.name == "Session"));
        assert!(file
            .components
            .iter()
            .any(|c| c.qualified_name == "Session.open"));
        assert!(file
            .components
            .iter()
            .any(|c| c.kind == ComponentKind::Function && c.name == "helper"));
        assert!(file
            .components
            .iter()
            .any(|c| c.kind == ComponentKind::Constant && c.name == "LIMIT"));
        assert_eq!(parsed.imports, vec!["./api"]);
    }

    #[test]
    fn imports_extracted_per_language() {
        let rust = parse(
            Language::Rust,
            "use std::collections::HashMap;\nfn f() {}\n",
            "a.rs",
        );
        assert_eq!(rust.imports, vec!["std::collections::HashMap"]);

        let python = parse(Language::Python, "import os\nfrom a import b\n", "a.py");
        assert_eq!(python.imports, vec!["os", "a"]);
    }

    #[test]
    fn parse_is_deterministic() {
        let code = "class A:\n    def m(self): pass\n";
        let first = parse(Language::Python, code, "a.py");
        let second = parse(Language::Python, code, "a.py");
        assert_eq!(first.file, second.file);
    }
}
