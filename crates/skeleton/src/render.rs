use crate::config::SkeletonConfig;
use crate::types::Skeleton;
use archmap_extractor::{Component, ComponentKind, SourceFile};
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

const NO_DESCRIPTION: &str = "(no description)";

/// Render the compact skeleton for a file's components.
///
/// Pure function: identical component input yields identical text. An empty
/// component list yields an empty skeleton.
pub fn render_skeleton(file: &SourceFile, config: &SkeletonConfig) -> Skeleton {
    if file.components.is_empty() {
        return Skeleton {
            file_path: file.path.clone(),
            text: String::new(),
            degraded: file.parse_degraded,
        };
    }

    // Methods render under their class, wherever the class appears in the
    // file, so they are claimed up front.
    let mut consumed: HashSet<&str> = HashSet::new();
    for component in &file.components {
        if component.kind == ComponentKind::Class {
            for method in methods_of(file, component) {
                consumed.insert(method.id.as_str());
            }
        }
    }

    let mut lines = vec![format!("# file: {}", file.path)];
    for component in &file.components {
        match component.kind {
            ComponentKind::Class => {
                lines.push(format!(
                    "class {}: {}",
                    component.name,
                    truncate_description(&component.description, config.max_description_chars)
                ));

                let methods = methods_of(file, component);
                for method in methods.iter().take(config.max_methods_per_class) {
                    lines.push(format!(
                        "  - {}({})",
                        method.name,
                        join_params(&method.signature, config.max_params)
                    ));
                }
                if methods.len() > config.max_methods_per_class {
                    lines.push(format!(
                        "  … +{} more",
                        methods.len() - config.max_methods_per_class
                    ));
                }
            }
            ComponentKind::Function => {
                if consumed.contains(component.id.as_str()) {
                    continue;
                }
                // Orphan members (impl target defined elsewhere) keep their
                // qualified name.
                lines.push(format!(
                    "fn {}({}): {}",
                    component.qualified_name,
                    join_params(&component.signature, config.max_params),
                    truncate_description(&component.description, config.max_description_chars)
                ));
            }
            ComponentKind::Constant => {
                lines.push(format!("const {}", component.name));
            }
        }
    }

    let text = lines.join("\n");
    log::trace!(
        "Rendered skeleton for {}: {} components, {} chars",
        file.path,
        file.components.len(),
        text.len()
    );

    Skeleton {
        file_path: file.path.clone(),
        text,
        degraded: file.parse_degraded,
    }
}

/// Render the uncompressed reference view of the same components.
///
/// This is the baseline the compression ratio is measured against.
pub fn render_full_detail(file: &SourceFile) -> String {
    let mut out = String::new();
    for component in &file.components {
        out.push_str(&format!("component: {}\n", component.id));
        out.push_str(&format!("  kind: {}\n", component.kind.as_str()));
        out.push_str(&format!(
            "  lines: {}-{} ({} lines)\n",
            component.start_line,
            component.end_line,
            component.line_count()
        ));
        out.push_str(&format!("  signature: {}\n", component.signature.join(", ")));
        let description = if component.description.is_empty() {
            NO_DESCRIPTION
        } else {
            component.description.as_str()
        };
        out.push_str(&format!("  description: {description}\n"));
    }
    out
}

/// Member function components belonging to a class, in file order
fn methods_of<'a>(file: &'a SourceFile, class: &Component) -> Vec<&'a Component> {
    file.components
        .iter()
        .filter(|c| {
            c.kind == ComponentKind::Function
                && is_member(c)
                && member_scope(c).is_some_and(|scope| scope == class.name)
        })
        .collect()
}

/// Whether a function component is a class/impl member
fn is_member(component: &Component) -> bool {
    component.qualified_name != component.name
}

/// Parent scope of a member's qualified name
fn member_scope(component: &Component) -> Option<&str> {
    component
        .qualified_name
        .rsplit_once("::")
        .or_else(|| component.qualified_name.rsplit_once('.'))
        .map(|(scope, _)| scope)
}

/// Join parameter names, truncating to `max` entries with a `…` marker
fn join_params(params: &[String], max: usize) -> String {
    if params.len() <= max {
        return params.join(", ");
    }
    let mut shown: Vec<&str> = params.iter().take(max).map(String::as_str).collect();
    shown.push("…");
    shown.join(", ")
}

/// Truncate a description grapheme-safely, with an explicit placeholder when
/// the description is missing
fn truncate_description(description: &str, max_chars: usize) -> String {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return NO_DESCRIPTION.to_string();
    }

    let graphemes: Vec<&str> = trimmed.graphemes(true).collect();
    if graphemes.len() <= max_chars {
        return trimmed.to_string();
    }
    let mut out: String = graphemes[..max_chars].concat();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use archmap_extractor::Language;
    use pretty_assertions::assert_eq;

    fn component(
        path: &str,
        name: &str,
        qualified: &str,
        kind: ComponentKind,
        signature: &[&str],
        description: &str,
    ) -> Component {
        Component {
            id: Component::make_id(path, qualified),
            name: name.to_string(),
            qualified_name: qualified.to_string(),
            kind,
            file_path: path.to_string(),
            start_line: 1,
            end_line: 10,
            signature: signature.iter().map(|s| (*s).to_string()).collect(),
            description: description.to_string(),
        }
    }

    fn file(path: &str, components: Vec<Component>) -> SourceFile {
        SourceFile {
            path: path.to_string(),
            language: Language::Python,
            size_bytes: 1000,
            line_count: 50,
            components,
            parse_degraded: false,
        }
    }

    #[test]
    fn class_with_methods_renders_signatures_only() {
        let file = file(
            "auth.py",
            vec![
                component(
                    "auth.py",
                    "AuthService",
                    "AuthService",
                    ComponentKind::Class,
                    &["login", "logout"],
                    "Handles user login.",
                ),
                component(
                    "auth.py",
                    "login",
                    "AuthService.login",
                    ComponentKind::Function,
                    &["self", "username", "password"],
                    "Validate and open a session.",
                ),
                component(
                    "auth.py",
                    "logout",
                    "AuthService.logout",
                    ComponentKind::Function,
                    &["self", "session"],
                    "",
                ),
            ],
        );

        let skeleton = render_skeleton(&file, &SkeletonConfig::default());
        assert_eq!(
            skeleton.text,
            "# file: auth.py\n\
             class AuthService: Handles user login.\n\
             \u{20}\u{20}- login(self, username, password)\n\
             \u{20}\u{20}- logout(self, session)"
        );
    }

    #[test]
    fn skeleton_is_deterministic() {
        let file = file(
            "a.py",
            vec![component(
                "a.py",
                "f",
                "f",
                ComponentKind::Function,
                &["x", "y"],
                "Adds.",
            )],
        );
        let config = SkeletonConfig::default();
        assert_eq!(render_skeleton(&file, &config), render_skeleton(&file, &config));
    }

    #[test]
    fn empty_component_list_renders_empty() {
        let file = file("empty.py", vec![]);
        let skeleton = render_skeleton(&file, &SkeletonConfig::default());
        assert!(skeleton.is_empty());
    }

    #[test]
    fn missing_description_uses_placeholder() {
        let file = file(
            "a.py",
            vec![component(
                "a.py",
                "f",
                "f",
                ComponentKind::Function,
                &["x"],
                "",
            )],
        );
        let skeleton = render_skeleton(&file, &SkeletonConfig::default());
        assert!(skeleton.text.contains("(no description)"));
    }

    #[test]
    fn long_param_lists_truncate() {
        let file = file(
            "a.py",
            vec![component(
                "a.py",
                "f",
                "f",
                ComponentKind::Function,
                &["a", "b", "c", "d", "e", "f", "g"],
                "Many params.",
            )],
        );
        let skeleton = render_skeleton(&file, &SkeletonConfig::default());
        assert!(skeleton.text.contains("fn f(a, b, c, d, e, …)"));
    }

    #[test]
    fn excess_methods_elided_with_marker() {
        let mut components = vec![component(
            "big.py",
            "Big",
            "Big",
            ComponentKind::Class,
            &[],
            "A wide class.",
        )];
        for i in 0..12 {
            let name = format!("m{i}");
            let qualified = format!("Big.{name}");
            components.push(component(
                "big.py",
                &name,
                &qualified,
                ComponentKind::Function,
                &["self"],
                "",
            ));
        }

        let skeleton = render_skeleton(&file("big.py", components), &SkeletonConfig::default());
        assert!(skeleton.text.contains("… +2 more"));
        assert!(!skeleton.text.contains("m11(self)"));
    }

    #[test]
    fn compression_bound_holds_for_nontrivial_files() {
        let description = "Coordinates the retry budget across all outbound \
                           request paths and applies exponential backoff when \
                           the upstream rejects the call.";
        let mut components = vec![component(
            "svc.py",
            "RetryPolicy",
            "RetryPolicy",
            ComponentKind::Class,
            &["apply", "reset", "budget"],
            description,
        )];
        for name in ["apply", "reset", "budget", "snapshot", "observe"] {
            let qualified = format!("RetryPolicy.{name}");
            components.push(component(
                "svc.py",
                name,
                &qualified,
                ComponentKind::Function,
                &["self", "request", "deadline", "attempts"],
                description,
            ));
        }

        let file = file("svc.py", components);
        let detail = render_full_detail(&file);
        let skeleton = render_skeleton(&file, &SkeletonConfig::default());

        assert!(detail.len() > 200);
        assert!(
            skeleton.text.len() * 100 <= detail.len() * 40,
            "skeleton {} bytes vs detail {} bytes",
            skeleton.text.len(),
            detail.len()
        );
    }

    #[test]
    fn degraded_parse_marks_skeleton() {
        let mut f = file(
            "broken.py",
            vec![component(
                "broken.py",
                "f",
                "f",
                ComponentKind::Function,
                &[],
                "",
            )],
        );
        f.parse_degraded = true;
        let skeleton = render_skeleton(&f, &SkeletonConfig::default());
        assert!(skeleton.degraded);
    }
}
