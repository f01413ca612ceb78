// src/core/stylesheet.rs
//! Precompiled utility stylesheet for self-contained documents.
//!
//! The live editor styles its markup with the Tailwind CDN build. Exported
//! documents are rasterized by an engine that may run no modern JavaScript
//! and has no network, so the utility classes found in the tree are resolved
//! here into plain CSS. Flexbox rules carry the `-webkit-box` forms and column
//! grids are expressed as flex rows weighted by `col-span-N`.

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::core::html::Node;

/// Reset applied before any utility rule.
pub const BASE_CSS: &str = "\
*, ::before, ::after { box-sizing: border-box; border: 0 solid #e5e7eb; }
html { line-height: 1.5; -webkit-text-size-adjust: 100%; font-family: ui-sans-serif, system-ui, -apple-system, \"Segoe UI\", Roboto, \"Helvetica Neue\", Arial, sans-serif; }
body { margin: 0; line-height: inherit; background: #ffffff; }
h1, h2, h3, h4, p { margin: 0; font-size: inherit; font-weight: inherit; }
ul { margin: 0; padding: 0; list-style: none; }
";

const SANS: &str = "ui-sans-serif, system-ui, -apple-system, \"Segoe UI\", Roboto, \"Helvetica Neue\", Arial, sans-serif";
const SERIF: &str = "Georgia, Cambria, \"Times New Roman\", Times, serif";

/// Which elements a declaration block applies to, relative to the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// `.c`
    Own,
    /// `.c > *`
    Children,
    /// `.c > * + *`
    Siblings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub scope: Scope,
    pub declarations: String,
}

fn own(declarations: impl Into<String>) -> Vec<Rule> {
    vec![Rule {
        scope: Scope::Own,
        declarations: declarations.into(),
    }]
}

fn scoped(scope: Scope, declarations: impl Into<String>) -> Rule {
    Rule {
        scope,
        declarations: declarations.into(),
    }
}

fn flex_display() -> Vec<Rule> {
    own("display: -webkit-box; display: -webkit-flex; display: flex;")
}

fn color(name: &str) -> Option<&'static str> {
    let hex = match name {
        "white" => "#ffffff",
        "gray-50" => "#f9fafb",
        "gray-100" => "#f3f4f6",
        "gray-200" => "#e5e7eb",
        "gray-300" => "#d1d5db",
        "gray-400" => "#9ca3af",
        "gray-500" => "#6b7280",
        "gray-600" => "#4b5563",
        "gray-700" => "#374151",
        "gray-800" => "#1f2937",
        "gray-900" => "#111827",
        "blue-50" => "#eff6ff",
        "blue-100" => "#dbeafe",
        "blue-200" => "#bfdbfe",
        "blue-300" => "#93c5fd",
        "blue-400" => "#60a5fa",
        "blue-500" => "#3b82f6",
        "blue-600" => "#2563eb",
        "blue-700" => "#1d4ed8",
        "blue-800" => "#1e40af",
        "blue-900" => "#1e3a8a",
        _ => return None,
    };
    Some(hex)
}

/// Spacing scale step `n` as a length (`4` is `1rem`).
fn spacing(step: &str) -> Option<String> {
    let step: u32 = step.parse().ok()?;
    Some(match step {
        0 => "0".to_string(),
        n => format!("{}rem", n as f32 / 4.0),
    })
}

fn font_size(name: &str) -> Option<(&'static str, &'static str)> {
    let size = match name {
        "xs" => ("0.75rem", "1rem"),
        "sm" => ("0.875rem", "1.25rem"),
        "base" => ("1rem", "1.5rem"),
        "lg" => ("1.125rem", "1.75rem"),
        "xl" => ("1.25rem", "1.75rem"),
        "2xl" => ("1.5rem", "2rem"),
        "3xl" => ("1.875rem", "2.25rem"),
        "4xl" => ("2.25rem", "2.5rem"),
        "5xl" => ("3rem", "1"),
        _ => return None,
    };
    Some(size)
}

fn box_spacing(prefix: &str, property: &str, step: &str) -> Option<Vec<Rule>> {
    let value = spacing(step)?;
    let sides: &[&str] = match &prefix[1..] {
        "" => &[""],
        "x" => &["-left", "-right"],
        "y" => &["-top", "-bottom"],
        "t" => &["-top"],
        "b" => &["-bottom"],
        "l" => &["-left"],
        "r" => &["-right"],
        _ => return None,
    };
    let declarations = sides
        .iter()
        .map(|side| format!("{}{}: {};", property, side, value))
        .collect::<Vec<_>>()
        .join(" ");
    Some(own(declarations))
}

/// CSS for one utility class. `None` for classes with no known meaning;
/// an empty list for classes that intentionally produce nothing.
pub fn utility(class: &str) -> Option<Vec<Rule>> {
    let rules = match class {
        "flex" | "grid" => flex_display(),
        // column count is carried by the children's col-span weights
        "grid-cols-3" | "grid-cols-5" => Vec::new(),
        // not a Tailwind size; inherits
        "text-md" => Vec::new(),
        // engines limited to -webkit-box can't wrap, so they fall back to inline flow
        "flex-wrap" => vec![
            scoped(
                Scope::Own,
                "display: block; display: -webkit-flex; display: flex; -webkit-flex-wrap: wrap; flex-wrap: wrap;",
            ),
            scoped(Scope::Children, "display: inline-block;"),
        ],
        "inline-block" => own("display: inline-block;"),
        "items-center" => own("-webkit-box-align: center; -webkit-align-items: center; align-items: center;"),
        "items-baseline" => {
            own("-webkit-box-align: baseline; -webkit-align-items: baseline; align-items: baseline;")
        }
        "justify-between" => own(
            "-webkit-box-pack: justify; -webkit-justify-content: space-between; justify-content: space-between;",
        ),
        "justify-center" => {
            own("-webkit-box-pack: center; -webkit-justify-content: center; justify-content: center;")
        }
        "text-center" => own("text-align: center;"),
        "text-right" => own("text-align: right;"),
        "italic" => own("font-style: italic;"),
        "uppercase" => own("text-transform: uppercase;"),
        "tracking-wider" => own("letter-spacing: 0.05em;"),
        "tracking-widest" => own("letter-spacing: 0.1em;"),
        "font-sans" => own(format!("font-family: {};", SANS)),
        "font-serif" => own(format!("font-family: {};", SERIF)),
        "font-light" => own("font-weight: 300;"),
        "font-medium" => own("font-weight: 500;"),
        "font-semibold" => own("font-weight: 600;"),
        "font-bold" => own("font-weight: 700;"),
        "font-extrabold" => own("font-weight: 800;"),
        "list-disc" => own("list-style-type: disc;"),
        "rounded" => own("border-radius: 0.25rem;"),
        "rounded-sm" => own("border-radius: 0.125rem;"),
        "rounded-full" => own("border-radius: 9999px;"),
        "border" => own("border-width: 1px;"),
        "border-2" => own("border-width: 2px;"),
        "border-b" => own("border-bottom-width: 1px;"),
        "border-b-2" => own("border-bottom-width: 2px;"),
        "border-r-2" => own("border-right-width: 2px;"),
        "shadow-2xl" => own("box-shadow: 0 25px 50px -12px rgba(0, 0, 0, 0.25);"),
        "w-full" => own("width: 100%;"),
        "max-w-[800px]" => own("max-width: 800px;"),
        "mx-auto" => own("margin-left: auto; margin-right: auto;"),
        _ => return prefixed_utility(class),
    };
    Some(rules)
}

fn prefixed_utility(class: &str) -> Option<Vec<Rule>> {
    let (prefix, value) = class.split_once('-')?;

    match prefix {
        "text" => {
            if let Some((size, line_height)) = font_size(value) {
                return Some(own(format!("font-size: {}; line-height: {};", size, line_height)));
            }
            color(value).map(|hex| own(format!("color: {};", hex)))
        }
        "bg" => color(value).map(|hex| own(format!("background-color: {};", hex))),
        "border" => color(value).map(|hex| own(format!("border-color: {};", hex))),
        "col" => {
            let span: u32 = value.strip_prefix("span-")?.parse().ok()?;
            Some(own(format!(
                "-webkit-box-flex: {span}; -webkit-flex: {span} 1 0%; flex: {span} 1 0%; width: 0; min-width: 0;"
            )))
        }
        "gap" => {
            let length = spacing(value)?;
            Some(vec![
                scoped(Scope::Siblings, format!("margin-left: {};", length)),
                scoped(Scope::Children, format!("margin-bottom: {};", length)),
            ])
        }
        "space" => {
            let (axis, step) = value.split_once('-')?;
            let length = spacing(step)?;
            let side = match axis {
                "x" => "left",
                "y" => "top",
                _ => return None,
            };
            Some(vec![scoped(Scope::Siblings, format!("margin-{}: {};", side, length))])
        }
        "p" | "px" | "py" | "pt" | "pb" | "pl" | "pr" => box_spacing(prefix, "padding", value),
        "m" | "mx" | "my" | "mt" | "mb" | "ml" | "mr" => box_spacing(prefix, "margin", value),
        _ => None,
    }
}

/// Class selector for `class`, escaping characters CSS identifiers can't hold.
pub fn class_selector(class: &str) -> String {
    let mut selector = String::with_capacity(class.len() + 1);
    selector.push('.');
    for c in class.chars() {
        if !(c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            selector.push('\\');
        }
        selector.push(c);
    }
    selector
}

/// Distinct class names used anywhere in the tree, in sorted order.
pub fn classes_in(root: &Node) -> BTreeSet<&str> {
    let mut classes = BTreeSet::new();
    collect_classes(root, &mut classes);
    classes
}

fn collect_classes<'a>(node: &'a Node, classes: &mut BTreeSet<&'a str>) {
    if let Node::Element(element) = node {
        classes.extend(element.class.split_whitespace());
        for child in &element.children {
            collect_classes(child, classes);
        }
    }
}

/// Classes in the tree that [`utility`] can't resolve.
pub fn unresolved_classes(root: &Node) -> Vec<&str> {
    classes_in(root)
        .into_iter()
        .filter(|class| utility(class).is_none())
        .collect()
}

/// Reset plus one rule per utility class present in `root`.
pub fn stylesheet_for(root: &Node) -> String {
    let mut css = String::from(BASE_CSS);
    for class in classes_in(root) {
        let Some(rules) = utility(class) else {
            continue;
        };
        let selector = class_selector(class);
        for rule in rules {
            let suffix = match rule.scope {
                Scope::Own => "",
                Scope::Children => " > *",
                Scope::Siblings => " > * + *",
            };
            let _ = writeln!(css, "{}{} {{ {} }}", selector, suffix, rule.declarations);
        }
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::Layout;
    use crate::core::preview::render_preview;
    use crate::types::ResumeData;

    #[test]
    fn test_every_preview_class_resolves() {
        for layout in Layout::ALL {
            let root = render_preview(&ResumeData::demo(), layout);
            assert_eq!(unresolved_classes(&root), Vec::<&str>::new(), "{}", layout);
        }
    }

    #[test]
    fn test_layout_colors_reach_the_stylesheet() {
        let creative = stylesheet_for(&render_preview(&ResumeData::demo(), Layout::Creative));
        assert!(creative.contains(".text-blue-800 { color: #1e40af; }"));
        assert!(creative.contains(".bg-blue-50 { background-color: #eff6ff; }"));
        assert!(creative.contains(".col-span-3 { -webkit-box-flex: 3;"));

        let classic = stylesheet_for(&render_preview(&ResumeData::demo(), Layout::Classic));
        assert!(classic.contains(".font-serif { font-family: Georgia"));
        assert!(!classic.contains(".col-span-3"));
    }

    #[test]
    fn test_sided_spacing_follows_shorthand() {
        let root: Node = Node::el("div", "pt-0 p-8").into();
        let css = stylesheet_for(&root);
        let shorthand = css.find(".p-8 { padding: 2rem; }").unwrap();
        let top = css.find(".pt-0 { padding-top: 0; }").unwrap();
        assert!(shorthand < top);
    }

    #[test]
    fn test_child_scoped_rules() {
        let root: Node = Node::el("div", "space-y-1 gap-2").into();
        let css = stylesheet_for(&root);
        assert!(css.contains(".space-y-1 > * + * { margin-top: 0.25rem; }"));
        assert!(css.contains(".gap-2 > * + * { margin-left: 0.5rem; }"));
        assert!(css.contains(".gap-2 > * { margin-bottom: 0.5rem; }"));
    }

    #[test]
    fn test_wrapping_rows_override_plain_flex() {
        let root: Node = Node::el("div", "flex-wrap flex").into();
        let css = stylesheet_for(&root);
        let flex = css.find(".flex { display: -webkit-box;").unwrap();
        let wrap = css.find(".flex-wrap { display: block;").unwrap();
        assert!(flex < wrap);
        assert!(css.contains(".flex-wrap > * { display: inline-block; }"));
    }

    #[test]
    fn test_arbitrary_value_selector_is_escaped() {
        assert_eq!(class_selector("max-w-[800px]"), ".max-w-\\[800px\\]");
        assert_eq!(utility("not-a-utility"), None);
        assert_eq!(utility("text-md"), Some(Vec::new()));
    }
}
