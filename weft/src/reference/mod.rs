//! Reference markdown generation from the doc tree.

use std::fmt::Write as _;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::DocEntity;

static CROSS_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\S+)\]").unwrap());

/// Turns `[Name]` into a link to the `Name` anchor.
pub fn expand_refs(text: &str) -> String {
    CROSS_REF.replace_all(text, "[$1](#$1)").into_owned()
}

fn anchor(name: &str) -> String {
    format!("<a id='{name}' href='#{name}'>{name}</a>")
}

/// Receiver shown in front of instance methods: `Engine` becomes `engine`.
fn instance_name(class: &str) -> String {
    let mut chars = class.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn class_reference(class: &DocEntity) -> String {
    let name = &class.name;
    let mut out = format!("\n## class {}\n\n", anchor(name));
    out.push_str(&expand_refs(&class.brief));
    out.push_str("\n\n");

    for method in &class.children {
        let receiver = if method.is_static() {
            name.clone()
        } else {
            instance_name(name)
        };
        let _ = writeln!(
            out,
            "- **{}.{}({})**",
            receiver,
            method.name,
            method.argument_names().join(", ")
        );
        if !method.brief.is_empty() {
            let _ = writeln!(out, "  - {}", method.brief);
        }
        for child in &method.children {
            let brief = expand_refs(&child.brief);
            if child.is_argument() {
                let _ = writeln!(out, "  - *{}* {}", child.name, brief);
            } else if child.is_retval() {
                let _ = writeln!(out, "  - *returns* {}", brief);
            }
        }
    }

    if let Some(detail) = class.detail.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&expand_refs(detail));
        out.push('\n');
    }
    out
}

fn function_reference(function: &DocEntity) -> String {
    let mut out = format!(
        "\n## function {}({})\n\n",
        anchor(&function.name),
        function.argument_names().join(", ")
    );
    out.push_str(&expand_refs(&function.brief));
    out.push_str("\n\n");

    for child in &function.children {
        let brief = expand_refs(&child.brief);
        if child.is_argument() {
            let _ = write!(out, "- **{}**\n  - {}\n", child.name, brief);
        } else {
            let _ = write!(out, "- **returns**\n  - {}\n", brief);
        }
    }
    out.push('\n');

    if let Some(detail) = function.detail.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&expand_refs(detail));
        out.push('\n');
    }
    out
}

fn enum_reference(enumeration: &DocEntity) -> String {
    let mut out = format!("\n## enum {}\n\n", anchor(&enumeration.name));
    for value in &enumeration.children {
        let _ = writeln!(out, "- {}", value.name);
    }
    out.push('\n');
    out
}

fn table_of_contents(out: &mut String, title: &str, entities: &[&DocEntity]) {
    let _ = write!(out, "\n### {}\n\n", title);
    for entity in entities {
        let _ = writeln!(out, "- [{0}](#{0})", entity.name);
    }
}

fn sections(out: &mut String, class: &str, entities: &[&DocEntity], render: fn(&DocEntity) -> String) {
    for entity in entities {
        let _ = write!(out, "\n<div class='{}'>\n", class);
        out.push_str(&render(entity));
        out.push_str("\n</div>\n");
    }
}

/// Builds the reference page markdown.
///
/// Top-level entities are listed by name: tables of contents for classes,
/// free functions and enums, followed by one section per entity.
pub fn build_reference_markdown(doc_tree: &[DocEntity], preamble: &str) -> String {
    let mut sorted: Vec<&DocEntity> = doc_tree.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let classes: Vec<&DocEntity> = sorted.iter().copied().filter(|e| e.is_class()).collect();
    let functions: Vec<&DocEntity> = sorted.iter().copied().filter(|e| e.is_function()).collect();
    let enums: Vec<&DocEntity> = sorted.iter().copied().filter(|e| e.is_enum()).collect();

    let mut out = preamble.to_string();
    out.push('\n');
    table_of_contents(&mut out, "Classes", &classes);
    table_of_contents(&mut out, "Free Functions", &functions);
    table_of_contents(&mut out, "Enums", &enums);

    sections(&mut out, "classdoc", &classes, class_reference);
    sections(&mut out, "funcdoc", &functions, function_reference);
    sections(&mut out, "enumdoc", &enums, enum_reference);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::gather_docstrings;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn tree(source: &str) -> Vec<DocEntity> {
        gather_docstrings([(Path::new("jsbindings.cpp"), source)]).unwrap()
    }

    #[test]
    fn test_expand_refs() {
        assert_eq!(expand_refs("Returns an [Engine]."), "Returns an [Engine](#Engine).");
        assert_eq!(expand_refs("[a] and [b]"), "[a](#a) and [b](#b)");
        assert_eq!(expand_refs("[not a ref]"), "[not a ref]");
    }

    #[test]
    fn test_instance_name() {
        assert_eq!(instance_name("Engine"), "engine");
        assert_eq!(instance_name("IndexBuffer"), "indexBuffer");
        assert_eq!(instance_name(""), "");
    }

    #[test]
    fn test_class_reference() {
        let tree = tree(
            r#"
/// Engine ::class:: Central rendering object.
/// Read the [Renderer] docs too.
/// create ::method static:: Creates an engine.
/// canvas ::argument:: The target canvas.
/// ::retval:: A new [Engine].
/// destroy ::method:: Frees a resource.
/// obj ::argument:: The resource.
"#,
        );
        assert_eq!(
            class_reference(&tree[0]),
            "\n## class <a id='Engine' href='#Engine'>Engine</a>\n\n\
             Central rendering object.\n\n\
             - **Engine.create(canvas)**\n  - Creates an engine.\n  - *canvas* The target canvas.\n  - *returns* A new [Engine](#Engine).\n\
             - **engine.destroy(obj)**\n  - Frees a resource.\n  - *obj* The resource.\n\
             Read the [Renderer](#Renderer) docs too.\n"
        );
    }

    #[test]
    fn test_function_reference() {
        let tree = tree(
            r#"
/// fetch ::function:: Downloads assets.
/// Uses the browser fetch API.
/// urls ::argument:: List of [Url] strings.
/// onDone ::argument:: Callback.
/// ::retval:: Nothing.
"#,
        );
        assert_eq!(
            function_reference(&tree[0]),
            "\n## function <a id='fetch' href='#fetch'>fetch</a>(urls, onDone)\n\n\
             Downloads assets.\n\n\
             - **urls**\n  - List of [Url](#Url) strings.\n\
             - **onDone**\n  - Callback.\n\
             - **returns**\n  - Nothing.\n\n\
             Uses the browser fetch API.\n"
        );
    }

    #[test]
    fn test_enum_reference() {
        let tree = tree("enum_<RgbType>(\"RgbType\")\n.value(\"sRGB\", x)\n.value(\"LINEAR\", y);\n");
        assert_eq!(
            enum_reference(&tree[0]),
            "\n## enum <a id='RgbType' href='#RgbType'>RgbType</a>\n\n- sRGB\n- LINEAR\n\n"
        );
    }

    #[test]
    fn test_build_reference_markdown() {
        let tree = tree(
            r#"
/// View ::class:: A view.
/// Engine ::class:: An engine.
/// init ::function:: Starts things.
enum_<Shading>("Shading")
"#,
        );
        let markdown = build_reference_markdown(&tree, "All names live in Filament.");

        assert!(markdown.starts_with(
            "All names live in Filament.\n\n### Classes\n\n- [Engine](#Engine)\n- [View](#View)\n\
             \n### Free Functions\n\n- [init](#init)\n\
             \n### Enums\n\n- [Shading](#Shading)\n"
        ));

        let engine = markdown.find("<div class='classdoc'>\n\n## class <a id='Engine'").unwrap();
        let view = markdown.find("## class <a id='View'").unwrap();
        let init = markdown.find("<div class='funcdoc'>").unwrap();
        let shading = markdown.find("<div class='enumdoc'>").unwrap();
        assert!(engine < view && view < init && init < shading);
        assert!(markdown.ends_with("\n</div>\n"));
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(
            build_reference_markdown(&[], ""),
            "\n\n### Classes\n\n\n### Free Functions\n\n\n### Enums\n\n"
        );
    }
}
