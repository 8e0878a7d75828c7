//! Markdown to HTML rendering with highlighted code blocks.

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::highlight::Highlighter;

/// Placeholder for the rendered body in page templates.
pub const BODY_PLACEHOLDER: &str = "$BODY";

/// Placeholder for the script name in the demo template.
pub const SCRIPT_PLACEHOLDER: &str = "$SCRIPT";

/// Returns the language word of a fence info string, ignoring any property group.
pub fn fence_language(info: &str) -> &str {
    info.split(|c: char| c.is_whitespace() || c == '{')
        .next()
        .unwrap_or("")
}

/// Markdown extensions shared by weaving and tangling.
pub(crate) fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options
}

/// Renders markdown to HTML, replacing code blocks with highlighted markup.
pub fn render_markdown(markdown: &str, highlighter: &Highlighter) -> String {
    let mut code: Option<(String, String)> = None;
    let events = Parser::new_ext(markdown, parser_options()).filter_map(|event| match event {
        Event::Start(Tag::CodeBlock(kind)) => {
            let language = match kind {
                CodeBlockKind::Fenced(info) => fence_language(&info).to_string(),
                CodeBlockKind::Indented => String::new(),
            };
            code = Some((language, String::new()));
            None
        }
        Event::Text(text) if code.is_some() => {
            if let Some((_, body)) = code.as_mut() {
                body.push_str(&text);
            }
            None
        }
        Event::End(TagEnd::CodeBlock) => {
            let (language, body) = code.take().unwrap_or_default();
            Some(Event::Html(CowStr::from(
                highlighter.highlight(&body, &language),
            )))
        }
        other => Some(other),
    });

    let mut out = String::new();
    html::push_html(&mut out, events);
    out
}

/// Replaces every occurrence of `placeholder` in `template` with `value`.
pub fn fill_template(template: &str, placeholder: &str, value: &str) -> String {
    if !template.contains(placeholder) {
        tracing::warn!("Template has no {} placeholder", placeholder);
    }
    template.replace(placeholder, value)
}

/// The embedded demo frame shown at the top of a tutorial.
pub fn demo_frame(name: &str) -> String {
    format!(
        "<div class=\"demo_frame\"><iframe src=\"demo_{name}.html\"></iframe><a href=\"demo_{name}.html\">&#x1F517;</a></div>\n"
    )
}

/// Renders a markdown document into a page template.
pub fn weave_document(markdown: &str, template: &str, highlighter: &Highlighter) -> String {
    let rendered = render_markdown(markdown, highlighter);
    fill_template(template, BODY_PLACEHOLDER, &rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::ThemeName;
    use pretty_assertions::assert_eq;

    fn highlighter() -> Highlighter {
        Highlighter::new(ThemeName::default())
    }

    #[test]
    fn test_fence_language() {
        assert_eq!(fence_language("js {fragment=\"root\"}"), "js");
        assert_eq!(fence_language("js{fragment=\"root\"}"), "js");
        assert_eq!(fence_language("glsl"), "glsl");
        assert_eq!(fence_language(""), "");
    }

    #[test]
    fn test_prose() {
        let html = render_markdown("# Title\n\nSome *emphasis*.", &highlighter());
        assert_eq!(html, "<h1>Title</h1>\n<p>Some <em>emphasis</em>.</p>\n");
    }

    #[test]
    fn test_code_block_highlighted() {
        let html = render_markdown(
            "Intro\n\n```js {fragment=\"root\"}\nconst x = 1;\n```\n",
            &highlighter(),
        );
        assert!(html.starts_with("<p>Intro</p>\n<div class=\"highlight\""));
        assert!(html.contains("\">const"));
        assert!(!html.contains("<pre><code"));
        assert!(!html.contains("fragment"));
    }

    #[test]
    fn test_raw_html_passes_through() {
        let markdown = format!("{}\nText", demo_frame("triangle"));
        let html = render_markdown(&markdown, &highlighter());
        assert!(html.contains("<iframe src=\"demo_triangle.html\"></iframe>"));
    }

    #[test]
    fn test_tables() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n", &highlighter());
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_demo_frame() {
        assert_eq!(
            demo_frame("redball"),
            "<div class=\"demo_frame\"><iframe src=\"demo_redball.html\"></iframe><a href=\"demo_redball.html\">&#x1F517;</a></div>\n"
        );
    }

    #[test]
    fn test_fill_template() {
        assert_eq!(
            fill_template("<body>$BODY</body>", BODY_PLACEHOLDER, "<p>x</p>"),
            "<body><p>x</p></body>"
        );
        assert_eq!(fill_template("<html/>", BODY_PLACEHOLDER, "x"), "<html/>");
        assert_eq!(
            fill_template("<script src=\"$SCRIPT\"></script>", SCRIPT_PLACEHOLDER, "tutorial_triangle.js"),
            "<script src=\"tutorial_triangle.js\"></script>"
        );
    }

    #[test]
    fn test_weave_document() {
        let page = weave_document("Hello", "<main>$BODY</main>", &highlighter());
        assert_eq!(page, "<main><p>Hello</p>\n</main>");
    }
}
