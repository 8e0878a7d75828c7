//! Syntax highlighting to HTML with inline styles.
//!
//! Every styled run is a `<span style="...">`, so the page needs no extra
//! stylesheet. Grammars and themes are syntect's built-in sets.
//!
//! ```
//! use weft::highlight::{Highlighter, ThemeName};
//!
//! let html = Highlighter::new(ThemeName::default()).highlight("let x = 1;", "js");
//! assert!(html.starts_with("<div class=\"highlight\">"));
//! ```

mod theme;

use once_cell::sync::Lazy;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};

pub use theme::ThemeName;

static SYNTAXES: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEMES: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

/// Escapes text for inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders code blocks as highlighted HTML.
#[derive(Debug, Clone)]
pub struct Highlighter {
    theme: Option<&'static Theme>,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(ThemeName::default())
    }
}

impl Highlighter {
    pub fn new(name: ThemeName) -> Self {
        let theme = THEMES.themes.get(name.syntect_name());
        if theme.is_none() {
            tracing::warn!("Theme '{}' is not available, code will not be coloured", name);
        }
        Self { theme }
    }

    fn syntax(language: &str) -> &'static SyntaxReference {
        if language.is_empty() {
            return SYNTAXES.find_syntax_plain_text();
        }
        SYNTAXES.find_syntax_by_token(language).unwrap_or_else(|| {
            tracing::warn!("No highlighting rules for language '{}', using plain text", language);
            SYNTAXES.find_syntax_plain_text()
        })
    }

    /// Highlights `code` as `language`.
    ///
    /// An empty or unknown language renders as plain text.
    pub fn highlight(&self, code: &str, language: &str) -> String {
        let mut code = code.to_string();
        if !code.ends_with('\n') {
            code.push('\n');
        }

        let body = self.theme.and_then(|theme| {
            highlighted_html_for_string(&code, &SYNTAXES, Self::syntax(language.trim()), theme)
                .map_err(|e| tracing::warn!("Highlighting failed, using plain text: {}", e))
                .ok()
        });
        let body = body.unwrap_or_else(|| format!("<pre>{}</pre>\n", escape_html(&code)));

        format!("<div class=\"highlight\">{}</div>\n", body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }

    #[test]
    fn test_every_theme_is_available() {
        for name in ThemeName::ALL {
            assert!(Highlighter::new(name).theme.is_some(), "{} missing", name);
        }
    }

    #[test]
    fn test_wrapper() {
        let html = Highlighter::default().highlight("x", "");
        assert!(html.starts_with("<div class=\"highlight\"><pre style=\"background-color:#"));
        assert!(html.ends_with("</pre>\n</div>\n"));
        assert!(html.contains("x\n"));
    }

    #[test]
    fn test_javascript_is_coloured() {
        let highlighter = Highlighter::default();
        let js = highlighter.highlight("const s = 'hi'; // greeting", "js");
        let plain = highlighter.highlight("const s = 'hi'; // greeting", "");
        assert!(js.matches("<span").count() > plain.matches("<span").count());
        assert!(js.contains("\">const"));
        assert_eq!(
            highlighter.highlight("let a;", "javascript"),
            highlighter.highlight("let a;", "js")
        );
    }

    #[test]
    fn test_markup_is_escaped() {
        let html = Highlighter::default().highlight("if (a < b && c > d) {}", "js");
        assert!(html.contains("&lt;"));
        assert!(html.contains("&amp;"));
        assert!(!html.contains("a < b"));
    }

    #[test]
    fn test_unknown_language_is_plain() {
        let highlighter = Highlighter::default();
        assert_eq!(
            highlighter.highlight("if <x>", "brainfart"),
            highlighter.highlight("if <x>", "")
        );
        assert!(highlighter.highlight("if <x>", "brainfart").contains("if &lt;x&gt;"));
    }

    #[test]
    fn test_themes_differ() {
        let light = Highlighter::new(ThemeName::InspiredGithub).highlight("return 1;", "js");
        let dark = Highlighter::new(ThemeName::SolarizedDark).highlight("return 1;", "js");
        assert_ne!(light, dark);
    }
}
