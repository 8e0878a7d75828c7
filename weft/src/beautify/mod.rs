//! JavaScript re-indenter for tangled sources.
//!
//! Tangling pastes fragments at whatever indentation the placeholder had, so
//! the assembled file is re-laid-out from its tokens: braces open indented
//! blocks, statements end lines, and strings, template literals, regular
//! expressions and comments are copied through untouched.

mod lexer;

use serde::{Deserialize, Serialize};

pub use lexer::{tokenize, Token, TokenKind};

fn default_indent_size() -> usize {
    2
}

fn default_true() -> bool {
    true
}

/// Beautifier options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeautifyOptions {
    /// Spaces per indentation level.
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,

    /// Terminate the output with exactly one newline.
    #[serde(default = "default_true")]
    pub end_with_newline: bool,

    /// Keep one blank line where the source had blank lines between statements.
    #[serde(default)]
    pub preserve_newlines: bool,

    /// Start `.method` calls that follow a `)` on their own line.
    #[serde(default = "default_true")]
    pub break_chained_methods: bool,
}

impl Default for BeautifyOptions {
    fn default() -> Self {
        Self {
            indent_size: default_indent_size(),
            end_with_newline: true,
            preserve_newlines: false,
            break_chained_methods: true,
        }
    }
}

const KEYWORDS: &[&str] = &[
    "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "export", "extends", "finally", "for", "function", "if",
    "import", "in", "instanceof", "let", "new", "of", "return", "switch", "throw", "try",
    "typeof", "var", "void", "while", "with", "yield",
];

/// Keywords that behave like operands.
const VALUE_KEYWORDS: &[&str] = &[
    "true", "false", "null", "undefined", "NaN", "Infinity", "this", "super",
];

/// Keywords after which a line break ends the statement.
const RESTRICTED_KEYWORDS: &[&str] = &["return", "throw", "break", "continue"];

/// Keywords that take a space before an opening parenthesis.
const PAREN_KEYWORDS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "with", "return", "typeof", "await", "yield", "in",
    "of", "new", "delete", "void", "throw", "case", "else", "do", "async",
];

/// Keywords after which `+`, `-` and `/` are prefix operators.
const OPERAND_KEYWORDS: &[&str] = &[
    "return", "typeof", "case", "in", "of", "delete", "void", "throw", "new", "yield", "await",
    "instanceof",
];

/// Words that continue a statement after a closing brace.
const BRACE_CONTINUATIONS: &[&str] = &["else", "catch", "finally", "while"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prev {
    None,
    Word,
    Keyword,
    Value,
    OpenParen,
    OpenBracket,
    OpenBrace,
    CloseParen,
    CloseBracket,
    CloseBrace,
    Comma,
    Semicolon,
    Dot,
    BinaryOp,
    PrefixOp,
    PostfixOp,
    Colon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Block,
    Object,
    Paren { for_header: bool },
    Bracket,
}

#[derive(Debug, Clone)]
struct Frame {
    kind: FrameKind,
    /// A chained method call has pushed the rest of the statement one level in.
    chained: bool,
    /// Open `?` operators awaiting their `:`.
    ternaries: usize,
    /// A `case` or `default` label is waiting for its colon.
    case_label: bool,
    /// Statements after a `case` label are indented one more level.
    case_body: bool,
}

impl Frame {
    fn new(kind: FrameKind) -> Self {
        Self {
            kind,
            chained: false,
            ternaries: 0,
            case_label: false,
            case_body: false,
        }
    }

    fn is_brace(&self) -> bool {
        matches!(self.kind, FrameKind::Block | FrameKind::Object)
    }
}

struct Printer<'o> {
    options: &'o BeautifyOptions,
    lines: Vec<String>,
    current: String,
    current_indent: usize,
    frames: Vec<Frame>,
    prev: Prev,
    prev_text: String,
    break_after_brace: bool,
    /// The brace just closed belonged to an object literal or pattern.
    closed_object: bool,
    /// The current token was preceded by a line break.
    newline_before: bool,
}

impl<'o> Printer<'o> {
    fn new(options: &'o BeautifyOptions) -> Self {
        Self {
            options,
            lines: Vec::new(),
            current: String::new(),
            current_indent: 0,
            frames: vec![Frame::new(FrameKind::Block)],
            prev: Prev::None,
            prev_text: String::new(),
            break_after_brace: false,
            closed_object: false,
            newline_before: false,
        }
    }

    fn frame(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    fn frame_kind(&self) -> FrameKind {
        self.frames.last().map_or(FrameKind::Block, |f| f.kind)
    }

    fn indent_level(&self) -> usize {
        let braces = self.frames.iter().filter(|f| f.is_brace()).count();
        let chained = self
            .frames
            .iter()
            .filter(|f| f.is_brace() && f.chained)
            .count();
        let case_bodies = self.frames.iter().filter(|f| f.case_body).count();
        braces.saturating_sub(1) + chained + case_bodies
    }

    fn write(&mut self, text: &str) {
        if self.current.is_empty() {
            self.current_indent = self.indent_level();
        }
        self.current.push_str(text);
    }

    fn space(&mut self) {
        if !self.current.is_empty() && !self.current.ends_with(' ') {
            self.current.push(' ');
        }
    }

    fn newline(&mut self) {
        if self.current.trim().is_empty() {
            self.current.clear();
            return;
        }
        let indent = " ".repeat(self.current_indent * self.options.indent_size);
        self.lines.push(format!("{}{}", indent, self.current.trim_end()));
        self.current.clear();
    }

    fn blank_line(&mut self) {
        self.newline();
        if self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(String::new());
        }
    }

    fn end_statement(&mut self) {
        let frame = self.frame();
        frame.chained = false;
        frame.ternaries = 0;
        frame.case_label = false;
        self.newline();
    }

    fn set_prev(&mut self, prev: Prev, text: &str) {
        self.prev = prev;
        self.prev_text.clear();
        self.prev_text.push_str(text);
    }

    fn pop_until(&mut self, matches: impl Fn(&FrameKind) -> bool) {
        while self.frames.len() > 1 {
            if let Some(frame) = self.frames.pop() {
                if matches(&frame.kind) {
                    break;
                }
            }
        }
    }

    fn prev_is_operand_end(&self) -> bool {
        matches!(
            self.prev,
            Prev::Word | Prev::Value | Prev::CloseParen | Prev::CloseBracket | Prev::PostfixOp
        )
    }

    /// Whether a prefix operator can appear here.
    fn expects_operand(&self) -> bool {
        match self.prev {
            Prev::Keyword => OPERAND_KEYWORDS.contains(&self.prev_text.as_str()),
            Prev::CloseBrace => false,
            _ => !self.prev_is_operand_end(),
        }
    }

    /// Space before a word, literal or prefix operator.
    fn space_before_operand(&mut self) {
        if !matches!(
            self.prev,
            Prev::None
                | Prev::OpenParen
                | Prev::OpenBracket
                | Prev::OpenBrace
                | Prev::Dot
                | Prev::PrefixOp
        ) {
            self.space();
        }
    }

    fn print(mut self, tokens: &[Token<'_>]) -> String {
        let mut newlines_before = 0usize;
        let mut index = 0;

        while index < tokens.len() {
            let token = tokens[index];
            index += 1;

            if token.kind == TokenKind::Whitespace {
                newlines_before += token.text.matches('\n').count();
                continue;
            }
            let newlines = std::mem::take(&mut newlines_before);
            self.newline_before = newlines > 0;

            if self.break_after_brace {
                self.break_after_brace = false;
                let attaches = match token.kind {
                    TokenKind::Word => BRACE_CONTINUATIONS.contains(&token.text),
                    TokenKind::Punctuation => matches!(token.text, ")" | "]" | "," | ";" | "." | "("),
                    TokenKind::Operator => {
                        self.closed_object || matches!(token.text, ":" | "=" | "?")
                    }
                    _ => false,
                };
                if !attaches {
                    self.newline();
                }
            }

            // No line break is allowed between these keywords and their operand.
            if newlines > 0
                && self.prev == Prev::Keyword
                && RESTRICTED_KEYWORDS.contains(&self.prev_text.as_str())
            {
                self.end_statement();
                self.set_prev(Prev::Semicolon, ";");
            }

            // Automatic semicolon insertion: a line break between two operands ends the statement.
            if newlines > 0
                && self.prev_is_operand_end()
                && matches!(
                    token.kind,
                    TokenKind::Word | TokenKind::String | TokenKind::Number | TokenKind::Regex
                )
                && self.frame_kind() == FrameKind::Block
            {
                self.end_statement();
            }

            if self.options.preserve_newlines
                && newlines > 1
                && self.current.is_empty()
                && !self.lines.is_empty()
                && token.text != "}"
            {
                self.blank_line();
            }

            match token.kind {
                TokenKind::LineComment => self.comment(token.text, newlines > 0, true),
                TokenKind::BlockComment => self.comment(token.text, newlines > 0, newlines > 0),
                TokenKind::Punctuation => {
                    let empty_braces = token.text == "{"
                        && tokens[index..]
                            .iter()
                            .find(|t| t.kind != TokenKind::Whitespace)
                            .is_some_and(|t| t.is("}"));
                    if empty_braces {
                        self.empty_braces();
                        while index < tokens.len() && !tokens[index].is("}") {
                            index += 1;
                        }
                        index += 1;
                    } else {
                        self.punctuation(token.text);
                    }
                }
                TokenKind::Operator => self.operator(token.text),
                TokenKind::Word => self.word(token.text),
                _ => {
                    self.space_before_operand();
                    self.write(token.text);
                    self.set_prev(Prev::Value, token.text);
                }
            }
        }

        self.newline();
        while self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
        if self.lines.is_empty() {
            return String::new();
        }
        let mut out = self.lines.join("\n");
        if self.options.end_with_newline {
            out.push('\n');
        }
        out
    }

    fn comment(&mut self, text: &str, own_line: bool, break_after: bool) {
        if own_line {
            self.newline();
            self.write(text);
        } else if self.current.is_empty() && !self.lines.is_empty() {
            // Trailing comment of a line that was already ended.
            if let Some(last) = self.lines.last_mut() {
                last.push(' ');
                last.push_str(text);
            }
            return;
        } else {
            self.space();
            self.write(text);
        }
        if break_after {
            self.newline();
        } else {
            self.space();
        }
    }

    fn word(&mut self, text: &str) {
        let prev = if VALUE_KEYWORDS.contains(&text) {
            Prev::Value
        } else if KEYWORDS.contains(&text) {
            Prev::Keyword
        } else {
            Prev::Word
        };

        if self.prev == Prev::CloseBrace {
            self.space();
        } else {
            self.space_before_operand();
        }
        if matches!(text, "case" | "default") && self.frame_kind() == FrameKind::Block {
            let frame = self.frame();
            frame.case_label = true;
            frame.case_body = false;
        }
        self.write(text);
        self.set_prev(prev, text);
    }

    fn empty_braces(&mut self) {
        if !matches!(self.prev, Prev::OpenParen | Prev::OpenBracket | Prev::None) {
            self.space();
        }
        self.closed_object = self.opens_object();
        self.write("{}");
        self.set_prev(Prev::CloseBrace, "}");
        self.break_after_brace = true;
    }

    fn opens_object(&self) -> bool {
        match self.prev {
            Prev::BinaryOp => self.prev_text != "=>",
            Prev::OpenParen | Prev::OpenBracket | Prev::Comma | Prev::Colon | Prev::PrefixOp => true,
            Prev::Keyword => matches!(
                self.prev_text.as_str(),
                "return" | "yield" | "await" | "const" | "let" | "var"
            ),
            _ => false,
        }
    }

    fn punctuation(&mut self, text: &str) {
        match text {
            "{" => {
                let kind = if self.opens_object() {
                    FrameKind::Object
                } else {
                    FrameKind::Block
                };
                if !matches!(self.prev, Prev::OpenParen | Prev::OpenBracket | Prev::None) {
                    self.space();
                }
                self.write("{");
                self.frames.push(Frame::new(kind));
                self.newline();
                self.set_prev(Prev::OpenBrace, text);
            }
            "}" => {
                self.closed_object = self.frame_kind() == FrameKind::Object;
                self.pop_until(|k| matches!(k, FrameKind::Block | FrameKind::Object));
                self.newline();
                self.write("}");
                self.set_prev(Prev::CloseBrace, text);
                self.break_after_brace = true;
            }
            "(" => {
                let space = match self.prev {
                    Prev::Keyword => PAREN_KEYWORDS.contains(&self.prev_text.as_str()),
                    Prev::BinaryOp | Prev::Comma | Prev::Colon | Prev::Semicolon => true,
                    Prev::CloseBrace => true,
                    _ => false,
                };
                if space {
                    self.space();
                }
                let for_header = self.prev == Prev::Keyword && self.prev_text == "for";
                self.write("(");
                self.frames.push(Frame::new(FrameKind::Paren { for_header }));
                self.set_prev(Prev::OpenParen, text);
            }
            ")" => {
                self.pop_until(|k| matches!(k, FrameKind::Paren { .. }));
                self.write(")");
                self.set_prev(Prev::CloseParen, text);
            }
            "[" => {
                if !matches!(
                    self.prev,
                    Prev::Word | Prev::Value | Prev::CloseParen | Prev::CloseBracket
                ) {
                    self.space_before_operand();
                }
                self.write("[");
                self.frames.push(Frame::new(FrameKind::Bracket));
                self.set_prev(Prev::OpenBracket, text);
            }
            "]" => {
                self.pop_until(|k| matches!(k, FrameKind::Bracket));
                self.write("]");
                self.set_prev(Prev::CloseBracket, text);
            }
            ";" => {
                self.write(";");
                self.set_prev(Prev::Semicolon, text);
                if matches!(self.frame_kind(), FrameKind::Paren { for_header: true }) {
                    self.space();
                } else {
                    self.end_statement();
                }
            }
            "," => {
                self.write(",");
                self.set_prev(Prev::Comma, text);
                if self.frame_kind() == FrameKind::Object {
                    self.newline();
                } else {
                    self.space();
                }
            }
            "." => self.dot("."),
            _ => {
                self.space_before_operand();
                self.write(text);
                self.set_prev(Prev::Value, text);
            }
        }
    }

    fn dot(&mut self, text: &str) {
        if self.options.break_chained_methods
            && self.prev == Prev::CloseParen
            && self.frame_kind() == FrameKind::Block
        {
            self.newline();
            self.frame().chained = true;
        }
        self.write(text);
        self.set_prev(Prev::Dot, text);
    }

    fn operator(&mut self, text: &str) {
        match text {
            "?." => self.dot(text),
            "++" | "--" if self.prev_is_operand_end() && self.newline_before => {
                // A line break before `++` or `--` makes it a prefix of the next statement.
                if self.frame_kind() == FrameKind::Block {
                    self.end_statement();
                }
                self.prefix(text);
            }
            "++" | "--" if self.prev_is_operand_end() => {
                self.write(text);
                self.set_prev(Prev::PostfixOp, text);
            }
            "!" | "~" | "++" | "--" | "..." => self.prefix(text),
            "+" | "-" if self.expects_operand() => self.prefix(text),
            "?" => {
                self.frame().ternaries += 1;
                self.binary(text);
            }
            ":" => self.colon(),
            _ => self.binary(text),
        }
    }

    fn prefix(&mut self, text: &str) {
        self.space_before_operand();
        self.write(text);
        self.set_prev(Prev::PrefixOp, text);
    }

    fn binary(&mut self, text: &str) {
        self.space();
        self.write(text);
        self.space();
        self.set_prev(Prev::BinaryOp, text);
    }

    fn colon(&mut self) {
        let frame = self.frame();
        if frame.ternaries > 0 {
            frame.ternaries -= 1;
            self.binary(":");
        } else if frame.case_label {
            frame.case_label = false;
            frame.case_body = true;
            self.write(":");
            self.set_prev(Prev::Colon, ":");
            self.newline();
        } else {
            self.write(":");
            self.set_prev(Prev::Colon, ":");
            self.space();
        }
    }
}

/// Re-indents JavaScript source.
pub fn beautify(source: &str, options: &BeautifyOptions) -> String {
    let tokens = tokenize(source);
    Printer::new(options).print(&tokens)
}
