//! JavaScript tokenizer for the beautifier.
//!
//! The lexer only needs to tell code apart from strings, comments and
//! regular expressions; it never rejects input. Anything it does not
//! recognize becomes a one-character [`TokenKind::Other`] token.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while, take_while1},
    character::complete::{char, digit0, digit1, hex_digit1, multispace1, not_line_ending, one_of},
    combinator::{opt, recognize},
    sequence::preceded,
    IResult, Parser,
};

/// Lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Whitespace,
    LineComment,
    BlockComment,
    /// A quoted string or template literal.
    String,
    Regex,
    Number,
    /// An identifier or keyword.
    Word,
    Operator,
    Punctuation,
    Other,
}

impl TokenKind {
    /// Returns true for tokens that carry no code.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment
        )
    }
}

/// A slice of the input with its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str) -> Self {
        Self { kind, text }
    }

    /// Returns true if this is the punctuation or operator `text`.
    pub fn is(&self, text: &str) -> bool {
        matches!(self.kind, TokenKind::Punctuation | TokenKind::Operator) && self.text == text
    }
}

/// Operators, longest first so that the first match wins.
const OPERATORS: &[&str] = &[
    ">>>=", "===", "!==", "**=", "...", "<<=", ">>=", ">>>", "&&=", "||=", "??=", "=>", "==",
    "!=", "<=", ">=", "&&", "||", "??", "?.", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=",
    "|=", "^=", "<<", ">>", "**", "::", "->", "+", "-", "*", "/", "%", "=", "<", ">", "!", "&",
    "|", "^", "~", "?", ":",
];

const PUNCTUATION: &str = "(){}[];,.@";

/// Words in front of which a `/` starts a regular expression.
const REGEX_PREFIX_WORDS: &[&str] = &[
    "return", "typeof", "case", "in", "of", "delete", "void", "throw", "new", "yield", "await",
];

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn word(input: &str) -> IResult<&str, &str> {
    recognize((take_while1(is_word_start), take_while(is_word_char))).parse(input)
}

fn exponent(input: &str) -> IResult<&str, &str> {
    recognize((one_of("eE"), opt(one_of("+-")), digit1)).parse(input)
}

fn hex_number(input: &str) -> IResult<&str, &str> {
    recognize((char('0'), one_of("xX"), hex_digit1)).parse(input)
}

fn decimal_number(input: &str) -> IResult<&str, &str> {
    recognize((
        alt((
            recognize((digit1, opt((char('.'), digit0)))),
            recognize((char('.'), digit1)),
        )),
        opt(exponent),
    ))
    .parse(input)
}

/// Parses a number with an optional type suffix such as `f`, `u` or `n`.
fn number(input: &str) -> IResult<&str, &str> {
    recognize((
        alt((hex_number, decimal_number)),
        take_while(|c: char| c.is_ascii_alphabetic() || c == '_'),
    ))
    .parse(input)
}

fn line_comment(input: &str) -> IResult<&str, &str> {
    recognize(preceded(tag("//"), not_line_ending)).parse(input)
}

/// Parses a block comment; an unterminated comment runs to end of input.
fn block_comment(input: &str) -> IResult<&str, &str> {
    let (rest, _) = tag::<_, _, nom::error::Error<&str>>("/*").parse(input)?;
    match (take_until::<_, _, nom::error::Error<&str>>("*/"), tag("*/")).parse(rest) {
        Ok((after, _)) => Ok((after, &input[..input.len() - after.len()])),
        Err(_) => Ok(("", input)),
    }
}

fn operator(input: &str) -> IResult<&str, &str> {
    for op in OPERATORS {
        if let Ok(result) = tag::<_, _, nom::error::Error<&str>>(*op).parse(input) {
            return Ok(result);
        }
    }
    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Tag,
    )))
}

/// Returns the byte length of a quoted string starting at `input`.
///
/// Ordinary strings stop at an unescaped newline; template literals may span
/// lines and contain `${ ... }` substitutions with nested strings.
fn quoted_len(input: &str, quote: char) -> usize {
    let mut chars = input.char_indices().skip(1).peekable();
    let mut depth = 0usize;
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '\n' if quote != '`' => return i,
            '$' if quote == '`' && depth == 0 && chars.peek().map(|&(_, n)| n) == Some('{') => {
                chars.next();
                depth = 1;
            }
            '{' if depth > 0 => depth += 1,
            '}' if depth > 0 => depth -= 1,
            '"' | '\'' | '`' if depth > 0 => {
                let len = quoted_len(&input[i..], c);
                while chars.peek().is_some_and(|&(j, _)| j < i + len) {
                    chars.next();
                }
            }
            c if c == quote && depth == 0 => return i + c.len_utf8(),
            _ => {}
        }
    }
    input.len()
}

/// Returns the byte length of a regular expression literal, if one starts here.
fn regex_len(input: &str) -> Option<usize> {
    let mut in_class = false;
    let mut chars = input.char_indices().skip(1);
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '\n' => return None,
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => {
                if i == 1 {
                    return None;
                }
                let flags = input[i + 1..]
                    .chars()
                    .take_while(|c| c.is_ascii_alphabetic())
                    .count();
                return Some(i + 1 + flags);
            }
            _ => {}
        }
    }
    None
}

/// Splits JavaScript into tokens. Concatenating the token texts yields the input.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer { tokens: Vec::new() }.run(input)
}

struct Lexer<'a> {
    tokens: Vec<Token<'a>>,
}

impl<'a> Lexer<'a> {
    fn run(mut self, mut input: &'a str) -> Vec<Token<'a>> {
        while !input.is_empty() {
            let (kind, len) = self.next_token(input);
            let (text, rest) = input.split_at(len);
            self.tokens.push(Token::new(kind, text));
            input = rest;
        }
        self.tokens
    }

    fn previous_code(&self) -> Option<&Token<'a>> {
        self.tokens.iter().rev().find(|t| !t.kind.is_trivia())
    }

    fn regex_allowed(&self) -> bool {
        match self.previous_code() {
            None => true,
            Some(t) => match t.kind {
                TokenKind::Operator => true,
                TokenKind::Punctuation => !matches!(t.text, ")" | "]" | "}"),
                TokenKind::Word => REGEX_PREFIX_WORDS.contains(&t.text),
                _ => false,
            },
        }
    }

    fn next_token(&self, input: &'a str) -> (TokenKind, usize) {
        let consumed = |rest: &str| input.len() - rest.len();

        if let Ok((rest, _)) = multispace1::<_, nom::error::Error<&str>>(input) {
            return (TokenKind::Whitespace, consumed(rest));
        }

        if let Ok((rest, _)) = line_comment(input) {
            return (TokenKind::LineComment, consumed(rest));
        }

        if let Ok((rest, _)) = block_comment(input) {
            return (TokenKind::BlockComment, consumed(rest));
        }

        let Some(first) = input.chars().next() else {
            return (TokenKind::Other, 0);
        };

        if matches!(first, '\'' | '"' | '`') {
            return (TokenKind::String, quoted_len(input, first));
        }

        if first == '/' && self.regex_allowed() {
            if let Some(len) = regex_len(input) {
                return (TokenKind::Regex, len);
            }
        }

        if let Ok((rest, _)) = number(input) {
            return (TokenKind::Number, consumed(rest));
        }

        if let Ok((rest, _)) = word(input) {
            return (TokenKind::Word, consumed(rest));
        }

        if PUNCTUATION.contains(first) {
            return (TokenKind::Punctuation, first.len_utf8());
        }

        if let Ok((rest, _)) = operator(input) {
            return (TokenKind::Operator, consumed(rest));
        }

        (TokenKind::Other, first.len_utf8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(input: &str) -> Vec<(TokenKind, &str)> {
        tokenize(input)
            .into_iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn test_round_trips_input() {
        let input = "const x = `a ${b + \"}\"} c`; // done\n/* block */ y /= 2;";
        let joined: String = tokenize(input).iter().map(|t| t.text).collect();
        assert_eq!(joined, input);
    }

    #[test]
    fn test_basic_statement() {
        assert_eq!(
            kinds("let a = b.c(1.5e3);"),
            vec![
                (TokenKind::Word, "let"),
                (TokenKind::Word, "a"),
                (TokenKind::Operator, "="),
                (TokenKind::Word, "b"),
                (TokenKind::Punctuation, "."),
                (TokenKind::Word, "c"),
                (TokenKind::Punctuation, "("),
                (TokenKind::Number, "1.5e3"),
                (TokenKind::Punctuation, ")"),
                (TokenKind::Punctuation, ";"),
            ]
        );
    }

    #[test]
    fn test_longest_operator_wins() {
        assert_eq!(
            kinds("a === b >>>= c => d"),
            vec![
                (TokenKind::Word, "a"),
                (TokenKind::Operator, "==="),
                (TokenKind::Word, "b"),
                (TokenKind::Operator, ">>>="),
                (TokenKind::Word, "c"),
                (TokenKind::Operator, "=>"),
                (TokenKind::Word, "d"),
            ]
        );
    }

    #[test]
    fn test_strings_and_escapes() {
        assert_eq!(
            kinds(r#"'it\'s' "a\"b""#),
            vec![(TokenKind::String, r#"'it\'s'"#), (TokenKind::String, r#""a\"b""#)]
        );
    }

    #[test]
    fn test_unterminated_string_stops_at_newline() {
        let tokens = kinds("'open\nx");
        assert_eq!(tokens[0], (TokenKind::String, "'open"));
        assert_eq!(tokens[1], (TokenKind::Word, "x"));
    }

    #[test]
    fn test_template_literal_spans_lines() {
        let tokens = kinds("`line 1\nline ${a + `${b}`} 2`;");
        assert_eq!(tokens[0], (TokenKind::String, "`line 1\nline ${a + `${b}`} 2`"));
        assert_eq!(tokens[1], (TokenKind::Punctuation, ";"));
    }

    #[test]
    fn test_regex_versus_division() {
        assert_eq!(kinds("x = /ab+c/gi;")[2], (TokenKind::Regex, "/ab+c/gi"));
        assert_eq!(kinds("x = a / b / c;")[3], (TokenKind::Operator, "/"));
        assert_eq!(kinds("return /[/]/.test(s);")[1], (TokenKind::Regex, "/[/]/"));
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            kinds("a; // note\n/* multi\nline */ b"),
            vec![
                (TokenKind::Word, "a"),
                (TokenKind::Punctuation, ";"),
                (TokenKind::LineComment, "// note"),
                (TokenKind::BlockComment, "/* multi\nline */"),
                (TokenKind::Word, "b"),
            ]
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        assert_eq!(kinds("/* open"), vec![(TokenKind::BlockComment, "/* open")]);
    }

    #[test]
    fn test_hash_is_other() {
        let tokens = kinds("a #b");
        assert_eq!(tokens[1], (TokenKind::Other, "#"));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(kinds("0xFF")[0], (TokenKind::Number, "0xFF"));
        assert_eq!(kinds(".5")[0], (TokenKind::Number, ".5"));
        assert_eq!(kinds("1.0f")[0], (TokenKind::Number, "1.0f"));
        assert_eq!(kinds("10n")[0], (TokenKind::Number, "10n"));
    }
}
