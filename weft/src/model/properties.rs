//! Code fence info strings.
//!
//! Parses info strings like `js {fragment="create wombat"}` into a language
//! and a brace group of properties.

use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, tag, take_while1},
    character::complete::{char, multispace0, multispace1, none_of},
    combinator::{map, opt, value},
    multi::separated_list0,
    sequence::{delimited, preceded},
    IResult, Parser,
};

/// A single property inside the brace group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Property {
    /// A class property, e.g., `.hidden`
    Class(String),
    /// An ID property, e.g., `#main`
    Id(String),
    /// A key-value attribute, e.g., `fragment="create wombat"`
    Attribute(String, String),
}

impl Property {
    /// Returns the key-value pair if this is an attribute.
    pub fn as_attribute(&self) -> Option<(&str, &str)> {
        match self {
            Property::Attribute(k, v) => Some((k, v)),
            _ => None,
        }
    }

    /// Returns the ID if this is an ID property.
    pub fn as_id(&self) -> Option<&str> {
        match self {
            Property::Id(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the class name if this is a class property.
    pub fn as_class(&self) -> Option<&str> {
        match self {
            Property::Class(s) => Some(s),
            _ => None,
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == ':' || c == '/' || c == '.'
}

fn parse_ident(input: &str) -> IResult<&str, &str> {
    take_while1(is_ident_char).parse(input)
}

fn parse_class(input: &str) -> IResult<&str, Property> {
    map(preceded(char('.'), parse_ident), |s: &str| {
        Property::Class(s.to_string())
    })
    .parse(input)
}

fn parse_id(input: &str) -> IResult<&str, Property> {
    map(preceded(char('#'), parse_ident), |s: &str| {
        Property::Id(s.to_string())
    })
    .parse(input)
}

/// Parse a quoted string value with escape handling.
fn parse_quoted_string(input: &str) -> IResult<&str, String> {
    let (rest, _) = char('"').parse(input)?;
    // An empty string has nothing for escaped_transform to consume.
    if let Some(after) = rest.strip_prefix('"') {
        return Ok((after, String::new()));
    }
    let (rest, content) = escaped_transform(
        none_of("\\\""),
        '\\',
        alt((
            value("\\", tag("\\")),
            value("\"", tag("\"")),
            value("\n", tag("n")),
            value("\t", tag("t")),
            value("\r", tag("r")),
        )),
    )
    .parse(rest)?;
    let (rest, _) = char('"').parse(rest)?;
    Ok((rest, content))
}

fn parse_unquoted_value(input: &str) -> IResult<&str, String> {
    map(parse_ident, |s: &str| s.to_string()).parse(input)
}

/// Parse an attribute: `key=value`, `key = "value"`.
fn parse_attribute(input: &str) -> IResult<&str, Property> {
    map(
        (
            parse_ident,
            multispace0,
            char('='),
            multispace0,
            alt((parse_quoted_string, parse_unquoted_value)),
        ),
        |(key, _, _, _, val)| Property::Attribute(key.to_string(), val),
    )
    .parse(input)
}

fn parse_property(input: &str) -> IResult<&str, Property> {
    alt((parse_class, parse_id, parse_attribute)).parse(input)
}

/// Parse a brace group: `{ prop prop ... }`.
fn parse_group(input: &str) -> IResult<&str, Vec<Property>> {
    delimited(
        (char('{'), multispace0),
        separated_list0(multispace1, parse_property),
        (multispace0, char('}')),
    )
    .parse(input)
}

/// Parse the language word: everything up to whitespace or a brace.
fn parse_language(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && c != '{').parse(input)
}

fn parse_info_inner(input: &str) -> IResult<&str, (Option<&str>, Option<Vec<Property>>)> {
    let (input, _) = multispace0.parse(input)?;
    let (input, language) = opt(parse_language).parse(input)?;
    let (input, _) = multispace0.parse(input)?;
    let (input, group) = opt(parse_group).parse(input)?;
    let (input, _) = multispace0.parse(input)?;
    Ok((input, (language, group)))
}

/// Properties from a brace group, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    /// All properties in order.
    pub items: Vec<Property>,
}

impl Properties {
    /// Creates a new Properties from a list of Property items.
    pub fn new(items: Vec<Property>) -> Self {
        Self { items }
    }

    /// Returns true if the fence had no (or an empty) brace group.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns all attributes as key-value pairs.
    pub fn attributes(&self) -> Vec<(&str, &str)> {
        self.items.iter().filter_map(|p| p.as_attribute()).collect()
    }

    /// Gets an attribute value by key.
    pub fn get_attribute(&self, key: &str) -> Option<&str> {
        self.items.iter().find_map(|p| match p {
            Property::Attribute(k, v) if k == key => Some(v.as_str()),
            _ => None,
        })
    }

    /// Returns the first ID.
    pub fn first_id(&self) -> Option<&str> {
        self.items.iter().find_map(|p| p.as_id())
    }

    /// Returns true if the class is present.
    pub fn has_class(&self, class: &str) -> bool {
        self.items.iter().any(|p| p.as_class() == Some(class))
    }

    /// Name of the fragment this fence contributes to.
    ///
    /// The `fragment` attribute wins; otherwise the value of the first
    /// attribute is used, whatever its key.
    pub fn fragment_name(&self) -> Option<&str> {
        self.get_attribute("fragment")
            .or_else(|| self.attributes().first().map(|(_, v)| *v))
    }
}

/// A parsed code fence info string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FenceInfo {
    /// The language word, if any.
    pub language: Option<String>,
    /// The brace group properties.
    pub properties: Properties,
}

impl FenceInfo {
    /// Parses an info string such as `js {fragment="root"}`.
    pub fn parse(input: &str) -> Result<Self, String> {
        match parse_info_inner(input) {
            Ok(("", (language, group))) => Ok(Self {
                language: language.map(str::to_string),
                properties: Properties::new(group.unwrap_or_default()),
            }),
            Ok((remaining, _)) => Err(format!("Unexpected input: '{}'", remaining)),
            Err(e) => Err(format!("Parse error: {}", e)),
        }
    }

    /// Returns true if the language matches, ignoring ASCII case.
    pub fn is_language(&self, language: &str) -> bool {
        self.language
            .as_deref()
            .is_some_and(|l| l.eq_ignore_ascii_case(language))
    }
}
