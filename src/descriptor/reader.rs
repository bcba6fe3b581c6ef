//! Descriptor parsing.
//!
//! Reads an existing module descriptor back into an [`Element`] tree so a
//! merge can start from it. The grammar is the small XML subset those files
//! actually use: nested elements, quoted attributes, text content, comments,
//! and the five predefined entities plus numeric character references. No
//! DTDs, namespaces, or processing instructions beyond the leading
//! declaration; this is deliberately not a general XML editor.

use miette::Diagnostic;
use thiserror::Error;

use crate::descriptor::Element;

/// Error raised when an existing descriptor cannot be parsed.
///
/// This is fatal for the module being synced: a file we cannot read cannot
/// be merged without destroying whatever the user put there.
#[derive(Debug, Error, Diagnostic)]
#[error("{kind} at line {line}, column {column}")]
#[diagnostic(
    code(berth::descriptor::malformed),
    help("fix or delete the existing descriptor, or rerun with --overwrite to regenerate it")
)]
pub struct ParseError {
    kind: ParseErrorKind,
    line: usize,
    column: usize,
}

#[derive(Debug)]
enum ParseErrorKind {
    UnexpectedEnd,
    Expected(char),
    ElementNameExpected,
    MismatchedClosingTag { open: String, close: String },
    InvalidEntity(String),
    ContentAfterRoot,
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorKind::UnexpectedEnd => write!(f, "unexpected end of input"),
            ParseErrorKind::Expected(c) => write!(f, "expected `{}`", c),
            ParseErrorKind::ElementNameExpected => write!(f, "expected an element name"),
            ParseErrorKind::MismatchedClosingTag { open, close } => {
                write!(f, "closing tag `</{}>` does not match `<{}>`", close, open)
            }
            ParseErrorKind::InvalidEntity(e) => write!(f, "invalid entity reference `&{};`", e),
            ParseErrorKind::ContentAfterRoot => write!(f, "content after the root element"),
        }
    }
}

/// Parse a descriptor document into its root element.
pub fn parse_document(input: &str) -> Result<Element, ParseError> {
    let mut cursor = Cursor::new(input);
    cursor.skip_prolog()?;
    let root = cursor.parse_element()?;
    cursor.skip_misc();
    if !cursor.at_end() {
        return Err(cursor.error(ParseErrorKind::ContentAfterRoot));
    }
    Ok(root)
}

struct Cursor {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Cursor {
    fn new(input: &str) -> Self {
        Cursor {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            kind,
            line: self.line,
            column: self.column,
        }
    }

    fn starts_with(&self, s: &str) -> bool {
        s.chars()
            .enumerate()
            .all(|(i, c)| self.chars.get(self.pos + i) == Some(&c))
    }

    fn expect(&mut self, c: char) -> Result<(), ParseError> {
        match self.peek() {
            Some(found) if found == c => {
                self.bump();
                Ok(())
            }
            Some(_) => Err(self.error(ParseErrorKind::Expected(c))),
            None => Err(self.error(ParseErrorKind::UnexpectedEnd)),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    /// Skip everything up to and including the given terminator.
    fn skip_until(&mut self, terminator: &str) -> Result<(), ParseError> {
        while !self.at_end() {
            if self.starts_with(terminator) {
                for _ in terminator.chars() {
                    self.bump();
                }
                return Ok(());
            }
            self.bump();
        }
        Err(self.error(ParseErrorKind::UnexpectedEnd))
    }

    /// Skip the XML declaration, doctype, comments, and whitespace before the
    /// root element.
    fn skip_prolog(&mut self) -> Result<(), ParseError> {
        loop {
            self.skip_whitespace();
            if self.starts_with("<?") {
                self.skip_until("?>")?;
            } else if self.starts_with("<!--") {
                self.skip_until("-->")?;
            } else if self.starts_with("<!") {
                self.skip_until(">")?;
            } else {
                return Ok(());
            }
        }
    }

    /// Skip trailing whitespace and comments after the root element.
    fn skip_misc(&mut self) {
        loop {
            self.skip_whitespace();
            if self.starts_with("<!--") && self.skip_until("-->").is_ok() {
                continue;
            }
            return;
        }
    }

    fn is_name_char(c: char) -> bool {
        c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')
    }

    fn parse_name(&mut self) -> Result<String, ParseError> {
        let mut name = String::new();
        while matches!(self.peek(), Some(c) if Self::is_name_char(c)) {
            name.push(self.bump().unwrap());
        }
        if name.is_empty() {
            return Err(self.error(ParseErrorKind::ElementNameExpected));
        }
        Ok(name)
    }

    fn parse_element(&mut self) -> Result<Element, ParseError> {
        self.expect('<')?;
        let name = self.parse_name()?;
        let mut element = Element::new(&name);

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('/') => {
                    self.bump();
                    self.expect('>')?;
                    return Ok(element);
                }
                Some('>') => {
                    self.bump();
                    self.parse_content(&mut element, &name)?;
                    return Ok(element);
                }
                Some(_) => {
                    let attr = self.parse_name()?;
                    self.skip_whitespace();
                    self.expect('=')?;
                    self.skip_whitespace();
                    let value = self.parse_quoted()?;
                    element.set_attribute(attr, value);
                }
                None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
            }
        }
    }

    fn parse_content(&mut self, element: &mut Element, open_name: &str) -> Result<(), ParseError> {
        let mut text = String::new();
        loop {
            if self.starts_with("</") {
                self.bump();
                self.bump();
                let close = self.parse_name()?;
                if close != open_name {
                    return Err(self.error(ParseErrorKind::MismatchedClosingTag {
                        open: open_name.to_string(),
                        close,
                    }));
                }
                self.skip_whitespace();
                self.expect('>')?;
                break;
            } else if self.starts_with("<!--") {
                self.skip_until("-->")?;
            } else if self.peek() == Some('<') {
                let child = self.parse_element()?;
                element.push_child(child);
            } else if self.peek().is_none() {
                return Err(self.error(ParseErrorKind::UnexpectedEnd));
            } else {
                match self.bump() {
                    Some('&') => text.push(self.parse_entity()?),
                    Some(c) => text.push(c),
                    None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
                }
            }
        }

        // Mixed content is not part of the descriptor schema; text in an
        // element that also has children is insignificant whitespace.
        let trimmed = text.trim();
        if element.children().is_empty() && !trimmed.is_empty() {
            element.set_text(trimmed);
        }
        Ok(())
    }

    fn parse_quoted(&mut self) -> Result<String, ParseError> {
        let quote = match self.peek() {
            Some(c @ ('"' | '\'')) => c,
            Some(_) => return Err(self.error(ParseErrorKind::Expected('"'))),
            None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
        };
        self.bump();

        let mut value = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(value),
                Some('&') => value.push(self.parse_entity()?),
                Some(c) => value.push(c),
                None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
            }
        }
    }

    /// Decode an entity reference; the leading `&` has been consumed.
    fn parse_entity(&mut self) -> Result<char, ParseError> {
        let mut entity = String::new();
        loop {
            match self.bump() {
                Some(';') => break,
                Some(c) if entity.len() < 10 => entity.push(c),
                Some(_) => return Err(self.error(ParseErrorKind::InvalidEntity(entity))),
                None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
            }
        }

        let decoded = match entity.as_str() {
            "lt" => '<',
            "gt" => '>',
            "amp" => '&',
            "quot" => '"',
            "apos" => '\'',
            numeric => {
                let code = if let Some(hex) = numeric.strip_prefix("#x") {
                    u32::from_str_radix(hex, 16).ok()
                } else if let Some(dec) = numeric.strip_prefix('#') {
                    dec.parse::<u32>().ok()
                } else {
                    None
                };
                match code.and_then(char::from_u32) {
                    Some(c) => c,
                    None => return Err(self.error(ParseErrorKind::InvalidEntity(entity))),
                }
            }
        };
        Ok(decoded)
    }
}
