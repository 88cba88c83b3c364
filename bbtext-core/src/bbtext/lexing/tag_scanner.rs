//! Tag scanner
//!
//! Scans the text following a `[` for one of
//!
//!     [name]
//!     [name key="value" other="value"]
//!     [name=value]  or  [name="value"]
//!     [/name]
//!
//! Names are `[A-Za-z][A-Za-z0-9_-]*`. Whitespace means spaces and tabs; a line break,
//! an unterminated quote or the end of input before `]` fails the scan.

/// A tag as written, before names are canonicalised and attribute keys are checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawTag {
    pub closing: bool,
    pub name: String,
    pub attributes: Vec<(String, String)>,
    /// Value of the `[name=value]` shorthand.
    pub shorthand: Option<String>,
}

/// Scan a tag from `rest`, the input directly after the opening `[`.
///
/// Returns the tag and the number of bytes consumed from `rest`, closing `]` included.
pub(crate) fn scan_tag(rest: &str) -> Option<(RawTag, usize)> {
    let mut cursor = Cursor { src: rest, pos: 0 };

    let closing = cursor.eat('/');
    let name = cursor.identifier()?;
    let mut tag = RawTag {
        closing,
        name,
        attributes: Vec::new(),
        shorthand: None,
    };

    if closing {
        cursor.skip_whitespace();
        cursor.expect(']')?;
        return Some((tag, cursor.pos));
    }

    if cursor.eat('=') {
        let value = if cursor.peek() == Some('"') {
            cursor.quoted()?
        } else {
            cursor.bare_value()?
        };
        tag.shorthand = Some(value);
        cursor.skip_whitespace();
        cursor.expect(']')?;
        return Some((tag, cursor.pos));
    }

    loop {
        let separated = cursor.skip_whitespace();
        if cursor.eat(']') {
            return Some((tag, cursor.pos));
        }
        if !separated {
            return None;
        }
        let key = cursor.identifier()?;
        cursor.expect('=')?;
        let value = cursor.quoted()?;
        tag.attributes.push((key, value));
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Option<()> {
        self.eat(expected).then_some(())
    }

    /// Returns whether any whitespace was skipped.
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn identifier(&mut self) -> Option<String> {
        let start = self.pos;
        match self.peek() {
            Some(ch) if ch.is_ascii_alphabetic() => self.pos += 1,
            _ => return None,
        }
        while matches!(self.peek(), Some(ch) if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
        {
            self.pos += 1;
        }
        Some(self.src[start..self.pos].to_string())
    }

    /// A double quoted value. A backslash escapes `"`, `\` or a line break; before
    /// any other character it is literal.
    fn quoted(&mut self) -> Option<String> {
        self.expect('"')?;
        let mut value = String::new();
        loop {
            match self.bump()? {
                '"' => return Some(value),
                '\n' | '\r' => return None,
                '\\' => match self.peek() {
                    Some(ch @ ('"' | '\\' | '\n' | '\r')) => {
                        self.pos += ch.len_utf8();
                        value.push(ch);
                    }
                    _ => value.push('\\'),
                },
                ch => value.push(ch),
            }
        }
    }

    fn bare_value(&mut self) -> Option<String> {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if matches!(ch, ']' | '"' | '[' | '\n' | '\r') || ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
        (self.pos > start).then(|| self.src[start..self.pos].to_string())
    }
}
