//! Path expression parser.

use super::{Output, PathSyntaxError, Segment, Selector};

pub(crate) struct Parsed {
    pub segments: Vec<Segment>,
    pub output: Output,
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

pub(crate) fn parse(expr: &str) -> Result<Parsed, PathSyntaxError> {
    let src = expr.trim();
    if src.is_empty() {
        return Err(PathSyntaxError::Empty);
    }
    if !src.starts_with('$') {
        return Err(PathSyntaxError::MissingRoot);
    }

    let mut p = Parser { src, pos: 1 };
    let mut segments = Vec::new();

    loop {
        match p.peek() {
            None => return Ok(Parsed { segments, output: Output::Paths }),
            Some('+') => {
                p.bump();
                if p.peek().is_some() {
                    return Err(PathSyntaxError::TrailingInput { pos: p.pos });
                }
                return Ok(Parsed { segments, output: Output::Values });
            }
            Some('.') => {
                p.bump();
                if p.eat('.') {
                    let selector = if p.peek() == Some('[') { p.bracket()? } else { p.dotted()? };
                    segments.push(Segment::Descendant(selector));
                } else {
                    segments.push(Segment::Child(p.dotted()?));
                }
            }
            Some('[') => segments.push(Segment::Child(p.bracket()?)),
            Some(found) => return Err(PathSyntaxError::UnexpectedChar { pos: p.pos, found }),
        }
    }
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), PathSyntaxError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(found) => Err(PathSyntaxError::UnexpectedChar { pos: self.pos, found }),
            None => Err(PathSyntaxError::UnexpectedEnd),
        }
    }

    /// Selector after `.` or `..`: `*`, a bare name, or a quoted name.
    fn dotted(&mut self) -> Result<Selector, PathSyntaxError> {
        match self.peek() {
            None => Err(PathSyntaxError::UnexpectedEnd),
            Some('*') => {
                self.bump();
                Ok(Selector::Wildcard)
            }
            Some('"' | '\'') => Ok(Selector::Keys(vec![self.quoted()?])),
            Some(_) => {
                let start = self.pos;
                while self.peek().is_some_and(|c| !matches!(c, '.' | '[' | ']' | '+') && !c.is_whitespace()) {
                    self.bump();
                }
                if self.pos == start {
                    return Err(PathSyntaxError::EmptySelector { pos: start });
                }
                Ok(Selector::Keys(vec![self.src[start..self.pos].to_string()]))
            }
        }
    }

    /// `[ ... ]` selector: wildcard, key list, index list, or slice.
    fn bracket(&mut self) -> Result<Selector, PathSyntaxError> {
        let open = self.pos;
        self.expect('[')?;
        self.skip_ws();

        let selector = match self.peek() {
            None => return Err(PathSyntaxError::UnexpectedEnd),
            Some(']') => return Err(PathSyntaxError::EmptySelector { pos: open }),
            Some('*') => {
                self.bump();
                Selector::Wildcard
            }
            Some('"' | '\'') => {
                let mut keys = vec![self.quoted()?];
                self.skip_ws();
                while self.eat(',') {
                    self.skip_ws();
                    keys.push(self.quoted()?);
                    self.skip_ws();
                }
                Selector::Keys(keys)
            }
            Some(c) if c == '-' || c == ':' || c.is_ascii_digit() => self.indices()?,
            Some(found) => return Err(PathSyntaxError::UnexpectedChar { pos: self.pos, found }),
        };

        self.skip_ws();
        self.expect(']')?;
        Ok(selector)
    }

    fn indices(&mut self) -> Result<Selector, PathSyntaxError> {
        let first = self.integer()?;
        self.skip_ws();

        if self.eat(':') {
            self.skip_ws();
            let end = self.integer()?;
            return Ok(Selector::Slice { start: first, end });
        }

        let mut indices = vec![first.ok_or(PathSyntaxError::EmptySelector { pos: self.pos })?];
        while self.eat(',') {
            self.skip_ws();
            indices.push(self.integer()?.ok_or(PathSyntaxError::EmptySelector { pos: self.pos })?);
            self.skip_ws();
        }
        Ok(Selector::Indices(indices))
    }

    /// Optional signed integer.
    fn integer(&mut self) -> Result<Option<i64>, PathSyntaxError> {
        let start = self.pos;
        self.eat('-');
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }

        let text = &self.src[start..self.pos];
        if text.is_empty() {
            return Ok(None);
        }
        text.parse()
            .map(Some)
            .map_err(|_| PathSyntaxError::InvalidIndex { pos: start, text: text.to_string() })
    }

    /// Single- or double-quoted name with backslash escapes.
    fn quoted(&mut self) -> Result<String, PathSyntaxError> {
        let start = self.pos;
        let quote = match self.bump() {
            Some(q @ ('"' | '\'')) => q,
            Some(found) => return Err(PathSyntaxError::UnexpectedChar { pos: start, found }),
            None => return Err(PathSyntaxError::UnexpectedEnd),
        };

        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(PathSyntaxError::UnterminatedQuote { pos: start }),
                Some('\\') => match self.bump() {
                    Some(c) => out.push(c),
                    None => return Err(PathSyntaxError::UnterminatedQuote { pos: start }),
                },
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
            }
        }
    }
}
