//! Byte-level cursor and tokenizer for MINION text.
//!
//! The cursor reads the input one byte at a time, tracking the current line
//! and the byte offset within it. Outside delimited strings, `\r` and `\t`
//! are normalized to spaces and `\n` acts as a separator; inside delimited
//! strings a raw newline is an error. Any other byte below 32, and byte 127,
//! is rejected wherever it appears.
//!
//! [`Cursor::next_token`] is the single dispatch point: it skips whitespace
//! and comments, decodes delimited strings (including all escapes), collects
//! bare strings, classifies macro names, and returns structural tokens.
//! Lists and maps are not assembled here; the parser recurses on
//! [`Token::ListStart`] / [`Token::MapStart`].

use crate::error::{Error, Result};

/// A position in the input: 1-based line, byte offset within that line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Pos {
    pub line: usize,
    pub byte: usize,
}

/// One lexical item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Token {
    /// A decoded delimited string or a bare string.
    Str(String),
    /// A macro name (the bare token after the `&` sigil, sigil stripped).
    Macro(String),
    ListStart,
    ListEnd,
    MapStart,
    MapEnd,
    Comma,
    Colon,
    End,
}

pub(crate) struct Cursor<'a> {
    input: &'a str,
    index: usize,
    line_index: usize,
    line_start: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Cursor {
            input,
            index: 0,
            line_index: 0,
            line_start: 0,
        }
    }

    /// Current position: 1-based line, byte offset within the line.
    pub(crate) fn here(&self) -> Pos {
        Pos {
            line: self.line_index + 1,
            byte: self.index - self.line_start,
        }
    }

    /// Up to 80 bytes of input preceding the cursor, clipped to UTF-8
    /// code-point boundaries.
    pub(crate) fn context(&self) -> String {
        let mut end = self.index.min(self.input.len());
        while end > 0 && !self.input.is_char_boundary(end) {
            end -= 1;
        }
        let mut start = end.saturating_sub(80);
        while !self.input.is_char_boundary(start) {
            start += 1;
        }
        self.input[start..end].to_string()
    }

    pub(crate) fn lex_err<T>(&self, pos: Pos, msg: impl Into<String>) -> Result<T> {
        Err(Error::lex(pos.line, pos.byte, msg, self.context()))
    }

    pub(crate) fn syntax_err<T>(&self, pos: Pos, msg: impl Into<String>) -> Result<T> {
        Err(Error::syntax(pos.line, pos.byte, msg, self.context()))
    }

    pub(crate) fn semantic_err<T>(&self, pos: Pos, msg: impl Into<String>) -> Result<T> {
        Err(Error::semantic(pos.line, pos.byte, msg, self.context()))
    }

    /// Reads one byte, or `None` at end of input.
    ///
    /// Outside strings, `\r`/`\t` come back as `' '` and `\n` as itself
    /// (after bumping the line counter). Inside strings a raw newline is an
    /// error and `\r`/`\t` pass through. Any other byte below 32, and byte
    /// 127, is illegal everywhere.
    fn read_byte(&mut self, in_string: bool) -> Result<Option<u8>> {
        let Some(&ch) = self.input.as_bytes().get(self.index) else {
            return Ok(None);
        };
        let pos = self.here();
        self.index += 1;
        if ch == b'\n' {
            self.line_index += 1;
            self.line_start = self.index;
            if in_string {
                return self.lex_err(pos, "unexpected newline in delimited string");
            }
            return Ok(Some(b'\n'));
        }
        if ch == b'\r' || ch == b'\t' {
            if in_string {
                return Ok(Some(ch));
            }
            return Ok(Some(b' '));
        }
        if ch >= 32 && ch != 127 {
            return Ok(Some(ch));
        }
        self.lex_err(pos, format!("illegal character (byte) 0x{:02X}", ch))
    }

    /// Pushes back the byte just read. Never called with a newline.
    fn unread_one(&mut self) {
        assert!(self.index > 0, "unread_one reached start of input");
        self.index -= 1;
        debug_assert!(self.input.as_bytes()[self.index] != b'\n');
    }

    /// Reads the next lexical item.
    pub(crate) fn next_token(&mut self) -> Result<Token> {
        loop {
            let ch = match self.read_byte(false)? {
                Some(c) => c,
                None => return Ok(Token::End),
            };
            match ch {
                b' ' | b'\n' => continue,
                b'#' => {
                    self.skip_comment()?;
                    continue;
                }
                b'"' => return self.scan_string(),
                b'[' => return Ok(Token::ListStart),
                b'{' => return Ok(Token::MapStart),
                b']' => return Ok(Token::ListEnd),
                b'}' => return Ok(Token::MapEnd),
                b':' => return Ok(Token::Colon),
                b',' => return Ok(Token::Comma),
                _ => return self.scan_bare(),
            }
        }
    }

    /// Collects a bare string whose first byte has just been read.
    ///
    /// Terminated by whitespace or end of input (consumed) or by one of
    /// `:,]}` (pushed back). `{`, `[`, `\` and `"` are not allowed once a
    /// bare string has started.
    fn scan_bare(&mut self) -> Result<Token> {
        let start = self.index - 1;
        let stop;
        loop {
            match self.read_byte(false)? {
                None => {
                    stop = self.index;
                    break;
                }
                Some(b' ') | Some(b'\n') => {
                    stop = self.index - 1;
                    break;
                }
                Some(b':') | Some(b',') | Some(b']') | Some(b'}') => {
                    self.unread_one();
                    stop = self.index;
                    break;
                }
                Some(c @ (b'{' | b'[' | b'\\' | b'"')) => {
                    let pos = self.here();
                    return self.lex_err(
                        pos,
                        format!("unexpected character '{}' in undelimited string", c as char),
                    );
                }
                Some(_) => {}
            }
        }
        // Bare strings terminate only on ASCII bytes, so the slice bounds
        // sit on code-point boundaries.
        let text = &self.input[start..stop];
        match text.strip_prefix('&') {
            Some(name) => Ok(Token::Macro(name.to_string())),
            None => Ok(Token::Str(text.to_string())),
        }
    }

    /// Skips a comment; the introducing `#` has already been read.
    ///
    /// `#[` opens a block comment closed by `]#`; anything else is a line
    /// comment running to end of line or end of input.
    fn skip_comment(&mut self) -> Result<()> {
        let mut ch = self.read_byte(false)?;
        if ch == Some(b'[') {
            let open = self.here();
            ch = self.read_byte(false)?;
            loop {
                match ch {
                    Some(b']') => {
                        ch = self.read_byte(false)?;
                        if ch == Some(b'#') {
                            return Ok(());
                        }
                        // re-examine: the byte after ']' may itself be ']'
                    }
                    None => return self.lex_err(open, "unterminated block comment"),
                    Some(_) => ch = self.read_byte(false)?,
                }
            }
        }
        while !matches!(ch, None | Some(b'\n')) {
            ch = self.read_byte(false)?;
        }
        Ok(())
    }

    /// Decodes a delimited string; the opening `"` has already been read.
    fn scan_string(&mut self) -> Result<Token> {
        let open = self.here();
        let mut out: Vec<u8> = Vec::new();
        loop {
            let ch = match self.read_byte(true)? {
                Some(c) => c,
                None => return self.lex_err(open, "end of input inside delimited string"),
            };
            match ch {
                b'"' => {
                    return match String::from_utf8(out) {
                        Ok(s) => Ok(Token::Str(s)),
                        Err(_) => self.lex_err(open, "invalid UTF-8 in delimited string"),
                    };
                }
                b'\\' => self.scan_escape(&mut out)?,
                _ => out.push(ch),
            }
        }
    }

    /// Handles one escape sequence; the `\` has already been read.
    fn scan_escape(&mut self, out: &mut Vec<u8>) -> Result<()> {
        // read_byte(false) here: a newline after the backslash surfaces as
        // a separator byte and falls into the illegal-escape arm.
        let ch = self.read_byte(false)?;
        match ch {
            Some(c @ (b'"' | b'\\' | b'/')) => out.push(c),
            Some(b'n') => out.push(b'\n'),
            Some(b't') => out.push(b'\t'),
            Some(b'b') => out.push(0x08),
            Some(b'f') => out.push(0x0C),
            Some(b'r') => out.push(b'\r'),
            Some(b'u') => return self.scan_unicode(out, 4),
            Some(b'U') => return self.scan_unicode(out, 6),
            Some(b'[') => return self.skip_string_comment(),
            _ => {
                let pos = self.here();
                return self.lex_err(pos, "illegal string escape");
            }
        }
        Ok(())
    }

    /// Decodes `len` hex digits into a code point and appends its UTF-8
    /// encoding. Non-hex digits, values above U+10FFFF and surrogates are
    /// rejected.
    fn scan_unicode(&mut self, out: &mut Vec<u8>, len: usize) -> Result<()> {
        let mut code_point: u32 = 0;
        for _ in 0..len {
            let digit = match self.read_byte(true)? {
                Some(c @ b'0'..=b'9') => u32::from(c - b'0'),
                Some(c @ b'a'..=b'f') => u32::from(c - b'a') + 10,
                Some(c @ b'A'..=b'F') => u32::from(c - b'A') + 10,
                _ => {
                    let pos = self.here();
                    return self.lex_err(pos, "invalid unicode escape in string");
                }
            };
            code_point = code_point * 16 + digit;
        }
        match char::from_u32(code_point) {
            Some(c) => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                Ok(())
            }
            None => {
                let pos = self.here();
                self.lex_err(pos, "invalid unicode escape in string")
            }
        }
    }

    /// Skips an embedded string comment (`\[` ... `\]`); the `[` has
    /// already been read. Contributes nothing to the decoded string.
    fn skip_string_comment(&mut self) -> Result<()> {
        let open = self.here();
        let mut ch = self.read_byte(false)?;
        loop {
            match ch {
                Some(b'\\') => {
                    ch = self.read_byte(false)?;
                    if ch == Some(b']') {
                        return Ok(());
                    }
                    // re-examine: the byte after '\' may itself be '\'
                }
                None => return self.lex_err(open, "end of input inside string comment"),
                Some(_) => ch = self.read_byte(false)?,
            }
        }
    }
}
