//! Character stream for tape-language source
//!
//! The [`Lexer`] hands the parser one [`Token`] at a time. Whitespace between
//! tokens is skipped, while [`Lexer::next_if`] inspects the very next raw
//! character without skipping anything, so whitespace ends a command run.

use super::ast::{Command, SourceLocation};
use std::fmt;

/// All token variants produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Command(Command, SourceLocation),
    LoopOpen(SourceLocation),  // [
    LoopClose(SourceLocation), // ]
    /// Any character that is not a command, bracket or whitespace
    Unknown(char, SourceLocation),
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::Command(_, loc)
            | Token::LoopOpen(loc)
            | Token::LoopClose(loc)
            | Token::Unknown(_, loc) => *loc,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Command(command, _) => write!(f, "'{}'", command.symbol()),
            Token::LoopOpen(_) => write!(f, "'['"),
            Token::LoopClose(_) => write!(f, "']'"),
            Token::Unknown(c, _) if c.is_control() => {
                write!(f, "character U+{:04X}", *c as u32)
            }
            Token::Unknown(c, _) => write!(f, "character '{}'", c),
        }
    }
}

/// Whitespace as the C locale defines it: space, `\t`, `\n`, `\v`, `\f`, `\r`
fn is_space(ch: char) -> bool {
    ch.is_ascii_whitespace() || ch == '\x0b'
}

/// Lexer over tape-language source
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    skip_unknown: bool,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            skip_unknown: false,
        }
    }

    /// Treat characters outside the alphabet as comments instead of
    /// reporting them as [`Token::Unknown`].
    pub fn skipping_unknown(mut self, skip: bool) -> Self {
        self.skip_unknown = skip;
        self
    }

    /// Next token, or `None` once the stream is exhausted.
    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            let loc = self.current_location();
            let ch = self.advance()?;

            if is_space(ch) {
                continue;
            }

            match ch {
                '[' => return Some(Token::LoopOpen(loc)),
                ']' => return Some(Token::LoopClose(loc)),
                _ => match Command::from_char(ch) {
                    Some(command) => return Some(Token::Command(command, loc)),
                    None if self.skip_unknown => continue,
                    None => return Some(Token::Unknown(ch, loc)),
                },
            }
        }
    }

    /// Consume the next raw character only if it equals `expected`.
    pub fn next_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }
}
