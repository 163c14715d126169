//! Recursive descent parser
//!
//! This module provides the [`Parser`] struct, its error type, and the main
//! parse entry point.
//!
//! # Run-length encoding
//!
//! Consecutive identical command characters are folded into one
//! [`CommandNode`] carrying the run length, so `+++` parses to a single node
//! with count 3. A run ends at the first character that differs, including
//! whitespace, brackets and skipped comment characters.
//!
//! # Loops
//!
//! Each `[` starts a nested call that collects nodes until its `]`. The nested
//! call returns the finished child list and the caller wraps it in a [`Loop`],
//! so no container is shared across recursion frames.

use crate::parser::ast::*;
use crate::parser::lexer::{Lexer, Token};
use std::fmt;

/// What went wrong while parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A character that is neither a command, a bracket nor whitespace
    MalformedCommandCharacter(char),
    /// A `[` with no matching `]` before end of input
    UnterminatedLoop,
    /// A `]` with no enclosing `[`
    UnmatchedLoopClose,
    /// A `[` opened while [`MAX_LOOP_DEPTH`] loops were already open
    NestingTooDeep,
}

/// Deepest loop nesting accepted by the parser.
///
/// Parsing, rendering and executing all recurse once per level, so this bounds
/// native stack use for every traversal of the tree.
pub const MAX_LOOP_DEPTH: usize = 1_000;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub location: SourceLocation,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: ",
            self.location.line, self.location.column
        )?;
        match &self.kind {
            ParseErrorKind::MalformedCommandCharacter(c) => {
                write!(f, "unrecognized {}", Token::Unknown(*c, self.location))
            }
            ParseErrorKind::UnterminatedLoop => write!(f, "'[' is never closed"),
            ParseErrorKind::UnmatchedLoopClose => write!(f, "']' has no matching '['"),
            ParseErrorKind::NestingTooDeep => {
                write!(f, "loops nested deeper than {} levels", MAX_LOOP_DEPTH)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Recursive descent parser over a [`Lexer`]
pub struct Parser {
    lexer: Lexer,
    /// Loops currently open
    depth: usize,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self {
            lexer: Lexer::new(source),
            depth: 0,
        }
    }

    /// Skip characters outside the alphabet instead of rejecting them.
    pub fn allow_comments(mut self, allow: bool) -> Self {
        self.lexer = self.lexer.skipping_unknown(allow);
        self
    }

    /// Parse the entire source into a [`Program`]
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let nodes = self.parse_block(None)?;
        Ok(Program { nodes })
    }

    /// Collect nodes until end of input (top level, `open` is `None`) or
    /// until the `]` closing the loop opened at `open`.
    fn parse_block(
        &mut self,
        open: Option<SourceLocation>,
    ) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();

        while let Some(token) = self.lexer.next_token() {
            match token {
                Token::LoopOpen(location) => {
                    if self.depth == MAX_LOOP_DEPTH {
                        return Err(ParseError {
                            kind: ParseErrorKind::NestingTooDeep,
                            location,
                        });
                    }
                    self.depth += 1;
                    let body = self.parse_block(Some(location))?;
                    self.depth -= 1;
                    nodes.push(Node::Loop(Loop::new(body, location)));
                }
                Token::LoopClose(location) => {
                    return match open {
                        Some(_) => Ok(nodes),
                        None => Err(ParseError {
                            kind: ParseErrorKind::UnmatchedLoopClose,
                            location,
                        }),
                    };
                }
                Token::Command(command, location) => {
                    let count = self.consume_run(command);
                    nodes.push(Node::Command(CommandNode::new(command, count, location)));
                }
                Token::Unknown(c, location) => {
                    return Err(ParseError {
                        kind: ParseErrorKind::MalformedCommandCharacter(c),
                        location,
                    });
                }
            }
        }

        match open {
            Some(location) => Err(ParseError {
                kind: ParseErrorKind::UnterminatedLoop,
                location,
            }),
            None => Ok(nodes),
        }
    }

    /// Greedily consume repeats of an already-read command; returns the run length.
    fn consume_run(&mut self, command: Command) -> usize {
        let mut count = 1;
        while self.lexer.next_if(command.symbol()) {
            count += 1;
        }
        count
    }
}

/// Convenience wrapper: parse `source` with default options.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    Parser::new(source).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(node: &Node) -> (Command, usize) {
        match node {
            Node::Command(c) => (c.command(), c.count()),
            Node::Loop(_) => panic!("Expected command node, got loop"),
        }
    }

    fn body(node: &Node) -> &[Node] {
        match node {
            Node::Loop(l) => &l.body,
            Node::Command(_) => panic!("Expected loop, got command"),
        }
    }

    #[test]
    fn test_parse_empty_source() {
        let program = parse("").unwrap();
        assert!(program.nodes.is_empty());
    }

    #[test]
    fn test_identical_runs_collapse() {
        for (symbol, cmd) in [
            ('+', Command::Increment),
            ('-', Command::Decrement),
            ('<', Command::ShiftLeft),
            ('>', Command::ShiftRight),
            (',', Command::Input),
            ('.', Command::Output),
            ('0', Command::ZeroCell),
        ] {
            for n in [1, 2, 7, 300] {
                let source: String = std::iter::repeat(symbol).take(n).collect();
                let program = parse(&source).unwrap();
                assert_eq!(program.nodes.len(), 1, "source {:?}", source);
                assert_eq!(command(&program.nodes[0]), (cmd, n));
            }
        }
    }

    #[test]
    fn test_runs_split_on_change() {
        let program = parse("++-->>+").unwrap();
        let runs: Vec<_> = program.nodes.iter().map(command).collect();
        assert_eq!(
            runs,
            vec![
                (Command::Increment, 2),
                (Command::Decrement, 2),
                (Command::ShiftRight, 2),
                (Command::Increment, 1),
            ]
        );
    }

    #[test]
    fn test_whitespace_breaks_run() {
        let program = parse("++ +\n+").unwrap();
        let runs: Vec<_> = program.nodes.iter().map(command).collect();
        assert_eq!(
            runs,
            vec![
                (Command::Increment, 2),
                (Command::Increment, 1),
                (Command::Increment, 1),
            ]
        );
    }

    #[test]
    fn test_parse_nested_loops() {
        let program = parse("++[>++[-]<-]>.").unwrap();
        assert_eq!(program.nodes.len(), 4);
        assert_eq!(command(&program.nodes[0]), (Command::Increment, 2));

        let outer = body(&program.nodes[1]);
        assert_eq!(outer.len(), 5);
        assert_eq!(command(&outer[0]), (Command::ShiftRight, 1));
        assert_eq!(command(&outer[1]), (Command::Increment, 2));
        let inner = body(&outer[2]);
        assert_eq!(inner.len(), 1);
        assert_eq!(command(&inner[0]), (Command::Decrement, 1));
        assert_eq!(command(&outer[3]), (Command::ShiftLeft, 1));
        assert_eq!(command(&outer[4]), (Command::Decrement, 1));

        assert_eq!(command(&program.nodes[2]), (Command::ShiftRight, 1));
        assert_eq!(command(&program.nodes[3]), (Command::Output, 1));
    }

    #[test]
    fn test_empty_loop() {
        let program = parse("[]").unwrap();
        assert_eq!(program.nodes.len(), 1);
        assert!(body(&program.nodes[0]).is_empty());
        assert_eq!(program.nodes[0].location(), SourceLocation::new(1, 1));
    }

    #[test]
    fn test_unmatched_close_is_rejected() {
        let err = parse("+]+++").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnmatchedLoopClose);
        assert_eq!(err.location, SourceLocation::new(1, 2));
    }

    #[test]
    fn test_unterminated_loop_is_rejected() {
        let err = parse("+[[-]").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedLoop);
        assert_eq!(err.location, SourceLocation::new(1, 2));
    }

    #[test]
    fn test_malformed_character_is_rejected() {
        let err = parse("+\n +x").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MalformedCommandCharacter('x'));
        assert_eq!(err.location, SourceLocation::new(2, 3));
        assert_eq!(
            err.to_string(),
            "Parse error at line 2, column 3: unrecognized character 'x'"
        );
    }

    #[test]
    fn test_allow_comments_skips_unknown() {
        let program = Parser::new("add two: ++ then print.")
            .allow_comments(true)
            .parse_program()
            .unwrap();
        let runs: Vec<_> = program.nodes.iter().map(command).collect();
        assert_eq!(runs, vec![(Command::Increment, 2), (Command::Output, 1)]);
    }

    #[test]
    fn test_nesting_at_limit_is_accepted() {
        let source = format!("{}{}", "[".repeat(MAX_LOOP_DEPTH), "]".repeat(MAX_LOOP_DEPTH));
        let program = parse(&source).unwrap();
        assert_eq!(program.node_count(), MAX_LOOP_DEPTH);
    }

    #[test]
    fn test_nesting_past_limit_is_rejected() {
        let depth = MAX_LOOP_DEPTH + 1;
        let source = format!("+{}{}", "[".repeat(depth), "]".repeat(depth));
        let err = parse(&source).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NestingTooDeep);
        assert_eq!(err.location, SourceLocation::new(1, MAX_LOOP_DEPTH + 2));
    }

    #[test]
    fn test_very_deep_nesting_is_rejected() {
        let source = "[".repeat(100_000);
        let err = parse(&source).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NestingTooDeep);
    }

    #[test]
    fn test_unicode_space_is_not_whitespace() {
        let err = parse("+\u{00A0}+").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MalformedCommandCharacter('\u{00A0}'));
        assert_eq!(err.location, SourceLocation::new(1, 2));

        let program = parse("+\x0b+\x0c+\r\n+").unwrap();
        assert_eq!(program.nodes.len(), 4);
    }
}
