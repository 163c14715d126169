//! Tape-language source parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Character stream (source text → tokens)
//! - [`parser`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions and the [`ast::Visitor`] trait
//!
//! # Alphabet
//!
//! | Char | Meaning |
//! |------|---------|
//! | `+` `-` | increment / decrement the current cell |
//! | `<` `>` | move the cursor left / right |
//! | `,` `.` | read a byte into / write a byte from the current cell |
//! | `0` | set the current cell to zero |
//! | `[` `]` | loop while the current cell is non-zero |
//!
//! ASCII whitespace (space, tab, newline, vertical tab, form feed, carriage
//! return) separates tokens; other Unicode spaces are ordinary characters.
//! Anything else is rejected unless comments are
//! allowed, in which case it is skipped like whitespace.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with run-length encoding of command
//! runs. Loops may nest at most [`parser::MAX_LOOP_DEPTH`] levels deep.

pub mod ast;
pub mod lexer;
pub mod parser;
