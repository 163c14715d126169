//! # Introduction
//!
//! tapewalk parses programs in a minimal tape language (`+ - < > , . 0` plus
//! `[ ]` loops) into a run-length encoded syntax tree and executes that tree
//! against a 30,000 cell byte tape. Runs can optionally record a snapshot
//! history that is then stepped forward and backward through a terminal UI
//! built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST ─┬→ Serializer → rendered tree
//!                                └→ Interpreter → output (+ Snapshots → TUI)
//! ```
//!
//! 1. [`parser`]: reads the character stream and builds the AST, collapsing
//!    runs of identical commands into one counted node.
//! 2. [`serializer`] and [`interpreter`]: two traversals attached to the AST
//!    through the [`parser::ast::Visitor`] trait.
//! 3. [`memory`]: the fixed-length [`memory::Tape`] with a bounds-checked cursor.
//! 4. [`snapshot`]: execution history with a configurable memory limit.
//! 5. [`runner`] and [`config`]: per-file processing used by the binary.
//! 6. [`ui`]: ratatui-based debugger; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use tapewalk::interpreter::Interpreter;
//! use tapewalk::parser::parser::parse;
//! use tapewalk::serializer::Serializer;
//!
//! let program = parse("++[>++<-]>.").unwrap();
//! assert_eq!(Serializer::render(&program), "2+[1>2+1<1-]1>1.\n");
//!
//! let mut interpreter = Interpreter::new(std::io::empty(), Vec::new());
//! interpreter.run(&program).unwrap();
//! assert_eq!(interpreter.into_output(), vec![4, b'\n']);
//! ```

pub mod config;
pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod runner;
pub mod serializer;
pub mod snapshot;
pub mod ui;
