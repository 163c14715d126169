//! Annotated rendering of a parsed tree.
//!
//! Each command run renders as its count followed by its marker (`3+`, `1Z`),
//! loops render as their rendered body inside brackets, and a whole program
//! renders as its children followed by a newline:
//!
//! ```text
//! ++[>++<-]>.   →   2+[1>2+1<1-]1>1.
//! ```

use crate::parser::ast::{CommandNode, Loop, Node, Program, Visitor};
use std::fmt::{self, Write};

/// Visitor that renders the tree into a string buffer
#[derive(Debug, Default)]
pub struct Serializer {
    out: String,
}

impl Serializer {
    pub fn new() -> Self {
        Serializer { out: String::new() }
    }

    /// Render a whole program, trailing newline included.
    pub fn render(program: &Program) -> String {
        let mut serializer = Serializer::new();
        program.accept::<()>(&mut serializer);
        serializer.out
    }

    fn render_children(&mut self, nodes: &[Node]) {
        for node in nodes {
            node.accept::<()>(self);
        }
    }
}

impl Visitor<()> for Serializer {
    fn visit_command(&mut self, node: &CommandNode) {
        // Writing into a String cannot fail
        let _ = write!(self.out, "{}{}", node.count(), node.command().marker());
    }

    fn visit_loop(&mut self, node: &Loop) {
        self.out.push('[');
        self.render_children(&node.body);
        self.out.push(']');
    }

    fn visit_program(&mut self, program: &Program) {
        self.render_children(&program.nodes);
        self.out.push('\n');
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Serializer::render(self))
    }
}
