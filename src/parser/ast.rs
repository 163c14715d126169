// AST (Abstract Syntax Tree) definitions for the tape interpreter

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Primitive operations a [`CommandNode`] can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Increment,  // +
    Decrement,  // -
    ShiftLeft,  // <
    ShiftRight, // >
    Input,      // ,
    Output,     // .
    ZeroCell,   // 0
}

impl Command {
    /// Map a source character onto its command, if it is one.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Command::Increment),
            '-' => Some(Command::Decrement),
            '<' => Some(Command::ShiftLeft),
            '>' => Some(Command::ShiftRight),
            ',' => Some(Command::Input),
            '.' => Some(Command::Output),
            '0' => Some(Command::ZeroCell),
            _ => None,
        }
    }

    /// The character this command is written as in source.
    pub fn symbol(self) -> char {
        match self {
            Command::Increment => '+',
            Command::Decrement => '-',
            Command::ShiftLeft => '<',
            Command::ShiftRight => '>',
            Command::Input => ',',
            Command::Output => '.',
            Command::ZeroCell => '0',
        }
    }

    /// The marker used when rendering the tree.
    ///
    /// Identical to [`Command::symbol`] except for `ZeroCell`, which renders
    /// as `Z` so it cannot be mistaken for a count digit.
    pub fn marker(self) -> char {
        match self {
            Command::ZeroCell => 'Z',
            other => other.symbol(),
        }
    }
}

/// A run of identical command characters collapsed into one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandNode {
    command: Command,
    count: usize,
    location: SourceLocation,
}

impl CommandNode {
    /// `count` is the run length and is at least 1.
    pub fn new(command: Command, count: usize, location: SourceLocation) -> Self {
        debug_assert!(count >= 1, "command runs are never empty");
        CommandNode {
            command,
            count,
            location,
        }
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Location of the first character of the run
    pub fn location(&self) -> SourceLocation {
        self.location
    }
}

/// The body of a matched `[` ... `]` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loop {
    pub body: Vec<Node>,
    pub location: SourceLocation,
}

impl Loop {
    pub fn new(body: Vec<Node>, location: SourceLocation) -> Self {
        Loop { body, location }
    }
}

/// A child of a [`Program`] or [`Loop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Command(CommandNode),
    Loop(Loop),
}

impl Node {
    /// Route `visitor` to the handler for this node's variant.
    pub fn accept<T>(&self, visitor: &mut dyn Visitor<T>) -> T {
        match self {
            Node::Command(command) => visitor.visit_command(command),
            Node::Loop(body) => visitor.visit_loop(body),
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            Node::Command(command) => command.location(),
            Node::Loop(body) => body.location,
        }
    }
}

/// Root of a parsed source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub nodes: Vec<Node>,
}

impl Program {
    pub fn new() -> Self {
        Program { nodes: Vec::new() }
    }

    pub fn accept<T>(&self, visitor: &mut dyn Visitor<T>) -> T {
        visitor.visit_program(self)
    }

    /// Total number of nodes in the tree, loops included.
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes
                .iter()
                .map(|node| match node {
                    Node::Command(_) => 1,
                    Node::Loop(body) => 1 + count(&body.body),
                })
                .sum()
        }
        count(&self.nodes)
    }
}

/// A traversal over the tree.
///
/// Each node's `accept` calls back into exactly one of these methods, so new
/// traversals can be added without touching the node types. Container
/// handlers decide themselves whether and how often to visit their children.
pub trait Visitor<T> {
    fn visit_command(&mut self, node: &CommandNode) -> T;
    fn visit_loop(&mut self, node: &Loop) -> T;
    fn visit_program(&mut self, program: &Program) -> T;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the order in which variants are dispatched
    struct Trace(Vec<&'static str>);

    impl Visitor<()> for Trace {
        fn visit_command(&mut self, _node: &CommandNode) {
            self.0.push("command");
        }

        fn visit_loop(&mut self, node: &Loop) {
            self.0.push("loop");
            for child in &node.body {
                child.accept::<()>(self);
            }
        }

        fn visit_program(&mut self, program: &Program) {
            self.0.push("program");
            for child in &program.nodes {
                child.accept::<()>(self);
            }
        }
    }

    fn at(column: usize) -> SourceLocation {
        SourceLocation::new(1, column)
    }

    #[test]
    fn test_accept_routes_to_matching_variant() {
        let program = Program {
            nodes: vec![
                Node::Command(CommandNode::new(Command::Increment, 2, at(1))),
                Node::Loop(Loop::new(
                    vec![Node::Command(CommandNode::new(Command::Decrement, 1, at(4)))],
                    at(3),
                )),
            ],
        };

        let mut trace = Trace(Vec::new());
        program.accept::<()>(&mut trace);
        assert_eq!(trace.0, vec!["program", "command", "loop", "command"]);
        assert_eq!(program.node_count(), 3);
    }

    #[test]
    fn test_command_characters() {
        for c in ['+', '-', '<', '>', ',', '.', '0'] {
            let command = Command::from_char(c).unwrap();
            assert_eq!(command.symbol(), c);
        }
        assert_eq!(Command::from_char('['), None);
        assert_eq!(Command::from_char('x'), None);
        assert_eq!(Command::ZeroCell.marker(), 'Z');
        assert_eq!(Command::Output.marker(), '.');
    }
}
