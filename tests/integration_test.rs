// Integration tests for the tape interpreter

use std::io::Cursor;

use tapewalk::config::EofBehavior;
use tapewalk::interpreter::{Interpreter, RuntimeError};
use tapewalk::parser::ast::{Command, Node, SourceLocation};
use tapewalk::parser::parser::{parse, ParseErrorKind};
use tapewalk::serializer::Serializer;

/// Parse and run `source`, returning the execution result and everything written
fn execute(source: &str, input: &[u8]) -> (Result<(), RuntimeError>, Vec<u8>) {
    let program = parse(source).expect("Parsing failed");
    let mut interpreter = Interpreter::new(Cursor::new(input.to_vec()), Vec::new());
    let result = interpreter.run(&program);
    (result, interpreter.into_output())
}

#[test]
fn test_output_single_byte() {
    let (result, output) = execute("+++.", b"");
    assert!(result.is_ok(), "Execution failed: {:?}", result);
    assert_eq!(output, vec![3, b'\n']);
}

#[test]
fn test_nested_multiply_loop() {
    let (result, output) = execute("++[>++<-]>.", b"");
    assert!(result.is_ok(), "Execution failed: {:?}", result);
    assert_eq!(output, vec![4, b'\n']);
}

#[test]
fn test_drain_loop_stops_at_zero() {
    let program = parse("+++++[-]").unwrap();
    let mut interpreter = Interpreter::new(std::io::empty(), Vec::new());
    interpreter.run(&program).unwrap();

    assert_eq!(interpreter.tape().cursor(), 0);
    assert_eq!(interpreter.tape().get(), 0);
    assert!(interpreter.is_finished());
}

#[test]
fn test_empty_source_emits_only_newline() {
    let program = parse("").unwrap();
    assert!(program.nodes.is_empty());

    let (result, output) = execute("", b"");
    assert!(result.is_ok());
    assert_eq!(output, b"\n");
}

#[test]
fn test_unmatched_close_does_not_run() {
    let err = parse("]+++.").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnmatchedLoopClose);
    assert_eq!(err.location, SourceLocation::new(1, 1));
}

#[test]
fn test_hello_world() {
    let source = r#"
        ++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]
        >>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.
    "#;
    let (result, output) = execute(source, b"");
    assert!(result.is_ok(), "Execution failed: {:?}", result);
    assert_eq!(String::from_utf8(output).unwrap(), "Hello World!\n\n");
}

#[test]
fn test_echo_until_eof() {
    // Copies input to output; relies on EOF storing zero to stop
    let program = parse(",[.,]").unwrap();
    let mut interpreter = Interpreter::new(Cursor::new(b"tape".to_vec()), Vec::new())
        .with_eof(EofBehavior::Zero);
    interpreter.run(&program).unwrap();
    assert_eq!(interpreter.into_output(), b"tape\n");
}

#[test]
fn test_serializer_then_interpreter_share_tree() {
    let program = parse("+++ [ >+< - ] 0 .").unwrap();

    let rendered = Serializer::render(&program);
    assert_eq!(rendered, "3+[1>1+1<1-]1Z1.\n");

    let mut interpreter = Interpreter::new(std::io::empty(), Vec::new());
    interpreter.run(&program).unwrap();
    assert_eq!(interpreter.tape().cells()[1], 3);
    assert_eq!(interpreter.into_output(), vec![0, b'\n']);

    // The tree is untouched by either traversal
    assert_eq!(Serializer::render(&program), rendered);
}

#[test]
fn test_long_runs_are_single_nodes() {
    let source = format!("{}{}", "+".repeat(1000), ">".repeat(20));
    let program = parse(&source).unwrap();
    assert_eq!(program.nodes.len(), 2);
    match &program.nodes[0] {
        Node::Command(node) => {
            assert_eq!(node.command(), Command::Increment);
            assert_eq!(node.count(), 1000);
        }
        Node::Loop(_) => panic!("Expected command node"),
    }

    let mut interpreter = Interpreter::new(std::io::empty(), Vec::new());
    interpreter.run(&program).unwrap();
    assert_eq!(interpreter.tape().cells()[0], (1000 % 256) as u8);
    assert_eq!(interpreter.tape().cursor(), 20);
}

#[test]
fn test_runtime_error_keeps_partial_output() {
    let (result, output) = execute("+++.<", b"");
    assert!(matches!(
        result,
        Err(RuntimeError::TapeBoundsExceeded { attempted: -1, .. })
    ));
    // No trailing newline: execution never halted normally
    assert_eq!(output, vec![3]);
}
