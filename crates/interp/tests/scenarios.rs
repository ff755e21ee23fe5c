//! End-to-end runs of complete seqd programs
//!
//! Each test feeds a full source text through `interpret` and checks the
//! output buffer, the final registers and the diagnostics.

use seqd::{Interpreter, Severity, Value, interpret};
use std::collections::BTreeMap;

fn source(lines: &[&str]) -> String {
    lines.join("\n")
}

fn int(n: i64) -> Value {
    Value::Integer(n)
}

#[test]
fn test_add_and_print() {
    let src = source(&[
        "PTIN P", "INIT A 5", "INIT B 3", "ADDV A B", "LIFT A", "DROP TTY0", "PEND", "SEQD", "P",
        "SEQD",
    ]);
    let result = interpret(&src);
    assert_eq!(result.output, "8\n");
    assert_eq!(result.registers["A"], int(8));
    assert_eq!(result.registers["B"], int(3));
    assert_eq!(result.registers["PILE"], Value::Stack(Vec::new()));
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_string_literal_round_trip_to_output() {
    let src = source(&[
        "PTIN P",
        r#"MOVE "hello world" MSG"#,
        "LIFT MSG",
        "DROP TTY0",
        "PEND",
        "SEQD",
        "P",
        "SEQD",
    ]);
    let result = interpret(&src);
    assert_eq!(result.output, "hello world\n");
    assert_eq!(result.registers["MSG"], Value::from("hello world"));
}

#[test]
fn test_floor_division_positive() {
    let src = source(&[
        "PTIN P", "INIT A 7", "INIT B 2", "DIVV A B", "PEND", "SEQD", "P", "SEQD",
    ]);
    assert_eq!(interpret(&src).registers["A"], int(3));
}

#[test]
fn test_floor_division_negative() {
    let src = source(&[
        "PTIN P", "INIT A -7", "DIVV A 2", "PEND", "SEQD", "P", "SEQD",
    ]);
    assert_eq!(interpret(&src).registers["A"], int(-4));
}

#[test]
fn test_undefined_pattern_is_skipped() {
    let result = interpret(&source(&["SEQD", "GHOST", "SEQD"]));
    assert_eq!(result.output, "");
    assert!(result.registers.is_empty());
    assert!(!result.has_errors());
}

#[test]
fn test_undefined_pattern_does_not_abort_later_entries() {
    let src = source(&[
        "PTIN P", "WAIT", "PEND", "SEQD", "GHOST", "P", "GHOST", "P", "SEQD",
    ]);
    let result = interpret(&src);
    assert_eq!(result.output, "Waiting for input...\nWaiting for input...\n");
    let warnings = result
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();
    assert_eq!(warnings, 2);
}

#[test]
fn test_unknown_instruction() {
    let src = source(&["PTIN P", "FOOBAR X Y", "PEND", "SEQD", "P", "SEQD"]);
    let result = interpret(&src);
    assert_eq!(result.output, "Unknown instruction: FOOBAR\n");
    assert!(result.registers.is_empty());
}

#[test]
fn test_unknown_instruction_continues() {
    let src = source(&[
        "PTIN P", "INIT A 1", "FOOBAR", "INCR A", "FOOBAR", "PEND", "SEQD", "P", "SEQD",
    ]);
    let result = interpret(&src);
    assert_eq!(
        result.output,
        "Unknown instruction: FOOBAR\nUnknown instruction: FOOBAR\n"
    );
    assert_eq!(result.registers["A"], int(2));
}

#[test]
fn test_drop_on_empty_pile() {
    let src = source(&["PTIN P", "DROP X", "PEND", "SEQD", "P", "SEQD"]);
    let result = interpret(&src);
    assert!(result.registers.is_empty());
    assert_eq!(result.output, "");
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_drops_never_exceed_lifts() {
    let src = source(&[
        "PTIN P", "LIFT 1", "LIFT 2", "DROP TTY0", "DROP TTY0", "DROP TTY0", "DROP X", "PEND",
        "SEQD", "P", "SEQD",
    ]);
    let result = interpret(&src);
    assert_eq!(result.output, "2\n1\n");
    assert!(!result.registers.contains_key("X"));
    assert_eq!(result.registers["PILE"], Value::Stack(Vec::new()));
}

#[test]
fn test_stack_discipline_across_interleavings() {
    // L lifts the next counter value, D drops it to the output sink
    let interleavings = ["", "D", "LD", "DL", "LLDD", "LDDD", "DDLL", "LDLDLD", "LLLDLDDDD"];
    for ops in interleavings {
        let mut lines = vec!["PTIN P".to_string()];
        let mut model: Vec<usize> = Vec::new();
        let mut expected = String::new();
        for (i, op) in ops.chars().enumerate() {
            if op == 'L' {
                lines.push(format!("LIFT {}", i));
                model.push(i);
            } else {
                lines.push("DROP TTY0".to_string());
                if let Some(top) = model.pop() {
                    expected.push_str(&format!("{}\n", top));
                }
            }
        }
        lines.extend(["PEND", "SEQD", "P", "SEQD"].map(String::from));

        let result = interpret(&lines.join("\n"));
        let lifts = ops.matches('L').count();
        assert!(result.output.lines().count() <= lifts, "interleaving {:?}", ops);
        assert_eq!(result.output, expected, "interleaving {:?}", ops);
        assert!(result.diagnostics.is_empty(), "interleaving {:?}", ops);
        if lifts == 0 {
            assert!(result.registers.is_empty(), "interleaving {:?}", ops);
        } else {
            let remaining: Vec<Value> = model.iter().map(|&n| int(n as i64)).collect();
            assert_eq!(result.registers["PILE"], Value::Stack(remaining));
        }
    }
}

#[test]
fn test_init_without_literal_defaults_to_zero() {
    let result = interpret(&source(&["PTIN P", "INIT A", "PEND", "SEQD", "P", "SEQD"]));
    assert_eq!(result.registers["A"], int(0));
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_lines_outside_pattern_and_sequence_are_silent() {
    let result = interpret("INCR A\n");
    assert_eq!(result.output, "");
    assert!(result.registers.is_empty());
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_pile_left_over_in_registers() {
    let src = source(&[
        "PTIN P", "LIFT 1", "LIFT two", "PEND", "SEQD", "P", "SEQD",
    ]);
    let result = interpret(&src);
    assert_eq!(
        result.registers["PILE"],
        Value::Stack(vec![int(1), Value::from("two")])
    );
}

#[test]
fn test_lowercase_opcode_is_unknown_but_directives_are_not() {
    let src = source(&["ptin P", "incr A", "pend", "seqd", "P", "seqd"]);
    let result = interpret(&src);
    assert_eq!(result.output, "Unknown instruction: incr\n");
}

#[test]
fn test_malformed_literal_is_reported() {
    let src = source(&["PTIN P", r#"MOVE "oops"#, "PEND", "SEQD", "P", "SEQD"]);
    let result = interpret(&src);
    assert!(result.registers.is_empty());
    assert_eq!(result.output, "");
    let errors: Vec<_> = result.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line, Some(2));
    assert!(errors[0].message.contains("Malformed string literal"));
}

#[test]
fn test_arithmetic_on_unset_register_is_reported() {
    let src = source(&["PTIN P", "ADDV A 1", "INIT B 1", "PEND", "SEQD", "P", "SEQD"]);
    let result = interpret(&src);
    assert!(result.has_errors());
    let expected: BTreeMap<String, Value> = [("B".to_string(), int(1))].into_iter().collect();
    assert_eq!(result.registers, expected);
}

#[test]
fn test_comments_and_blank_lines() {
    let src = "\n; counter\nPTIN COUNT\n  ; body\n  INIT N 0\n\n  INCR N\nPEND\n\nSEQD\n  COUNT\nSEQD\n";
    let result = interpret(src);
    assert_eq!(result.registers["N"], int(1));
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_runs_are_deterministic() {
    let src = source(&[
        "PTIN A", "INIT X 2", "MULT X 21", "LIFT X", "DROP TTY0", "WAIT", "PEND", "PTIN B",
        r#"MOVE "x y" S"#, "BOGUS", "PEND", "SEQD", "A", "B", "C", "A", "SEQD",
    ]);
    let first = interpret(&src);
    let second = interpret(&src);
    assert_eq!(first, second);
    assert_eq!(
        first.output,
        "42\nWaiting for input...\nUnknown instruction: BOGUS\n42\nWaiting for input...\n"
    );
}

#[test]
fn test_runs_are_isolated() {
    let mut interpreter = Interpreter::new();
    let first = interpreter.interpret(&source(&[
        "PTIN P", "INIT A 1", "WAIT", "PEND", "SEQD", "P", "SEQD",
    ]));
    assert_eq!(first.registers.len(), 1);

    let second = interpreter.interpret(&source(&["PTIN Q", "INCR A", "PEND", "SEQD", "Q", "SEQD"]));
    // A from the previous run is gone, so INCR fails
    assert!(second.registers.is_empty());
    assert_eq!(second.output, "");
    assert!(second.has_errors());
}

#[test]
fn test_result_serializes_to_json() {
    let src = source(&[
        "PTIN P", "INIT A 8", r#"MOVE "hi" S"#, "LIFT A", "PEND", "SEQD", "P", "NOPE", "SEQD",
    ]);
    let result = interpret(&src);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["output"], "");
    assert_eq!(json["registers"]["A"], 8);
    assert_eq!(json["registers"]["S"], "hi");
    assert_eq!(json["registers"]["PILE"], serde_json::json!([8]));
    assert_eq!(json["diagnostics"][0]["severity"], "warning");
    assert_eq!(json["diagnostics"][0]["message"], "Pattern not found: NOPE");
}
