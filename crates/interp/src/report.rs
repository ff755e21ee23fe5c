//! Rendering of run results for the CLI

use crate::engine::InterpretResult;
use crate::loader::Loaded;
use seqd_core::{PILE, Value};
use std::fmt::Write;

const NO_OUTPUT: &str = "No output generated.";
const NO_REGISTERS: &str = "No registers used.";

/// Display label for a register's type
pub fn type_label(name: &str, value: &Value) -> &'static str {
    match value {
        _ if name == PILE => "Array",
        Value::Integer(_) => "Number",
        Value::Text(_) => "String",
        Value::Stack(_) => "Array",
    }
}

/// Value as shown in a register listing: text quoted, stacks bracketed
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Integer(n) => n.to_string(),
        Value::Text(s) => format!("\"{}\"", s),
        Value::Stack(items) => {
            let inner: Vec<String> = items.iter().map(Value::to_string).collect();
            format!("[{}]", inner.join(", "))
        }
    }
}

/// Text report: the output buffer, then optionally the registers
pub fn render_text(result: &InterpretResult, show_registers: bool) -> String {
    // Writing into a String cannot fail, so `writeln!` results are ignored
    let mut out = String::new();
    if result.output.is_empty() {
        out.push_str(NO_OUTPUT);
        out.push('\n');
    } else {
        out.push_str(&result.output);
    }

    if show_registers {
        out.push_str("\nRegisters:\n");
        if result.registers.is_empty() {
            out.push_str("  ");
            out.push_str(NO_REGISTERS);
            out.push('\n');
        }
        for (name, value) in &result.registers {
            let _ = writeln!(
                out,
                "  {} = {} ({})",
                name,
                display_value(value),
                type_label(name, value)
            );
        }
    }
    out
}

/// Summary of a loaded program for `seqd check`
pub fn render_loaded(loaded: &Loaded) -> String {
    // Writing into a String cannot fail, so `writeln!` results are ignored
    let program = &loaded.program;
    let mut out = String::new();
    let _ = writeln!(out, "Sequence: {}", program.sequence.join(" "));
    let _ = writeln!(out, "Patterns:");
    for name in program.pattern_names() {
        let count = program.find_pattern(name).map_or(0, |p| p.len());
        let _ = writeln!(
            out,
            "  {} ({} instruction{})",
            name,
            count,
            if count == 1 { "" } else { "s" }
        );
    }
    out
}
