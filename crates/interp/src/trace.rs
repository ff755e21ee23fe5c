//! Execution tracing hook
//!
//! The interpreter reports phase transitions and every executed instruction
//! to an optional [`Tracer`]. Nothing is logged unless one is installed.

use crate::diagnostics::ExecError;
use crate::program::{Instruction, Program};
use tracing::{debug, info, trace};

/// Observer for an interpretation run. All methods default to no-ops.
pub trait Tracer {
    /// Loading finished
    fn loaded(&mut self, _program: &Program) {}

    fn pattern_started(&mut self, _name: &str) {}

    /// A sequence entry names no defined pattern
    fn pattern_missing(&mut self, _name: &str) {}

    /// An instruction ran; `result` is its outcome
    fn instruction(&mut self, _instruction: &Instruction, _result: &Result<(), ExecError>) {}

    /// Execution finished; `executed` counts instructions run
    fn finished(&mut self, _executed: usize) {}
}

/// Forwards trace events to the `tracing` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn loaded(&mut self, program: &Program) {
        debug!(
            patterns = program.patterns.len(),
            budget = program.instruction_budget(),
            sequence = ?program.sequence,
            "program loaded"
        );
    }

    fn pattern_started(&mut self, name: &str) {
        debug!(pattern = name, "executing pattern");
    }

    fn pattern_missing(&mut self, name: &str) {
        debug!(pattern = name, "pattern not found");
    }

    fn instruction(&mut self, instruction: &Instruction, result: &Result<(), ExecError>) {
        match result {
            Ok(()) => trace!(line = instruction.line, op = ?instruction.tokens, "executed"),
            Err(e) => debug!(line = instruction.line, op = ?instruction.tokens, error = %e, "failed"),
        }
    }

    fn finished(&mut self, executed: usize) {
        info!(executed, "run complete");
    }
}
