//! Execution engine
//!
//! Walks the sequence in order and runs each named pattern from its first
//! instruction. Unknown names are skipped. There are no jumps, so a run
//! executes at most [`Program::instruction_budget`] instructions.

use crate::diagnostics::{Diagnostic, ExecError};
use crate::executor::execute;
use crate::loader::Loader;
use crate::program::Program;
use crate::trace::Tracer;
use seqd_core::{RegisterMachine, Value};
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything a run produces
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterpretResult {
    pub output: String,
    pub registers: BTreeMap<String, Value>,
    pub diagnostics: Vec<Diagnostic>,
}

impl InterpretResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }
}

/// Interpreter entry point. Each call to [`Interpreter::interpret`] starts
/// from empty registers, patterns, sequence and output.
#[derive(Default)]
pub struct Interpreter {
    tracer: Option<Box<dyn Tracer>>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a tracer for subsequent runs
    pub fn with_tracer(mut self, tracer: impl Tracer + 'static) -> Self {
        self.tracer = Some(Box::new(tracer));
        self
    }

    pub fn interpret(&mut self, source: &str) -> InterpretResult {
        let loaded = Loader::new().load(source);
        if let Some(tracer) = self.tracer.as_mut() {
            tracer.loaded(&loaded.program);
        }

        let mut diagnostics = loaded.diagnostics;
        let mut machine = RegisterMachine::new();
        self.run(&loaded.program, &mut machine, &mut diagnostics);

        let (output, registers) = machine.into_parts();
        InterpretResult {
            output,
            registers,
            diagnostics,
        }
    }

    /// Execute an already loaded program against `machine`
    pub fn run(
        &mut self,
        program: &Program,
        machine: &mut RegisterMachine,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let mut executed = 0;
        for name in &program.sequence {
            let Some(pattern) = program.find_pattern(name) else {
                if let Some(tracer) = self.tracer.as_mut() {
                    tracer.pattern_missing(name);
                }
                diagnostics.push(Diagnostic::from(&ExecError::UndefinedPattern(name.clone())));
                continue;
            };

            if let Some(tracer) = self.tracer.as_mut() {
                tracer.pattern_started(name);
            }
            for instruction in pattern {
                let result = execute(machine, instruction);
                executed += 1;
                if let Some(tracer) = self.tracer.as_mut() {
                    tracer.instruction(instruction, &result);
                }
                if let Err(e) = result {
                    diagnostics.push(
                        Diagnostic::from(&e)
                            .at_line(instruction.line)
                            .in_pattern(name.as_str()),
                    );
                }
            }
        }

        debug_assert!(executed <= program.instruction_budget());
        if let Some(tracer) = self.tracer.as_mut() {
            tracer.finished(executed);
        }
    }
}

/// Interpret `source` with no tracer installed
pub fn interpret(source: &str) -> InterpretResult {
    Interpreter::new().interpret(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        events: Rc<RefCell<Vec<String>>>,
    }

    impl Tracer for Recorder {
        fn pattern_started(&mut self, name: &str) {
            self.events.borrow_mut().push(format!("start {}", name));
        }
        fn pattern_missing(&mut self, name: &str) {
            self.events.borrow_mut().push(format!("missing {}", name));
        }
        fn instruction(
            &mut self,
            instruction: &crate::program::Instruction,
            result: &Result<(), ExecError>,
        ) {
            let status = if result.is_ok() { "ok" } else { "err" };
            self.events
                .borrow_mut()
                .push(format!("{} {}", instruction.opcode(), status));
        }
        fn finished(&mut self, executed: usize) {
            self.events.borrow_mut().push(format!("done {}", executed));
        }
    }

    #[test]
    fn test_pattern_runs_once_per_appearance() {
        let source = "PTIN P\nINCR A\nPEND\nPTIN INIT\nINIT A 0\nPEND\nSEQD\nINIT\nP\nP\nP\nSEQD\n";
        let result = interpret(source);
        assert_eq!(result.registers["A"], Value::Integer(3));
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_errors_are_located() {
        let source = "PTIN P\nINIT A 1\nDIVV A 0\nINCR A\nPEND\nSEQD\nP\nSEQD\n";
        let result = interpret(source);
        // The failed DIVV does not stop the pattern
        assert_eq!(result.registers["A"], Value::Integer(2));
        let errors: Vec<&Diagnostic> = result.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, Some(3));
        assert_eq!(errors[0].pattern.as_deref(), Some("P"));
        assert!(result.has_errors());
    }

    #[test]
    fn test_undefined_pattern_is_a_warning_only() {
        let result = interpret("SEQD\nGHOST\nSEQD\n");
        assert_eq!(result.output, "");
        assert!(result.registers.is_empty());
        assert!(!result.has_errors());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].severity, Severity::Warning);
        assert_eq!(result.diagnostics[0].message, "Pattern not found: GHOST");
    }

    #[test]
    fn test_tracer_sees_every_step() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let recorder = Recorder {
            events: Rc::clone(&events),
        };
        let mut interpreter = Interpreter::new().with_tracer(recorder);
        interpreter.interpret("PTIN P\nWAIT\nINCR A\nPEND\nSEQD\nP\nNOPE\nSEQD\n");
        assert_eq!(
            *events.borrow(),
            vec!["start P", "WAIT ok", "INCR err", "missing NOPE", "done 2"]
        );
    }

    #[test]
    fn test_reused_interpreter_starts_clean() {
        let mut interpreter = Interpreter::new();
        let first = interpreter.interpret("PTIN P\nINIT A 1\nLIFT A\nWAIT\nPEND\nSEQD\nP\nSEQD\n");
        assert_eq!(first.registers.len(), 2);
        let second = interpreter.interpret("SEQD\nP\nSEQD\n");
        assert!(second.registers.is_empty());
        assert_eq!(second.output, "");
    }
}
