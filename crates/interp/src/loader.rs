//! Loader for seqd source
//!
//! Syntax:
//! ```text
//! ; comment
//! PTIN name
//!   OPCODE arg1 arg2
//!   ...
//! PEND
//! SEQD
//!   name
//!   ...
//! SEQD
//! ```
//!
//! The loader keeps two independent flags rather than one state enum:
//! `recording_sequence` (toggled by `SEQD`) and `active_pattern` (set by
//! `PTIN`, cleared by `PEND`). Both can be on at once; an ordinary line then
//! goes to the sequence. Directives are matched case-insensitively, and
//! nothing here ever fails.

use crate::diagnostics::{Diagnostic, Severity};
use crate::program::{Instruction, Program};
use crate::tokenizer::{SourceLine, tokenize};

/// Loader-only keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Toggle sequence recording
    Seqd,
    /// Open (or reset) a pattern definition
    Ptin,
    /// Close the active pattern
    Pend,
}

impl Directive {
    pub fn parse(token: &str) -> Option<Directive> {
        match token.to_uppercase().as_str() {
            "SEQD" => Some(Directive::Seqd),
            "PTIN" => Some(Directive::Ptin),
            "PEND" => Some(Directive::Pend),
            _ => None,
        }
    }
}

/// Output of a load: the program plus whatever the loader noticed
#[derive(Debug, Clone, Default)]
pub struct Loaded {
    pub program: Program,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Default)]
pub struct Loader {
    recording_sequence: bool,
    active_pattern: Option<String>,
    program: Program,
    diagnostics: Vec<Diagnostic>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(mut self, source: &str) -> Loaded {
        for line in tokenize(source) {
            self.load_line(line);
        }
        Loaded {
            program: self.program,
            diagnostics: self.diagnostics,
        }
    }

    fn load_line(&mut self, line: SourceLine) {
        let Some(first) = line.tokens.first() else {
            return;
        };

        match Directive::parse(first) {
            Some(Directive::Seqd) => {
                self.recording_sequence = !self.recording_sequence;
            }
            Some(Directive::Ptin) => match line.tokens.get(1) {
                Some(name) => {
                    self.program.patterns.insert(name.clone(), Vec::new());
                    self.active_pattern = Some(name.clone());
                }
                None => {
                    // A nameless PTIN still ends the previous definition
                    self.active_pattern = None;
                    self.diagnostics.push(
                        Diagnostic::new(Severity::Warning, "PTIN without a pattern name")
                            .at_line(line.number),
                    );
                }
            },
            Some(Directive::Pend) => {
                self.active_pattern = None;
            }
            None => self.load_instruction(line),
        }
    }

    /// Route an ordinary line; sequence recording takes priority
    fn load_instruction(&mut self, line: SourceLine) {
        if self.recording_sequence {
            let mut tokens = line.tokens;
            tokens.truncate(1);
            self.program.sequence.extend(tokens);
        } else if let Some(name) = &self.active_pattern {
            self.program
                .patterns
                .entry(name.clone())
                .or_default()
                .push(Instruction::new(line.tokens, line.number));
        }
        // Anything else is outside both contexts and dropped silently
    }
}
