//! Diagnostics collected during loading and execution
//!
//! Nothing in a seqd run is fatal. Conditions that the output buffer does
//! not report are recorded here instead, so callers and tests can inspect
//! them alongside the result.

use seqd_core::MachineError;
use serde::Serialize;

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Hint,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Hint => "hint",
        })
    }
}

/// A failed instruction or sequence entry.
///
/// Every variant leaves the register machine untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// `MOVE "...` without a closing quote
    MalformedStringLiteral,
    /// Arithmetic or move on a value of the wrong type, or on an unset register
    InvalidOperand { register: String, reason: String },
    MissingOperand { opcode: String, expected: usize },
    DivisionByZero,
    ReservedRegister(String),
    /// Sequence entry naming a pattern that was never defined
    UndefinedPattern(String),
}

impl ExecError {
    pub fn severity(&self) -> Severity {
        match self {
            ExecError::UndefinedPattern(_) => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl std::fmt::Display for ExecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecError::MalformedStringLiteral => {
                write!(f, "Malformed string literal in MOVE instruction")
            }
            ExecError::InvalidOperand { register, reason } => {
                write!(f, "invalid operand '{}': {}", register, reason)
            }
            ExecError::MissingOperand { opcode, expected } => write!(
                f,
                "{} expects {} operand{}",
                opcode,
                expected,
                if *expected == 1 { "" } else { "s" }
            ),
            ExecError::DivisionByZero => write!(f, "division by zero"),
            ExecError::ReservedRegister(name) => {
                write!(f, "register '{}' is reserved and cannot be assigned", name)
            }
            ExecError::UndefinedPattern(name) => write!(f, "Pattern not found: {}", name),
        }
    }
}

impl std::error::Error for ExecError {}

impl From<MachineError> for ExecError {
    fn from(e: MachineError) -> Self {
        match e {
            MachineError::ReservedRegister(name) => ExecError::ReservedRegister(name),
        }
    }
}

/// A located diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Source line (1-indexed), when the finding maps to one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Pattern being executed, for runtime findings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            line: None,
            pattern: None,
            message: message.into(),
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn in_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl From<&ExecError> for Diagnostic {
    fn from(e: &ExecError) -> Self {
        Diagnostic::new(e.severity(), e.to_string())
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ", self.severity)?;
        if let Some(line) = self.line {
            write!(f, "line {}: ", line)?;
        }
        if let Some(pattern) = &self.pattern {
            write!(f, "in {}: ", pattern)?;
        }
        f.write_str(&self.message)
    }
}
