//! seqd: loader and interpreter for the seqd pattern language
//!
//! Source text is loaded into named instruction groups ("patterns") and a run
//! order ("sequence"), then the sequence is executed against a register
//! machine with a value stack (`PILE`) and an output sink (`TTY0`).
//!
//! ```rust
//! let source = "
//! PTIN P
//!   INIT A 5
//!   INIT B 3
//!   ADDV A B
//!   LIFT A
//!   DROP TTY0
//! PEND
//! SEQD
//!   P
//! SEQD
//! ";
//! let result = seqd::interpret(source);
//! assert_eq!(result.output, "8\n");
//! ```
//!
//! Runs never fail as a whole. Instructions that cannot execute are
//! reported in [`InterpretResult::diagnostics`] and execution continues.

pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod executor;
pub mod loader;
pub mod program;
pub mod report;
pub mod tokenizer;
pub mod trace;

pub use config::{OutputFormat, RunConfig};
pub use diagnostics::{Diagnostic, ExecError, Severity};
pub use engine::{InterpretResult, Interpreter, interpret};
pub use loader::{Loaded, Loader};
pub use program::{Instruction, Program};
pub use seqd_core::{PILE, RegisterMachine, TTY0, Value};
pub use trace::{LogTracer, Tracer};
