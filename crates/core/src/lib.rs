//! seqd core: the register machine behind the seqd pattern language
//!
//! - Value: what a register holds (Integer, Text, or the PILE stack)
//! - RegisterMachine: named registers, the PILE stack, and the output buffer
//!
//! # Modules
//!
//! - `error`: Errors raised by the machine itself
//! - `machine`: Register store, PILE and output buffer
//! - `value`: Core Value enum

pub mod error;
pub mod machine;
pub mod value;

pub use error::MachineError;
pub use machine::{PILE, RegisterMachine, TTY0, is_reserved};
pub use value::Value;
