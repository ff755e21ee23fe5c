//! Register machine
//!
//! Named scalar registers, the `PILE` value stack, and an append-only
//! output buffer. A machine lives for exactly one interpretation run.
//!
//! `PILE` is kept apart from the scalar registers so that the one-stack
//! invariant holds by construction: `set` refuses the reserved names and
//! only `lift`/`drop_top` ever touch the stack.

use crate::error::MachineError;
use crate::value::Value;
use std::collections::BTreeMap;

/// Reserved register holding the value stack
pub const PILE: &str = "PILE";

/// Reserved virtual destination meaning "append to output"
pub const TTY0: &str = "TTY0";

/// Returns true for names no instruction may assign directly
pub fn is_reserved(name: &str) -> bool {
    name == PILE || name == TTY0
}

#[derive(Debug, Default, Clone)]
pub struct RegisterMachine {
    registers: BTreeMap<String, Value>,
    /// `None` until the first `LIFT`
    pile: Option<Vec<Value>>,
    output: String,
}

impl RegisterMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a register. `PILE` reads as a `Value::Stack` once it exists.
    pub fn get(&self, name: &str) -> Option<Value> {
        if name == PILE {
            return self.pile.as_ref().map(|items| Value::Stack(items.clone()));
        }
        self.registers.get(name).cloned()
    }

    /// Borrow a scalar register without cloning
    pub fn scalar(&self, name: &str) -> Option<&Value> {
        self.registers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        if name == PILE {
            self.pile.is_some()
        } else {
            self.registers.contains_key(name)
        }
    }

    /// Assign a scalar register, creating it if absent
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), MachineError> {
        if is_reserved(name) {
            return Err(MachineError::ReservedRegister(name.to_string()));
        }
        debug_assert!(!value.is_stack(), "only PILE may hold a stack");
        self.registers.insert(name.to_string(), value);
        Ok(())
    }

    /// Push onto `PILE`, creating it empty first if needed
    pub fn lift(&mut self, value: Value) {
        self.pile.get_or_insert_with(Vec::new).push(value);
    }

    /// Pop the top of `PILE`. `None` when the pile is empty or was never created.
    pub fn drop_top(&mut self) -> Option<Value> {
        self.pile.as_mut().and_then(Vec::pop)
    }

    pub fn pile_depth(&self) -> usize {
        self.pile.as_ref().map_or(0, Vec::len)
    }

    /// Append one newline-terminated line to the output buffer
    pub fn emit_line(&mut self, line: impl std::fmt::Display) {
        use std::fmt::Write;
        // Writing into a String cannot fail
        let _ = writeln!(self.output, "{}", line);
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consume the machine, yielding the output buffer and the final registers
    pub fn into_parts(self) -> (String, BTreeMap<String, Value>) {
        let mut registers = self.registers;
        if let Some(items) = self.pile {
            registers.insert(PILE.to_string(), Value::Stack(items));
        }
        (self.output, registers)
    }
}
