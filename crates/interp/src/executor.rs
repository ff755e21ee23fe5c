//! Instruction executor
//!
//! Runs one instruction record against a [`RegisterMachine`].
//!
//! # Operands
//!
//! Wherever an instruction reads a value it goes through [`resolve`]: an
//! existing register wins, then a base-10 integer literal, then the token
//! itself as text.
//!
//! # Arithmetic
//!
//! `ADDV SUBV MULT DIVV INCR DECR` require an existing `Integer` destination
//! and an `Integer` source. All of them use wrapping semantics, and `DIVV`
//! rounds toward negative infinity. A failed instruction changes nothing.
//!
//! Opcodes are matched exactly as written; `addv` is an unknown instruction.

use crate::diagnostics::ExecError;
use crate::program::Instruction;
use seqd_core::{PILE, RegisterMachine, TTY0, Value, is_reserved};

/// Line emitted by the `WAIT` placeholder
pub const WAIT_NOTICE: &str = "Waiting for input...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Init,
    Move,
    Lift,
    Drop,
    Addv,
    Subv,
    Mult,
    Divv,
    Incr,
    Decr,
    Wait,
}

impl Opcode {
    /// Exact, case-sensitive lookup
    pub fn parse(token: &str) -> Option<Opcode> {
        let opcode = match token {
            "INIT" => Opcode::Init,
            "MOVE" => Opcode::Move,
            "LIFT" => Opcode::Lift,
            "DROP" => Opcode::Drop,
            "ADDV" => Opcode::Addv,
            "SUBV" => Opcode::Subv,
            "MULT" => Opcode::Mult,
            "DIVV" => Opcode::Divv,
            "INCR" => Opcode::Incr,
            "DECR" => Opcode::Decr,
            "WAIT" => Opcode::Wait,
            _ => return None,
        };
        Some(opcode)
    }

    pub fn name(self) -> &'static str {
        match self {
            Opcode::Init => "INIT",
            Opcode::Move => "MOVE",
            Opcode::Lift => "LIFT",
            Opcode::Drop => "DROP",
            Opcode::Addv => "ADDV",
            Opcode::Subv => "SUBV",
            Opcode::Mult => "MULT",
            Opcode::Divv => "DIVV",
            Opcode::Incr => "INCR",
            Opcode::Decr => "DECR",
            Opcode::Wait => "WAIT",
        }
    }

    /// Number of argument tokens the instruction requires.
    ///
    /// `INIT` reads a second token when present; a missing literal parses as 0.
    pub fn arity(self) -> usize {
        match self {
            Opcode::Wait => 0,
            Opcode::Init | Opcode::Lift | Opcode::Drop | Opcode::Incr | Opcode::Decr => 1,
            Opcode::Move
            | Opcode::Addv
            | Opcode::Subv
            | Opcode::Mult
            | Opcode::Divv => 2,
        }
    }
}

/// Resolve an operand token to a value
pub fn resolve(machine: &RegisterMachine, token: &str) -> Value {
    if let Some(value) = machine.get(token) {
        return value;
    }
    match token.parse::<i64>() {
        Ok(n) => Value::Integer(n),
        Err(_) => Value::Text(token.to_string()),
    }
}

/// Resolve an operand that must not be the PILE stack
fn resolve_scalar(machine: &RegisterMachine, token: &str) -> Result<Value, ExecError> {
    if token == PILE && machine.contains(PILE) {
        return Err(ExecError::InvalidOperand {
            register: PILE.to_string(),
            reason: "the value stack cannot be used as an operand".to_string(),
        });
    }
    Ok(resolve(machine, token))
}

/// Parse the leading decimal integer of a literal, `0` if there is none.
///
/// `"12abc"` is 12; a literal that overflows `i64` is 0.
pub fn parse_leading_int(literal: &str) -> i64 {
    let unsigned = literal.strip_prefix(['-', '+']).unwrap_or(literal);
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return 0;
    }
    let sign_len = literal.len() - unsigned.len();
    literal[..sign_len + digits].parse().unwrap_or(0)
}

/// Integer division rounding toward negative infinity
pub fn floor_div(dividend: i64, divisor: i64) -> Result<i64, ExecError> {
    if divisor == 0 {
        return Err(ExecError::DivisionByZero);
    }
    let quotient = dividend.wrapping_div(divisor);
    if dividend.wrapping_rem(divisor) != 0 && ((dividend < 0) != (divisor < 0)) {
        Ok(quotient.wrapping_sub(1))
    } else {
        Ok(quotient)
    }
}

/// Execute one instruction.
///
/// Unknown opcodes are not errors: they append `Unknown instruction: <op>`
/// to the output and execution moves on.
pub fn execute(machine: &mut RegisterMachine, instruction: &Instruction) -> Result<(), ExecError> {
    let op = instruction.opcode();
    let Some(opcode) = Opcode::parse(op) else {
        machine.emit_line(format_args!("Unknown instruction: {}", op));
        return Ok(());
    };

    let args = instruction.args();
    if opcode == Opcode::Move && args.first().is_some_and(|a| a.starts_with('"')) {
        return move_literal(machine, args);
    }
    if args.len() < opcode.arity() {
        return Err(ExecError::MissingOperand {
            opcode: opcode.name().to_string(),
            expected: opcode.arity(),
        });
    }

    match opcode {
        Opcode::Init => {
            let literal = args.get(1).map_or(0, |lit| parse_leading_int(lit));
            machine.set(&args[0], Value::Integer(literal))?;
        }
        Opcode::Move => {
            let value = resolve_scalar(machine, &args[0])?;
            machine.set(&args[1], value)?;
        }
        Opcode::Lift => {
            let value = resolve_scalar(machine, &args[0])?;
            machine.lift(value);
        }
        Opcode::Drop => drop_into(machine, &args[0])?,
        Opcode::Addv => arithmetic(machine, &args[0], Some(args[1].as_str()), |a, b| {
            Ok(a.wrapping_add(b))
        })?,
        Opcode::Subv => arithmetic(machine, &args[0], Some(args[1].as_str()), |a, b| {
            Ok(a.wrapping_sub(b))
        })?,
        Opcode::Mult => arithmetic(machine, &args[0], Some(args[1].as_str()), |a, b| {
            Ok(a.wrapping_mul(b))
        })?,
        Opcode::Divv => arithmetic(machine, &args[0], Some(args[1].as_str()), floor_div)?,
        Opcode::Incr => arithmetic(machine, &args[0], None, |a, _| Ok(a.wrapping_add(1)))?,
        Opcode::Decr => arithmetic(machine, &args[0], None, |a, _| Ok(a.wrapping_sub(1)))?,
        Opcode::Wait => machine.emit_line(WAIT_NOTICE),
    }
    Ok(())
}

/// `MOVE "some text" DEST`: rejoin the arguments and cut between the first
/// and last quote. The destination is the final argument token.
fn move_literal(machine: &mut RegisterMachine, args: &[String]) -> Result<(), ExecError> {
    let joined = args.join(" ");
    let close = match joined.rfind('"') {
        Some(index) if index > 0 => index,
        _ => return Err(ExecError::MalformedStringLiteral),
    };
    let text = joined[1..close].to_string();
    let Some(destination) = args.last() else {
        return Err(ExecError::MalformedStringLiteral);
    };
    machine.set(destination, Value::Text(text))?;
    Ok(())
}

/// Pop the top of PILE into a register or, for `TTY0`, the output buffer.
/// An empty or missing PILE makes this a no-op.
fn drop_into(machine: &mut RegisterMachine, destination: &str) -> Result<(), ExecError> {
    if destination != TTY0 && is_reserved(destination) {
        return Err(ExecError::ReservedRegister(destination.to_string()));
    }
    let Some(value) = machine.drop_top() else {
        return Ok(());
    };
    if destination == TTY0 {
        machine.emit_line(value);
        Ok(())
    } else {
        machine.set(destination, value).map_err(ExecError::from)
    }
}

/// Apply `op` to the integer in `destination` and the resolved `source`.
/// Unary forms pass `0` as the source.
fn arithmetic<F>(
    machine: &mut RegisterMachine,
    destination: &str,
    source: Option<&str>,
    op: F,
) -> Result<(), ExecError>
where
    F: FnOnce(i64, i64) -> Result<i64, ExecError>,
{
    if is_reserved(destination) {
        return Err(ExecError::ReservedRegister(destination.to_string()));
    }
    let current = match machine.scalar(destination) {
        Some(value) => expect_integer(destination, value)?,
        None => {
            return Err(ExecError::InvalidOperand {
                register: destination.to_string(),
                reason: "register is not set".to_string(),
            });
        }
    };
    let operand = match source {
        Some(token) => expect_integer(token, &resolve_scalar(machine, token)?)?,
        None => 0,
    };
    machine.set(destination, Value::Integer(op(current, operand)?))?;
    Ok(())
}

fn expect_integer(token: &str, value: &Value) -> Result<i64, ExecError> {
    value.as_integer().ok_or_else(|| ExecError::InvalidOperand {
        register: token.to_string(),
        reason: format!("expected Integer, found {}", value.kind()),
    })
}
