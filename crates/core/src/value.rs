//! Register values
//!
//! A register holds exactly one `Value`. Only the reserved `PILE` register
//! ever holds a `Value::Stack`; every other register is an `Integer` or
//! a `Text`.

use serde::Serialize;
use std::fmt;

/// Value: what a register talks about
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Text(String),
    /// LIFO contents of `PILE`, bottom first
    Stack(Vec<Value>),
}

impl Value {
    /// Name of the variant, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "Integer",
            Value::Text(_) => "Text",
            Value::Stack(_) => "Stack",
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_stack(&self) -> bool {
        matches!(self, Value::Stack(_))
    }
}

/// Textual form written to the output buffer by `DROP TTY0`.
///
/// A stack renders as its elements joined with `,`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
            Value::Stack(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_scalars() {
        assert_eq!(Value::Integer(-42).to_string(), "-42");
        assert_eq!(Value::from("hello world").to_string(), "hello world");
    }

    #[test]
    fn test_display_stack_joins_with_commas() {
        let stack = Value::Stack(vec![Value::Integer(1), Value::from("two"), Value::Integer(3)]);
        assert_eq!(stack.to_string(), "1,two,3");
        assert_eq!(Value::Stack(Vec::new()).to_string(), "");
    }

    #[test]
    fn test_as_integer() {
        assert_eq!(Value::Integer(7).as_integer(), Some(7));
        assert_eq!(Value::from("7").as_integer(), None);
        assert_eq!(Value::Stack(vec![]).as_integer(), None);
    }

    #[test]
    fn test_serializes_untagged() {
        let stack = Value::Stack(vec![Value::Integer(8), Value::from("x")]);
        let json = serde_json::to_string(&stack).unwrap();
        assert_eq!(json, r#"[8,"x"]"#);
    }
}
