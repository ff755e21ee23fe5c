//! Register machine errors

/// Error raised when an instruction tries to touch the machine in a way
/// the value model forbids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineError {
    /// `PILE` and `TTY0` cannot be assigned directly
    ReservedRegister(String),
}

impl std::fmt::Display for MachineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MachineError::ReservedRegister(name) => {
                write!(f, "register '{}' is reserved and cannot be assigned", name)
            }
        }
    }
}

impl std::error::Error for MachineError {}
