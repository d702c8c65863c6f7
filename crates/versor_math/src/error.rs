//! Quaternion error types
//!
//! Every fallible construction or operation reports one of these kinds.

use std::fmt;
use std::num::ParseFloatError;

/// Error type for quaternion construction and arithmetic
#[derive(Debug, Clone, PartialEq)]
pub enum QuaternionError {
    /// Operand cannot represent a quaternion component at all (missing value, non-real exponent)
    Type(String),
    /// Operand has the right kind but the wrong shape or content
    Value(String),
    /// Divisor or inversion target is algebraically zero
    DivisionByZero(String),
    /// Element index outside `[-4, 3]`
    IndexOutOfRange(isize),
}

impl fmt::Display for QuaternionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuaternionError::Type(msg) => write!(f, "Quaternion type error: {}", msg),
            QuaternionError::Value(msg) => write!(f, "Quaternion value error: {}", msg),
            QuaternionError::DivisionByZero(msg) => write!(f, "Quaternion division by zero: {}", msg),
            QuaternionError::IndexOutOfRange(index) => {
                write!(f, "Quaternion index {} out of range [-4, 3]", index)
            }
        }
    }
}

impl std::error::Error for QuaternionError {}

impl From<ParseFloatError> for QuaternionError {
    fn from(err: ParseFloatError) -> Self {
        QuaternionError::Value(format!("cannot be interpreted as a real number ({})", err))
    }
}
