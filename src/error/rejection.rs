use crate::error::{ArithmeticError, DisallowedConstruct, ParseError};

/// The reason an expression was not evaluated to a number.
///
/// The three failure classes stay distinguishable so callers can match on
/// them; `Display` forwards to the wrapped error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The text is not a well-formed expression.
    Parse(ParseError),
    /// The expression is well-formed but uses a forbidden construct or name.
    Disallowed(DisallowedConstruct),
    /// Evaluation failed, e.g. division by zero.
    Arithmetic(ArithmeticError),
}

impl From<ParseError> for Rejection {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<DisallowedConstruct> for Rejection {
    fn from(error: DisallowedConstruct) -> Self {
        Self::Disallowed(error)
    }
}

impl From<ArithmeticError> for Rejection {
    fn from(error: ArithmeticError) -> Self {
        Self::Arithmetic(error)
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Disallowed(e) => write!(f, "{e}"),
            Self::Arithmetic(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Rejection {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Disallowed(e) => Some(e),
            Self::Arithmetic(e) => Some(e),
        }
    }
}
