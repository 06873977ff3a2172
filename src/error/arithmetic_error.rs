#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while evaluating a validated
/// expression.
pub enum ArithmeticError {
    /// Attempted division or modulo by zero, or raised zero to a negative
    /// power.
    DivisionByZero {
        /// The column of the failing operation.
        column: usize,
    },
    /// The result does not fit the numeric type, or is not finite.
    Overflow {
        /// The column of the failing operation.
        column: usize,
    },
    /// The operation is undefined for its operands.
    Domain {
        /// Details about the domain violation.
        details: String,
        /// The column of the failing operation.
        column:  usize,
    },
    /// A value had an unexpected or incompatible type.
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The column of the failing operation.
        column:  usize,
    },
    /// The wrong number of arguments was supplied to a function.
    ArgumentCountMismatch {
        /// The called function.
        name:     String,
        /// A description of the accepted argument counts.
        expected: String,
        /// The number of arguments supplied.
        found:    usize,
        /// The column of the call.
        column:   usize,
    },
}

impl std::fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DivisionByZero { column } => write!(f, "division by zero at column {column}"),
            Self::Overflow { column } => {
                write!(f, "numeric overflow at column {column}: result is out of range")
            },
            Self::Domain { details, column } => {
                write!(f, "math domain error at column {column}: {details}")
            },
            Self::TypeError { details, column } => {
                write!(f, "type error at column {column}: {details}")
            },
            Self::ArgumentCountMismatch { name,
                                          expected,
                                          found,
                                          column, } => write!(f,
                                                              "{name}() at column {column} takes {expected} argument(s) but {found} were given"),
        }
    }
}

impl std::error::Error for ArithmeticError {}
