#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// The expression was empty or contained only whitespace.
    EmptyExpression,
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// The token encountered.
        token:  String,
        /// The column where the error occurred.
        column: usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The column just past the last character.
        column: usize,
    },
    /// A closing bracket was expected but something else was found.
    ExpectedClosing {
        /// The bracket that was expected.
        expected: &'static str,
        /// The column where the error occurred.
        column:   usize,
    },
    /// Found extra tokens after a complete expression.
    UnexpectedTrailingTokens {
        /// The first extra token.
        token:  String,
        /// The column where the error occurred.
        column: usize,
    },
    /// A character sequence that is not part of the grammar.
    InvalidCharacter {
        /// The offending text.
        text:   String,
        /// The column where the error occurred.
        column: usize,
    },
    /// A numeric literal was too large to be represented.
    LiteralTooLarge {
        /// The column where the error occurred.
        column: usize,
    },
    /// The expression has more tokens than the parser accepts.
    TooManyTokens {
        /// The maximum number of tokens.
        limit: usize,
    },
    /// Brackets are nested deeper than the parser accepts.
    NestingTooDeep {
        /// The maximum nesting depth.
        limit:  usize,
        /// The column of the bracket that exceeded the limit.
        column: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyExpression => write!(f, "invalid syntax: empty expression"),

            Self::UnexpectedToken { token, column } => {
                write!(f, "invalid syntax at column {column}: unexpected {token}")
            },

            Self::UnexpectedEndOfInput { column } => {
                write!(f, "invalid syntax at column {column}: unexpected end of expression")
            },

            Self::ExpectedClosing { expected, column } => write!(f,
                                                                 "invalid syntax at column {column}: expected closing '{expected}'"),

            Self::UnexpectedTrailingTokens { token, column } => write!(f,
                                                                       "invalid syntax at column {column}: extra input after expression, starting at {token}"),

            Self::InvalidCharacter { text, column } => {
                write!(f, "invalid syntax at column {column}: unrecognized input '{text}'")
            },

            Self::LiteralTooLarge { column } => {
                write!(f, "numeric literal at column {column} is too large")
            },

            Self::TooManyTokens { limit } => {
                write!(f, "expression is too long (more than {limit} tokens)")
            },

            Self::NestingTooDeep { limit, column } => write!(f,
                                                             "brackets nested more than {limit} levels deep at column {column}"),
        }
    }
}

impl std::error::Error for ParseError {}
