use crate::ast::NodeKind;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents a well-formed expression that uses something outside the
/// allow-list.
pub enum DisallowedConstruct {
    /// A node kind that is not permitted.
    Node {
        /// The kind of the offending node.
        kind:   NodeKind,
        /// The column where the node starts.
        column: usize,
    },
    /// A call whose target is not a permitted function name.
    Call {
        /// A short description of the call target.
        target:    String,
        /// The names that may be called.
        permitted: String,
        /// The column where the call starts.
        column:    usize,
    },
    /// A reference to a name that is not in the name table.
    UnknownName {
        /// The referenced name.
        name:   String,
        /// The column where the name starts.
        column: usize,
    },
}

impl std::fmt::Display for DisallowedConstruct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Node { kind, column } => {
                write!(f, "disallowed expression node at column {column}: {kind}")
            },
            Self::Call { target,
                         permitted,
                         column, } => write!(f,
                                             "disallowed call at column {column}: {target}; only safe functions are allowed: {permitted}"),
            Self::UnknownName { name, column } => {
                write!(f, "disallowed name at column {column}: '{name}'")
            },
        }
    }
}

impl std::error::Error for DisallowedConstruct {}
