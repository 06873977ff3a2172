use std::path::PathBuf;

/// Represents the failures of a tool invocation.
///
/// A tool that runs to completion reports its outcome as text, including
/// rejected expressions; these errors cover what prevents a tool from
/// running at all.
#[derive(Debug)]
pub enum ToolError {
    /// No tool with the requested name is registered.
    UnknownTool {
        /// The requested name.
        name: String,
    },
    /// The arguments are not a JSON object of the expected shape.
    InvalidArguments {
        /// The tool that was called.
        tool:   &'static str,
        /// The decoding error.
        source: serde_json::Error,
    },
    /// The FAQ file exists but could not be read.
    FaqUnreadable {
        /// The FAQ path.
        path:   PathBuf,
        /// The I/O error.
        source: std::io::Error,
    },
    /// The FAQ file is not a JSON array of entries.
    FaqMalformed {
        /// The FAQ path.
        path:   PathBuf,
        /// The decoding error.
        source: serde_json::Error,
    },
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTool { name } => write!(f, "unknown tool '{name}'"),
            Self::InvalidArguments { tool, source } => {
                write!(f, "invalid arguments for tool '{tool}': {source}")
            },
            Self::FaqUnreadable { path, source } => {
                write!(f, "failed to read FAQ file '{}': {source}", path.display())
            },
            Self::FaqMalformed { path, source } => {
                write!(f, "FAQ file '{}' is malformed: {source}", path.display())
            },
        }
    }
}

impl std::error::Error for ToolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnknownTool { .. } => None,
            Self::InvalidArguments { source, .. } | Self::FaqMalformed { source, .. } => Some(source),
            Self::FaqUnreadable { source, .. } => Some(source),
        }
    }
}
