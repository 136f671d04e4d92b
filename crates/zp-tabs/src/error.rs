//! Conversion error types.

/// A tab header outside the recognized set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized tab `{header}`")]
pub struct UnknownTabError {
    /// The offending header, trimmed.
    pub header: String,
}

/// Error converting a document.
///
/// Line numbers are 1-indexed positions in the input document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// A `#` line inside a tabbed block is not a recognized tab header.
    #[error("line {line}: {source}")]
    UnrecognizedTabHeader {
        line: usize,
        #[source]
        source: UnknownTabError,
    },
    /// The tabbed block starting at `line` has neither a closing `---` nor a
    /// following `# Response` heading.
    #[error("line {line}: tabbed block has no closing `---` and no `# Response` heading")]
    MalformedBlockBoundary { line: usize },
    /// The HTTP tab at `line` has no closed code fence inside its block.
    #[error("line {line}: HTTP tab has no closed code fence")]
    UnclosedCodeFence { line: usize },
}

impl ConvertError {
    /// Input line the error refers to.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::UnrecognizedTabHeader { line, .. }
            | Self::MalformedBlockBoundary { line }
            | Self::UnclosedCodeFence { line } => *line,
        }
    }
}
