use thiserror::Error;

/// Failures that abort the evaluation of a slice.
#[derive(Error, Debug)]
pub enum ContigError {
    /// Oracle output violates PSL invariants (unsupported query strand,
    /// block arrays of different lengths, unparsable columns)
    #[error("Malformed projection: {0}")]
    MalformedProjection(String),
    /// A region record could not be parsed
    #[error("Malformed region record at line {line}: {message}")]
    MalformedRegionRecord { line: usize, message: String },
    /// The liftover process could not be run or exited with failure
    #[error("Liftover invocation failed: {0}")]
    OracleInvocation(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ContigError {
    pub(crate) fn region(line: usize, message: impl Into<String>) -> Self {
        ContigError::MalformedRegionRecord {
            line,
            message: message.into(),
        }
    }
}
