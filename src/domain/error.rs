//! Domain error types.

/// Top-level error type for slippagelab.
#[derive(Debug, thiserror::Error)]
pub enum SlippageLabError {
    #[error("error processing file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("file {path} is {size} bytes, limit is {limit}")]
    TooLarge { path: String, size: u64, limit: u64 },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SlippageLabError {
    pub fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// Process exit status for this error.
    pub fn exit_status(&self) -> u8 {
        match self {
            SlippageLabError::Io(_) => 1,
            SlippageLabError::ConfigParse { .. } | SlippageLabError::ConfigInvalid { .. } => 2,
            SlippageLabError::Read { .. } | SlippageLabError::TooLarge { .. } => 3,
            SlippageLabError::Report { .. } => 4,
        }
    }
}

impl From<&SlippageLabError> for std::process::ExitCode {
    fn from(err: &SlippageLabError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
