use std::fmt;

use sorteiaki_model::ValidationError;

#[derive(Debug)]
#[non_exhaustive]
pub enum EngineError {
    Clock(sorteiaki_core::Error),
    InvalidRunId(ValidationError),
    Digest(sorteiaki_core::Error),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clock(err) => write!(f, "failed to read clock: {err}"),
            Self::InvalidRunId(err) => write!(f, "failed to build run id: {err}"),
            Self::Digest(err) => write!(f, "failed to digest result record: {err}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Clock(err) | Self::Digest(err) => Some(err),
            Self::InvalidRunId(err) => Some(err),
        }
    }
}
