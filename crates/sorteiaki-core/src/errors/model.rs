use std::collections::BTreeMap;
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExitCode {
    Success = 0,
    Usage = 2,
    Validation = 3,
    DependencyFailure = 4,
    Internal = 10,
}

impl ExitCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Usage => "usage",
            Self::Validation => "validation",
            Self::DependencyFailure => "dependency_failure",
            Self::Internal => "internal",
        }
    }
}

/// Stable machine codes carried in [`MachineError::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    UsageError,
    ValidationError,
    ConfigError,
    NoEligibleParticipants,
    ProviderFailure,
    VerificationMismatch,
    InternalError,
}

impl ErrorCode {
    pub const ALL: [Self; 7] = [
        Self::UsageError,
        Self::ValidationError,
        Self::ConfigError,
        Self::NoEligibleParticipants,
        Self::ProviderFailure,
        Self::VerificationMismatch,
        Self::InternalError,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UsageError => "usage_error",
            Self::ValidationError => "validation_error",
            Self::ConfigError => "config_error",
            Self::NoEligibleParticipants => "no_eligible_participants",
            Self::ProviderFailure => "provider_failure",
            Self::VerificationMismatch => "verification_mismatch",
            Self::InternalError => "internal_error",
        }
    }

    #[must_use]
    pub const fn exit_code(self) -> ExitCode {
        match self {
            Self::UsageError => ExitCode::Usage,
            Self::ValidationError
            | Self::ConfigError
            | Self::NoEligibleParticipants
            | Self::VerificationMismatch => ExitCode::Validation,
            Self::ProviderFailure => ExitCode::DependencyFailure,
            Self::InternalError => ExitCode::Internal,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigPathScope {
    User,
    Workspace,
}

#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    SerdeJson(serde_json::Error),
    Clock(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SerdeJson(err) => write!(f, "serde json error: {err}"),
            Self::Clock(message) => write!(f, "clock error: {message}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SerdeJson(err) => Some(err),
            Self::Clock(_) => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::SerdeJson(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineError {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: BTreeMap<String, String>,
}

impl MachineError {
    #[must_use]
    pub fn new(code: ErrorCode, message: &str) -> Self {
        Self {
            code: code.as_str().to_string(),
            message: message.to_string(),
            details: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_detail(mut self, key: &str, value: &str) -> Self {
        self.details.insert(key.to_string(), value.to_string());
        self
    }
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for MachineError {}
