use std::fmt;

use sorteiaki_core::ErrorCode;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProviderError {
    /// The platform does not expose the requested engagement data.
    Unsupported(String),
    NotAuthenticated,
    NoBusinessAccount,
    Io(String),
    Http(String),
    Decode(String),
    /// A paged listing had more pages than the configured cap.
    Truncated { listing: String, pages: usize },
}

impl ProviderError {
    /// Errors a draw must surface instead of continuing with an empty pool.
    #[must_use]
    pub const fn is_fatal_for_draw(&self) -> bool {
        matches!(self, Self::Unsupported(_) | Self::Truncated { .. })
    }

    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Unsupported(_) | Self::NoBusinessAccount => ErrorCode::ValidationError,
            Self::NotAuthenticated => ErrorCode::UsageError,
            Self::Io(_) | Self::Http(_) | Self::Decode(_) | Self::Truncated { .. } => {
                ErrorCode::ProviderFailure
            }
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(what) => write!(f, "unsupported by provider: {what}"),
            Self::NotAuthenticated => f.write_str("no access token available"),
            Self::NoBusinessAccount => {
                f.write_str("no instagram business account linked to the user's pages")
            }
            Self::Io(msg) => write!(f, "provider io error: {msg}"),
            Self::Http(msg) => write!(f, "provider http error: {msg}"),
            Self::Decode(msg) => write!(f, "provider decode error: {msg}"),
            Self::Truncated { listing, pages } => {
                write!(f, "{listing} listing still paging after {pages} pages")
            }
        }
    }
}

impl std::error::Error for ProviderError {}
