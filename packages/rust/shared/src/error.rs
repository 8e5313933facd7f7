//! Error taxonomy for InterwikiExtracts.
//!
//! Every failure in the retrieval pipeline is one of these variants. Errors
//! carry no payload: the stable message key is the whole contract, and the
//! host renders it through its own message catalog (see [`crate::messages`]).

/// Top-level error type for all extract operations.
///
/// All variants are terminal to the invocation; nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// No remote API endpoint could be resolved.
    #[error("no remote API endpoint could be resolved")]
    NoApi,

    /// The remote page does not exist.
    #[error("the remote page does not exist")]
    MissingTitle,

    /// The requested section does not exist on the remote page.
    ///
    /// Kept in the taxonomy and the message catalog, but the remote
    /// error-code mapping never produces it; section lookup failures
    /// surface as [`ExtractError::InvalidSection`] or the generic error.
    #[error("the requested section does not exist")]
    NoSuchSection,

    /// The requested section number or name is invalid per the remote API.
    #[error("the requested section is invalid")]
    InvalidSection,

    /// Transport failure, unparsable JSON, or an unrecognized remote error.
    #[error("could not retrieve the extract")]
    Generic,
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ExtractError>;

impl ExtractError {
    /// The stable message key for this error, as used in message lookup
    /// names (`interwikiextracts-<key>`).
    pub fn key(&self) -> &'static str {
        match self {
            Self::NoApi => "no-api",
            Self::MissingTitle => "missing-title",
            Self::NoSuchSection => "no-such-section",
            Self::InvalidSection => "invalid-section",
            Self::Generic => "error",
        }
    }
}
