use thiserror::Error;

use crate::types::WalletKind;

/// Coarse classification of a [`WalletError`], used by callers that only need
/// to decide what to do next (prompt an install, ask the user to connect, or
/// surface the provider's message).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Provider absent or session not connected. Reported, never retried.
    PreconditionNotMet,
    /// The user declined in the extension UI, or the provider faulted.
    ProviderRejected,
    /// The hosting environment itself is unusable (no window, bad config).
    Environment,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("{name} wallet not installed. Please install {name} wallet first.", name = .0.display_name())]
    NotInstalled(WalletKind),

    #[error("Wallet not connected")]
    NotConnected,

    /// Message is passed through verbatim from the provider.
    #[error("{0}")]
    Provider(String),

    #[error("Environment error: {0}")]
    Environment(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl WalletError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WalletError::NotInstalled(_) | WalletError::NotConnected => ErrorKind::PreconditionNotMet,
            WalletError::Provider(_) => ErrorKind::ProviderRejected,
            WalletError::Environment(_) | WalletError::Configuration(_) => ErrorKind::Environment,
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        WalletError::Provider(message.into())
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        WalletError::Configuration(format!("{err}"))
    }
}

pub type Result<T> = core::result::Result<T, WalletError>;
