//! Capability traits the adapter is written against.
//!
//! The browser crate implements these over `window.solana`; tests use the mock
//! host from [`crate::mock_provider`]. All futures are `?Send` since the only
//! real environment is a single-threaded page.

use std::rc::Rc;

use async_trait::async_trait;

use crate::types::{ConnectResponse, SignedMessage, WalletKind};
use crate::Result;

/// Events a provider emits on its own schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    /// `connect`, carrying the provider's current public key if it exposes one.
    Connect(Option<String>),
    /// `disconnect`
    Disconnect,
    /// `accountChanged`; `None` when the user switched to an account the page
    /// is not authorised for.
    AccountChanged(Option<String>),
}

pub type EventHandler = Rc<dyn Fn(ProviderEvent)>;

/// A Solana-style injected provider (Phantom's `window.solana`).
#[async_trait(?Send)]
pub trait SolanaProvider {
    fn is_phantom(&self) -> bool;

    /// Connection state as reported by the extension, independent of ours.
    fn is_connected(&self) -> bool;

    fn public_key(&self) -> Option<String>;

    /// Suspends until the user approves or rejects in the extension UI.
    async fn connect(&self) -> Result<ConnectResponse>;

    async fn disconnect(&self) -> Result<()>;

    async fn sign_message(&self, message: &[u8]) -> Result<SignedMessage>;

    /// Registers `handler` for `connect`, `disconnect` and `accountChanged`.
    /// Subscriptions last for the lifetime of the page.
    fn subscribe(&self, handler: EventHandler) -> Result<()>;
}

/// The environment providers are injected into.
pub trait WalletHost {
    type Provider: SolanaProvider + Clone + 'static;

    /// Whether the global object for `kind` exists and carries its identity flag.
    fn detect(&self, kind: WalletKind) -> bool;

    fn solana_provider(&self) -> Option<Self::Provider>;

    /// Opens `url` in a new browsing context.
    fn open_in_new_context(&self, url: &str) -> Result<()>;
}
