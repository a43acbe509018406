//! wallet-bridge
//!
//! Platform-neutral core of the browser wallet adapter used by the web build of
//! the game client. It owns the session state, funnels every mutation through
//! [`session::Session::apply`], and talks to the wallet extension only through
//! the [`traits::WalletHost`] and [`traits::SolanaProvider`] capabilities. The
//! `wallet-bridge-web-sys` crate implements those over `window.solana`.
//!
//! ```rust,ignore
//! let adapter = WalletAdapter::new(host, AdapterConfig::default());
//! adapter.setup_event_listeners()?;
//! let connection = adapter.connect().await?;
//! let signed = adapter.sign_message("hello").await?;
//! ```

pub mod adapter;
pub mod config;
pub mod error;
pub mod record;
pub mod session;
pub mod traits;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock_provider;

pub use crate::adapter::WalletAdapter;
pub use crate::config::AdapterConfig;
pub use crate::error::{ErrorKind, Result, WalletError};
pub use crate::record::{ActionRecord, StatusRecord};
pub use crate::session::{Session, SessionEvent};
pub use crate::traits::{EventHandler, ProviderEvent, SolanaProvider, WalletHost};
pub use crate::types::{
    Balance, ConnectResponse, Connection, ConnectionStatus, SignedMessage, WalletKind,
};
