use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{info, warn};

use crate::config::AdapterConfig;
use crate::error::WalletError;
use crate::session::{Session, SessionEvent};
use crate::traits::{EventHandler, ProviderEvent, SolanaProvider, WalletHost};
use crate::types::{Balance, Connection, ConnectionStatus, SignedMessage, WalletKind};
use crate::Result;

/// Mediates between the host application and an injected wallet provider.
///
/// The session is shared with the provider event handler installed by
/// [`WalletAdapter::setup_event_listeners`]. Borrows of it are never held
/// across an `.await`, so a pending `connect` and a later `check_connection`
/// may interleave; each transition is still applied atomically.
pub struct WalletAdapter<H: WalletHost> {
    host: H,
    config: AdapterConfig,
    session: Rc<RefCell<Session>>,
    listening: Cell<bool>,
}

impl<H: WalletHost> WalletAdapter<H> {
    pub fn new(host: H, config: AdapterConfig) -> Self {
        Self {
            host,
            config,
            session: Rc::new(RefCell::new(Session::new())),
            listening: Cell::new(false),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.session.borrow().clone()
    }

    pub fn is_provider_available(&self, kind: WalletKind) -> bool {
        self.host.detect(kind)
    }

    fn phantom(&self) -> Option<H::Provider> {
        if !self.is_provider_available(WalletKind::Phantom) {
            return None;
        }
        self.host.solana_provider().filter(|p| p.is_phantom())
    }

    fn dispatch(&self, event: SessionEvent) {
        self.session.borrow_mut().apply(event);
    }

    pub async fn connect(&self) -> Result<Connection> {
        let Some(provider) = self.phantom() else {
            if self.config.open_install_page {
                if let Err(e) = self.host.open_in_new_context(&self.config.install_url) {
                    warn!("failed to open install page {}: {e}", self.config.install_url);
                }
            }
            return Err(WalletError::NotInstalled(WalletKind::Phantom));
        };

        let response = provider.connect().await.map_err(|e| {
            warn!("wallet connect failed: {e}");
            e
        })?;
        if response.public_key.is_empty() {
            return Err(WalletError::provider("Wallet returned an empty public key"));
        }

        let connection = Connection {
            address: response.public_key,
            wallet: WalletKind::Phantom,
        };
        self.dispatch(SessionEvent::Connected {
            address: connection.address.clone(),
            wallet: connection.wallet,
        });
        info!("wallet connected: {}", connection.address);
        Ok(connection)
    }

    /// Disconnects and clears the session.
    ///
    /// The session is cleared even when the provider's disconnect fails; the
    /// failure is still reported to the caller.
    pub async fn disconnect(&self) -> Result<()> {
        let backed_by_phantom = self.session.borrow().wallet_kind() == Some(WalletKind::Phantom);
        let result = match self.host.solana_provider() {
            Some(provider) if backed_by_phantom => provider.disconnect().await,
            _ => Ok(()),
        };
        self.dispatch(SessionEvent::Disconnected);
        match &result {
            Ok(()) => info!("wallet disconnected"),
            Err(e) => warn!("wallet disconnect failed, session cleared anyway: {e}"),
        }
        result
    }

    pub fn check_connection(&self) -> ConnectionStatus {
        let Some(provider) = self.phantom() else {
            return ConnectionStatus::Disconnected;
        };
        if !provider.is_connected() {
            return ConnectionStatus::Disconnected;
        }
        match provider.public_key().filter(|key| !key.is_empty()) {
            Some(address) => {
                self.dispatch(SessionEvent::Connected {
                    address: address.clone(),
                    wallet: WalletKind::Phantom,
                });
                ConnectionStatus::Connected {
                    address,
                    wallet: WalletKind::Phantom,
                }
            }
            None => {
                warn!("provider reports connected but exposes no public key");
                ConnectionStatus::Disconnected
            }
        }
    }

    /// Always returns [`Balance::placeholder`] once connected: no ledger is
    /// queried yet.
    pub async fn get_balance(&self) -> Result<Balance> {
        let session = self.session.borrow();
        if !session.is_connected() || session.address().is_none() {
            return Err(WalletError::NotConnected);
        }
        Ok(Balance::placeholder())
    }

    pub async fn sign_message(&self, message: &str) -> Result<SignedMessage> {
        {
            let session = self.session.borrow();
            if !session.is_connected() || session.wallet_kind() != Some(WalletKind::Phantom) {
                return Err(WalletError::NotConnected);
            }
        }
        let provider = self
            .phantom()
            .ok_or(WalletError::NotInstalled(WalletKind::Phantom))?;
        provider.sign_message(message.as_bytes()).await.map_err(|e| {
            warn!("message signing failed: {e}");
            e
        })
    }

    /// Subscribes the session to provider events, at most once per adapter.
    /// Returns `false` when no provider is available to subscribe to.
    pub fn setup_event_listeners(&self) -> Result<bool> {
        if self.listening.get() {
            return Ok(true);
        }
        let Some(provider) = self.phantom() else {
            return Ok(false);
        };
        let session = Rc::clone(&self.session);
        let handler: EventHandler = Rc::new(move |event: ProviderEvent| {
            let transition = match event {
                ProviderEvent::Connect(Some(address)) => {
                    info!("Wallet connected");
                    SessionEvent::Connected {
                        address,
                        wallet: WalletKind::Phantom,
                    }
                }
                ProviderEvent::Connect(None) => {
                    warn!("connect event without a public key, ignoring");
                    return;
                }
                ProviderEvent::Disconnect => {
                    info!("Wallet disconnected");
                    SessionEvent::Disconnected
                }
                ProviderEvent::AccountChanged(key) => {
                    info!("Account changed: {key:?}");
                    SessionEvent::AccountChanged(key)
                }
            };
            session.borrow_mut().apply(transition);
        });
        provider.subscribe(handler)?;
        self.listening.set(true);
        Ok(true)
    }
}
