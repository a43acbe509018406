//! Session state and its single transition function.
//!
//! Every mutation of the adapter's connection record, whether it comes from a
//! call made by the host or from an event emitted by the provider, is expressed
//! as a [`SessionEvent`] and applied through [`Session::apply`].

use log::debug;

use crate::types::{ConnectionStatus, WalletKind};

/// In-memory record of the current wallet connection.
///
/// Fields are private so the invariant (`connected` implies a non-empty
/// address and a wallet kind, disconnected implies both cleared) can only be
/// changed through [`Session::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    connected: bool,
    address: Option<String>,
    wallet_kind: Option<WalletKind>,
}

/// A single transition of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Connected { address: String, wallet: WalletKind },
    Disconnected,
    AccountChanged(Option<String>),
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn wallet_kind(&self) -> Option<WalletKind> {
        self.wallet_kind
    }

    pub fn status(&self) -> ConnectionStatus {
        match (self.connected, &self.address, self.wallet_kind) {
            (true, Some(address), Some(wallet)) => ConnectionStatus::Connected {
                address: address.clone(),
                wallet,
            },
            _ => ConnectionStatus::Disconnected,
        }
    }

    pub fn apply(&mut self, event: SessionEvent) {
        debug!("session transition: {event:?}");
        match event {
            SessionEvent::Connected { address, wallet } => {
                if address.is_empty() {
                    debug!("ignoring connect without an address");
                    return;
                }
                self.connected = true;
                self.address = Some(address);
                self.wallet_kind = Some(wallet);
            }
            SessionEvent::Disconnected => self.clear(),
            SessionEvent::AccountChanged(Some(address)) if !address.is_empty() => {
                // Switching accounts only makes sense on a live session.
                if self.connected {
                    self.address = Some(address);
                }
            }
            SessionEvent::AccountChanged(_) => self.clear(),
        }
    }

    fn clear(&mut self) {
        self.connected = false;
        self.address = None;
        self.wallet_kind = None;
    }

    /// Checks the connected/cleared invariant.
    pub fn is_consistent(&self) -> bool {
        if self.connected {
            self.address.as_deref().is_some_and(|a| !a.is_empty()) && self.wallet_kind.is_some()
        } else {
            self.address.is_none() && self.wallet_kind.is_none()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected(address: &str) -> Session {
        let mut session = Session::new();
        session.apply(SessionEvent::Connected {
            address: address.to_string(),
            wallet: WalletKind::Phantom,
        });
        session
    }

    #[test]
    fn test_new_session_is_disconnected() {
        let session = Session::new();
        assert!(!session.is_connected());
        assert_eq!(session.address(), None);
        assert_eq!(session.wallet_kind(), None);
        assert!(session.is_consistent());
        assert_eq!(session.status(), ConnectionStatus::Disconnected);
    }

    #[test]
    fn test_connect_sets_all_fields() {
        let session = connected("ABC123");
        assert!(session.is_connected());
        assert_eq!(session.address(), Some("ABC123"));
        assert_eq!(session.wallet_kind(), Some(WalletKind::Phantom));
        assert!(session.is_consistent());
    }

    #[test]
    fn test_connect_with_empty_address_is_ignored() {
        let mut session = Session::new();
        session.apply(SessionEvent::Connected {
            address: String::new(),
            wallet: WalletKind::Phantom,
        });
        assert_eq!(session, Session::new());
    }

    #[test]
    fn test_disconnect_clears() {
        let mut session = connected("ABC123");
        session.apply(SessionEvent::Disconnected);
        assert_eq!(session, Session::new());
    }

    #[test]
    fn test_account_changed_updates_only_address() {
        let mut session = connected("ABC123");
        session.apply(SessionEvent::AccountChanged(Some("XYZ789".to_string())));
        assert!(session.is_connected());
        assert_eq!(session.address(), Some("XYZ789"));
        assert_eq!(session.wallet_kind(), Some(WalletKind::Phantom));
    }

    #[test]
    fn test_account_changed_without_key_clears() {
        let mut session = connected("ABC123");
        session.apply(SessionEvent::AccountChanged(None));
        assert_eq!(session, Session::new());

        let mut session = connected("ABC123");
        session.apply(SessionEvent::AccountChanged(Some(String::new())));
        assert_eq!(session, Session::new());
    }

    #[test]
    fn test_account_changed_while_disconnected_keeps_session_cleared() {
        let mut session = Session::new();
        session.apply(SessionEvent::AccountChanged(Some("XYZ789".to_string())));
        assert_eq!(session, Session::new());
        assert!(session.is_consistent());
    }
}
