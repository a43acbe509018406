use core::fmt;

use serde::{Deserialize, Serialize};

const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Wallet implementations the adapter knows how to detect.
///
/// Only [`WalletKind::Phantom`] is wired into the connect/sign flow; MetaMask is
/// recognised for availability checks so the host UI can offer it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    Phantom,
    MetaMask,
}

impl WalletKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            WalletKind::Phantom => "Phantom",
            WalletKind::MetaMask => "MetaMask",
        }
    }

    /// Id used in result records, e.g. `wallet: "phantom"`.
    pub fn id(&self) -> &'static str {
        match self {
            WalletKind::Phantom => "phantom",
            WalletKind::MetaMask => "metamask",
        }
    }

    /// Global property the extension injects its provider under.
    pub fn injection_key(&self) -> &'static str {
        match self {
            WalletKind::Phantom => "solana",
            WalletKind::MetaMask => "ethereum",
        }
    }

    /// Boolean property the injected provider uses to identify itself.
    pub fn identity_flag(&self) -> &'static str {
        match self {
            WalletKind::Phantom => "isPhantom",
            WalletKind::MetaMask => "isMetaMask",
        }
    }

    pub fn install_url(&self) -> &'static str {
        match self {
            WalletKind::Phantom => "https://phantom.app/",
            WalletKind::MetaMask => "https://metamask.io/download/",
        }
    }
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// An established connection as reported back to the caller of `connect`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub address: String,
    pub wallet: WalletKind,
}

/// Outcome of reconciling the local session with the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected { address: String, wallet: WalletKind },
    Disconnected,
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected { .. })
    }
}

/// Provider reply to a connection request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectResponse {
    /// Base58 public key, as produced by the provider's `PublicKey.toString()`.
    pub public_key: String,
}

/// Signature returned by the provider for an arbitrary message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedMessage {
    pub signature: Vec<u8>,
    pub public_key: String,
}

/// Account balance in lamports.
///
/// `get_balance` currently only ever returns [`Balance::placeholder`]; no
/// ledger query is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Balance {
    pub lamports: u64,
}

impl Balance {
    pub fn placeholder() -> Self {
        Self { lamports: 0 }
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.lamports / LAMPORTS_PER_SOL;
        let frac = self.lamports % LAMPORTS_PER_SOL;
        let digits = format!("{frac:09}");
        let trimmed = digits.trim_end_matches('0');
        let frac_str = if trimmed.is_empty() { "0" } else { trimmed };
        write!(f, "{whole}.{frac_str} SOL")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_balance_renders_zero() {
        assert_eq!(Balance::placeholder().to_string(), "0.0 SOL");
    }

    #[test]
    fn test_balance_formatting() {
        assert_eq!(Balance { lamports: 1_500_000_000 }.to_string(), "1.5 SOL");
        assert_eq!(Balance { lamports: 2_000_000_000 }.to_string(), "2.0 SOL");
        assert_eq!(Balance { lamports: 1 }.to_string(), "0.000000001 SOL");
    }

    #[test]
    fn test_wallet_kind_metadata() {
        assert_eq!(WalletKind::Phantom.injection_key(), "solana");
        assert_eq!(WalletKind::Phantom.identity_flag(), "isPhantom");
        assert_eq!(WalletKind::MetaMask.injection_key(), "ethereum");
        assert_eq!(WalletKind::Phantom.to_string(), "phantom");
        assert_eq!(
            serde_json::to_string(&WalletKind::MetaMask).unwrap(),
            "\"metamask\""
        );
    }
}
