//! Plain result records handed to the JS caller.
//!
//! These mirror the shapes the game client already consumes:
//! `{success, address?, wallet?, balance?, signature?, publicKey?, error?}` for
//! actions and `{connected, address?, wallet?}` for the status check.

use serde::{Serialize, Serializer};

use crate::types::{Balance, Connection, ConnectionStatus, SignedMessage, WalletKind};
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet: Option<WalletKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_signature")]
    pub signature: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// Bytes rather than a sequence so serde-wasm-bindgen produces a Uint8Array.
fn serialize_signature<S: Serializer>(
    signature: &Option<Vec<u8>>,
    serializer: S,
) -> core::result::Result<S::Ok, S::Error> {
    match signature {
        Some(bytes) => serializer.serialize_bytes(bytes),
        None => serializer.serialize_none(),
    }
}

impl ActionRecord {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

impl From<()> for ActionRecord {
    fn from(_: ()) -> Self {
        Self::ok()
    }
}

impl From<Connection> for ActionRecord {
    fn from(connection: Connection) -> Self {
        Self {
            address: Some(connection.address),
            wallet: Some(connection.wallet),
            ..Self::ok()
        }
    }
}

impl From<Balance> for ActionRecord {
    fn from(balance: Balance) -> Self {
        Self {
            balance: Some(balance.to_string()),
            ..Self::ok()
        }
    }
}

impl From<SignedMessage> for ActionRecord {
    fn from(signed: SignedMessage) -> Self {
        Self {
            signature: Some(signed.signature),
            public_key: Some(signed.public_key),
            ..Self::ok()
        }
    }
}

impl<T: Into<ActionRecord>> From<Result<T>> for ActionRecord {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => value.into(),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRecord {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet: Option<WalletKind>,
}

impl From<ConnectionStatus> for StatusRecord {
    fn from(status: ConnectionStatus) -> Self {
        match status {
            ConnectionStatus::Connected { address, wallet } => Self {
                connected: true,
                address: Some(address),
                wallet: Some(wallet),
            },
            ConnectionStatus::Disconnected => Self {
                connected: false,
                address: None,
                wallet: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WalletError;
    use serde_json::json;

    #[test]
    fn test_connect_record_shape() {
        let record: ActionRecord = Ok(Connection {
            address: "ABC123".to_string(),
            wallet: WalletKind::Phantom,
        })
        .into();
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"success": true, "address": "ABC123", "wallet": "phantom"})
        );
    }

    #[test]
    fn test_failure_record_shape() {
        let result: Result<()> = Err(WalletError::NotConnected);
        let record = ActionRecord::from(result);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"success": false, "error": "Wallet not connected"})
        );
    }

    #[test]
    fn test_disconnect_record_has_only_success() {
        let record = ActionRecord::from(Ok::<(), WalletError>(()));
        assert_eq!(serde_json::to_value(&record).unwrap(), json!({"success": true}));
    }

    #[test]
    fn test_balance_and_signature_records() {
        let record = ActionRecord::from(Ok::<_, WalletError>(Balance::placeholder()));
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"success": true, "balance": "0.0 SOL"})
        );

        let record = ActionRecord::from(Ok::<_, WalletError>(SignedMessage {
            signature: vec![1, 2, 3],
            public_key: "KEY".to_string(),
        }));
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"success": true, "signature": [1, 2, 3], "publicKey": "KEY"})
        );
    }

    #[test]
    fn test_status_record_shapes() {
        let connected = StatusRecord::from(ConnectionStatus::Connected {
            address: "ABC123".to_string(),
            wallet: WalletKind::Phantom,
        });
        assert_eq!(
            serde_json::to_value(&connected).unwrap(),
            json!({"connected": true, "address": "ABC123", "wallet": "phantom"})
        );
        let disconnected = StatusRecord::from(ConnectionStatus::Disconnected);
        assert_eq!(
            serde_json::to_value(&disconnected).unwrap(),
            json!({"connected": false})
        );
    }
}
