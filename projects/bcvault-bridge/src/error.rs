use crate::sdk::SdkError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("No BC Vault device found")]
    DeviceUnavailable,

    #[error("Device authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Device sign request failed: {0}")]
    SignRequestFailed(String),

    #[error("Invalid chain id in signature: expected {expected}, got {}", display_chain_id(.got))]
    ChainIdMismatch { expected: u64, got: Option<u64> },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Hex error: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("ABI error: {0}")]
    Abi(String),

    #[error("SDK error: {0}")]
    Sdk(#[from] SdkError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;

fn display_chain_id(chain_id: &Option<u64>) -> String {
    match chain_id {
        Some(id) => id.to_string(),
        None => "pre-EIP-155".to_string(),
    }
}

/// Map a vendor SDK error shape onto the uniform presentation the wallet
/// core expects. PIN failures stay distinguishable so initialization flows
/// can surface them separately from plain sign failures.
pub fn translate_sdk_error(error: SdkError) -> BridgeError {
    match error {
        SdkError::PinRejected => BridgeError::AuthenticationFailed(error.to_string()),
        other => BridgeError::SignRequestFailed(other.to_string()),
    }
}
