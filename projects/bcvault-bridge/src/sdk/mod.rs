//! Capability interface over the BC Vault vendor SDK.
//!
//! The vendor ships an opaque SDK that talks to the device through its own
//! daemon transport. The bridge never sees that transport; it only depends on
//! the call surface below, so unit tests can substitute the deterministic
//! [`mock::MockVault`] device.

pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque handle for one physical signer among those the SDK discovered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceHandle(pub u32);

/// Wallet/currency types the vendor firmware distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum WalletKind {
    Bitcoin,
    BitcoinCash,
    Litecoin,
    Dogecoin,
    Ethereum,
    Ripple,
}

/// A wallet account as reported by the device for one [`WalletKind`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAccount {
    pub kind: WalletKind,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
}

/// Optional per-chain knobs the vendor call contract tucks under `advanced`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedOptions {
    pub eth: EthAdvanced,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthAdvanced {
    pub nonce: u64,
}

/// The vendor reshaping of an unsigned Ethereum transaction.
///
/// Field names follow the SDK's wire contract (`feeCount` is the gas limit,
/// `feePrice` the gas price in wei as a decimal string, `amount` the value in
/// wei). An absent recipient stays absent; the nonce is always carried under
/// `advanced.eth`, defaulting to 0 rather than being omitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceTransactionRequest {
    pub fee_count: u64,
    pub fee_price: String,
    pub amount: u128,
    pub contract_data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    pub from: String,
    pub advanced: AdvancedOptions,
}

/// Error shapes the vendor SDK surfaces.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SdkError {
    #[error("daemon transport error: {0}")]
    Transport(String),

    #[error("global PIN rejected by device")]
    PinRejected,

    #[error("request canceled on device")]
    UserCanceled,

    #[error("device rejected request: {0}")]
    Rejected(String),

    #[error("malformed device response: {0}")]
    Malformed(String),
}

/// The slice of the vendor SDK the bridge depends on.
///
/// One physical device services one call at a time; the SDK does not queue,
/// retry or time out on the bridge's behalf, so callers serialize requests.
#[async_trait]
pub trait VaultSdk: Send + Sync {
    /// Enumerate connected devices.
    async fn get_devices(&self) -> Result<Vec<DeviceHandle>, SdkError>;

    /// Unlock a device via the global PIN entry flow.
    async fn enter_global_pin(
        &self,
        device: &DeviceHandle,
        kind: WalletKind,
    ) -> Result<(), SdkError>;

    /// List the device's wallet accounts for the given wallet kinds.
    async fn get_batch_wallet_details(
        &self,
        device: &DeviceHandle,
        kinds: &[WalletKind],
    ) -> Result<Vec<WalletAccount>, SdkError>;

    /// Have the device sign a transaction. Returns the raw signed
    /// transaction as an RLP hex string. `broadcast` asks the daemon to also
    /// submit it; the bridge always passes `false`.
    async fn generate_signed_transaction(
        &self,
        device: &DeviceHandle,
        kind: WalletKind,
        request: &DeviceTransactionRequest,
        broadcast: bool,
    ) -> Result<String, SdkError>;

    /// Have the device sign arbitrary data for `address`. Returns the
    /// signature as a hex string of r ‖ s ‖ v.
    async fn sign_data(
        &self,
        device: &DeviceHandle,
        kind: WalletKind,
        address: &str,
        message: &[u8],
    ) -> Result<String, SdkError>;

    /// Show `address` on the device's own screen for out-of-band
    /// verification. The address is passed without its `0x` prefix.
    async fn display_address(
        &self,
        device: &DeviceHandle,
        kinds: &[WalletKind],
        address: &str,
    ) -> Result<(), SdkError>;
}
