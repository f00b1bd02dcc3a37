//! The wallet-core capability interface a bound signer satisfies.

use crate::error::Result;
use crate::transaction::{SignedTransaction, UnsignedTransaction};
use async_trait::async_trait;
use ethers_core::types::Address;

/// Identifier the wallet-type enumeration uses for BC Vault signers.
pub const BCVAULT: &str = "bcvault";

/// Uniform signer surface the wallet core drives.
///
/// Hardware-backed implementations hold no key material; every signing
/// operation is serviced by the device.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Wallet-type identifier, e.g. [`BCVAULT`].
    fn identifier(&self) -> &str;

    /// The account this signer produces signatures for.
    fn address(&self) -> Address;

    /// Derivation path, when the backend exposes one. BC Vault does not.
    fn derivation_path(&self) -> Option<&str> {
        None
    }

    fn is_hardware(&self) -> bool;

    fn needs_password(&self) -> bool {
        false
    }

    /// Sign a transaction on the device and return it broadcast-ready.
    async fn sign_transaction(&self, tx: &UnsignedTransaction) -> Result<SignedTransaction>;

    /// Sign raw message bytes; returns the 65-byte r ‖ s ‖ v signature.
    async fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>>;

    /// Show the bound address on the device screen for out-of-band
    /// verification against phishing or UI spoofing.
    async fn display_address(&self) -> Result<()>;
}
