//! The signing adapter between the wallet core and a BC Vault device.
//!
//! Lifecycle is one-directional: [`VaultBridge::discover`] enumerates and
//! unlocks the first connected device (Uninitialized → Ready), then
//! [`VaultBridge::bind_account`] captures one of its addresses into an
//! immutable [`BoundSigner`] (Ready → Bound). There is no teardown; the
//! bridge lives as long as the flow that created it.

use crate::error::{translate_sdk_error, BridgeError, Result};
use crate::network::{chain_id_from_v, Network};
use crate::notify::Notifier;
use crate::sdk::{DeviceHandle, VaultSdk, WalletAccount, WalletKind};
use crate::transaction::{decode_signature, SignedTransaction, UnsignedTransaction};
use crate::utils::{buffer_from_hex, strip_hex_prefix};
use crate::wallet::{WalletSigner, BCVAULT};
use async_trait::async_trait;
use ethers_core::types::Address;
use std::sync::Arc;

/// The wallet kind every adapter call is scoped to.
const WALLET_KIND: WalletKind = WalletKind::Ethereum;

/// A discovered, unlocked BC Vault device with its Ethereum accounts.
pub struct VaultBridge<S: VaultSdk> {
    sdk: Arc<S>,
    device: DeviceHandle,
    network: Network,
    notifier: Arc<dyn Notifier>,
    accounts: Vec<WalletAccount>,
}

impl<S: VaultSdk> VaultBridge<S> {
    /// Enumerate devices, unlock the first one via the global PIN flow and
    /// fetch its Ethereum accounts.
    ///
    /// Fails loudly: no device is `DeviceUnavailable`, a rejected PIN is
    /// `AuthenticationFailed`, and a failed account query propagates. An
    /// empty or partial result is never returned as success.
    ///
    /// Only the first discovered device is used; multi-device selection is
    /// left to the surrounding flow.
    pub async fn discover(
        sdk: Arc<S>,
        network: Network,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let devices = sdk.get_devices().await.map_err(|e| {
            log::error!("Device enumeration failed: {}", e);
            BridgeError::DeviceUnavailable
        })?;
        let device = *devices.first().ok_or(BridgeError::DeviceUnavailable)?;
        log::info!(
            "🔍 Found {} BC Vault device(s), using device {}",
            devices.len(),
            device.0
        );

        sdk.enter_global_pin(&device, WALLET_KIND)
            .await
            .map_err(|e| BridgeError::AuthenticationFailed(e.to_string()))?;

        let accounts = sdk
            .get_batch_wallet_details(&device, &[WALLET_KIND])
            .await
            .map_err(translate_sdk_error)?;
        log::info!("✅ Device {} reports {} account(s)", device.0, accounts.len());

        Ok(Self {
            sdk,
            device,
            network,
            notifier,
            accounts,
        })
    }

    /// Accounts the device reported during discovery.
    pub fn accounts(&self) -> &[WalletAccount] {
        &self.accounts
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Bind one of the discovered addresses as the signing identity.
    ///
    /// No device I/O happens here; the address and device reference are
    /// captured immutably in the returned signer.
    pub fn bind_account(&self, address: &str) -> Result<BoundSigner<S>> {
        let address = address
            .trim()
            .parse::<Address>()
            .map_err(|e| BridgeError::InvalidAddress(e.to_string()))?;
        Ok(BoundSigner {
            sdk: Arc::clone(&self.sdk),
            device: self.device,
            network: self.network.clone(),
            notifier: Arc::clone(&self.notifier),
            address,
        })
    }
}

/// A signer bound to one address on one device.
pub struct BoundSigner<S: VaultSdk> {
    sdk: Arc<S>,
    device: DeviceHandle,
    network: Network,
    notifier: Arc<dyn Notifier>,
    address: Address,
}

impl<S: VaultSdk> BoundSigner<S> {
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a transaction on the device.
    ///
    /// The bound account is authoritative over which address signs; any
    /// caller-supplied sender is ignored. After signing, the chain id
    /// implied by the returned `v` is checked against the requested one —
    /// a mismatch is reported through the notifier but the signed
    /// transaction is still returned (detection without refusal, kept as
    /// the documented product behavior).
    pub async fn sign_transaction(&self, tx: &UnsignedTransaction) -> Result<SignedTransaction> {
        let from = self.address;
        let chain_id = tx.chain_id.unwrap_or(self.network.chain_id);
        let request = tx.to_device_request(from)?;

        let response = self
            .sdk
            .generate_signed_transaction(&self.device, WALLET_KIND, &request, false)
            .await
            .map_err(translate_sdk_error)?;
        let raw = buffer_from_hex(&response)?;
        let signature = decode_signature(&raw)?;

        let signed = tx.clone().into_signed(from, chain_id, signature);

        let recovered = chain_id_from_v(signed.v);
        if recovered != Some(chain_id) {
            let error = BridgeError::ChainIdMismatch {
                expected: chain_id,
                got: recovered,
            };
            tracing::warn!("{}", error);
            self.notifier.error(&error.to_string());
        }
        Ok(signed)
    }

    /// Sign raw message bytes on the device.
    ///
    /// The device responds with a hex string; it is sliced at fixed offsets
    /// into r (32 bytes), s (32 bytes) and v (1 byte) and returned
    /// concatenated in that order.
    pub async fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>> {
        let address = format!("{:#x}", self.address);
        let response = self
            .sdk
            .sign_data(&self.device, WALLET_KIND, &address, message)
            .await
            .map_err(translate_sdk_error)?;

        let signature = strip_hex_prefix(response.trim());
        // the daemon response is untrusted; slicing below assumes ASCII hex
        if !signature.is_ascii() || signature.len() != 130 {
            return Err(BridgeError::SignRequestFailed(format!(
                "expected 130 hex characters of signature, got {}",
                signature.chars().count()
            )));
        }
        let mut out = Vec::with_capacity(65);
        out.extend_from_slice(&buffer_from_hex(&signature[0..64])?);
        out.extend_from_slice(&buffer_from_hex(&signature[64..128])?);
        out.extend_from_slice(&buffer_from_hex(&signature[128..130])?);
        Ok(out)
    }

    /// Show the bound address on the device screen.
    ///
    /// The result is awaited and reported to the caller; on success a toast
    /// is additionally emitted so the user knows to look at the device.
    pub async fn display_address(&self) -> Result<()> {
        // the device screen shows the bare address, no 0x
        let bare = format!("{:x}", self.address);
        self.sdk
            .display_address(&self.device, &[WALLET_KIND], &bare)
            .await
            .map_err(translate_sdk_error)?;
        self.notifier.success("Check device for address");
        Ok(())
    }
}

#[async_trait]
impl<S: VaultSdk> WalletSigner for BoundSigner<S> {
    fn identifier(&self) -> &str {
        BCVAULT
    }

    fn address(&self) -> Address {
        self.address
    }

    fn is_hardware(&self) -> bool {
        true
    }

    async fn sign_transaction(&self, tx: &UnsignedTransaction) -> Result<SignedTransaction> {
        BoundSigner::sign_transaction(self, tx).await
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>> {
        BoundSigner::sign_message(self, message).await
    }

    async fn display_address(&self) -> Result<()> {
        BoundSigner::display_address(self).await
    }
}
