//! Hardware signing bridge for BC Vault devices.
//!
//! Presents a uniform wallet signing capability (sign transaction, sign
//! message, on-device address display) over the vendor SDK's call shape.
//! The SDK itself is consumed through the [`sdk::VaultSdk`] capability
//! trait so everything here is testable against a deterministic fake
//! device.

pub mod adapter;
pub mod config;
pub mod error;
pub mod network;
pub mod notify;
pub mod registrar;
pub mod sdk;
pub mod transaction;
pub mod utils;
pub mod wallet;

// Re-export the main types
pub use adapter::{BoundSigner, VaultBridge};
pub use config::BridgeConfig;
pub use error::{BridgeError, Result};
pub use network::Network;
pub use notify::{LogNotifier, Notifier};
pub use sdk::{DeviceHandle, VaultSdk, WalletAccount, WalletKind};
pub use transaction::{SignedTransaction, UnsignedTransaction};
pub use wallet::{WalletSigner, BCVAULT};

/// Initialize logging for host apps that have no subscriber of their own.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse().expect("static directive parses")),
        )
        .try_init();
}
