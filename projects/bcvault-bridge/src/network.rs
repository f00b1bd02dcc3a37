//! Chain parameter resolution for EVM networks.
//!
//! The adapter never talks to a node; it only needs the chain id the wallet
//! core is configured for, plus the EIP-155 arithmetic tying a recovery byte
//! back to that chain id.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// An EVM network the bridge can materialize transactions for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub name: String,
    pub chain_id: u64,
}

impl Network {
    pub fn new(name: impl Into<String>, chain_id: u64) -> Self {
        Self {
            name: name.into(),
            chain_id,
        }
    }

    pub fn mainnet() -> Self {
        Self::new("mainnet", 1)
    }
}

static BUILTIN_NETWORKS: Lazy<Vec<Network>> = Lazy::new(|| {
    vec![
        Network::new("mainnet", 1),
        Network::new("sepolia", 11_155_111),
        Network::new("holesky", 17_000),
        Network::new("polygon", 137),
        Network::new("bsc", 56),
        Network::new("arbitrum", 42_161),
        Network::new("optimism", 10),
        Network::new("base", 8_453),
    ]
});

/// The networks the bridge knows chain parameters for out of the box.
pub fn builtin_networks() -> &'static [Network] {
    &BUILTIN_NETWORKS
}

/// Look a network up by its configured name.
pub fn by_name(name: &str) -> Option<Network> {
    builtin_networks()
        .iter()
        .find(|n| n.name.eq_ignore_ascii_case(name))
        .cloned()
}

/// Look a network up by chain id.
pub fn by_chain_id(chain_id: u64) -> Option<Network> {
    builtin_networks()
        .iter()
        .find(|n| n.chain_id == chain_id)
        .cloned()
}

/// Applies [EIP-155](https://eips.ethereum.org/EIPS/eip-155) to a recovery id.
pub fn to_eip155_v(recovery_id: u8, chain_id: u64) -> u64 {
    (recovery_id as u64) + 35 + chain_id * 2
}

/// Recover the chain id implied by a signature's `v` value.
///
/// Returns `None` for pre-EIP-155 values (27/28), which carry no chain id.
pub fn chain_id_from_v(v: u64) -> Option<u64> {
    if v >= 35 {
        Some((v - 35) / 2)
    } else {
        None
    }
}
