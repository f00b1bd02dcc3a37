//! Name-registrar contract interface.
//!
//! The ENS base registrar ABI ships bundled as data; callers use it to build
//! `contractData` payloads for the adapter. The contract itself lives
//! on-chain and is not re-implemented here.

use crate::error::{BridgeError, Result};
use ethers_core::abi::{Abi, Function};
use once_cell::sync::Lazy;

const BASE_REGISTRAR_ABI_JSON: &str = include_str!("abi/base_registrar.json");

static BASE_REGISTRAR_ABI: Lazy<Abi> = Lazy::new(|| {
    serde_json::from_str(BASE_REGISTRAR_ABI_JSON).expect("bundled registrar ABI is valid JSON")
});

/// The parsed base registrar ABI.
pub fn base_registrar_abi() -> &'static Abi {
    &BASE_REGISTRAR_ABI
}

/// Look up a registrar function by name.
pub fn function(name: &str) -> Result<&'static Function> {
    base_registrar_abi()
        .function(name)
        .map_err(|e| BridgeError::Abi(e.to_string()))
}

/// 4-byte call selector for a registrar function.
pub fn selector(name: &str) -> Result<[u8; 4]> {
    Ok(function(name)?.short_signature())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abi_parses_and_is_nonempty() {
        let abi = base_registrar_abi();
        assert!(abi.functions().count() > 20);
        assert!(abi.events().any(|e| e.name == "NameRegistered"));
    }

    #[test]
    fn erc721_selectors_match_known_values() {
        assert_eq!(selector("approve").unwrap(), [0x09, 0x5e, 0xa7, 0xb3]);
        assert_eq!(selector("getApproved").unwrap(), [0x08, 0x18, 0x12, 0xfc]);
        assert_eq!(selector("transferFrom").unwrap(), [0x23, 0xb8, 0x72, 0xdd]);
    }

    #[test]
    fn unknown_function_is_an_error() {
        assert!(matches!(
            function("definitelyNotInTheRegistrar"),
            Err(BridgeError::Abi(_))
        ));
    }

    #[test]
    fn registrar_specific_functions_present() {
        assert!(function("register").is_ok());
        assert!(function("renew").is_ok());
        assert!(function("reclaim").is_ok());
        assert!(function("nameExpires").is_ok());
        assert!(function("available").is_ok());
    }
}
