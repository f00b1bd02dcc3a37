//! Canonical Ethereum transaction model and the vendor translation.
//!
//! [`UnsignedTransaction`] is the wallet-core shape; the bridge reshapes it
//! into a [`DeviceTransactionRequest`] before handing it to the device, and
//! re-attaches the returned signature without touching any other field.

use crate::error::{BridgeError, Result};
use crate::sdk::{AdvancedOptions, DeviceTransactionRequest, EthAdvanced};
use crate::utils::buffer_from_hex;
use ethers_core::types::transaction::eip2718::TypedTransaction;
use ethers_core::types::{Address, Bytes, NameOrAddress, Signature, TransactionRequest, H256, U256};
use ethers_core::utils::keccak256;
use serde::{Deserialize, Serialize};

/// An unsigned legacy (EIP-155) Ethereum transaction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UnsignedTransaction {
    /// Recipient; `None` for contract creation.
    pub to: Option<Address>,
    /// Value in wei.
    pub value: U256,
    /// Call data.
    pub data: Bytes,
    /// Gas limit.
    pub gas_limit: U256,
    /// Gas price in wei.
    pub gas_price: U256,
    /// Sender nonce; `None` lets the device/daemon pick one.
    pub nonce: Option<U256>,
    /// Chain id; `None` falls back to the network the signer is bound to.
    pub chain_id: Option<u64>,
}

/// The unsigned transaction plus the signature the device produced,
/// re-encoded for broadcast.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignedTransaction {
    /// The input transaction, non-signature fields unchanged.
    pub transaction: UnsignedTransaction,
    /// The account that signed.
    pub from: Address,
    pub v: u64,
    pub r: U256,
    pub s: U256,
    /// RLP-encoded signed transaction, ready for `eth_sendRawTransaction`.
    pub raw_transaction: Bytes,
    /// keccak256 of the raw transaction.
    pub hash: H256,
}

impl UnsignedTransaction {
    /// Reshape into the vendor SDK's call contract.
    ///
    /// Every field maps losslessly: big-integer fields become the SDK's
    /// numeric representations, absent value/nonce map to 0 (never omitted),
    /// and a request starts with no recipient so an absent `to` cannot leak
    /// stale caller state.
    pub fn to_device_request(&self, from: Address) -> Result<DeviceTransactionRequest> {
        let nonce = match self.nonce {
            Some(nonce) => try_u64(nonce, "nonce")?,
            None => 0,
        };
        Ok(DeviceTransactionRequest {
            fee_count: try_u64(self.gas_limit, "gasLimit")?,
            fee_price: self.gas_price.to_string(),
            amount: try_u128(self.value, "value")?,
            contract_data: format!("0x{}", hex::encode(self.data.as_ref())),
            to: self.to.map(|address| format!("{:#x}", address)),
            from: format!("{:#x}", from),
            advanced: AdvancedOptions {
                eth: EthAdvanced { nonce },
            },
        })
    }

    /// Inverse of [`to_device_request`](Self::to_device_request).
    pub fn from_device_request(request: &DeviceTransactionRequest, chain_id: u64) -> Result<Self> {
        let to = request
            .to
            .as_deref()
            .map(|address| {
                address
                    .parse::<Address>()
                    .map_err(|e| BridgeError::InvalidAddress(e.to_string()))
            })
            .transpose()?;
        Ok(Self {
            to,
            value: U256::from(request.amount),
            data: Bytes::from(buffer_from_hex(&request.contract_data)?),
            gas_limit: U256::from(request.fee_count),
            gas_price: U256::from_dec_str(&request.fee_price)
                .map_err(|e| BridgeError::Encoding(format!("feePrice: {}", e)))?,
            nonce: Some(U256::from(request.advanced.eth.nonce)),
            chain_id: Some(chain_id),
        })
    }

    /// Materialize as an ethers request against the given sender and chain.
    pub fn to_request(&self, from: Address, chain_id: u64) -> TransactionRequest {
        TransactionRequest {
            from: Some(from),
            to: self.to.map(NameOrAddress::Address),
            gas: Some(self.gas_limit),
            gas_price: Some(self.gas_price),
            value: Some(self.value),
            data: Some(self.data.clone()),
            nonce: self.nonce,
            chain_id: Some(chain_id.into()),
            ..Default::default()
        }
    }

    /// Attach a device signature, producing the broadcast-ready encoding.
    pub fn into_signed(self, from: Address, chain_id: u64, signature: Signature) -> SignedTransaction {
        let typed: TypedTransaction = self.to_request(from, chain_id).into();
        let raw = typed.rlp_signed(&signature);
        let hash = H256::from(keccak256(&raw));
        SignedTransaction {
            transaction: self,
            from,
            v: signature.v,
            r: signature.r,
            s: signature.s,
            raw_transaction: raw,
            hash,
        }
    }
}

/// Pull v/r/s out of a raw signed legacy transaction.
pub fn decode_signature(raw: &[u8]) -> Result<Signature> {
    let rlp = rlp::Rlp::new(raw);
    if !rlp.is_list() {
        return Err(BridgeError::Encoding(
            "signed transaction is not an RLP list".to_string(),
        ));
    }
    let items = rlp.item_count().map_err(rlp_err)?;
    if items != 9 {
        return Err(BridgeError::Encoding(format!(
            "expected 9 RLP items in signed transaction, got {}",
            items
        )));
    }
    let v: u64 = rlp.val_at(6).map_err(rlp_err)?;
    let r = word_at(&rlp, 7)?;
    let s = word_at(&rlp, 8)?;
    Ok(Signature { r, s, v })
}

fn word_at(rlp: &rlp::Rlp<'_>, index: usize) -> Result<U256> {
    let data = rlp.at(index).map_err(rlp_err)?.data().map_err(rlp_err)?;
    if data.len() > 32 {
        return Err(BridgeError::Encoding(format!(
            "signature word at index {} is {} bytes",
            index,
            data.len()
        )));
    }
    Ok(U256::from_big_endian(data))
}

fn rlp_err(error: rlp::DecoderError) -> BridgeError {
    BridgeError::Encoding(error.to_string())
}

fn try_u64(value: U256, field: &str) -> Result<u64> {
    if value.bits() > 64 {
        return Err(BridgeError::Encoding(format!(
            "{} does not fit in 64 bits",
            field
        )));
    }
    Ok(value.as_u64())
}

fn try_u128(value: U256, field: &str) -> Result<u128> {
    if value.bits() > 128 {
        return Err(BridgeError::Encoding(format!(
            "{} does not fit in 128 bits",
            field
        )));
    }
    Ok(value.as_u128())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::mock::canned_raw_transaction;

    fn sender() -> Address {
        "0x3f17f1962b36e491b30a40b2405849e597ba5fb5"
            .parse()
            .unwrap()
    }

    fn sample_tx() -> UnsignedTransaction {
        UnsignedTransaction {
            to: Some("0x1111111111111111111111111111111111111111".parse().unwrap()),
            value: U256::from(1_000_000_000_000_000u64),
            data: Bytes::from(vec![0xde, 0xad, 0xbe, 0xef]),
            gas_limit: U256::from(21_000u64),
            gas_price: U256::from(20_000_000_000u64),
            nonce: Some(U256::from(7u64)),
            chain_id: Some(1),
        }
    }

    #[test]
    fn device_request_maps_every_field() {
        let request = sample_tx().to_device_request(sender()).unwrap();
        assert_eq!(request.fee_count, 21_000);
        assert_eq!(request.fee_price, "20000000000");
        assert_eq!(request.amount, 1_000_000_000_000_000);
        assert_eq!(request.contract_data, "0xdeadbeef");
        assert_eq!(
            request.to.as_deref(),
            Some("0x1111111111111111111111111111111111111111")
        );
        assert_eq!(request.from, "0x3f17f1962b36e491b30a40b2405849e597ba5fb5");
        assert_eq!(request.advanced.eth.nonce, 7);
    }

    #[test]
    fn absent_nonce_and_value_map_to_zero() {
        let tx = UnsignedTransaction {
            gas_limit: U256::from(21_000u64),
            gas_price: U256::from(1u64),
            ..Default::default()
        };
        let request = tx.to_device_request(sender()).unwrap();
        assert_eq!(request.amount, 0);
        assert_eq!(request.advanced.eth.nonce, 0);
        assert_eq!(request.contract_data, "0x");
        // a contract creation must not carry a stale recipient
        assert_eq!(request.to, None);
    }

    #[test]
    fn zero_nonce_is_zero_not_missing() {
        let tx = UnsignedTransaction {
            nonce: Some(U256::zero()),
            ..sample_tx()
        };
        let request = tx.to_device_request(sender()).unwrap();
        assert_eq!(request.advanced.eth.nonce, 0);
    }

    #[test]
    fn device_request_roundtrip_preserves_core_fields() {
        let tx = sample_tx();
        let request = tx.to_device_request(sender()).unwrap();
        let back = UnsignedTransaction::from_device_request(&request, 1).unwrap();
        assert_eq!(back.to, tx.to);
        assert_eq!(back.value, tx.value);
        assert_eq!(back.data, tx.data);
        assert_eq!(back.gas_limit, tx.gas_limit);
        assert_eq!(back.gas_price, tx.gas_price);
        assert_eq!(back.nonce, tx.nonce);
    }

    #[test]
    fn oversized_gas_limit_is_rejected() {
        let tx = UnsignedTransaction {
            gas_limit: U256::MAX,
            ..sample_tx()
        };
        assert!(tx.to_device_request(sender()).is_err());
    }

    #[test]
    fn device_request_wire_shape_is_camel_case() {
        let request = sample_tx().to_device_request(sender()).unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("feeCount").is_some());
        assert!(value.get("feePrice").is_some());
        assert!(value.get("contractData").is_some());
        assert_eq!(value["advanced"]["eth"]["nonce"], 7);
    }

    #[test]
    fn decode_signature_reads_fixed_positions() {
        let raw = canned_raw_transaction(38, U256::from(0xabcdu64), U256::from(0x1234u64));
        let bytes = buffer_from_hex(&raw).unwrap();
        let sig = decode_signature(&bytes).unwrap();
        assert_eq!(sig.v, 38);
        assert_eq!(sig.r, U256::from(0xabcdu64));
        assert_eq!(sig.s, U256::from(0x1234u64));
    }

    #[test]
    fn decode_signature_rejects_short_lists() {
        let mut stream = rlp::RlpStream::new_list(2);
        stream.append(&1u64);
        stream.append(&2u64);
        assert!(decode_signature(stream.out().as_ref()).is_err());
    }

    #[test]
    fn into_signed_keeps_non_signature_fields() {
        let tx = sample_tx();
        let sig = Signature {
            r: U256::from(1u8),
            s: U256::from(2u8),
            v: 38,
        };
        let signed = tx.clone().into_signed(sender(), 1, sig);
        assert_eq!(signed.transaction, tx);
        assert_eq!(signed.v, 38);
        assert!(!signed.raw_transaction.is_empty());
        assert_eq!(
            signed.hash,
            H256::from(keccak256(&signed.raw_transaction))
        );
    }
}
