//! Deterministic in-memory stand-in for the vendor SDK.
//!
//! Scripts every capability with canned responses, records the calls it
//! receives, and never touches real hardware. Used by the unit and
//! integration tests; handy for host-app development without a device.

use super::{
    DeviceHandle, DeviceTransactionRequest, SdkError, VaultSdk, WalletAccount, WalletKind,
};
use async_trait::async_trait;
use ethers_core::types::U256;
use std::sync::Mutex;

/// One call observed by the mock, with the arguments that matter to tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedCall {
    GetDevices,
    EnterGlobalPin {
        device: DeviceHandle,
        kind: WalletKind,
    },
    GetBatchWalletDetails {
        device: DeviceHandle,
        kinds: Vec<WalletKind>,
    },
    GenerateSignedTransaction {
        device: DeviceHandle,
        kind: WalletKind,
        broadcast: bool,
    },
    SignData {
        device: DeviceHandle,
        address: String,
        message: Vec<u8>,
    },
    DisplayAddress {
        device: DeviceHandle,
        address: String,
    },
}

/// Scripted fake device.
pub struct MockVault {
    devices_response: Result<Vec<DeviceHandle>, SdkError>,
    pin_result: Result<(), SdkError>,
    accounts_response: Result<Vec<WalletAccount>, SdkError>,
    transaction_response: Result<String, SdkError>,
    data_response: Result<String, SdkError>,
    display_result: Result<(), SdkError>,
    calls: Mutex<Vec<RecordedCall>>,
    last_request: Mutex<Option<DeviceTransactionRequest>>,
}

impl MockVault {
    /// One unlocked device with a single Ethereum account and passing
    /// canned responses everywhere.
    pub fn new() -> Self {
        Self {
            devices_response: Ok(vec![DeviceHandle(0)]),
            pin_result: Ok(()),
            accounts_response: Ok(vec![WalletAccount {
                kind: WalletKind::Ethereum,
                address: "0x3f17f1962b36e491b30a40b2405849e597ba5fb5".to_string(),
                user_data: None,
            }]),
            transaction_response: Ok(canned_raw_transaction(37, U256::one(), U256::one())),
            data_response: Ok(canned_data_signature(0x1b)),
            display_result: Ok(()),
            calls: Mutex::new(Vec::new()),
            last_request: Mutex::new(None),
        }
    }

    pub fn with_devices(self, devices: Vec<DeviceHandle>) -> Self {
        self.with_devices_response(Ok(devices))
    }

    pub fn without_devices(self) -> Self {
        self.with_devices(Vec::new())
    }

    pub fn with_devices_response(mut self, response: Result<Vec<DeviceHandle>, SdkError>) -> Self {
        self.devices_response = response;
        self
    }

    pub fn with_pin_rejected(mut self) -> Self {
        self.pin_result = Err(SdkError::PinRejected);
        self
    }

    pub fn with_accounts(self, accounts: Vec<WalletAccount>) -> Self {
        self.with_accounts_response(Ok(accounts))
    }

    pub fn with_accounts_response(
        mut self,
        response: Result<Vec<WalletAccount>, SdkError>,
    ) -> Self {
        self.accounts_response = response;
        self
    }

    pub fn with_transaction_response(mut self, response: Result<String, SdkError>) -> Self {
        self.transaction_response = response;
        self
    }

    pub fn with_data_response(mut self, response: Result<String, SdkError>) -> Self {
        self.data_response = response;
        self
    }

    pub fn with_display_result(mut self, result: Result<(), SdkError>) -> Self {
        self.display_result = result;
        self
    }

    /// Everything the mock has been asked so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("mock state poisoned").clone()
    }

    /// The device transaction request from the most recent signing call.
    pub fn last_request(&self) -> Option<DeviceTransactionRequest> {
        self.last_request
            .lock()
            .expect("mock state poisoned")
            .clone()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().expect("mock state poisoned").push(call);
    }
}

impl Default for MockVault {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VaultSdk for MockVault {
    async fn get_devices(&self) -> Result<Vec<DeviceHandle>, SdkError> {
        self.record(RecordedCall::GetDevices);
        self.devices_response.clone()
    }

    async fn enter_global_pin(
        &self,
        device: &DeviceHandle,
        kind: WalletKind,
    ) -> Result<(), SdkError> {
        self.record(RecordedCall::EnterGlobalPin {
            device: *device,
            kind,
        });
        self.pin_result.clone()
    }

    async fn get_batch_wallet_details(
        &self,
        device: &DeviceHandle,
        kinds: &[WalletKind],
    ) -> Result<Vec<WalletAccount>, SdkError> {
        self.record(RecordedCall::GetBatchWalletDetails {
            device: *device,
            kinds: kinds.to_vec(),
        });
        self.accounts_response.clone()
    }

    async fn generate_signed_transaction(
        &self,
        device: &DeviceHandle,
        kind: WalletKind,
        request: &DeviceTransactionRequest,
        broadcast: bool,
    ) -> Result<String, SdkError> {
        self.record(RecordedCall::GenerateSignedTransaction {
            device: *device,
            kind,
            broadcast,
        });
        *self.last_request.lock().expect("mock state poisoned") = Some(request.clone());
        self.transaction_response.clone()
    }

    async fn sign_data(
        &self,
        device: &DeviceHandle,
        _kind: WalletKind,
        address: &str,
        message: &[u8],
    ) -> Result<String, SdkError> {
        self.record(RecordedCall::SignData {
            device: *device,
            address: address.to_string(),
            message: message.to_vec(),
        });
        self.data_response.clone()
    }

    async fn display_address(
        &self,
        device: &DeviceHandle,
        _kinds: &[WalletKind],
        address: &str,
    ) -> Result<(), SdkError> {
        self.record(RecordedCall::DisplayAddress {
            device: *device,
            address: address.to_string(),
        });
        self.display_result.clone()
    }
}

/// Build a raw signed legacy transaction carrying the given signature.
///
/// The non-signature items are placeholders; the bridge only reads v/r/s
/// back out of the device's response.
pub fn canned_raw_transaction(v: u64, r: U256, s: U256) -> String {
    let mut stream = rlp::RlpStream::new_list(9);
    stream.append(&0u64); // nonce
    stream.append(&0u64); // gas price
    stream.append(&0u64); // gas limit
    stream.append(&Vec::<u8>::new()); // to
    stream.append(&0u64); // value
    stream.append(&Vec::<u8>::new()); // data
    stream.append(&v);
    stream.append(&trimmed_be(r));
    stream.append(&trimmed_be(s));
    format!("0x{}", hex::encode(stream.out()))
}

/// A 65-byte data signature as the SDK returns it: `0x` + 130 hex chars.
pub fn canned_data_signature(v: u8) -> String {
    format!("0x{}{}{:02x}", "11".repeat(32), "22".repeat(32), v)
}

fn trimmed_be(value: U256) -> Vec<u8> {
    let mut buf = [0u8; 32];
    value.to_big_endian(&mut buf);
    let start = buf.iter().position(|b| *b != 0).unwrap_or(32);
    buf[start..].to_vec()
}
