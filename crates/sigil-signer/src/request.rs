// Copyright 2025 PRAGMA
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The signing request, as sent by the host wallet.
//!
//! Field names follow the host library, so that request files written for it can be fed to the
//! engine unchanged. Nothing here is validated beyond its JSON shape: amounts may exceed the
//! supply, hashes may have any length and paths may point anywhere. The rules under
//! [`crate::rules`] are responsible for turning a request into a [`crate::ValidTransaction`].

use serde::{Deserialize, Deserializer};
use sigil_kernel::{DerivationPath, Lovelace, NetworkParams, ProtocolMagic};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SigningRequest {
    pub protocol_magic: ProtocolMagic,
    pub network_id: u8,
    pub inputs: Vec<InputRequest>,
    pub outputs: Vec<OutputRequest>,
    #[serde(deserialize_with = "natural")]
    pub fee: Lovelace,
    #[serde(deserialize_with = "natural")]
    pub ttl: u64,
    #[serde(default)]
    pub certificates: Vec<CertificateRequest>,
    #[serde(default)]
    pub withdrawals: Vec<WithdrawalRequest>,
    /// Serialised metadata; empty when the transaction carries none.
    #[serde(default)]
    pub metadata: HexBytes,
}

impl SigningRequest {
    pub fn network_params(&self) -> NetworkParams {
        NetworkParams {
            protocol_magic: self.protocol_magic,
            network_id: self.network_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputRequest {
    pub path: DerivationPath,
    pub prev_hash: HexBytes,
    #[serde(deserialize_with = "natural")]
    pub prev_index: u64,
}

/// Either a payment to a third party, given by its address, or change returning to the device,
/// given by the parameters of an address the device derives itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OutputRequest {
    External {
        address: String,
        #[serde(deserialize_with = "natural")]
        amount: Lovelace,
    },
    Change(ChangeOutputRequest),
}

impl OutputRequest {
    pub fn amount(&self) -> Lovelace {
        match self {
            OutputRequest::External { amount, .. } => *amount,
            OutputRequest::Change(change) => change.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeOutputRequest {
    /// Header type nibble of the address to derive.
    pub address_type: u8,
    pub path: DerivationPath,
    #[serde(default)]
    pub staking_path: Option<DerivationPath>,
    #[serde(default)]
    pub staking_key_hash: Option<HexBytes>,
    #[serde(default)]
    pub block_index: Option<u64>,
    #[serde(default)]
    pub tx_index: Option<u64>,
    #[serde(default)]
    pub certificate_index: Option<u64>,
    #[serde(deserialize_with = "natural")]
    pub amount: Lovelace,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CertificateRequest {
    #[serde(rename = "type")]
    pub certificate_type: u8,
    pub path: DerivationPath,
    #[serde(default)]
    pub pool: Option<HexBytes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WithdrawalRequest {
    pub path: DerivationPath,
    #[serde(deserialize_with = "natural")]
    pub amount: Lovelace,
}

// -----------------------------------------------------------------------------
// HexBytes
// -----------------------------------------------------------------------------

/// Arbitrary bytes, hex-encoded on the wire.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct HexBytes(Vec<u8>);

impl HexBytes {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl TryFrom<String> for HexBytes {
    type Error = hex::FromHexError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        hex::decode(s).map(HexBytes)
    }
}

impl fmt::Debug for HexBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HexBytes({})", hex::encode(&self.0))
    }
}

/// Host libraries send large amounts as decimal strings; small ones often come as plain numbers.
fn natural<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Natural {
        Number(u64),
        Text(String),
    }

    match Natural::deserialize(deserializer)? {
        Natural::Number(n) => Ok(n),
        Natural::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn amounts_as_numbers_or_strings() {
        let request: WithdrawalRequest = serde_json::from_value(json!({
            "path": "m/1852'/1815'/0'/2/0",
            "amount": "449999999199999999",
        }))
        .unwrap();
        assert_eq!(request.amount, 449_999_999_199_999_999);

        let request: WithdrawalRequest = serde_json::from_value(json!({
            "path": "m/1852'/1815'/0'/2/0",
            "amount": 1000,
        }))
        .unwrap();
        assert_eq!(request.amount, 1000);
    }

    #[test]
    fn negative_amounts_are_refused() {
        let result = serde_json::from_value::<WithdrawalRequest>(json!({
            "path": "m/1852'/1815'/0'/2/0",
            "amount": "-1",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn external_and_change_outputs() {
        let outputs: Vec<OutputRequest> = serde_json::from_value(json!([
            {
                "address": "Ae2tdPwUPEZCanmBz5g2GEwFqKTKpNJcGYPKfDxoNeKZ8bRHr8366kseiK2",
                "amount": "3003112",
            },
            {
                "addressType": 4,
                "path": "m/1852'/1815'/0'/0/0",
                "blockIndex": 1,
                "txIndex": 2,
                "certificateIndex": 3,
                "amount": "7120787",
            },
        ]))
        .unwrap();

        assert!(matches!(outputs[0], OutputRequest::External { amount: 3003112, .. }));
        match &outputs[1] {
            OutputRequest::Change(change) => {
                assert_eq!(change.address_type, 4);
                assert_eq!(
                    (change.block_index, change.tx_index, change.certificate_index),
                    (Some(1), Some(2), Some(3))
                );
                assert_eq!(change.staking_path, None);
            }
            OutputRequest::External { .. } => panic!("expected a change output"),
        }
    }

    #[test]
    fn optional_sections_default_to_empty() {
        let request: SigningRequest = serde_json::from_value(json!({
            "protocol_magic": 764824073,
            "network_id": 1,
            "inputs": [],
            "outputs": [],
            "fee": 42,
            "ttl": 10,
        }))
        .unwrap();
        assert!(request.certificates.is_empty());
        assert!(request.withdrawals.is_empty());
        assert!(request.metadata.is_empty());
        assert_eq!(request.network_params().protocol_magic, ProtocolMagic::MAINNET);
    }

    #[test]
    fn hex_bytes_refuse_odd_lengths() {
        assert!(serde_json::from_value::<HexBytes>(json!("abc")).is_err());
        assert_eq!(
            serde_json::from_value::<HexBytes>(json!("a0")).unwrap(),
            HexBytes::new(vec![0xa0])
        );
    }
}
