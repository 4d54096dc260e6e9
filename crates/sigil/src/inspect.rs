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

//! Human-oriented description of an address, for the `inspect-address` command.

use serde::Serialize;
use sigil_kernel::{Address, AddressError, AddressType, DelegationPart, Network};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressReport {
    pub era: &'static str,
    pub kind: &'static str,
    pub network: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegation: Option<String>,
    pub bytes: String,
}

pub fn inspect(address: &str) -> Result<AddressReport, AddressError> {
    let address: Address = address.trim().parse()?;
    let bytes = hex::encode(address.as_bytes());

    Ok(match &address {
        Address::Byron(byron) => AddressReport {
            era: "byron",
            kind: "bootstrap",
            network: match byron.protocol_magic() {
                None => Network::Mainnet.to_string(),
                Some(magic) => format!("protocol magic {magic}"),
            },
            payment: Some(byron.root().to_string()),
            delegation: None,
            bytes,
        },
        Address::Shelley(shelley) => AddressReport {
            era: "shelley",
            kind: kind(shelley.address_type()),
            network: match Network::from_network_id(shelley.network_id()) {
                Some(network) => network.to_string(),
                None => format!("network id {}", shelley.network_id()),
            },
            payment: shelley.payment_part().map(|hash| hash.to_string()),
            delegation: match shelley.delegation_part() {
                DelegationPart::Key(hash) => Some(format!("key {hash}")),
                DelegationPart::Script(hash) => Some(format!("script {hash}")),
                DelegationPart::Pointer(pointer) => Some(format!("pointer {pointer}")),
                DelegationPart::None => None,
            },
            bytes,
        },
    })
}

fn kind(address_type: AddressType) -> &'static str {
    match address_type {
        AddressType::BaseKeyKey => "base (key, key)",
        AddressType::BaseScriptKey => "base (script, key)",
        AddressType::BaseKeyScript => "base (key, script)",
        AddressType::BaseScriptScript => "base (script, script)",
        AddressType::PointerKey => "pointer (key)",
        AddressType::PointerScript => "pointer (script)",
        AddressType::EnterpriseKey => "enterprise (key)",
        AddressType::EnterpriseScript => "enterprise (script)",
        AddressType::Byron => "bootstrap",
        AddressType::RewardKey => "reward (key)",
        AddressType::RewardScript => "reward (script)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn byron_mainnet() {
        assert_eq!(
            inspect("Ae2tdPwUPEZCanmBz5g2GEwFqKTKpNJcGYPKfDxoNeKZ8bRHr8366kseiK2").unwrap(),
            AddressReport {
                era: "byron",
                kind: "bootstrap",
                network: "mainnet".to_string(),
                payment: Some("9e1c71de652ec8b85fec296f0685ca3988781c94a2e1a5d89d92f45f".to_string()),
                delegation: None,
                bytes: "82d818582183581c9e1c71de652ec8b85fec296f0685ca3988781c94a2e1a5d89d92f45fa0001a0d0c2561"
                    .to_string(),
            }
        );
    }

    #[test]
    fn shelley_base() {
        let report = inspect(
            "addr1q84sh2j72ux0l03fxndjnhctdg7hcppsaejafsa84vh7lwgmcs5wgus8qt4atk45lvt4xfxpjtwfhdmvchdf2m3u3hlsd5tq5r",
        )
        .unwrap();
        assert_eq!(report.kind, "base (key, key)");
        assert_eq!(report.network, "mainnet");
        assert_eq!(
            report.payment.as_deref(),
            Some("eb0baa5e570cffbe2934db29df0b6a3d7c0430ee65d4c3a7ab2fefb9")
        );
        assert_eq!(
            report.delegation.as_deref(),
            Some("key 1bc428e4720702ebd5dab4fb175324c192dc9bb76cc5da956e3c8dff")
        );
    }

    #[test]
    fn shelley_enterprise_testnet() {
        let report = inspect("addr_test1vr9s8py7y68e3x66sscs0wkhlg5ssfrfs65084jrlrqcfqqtmut0e").unwrap();
        assert_eq!(report.kind, "enterprise (key)");
        assert_eq!(report.network, "testnet");
        assert_eq!(report.delegation, None);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({
                "era": "shelley",
                "kind": "enterprise (key)",
                "network": "testnet",
                "payment": "cb03849e268f989b5a843107bad7fa2908246986a8f3d643f8c18480",
                "bytes": "60cb03849e268f989b5a843107bad7fa2908246986a8f3d643f8c18480",
            })
        );
    }

    #[test]
    fn reward_address() {
        let report = inspect("stake1uyfz49rtntfa9h0s98f6s28sg69weemgjhc4e8hm66d5yacalmqha").unwrap();
        assert_eq!(report.kind, "reward (key)");
        assert_eq!(report.payment, None);
        assert_eq!(
            report.delegation.as_deref(),
            Some("key 122a946b9ad3d2ddf029d3a828f0468aece76895f15c9efbd69b4277")
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(inspect("not an address").is_err());
    }
}
