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

use super::{AddressError, AddressType, StakePointer};
use crate::{Hash, KeyHash, Network, size};
use bech32::{Bech32, Hrp, primitives::decode::CheckedHrpstring};

/// Header byte followed by one credential hash.
const SHORT_LENGTH: usize = 1 + size::CREDENTIAL;

/// Header byte followed by two credential hashes.
const LONG_LENGTH: usize = 1 + 2 * size::CREDENTIAL;

/// What, if anything, controls the stake associated with an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegationPart {
    Key(KeyHash),
    Script(Hash<28>),
    Pointer(StakePointer),
    None,
}

/// A Shelley-era address: a header byte (address type in the high nibble, network id in the low
/// nibble) followed by a type-dependent payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelleyAddress {
    address_type: AddressType,
    bytes: Vec<u8>,
}

impl ShelleyAddress {
    fn from_parts(address_type: AddressType, network_id: u8, parts: &[&[u8]]) -> Self {
        let mut bytes = vec![header(address_type, network_id)];
        for part in parts {
            bytes.extend_from_slice(part);
        }
        Self {
            address_type,
            bytes,
        }
    }

    /// Base address with key credentials for both payment and stake.
    pub fn base(network_id: u8, payment: &KeyHash, staking: &KeyHash) -> Self {
        Self::from_parts(
            AddressType::BaseKeyKey,
            network_id,
            &[payment.as_ref(), staking.as_ref()],
        )
    }

    pub fn pointer(network_id: u8, payment: &KeyHash, pointer: &StakePointer) -> Self {
        let mut encoded = Vec::new();
        pointer.encode_into(&mut encoded);
        Self::from_parts(
            AddressType::PointerKey,
            network_id,
            &[payment.as_ref(), &encoded],
        )
    }

    pub fn enterprise(network_id: u8, payment: &KeyHash) -> Self {
        Self::from_parts(AddressType::EnterpriseKey, network_id, &[payment.as_ref()])
    }

    /// Reward account of a staking key.
    pub fn reward(network_id: u8, staking: &KeyHash) -> Self {
        Self::from_parts(AddressType::RewardKey, network_id, &[staking.as_ref()])
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        let header = *bytes.first().ok_or(AddressError::Empty)?;
        let address_type = AddressType::try_from(header >> 4)?;

        let well_formed = match address_type {
            AddressType::BaseKeyKey
            | AddressType::BaseScriptKey
            | AddressType::BaseKeyScript
            | AddressType::BaseScriptScript => bytes.len() == LONG_LENGTH,
            AddressType::PointerKey | AddressType::PointerScript => {
                bytes.len() > SHORT_LENGTH
                    && StakePointer::decode_exact(&bytes[SHORT_LENGTH..]).is_some()
            }
            AddressType::EnterpriseKey
            | AddressType::EnterpriseScript
            | AddressType::RewardKey
            | AddressType::RewardScript => bytes.len() == SHORT_LENGTH,
            AddressType::Byron => return Err(AddressError::UnsupportedType(header >> 4)),
        };

        if !well_formed {
            return Err(AddressError::InvalidLength {
                address_type,
                length: bytes.len(),
            });
        }

        Ok(Self {
            address_type,
            bytes: bytes.to_vec(),
        })
    }

    /// Decode a bech32 address, checking that its prefix agrees with its header.
    pub fn from_bech32(s: &str) -> Result<Self, AddressError> {
        let checked =
            CheckedHrpstring::new::<Bech32>(s).map_err(|e| AddressError::Bech32(e.to_string()))?;

        let bytes = checked.byte_iter().collect::<Vec<u8>>();
        let address = Self::from_bytes(&bytes)?;

        let prefix = checked.hrp().to_lowercase();
        if prefix != address.hrp() {
            return Err(AddressError::InconsistentPrefix {
                prefix,
                expected: address.hrp(),
            });
        }

        Ok(address)
    }

    pub fn to_bech32(&self) -> Result<String, AddressError> {
        let hrp = Hrp::parse(self.hrp()).map_err(|e| AddressError::Bech32(e.to_string()))?;
        bech32::encode::<Bech32>(hrp, &self.bytes).map_err(|e| AddressError::Bech32(e.to_string()))
    }

    /// The bech32 prefix matching this address' type and network.
    pub fn hrp(&self) -> &'static str {
        let network = if self.network_id() == Network::MAINNET_ID {
            Network::Mainnet
        } else {
            Network::Testnet
        };

        if self.address_type.is_reward() {
            network.stake_hrp()
        } else {
            network.address_hrp()
        }
    }

    pub fn address_type(&self) -> AddressType {
        self.address_type
    }

    pub fn network_id(&self) -> u8 {
        self.bytes[0] & 0x0f
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Payment credential; absent from reward addresses.
    pub fn payment_part(&self) -> Option<Hash<28>> {
        if self.address_type.is_reward() {
            return None;
        }
        credential(&self.bytes[1..SHORT_LENGTH])
    }

    pub fn delegation_part(&self) -> DelegationPart {
        match self.address_type {
            AddressType::BaseKeyKey | AddressType::BaseScriptKey => {
                credential(&self.bytes[SHORT_LENGTH..])
                    .map_or(DelegationPart::None, DelegationPart::Key)
            }
            AddressType::BaseKeyScript | AddressType::BaseScriptScript => {
                credential(&self.bytes[SHORT_LENGTH..])
                    .map_or(DelegationPart::None, DelegationPart::Script)
            }
            AddressType::PointerKey | AddressType::PointerScript => {
                StakePointer::decode_exact(&self.bytes[SHORT_LENGTH..])
                    .map_or(DelegationPart::None, DelegationPart::Pointer)
            }
            AddressType::RewardKey => {
                credential(&self.bytes[1..]).map_or(DelegationPart::None, DelegationPart::Key)
            }
            AddressType::RewardScript => {
                credential(&self.bytes[1..]).map_or(DelegationPart::None, DelegationPart::Script)
            }
            AddressType::EnterpriseKey | AddressType::EnterpriseScript | AddressType::Byron => {
                DelegationPart::None
            }
        }
    }
}

fn header(address_type: AddressType, network_id: u8) -> u8 {
    (address_type as u8) << 4 | (network_id & 0x0f)
}

fn credential(bytes: &[u8]) -> Option<Hash<28>> {
    <[u8; size::CREDENTIAL]>::try_from(bytes).ok().map(Hash::new)
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use crate::{any_hash28, any_stake_pointer};
    use proptest::prelude::*;

    pub fn any_shelley_address() -> impl Strategy<Value = ShelleyAddress> {
        let network_id = prop_oneof![Just(Network::MAINNET_ID), Just(Network::TESTNET_ID)];
        (network_id, any_hash28(), any_hash28(), any_stake_pointer(), 0..4u8).prop_map(
            |(network_id, payment, staking, pointer, variant)| match variant {
                0 => ShelleyAddress::base(network_id, &payment, &staking),
                1 => ShelleyAddress::pointer(network_id, &payment, &pointer),
                2 => ShelleyAddress::enterprise(network_id, &payment),
                _ => ShelleyAddress::reward(network_id, &staking),
            },
        )
    }

}
