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

//! Derivation of the device's own addresses, for change outputs.

use crate::{ChangeAddress, Keychain, KeychainError, Staking};
use sigil_kernel::{Address, ByronAddress, Network, ShelleyAddress};

impl ChangeAddress {
    /// The address paying back to the device.
    pub fn derive<K: Keychain>(
        &self,
        network: Network,
        keychain: &K,
    ) -> Result<Address, KeychainError> {
        let network_id = network.network_id();

        Ok(match self {
            ChangeAddress::Byron { path } => Address::Byron(ByronAddress::derive(
                &keychain.public_key(path)?,
                network.byron_protocol_magic(),
            )),
            ChangeAddress::Base { path, staking } => {
                let payment = keychain.public_key(path)?.key_hash();
                let staking = match staking {
                    Staking::Path(staking_path) => keychain.public_key(staking_path)?.key_hash(),
                    Staking::KeyHash(key_hash) => *key_hash,
                };
                Address::Shelley(ShelleyAddress::base(network_id, &payment, &staking))
            }
            ChangeAddress::Pointer { path, pointer } => Address::Shelley(ShelleyAddress::pointer(
                network_id,
                &keychain.public_key(path)?.key_hash(),
                pointer,
            )),
            ChangeAddress::Enterprise { path } => Address::Shelley(ShelleyAddress::enterprise(
                network_id,
                &keychain.public_key(path)?.key_hash(),
            )),
        })
    }
}
