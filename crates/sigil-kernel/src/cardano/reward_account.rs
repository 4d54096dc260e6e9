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

use crate::{KeyHash, ShelleyAddress, StakeCredential, cbor};
use std::fmt;

/// The address of a stake credential's reward account, as used in withdrawals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardAccount(ShelleyAddress);

impl RewardAccount {
    pub fn new(network_id: u8, staking: &KeyHash) -> Self {
        Self(ShelleyAddress::reward(network_id, staking))
    }

    pub fn network_id(&self) -> u8 {
        self.0.network_id()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn credential(&self) -> Option<StakeCredential> {
        match self.0.delegation_part() {
            crate::DelegationPart::Key(hash) => Some(StakeCredential::AddrKeyhash(hash)),
            crate::DelegationPart::Script(hash) => Some(StakeCredential::ScriptHash(hash)),
            crate::DelegationPart::Pointer(..) | crate::DelegationPart::None => None,
        }
    }
}

impl TryFrom<ShelleyAddress> for RewardAccount {
    type Error = ShelleyAddress;

    fn try_from(address: ShelleyAddress) -> Result<Self, Self::Error> {
        if address.address_type().is_reward() {
            Ok(Self(address))
        } else {
            Err(address)
        }
    }
}

impl fmt::Display for RewardAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.to_bech32() {
            Ok(s) => write!(f, "{s}"),
            Err(_) => write!(f, "{}", hex::encode(self.as_bytes())),
        }
    }
}

impl<C> cbor::encode::Encode<C> for RewardAccount {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        _ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.bytes(self.as_bytes())?;
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for RewardAccount {
    fn decode(d: &mut cbor::Decoder<'b>, _ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        let position = d.position();
        let address = ShelleyAddress::from_bytes(d.bytes()?)
            .map_err(|e| cbor::decode::Error::message(e).at(position))?;
        RewardAccount::try_from(address).map_err(|_| {
            cbor::decode::Error::message("expected a reward address").at(position)
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use crate::{Network, any_hash28, prop_cbor_roundtrip};
    use proptest::{prelude::*, prop_compose};

    prop_cbor_roundtrip!(RewardAccount, any_reward_account());

    prop_compose! {
        pub fn any_reward_account()(
            mainnet in any::<bool>(),
            staking in any_hash28(),
        ) -> RewardAccount {
            let network_id = if mainnet { Network::MAINNET_ID } else { Network::TESTNET_ID };
            RewardAccount::new(network_id, &staking)
        }
    }

    #[cfg(test)]
    mod internal {
        use super::*;
        use crate::{from_cbor_no_leftovers, parse_hash, to_cbor};

        #[test]
        fn mainnet_reward_account() {
            let staking =
                parse_hash("122a946b9ad3d2ddf029d3a828f0468aece76895f15c9efbd69b4277").unwrap();
            let account = RewardAccount::new(Network::MAINNET_ID, &staking);
            assert_eq!(
                hex::encode(to_cbor(&account)),
                "581de1122a946b9ad3d2ddf029d3a828f0468aece76895f15c9efbd69b4277"
            );
            assert_eq!(
                account.credential(),
                Some(StakeCredential::AddrKeyhash(staking))
            );
        }

        #[test]
        fn payment_addresses_are_not_reward_accounts() {
            let bytes = hex::decode(
                "581d6180f9e2c88e6c817008f3a812ed889b4a4da8e0bd103f86e7335422aa",
            )
            .unwrap();
            assert!(from_cbor_no_leftovers::<RewardAccount>(&bytes).is_err());
        }
    }
}
