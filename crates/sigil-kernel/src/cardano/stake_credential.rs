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

use crate::{Hash, KeyHash, cbor, decode_hash, encode_hash, heterogeneous_array};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StakeCredential {
    AddrKeyhash(KeyHash),
    ScriptHash(Hash<28>),
}

impl StakeCredential {
    pub fn as_hash(&self) -> &Hash<28> {
        match self {
            StakeCredential::AddrKeyhash(hash) | StakeCredential::ScriptHash(hash) => hash,
        }
    }
}

impl fmt::Display for StakeCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StakeCredential::AddrKeyhash(hash) => write!(f, "key:{hash}"),
            StakeCredential::ScriptHash(hash) => write!(f, "script:{hash}"),
        }
    }
}

impl<C> cbor::encode::Encode<C> for StakeCredential {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        _ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.array(2)?;
        match self {
            StakeCredential::AddrKeyhash(hash) => {
                e.u8(0)?;
                encode_hash(e, hash)?;
            }
            StakeCredential::ScriptHash(hash) => {
                e.u8(1)?;
                encode_hash(e, hash)?;
            }
        }
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for StakeCredential {
    fn decode(d: &mut cbor::Decoder<'b>, _ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        heterogeneous_array(d, |d, assert_len| {
            assert_len(2)?;
            let position = d.position();
            match d.u8()? {
                0 => Ok(StakeCredential::AddrKeyhash(decode_hash(d)?)),
                1 => Ok(StakeCredential::ScriptHash(decode_hash(d)?)),
                kind => Err(cbor::decode::Error::message(format!(
                    "unknown stake credential kind {kind}"
                ))
                .at(position)),
            }
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use crate::{any_hash28, prop_cbor_roundtrip};
    use proptest::prelude::*;

    prop_cbor_roundtrip!(StakeCredential, any_stake_credential());

    pub fn any_stake_credential() -> impl Strategy<Value = StakeCredential> {
        prop_oneof![
            any_hash28().prop_map(StakeCredential::AddrKeyhash),
            any_hash28().prop_map(StakeCredential::ScriptHash),
        ]
    }
}
