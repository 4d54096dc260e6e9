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

use crate::{PoolId, StakeCredential, cbor, decode_hash, encode_hash, heterogeneous_array};
use std::fmt;

/// The stake certificates a signing device may authorise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Certificate {
    StakeRegistration(StakeCredential),
    StakeDeregistration(StakeCredential),
    StakeDelegation(StakeCredential, PoolId),
}

impl Certificate {
    pub const STAKE_REGISTRATION: u8 = 0;
    pub const STAKE_DEREGISTRATION: u8 = 1;
    pub const STAKE_DELEGATION: u8 = 2;

    pub fn credential(&self) -> &StakeCredential {
        match self {
            Certificate::StakeRegistration(credential)
            | Certificate::StakeDeregistration(credential)
            | Certificate::StakeDelegation(credential, _) => credential,
        }
    }

    /// Registering a stake credential needs no signature from its owner; the other certificates
    /// do.
    pub fn requires_witness(&self) -> bool {
        !matches!(self, Certificate::StakeRegistration(_))
    }
}

impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Certificate::StakeRegistration(credential) => {
                write!(f, "stake registration of {credential}")
            }
            Certificate::StakeDeregistration(credential) => {
                write!(f, "stake deregistration of {credential}")
            }
            Certificate::StakeDelegation(credential, pool) => {
                write!(f, "delegation of {credential} to pool {pool}")
            }
        }
    }
}

impl<C> cbor::encode::Encode<C> for Certificate {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        match self {
            Certificate::StakeRegistration(credential) => {
                e.array(2)?;
                e.u8(Self::STAKE_REGISTRATION)?;
                e.encode_with(credential, ctx)?;
            }
            Certificate::StakeDeregistration(credential) => {
                e.array(2)?;
                e.u8(Self::STAKE_DEREGISTRATION)?;
                e.encode_with(credential, ctx)?;
            }
            Certificate::StakeDelegation(credential, pool) => {
                e.array(3)?;
                e.u8(Self::STAKE_DELEGATION)?;
                e.encode_with(credential, ctx)?;
                encode_hash(e, pool)?;
            }
        }
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for Certificate {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        heterogeneous_array(d, |d, assert_len| {
            let position = d.position();
            match d.u8()? {
                Self::STAKE_REGISTRATION => {
                    assert_len(2)?;
                    Ok(Certificate::StakeRegistration(d.decode_with(ctx)?))
                }
                Self::STAKE_DEREGISTRATION => {
                    assert_len(2)?;
                    Ok(Certificate::StakeDeregistration(d.decode_with(ctx)?))
                }
                Self::STAKE_DELEGATION => {
                    assert_len(3)?;
                    Ok(Certificate::StakeDelegation(
                        d.decode_with(ctx)?,
                        decode_hash(d)?,
                    ))
                }
                kind => Err(cbor::decode::Error::message(format!(
                    "unsupported certificate kind {kind}"
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
    use crate::{any_hash28, any_stake_credential, prop_cbor_roundtrip};
    use proptest::prelude::*;

    prop_cbor_roundtrip!(Certificate, any_certificate());

    pub fn any_certificate() -> impl Strategy<Value = Certificate> {
        prop_oneof![
            any_stake_credential().prop_map(Certificate::StakeRegistration),
            any_stake_credential().prop_map(Certificate::StakeDeregistration),
            (any_stake_credential(), any_hash28())
                .prop_map(|(credential, pool)| Certificate::StakeDelegation(credential, pool)),
        ]
    }

}
