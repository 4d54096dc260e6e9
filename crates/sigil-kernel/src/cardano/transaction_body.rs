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

use crate::{
    Certificate, Lovelace, MetadataHash, RewardAccount, TransactionId, TransactionInput,
    TransactionOutput, blake2b_256,
    cbor::{self, missing_field},
    decode_hash, encode_hash, heterogeneous_map, homogeneous_array, to_cbor,
};
use std::mem;

/// A Shelley-era transaction body.
///
/// Optional fields are omitted from the serialised map when empty, and the map keys always come
/// in ascending order, so that a given body has exactly one encoding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionBody {
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub fee: Lovelace,
    pub ttl: u64,
    pub certificates: Vec<Certificate>,
    pub withdrawals: Vec<(RewardAccount, Lovelace)>,
    pub metadata_hash: Option<MetadataHash>,
}

impl TransactionBody {
    pub const INPUTS: u64 = 0;
    pub const OUTPUTS: u64 = 1;
    pub const FEE: u64 = 2;
    pub const TTL: u64 = 3;
    pub const CERTIFICATES: u64 = 4;
    pub const WITHDRAWALS: u64 = 5;
    pub const METADATA_HASH: u64 = 7;

    /// The blake2b-256 digest of the serialised body, which is what witnesses sign.
    pub fn id(&self) -> TransactionId {
        blake2b_256(&to_cbor(self))
    }

    fn map_len(&self) -> u64 {
        4 + u64::from(!self.certificates.is_empty())
            + u64::from(!self.withdrawals.is_empty())
            + u64::from(self.metadata_hash.is_some())
    }
}

impl<C> cbor::encode::Encode<C> for TransactionBody {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.map(self.map_len())?;

        e.u64(Self::INPUTS)?;
        e.encode_with(&self.inputs, ctx)?;

        e.u64(Self::OUTPUTS)?;
        e.encode_with(&self.outputs, ctx)?;

        e.u64(Self::FEE)?;
        e.u64(self.fee)?;

        e.u64(Self::TTL)?;
        e.u64(self.ttl)?;

        if !self.certificates.is_empty() {
            e.u64(Self::CERTIFICATES)?;
            e.encode_with(&self.certificates, ctx)?;
        }

        if !self.withdrawals.is_empty() {
            e.u64(Self::WITHDRAWALS)?;
            e.map(self.withdrawals.len() as u64)?;
            for (account, amount) in &self.withdrawals {
                e.encode_with(account, ctx)?;
                e.u64(*amount)?;
            }
        }

        if let Some(metadata_hash) = &self.metadata_hash {
            e.u64(Self::METADATA_HASH)?;
            encode_hash(e, metadata_hash)?;
        }

        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for TransactionBody {
    fn decode(d: &mut cbor::Decoder<'b>, _ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        #[derive(Default)]
        struct State {
            inputs: Option<Vec<TransactionInput>>,
            outputs: Option<Vec<TransactionOutput>>,
            fee: Option<Lovelace>,
            ttl: Option<u64>,
            certificates: Option<Vec<Certificate>>,
            withdrawals: Option<Vec<(RewardAccount, Lovelace)>>,
            metadata_hash: Option<MetadataHash>,
        }

        let mut state = heterogeneous_map(
            d,
            State::default(),
            |d| d.u64(),
            |d, st, k| {
                match k {
                    Self::INPUTS => blanket(&mut st.inputs, k, || {
                        homogeneous_array(d, |d| d.decode())
                    })?,
                    Self::OUTPUTS => blanket(&mut st.outputs, k, || {
                        homogeneous_array(d, |d| d.decode())
                    })?,
                    Self::FEE => blanket(&mut st.fee, k, || d.u64())?,
                    Self::TTL => blanket(&mut st.ttl, k, || d.u64())?,
                    Self::CERTIFICATES => blanket(&mut st.certificates, k, || {
                        non_empty(homogeneous_array(d, |d| d.decode())?, k)
                    })?,
                    Self::WITHDRAWALS => blanket(&mut st.withdrawals, k, || {
                        non_empty(decode_withdrawals(d)?, k)
                    })?,
                    Self::METADATA_HASH => blanket(&mut st.metadata_hash, k, || decode_hash(d))?,
                    _ => {
                        let position = d.position();
                        return Err(cbor::decode::Error::message(format!(
                            "unrecognised field key: {k}"
                        ))
                        .at(position));
                    }
                };

                Ok(())
            },
        )?;

        Ok(TransactionBody {
            inputs: mem::take(&mut state.inputs)
                .ok_or_else(|| missing_field::<Self, Vec<TransactionInput>>(Self::INPUTS))?,
            outputs: mem::take(&mut state.outputs)
                .ok_or_else(|| missing_field::<Self, Vec<TransactionOutput>>(Self::OUTPUTS))?,
            fee: state.fee.ok_or_else(|| missing_field::<Self, Lovelace>(Self::FEE))?,
            ttl: state.ttl.ok_or_else(|| missing_field::<Self, u64>(Self::TTL))?,
            certificates: state.certificates.unwrap_or_default(),
            withdrawals: state.withdrawals.unwrap_or_default(),
            metadata_hash: state.metadata_hash,
        })
    }
}

fn blanket<T>(
    field: &mut Option<T>,
    k: u64,
    decode: impl FnOnce() -> Result<T, cbor::decode::Error>,
) -> Result<(), cbor::decode::Error> {
    if field.is_some() {
        return Err(cbor::decode::Error::message(format!(
            "duplicate field entry with key {k}"
        )));
    }

    *field = Some(decode()?);

    Ok(())
}

/// Optional collections are omitted rather than encoded empty.
fn non_empty<T>(elems: Vec<T>, k: u64) -> Result<Vec<T>, cbor::decode::Error> {
    if elems.is_empty() {
        return Err(cbor::decode::Error::message(format!(
            "empty collection at key {k} should be omitted"
        )));
    }
    Ok(elems)
}

fn decode_withdrawals(
    d: &mut cbor::Decoder<'_>,
) -> Result<Vec<(RewardAccount, Lovelace)>, cbor::decode::Error> {
    heterogeneous_map(
        d,
        Vec::new(),
        |d| d.decode::<RewardAccount>(),
        |d, withdrawals: &mut Vec<(RewardAccount, Lovelace)>, account| {
            if withdrawals.iter().any(|(known, _)| known == &account) {
                return Err(cbor::decode::Error::message(format!(
                    "duplicate withdrawal from {account}"
                )));
            }
            withdrawals.push((account, d.u64()?));
            Ok(())
        },
    )
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use crate::{
        MAX_LOVELACE, any_certificate, any_hash32, any_reward_account, any_transaction_input,
        any_transaction_output, prop_cbor_roundtrip,
    };
    use proptest::{collection, option, prelude::*, prop_compose};

    prop_cbor_roundtrip!(TransactionBody, any_transaction_body());

    prop_compose! {
        pub fn any_transaction_body()(
            inputs in collection::vec(any_transaction_input(), 1..4),
            outputs in collection::vec(any_transaction_output(), 1..4),
            fee in 0..=MAX_LOVELACE,
            ttl in any::<u64>(),
            certificates in collection::vec(any_certificate(), 0..3),
            withdrawal in option::of((any_reward_account(), 0..=MAX_LOVELACE)),
            metadata_hash in option::of(any_hash32()),
        ) -> TransactionBody {
            TransactionBody {
                inputs,
                outputs,
                fee,
                ttl,
                certificates,
                withdrawals: withdrawal.into_iter().collect(),
                metadata_hash,
            }
        }
    }

}
