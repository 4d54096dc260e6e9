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
    BootstrapWitness, VKeyWitness, cbor, heterogeneous_map, homogeneous_array, unexpected_field,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WitnessSet {
    pub vkey_witnesses: Vec<VKeyWitness>,
    pub bootstrap_witnesses: Vec<BootstrapWitness>,
}

impl WitnessSet {
    pub const VKEY_WITNESSES: u8 = 0;
    pub const BOOTSTRAP_WITNESSES: u8 = 2;

    pub fn len(&self) -> usize {
        self.vkey_witnesses.len() + self.bootstrap_witnesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C> cbor::encode::Encode<C> for WitnessSet {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        let len = u64::from(!self.vkey_witnesses.is_empty())
            + u64::from(!self.bootstrap_witnesses.is_empty());

        e.map(len)?;

        if !self.vkey_witnesses.is_empty() {
            e.u8(Self::VKEY_WITNESSES)?;
            e.encode_with(&self.vkey_witnesses, ctx)?;
        }

        if !self.bootstrap_witnesses.is_empty() {
            e.u8(Self::BOOTSTRAP_WITNESSES)?;
            e.encode_with(&self.bootstrap_witnesses, ctx)?;
        }

        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for WitnessSet {
    fn decode(d: &mut cbor::Decoder<'b>, _ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        let (vkey_witnesses, bootstrap_witnesses) = heterogeneous_map(
            d,
            (None::<Vec<VKeyWitness>>, None::<Vec<BootstrapWitness>>),
            |d| d.u8(),
            |d, state, field| {
                match field {
                    Self::VKEY_WITNESSES if state.0.is_none() => {
                        state.0 = Some(homogeneous_array(d, |d| d.decode())?)
                    }
                    Self::BOOTSTRAP_WITNESSES if state.1.is_none() => {
                        state.1 = Some(homogeneous_array(d, |d| d.decode())?)
                    }
                    _ => return unexpected_field::<WitnessSet, _>(field),
                }
                Ok(())
            },
        )?;

        Ok(WitnessSet {
            vkey_witnesses: vkey_witnesses.unwrap_or_default(),
            bootstrap_witnesses: bootstrap_witnesses.unwrap_or_default(),
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use crate::{any_bootstrap_witness, any_vkey_witness, prop_cbor_roundtrip};
    use proptest::{collection, prop_compose};

    prop_cbor_roundtrip!(WitnessSet, any_witness_set());

    prop_compose! {
        pub fn any_witness_set()(
            vkey_witnesses in collection::vec(any_vkey_witness(), 0..4),
            bootstrap_witnesses in collection::vec(any_bootstrap_witness(), 0..4),
        ) -> WitnessSet {
            WitnessSet {
                vkey_witnesses,
                bootstrap_witnesses,
            }
        }
    }

}
