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
    AddressRoot, ByronAddress, ByronAttributes, ChainCode, ExtendedVerificationKey,
    InvalidEd25519Signature, Signature, VerificationKey, cbor, from_cbor_no_leftovers,
    heterogeneous_array, to_cbor, verify_ed25519_signature,
};

/// Signature of a Byron-era key, carrying what is needed to recompute the root of the spent
/// address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapWitness {
    pub vkey: VerificationKey,
    pub signature: Signature,
    pub chain_code: ChainCode,
    /// CBOR-serialised Byron address attributes.
    pub attributes: Vec<u8>,
}

impl BootstrapWitness {
    pub fn new(
        xpub: &ExtendedVerificationKey,
        signature: Signature,
        attributes: &ByronAttributes,
    ) -> Self {
        Self {
            vkey: xpub.public_key,
            signature,
            chain_code: xpub.chain_code,
            attributes: to_cbor(attributes),
        }
    }

    pub fn verify(&self, message: &[u8]) -> Result<(), InvalidEd25519Signature> {
        verify_ed25519_signature(&self.vkey, &self.signature, message)
    }

    /// Root of the Byron address this witness unlocks.
    pub fn address_root(&self) -> Result<AddressRoot, cbor::decode::Error> {
        let attributes: ByronAttributes = from_cbor_no_leftovers(&self.attributes)?;
        let xpub = ExtendedVerificationKey::new(self.vkey, self.chain_code);
        Ok(*ByronAddress::derive(&xpub, attributes.protocol_magic).root())
    }
}

impl<C> cbor::encode::Encode<C> for BootstrapWitness {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.array(4)?;
        e.encode_with(self.vkey, ctx)?;
        e.encode_with(self.signature, ctx)?;
        e.encode_with(self.chain_code, ctx)?;
        e.bytes(&self.attributes)?;
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for BootstrapWitness {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        heterogeneous_array(d, |d, assert_len| {
            assert_len(4)?;
            Ok(BootstrapWitness {
                vkey: d.decode_with(ctx)?,
                signature: d.decode_with(ctx)?,
                chain_code: d.decode_with(ctx)?,
                attributes: d.bytes()?.to_vec(),
            })
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use crate::{ProtocolMagic, prop_cbor_roundtrip};
    use proptest::{prelude::*, prop_compose};

    prop_cbor_roundtrip!(BootstrapWitness, any_bootstrap_witness());

    prop_compose! {
        pub fn any_bootstrap_witness()(
            vkey in any::<[u8; 32]>(),
            chain_code in any::<[u8; 32]>(),
            signature in any::<[u8; 64]>(),
            testnet in any::<bool>(),
        ) -> BootstrapWitness {
            let xpub = ExtendedVerificationKey::new(
                VerificationKey::new(vkey),
                ChainCode::new(chain_code),
            );
            let attributes = ByronAttributes::new(testnet.then_some(ProtocolMagic::TESTNET));
            BootstrapWitness::new(&xpub, Signature::new(signature), &attributes)
        }
    }

}
