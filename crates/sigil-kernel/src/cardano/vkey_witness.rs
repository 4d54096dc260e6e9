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

use crate::{Signature, VerificationKey, cbor, heterogeneous_array};
use pallas_crypto::key::ed25519;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidEd25519Signature {
    #[error("invalid signature for given key")]
    InvalidSignature,
}

/// Check an Ed25519 signature over `message`.
pub fn verify_ed25519_signature(
    vkey: &VerificationKey,
    signature: &Signature,
    message: &[u8],
) -> Result<(), InvalidEd25519Signature> {
    let public_key = ed25519::PublicKey::from(*vkey.as_bytes());
    let signature = ed25519::Signature::from(*signature.as_bytes());

    if !public_key.verify(message, &signature) {
        Err(InvalidEd25519Signature::InvalidSignature)
    } else {
        Ok(())
    }
}

/// Signature of a Shelley-era key over a transaction id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VKeyWitness {
    pub vkey: VerificationKey,
    pub signature: Signature,
}

impl VKeyWitness {
    pub fn new(vkey: VerificationKey, signature: Signature) -> Self {
        Self { vkey, signature }
    }

    pub fn verify(&self, message: &[u8]) -> Result<(), InvalidEd25519Signature> {
        verify_ed25519_signature(&self.vkey, &self.signature, message)
    }
}

impl<C> cbor::encode::Encode<C> for VKeyWitness {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.array(2)?;
        e.encode_with(self.vkey, ctx)?;
        e.encode_with(self.signature, ctx)?;
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for VKeyWitness {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        heterogeneous_array(d, |d, assert_len| {
            assert_len(2)?;
            Ok(VKeyWitness {
                vkey: d.decode_with(ctx)?,
                signature: d.decode_with(ctx)?,
            })
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use crate::prop_cbor_roundtrip;
    use proptest::{prelude::*, prop_compose};

    prop_cbor_roundtrip!(VKeyWitness, any_vkey_witness());

    prop_compose! {
        pub fn any_vkey_witness()(
            vkey in any::<[u8; 32]>(),
            signature in any::<[u8; 64]>(),
        ) -> VKeyWitness {
            VKeyWitness::new(VerificationKey::new(vkey), Signature::new(signature))
        }
    }

    #[cfg(test)]
    mod internal {
        use super::*;
        use crate::TransactionId;

        fn witness() -> VKeyWitness {
            VKeyWitness::new(
                "5d010cf16fdeff40955633d6c565f3844a288a24967cf6b76acbeb271b4f13c1"
                    .parse()
                    .unwrap(),
                "b2015772a91043aeb04b98111744a098afdade0db5e30206538d7f2814965a5800d45240137f4d0dc81845a71e67cda38beaf816a520d73c4decbf7cbf0f6d08"
                    .parse()
                    .unwrap(),
            )
        }

        #[test]
        fn verifies_against_transaction_id() {
            let id: TransactionId =
                crate::parse_hash("1875f1d59a53f1cb4c43949867d72bcfd857fa3b64feb88f41b78ddaa1a21cbf")
                    .unwrap();
            assert_eq!(witness().verify(id.as_ref()), Ok(()));
        }

        #[test]
        fn rejects_other_messages() {
            assert_eq!(
                witness().verify(&[0; 32]),
                Err(InvalidEd25519Signature::InvalidSignature)
            );
        }
    }
}
