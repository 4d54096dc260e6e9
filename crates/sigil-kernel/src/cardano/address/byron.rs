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

use super::AddressError;
use crate::{
    AddressRoot, ExtendedVerificationKey, ProtocolMagic, cbor, decode_hash, encode_hash,
    sha3_then_blake2b_224, to_cbor,
};
use crc::{CRC_32_ISO_HDLC, Crc};

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Tag marking an embedded CBOR data item.
const TAG_ENCODED_CBOR: u64 = 24;

/// Attribute key holding the protocol magic of non-mainnet addresses.
const ATTRIBUTE_PROTOCOL_MAGIC: u64 = 2;

/// Byron address type for addresses spending from a public key.
pub const BYRON_KIND_PUBLIC_KEY: u64 = 0;

// -----------------------------------------------------------------------------
// ByronAttributes
// -----------------------------------------------------------------------------

/// The subset of Byron address attributes relevant to signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ByronAttributes {
    pub protocol_magic: Option<ProtocolMagic>,
}

impl ByronAttributes {
    pub fn new(protocol_magic: Option<ProtocolMagic>) -> Self {
        Self { protocol_magic }
    }
}

impl<C> cbor::encode::Encode<C> for ByronAttributes {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        _ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        match self.protocol_magic {
            None => {
                e.map(0)?;
            }
            Some(protocol_magic) => {
                e.map(1)?;
                e.u64(ATTRIBUTE_PROTOCOL_MAGIC)?;
                e.bytes(&to_cbor(&protocol_magic.as_u32()))?;
            }
        }
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for ByronAttributes {
    fn decode(d: &mut cbor::Decoder<'b>, _ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        cbor::heterogeneous_map(
            d,
            ByronAttributes::default(),
            |d| d.u64(),
            |d, state, key| {
                if key == ATTRIBUTE_PROTOCOL_MAGIC {
                    let inner = d.bytes()?;
                    let magic = cbor::from_cbor_no_leftovers::<u32>(inner)?;
                    state.protocol_magic = Some(ProtocolMagic::from(magic));
                } else {
                    // Other attributes (e.g. the encrypted derivation path) carry nothing we need.
                    d.skip()?;
                }
                Ok(())
            },
        )
    }
}

// -----------------------------------------------------------------------------
// ByronAddress
// -----------------------------------------------------------------------------

/// A legacy (bootstrap era) address: a CRC-protected CBOR envelope around an address root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByronAddress {
    bytes: Vec<u8>,
    root: AddressRoot,
    attributes: ByronAttributes,
    kind: u64,
}

impl ByronAddress {
    /// Derive the public-key address of an extended verification key.
    pub fn derive(xpub: &ExtendedVerificationKey, protocol_magic: Option<ProtocolMagic>) -> Self {
        let attributes = ByronAttributes::new(protocol_magic);

        let root = sha3_then_blake2b_224(&to_cbor(&SpendingData {
            xpub,
            attributes: &attributes,
        }));

        let payload = to_cbor(&Payload {
            root: &root,
            attributes: &attributes,
            kind: BYRON_KIND_PUBLIC_KEY,
        });

        let bytes = to_cbor(&Envelope {
            payload: &payload,
            checksum: CRC32.checksum(&payload),
        });

        Self {
            bytes,
            root,
            attributes,
            kind: BYRON_KIND_PUBLIC_KEY,
        }
    }

    pub fn from_base58(s: &str) -> Result<Self, AddressError> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| AddressError::Base58(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        let (payload, checksum) = decode_envelope(bytes).map_err(AddressError::malformed)?;

        let computed = CRC32.checksum(payload);
        if computed != checksum {
            return Err(AddressError::InvalidChecksum {
                expected: checksum,
                computed,
            });
        }

        let (root, attributes, kind) = decode_payload(payload).map_err(AddressError::malformed)?;

        Ok(Self {
            bytes: bytes.to_vec(),
            root,
            attributes,
            kind,
        })
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(&self.bytes).into_string()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn root(&self) -> &AddressRoot {
        &self.root
    }

    pub fn attributes(&self) -> &ByronAttributes {
        &self.attributes
    }

    /// Protocol magic embedded in the attributes; `None` for mainnet addresses.
    pub fn protocol_magic(&self) -> Option<ProtocolMagic> {
        self.attributes.protocol_magic
    }

    pub fn kind(&self) -> u64 {
        self.kind
    }
}

// -----------------------------------------------------------------------------
// Wire layout
// -----------------------------------------------------------------------------

/// [0, [0, xpub], attributes]
struct SpendingData<'a> {
    xpub: &'a ExtendedVerificationKey,
    attributes: &'a ByronAttributes,
}

impl<C> cbor::encode::Encode<C> for SpendingData<'_> {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.array(3)?;
        e.u64(BYRON_KIND_PUBLIC_KEY)?;
        e.array(2)?;
        e.u8(0)?;
        e.bytes(&self.xpub.to_bytes())?;
        e.encode_with(self.attributes, ctx)?;
        Ok(())
    }
}

/// [root, attributes, kind]
struct Payload<'a> {
    root: &'a AddressRoot,
    attributes: &'a ByronAttributes,
    kind: u64,
}

impl<C> cbor::encode::Encode<C> for Payload<'_> {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.array(3)?;
        encode_hash(e, self.root)?;
        e.encode_with(self.attributes, ctx)?;
        e.u64(self.kind)?;
        Ok(())
    }
}

/// [#6.24(payload), crc32(payload)]
struct Envelope<'a> {
    payload: &'a [u8],
    checksum: u32,
}

impl<C> cbor::encode::Encode<C> for Envelope<'_> {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        _ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.array(2)?;
        e.tag(cbor::data::Tag::new(TAG_ENCODED_CBOR))?;
        e.bytes(self.payload)?;
        e.u32(self.checksum)?;
        Ok(())
    }
}

fn decode_envelope(bytes: &[u8]) -> Result<(&[u8], u32), cbor::decode::Error> {
    let mut d = cbor::Decoder::new(bytes);

    let len = d.array()?;
    if len != Some(2) {
        return Err(cbor::decode::Error::message(format!(
            "expected a 2-element envelope, got {len:?}"
        )));
    }

    let tag = d.tag()?;
    if tag.as_u64() != TAG_ENCODED_CBOR {
        return Err(cbor::decode::Error::message(format!(
            "expected tag {TAG_ENCODED_CBOR}, got {}",
            tag.as_u64()
        )));
    }

    let payload = d.bytes()?;
    let checksum = d.u32()?;
    cbor::expect_end_of_input(&d)?;

    Ok((payload, checksum))
}

fn decode_payload(
    payload: &[u8],
) -> Result<(AddressRoot, ByronAttributes, u64), cbor::decode::Error> {
    let mut d = cbor::Decoder::new(payload);

    let len = d.array()?;
    if len != Some(3) {
        return Err(cbor::decode::Error::message(format!(
            "expected a 3-element payload, got {len:?}"
        )));
    }

    let root = decode_hash(&mut d)?;
    let attributes = d.decode()?;
    let kind = d.u64()?;
    cbor::expect_end_of_input(&d)?;

    Ok((root, attributes, kind))
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use crate::{ChainCode, VerificationKey};
    use proptest::prelude::*;

    prop_compose! {
        pub fn any_byron_address()(
            public_key in any::<[u8; 32]>(),
            chain_code in any::<[u8; 32]>(),
            testnet in any::<bool>(),
        ) -> ByronAddress {
            let xpub = ExtendedVerificationKey::new(
                VerificationKey::new(public_key),
                ChainCode::new(chain_code),
            );
            ByronAddress::derive(&xpub, testnet.then_some(ProtocolMagic::TESTNET))
        }
    }

}
