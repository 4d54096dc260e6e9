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

use crate::{MetadataHash, blake2b_256, cbor, tee};
use std::fmt;

/// Transaction metadata, kept as the exact bytes supplied by the wallet. The body commits to
/// them through their hash, so they are never re-encoded.
#[derive(Clone, PartialEq, Eq)]
pub struct Metadata(Vec<u8>);

impl Metadata {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn hash(&self) -> MetadataHash {
        blake2b_256(&self.0)
    }
}

impl fmt::Debug for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Metadata({})", hex::encode(&self.0))
    }
}

impl<C> cbor::encode::Encode<C> for Metadata {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        _ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        // Already a CBOR data item; written as-is, without any envelope.
        e.writer_mut()
            .write_all(&self.0)
            .map_err(cbor::encode::Error::write)?;
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for Metadata {
    fn decode(d: &mut cbor::Decoder<'b>, _ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        let ((), raw) = tee(d, |d| d.skip())?;
        Ok(Metadata(raw.to_vec()))
    }
}
