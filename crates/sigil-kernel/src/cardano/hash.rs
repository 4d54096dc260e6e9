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

use crate::cbor;
pub use pallas_crypto::hash::{Hash, Hasher};
use sha3::{Digest, Sha3_256};

// -----------------------------------------------------------------------------
// Hash sizes
// -----------------------------------------------------------------------------

pub mod size {
    pub const CREDENTIAL: usize = 28;

    pub const KEY: usize = CREDENTIAL;

    pub const METADATA: usize = 32;

    pub const POOL_COLD_KEY: usize = 28;

    pub const ADDRESS_ROOT: usize = 28;

    pub const TRANSACTION_BODY: usize = 32;
}

// -----------------------------------------------------------------------------
// Aliases
// -----------------------------------------------------------------------------

pub type KeyHash = Hash<{ size::KEY }>;

pub type PoolId = Hash<{ size::POOL_COLD_KEY }>;

pub type TransactionId = Hash<{ size::TRANSACTION_BODY }>;

pub type MetadataHash = Hash<{ size::METADATA }>;

pub type AddressRoot = Hash<{ size::ADDRESS_ROOT }>;

// -----------------------------------------------------------------------------
// Hashing
// -----------------------------------------------------------------------------

/// Blake2b-224 digest, used for key hashes and address roots.
pub fn blake2b_224(bytes: &[u8]) -> Hash<28> {
    Hasher::<224>::hash(bytes)
}

/// Blake2b-256 digest, used for transaction bodies and metadata.
pub fn blake2b_256(bytes: &[u8]) -> Hash<32> {
    Hasher::<256>::hash(bytes)
}

/// Blake2b-224 over SHA3-256, as used for Byron address roots.
pub fn sha3_then_blake2b_224(bytes: &[u8]) -> Hash<28> {
    blake2b_224(&Sha3_256::digest(bytes))
}

// -----------------------------------------------------------------------------
// Serialisation
// -----------------------------------------------------------------------------

pub fn encode_hash<const N: usize, W: cbor::encode::Write>(
    e: &mut cbor::Encoder<W>,
    hash: &Hash<N>,
) -> Result<(), cbor::encode::Error<W::Error>> {
    e.bytes(hash.as_ref())?;
    Ok(())
}

pub fn decode_hash<const N: usize>(
    d: &mut cbor::Decoder<'_>,
) -> Result<Hash<N>, cbor::decode::Error> {
    cbor::sized_bytes::<N>(d).map(Hash::new)
}

/// Parse a hex-encoded hash of exactly `N` bytes.
pub fn parse_hash<const N: usize>(s: &str) -> Result<Hash<N>, String> {
    let bytes = hex::decode(s).map_err(|e| e.to_string())?;
    <[u8; N]>::try_from(bytes.as_slice())
        .map(Hash::new)
        .map_err(|_| format!("expected {N} bytes, got {}", bytes.len()))
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    pub fn any_hash28() -> impl Strategy<Value = Hash<28>> {
        any::<[u8; 28]>().prop_map(Hash::from)
    }

    pub fn any_hash32() -> impl Strategy<Value = Hash<32>> {
        any::<[u8; 32]>().prop_map(Hash::from)
    }

}
