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

use crate::{KeyHash, blake2b_224, cbor};
use std::fmt;

macro_rules! fixed_bytes {
    ($name:ident, $size:expr) => {
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name([u8; $size]);

        impl $name {
            pub const SIZE: usize = $size;

            pub const fn new(bytes: [u8; $size]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; $size] {
                &self.0
            }
        }

        impl From<[u8; $size]> for $name {
            fn from(bytes: [u8; $size]) -> Self {
                Self(bytes)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = std::array::TryFromSliceError;

            fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                <[u8; $size]>::try_from(bytes).map(Self)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let bytes = hex::decode(s).map_err(|e| e.to_string())?;
                Self::try_from(bytes.as_slice()).map_err(|_| {
                    format!(
                        "expected {} bytes for {}, got {}",
                        $size,
                        stringify!($name),
                        bytes.len()
                    )
                })
            }
        }

        impl<C> cbor::encode::Encode<C> for $name {
            fn encode<W: cbor::encode::Write>(
                &self,
                e: &mut cbor::Encoder<W>,
                _ctx: &mut C,
            ) -> Result<(), cbor::encode::Error<W::Error>> {
                e.bytes(&self.0)?;
                Ok(())
            }
        }

        impl<'b, C> cbor::decode::Decode<'b, C> for $name {
            fn decode(
                d: &mut cbor::Decoder<'b>,
                _ctx: &mut C,
            ) -> Result<Self, cbor::decode::Error> {
                cbor::sized_bytes::<$size>(d).map(Self)
            }
        }
    };
}

fixed_bytes!(VerificationKey, 32);

fixed_bytes!(ChainCode, 32);

fixed_bytes!(Signature, 64);

impl VerificationKey {
    pub fn key_hash(&self) -> KeyHash {
        blake2b_224(&self.0)
    }
}

/// A BIP32-Ed25519 public key together with its chain code, as needed for Byron addresses and
/// bootstrap witnesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedVerificationKey {
    pub public_key: VerificationKey,
    pub chain_code: ChainCode,
}

impl ExtendedVerificationKey {
    pub fn new(public_key: VerificationKey, chain_code: ChainCode) -> Self {
        Self {
            public_key,
            chain_code,
        }
    }

    /// The 64-byte concatenation `public_key ‖ chain_code`.
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut bytes = [0; 64];
        bytes[..32].copy_from_slice(self.public_key.as_ref());
        bytes[32..].copy_from_slice(self.chain_code.as_ref());
        bytes
    }

    pub fn key_hash(&self) -> KeyHash {
        self.public_key.key_hash()
    }
}
