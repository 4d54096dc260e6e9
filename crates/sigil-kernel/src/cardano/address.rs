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
use std::{fmt, str::FromStr};
use thiserror::Error;

pub mod byron;
pub use byron::*;

pub mod pointer;
pub use pointer::*;

pub mod shelley;
pub use shelley::*;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("empty address")]
    Empty,
    #[error("invalid base58: {0}")]
    Base58(String),
    #[error("invalid bech32: {0}")]
    Bech32(String),
    #[error("malformed address: {0}")]
    Malformed(String),
    #[error("checksum mismatch: expected {expected:08x}, computed {computed:08x}")]
    InvalidChecksum { expected: u32, computed: u32 },
    #[error("unsupported address type {0}")]
    UnsupportedType(u8),
    #[error("invalid length {length} for {address_type:?} address")]
    InvalidLength {
        address_type: AddressType,
        length: usize,
    },
    #[error("prefix '{prefix}' does not match address header, expected '{expected}'")]
    InconsistentPrefix {
        prefix: String,
        expected: &'static str,
    },
}

impl AddressError {
    pub(crate) fn malformed(e: cbor::decode::Error) -> Self {
        AddressError::Malformed(e.to_string())
    }
}

// -----------------------------------------------------------------------------
// AddressType
// -----------------------------------------------------------------------------

/// The high nibble of an address header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AddressType {
    BaseKeyKey = 0,
    BaseScriptKey = 1,
    BaseKeyScript = 2,
    BaseScriptScript = 3,
    PointerKey = 4,
    PointerScript = 5,
    EnterpriseKey = 6,
    EnterpriseScript = 7,
    Byron = 8,
    RewardKey = 14,
    RewardScript = 15,
}

impl AddressType {
    pub fn is_reward(self) -> bool {
        matches!(self, AddressType::RewardKey | AddressType::RewardScript)
    }
}

impl TryFrom<u8> for AddressType {
    type Error = AddressError;

    fn try_from(nibble: u8) -> Result<Self, Self::Error> {
        Ok(match nibble {
            0 => AddressType::BaseKeyKey,
            1 => AddressType::BaseScriptKey,
            2 => AddressType::BaseKeyScript,
            3 => AddressType::BaseScriptScript,
            4 => AddressType::PointerKey,
            5 => AddressType::PointerScript,
            6 => AddressType::EnterpriseKey,
            7 => AddressType::EnterpriseScript,
            8 => AddressType::Byron,
            14 => AddressType::RewardKey,
            15 => AddressType::RewardScript,
            _ => return Err(AddressError::UnsupportedType(nibble)),
        })
    }
}

// -----------------------------------------------------------------------------
// Address
// -----------------------------------------------------------------------------

/// Any address that may appear in a transaction output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    Byron(ByronAddress),
    Shelley(ShelleyAddress),
}

impl Address {
    /// Decode raw address bytes, dispatching on the header's type nibble.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        let header = *bytes.first().ok_or(AddressError::Empty)?;
        // A Byron address is a CBOR array of two items, whose first byte (0x82) shares the
        // Byron type nibble.
        if header >> 4 == AddressType::Byron as u8 {
            ByronAddress::from_bytes(bytes).map(Address::Byron)
        } else {
            ShelleyAddress::from_bytes(bytes).map(Address::Shelley)
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Address::Byron(address) => address.as_bytes(),
            Address::Shelley(address) => address.as_bytes(),
        }
    }

    pub fn is_byron(&self) -> bool {
        matches!(self, Address::Byron(_))
    }

    pub fn as_shelley(&self) -> Option<&ShelleyAddress> {
        match self {
            Address::Shelley(address) => Some(address),
            Address::Byron(_) => None,
        }
    }
}

impl FromStr for Address {
    type Err = AddressError;

    /// Bech32 when the string carries one of the known human-readable prefixes, base58 otherwise.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let known_prefix = ["addr1", "addr_test1", "stake1", "stake_test1"]
            .iter()
            .any(|prefix| s.to_lowercase().starts_with(prefix));

        if known_prefix {
            ShelleyAddress::from_bech32(s).map(Address::Shelley)
        } else {
            ByronAddress::from_base58(s).map(Address::Byron)
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Byron(address) => write!(f, "{}", address.to_base58()),
            Address::Shelley(address) => match address.to_bech32() {
                Ok(s) => write!(f, "{s}"),
                Err(_) => write!(f, "{}", hex::encode(address.as_bytes())),
            },
        }
    }
}

impl<C> cbor::encode::Encode<C> for Address {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        _ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.bytes(self.as_bytes())?;
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for Address {
    fn decode(d: &mut cbor::Decoder<'b>, _ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        let bytes = d.bytes()?;
        Address::from_bytes(bytes).map_err(cbor::decode::Error::message)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    pub fn any_address() -> impl Strategy<Value = Address> {
        prop_oneof![
            any_shelley_address().prop_map(Address::Shelley),
            any_byron_address().prop_map(Address::Byron),
        ]
    }

    #[cfg(test)]
    mod internal {
        use super::*;
        use crate::{from_cbor_no_leftovers, to_cbor};
        use test_case::test_case;

        #[test_case("addr1q84sh2j72ux0l03fxndjnhctdg7hcppsaejafsa84vh7lwgmcs5wgus8qt4atk45lvt4xfxpjtwfhdmvchdf2m3u3hlsd5tq5r" => false; "shelley")]
        #[test_case("Ae2tdPwUPEZCanmBz5g2GEwFqKTKpNJcGYPKfDxoNeKZ8bRHr8366kseiK2" => true; "byron mainnet")]
        #[test_case("2657WMsDfac7BteXkJq5Jzdog4h47fPbkwUM49isuWbYAr2cFRHa3rURP236h9PBe" => true; "byron testnet")]
        fn parse(s: &str) -> bool {
            let address: Address = s.parse().unwrap();
            assert_eq!(address.to_string(), s);
            address.is_byron()
        }

        #[test_case(&[] => AddressError::Empty; "empty")]
        #[test_case(&[0xa1, 0x00] => AddressError::UnsupportedType(10); "unknown type")]
        fn from_bytes_failures(bytes: &[u8]) -> AddressError {
            Address::from_bytes(bytes).unwrap_err()
        }

        #[test]
        fn invalid_cbor_bytes_are_rejected() {
            let bytes = to_cbor(&minicbor::bytes::ByteVec::from(vec![0x61, 0x00]));
            assert!(from_cbor_no_leftovers::<Address>(&bytes).is_err());
        }

        proptest! {
            #[test]
            fn cbor_roundtrip(address in any_address()) {
                let bytes = to_cbor(&address);
                prop_assert_eq!(from_cbor_no_leftovers::<Address>(&bytes).ok(), Some(address));
            }
        }
    }
}
