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

use sigil_kernel::{Metadata, cbor};
use thiserror::Error;

/// Largest metadata the device accepts to hash, in bytes.
pub const MAX_METADATA_SIZE: usize = 500;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidMetadata {
    #[error("metadata of {size} bytes exceeds the maximum of {MAX_METADATA_SIZE}")]
    TooLarge { size: usize },

    #[error("malformed metadata: {0}")]
    Malformed(String),

    #[error("metadata must be a map, found {0:?}")]
    NotAMap(cbor::data::Type),
}

/// Metadata is hashed as given, so it must already be a single canonical CBOR map: definite
/// lengths throughout and nothing after it.
pub(crate) fn execute(bytes: &[u8]) -> Result<Option<Metadata>, InvalidMetadata> {
    if bytes.is_empty() {
        return Ok(None);
    }

    if bytes.len() > MAX_METADATA_SIZE {
        return Err(InvalidMetadata::TooLarge { size: bytes.len() });
    }

    match cbor::definite_item(bytes) {
        Ok(cbor::data::Type::Map) => Ok(Some(Metadata::new(bytes.to_vec()))),
        Ok(other) => Err(InvalidMetadata::NotAMap(other)),
        Err(e) => Err(InvalidMetadata::Malformed(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigil_kernel::cbor::data::Type;
    use test_case::test_case;

    /// `{0: h'..'}`, `size` bytes long once encoded.
    fn metadata_of_size(size: usize) -> Vec<u8> {
        let payload = size - 5;
        let mut bytes = vec![0xa1, 0x00, 0x59];
        bytes.extend_from_slice(&(payload as u16).to_be_bytes());
        bytes.resize(size, 0xab);
        bytes
    }

    #[test]
    fn no_metadata() {
        assert_eq!(execute(&[]), Ok(None));
    }

    #[test]
    fn maximum_size_is_accepted() {
        let bytes = metadata_of_size(MAX_METADATA_SIZE);
        let metadata = execute(&bytes).unwrap().unwrap();
        assert_eq!(metadata.as_bytes(), bytes.as_slice());
    }

    #[test]
    fn one_byte_over_is_rejected() {
        assert_eq!(
            execute(&metadata_of_size(MAX_METADATA_SIZE + 1)),
            Err(InvalidMetadata::TooLarge {
                size: MAX_METADATA_SIZE + 1
            })
        );
    }

    #[test_case("a200a11864a118c843aa00ff01"; "incomplete")]
    #[test_case("a10000ff"; "leftovers")]
    #[test_case("bf0000ff"; "indefinite map")]
    #[test_case("a1009f00ff"; "nested indefinite array")]
    #[test_case("a200000001"; "repeated label")]
    #[test_case("a100a2616100616101"; "repeated nested key")]
    fn malformed(bytes: &str) {
        assert!(matches!(
            execute(&hex::decode(bytes).unwrap()),
            Err(InvalidMetadata::Malformed(..))
        ));
    }

    #[test_case("8100" => Type::Array; "list")]
    #[test_case("00" => Type::U8; "integer")]
    #[test_case("4100" => Type::Bytes; "bytes")]
    fn not_a_map(bytes: &str) -> Type {
        match execute(&hex::decode(bytes).unwrap()) {
            Err(InvalidMetadata::NotAMap(found)) => found,
            result => panic!("unexpected result: {result:?}"),
        }
    }
}
