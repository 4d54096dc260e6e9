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

//! Strict walking of CBOR items as they appear on the wire.
//!
//! Ledger values are encoded with definite lengths only. The helpers below traverse exactly one
//! data item and refuse any indefinite-length container, stray break, or reserved initial byte.
//! Map keys must be unique, compared on their encoded bytes.

use crate::{cbor, expect_end_of_input};
use cbor::data::Type;
use std::collections::BTreeSet;

/// Maximum nesting of arrays, maps and tags accepted while walking an item.
pub const MAX_NESTING: usize = 64;

/// Skip over one data item, requiring definite lengths at every level.
pub fn skip_definite(d: &mut cbor::Decoder<'_>) -> Result<(), cbor::decode::Error> {
    skip_definite_at(d, MAX_NESTING)
}

/// Check that `bytes` hold exactly one definite-length item and nothing else, returning the type
/// of that item.
pub fn definite_item(bytes: &[u8]) -> Result<Type, cbor::decode::Error> {
    let mut d = cbor::Decoder::new(bytes);
    let top = d.datatype()?;
    skip_definite(&mut d)?;
    expect_end_of_input(&d)?;
    Ok(top)
}

#[allow(clippy::wildcard_enum_match_arm)]
fn skip_definite_at(d: &mut cbor::Decoder<'_>, depth: usize) -> Result<(), cbor::decode::Error> {
    let position = d.position();

    let Some(depth) = depth.checked_sub(1) else {
        return Err(cbor::decode::Error::message("item nested too deeply").at(position));
    };

    match d.datatype()? {
        Type::ArrayIndef | Type::MapIndef | Type::BytesIndef | Type::StringIndef => Err(
            cbor::decode::Error::message("indefinite-length item in canonical CBOR").at(position),
        ),
        Type::Break => Err(cbor::decode::Error::type_mismatch(Type::Break).at(position)),
        Type::Unknown(byte) => Err(cbor::decode::Error::message(format!(
            "reserved initial byte {byte:#04x}"
        ))
        .at(position)),
        Type::Array => {
            let len = d.array()?.unwrap_or_default();
            for _ in 0..len {
                skip_definite_at(d, depth)?;
            }
            Ok(())
        }
        Type::Map => {
            let len = d.map()?.unwrap_or_default();
            let mut keys = BTreeSet::new();
            for _ in 0..len {
                let start = d.position();
                skip_definite_at(d, depth)?;
                if !keys.insert(&d.input()[start..d.position()]) {
                    return Err(cbor::decode::Error::message("duplicate map key").at(start));
                }
                skip_definite_at(d, depth)?;
            }
            Ok(())
        }
        Type::Tag => {
            d.tag()?;
            skip_definite_at(d, depth)
        }
        Type::Bytes => d.bytes().map(|_| ()),
        Type::String => d.str().map(|_| ()),
        _ => d.skip(),
    }
}
