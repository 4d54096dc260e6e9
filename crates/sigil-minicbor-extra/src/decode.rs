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
use std::fmt::Display;

// Misc
// ----------------------------------------------------------------------------

pub fn decode_break<'d>(
    d: &mut cbor::Decoder<'d>,
    len: Option<u64>,
) -> Result<bool, cbor::decode::Error> {
    if d.datatype()? == cbor::data::Type::Break {
        // NOTE: A Break inside a definite container is never legitimate.
        if len.is_some() {
            return Err(cbor::decode::Error::type_mismatch(cbor::data::Type::Break));
        }

        d.skip()?;

        return Ok(true);
    }

    Ok(false)
}

/// Decode a chunk, but retain a reference to the decoded bytes.
pub fn tee<'d, A>(
    d: &mut cbor::Decoder<'d>,
    decoder: impl FnOnce(&mut cbor::Decoder<'d>) -> Result<A, cbor::decode::Error>,
) -> Result<(A, &'d [u8]), cbor::decode::Error> {
    let original_bytes = d.input();
    let start = d.position();
    let a = decoder(d)?;
    let end = d.position();
    Ok((a, &original_bytes[start..end]))
}

/// Decode a byte string of exactly `N` bytes.
pub fn sized_bytes<const N: usize>(
    d: &mut cbor::Decoder<'_>,
) -> Result<[u8; N], cbor::decode::Error> {
    let position = d.position();
    let bytes = d.bytes()?;
    <[u8; N]>::try_from(bytes).map_err(|_| {
        cbor::decode::Error::message(format!(
            "expected {N} bytes, got {}",
            bytes.len()
        ))
        .at(position)
    })
}

// Array
// ----------------------------------------------------------------------------

/// Decode any heterogeneous CBOR array, irrespective of whether they're indefinite or definite.
///
/// The callback receives a length assertion, which is a no-op for indefinite arrays.
pub fn heterogeneous_array<'d, A>(
    d: &mut cbor::Decoder<'d>,
    elems: impl FnOnce(
        &mut cbor::Decoder<'d>,
        &dyn Fn(u64) -> Result<(), cbor::decode::Error>,
    ) -> Result<A, cbor::decode::Error>,
) -> Result<A, cbor::decode::Error> {
    let len = d.array()?;

    match len {
        None => {
            let result = elems(d, &|_| Ok(()))?;
            if !decode_break(d, len)? {
                return Err(cbor::decode::Error::message(
                    "missing break at the end of an indefinite array",
                ));
            }
            Ok(result)
        }
        Some(len) => elems(
            d,
            &(move |expected_len| {
                if len != expected_len {
                    return Err(cbor::decode::Error::message(format!(
                        "CBOR array length mismatch: expected {} got {}",
                        expected_len, len
                    )));
                }

                Ok(())
            }),
        ),
    }
}

/// Decode a homogeneous CBOR array (definite or not) into a vector.
pub fn homogeneous_array<'d, A>(
    d: &mut cbor::Decoder<'d>,
    mut elem: impl FnMut(&mut cbor::Decoder<'d>) -> Result<A, cbor::decode::Error>,
) -> Result<Vec<A>, cbor::decode::Error> {
    let len = d.array()?;

    let mut elems = Vec::with_capacity(len.unwrap_or_default().min(64) as usize);
    while len.is_none() || Some(elems.len() as u64) < len {
        if decode_break(d, len)? {
            break;
        }
        elems.push(elem(d)?);
    }

    Ok(elems)
}

// Map
// ----------------------------------------------------------------------------

/// Decode any heterogeneous CBOR map, irrespective of whether they're indefinite or definite.
///
/// A good choice for `S` is generally to pick a tuple of `Option` for each field item
/// that needs decoding. For example:
///
/// ```rs
/// let (inputs, outputs, fee) = heterogeneous_map(
///     d,
///     (None, None, None),
///     |d| d.u8(),
///     |d, state, field| {
///         match field {
///             0 => state.0 = Some(d.decode()?),
///             1 => state.1 = Some(d.decode()?),
///             2 => state.2 = Some(d.u64()?),
///             _ => return unexpected_field::<TransactionBody, _>(field),
///         }
///         Ok(())
///     },
/// )?;
/// ```
pub fn heterogeneous_map<K, S>(
    d: &mut cbor::Decoder<'_>,
    mut state: S,
    decode_key: impl Fn(&mut cbor::Decoder<'_>) -> Result<K, cbor::decode::Error>,
    mut decode_value: impl FnMut(
        &mut cbor::Decoder<'_>,
        &mut S,
        K,
    ) -> Result<(), cbor::decode::Error>,
) -> Result<S, cbor::decode::Error> {
    let len = d.map()?;

    let mut n = 0;
    while len.is_none() || Some(n) < len {
        if decode_break(d, len)? {
            break;
        }

        let k = decode_key(d)?;
        decode_value(d, &mut state, k)?;

        n += 1;
    }

    Ok(state)
}

/// Yield a `decode::Error` that fails with a comprehensible error message when an expected field
/// is missing from the map.
pub fn missing_field<C: ?Sized, A>(field_tag: impl Display) -> cbor::decode::Error {
    let msg = format!(
        "missing <{}> at field .{field_tag} in <{}> CBOR map",
        std::any::type_name::<A>(),
        std::any::type_name::<C>(),
    );
    cbor::decode::Error::message(msg)
}

/// Yield a `Result<_, decode::Error>` that always fails with a comprehensible error message when a
/// map key is unexpected.
pub fn unexpected_field<C: ?Sized, A>(field_tag: impl Display) -> Result<A, cbor::decode::Error> {
    Err(cbor::decode::Error::message(format!(
        "unexpected field .{field_tag} in <{}> CBOR map",
        std::any::type_name::<C>(),
    )))
}

// Tests
// ----------------------------------------------------------------------------
