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

use minicbor as cbor;
use std::convert::Infallible;

pub use canonical::*;
pub mod canonical;

pub use decode::*;
pub mod decode;

#[allow(clippy::unwrap_used)]
/// Encode any serialisable value `T` into bytes.
pub fn to_cbor<T: cbor::Encode<()>>(value: &T) -> Vec<u8> {
    let mut buffer = Vec::new();
    let result: Result<(), cbor::encode::Error<Infallible>> = cbor::encode(value, &mut buffer);
    result.unwrap(); // Infallible
    buffer
}

/// Decode raw bytes into a structured type `T`, assuming no context.
pub fn from_cbor<T: for<'d> cbor::Decode<'d, ()>>(bytes: &[u8]) -> Option<T> {
    cbor::decode(bytes).ok()
}

/// Decode a CBOR input, ensuring that there are no bytes leftovers once decoded.
pub fn from_cbor_no_leftovers<T: for<'d> cbor::Decode<'d, ()>>(
    bytes: &[u8],
) -> Result<T, cbor::decode::Error> {
    cbor::decode(bytes).map(|NoLeftovers(inner)| inner)
}

/// Fails when the decoder still has input after the wrapped value.
pub fn expect_end_of_input(d: &cbor::Decoder<'_>) -> Result<(), cbor::decode::Error> {
    if !d.datatype().is_err_and(|e| e.is_end_of_input()) {
        return Err(cbor::decode::Error::message(format!(
            "leftovers bytes after decoding after position {}",
            d.position()
        )));
    }

    Ok(())
}

#[repr(transparent)]
struct NoLeftovers<A>(A);

impl<'a, C, A: cbor::Decode<'a, C>> cbor::decode::Decode<'a, C> for NoLeftovers<A> {
    fn decode(d: &mut cbor::Decoder<'a>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        let inner = d.decode_with(ctx)?;
        expect_end_of_input(d)?;
        Ok(NoLeftovers(inner))
    }
}

#[cfg(test)]
mod tests {
    use crate::{cbor, from_cbor, from_cbor_no_leftovers, to_cbor};
    use outpoint::OutPoint;

    #[test]
    fn to_cbor_is_deterministic() {
        let point = OutPoint {
            index: 3,
            amount: 1_000_000,
        };
        assert_eq!(to_cbor(&point), to_cbor(&point));
        assert_eq!(to_cbor(&point), vec![0x82, 0x03, 0x1a, 0x00, 0x0f, 0x42, 0x40]);
    }

    #[test]
    fn from_cbor_no_leftovers_catches_trailing_bytes() {
        let mut bytes = to_cbor(&OutPoint {
            index: 0,
            amount: 42,
        });
        bytes.push(0x00);

        assert_eq!(
            Some(OutPoint {
                index: 0,
                amount: 42
            }),
            from_cbor(&bytes)
        );
        assert!(from_cbor_no_leftovers::<OutPoint>(&bytes).is_err());
    }

    #[test]
    fn from_cbor_no_leftovers_catches_trailing_breaks() {
        // Indefinite array read by a decoder that ignores the closing break.
        let bytes = [0x9f, 0x00, 0x18, 0x2a, 0xff];
        assert!(from_cbor::<OutPoint>(&bytes).is_some());
        assert!(from_cbor_no_leftovers::<OutPoint>(&bytes).is_err());
    }

    #[test]
    fn from_cbor_rejects_truncated_input() {
        let bytes = to_cbor(&OutPoint {
            index: 7,
            amount: 1_000_000,
        });
        assert!(from_cbor::<OutPoint>(&bytes[..bytes.len() - 1]).is_none());
    }

    pub(crate) mod outpoint {
        use super::cbor;

        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub(crate) struct OutPoint {
            pub(crate) index: u8,
            pub(crate) amount: u64,
        }

        impl<C> cbor::encode::Encode<C> for OutPoint {
            fn encode<W: cbor::encode::Write>(
                &self,
                e: &mut cbor::Encoder<W>,
                ctx: &mut C,
            ) -> Result<(), cbor::encode::Error<W::Error>> {
                e.array(2)?;
                e.encode_with(self.index, ctx)?;
                e.encode_with(self.amount, ctx)?;
                Ok(())
            }
        }

        // Accepts both array forms and never consumes a closing break.
        impl<'d, C> cbor::decode::Decode<'d, C> for OutPoint {
            fn decode(d: &mut cbor::Decoder<'d>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
                d.array()?;
                Ok(OutPoint {
                    index: d.decode_with(ctx)?,
                    amount: d.decode_with(ctx)?,
                })
            }
        }
    }
}
