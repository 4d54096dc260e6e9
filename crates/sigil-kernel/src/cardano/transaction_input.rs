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

use crate::{TransactionId, cbor, decode_hash, encode_hash, heterogeneous_array};
use std::fmt;

/// Reference to an output of a previous transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransactionInput {
    pub transaction_id: TransactionId,
    pub index: u64,
}

impl TransactionInput {
    pub fn new(transaction_id: TransactionId, index: u64) -> Self {
        Self {
            transaction_id,
            index,
        }
    }
}

impl fmt::Display for TransactionInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.transaction_id, self.index)
    }
}

impl<C> cbor::encode::Encode<C> for TransactionInput {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        _ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.array(2)?;
        encode_hash(e, &self.transaction_id)?;
        e.u64(self.index)?;
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for TransactionInput {
    fn decode(d: &mut cbor::Decoder<'b>, _ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        heterogeneous_array(d, |d, assert_len| {
            assert_len(2)?;
            Ok(TransactionInput {
                transaction_id: decode_hash(d)?,
                index: d.u64()?,
            })
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use crate::{any_hash32, prop_cbor_roundtrip};
    use proptest::{prelude::*, prop_compose};

    prop_cbor_roundtrip!(TransactionInput, any_transaction_input());

    prop_compose! {
        pub fn any_transaction_input()(
            transaction_id in any_hash32(),
            index in any::<u64>(),
        ) -> TransactionInput {
            TransactionInput::new(transaction_id, index)
        }
    }

}
