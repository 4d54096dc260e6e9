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

use crate::{Address, Lovelace, cbor, heterogeneous_array};

/// An ada-only output, as found in Shelley-era transaction bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOutput {
    pub address: Address,
    pub amount: Lovelace,
}

impl TransactionOutput {
    pub fn new(address: Address, amount: Lovelace) -> Self {
        Self { address, amount }
    }
}

impl<C> cbor::encode::Encode<C> for TransactionOutput {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.array(2)?;
        e.encode_with(&self.address, ctx)?;
        e.u64(self.amount)?;
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for TransactionOutput {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        heterogeneous_array(d, |d, assert_len| {
            assert_len(2)?;
            Ok(TransactionOutput {
                address: d.decode_with(ctx)?,
                amount: d.u64()?,
            })
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use crate::{MAX_LOVELACE, any_address, prop_cbor_roundtrip};
    use proptest::{prelude::*, prop_compose};

    prop_cbor_roundtrip!(TransactionOutput, any_transaction_output());

    prop_compose! {
        pub fn any_transaction_output()(
            address in any_address(),
            amount in 0..=MAX_LOVELACE,
        ) -> TransactionOutput {
            TransactionOutput::new(address, amount)
        }
    }

}
