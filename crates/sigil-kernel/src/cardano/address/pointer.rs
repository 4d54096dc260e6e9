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

use std::fmt;

/// Location of the certificate that registered a stake credential, as embedded in pointer
/// addresses.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, PartialOrd, Ord, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakePointer {
    pub block_index: u64,
    #[serde(rename = "txIndex")]
    pub transaction_index: u64,
    pub certificate_index: u64,
}

impl StakePointer {
    pub fn new(block_index: u64, transaction_index: u64, certificate_index: u64) -> Self {
        Self {
            block_index,
            transaction_index,
            certificate_index,
        }
    }

    /// Append the three variable-length naturals to `buffer`.
    pub fn encode_into(&self, buffer: &mut Vec<u8>) {
        encode_variable_length(self.block_index, buffer);
        encode_variable_length(self.transaction_index, buffer);
        encode_variable_length(self.certificate_index, buffer);
    }

    /// Decode a pointer which must span `bytes` entirely.
    pub fn decode_exact(bytes: &[u8]) -> Option<Self> {
        let (block_index, rest) = decode_variable_length(bytes)?;
        let (transaction_index, rest) = decode_variable_length(rest)?;
        let (certificate_index, rest) = decode_variable_length(rest)?;
        rest.is_empty().then_some(StakePointer {
            block_index,
            transaction_index,
            certificate_index,
        })
    }
}

impl fmt::Display for StakePointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "block={},transaction={},certificate={}",
            self.block_index, self.transaction_index, self.certificate_index
        )
    }
}

// -----------------------------------------------------------------------------
// Variable-length naturals
// -----------------------------------------------------------------------------

/// Big-endian base-128, with the top bit set on every byte but the last.
fn encode_variable_length(mut value: u64, buffer: &mut Vec<u8>) {
    let mut groups = vec![(value & 0x7f) as u8];
    value >>= 7;
    while value > 0 {
        groups.push((value & 0x7f) as u8 | 0x80);
        value >>= 7;
    }
    buffer.extend(groups.iter().rev());
}

fn decode_variable_length(bytes: &[u8]) -> Option<(u64, &[u8])> {
    let mut value: u64 = 0;
    for (i, byte) in bytes.iter().enumerate() {
        if value > (u64::MAX >> 7) {
            return None;
        }
        value = (value << 7) | u64::from(byte & 0x7f);
        if byte & 0x80 == 0 {
            return Some((value, &bytes[i + 1..]));
        }
    }
    None
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use proptest::{prelude::*, prop_compose};

    prop_compose! {
        pub fn any_stake_pointer()(
            block_index in any::<u64>(),
            transaction_index in any::<u64>(),
            certificate_index in any::<u64>(),
        ) -> StakePointer {
            StakePointer::new(block_index, transaction_index, certificate_index)
        }
    }

}
