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

use sigil_kernel::{Lovelace, is_within_supply};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidFee {
    #[error("fee of {0} lovelace exceeds the total supply")]
    OutOfRange(Lovelace),
}

pub(crate) fn execute(fee: Lovelace) -> Result<(), InvalidFee> {
    if !is_within_supply(fee) {
        return Err(InvalidFee::OutOfRange(fee));
    }
    Ok(())
}
