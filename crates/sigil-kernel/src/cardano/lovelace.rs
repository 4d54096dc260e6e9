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

pub type Lovelace = u64;

/// Total supply of Ada, in Lovelace. No single amount, nor any sum of amounts, may exceed it.
pub const MAX_LOVELACE: Lovelace = 45_000_000_000_000_000;

/// Whether an amount fits within the total supply.
pub fn is_within_supply(amount: Lovelace) -> bool {
    amount <= MAX_LOVELACE
}

/// Sum amounts, failing as soon as the running total leaves the supply range.
pub fn checked_total(amounts: impl IntoIterator<Item = Lovelace>) -> Option<Lovelace> {
    amounts.into_iter().try_fold(0, |total: Lovelace, amount| {
        total.checked_add(amount).filter(|sum| is_within_supply(*sum))
    })
}
