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

use crate::{Withdrawal, WithdrawalRequest};
use sigil_kernel::{DerivationPath, Lovelace, is_within_supply};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidWithdrawals {
    #[error("withdrawal at position {position} is signed by {path}, which is not a staking key")]
    NotAStakingPath {
        position: usize,
        path: DerivationPath,
    },

    #[error("withdrawal at position {position} of {amount} lovelace exceeds the total supply")]
    AmountOutOfRange { position: usize, amount: Lovelace },

    #[error("withdrawal at position {position} repeats the reward account of {path}")]
    DuplicateAccount {
        position: usize,
        path: DerivationPath,
    },
}

/// Withdrawals are keyed by reward account in the transaction body, hence each staking key may
/// only withdraw once.
pub(crate) fn execute(
    withdrawals: &[WithdrawalRequest],
) -> Result<Vec<Withdrawal>, InvalidWithdrawals> {
    let mut validated: Vec<Withdrawal> = Vec::with_capacity(withdrawals.len());

    for (position, withdrawal) in withdrawals.iter().enumerate() {
        if !withdrawal.path.is_staking() {
            return Err(InvalidWithdrawals::NotAStakingPath {
                position,
                path: withdrawal.path.clone(),
            });
        }

        if !is_within_supply(withdrawal.amount) {
            return Err(InvalidWithdrawals::AmountOutOfRange {
                position,
                amount: withdrawal.amount,
            });
        }

        if validated.iter().any(|known| known.path == withdrawal.path) {
            return Err(InvalidWithdrawals::DuplicateAccount {
                position,
                path: withdrawal.path.clone(),
            });
        }

        validated.push(Withdrawal {
            path: withdrawal.path.clone(),
            amount: withdrawal.amount,
        });
    }

    Ok(validated)
}
