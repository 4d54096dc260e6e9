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

//! A transaction that passed every validation rule, ready to be confirmed and signed.

use sigil_kernel::{
    Address, DerivationPath, KeyHash, Lovelace, Metadata, Network, PoolId, StakePointer,
    TransactionInput,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTransaction {
    pub network: Network,
    pub inputs: Vec<SpendingInput>,
    pub outputs: Vec<Output>,
    pub fee: Lovelace,
    pub ttl: u64,
    pub certificates: Vec<StakeCertificate>,
    pub withdrawals: Vec<Withdrawal>,
    pub metadata: Option<Metadata>,
}

impl ValidTransaction {
    /// Amount leaving the wallet: external outputs only, change excluded.
    pub fn spent(&self) -> Lovelace {
        self.outputs
            .iter()
            .filter_map(|output| match output {
                Output::External { amount, .. } => Some(*amount),
                Output::Change { .. } => None,
            })
            .fold(0, Lovelace::saturating_add)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendingInput {
    pub input: TransactionInput,
    pub path: DerivationPath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    External { address: Address, amount: Lovelace },
    Change { address: ChangeAddress, amount: Lovelace },
}

impl Output {
    pub fn amount(&self) -> Lovelace {
        match self {
            Output::External { amount, .. } | Output::Change { amount, .. } => *amount,
        }
    }
}

/// An address owned by the device, described by the keys it is derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeAddress {
    Byron {
        path: DerivationPath,
    },
    Base {
        path: DerivationPath,
        staking: Staking,
    },
    Pointer {
        path: DerivationPath,
        pointer: StakePointer,
    },
    Enterprise {
        path: DerivationPath,
    },
}

impl ChangeAddress {
    pub fn path(&self) -> &DerivationPath {
        match self {
            ChangeAddress::Byron { path }
            | ChangeAddress::Base { path, .. }
            | ChangeAddress::Pointer { path, .. }
            | ChangeAddress::Enterprise { path } => path,
        }
    }
}

/// Delegation part of a base change address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Staking {
    Path(DerivationPath),
    KeyHash(KeyHash),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakeCertificate {
    pub action: StakeAction,
    pub path: DerivationPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StakeAction {
    Registration,
    Deregistration,
    Delegation(PoolId),
}

impl StakeCertificate {
    pub fn requires_witness(&self) -> bool {
        !matches!(self.action, StakeAction::Registration)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Withdrawal {
    pub path: DerivationPath,
    pub amount: Lovelace,
}
