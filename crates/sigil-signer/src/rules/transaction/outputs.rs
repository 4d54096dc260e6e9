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

use super::inputs::is_key_path;
use crate::{ChangeAddress, ChangeOutputRequest, Output, OutputRequest, Staking};
use sigil_kernel::{
    Address, AddressError, AddressType, DerivationPath, Hash, Network, ProtocolMagic,
    StakePointer, checked_total, size,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidOutputs {
    #[error("output at position {position} has a malformed address: {source}")]
    MalformedAddress {
        position: usize,
        source: AddressError,
    },

    #[error("output at position {position} pays to a reward address")]
    RewardAddress { position: usize },

    #[error("output at position {position} is for network id {found}, expected {expected}")]
    NetworkIdMismatch {
        position: usize,
        expected: u8,
        found: u8,
    },

    #[error(
        "output at position {position} is a Byron address for protocol magic {found}, expected {expected}"
    )]
    ProtocolMagicMismatch {
        position: usize,
        expected: ProtocolMagic,
        found: ProtocolMagic,
    },

    #[error("change output at position {position}: {reason}")]
    InvalidChange {
        position: usize,
        reason: InvalidChange,
    },

    #[error("total output amount is out of range")]
    TotalOutOfRange,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidChange {
    #[error("unsupported address type {0}")]
    UnsupportedType(u8),

    #[error("{path} is not a {era} address key path")]
    WrongSpendingPath {
        path: DerivationPath,
        era: &'static str,
    },

    #[error("{0} is not a staking key path")]
    NotAStakingPath(DerivationPath),

    #[error("base address needs either a staking path or a staking key hash")]
    MissingStaking,

    #[error("base address takes a staking path or a staking key hash, not both")]
    AmbiguousStaking,

    #[error("staking key hash of {0} bytes")]
    MalformedStakingKeyHash(usize),

    #[error("pointer addresses need a block, transaction and certificate index")]
    IncompletePointer,
}

pub(crate) fn execute(
    network: Network,
    outputs: &[OutputRequest],
) -> Result<Vec<Output>, InvalidOutputs> {
    let outputs = outputs
        .iter()
        .enumerate()
        .map(|(position, output)| match output {
            OutputRequest::External { address, amount } => Ok(Output::External {
                address: external_address(network, position, address)?,
                amount: *amount,
            }),
            OutputRequest::Change(change) => Ok(Output::Change {
                address: change_address(change)
                    .map_err(|reason| InvalidOutputs::InvalidChange { position, reason })?,
                amount: change.amount,
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    checked_total(outputs.iter().map(Output::amount)).ok_or(InvalidOutputs::TotalOutOfRange)?;

    Ok(outputs)
}

fn external_address(
    network: Network,
    position: usize,
    address: &str,
) -> Result<Address, InvalidOutputs> {
    let address: Address = address
        .parse()
        .map_err(|source| InvalidOutputs::MalformedAddress { position, source })?;

    match &address {
        Address::Byron(byron) => {
            // Addresses without the attribute belong to mainnet.
            let found = byron.protocol_magic().unwrap_or(ProtocolMagic::MAINNET);
            let expected = network.protocol_magic();
            if found != expected {
                return Err(InvalidOutputs::ProtocolMagicMismatch {
                    position,
                    expected,
                    found,
                });
            }
        }
        Address::Shelley(shelley) => {
            if shelley.address_type().is_reward() {
                return Err(InvalidOutputs::RewardAddress { position });
            }
            if shelley.network_id() != network.network_id() {
                return Err(InvalidOutputs::NetworkIdMismatch {
                    position,
                    expected: network.network_id(),
                    found: shelley.network_id(),
                });
            }
        }
    }

    Ok(address)
}

fn change_address(change: &ChangeOutputRequest) -> Result<ChangeAddress, InvalidChange> {
    let address_type = AddressType::try_from(change.address_type)
        .map_err(|_| InvalidChange::UnsupportedType(change.address_type))?;

    let path = change.path.clone();

    match address_type {
        AddressType::Byron => {
            expect_spending_path(&path, DerivationPath::is_byron, "Byron")?;
            Ok(ChangeAddress::Byron { path })
        }
        AddressType::BaseKeyKey => {
            expect_spending_path(&path, DerivationPath::is_shelley, "Shelley")?;
            let staking = match (&change.staking_path, &change.staking_key_hash) {
                (Some(staking_path), None) if staking_path.is_staking() => {
                    Staking::Path(staking_path.clone())
                }
                (Some(staking_path), None) => {
                    return Err(InvalidChange::NotAStakingPath(staking_path.clone()));
                }
                (None, Some(key_hash)) => {
                    let bytes = <[u8; size::KEY]>::try_from(key_hash.as_slice()).map_err(|_| {
                        InvalidChange::MalformedStakingKeyHash(key_hash.as_slice().len())
                    })?;
                    Staking::KeyHash(Hash::new(bytes))
                }
                (None, None) => return Err(InvalidChange::MissingStaking),
                (Some(_), Some(_)) => return Err(InvalidChange::AmbiguousStaking),
            };
            Ok(ChangeAddress::Base { path, staking })
        }
        AddressType::PointerKey => {
            expect_spending_path(&path, DerivationPath::is_shelley, "Shelley")?;
            let pointer = match (change.block_index, change.tx_index, change.certificate_index) {
                (Some(block), Some(transaction), Some(certificate)) => {
                    StakePointer::new(block, transaction, certificate)
                }
                _ => return Err(InvalidChange::IncompletePointer),
            };
            Ok(ChangeAddress::Pointer { path, pointer })
        }
        AddressType::EnterpriseKey => {
            expect_spending_path(&path, DerivationPath::is_shelley, "Shelley")?;
            Ok(ChangeAddress::Enterprise { path })
        }
        // The device holds no scripts, and reward addresses cannot receive outputs.
        AddressType::BaseScriptKey
        | AddressType::BaseKeyScript
        | AddressType::BaseScriptScript
        | AddressType::PointerScript
        | AddressType::EnterpriseScript
        | AddressType::RewardKey
        | AddressType::RewardScript => Err(InvalidChange::UnsupportedType(change.address_type)),
    }
}

fn expect_spending_path(
    path: &DerivationPath,
    era: fn(&DerivationPath) -> bool,
    name: &'static str,
) -> Result<(), InvalidChange> {
    if is_key_path(path) && era(path) {
        Ok(())
    } else {
        Err(InvalidChange::WrongSpendingPath {
            path: path.clone(),
            era: name,
        })
    }
}
