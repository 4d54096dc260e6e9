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

//! The ordered checkpoints a user walks through before anything is signed.
//!
//! Checkpoints follow the structure of the transaction: inputs on non-standard paths, then
//! outputs, certificates and withdrawals in request order, and finally a summary of the amount
//! spent, the fee and the validity interval. A single rejection cancels the whole session.

use crate::{ChangeAddress, Output, StakeAction, Staking, ValidTransaction};
use sigil_kernel::{Address, DerivationPath, KeyHash, Lovelace, Network, StakePointer};
use std::fmt;
use thiserror::Error;
use tracing::trace;

/// A low-level interaction needed to get through a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Move to the second page of a two-page prompt.
    Swipe,
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// An input spends from a path outside the usual account layout.
    PathNotice { path: DerivationPath },

    Output { address: Address, amount: Lovelace },

    /// Change sent to a Byron or enterprise address does not earn staking rewards.
    ChangeWithoutStakingRewards {
        path: DerivationPath,
        amount: Lovelace,
    },

    PointerChange {
        path: DerivationPath,
        pointer: StakePointer,
        amount: Lovelace,
    },

    StakingKeyHashChange {
        path: DerivationPath,
        staking_key_hash: KeyHash,
        amount: Lovelace,
    },

    /// Change delegated to the staking key of another account.
    ForeignStakingChange {
        path: DerivationPath,
        staking_path: DerivationPath,
        amount: Lovelace,
    },

    Certificate {
        action: StakeAction,
        path: DerivationPath,
    },

    Withdrawal {
        path: DerivationPath,
        amount: Lovelace,
    },

    Summary {
        amount: Lovelace,
        fee: Lovelace,
        ttl: u64,
        network: Network,
    },
}

const SINGLE_PAGE: &[Interaction] = &[Interaction::Confirm];

const TWO_PAGES: &[Interaction] = &[Interaction::Swipe, Interaction::Confirm];

impl Prompt {
    pub fn interactions(&self) -> &'static [Interaction] {
        match self {
            Prompt::PathNotice { .. }
            | Prompt::ChangeWithoutStakingRewards { .. }
            | Prompt::Withdrawal { .. } => SINGLE_PAGE,
            Prompt::Certificate { action, .. } => match action {
                StakeAction::Registration | StakeAction::Deregistration => SINGLE_PAGE,
                StakeAction::Delegation(..) => TWO_PAGES,
            },
            Prompt::Output { .. }
            | Prompt::PointerChange { .. }
            | Prompt::StakingKeyHashChange { .. }
            | Prompt::ForeignStakingChange { .. }
            | Prompt::Summary { .. } => TWO_PAGES,
        }
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prompt::PathNotice { path } => write!(f, "Confirm path {path}"),
            Prompt::Output { address, amount } => {
                write!(f, "Confirm sending {} to {address}", Ada(*amount))
            }
            Prompt::ChangeWithoutStakingRewards { path, amount } => write!(
                f,
                "Change of {} to {path} does not earn staking rewards",
                Ada(*amount)
            ),
            Prompt::PointerChange {
                path,
                pointer,
                amount,
            } => write!(
                f,
                "Change of {} to {path} is delegated through pointer {pointer}",
                Ada(*amount)
            ),
            Prompt::StakingKeyHashChange {
                path,
                staking_key_hash,
                amount,
            } => write!(
                f,
                "Change of {} to {path} is delegated to staking key hash {staking_key_hash}",
                Ada(*amount)
            ),
            Prompt::ForeignStakingChange {
                path,
                staking_path,
                amount,
            } => write!(
                f,
                "Change of {} to {path} is delegated to the staking key at {staking_path}",
                Ada(*amount)
            ),
            Prompt::Certificate { action, path } => match action {
                StakeAction::Registration => write!(f, "Register staking key {path}"),
                StakeAction::Deregistration => write!(f, "Deregister staking key {path}"),
                StakeAction::Delegation(pool) => {
                    write!(f, "Delegate staking key {path} to pool {pool}")
                }
            },
            Prompt::Withdrawal { path, amount } => {
                write!(f, "Withdraw {} from {path}", Ada(*amount))
            }
            Prompt::Summary {
                amount,
                fee,
                ttl,
                network,
            } => write!(
                f,
                "Total amount {}, fee {}, valid until slot {ttl} on {network}",
                Ada(*amount),
                Ada(*fee)
            ),
        }
    }
}

struct Ada(Lovelace);

impl fmt::Display for Ada {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:06} ADA", self.0 / 1_000_000, self.0 % 1_000_000)
    }
}

/// The boundary through which prompts are shown and resolved.
pub trait Confirm {
    fn confirm(&mut self, prompt: &Prompt) -> Decision;
}

impl<F: FnMut(&Prompt) -> Decision> Confirm for F {
    fn confirm(&mut self, prompt: &Prompt) -> Decision {
        self(prompt)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("prompt #{position} was rejected")]
pub struct Cancelled {
    /// Zero-based index of the rejected prompt.
    pub position: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Inputs(usize),
    Outputs(usize),
    Certificates(usize),
    Withdrawals(usize),
    Summary,
    Done,
}

/// Iterator over the prompts of a transaction, in the order they must be confirmed.
#[derive(Debug)]
pub struct ConfirmationFlow<'a> {
    transaction: &'a ValidTransaction,
    state: State,
}

impl<'a> ConfirmationFlow<'a> {
    pub fn new(transaction: &'a ValidTransaction) -> Self {
        Self {
            transaction,
            state: State::Inputs(0),
        }
    }

    fn step(&self, state: State) -> (State, Option<Prompt>) {
        let tx = self.transaction;
        match state {
            State::Inputs(ix) => match tx.inputs.get(ix) {
                None => (State::Outputs(0), None),
                Some(input) => (
                    State::Inputs(ix + 1),
                    (!input.path.is_standard_address()).then(|| Prompt::PathNotice {
                        path: input.path.clone(),
                    }),
                ),
            },
            State::Outputs(ix) => match tx.outputs.get(ix) {
                None => (State::Certificates(0), None),
                Some(output) => (State::Outputs(ix + 1), output_prompt(output)),
            },
            State::Certificates(ix) => match tx.certificates.get(ix) {
                None => (State::Withdrawals(0), None),
                Some(certificate) => (
                    State::Certificates(ix + 1),
                    Some(Prompt::Certificate {
                        action: certificate.action,
                        path: certificate.path.clone(),
                    }),
                ),
            },
            State::Withdrawals(ix) => match tx.withdrawals.get(ix) {
                None => (State::Summary, None),
                Some(withdrawal) => (
                    State::Withdrawals(ix + 1),
                    Some(Prompt::Withdrawal {
                        path: withdrawal.path.clone(),
                        amount: withdrawal.amount,
                    }),
                ),
            },
            State::Summary => (
                State::Done,
                Some(Prompt::Summary {
                    amount: tx.spent(),
                    fee: tx.fee,
                    ttl: tx.ttl,
                    network: tx.network,
                }),
            ),
            State::Done => (State::Done, None),
        }
    }
}

fn output_prompt(output: &Output) -> Option<Prompt> {
    match output {
        Output::External { address, amount } => Some(Prompt::Output {
            address: address.clone(),
            amount: *amount,
        }),
        Output::Change { address, amount } => {
            let amount = *amount;
            match address {
                ChangeAddress::Byron { path } | ChangeAddress::Enterprise { path } => {
                    Some(Prompt::ChangeWithoutStakingRewards {
                        path: path.clone(),
                        amount,
                    })
                }
                ChangeAddress::Pointer { path, pointer } => Some(Prompt::PointerChange {
                    path: path.clone(),
                    pointer: *pointer,
                    amount,
                }),
                ChangeAddress::Base {
                    path,
                    staking: Staking::KeyHash(staking_key_hash),
                } => Some(Prompt::StakingKeyHashChange {
                    path: path.clone(),
                    staking_key_hash: *staking_key_hash,
                    amount,
                }),
                ChangeAddress::Base {
                    path,
                    staking: Staking::Path(staking_path),
                } => (!staking_path.same_account(path)).then(|| Prompt::ForeignStakingChange {
                    path: path.clone(),
                    staking_path: staking_path.clone(),
                    amount,
                }),
            }
        }
    }
}

impl Iterator for ConfirmationFlow<'_> {
    type Item = Prompt;

    fn next(&mut self) -> Option<Prompt> {
        while self.state != State::Done {
            let (next, prompt) = self.step(self.state);
            trace!(from = ?self.state, to = ?next, "confirmation.step");
            self.state = next;
            if prompt.is_some() {
                return prompt;
            }
        }
        None
    }
}

/// Walk through every prompt of the transaction, stopping at the first rejection.
pub fn run<C: Confirm>(transaction: &ValidTransaction, confirmer: &mut C) -> Result<(), Cancelled> {
    for (position, prompt) in ConfirmationFlow::new(transaction).enumerate() {
        match confirmer.confirm(&prompt) {
            Decision::Approved => {}
            Decision::Rejected => return Err(Cancelled { position }),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SpendingInput, StakeCertificate, Withdrawal};
    use sigil_kernel::{Hash, TransactionInput};
    use test_case::test_case;

    fn path(s: &str) -> DerivationPath {
        s.parse().unwrap()
    }

    fn external() -> Output {
        Output::External {
            address: "Ae2tdPwUPEZCanmBz5g2GEwFqKTKpNJcGYPKfDxoNeKZ8bRHr8366kseiK2"
                .parse()
                .unwrap(),
            amount: 3_003_112,
        }
    }

    fn change(address: ChangeAddress) -> Output {
        Output::Change {
            address,
            amount: 1_000_000,
        }
    }

    fn transaction(input: &str) -> ValidTransaction {
        ValidTransaction {
            network: Network::Mainnet,
            inputs: vec![SpendingInput {
                input: TransactionInput::new(Hash::new([0; 32]), 0),
                path: path(input),
            }],
            outputs: vec![external()],
            fee: 42,
            ttl: 10,
            certificates: vec![],
            withdrawals: vec![],
            metadata: None,
        }
    }

    fn flow(transaction: &ValidTransaction) -> Vec<&'static [Interaction]> {
        ConfirmationFlow::new(transaction)
            .map(|prompt| prompt.interactions())
            .collect()
    }

    #[test]
    fn plain_payment() {
        let transaction = transaction("m/44'/1815'/0'/0/1");
        pretty_assertions::assert_eq!(flow(&transaction), vec![TWO_PAGES, TWO_PAGES]);
        pretty_assertions::assert_eq!(
            ConfirmationFlow::new(&transaction).last(),
            Some(Prompt::Summary {
                amount: 3_003_112,
                fee: 42,
                ttl: 10,
                network: Network::Mainnet,
            })
        );
    }

    #[test_case("m/44'/1815'/0'/0/1" => false; "standard byron path")]
    #[test_case("m/1852'/1815'/0'/1/7" => false; "standard internal path")]
    #[test_case("m/1852'/1815'/100'/0/0" => true; "large account")]
    #[test_case("m/1852'/1815'/0'/0/1000000" => true; "large address index")]
    #[test_case("m/1852'/1815'/0'/2/0" => true; "staking key as input")]
    fn path_notice(input: &str) -> bool {
        matches!(
            ConfirmationFlow::new(&transaction(input)).next(),
            Some(Prompt::PathNotice { .. })
        )
    }

    #[test_case(ChangeAddress::Byron { path: path("m/44'/1815'/0'/0/1") } => SINGLE_PAGE.to_vec(); "byron")]
    #[test_case(ChangeAddress::Enterprise { path: path("m/1852'/1815'/0'/0/0") } => SINGLE_PAGE.to_vec(); "enterprise")]
    #[test_case(ChangeAddress::Pointer {
        path: path("m/1852'/1815'/0'/0/0"),
        pointer: StakePointer::new(1, 2, 3),
    } => TWO_PAGES.to_vec(); "pointer")]
    #[test_case(ChangeAddress::Base {
        path: path("m/1852'/1815'/0'/0/0"),
        staking: Staking::KeyHash(Hash::new([3; 28])),
    } => TWO_PAGES.to_vec(); "staking key hash")]
    #[test_case(ChangeAddress::Base {
        path: path("m/1852'/1815'/0'/0/0"),
        staking: Staking::Path(path("m/1852'/1815'/1'/2/0")),
    } => TWO_PAGES.to_vec(); "foreign staking path")]
    #[test_case(ChangeAddress::Base {
        path: path("m/1852'/1815'/0'/0/0"),
        staking: Staking::Path(path("m/1852'/1815'/0'/2/0")),
    } => Vec::<Interaction>::new(); "own staking path")]
    fn change_warning(address: ChangeAddress) -> Vec<Interaction> {
        let mut transaction = transaction("m/1852'/1815'/0'/0/0");
        transaction.outputs.push(change(address));
        let prompts = flow(&transaction);
        match prompts.as_slice() {
            [_, warning, _] => warning.to_vec(),
            [_, _] => vec![],
            _ => panic!("unexpected flow {prompts:?}"),
        }
    }

    #[test]
    fn certificates_then_withdrawals() {
        let staking = path("m/1852'/1815'/0'/2/0");
        let mut transaction = transaction("m/1852'/1815'/0'/0/0");
        transaction.withdrawals.push(Withdrawal {
            path: staking.clone(),
            amount: 1000,
        });
        transaction.certificates = vec![
            StakeCertificate {
                action: StakeAction::Registration,
                path: staking.clone(),
            },
            StakeCertificate {
                action: StakeAction::Delegation(Hash::new([1; 28])),
                path: staking.clone(),
            },
            StakeCertificate {
                action: StakeAction::Deregistration,
                path: staking.clone(),
            },
        ];

        pretty_assertions::assert_eq!(
            flow(&transaction),
            vec![
                TWO_PAGES,
                SINGLE_PAGE,
                TWO_PAGES,
                SINGLE_PAGE,
                SINGLE_PAGE,
                TWO_PAGES
            ]
        );

        let prompts: Vec<Prompt> = ConfirmationFlow::new(&transaction).collect();
        pretty_assertions::assert_eq!(
            prompts[3],
            Prompt::Certificate {
                action: StakeAction::Deregistration,
                path: staking.clone(),
            }
        );
        pretty_assertions::assert_eq!(
            prompts[4],
            Prompt::Withdrawal {
                path: staking,
                amount: 1000
            }
        );
    }

    #[test]
    fn summary_excludes_change() {
        let mut transaction = transaction("m/1852'/1815'/0'/0/0");
        transaction.outputs.push(change(ChangeAddress::Enterprise {
            path: path("m/1852'/1815'/0'/0/0"),
        }));
        assert!(matches!(
            ConfirmationFlow::new(&transaction).last(),
            Some(Prompt::Summary {
                amount: 3_003_112,
                ..
            })
        ));
    }

    #[test]
    fn every_prompt_is_shown_when_approved() {
        let transaction = transaction("m/1852'/1815'/0'/0/0");
        let mut shown = Vec::new();
        let result = run(&transaction, &mut |prompt: &Prompt| {
            shown.push(prompt.clone());
            Decision::Approved
        });
        pretty_assertions::assert_eq!(result, Ok(()));
        pretty_assertions::assert_eq!(shown.len(), 2);
    }

    #[test]
    fn rejection_stops_the_flow() {
        let transaction = transaction("m/1852'/1815'/0'/2/0");
        let mut shown = 0;
        let result = run(&transaction, &mut |_: &Prompt| {
            shown += 1;
            if shown == 2 {
                Decision::Rejected
            } else {
                Decision::Approved
            }
        });
        pretty_assertions::assert_eq!(result, Err(Cancelled { position: 1 }));
        pretty_assertions::assert_eq!(shown, 2);
    }

    #[test]
    fn amounts_render_in_ada() {
        pretty_assertions::assert_eq!(Ada(3_003_112).to_string(), "3.003112 ADA");
        pretty_assertions::assert_eq!(Ada(42).to_string(), "0.000042 ADA");
    }
}
