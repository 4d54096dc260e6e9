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

//! The signing engine of a hardware wallet.
//!
//! A [`SigningRequest`] goes through a fixed pipeline: the network parameters are resolved, every
//! field is validated by the [`rules`], the user walks through the [`confirmation`] prompts, and
//! only then is the body built, hashed and witnessed with keys from the [`Keychain`].

pub mod body;
pub mod change;
pub mod confirmation;
pub mod failure;
pub mod keychain;
pub mod request;
pub mod rules;
pub mod signer;
pub mod transaction;
pub mod witnesses;

pub use confirmation::{Cancelled, Confirm, ConfirmationFlow, Decision, Interaction, Prompt};
pub use failure::{Failure, FailureKind, SigningError};
pub use keychain::{Keychain, KeychainError};
pub use request::{
    CertificateRequest, ChangeOutputRequest, HexBytes, InputRequest, OutputRequest,
    SigningRequest, WithdrawalRequest,
};
pub use signer::{SignedTransaction, sign_transaction};
pub use transaction::{
    ChangeAddress, Output, SpendingInput, StakeAction, StakeCertificate, Staking,
    ValidTransaction, Withdrawal,
};

#[cfg(test)]
mod tests;
