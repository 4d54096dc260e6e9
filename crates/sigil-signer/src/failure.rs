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

use crate::{
    KeychainError,
    confirmation::Cancelled,
    rules::{InvalidTransaction, transaction::InvalidOutputs},
};
use sigil_kernel::NetworkParams;
use std::fmt;
use thiserror::Error;

/// Everything that can end a signing session without a signed transaction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SigningError {
    #[error("protocol magic {} and network id {} do not designate a known network", .0.protocol_magic, .0.network_id)]
    InvalidNetworkCombination(NetworkParams),

    #[error("invalid transaction: {0}")]
    Invalid(#[from] InvalidTransaction),

    #[error("keychain failure: {0}")]
    Keychain(#[from] KeychainError),

    #[error("signing was cancelled: {0}")]
    UserCancelled(#[from] Cancelled),
}

/// The flat taxonomy reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InvalidNetworkCombination,
    InvalidAddress,
    NetworkMismatch,
    FeeOutOfRange,
    TotalAmountOutOfRange,
    InvalidInput,
    InvalidCertificate,
    InvalidWithdrawal,
    InvalidMetadata,
    KeyDerivation,
    UserCancelled,
}

impl FailureKind {
    /// The message shown by the device for this kind of failure.
    pub fn message(self) -> &'static str {
        match self {
            FailureKind::InvalidNetworkCombination => {
                "Invalid network id/protocol magic combination!"
            }
            FailureKind::InvalidAddress => "Invalid address",
            FailureKind::NetworkMismatch => "Output address network mismatch!",
            FailureKind::FeeOutOfRange => "Fee is out of range!",
            FailureKind::TotalAmountOutOfRange => "Total transaction amount is out of range!",
            FailureKind::InvalidInput => "Invalid input",
            FailureKind::InvalidCertificate => "Invalid certificate",
            FailureKind::InvalidWithdrawal => "Invalid withdrawal",
            FailureKind::InvalidMetadata => "Invalid metadata",
            FailureKind::KeyDerivation => "Key derivation failed",
            FailureKind::UserCancelled => "Cancelled by user",
        }
    }
}

impl SigningError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SigningError::InvalidNetworkCombination(..) => FailureKind::InvalidNetworkCombination,
            SigningError::Invalid(invalid) => match invalid {
                InvalidTransaction::Inputs(..) => FailureKind::InvalidInput,
                InvalidTransaction::Outputs(outputs) => match outputs {
                    InvalidOutputs::ProtocolMagicMismatch { .. } => FailureKind::NetworkMismatch,
                    InvalidOutputs::TotalOutOfRange => FailureKind::TotalAmountOutOfRange,
                    InvalidOutputs::MalformedAddress { .. }
                    | InvalidOutputs::RewardAddress { .. }
                    | InvalidOutputs::NetworkIdMismatch { .. }
                    | InvalidOutputs::InvalidChange { .. } => FailureKind::InvalidAddress,
                },
                InvalidTransaction::Fee(..) => FailureKind::FeeOutOfRange,
                InvalidTransaction::Certificates(..) => FailureKind::InvalidCertificate,
                InvalidTransaction::Withdrawals(..) => FailureKind::InvalidWithdrawal,
                InvalidTransaction::Metadata(..) => FailureKind::InvalidMetadata,
            },
            SigningError::Keychain(..) => FailureKind::KeyDerivation,
            SigningError::UserCancelled(..) => FailureKind::UserCancelled,
        }
    }
}

/// The structured failure returned to the host in place of a signed transaction.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: &'static str,
}

impl From<&SigningError> for Failure {
    fn from(error: &SigningError) -> Self {
        let kind = error.kind();
        Failure {
            kind,
            message: kind.message(),
        }
    }
}

impl From<SigningError> for Failure {
    fn from(error: SigningError) -> Self {
        Failure::from(&error)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::transaction::{InvalidFee, InvalidMetadata};
    use sigil_kernel::{DerivationPath, ProtocolMagic};
    use test_case::test_case;

    fn invalid(error: impl Into<InvalidTransaction>) -> SigningError {
        SigningError::Invalid(error.into())
    }

    #[test_case(
        SigningError::InvalidNetworkCombination(NetworkParams {
            protocol_magic: ProtocolMagic::TESTNET,
            network_id: 1,
        })
        => "Invalid network id/protocol magic combination!"; "network combination"
    )]
    #[test_case(
        invalid(InvalidOutputs::ProtocolMagicMismatch {
            position: 0,
            expected: ProtocolMagic::MAINNET,
            found: ProtocolMagic::TESTNET,
        })
        => "Output address network mismatch!"; "byron magic"
    )]
    #[test_case(
        invalid(InvalidOutputs::NetworkIdMismatch { position: 0, expected: 1, found: 0 })
        => "Invalid address"; "shelley network id"
    )]
    #[test_case(
        invalid(InvalidOutputs::TotalOutOfRange) => "Total transaction amount is out of range!"; "total"
    )]
    #[test_case(
        invalid(InvalidFee::OutOfRange(45_000_000_000_000_001)) => "Fee is out of range!"; "fee"
    )]
    #[test_case(
        invalid(InvalidMetadata::TooLarge { size: 501 }) => "Invalid metadata"; "metadata"
    )]
    #[test_case(
        SigningError::UserCancelled(Cancelled { position: 3 }) => "Cancelled by user"; "cancelled"
    )]
    #[test_case(
        KeychainError::UnknownPath(DerivationPath::new(vec![])).into() => "Key derivation failed"; "keychain"
    )]
    fn failure_message(error: SigningError) -> &'static str {
        Failure::from(error).message
    }

    #[test]
    fn failure_serialises_with_snake_case_kind() {
        let failure = Failure::from(SigningError::InvalidNetworkCombination(NetworkParams {
            protocol_magic: ProtocolMagic::MAINNET,
            network_id: 0,
        }));
        assert_eq!(
            serde_json::to_string(&failure).unwrap(),
            r#"{"kind":"invalid_network_combination","message":"Invalid network id/protocol magic combination!"}"#
        );
    }
}
