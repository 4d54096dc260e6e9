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

use crate::{Keychain, KeychainError, Output, StakeAction, ValidTransaction};
use sigil_kernel::{
    Certificate, DerivationPath, KeyHash, RewardAccount, StakeCredential, TransactionBody,
    TransactionOutput,
};
use tracing::trace;

/// Assemble the body of a validated transaction. Change addresses and staking credentials are
/// derived from the keychain; everything else is carried over as validated.
pub fn build<K: Keychain>(
    transaction: &ValidTransaction,
    keychain: &K,
) -> Result<TransactionBody, KeychainError> {
    let staking_key_hash = |path: &DerivationPath| -> Result<KeyHash, KeychainError> {
        Ok(keychain.public_key(path)?.key_hash())
    };

    let outputs = transaction
        .outputs
        .iter()
        .map(|output| match output {
            Output::External { address, amount } => {
                Ok(TransactionOutput::new(address.clone(), *amount))
            }
            Output::Change { address, amount } => Ok(TransactionOutput::new(
                address.derive(transaction.network, keychain)?,
                *amount,
            )),
        })
        .collect::<Result<Vec<_>, KeychainError>>()?;

    let certificates = transaction
        .certificates
        .iter()
        .map(|certificate| {
            let credential = StakeCredential::AddrKeyhash(staking_key_hash(&certificate.path)?);
            Ok(match certificate.action {
                StakeAction::Registration => Certificate::StakeRegistration(credential),
                StakeAction::Deregistration => Certificate::StakeDeregistration(credential),
                StakeAction::Delegation(pool) => Certificate::StakeDelegation(credential, pool),
            })
        })
        .collect::<Result<Vec<_>, KeychainError>>()?;

    let withdrawals = transaction
        .withdrawals
        .iter()
        .map(|withdrawal| {
            let account = RewardAccount::new(
                transaction.network.network_id(),
                &staking_key_hash(&withdrawal.path)?,
            );
            Ok((account, withdrawal.amount))
        })
        .collect::<Result<Vec<_>, KeychainError>>()?;

    let body = TransactionBody {
        inputs: transaction
            .inputs
            .iter()
            .map(|spending| spending.input)
            .collect(),
        outputs,
        fee: transaction.fee,
        ttl: transaction.ttl,
        certificates,
        withdrawals,
        metadata_hash: transaction.metadata.as_ref().map(|metadata| metadata.hash()),
    };

    trace!(
        inputs = body.inputs.len(),
        outputs = body.outputs.len(),
        certificates = body.certificates.len(),
        withdrawals = body.withdrawals.len(),
        "body.built"
    );

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ChangeAddress, SpendingInput, StakeCertificate, Staking, Withdrawal, tests::FakeKeychain,
    };
    use pretty_assertions::assert_eq;
    use sigil_kernel::{
        Address, Metadata, Network, StakePointer, TransactionInput, parse_hash, to_cbor,
    };

    fn path(s: &str) -> DerivationPath {
        s.parse().unwrap()
    }

    fn transaction() -> ValidTransaction {
        ValidTransaction {
            network: Network::Mainnet,
            inputs: vec![SpendingInput {
                input: TransactionInput::new(
                    parse_hash("3b40265111d8bb3c3c608d95b3a0bf83461ace32d79336579a1939b3aad1c0b7")
                        .unwrap(),
                    0,
                ),
                path: path("m/1852'/1815'/0'/0/0"),
            }],
            outputs: vec![],
            fee: 42,
            ttl: 10,
            certificates: vec![],
            withdrawals: vec![],
            metadata: None,
        }
    }

    #[test]
    fn minimal_body_omits_optional_fields() {
        let body = build(&transaction(), &FakeKeychain::default()).unwrap();
        let bytes = to_cbor(&body);
        assert_eq!(bytes[0], 0xa4);
        assert_eq!(body.metadata_hash, None);
    }

    #[test]
    fn staking_credentials_come_from_the_keychain() {
        let keychain = FakeKeychain::default();
        let staking = path("m/1852'/1815'/0'/2/0");
        let key_hash = keychain.public_key(&staking).unwrap().key_hash();

        let mut transaction = transaction();
        transaction.certificates = vec![
            StakeCertificate {
                action: StakeAction::Registration,
                path: staking.clone(),
            },
            StakeCertificate {
                action: StakeAction::Delegation(
                    parse_hash("f61c42cbf7c8c53af3f520508212ad3e72f674f957fe23ff0acb4973").unwrap(),
                ),
                path: staking.clone(),
            },
        ];
        transaction.withdrawals = vec![Withdrawal {
            path: staking,
            amount: 1000,
        }];

        let body = build(&transaction, &keychain).unwrap();

        assert_eq!(
            body.certificates[0],
            Certificate::StakeRegistration(StakeCredential::AddrKeyhash(key_hash))
        );
        assert_eq!(
            body.certificates[1].credential(),
            &StakeCredential::AddrKeyhash(key_hash)
        );
        assert_eq!(body.withdrawals, vec![(RewardAccount::new(1, &key_hash), 1000)]);
    }

    #[test]
    fn change_outputs_are_derived_for_the_session_network() {
        let keychain = FakeKeychain::default();
        let spending = path("m/1852'/1815'/0'/1/0");
        let payment = keychain.public_key(&spending).unwrap().key_hash();

        let mut transaction = transaction();
        transaction.network = Network::Testnet;
        transaction.outputs = vec![
            Output::Change {
                address: ChangeAddress::Base {
                    path: spending.clone(),
                    staking: Staking::KeyHash(payment),
                },
                amount: 1,
            },
            Output::Change {
                address: ChangeAddress::Pointer {
                    path: spending.clone(),
                    pointer: StakePointer::new(1, 2, 3),
                },
                amount: 2,
            },
            Output::Change {
                address: ChangeAddress::Byron {
                    path: path("m/44'/1815'/0'/1/0"),
                },
                amount: 3,
            },
        ];

        let body = build(&transaction, &keychain).unwrap();

        match &body.outputs[0].address {
            Address::Shelley(address) => {
                assert_eq!(address.network_id(), 0);
                assert_eq!(address.payment_part(), Some(payment));
            }
            Address::Byron(..) => panic!("expected a base address"),
        }
        assert_eq!(
            hex::encode(&body.outputs[1].address.as_bytes()[29..]),
            "010203"
        );
        match &body.outputs[2].address {
            Address::Byron(address) => {
                assert_eq!(address.protocol_magic(), Network::Testnet.byron_protocol_magic())
            }
            Address::Shelley(..) => panic!("expected a Byron address"),
        }
    }

    #[test]
    fn metadata_is_committed_to_by_hash() {
        let mut transaction = transaction();
        let metadata = Metadata::new(vec![0xa1, 0x00, 0x00]);
        transaction.metadata = Some(metadata.clone());
        let body = build(&transaction, &FakeKeychain::default()).unwrap();
        assert_eq!(body.metadata_hash, Some(metadata.hash()));
    }

    #[test]
    fn keychain_failures_are_propagated() {
        let staking = path("m/1852'/1815'/0'/2/0");
        let mut transaction = transaction();
        transaction.withdrawals = vec![Withdrawal {
            path: staking.clone(),
            amount: 1,
        }];
        assert_eq!(
            build(&transaction, &FakeKeychain::refusing(staking.clone())),
            Err(KeychainError::UnknownPath(staking))
        );
    }
}
