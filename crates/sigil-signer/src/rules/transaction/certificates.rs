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

use crate::{CertificateRequest, StakeAction, StakeCertificate};
use sigil_kernel::{Certificate, DerivationPath, Hash, size};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidCertificates {
    #[error("unknown certificate type {certificate_type} at position {position}")]
    UnknownType { position: usize, certificate_type: u8 },

    #[error("certificate at position {position} is signed by {path}, which is not a staking key")]
    NotAStakingPath {
        position: usize,
        path: DerivationPath,
    },

    #[error("delegation at position {position} names no pool")]
    MissingPool { position: usize },

    #[error("certificate at position {position} names a pool but is not a delegation")]
    UnexpectedPool { position: usize },

    #[error("delegation at position {position} names a pool id of {length} bytes")]
    MalformedPool { position: usize, length: usize },
}

pub(crate) fn execute(
    certificates: &[CertificateRequest],
) -> Result<Vec<StakeCertificate>, InvalidCertificates> {
    certificates
        .iter()
        .enumerate()
        .map(|(position, certificate)| {
            if !certificate.path.is_staking() {
                return Err(InvalidCertificates::NotAStakingPath {
                    position,
                    path: certificate.path.clone(),
                });
            }

            let action = match (certificate.certificate_type, &certificate.pool) {
                (Certificate::STAKE_REGISTRATION, None) => StakeAction::Registration,
                (Certificate::STAKE_DEREGISTRATION, None) => StakeAction::Deregistration,
                (Certificate::STAKE_REGISTRATION | Certificate::STAKE_DEREGISTRATION, Some(_)) => {
                    return Err(InvalidCertificates::UnexpectedPool { position });
                }
                (Certificate::STAKE_DELEGATION, Some(pool)) => {
                    let pool = <[u8; size::POOL_COLD_KEY]>::try_from(pool.as_slice())
                        .map(Hash::new)
                        .map_err(|_| InvalidCertificates::MalformedPool {
                            position,
                            length: pool.as_slice().len(),
                        })?;
                    StakeAction::Delegation(pool)
                }
                (Certificate::STAKE_DELEGATION, None) => {
                    return Err(InvalidCertificates::MissingPool { position });
                }
                (certificate_type, _) => {
                    return Err(InvalidCertificates::UnknownType {
                        position,
                        certificate_type,
                    });
                }
            };

            Ok(StakeCertificate {
                action,
                path: certificate.path.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{Value, json};
    use sigil_kernel::{COIN_TYPE, PURPOSE_SHELLEY};
    use test_case::test_case;

    const POOL: &str = "f61c42cbf7c8c53af3f520508212ad3e72f674f957fe23ff0acb4973";

    fn certificates(value: Value) -> Vec<CertificateRequest> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn accepted_certificates() {
        let validated = execute(&certificates(json!([
            { "type": 0, "path": "m/1852'/1815'/0'/2/0" },
            { "type": 1, "path": "m/1852'/1815'/0'/2/0" },
            { "type": 2, "path": "m/1852'/1815'/0'/2/0", "pool": POOL },
        ])))
        .unwrap();

        assert_eq!(validated[0].action, StakeAction::Registration);
        assert!(!validated[0].requires_witness());
        assert_eq!(validated[1].action, StakeAction::Deregistration);
        assert!(validated[1].requires_witness());
        assert_eq!(
            validated[2].action,
            StakeAction::Delegation(POOL.parse().unwrap())
        );
        assert!(validated[2].requires_witness());
    }

    #[test_case(json!({ "type": 0, "path": "m/1852'/1815'/0'/0/0" }) => matches InvalidCertificates::NotAStakingPath { .. }; "payment path")]
    #[test_case(json!({ "type": 0, "path": "m/44'/1815'/0'/2/0" }) => matches InvalidCertificates::NotAStakingPath { .. }; "byron path")]
    #[test_case(json!({ "type": 2, "path": "m/1852'/1815'/0'/2/0", "pool": "f61c42cbf7c8c53af3f520508212ad3e72" }) => InvalidCertificates::MalformedPool { position: 0, length: 17 }; "short pool id")]
    #[test_case(json!({ "type": 2, "path": "m/1852'/1815'/0'/2/0" }) => InvalidCertificates::MissingPool { position: 0 }; "delegation without pool")]
    #[test_case(json!({ "type": 1, "path": "m/1852'/1815'/0'/2/0", "pool": POOL }) => InvalidCertificates::UnexpectedPool { position: 0 }; "deregistration with pool")]
    #[test_case(json!({ "type": 3, "path": "m/1852'/1815'/0'/2/0" }) => InvalidCertificates::UnknownType { position: 0, certificate_type: 3 }; "pool registration")]
    fn rejected_certificates(certificate: Value) -> InvalidCertificates {
        match execute(&certificates(json!([certificate]))) {
            Err(e) => e,
            Ok(validated) => panic!("unexpectedly accepted: {validated:?}"),
        }
    }

    proptest! {
        #[test]
        fn only_the_staking_role_is_accepted(
            account in any::<u32>(),
            role in 0..3u32,
            index in 0..10u32,
        ) {
            let path = DerivationPath::new(vec![
                PURPOSE_SHELLEY,
                COIN_TYPE,
                account,
                role,
                index,
            ]);
            let request = CertificateRequest {
                certificate_type: Certificate::STAKE_REGISTRATION,
                path,
                pool: None,
            };
            prop_assert_eq!(execute(&[request]).is_ok(), role == 2);
        }
    }
}
