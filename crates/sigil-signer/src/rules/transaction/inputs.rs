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

use crate::{InputRequest, SpendingInput};
use sigil_kernel::{DerivationPath, Hash, TransactionInput, size};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidInputs {
    #[error("input at position {position} is spent from {path}, outside of the Cardano key namespaces")]
    ForeignPath {
        position: usize,
        path: DerivationPath,
    },

    #[error("input at position {position} refers to a transaction id of {length} bytes")]
    MalformedTransactionId { position: usize, length: usize },
}

pub(crate) fn execute(inputs: &[InputRequest]) -> Result<Vec<SpendingInput>, InvalidInputs> {
    inputs
        .iter()
        .enumerate()
        .map(|(position, input)| {
            if !is_key_path(&input.path) {
                return Err(InvalidInputs::ForeignPath {
                    position,
                    path: input.path.clone(),
                });
            }

            let transaction_id =
                <[u8; size::TRANSACTION_BODY]>::try_from(input.prev_hash.as_slice())
                    .map(Hash::new)
                    .map_err(|_| InvalidInputs::MalformedTransactionId {
                        position,
                        length: input.prev_hash.as_slice().len(),
                    })?;

            Ok(SpendingInput {
                input: TransactionInput::new(transaction_id, input.prev_index),
                path: input.path.clone(),
            })
        })
        .collect()
}

/// A path down to an address key, under one of the Cardano purposes.
pub(crate) fn is_key_path(path: &DerivationPath) -> bool {
    path.components().len() == 5 && path.is_cardano()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn input(path: &str, prev_hash: &str) -> InputRequest {
        serde_json::from_value(json!({
            "path": path,
            "prev_hash": prev_hash,
            "prev_index": 0,
        }))
        .unwrap()
    }

    const PREV_HASH: &str = "3b40265111d8bb3c3c608d95b3a0bf83461ace32d79336579a1939b3aad1c0b7";

    #[test_case("m/1852'/1815'/0'/0/0"; "shelley")]
    #[test_case("m/44'/1815'/0'/0/1"; "byron")]
    #[test_case("m/1852'/1815'/101'/0/0"; "non-standard account")]
    fn accepted_paths(path: &str) {
        let inputs = execute(&[input(path, PREV_HASH)]).unwrap();
        assert_eq!(inputs[0].input.to_string(), format!("{PREV_HASH}#0"));
        assert_eq!(inputs[0].path.to_string(), path);
    }

    #[test_case("m/44'/0'/0'/0/0"; "bitcoin")]
    #[test_case("m/1852'/1815'"; "truncated")]
    #[test_case("m"; "root")]
    fn foreign_paths(path: &str) {
        assert!(matches!(
            execute(&[input(path, PREV_HASH)]),
            Err(InvalidInputs::ForeignPath { position: 0, .. })
        ));
    }

    #[test]
    fn short_transaction_id() {
        assert_eq!(
            execute(&[
                input("m/1852'/1815'/0'/0/0", PREV_HASH),
                input("m/1852'/1815'/0'/0/0", "3b40"),
            ]),
            Err(InvalidInputs::MalformedTransactionId {
                position: 1,
                length: 2
            })
        );
    }

    #[test]
    fn duplicates_and_order_are_kept() {
        let request = [
            input("m/1852'/1815'/0'/0/1", PREV_HASH),
            input("m/1852'/1815'/0'/0/0", PREV_HASH),
            input("m/1852'/1815'/0'/0/1", PREV_HASH),
        ];
        let paths: Vec<String> = execute(&request)
            .unwrap()
            .into_iter()
            .map(|input| input.path.to_string())
            .collect();
        assert_eq!(
            paths,
            vec![
                "m/1852'/1815'/0'/0/1",
                "m/1852'/1815'/0'/0/0",
                "m/1852'/1815'/0'/0/1"
            ]
        );
    }
}
