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
    Keychain, SigningError, SigningRequest, body,
    confirmation::{self, Confirm},
    rules, witnesses,
};
use sigil_kernel::{Transaction, TransactionId, to_cbor};
use tracing::{Level, debug, info, instrument, warn};

/// Outcome of a successful session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub tx_hash: TransactionId,
    /// The `[body, witnesses, metadata]` envelope, ready for submission.
    pub serialized: Vec<u8>,
    pub transaction: Transaction,
}

/// Validate, confirm and sign a transaction.
///
/// The request is fully validated before the first prompt; nothing is derived from the keychain
/// until every prompt has been approved.
#[instrument(
    level = Level::INFO,
    skip_all,
    name = "sign_transaction",
    fields(
        protocol_magic = %request.protocol_magic,
        network_id = request.network_id,
        inputs = request.inputs.len(),
        outputs = request.outputs.len(),
    )
)]
pub fn sign_transaction<K: Keychain, C: Confirm>(
    request: &SigningRequest,
    keychain: &K,
    confirmer: &mut C,
) -> Result<SignedTransaction, SigningError> {
    let result = sign(request, keychain, confirmer);

    match &result {
        Ok(signed) => info!(tx_hash = %signed.tx_hash, size = signed.serialized.len(), "signed"),
        Err(error) => warn!(%error, kind = ?error.kind(), "rejected"),
    }

    result
}

fn sign<K: Keychain, C: Confirm>(
    request: &SigningRequest,
    keychain: &K,
    confirmer: &mut C,
) -> Result<SignedTransaction, SigningError> {
    let params = request.network_params();
    let network = rules::validate_network(&params)
        .ok_or(SigningError::InvalidNetworkCombination(params))?;
    debug!(%network, "network.resolved");

    let transaction = rules::validate_transaction(network, request)?;
    debug!("transaction.validated");

    confirmation::run(&transaction, confirmer)?;
    debug!("transaction.confirmed");

    let body = body::build(&transaction, keychain)?;
    let tx_hash = body.id();
    debug!(%tx_hash, "body.hashed");

    let paths = witnesses::signing_paths(&transaction);
    let witness_set = witnesses::build(&tx_hash, network, &paths, keychain)?;
    debug!(witnesses = witness_set.len(), "witnesses.built");

    let transaction = Transaction::new(body, witness_set, transaction.metadata);

    Ok(SignedTransaction {
        tx_hash,
        serialized: to_cbor(&transaction),
        transaction,
    })
}
