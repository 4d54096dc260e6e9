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

use crate::{Keychain, KeychainError, ValidTransaction};
use sigil_kernel::{
    BootstrapWitness, ByronAttributes, DerivationPath, Network, TransactionId, VKeyWitness,
    WitnessSet,
};
use tracing::trace;

/// Paths whose signature the transaction needs: every input, then every certificate other than
/// registrations, then every withdrawal. Each path appears once, where it is first needed.
pub fn signing_paths(transaction: &ValidTransaction) -> Vec<DerivationPath> {
    let inputs = transaction.inputs.iter().map(|input| &input.path);

    let certificates = transaction
        .certificates
        .iter()
        .filter(|certificate| certificate.requires_witness())
        .map(|certificate| &certificate.path);

    let withdrawals = transaction
        .withdrawals
        .iter()
        .map(|withdrawal| &withdrawal.path);

    inputs
        .chain(certificates)
        .chain(withdrawals)
        .fold(Vec::new(), |mut paths: Vec<DerivationPath>, path| {
            if !paths.contains(path) {
                paths.push(path.clone());
            }
            paths
        })
}

/// Sign the transaction id with each path. Byron keys produce bootstrap witnesses, which carry
/// what is needed to recompute their address root; all other keys produce plain vkey witnesses.
pub fn build<K: Keychain>(
    id: &TransactionId,
    network: Network,
    paths: &[DerivationPath],
    keychain: &K,
) -> Result<WitnessSet, KeychainError> {
    let mut witness_set = WitnessSet::default();

    for path in paths {
        let xpub = keychain.public_key(path)?;
        let signature = keychain.sign(path, id.as_ref())?;

        if path.is_byron() {
            let attributes = ByronAttributes::new(network.byron_protocol_magic());
            witness_set
                .bootstrap_witnesses
                .push(BootstrapWitness::new(&xpub, signature, &attributes));
        } else {
            witness_set
                .vkey_witnesses
                .push(VKeyWitness::new(xpub.public_key, signature));
        }

        trace!(%path, "witness.signed");
    }

    Ok(witness_set)
}
