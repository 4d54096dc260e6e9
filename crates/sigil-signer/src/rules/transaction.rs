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

use crate::{SigningRequest, ValidTransaction};
use sigil_kernel::Network;
use thiserror::Error;
use tracing::{Level, instrument};

pub mod certificates;
pub use certificates::InvalidCertificates;

pub mod fees;
pub use fees::InvalidFee;

pub mod inputs;
pub use inputs::InvalidInputs;

pub mod metadata;
pub use metadata::{InvalidMetadata, MAX_METADATA_SIZE};

pub mod outputs;
pub use outputs::{InvalidChange, InvalidOutputs};

pub mod withdrawals;
pub use withdrawals::InvalidWithdrawals;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidTransaction {
    #[error("invalid inputs: {0}")]
    Inputs(#[from] InvalidInputs),

    #[error("invalid outputs: {0}")]
    Outputs(#[from] InvalidOutputs),

    #[error("invalid fee: {0}")]
    Fee(#[from] InvalidFee),

    #[error("invalid certificates: {0}")]
    Certificates(#[from] InvalidCertificates),

    #[error("invalid withdrawals: {0}")]
    Withdrawals(#[from] InvalidWithdrawals),

    #[error("invalid transaction metadata: {0}")]
    Metadata(#[from] InvalidMetadata),
}

/// Validate every field of a request against the session's network. All rules run before any
/// confirmation is asked for.
#[instrument(
    level = Level::TRACE,
    skip_all,
    name = "rules.transaction",
    fields(
        inputs = request.inputs.len(),
        outputs = request.outputs.len(),
        certificates = request.certificates.len(),
        withdrawals = request.withdrawals.len(),
    )
)]
pub fn execute(
    network: Network,
    request: &SigningRequest,
) -> Result<ValidTransaction, InvalidTransaction> {
    let inputs = inputs::execute(&request.inputs)?;

    let outputs = outputs::execute(network, &request.outputs)?;

    fees::execute(request.fee)?;

    let certificates = certificates::execute(&request.certificates)?;

    let withdrawals = withdrawals::execute(&request.withdrawals)?;

    let metadata = metadata::execute(request.metadata.as_slice())?;

    Ok(ValidTransaction {
        network,
        inputs,
        outputs,
        fee: request.fee,
        ttl: request.ttl,
        certificates,
        withdrawals,
        metadata,
    })
}
