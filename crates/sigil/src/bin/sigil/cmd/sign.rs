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

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use sigil::{keychain::FileKeychain, terminal::TerminalConfirm};
use sigil_signer::{Failure, SigningRequest, sign_transaction};
use std::{fs, path::PathBuf};
use tracing::info;

#[derive(Debug, Parser)]
pub struct Args {
    /// JSON-formatted signing request.
    #[arg(long, value_name = "FILE", env = "SIGIL_REQUEST_FILE")]
    request: PathBuf,

    /// JSON-formatted file mapping derivation paths to extended secret keys.
    #[arg(long, value_name = "FILE", env = "SIGIL_KEYS_FILE")]
    keys: PathBuf,

    /// Approve every prompt without asking.
    #[arg(long, action, env = "SIGIL_AUTO_CONFIRM")]
    yes: bool,

    /// Where to write the signed transaction; standard output when omitted.
    #[arg(long, value_name = "FILE", env = "SIGIL_OUTPUT_FILE")]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct Signed {
    tx_hash: String,
    serialized: String,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    info!(
        request = %args.request.display(),
        keys = %args.keys.display(),
        "Running command sign",
    );

    let request: SigningRequest = serde_json::from_slice(
        &fs::read(&args.request)
            .with_context(|| format!("cannot read {}", args.request.display()))?,
    )
    .with_context(|| format!("malformed request in {}", args.request.display()))?;

    let keychain = FileKeychain::from_file(&args.keys)?;

    let mut confirmer = TerminalConfirm::stdio(args.yes);

    match sign_transaction(&request, &keychain, &mut confirmer) {
        Ok(signed) => {
            let out = serde_json::to_string_pretty(&Signed {
                tx_hash: signed.tx_hash.to_string(),
                serialized: hex::encode(&signed.serialized),
            })?;
            match args.output {
                Some(path) => fs::write(&path, out)
                    .with_context(|| format!("cannot write {}", path.display()))?,
                None => println!("{out}"),
            }
            Ok(())
        }
        Err(error) => {
            let failure = Failure::from(&error);
            println!("{}", serde_json::to_string_pretty(&failure)?);
            Err(anyhow::Error::new(error).context(failure.message))
        }
    }
}
