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
use sigil::inspect::inspect;

#[derive(Debug, Parser)]
pub struct Args {
    /// The address, in bech32 (Shelley) or base58 (Byron).
    address: String,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let report = inspect(&args.address)
        .with_context(|| format!("cannot decode address '{}'", args.address))?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
