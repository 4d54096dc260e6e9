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

use clap::{Parser, Subcommand};
use sigil::observability::{Color, setup_observability};
use tracing::debug;

mod cmd;

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign a transaction described by a JSON request file.
    ///
    /// The request is validated, every confirmation prompt is shown on the terminal, and the
    /// signed transaction is printed as JSON:
    ///
    ///   { "tx_hash": "<hex>", "serialized": "<hex>" }
    ///
    /// On failure, the structured failure is printed instead and the command exits with an error.
    #[clap(verbatim_doc_comment)]
    Sign(cmd::sign::Args),

    /// Decode an address and describe its type, network and credentials.
    InspectAddress(cmd::inspect_address::Args),
}

#[derive(Debug, Parser)]
#[clap(name = "Sigil")]
#[clap(bin_name = "sigil")]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[clap(long, action, env("SIGIL_WITH_JSON_TRACES"))]
    with_json_traces: bool,

    #[clap(long, action, env("SIGIL_COLOR"))]
    color: Option<Color>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    setup_observability(args.with_json_traces, Color::is_enabled(args.color));

    debug!(
        with_json_traces = args.with_json_traces,
        "Started with global arguments"
    );

    match args.command {
        Command::Sign(args) => cmd::sign::run(args),
        Command::InspectAddress(args) => cmd::inspect_address::run(args),
    }
}
