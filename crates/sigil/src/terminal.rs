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

use sigil_signer::{Confirm, Decision, Interaction, Prompt};
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

/// Shows prompts on a terminal and reads the user's answer from it.
///
/// Only an explicit `y` or `yes` approves a prompt; anything else, including end of input or an
/// IO error, rejects it.
pub struct TerminalConfirm<R, W> {
    input: R,
    output: W,
    auto_approve: bool,
}

impl TerminalConfirm<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio(auto_approve: bool) -> Self {
        Self::new(io::stdin().lock(), io::stderr(), auto_approve)
    }
}

impl<R: BufRead, W: Write> TerminalConfirm<R, W> {
    pub fn new(input: R, output: W, auto_approve: bool) -> Self {
        Self {
            input,
            output,
            auto_approve,
        }
    }

    fn ask(&mut self, prompt: &Prompt) -> io::Result<Decision> {
        let pages = prompt
            .interactions()
            .iter()
            .filter(|interaction| matches!(interaction, Interaction::Swipe))
            .count()
            + 1;

        if self.auto_approve {
            writeln!(self.output, "{prompt} [auto-approved]")?;
            return Ok(Decision::Approved);
        }

        write!(self.output, "{prompt} ({pages} page(s)) [y/N] ")?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;

        Ok(match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => Decision::Approved,
            _ => Decision::Rejected,
        })
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalConfirm<R, W> {
    fn confirm(&mut self, prompt: &Prompt) -> Decision {
        match self.ask(prompt) {
            Ok(decision) => {
                debug!(?decision, "prompt.answered");
                decision
            }
            Err(error) => {
                warn!(%error, "prompt.unanswered");
                Decision::Rejected
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigil_kernel::Network;
    use test_case::test_case;

    fn summary() -> Prompt {
        Prompt::Summary {
            amount: 1_500_000,
            fee: 170_000,
            ttl: 10,
            network: Network::Mainnet,
        }
    }

    #[test_case("y\n" => Decision::Approved; "y")]
    #[test_case("YES\n" => Decision::Approved; "yes in capitals")]
    #[test_case("n\n" => Decision::Rejected; "n")]
    #[test_case("\n" => Decision::Rejected; "empty answer")]
    #[test_case("" => Decision::Rejected; "end of input")]
    fn answers(input: &str) -> Decision {
        TerminalConfirm::new(input.as_bytes(), Vec::new(), false).confirm(&summary())
    }

    #[test]
    fn prompt_is_written() {
        let mut output = Vec::new();
        TerminalConfirm::new(&b"y\n"[..], &mut output, false).confirm(&summary());
        pretty_assertions::assert_eq!(
            String::from_utf8(output).unwrap(),
            "Total amount 1.500000 ADA, fee 0.170000 ADA, valid until slot 10 on mainnet (2 page(s)) [y/N] "
        );
    }

    #[test]
    fn auto_approval_reads_nothing() {
        let mut output = Vec::new();
        let decision = TerminalConfirm::new(&b""[..], &mut output, true).confirm(&summary());
        pretty_assertions::assert_eq!(decision, Decision::Approved);
        assert!(String::from_utf8(output).unwrap().ends_with("[auto-approved]\n"));
    }
}
