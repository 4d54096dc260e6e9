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

use sigil_kernel::{Network, NetworkParams};

pub mod transaction;
pub use transaction::{InvalidTransaction, execute as validate_transaction};

/// Resolve the session's network. Any pairing outside of the known table is refused before
/// looking at the rest of the request.
pub fn validate_network(params: &NetworkParams) -> Option<Network> {
    params.network()
}
