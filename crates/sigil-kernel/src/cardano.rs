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

pub mod address;
pub mod bootstrap_witness;
pub mod certificate;
pub mod derivation_path;
pub mod hash;
pub mod key;
pub mod lovelace;
pub mod metadata;
pub mod network;
pub mod reward_account;
pub mod stake_credential;
pub mod transaction;
pub mod transaction_body;
pub mod transaction_input;
pub mod transaction_output;
pub mod vkey_witness;
pub mod witness_set;
