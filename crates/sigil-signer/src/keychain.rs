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

use sigil_kernel::{DerivationPath, ExtendedVerificationKey, Signature};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeychainError {
    #[error("no key can be derived at {0}")]
    UnknownPath(DerivationPath),

    #[error("refused to sign with the key at {path}: {reason}")]
    Refused {
        path: DerivationPath,
        reason: String,
    },
}

/// Access to the device's secret keys.
///
/// Implementations derive keys from their own seed; the engine only ever sees public keys and
/// signatures.
pub trait Keychain {
    /// The extended public key at `path`.
    fn public_key(&self, path: &DerivationPath) -> Result<ExtendedVerificationKey, KeychainError>;

    /// Sign `message` with the secret key at `path`.
    fn sign(&self, path: &DerivationPath, message: &[u8]) -> Result<Signature, KeychainError>;
}

impl<K: Keychain + ?Sized> Keychain for &K {
    fn public_key(&self, path: &DerivationPath) -> Result<ExtendedVerificationKey, KeychainError> {
        (**self).public_key(path)
    }

    fn sign(&self, path: &DerivationPath, message: &[u8]) -> Result<Signature, KeychainError> {
        (**self).sign(path, message)
    }
}
