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

use crate::{Keychain, KeychainError};
use sigil_kernel::{
    ChainCode, DerivationPath, ExtendedVerificationKey, Signature, VerificationKey, blake2b_256,
};

/// A keychain whose keys are digests of their derivation path. Signatures are not valid
/// Ed25519 signatures but are deterministic in the path and the message.
#[derive(Debug, Default)]
pub(crate) struct FakeKeychain {
    refused: Option<DerivationPath>,
}

impl FakeKeychain {
    /// A keychain that cannot derive the key at `path`.
    pub(crate) fn refusing(path: DerivationPath) -> Self {
        Self {
            refused: Some(path),
        }
    }

    fn check(&self, path: &DerivationPath) -> Result<(), KeychainError> {
        match &self.refused {
            Some(refused) if refused == path => Err(KeychainError::UnknownPath(path.clone())),
            _ => Ok(()),
        }
    }
}

impl Keychain for FakeKeychain {
    fn public_key(&self, path: &DerivationPath) -> Result<ExtendedVerificationKey, KeychainError> {
        self.check(path)?;
        let seed = path.to_string();
        Ok(ExtendedVerificationKey::new(
            VerificationKey::new(*blake2b_256(seed.as_bytes())),
            ChainCode::new(*blake2b_256(format!("{seed}/chain-code").as_bytes())),
        ))
    }

    fn sign(&self, path: &DerivationPath, message: &[u8]) -> Result<Signature, KeychainError> {
        let public_key = self.public_key(path)?.public_key;
        let mut preimage = public_key.as_ref().to_vec();
        preimage.extend_from_slice(message);
        let mut signature = [0; 64];
        signature[..32].copy_from_slice(blake2b_256(&preimage).as_ref());
        signature[32..].copy_from_slice(blake2b_256(message).as_ref());
        Ok(Signature::new(signature))
    }
}
