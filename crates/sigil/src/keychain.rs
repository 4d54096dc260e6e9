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

//! Extended Ed25519 keys read from a JSON file, indexed by their derivation path.
//!
//! ```json
//! {
//!   "m/1852'/1815'/0'/0/0": { "xprv": "<64 bytes, hex>", "chain_code": "<32 bytes, hex>" }
//! }
//! ```
//!
//! Keys are not derived: every path the emulated device may sign with must be listed.

use pallas_crypto::key::ed25519::SecretKeyExtended;
use serde::Deserialize;
use sigil_kernel::{ChainCode, DerivationPath, ExtendedVerificationKey, Signature, VerificationKey};
use sigil_signer::{HexBytes, Keychain, KeychainError};
use std::{collections::BTreeMap, fmt, fs::File, io, io::BufReader, path::Path};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum KeyFileError {
    #[error("cannot read key file: {0}")]
    Io(#[from] io::Error),

    #[error("malformed key file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid key at {path}: {reason}")]
    InvalidKey {
        path: DerivationPath,
        reason: String,
    },
}

#[derive(Deserialize)]
struct KeyEntry {
    xprv: HexBytes,
    chain_code: HexBytes,
}

struct Key {
    secret: SecretKeyExtended,
    chain_code: ChainCode,
}

pub struct FileKeychain {
    keys: BTreeMap<DerivationPath, Key>,
}

impl fmt::Debug for FileKeychain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileKeychain")
            .field("paths", &self.keys.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FileKeychain {
    pub fn from_file(path: &Path) -> Result<Self, KeyFileError> {
        let keychain = Self::from_reader(BufReader::new(File::open(path)?))?;
        debug!(file = %path.display(), keys = keychain.keys.len(), "keychain.loaded");
        Ok(keychain)
    }

    pub fn from_reader(reader: impl io::Read) -> Result<Self, KeyFileError> {
        let entries: BTreeMap<DerivationPath, KeyEntry> = serde_json::from_reader(reader)?;

        let keys = entries
            .into_iter()
            .map(|(path, entry)| {
                let invalid = |reason: String| KeyFileError::InvalidKey {
                    path: path.clone(),
                    reason,
                };

                let xprv = <[u8; 64]>::try_from(entry.xprv.as_slice()).map_err(|_| {
                    invalid(format!(
                        "expected a 64-byte extended key, got {}",
                        entry.xprv.as_slice().len()
                    ))
                })?;
                let secret = SecretKeyExtended::from_bytes(xprv)
                    .map_err(|e| invalid(format!("not an extended secret key: {e:?}")))?;
                let chain_code = ChainCode::try_from(entry.chain_code.as_slice()).map_err(|_| {
                    invalid(format!(
                        "expected a 32-byte chain code, got {}",
                        entry.chain_code.as_slice().len()
                    ))
                })?;

                Ok((path, Key { secret, chain_code }))
            })
            .collect::<Result<_, KeyFileError>>()?;

        Ok(Self { keys })
    }

    fn key(&self, path: &DerivationPath) -> Result<&Key, KeychainError> {
        self.keys
            .get(path)
            .ok_or_else(|| KeychainError::UnknownPath(path.clone()))
    }
}

impl Keychain for FileKeychain {
    fn public_key(&self, path: &DerivationPath) -> Result<ExtendedVerificationKey, KeychainError> {
        let key = self.key(path)?;
        let public_key = VerificationKey::try_from(key.secret.public_key().as_ref()).map_err(
            |e| KeychainError::Refused {
                path: path.clone(),
                reason: e.to_string(),
            },
        )?;
        Ok(ExtendedVerificationKey::new(public_key, key.chain_code))
    }

    fn sign(&self, path: &DerivationPath, message: &[u8]) -> Result<Signature, KeychainError> {
        let key = self.key(path)?;
        Signature::try_from(key.secret.sign(message).as_ref()).map_err(|e| KeychainError::Refused {
            path: path.clone(),
            reason: e.to_string(),
        })
    }
}
