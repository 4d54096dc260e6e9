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

use pretty_assertions::assert_eq;
use sigil::{keychain::FileKeychain, terminal::TerminalConfirm};
use sigil_kernel::{Address, Network, ShelleyAddress, verify_ed25519_signature};
use sigil_signer::{Keychain, SigningError, SigningRequest, sign_transaction};
use std::io::Write;

const PAYMENT: &str = "m/1852'/1815'/0'/0/0";

const STAKING: &str = "m/1852'/1815'/0'/2/0";

fn xprv(seed: u8) -> String {
    let mut bytes = [seed; 64];
    bytes[0] &= 0b1111_1000;
    bytes[31] = (bytes[31] & 0b0001_1111) | 0b0100_0000;
    hex::encode(bytes)
}

fn keychain() -> (tempfile::TempDir, FileKeychain) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keys.json");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        r#"{{
            "{PAYMENT}": {{ "xprv": "{}", "chain_code": "{}" }},
            "{STAKING}": {{ "xprv": "{}", "chain_code": "{}" }}
        }}"#,
        xprv(0x21),
        "00".repeat(32),
        xprv(0x42),
        "00".repeat(32),
    )
    .unwrap();
    let keychain = FileKeychain::from_file(&path).unwrap();
    (dir, keychain)
}

fn request() -> SigningRequest {
    serde_json::from_value(serde_json::json!({
        "protocol_magic": 764824073,
        "network_id": 1,
        "inputs": [{
            "path": PAYMENT,
            "prev_hash": "3b40265111d8bb3c3c608d95b3a0bf83461ace32d79336579a1939b3aad1c0b7",
            "prev_index": 0
        }],
        "outputs": [
            {
                "address": "addr1q84sh2j72ux0l03fxndjnhctdg7hcppsaejafsa84vh7lwgmcs5wgus8qt4atk45lvt4xfxpjtwfhdmvchdf2m3u3hlsd5tq5r",
                "amount": "1000000"
            },
            {
                "addressType": 0,
                "path": PAYMENT,
                "stakingPath": STAKING,
                "amount": "7120787"
            }
        ],
        "fee": 170000,
        "ttl": 42,
        "withdrawals": [{ "path": STAKING, "amount": "1000" }]
    }))
    .unwrap()
}

#[test]
fn signs_end_to_end_with_key_files() {
    let (_dir, keychain) = keychain();
    let mut screen = Vec::new();
    let mut confirmer = TerminalConfirm::new(&b"y\ny\ny\n"[..], &mut screen, false);

    let signed = sign_transaction(&request(), &keychain, &mut confirmer).unwrap();

    let witnesses = &signed.transaction.witness_set.vkey_witnesses;
    assert_eq!(witnesses.len(), 2);
    for witness in witnesses {
        assert!(
            verify_ed25519_signature(&witness.vkey, &witness.signature, signed.tx_hash.as_ref())
                .is_ok()
        );
    }

    let payment = keychain.public_key(&PAYMENT.parse().unwrap()).unwrap().key_hash();
    let staking = keychain.public_key(&STAKING.parse().unwrap()).unwrap().key_hash();
    assert_eq!(
        signed.transaction.body.outputs[1].address,
        Address::Shelley(ShelleyAddress::base(
            Network::Mainnet.network_id(),
            &payment,
            &staking
        ))
    );

    drop(confirmer);
    let screen = String::from_utf8(screen).unwrap();
    assert_eq!(screen.matches("[y/N]").count(), 3);
}

#[test]
fn declining_on_the_terminal_cancels() {
    let (_dir, keychain) = keychain();
    let mut confirmer = TerminalConfirm::new(&b"y\nn\n"[..], Vec::new(), false);

    let result = sign_transaction(&request(), &keychain, &mut confirmer);

    assert!(matches!(result, Err(SigningError::UserCancelled(..))));
}
