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

pub mod cardano;
pub use cardano::{
    address::{
        Address, AddressError, AddressType, BYRON_KIND_PUBLIC_KEY, ByronAddress, ByronAttributes,
        DelegationPart, ShelleyAddress, StakePointer,
    },
    bootstrap_witness::BootstrapWitness,
    certificate::Certificate,
    derivation_path::{
        COIN_TYPE, DerivationPath, HARDENED, InvalidDerivationPath, MAX_SAFE_ACCOUNT_INDEX,
        MAX_SAFE_ADDRESS_INDEX, PURPOSE_BYRON, PURPOSE_SHELLEY, Role,
    },
    hash::{
        AddressRoot, Hash, Hasher, KeyHash, MetadataHash, PoolId, TransactionId, blake2b_224,
        blake2b_256, decode_hash, encode_hash, parse_hash, sha3_then_blake2b_224, size,
    },
    key::{ChainCode, ExtendedVerificationKey, Signature, VerificationKey},
    lovelace::{Lovelace, MAX_LOVELACE, checked_total, is_within_supply},
    metadata::Metadata,
    network::{Network, NetworkParams, ProtocolMagic},
    reward_account::RewardAccount,
    stake_credential::StakeCredential,
    transaction::Transaction,
    transaction_body::TransactionBody,
    transaction_input::TransactionInput,
    transaction_output::TransactionOutput,
    vkey_witness::{InvalidEd25519Signature, VKeyWitness, verify_ed25519_signature},
    witness_set::WitnessSet,
};
#[cfg(any(test, feature = "test-utils"))]
pub use cardano::{
    address::{any_address, any_byron_address, any_shelley_address, any_stake_pointer},
    bootstrap_witness::any_bootstrap_witness,
    certificate::any_certificate,
    derivation_path::any_shelley_path,
    hash::{any_hash28, any_hash32},
    network::any_network,
    reward_account::any_reward_account,
    stake_credential::any_stake_credential,
    transaction_body::any_transaction_body,
    transaction_input::any_transaction_input,
    transaction_output::any_transaction_output,
    vkey_witness::any_vkey_witness,
    witness_set::any_witness_set,
};

pub mod cbor {
    pub use minicbor::{
        Decode, Decoder, Encode, Encoder, bytes,
        data::{self, Tag, Type},
        decode, encode,
    };
    pub use sigil_minicbor_extra::{
        decode_break, definite_item, expect_end_of_input, from_cbor, from_cbor_no_leftovers,
        heterogeneous_array, heterogeneous_map, homogeneous_array, missing_field, sized_bytes,
        skip_definite, tee, to_cbor, unexpected_field,
    };
}
pub use cbor::{
    from_cbor, from_cbor_no_leftovers, heterogeneous_array, heterogeneous_map, homogeneous_array,
    tee, to_cbor, unexpected_field,
};

pub mod macros;
