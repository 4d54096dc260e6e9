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

use std::fmt;

// -----------------------------------------------------------------------------
// ProtocolMagic
// -----------------------------------------------------------------------------

/// Byron-era network discriminant, also embedded in Byron testnet addresses.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
#[serde(transparent)]
pub struct ProtocolMagic(u32);

impl ProtocolMagic {
    pub const MAINNET: Self = Self(764824073);
    pub const TESTNET: Self = Self(42);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl From<u32> for ProtocolMagic {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<ProtocolMagic> for u32 {
    fn from(value: ProtocolMagic) -> Self {
        value.0
    }
}

impl fmt::Display for ProtocolMagic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// -----------------------------------------------------------------------------
// Network
// -----------------------------------------------------------------------------

/// The networks a signing session may target. Each one pairs a protocol magic with a
/// Shelley network id; no other pairing is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub const MAINNET_ID: u8 = 1;
    pub const TESTNET_ID: u8 = 0;

    /// Resolve a (protocol magic, network id) pair, if it is one of the known combinations.
    pub fn from_params(protocol_magic: ProtocolMagic, network_id: u8) -> Option<Self> {
        match (protocol_magic, network_id) {
            (ProtocolMagic::MAINNET, Self::MAINNET_ID) => Some(Network::Mainnet),
            (ProtocolMagic::TESTNET, Self::TESTNET_ID) => Some(Network::Testnet),
            _ => None,
        }
    }

    pub fn from_network_id(network_id: u8) -> Option<Self> {
        match network_id {
            Self::MAINNET_ID => Some(Network::Mainnet),
            Self::TESTNET_ID => Some(Network::Testnet),
            _ => None,
        }
    }

    pub fn protocol_magic(self) -> ProtocolMagic {
        match self {
            Network::Mainnet => ProtocolMagic::MAINNET,
            Network::Testnet => ProtocolMagic::TESTNET,
        }
    }

    pub fn network_id(self) -> u8 {
        match self {
            Network::Mainnet => Self::MAINNET_ID,
            Network::Testnet => Self::TESTNET_ID,
        }
    }

    /// Human-readable prefix of bech32 payment addresses.
    pub fn address_hrp(self) -> &'static str {
        match self {
            Network::Mainnet => "addr",
            Network::Testnet => "addr_test",
        }
    }

    /// Human-readable prefix of bech32 reward addresses.
    pub fn stake_hrp(self) -> &'static str {
        match self {
            Network::Mainnet => "stake",
            Network::Testnet => "stake_test",
        }
    }

    /// The protocol magic Byron addresses embed in their attributes; mainnet addresses carry none.
    pub fn byron_protocol_magic(self) -> Option<ProtocolMagic> {
        match self {
            Network::Mainnet => None,
            Network::Testnet => Some(ProtocolMagic::TESTNET),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => write!(f, "mainnet"),
            Self::Testnet => write!(f, "testnet"),
        }
    }
}

impl std::str::FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            _ => Err(format!("Invalid network name {s}")),
        }
    }
}

// -----------------------------------------------------------------------------
// NetworkParams
// -----------------------------------------------------------------------------

/// Network parameters as supplied by the host, prior to any validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NetworkParams {
    pub protocol_magic: ProtocolMagic,
    pub network_id: u8,
}

impl NetworkParams {
    pub fn network(&self) -> Option<Network> {
        Network::from_params(self.protocol_magic, self.network_id)
    }
}

impl From<Network> for NetworkParams {
    fn from(network: Network) -> Self {
        Self {
            protocol_magic: network.protocol_magic(),
            network_id: network.network_id(),
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    pub fn any_network() -> impl Strategy<Value = Network> {
        prop_oneof![Just(Network::Mainnet), Just(Network::Testnet)]
    }

}
