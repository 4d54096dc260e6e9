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

use std::{fmt, str::FromStr};
use thiserror::Error;

pub const HARDENED: u32 = 0x8000_0000;

pub const PURPOSE_BYRON: u32 = 44 | HARDENED;

pub const PURPOSE_SHELLEY: u32 = 1852 | HARDENED;

pub const COIN_TYPE: u32 = 1815 | HARDENED;

/// Accounts beyond this one are considered unusual and worth pointing out to the user.
pub const MAX_SAFE_ACCOUNT_INDEX: u32 = 100;

/// Address indexes beyond this one are considered unusual and worth pointing out to the user.
pub const MAX_SAFE_ADDRESS_INDEX: u32 = 1_000_000;

/// The chain (fourth) component of a derivation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    External,
    Internal,
    Staking,
}

impl Role {
    pub const EXTERNAL: u32 = 0;
    pub const INTERNAL: u32 = 1;
    pub const STAKING: u32 = 2;

    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            Self::EXTERNAL => Some(Role::External),
            Self::INTERNAL => Some(Role::Internal),
            Self::STAKING => Some(Role::Staking),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidDerivationPath {
    #[error("derivation path must start with 'm'")]
    MissingRoot,
    #[error("malformed derivation path component '{0}'")]
    MalformedComponent(String),
    #[error("derivation path component '{0}' is out of range")]
    ComponentOutOfRange(String),
}

/// A BIP32-style derivation path, with hardened components flagged by their top bit.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DerivationPath(Vec<u32>);

impl DerivationPath {
    pub fn new(components: Vec<u32>) -> Self {
        Self(components)
    }

    pub fn components(&self) -> &[u32] {
        &self.0
    }

    pub fn purpose(&self) -> Option<u32> {
        self.0.first().copied()
    }

    pub fn coin_type(&self) -> Option<u32> {
        self.0.get(1).copied()
    }

    /// Account index, with the hardening bit removed, when the component is hardened.
    pub fn account(&self) -> Option<u32> {
        self.0
            .get(2)
            .filter(|account| **account & HARDENED != 0)
            .map(|account| account & !HARDENED)
    }

    pub fn role(&self) -> Option<Role> {
        self.0.get(3).copied().and_then(Role::from_index)
    }

    pub fn address_index(&self) -> Option<u32> {
        self.0.get(4).copied()
    }

    pub fn is_byron(&self) -> bool {
        self.purpose() == Some(PURPOSE_BYRON)
    }

    pub fn is_shelley(&self) -> bool {
        self.purpose() == Some(PURPOSE_SHELLEY)
    }

    /// Whether the path lies in one of the Cardano key namespaces (Byron or Shelley, coin 1815').
    pub fn is_cardano(&self) -> bool {
        (self.is_byron() || self.is_shelley()) && self.coin_type() == Some(COIN_TYPE)
    }

    /// m/1852'/_/_/2/_: only the purpose and the role are checked.
    pub fn is_staking(&self) -> bool {
        self.0.len() == 5 && self.is_shelley() && self.role() == Some(Role::Staking)
    }

    /// A spending path of an ordinary wallet: external or change chain, within the usual bounds
    /// for accounts and address indexes.
    pub fn is_standard_address(&self) -> bool {
        self.0.len() == 5
            && self.is_cardano()
            && self
                .account()
                .is_some_and(|account| account < MAX_SAFE_ACCOUNT_INDEX)
            && matches!(self.role(), Some(Role::External | Role::Internal))
            && self
                .address_index()
                .is_some_and(|index| index < MAX_SAFE_ADDRESS_INDEX)
    }

    /// Whether both paths belong to the same account of the same wallet scheme.
    pub fn same_account(&self, other: &Self) -> bool {
        self.0.len() >= 3 && other.0.len() >= 3 && self.0[..3] == other.0[..3]
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for component in &self.0 {
            if component & HARDENED != 0 {
                write!(f, "/{}'", component & !HARDENED)?;
            } else {
                write!(f, "/{component}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerivationPath({self})")
    }
}

impl FromStr for DerivationPath {
    type Err = InvalidDerivationPath;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('/');

        if parts.next() != Some("m") {
            return Err(InvalidDerivationPath::MissingRoot);
        }

        parts
            .map(|part| {
                let (digits, hardened) = match part.strip_suffix('\'') {
                    Some(digits) => (digits, true),
                    None => (part, false),
                };

                let index = digits
                    .parse::<u32>()
                    .map_err(|_| InvalidDerivationPath::MalformedComponent(part.to_string()))?;

                if index & HARDENED != 0 {
                    return Err(InvalidDerivationPath::ComponentOutOfRange(part.to_string()));
                }

                Ok(if hardened { index | HARDENED } else { index })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(DerivationPath)
    }
}

impl TryFrom<String> for DerivationPath {
    type Error = InvalidDerivationPath;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<DerivationPath> for String {
    fn from(path: DerivationPath) -> Self {
        path.to_string()
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Any five-component Shelley path for the given role.
    pub fn any_shelley_path(role: u32) -> impl Strategy<Value = DerivationPath> {
        (0..200u32, 0..2_000_000u32).prop_map(move |(account, index)| {
            DerivationPath::new(vec![
                PURPOSE_SHELLEY,
                COIN_TYPE,
                account | HARDENED,
                role,
                index,
            ])
        })
    }

    #[cfg(test)]
    mod internal {
        use super::*;
        use test_case::test_case;

        #[test_case("m/44'/1815'/0'/0/1", &[PURPOSE_BYRON, COIN_TYPE, HARDENED, 0, 1]; "byron")]
        #[test_case("m/1852'/1815'/0'/2/0", &[PURPOSE_SHELLEY, COIN_TYPE, HARDENED, 2, 0]; "staking")]
        #[test_case("m", &[]; "root")]
        fn parse(s: &str, components: &[u32]) {
            let path: DerivationPath = s.parse().unwrap();
            assert_eq!(path.components(), components);
            assert_eq!(path.to_string(), s);
        }

        #[test_case("44'/1815'" => InvalidDerivationPath::MissingRoot; "no root")]
        #[test_case("m/44'/x" => InvalidDerivationPath::MalformedComponent("x".to_string()); "not a number")]
        #[test_case("m/2147483648" => InvalidDerivationPath::ComponentOutOfRange("2147483648".to_string()); "too large")]
        #[test_case("m//1" => InvalidDerivationPath::MalformedComponent(String::new()); "empty component")]
        fn parse_failures(s: &str) -> InvalidDerivationPath {
            s.parse::<DerivationPath>().unwrap_err()
        }

        #[test_case("m/1852'/1815'/0'/2/0" => true; "staking")]
        #[test_case("m/1852'/1815'/0'/0/0" => false; "payment role")]
        #[test_case("m/1852'/1815'/0/2/0" => true; "unhardened account")]
        #[test_case("m/1852'/0'/0'/2/0" => true; "other coin")]
        #[test_case("m/44'/1815'/0'/2/0" => false; "byron purpose")]
        #[test_case("m/1852'/1815'/0'/2" => false; "too short")]
        fn is_staking(s: &str) -> bool {
            s.parse::<DerivationPath>().unwrap().is_staking()
        }

        #[test_case("m/1852'/1815'/0'/0/0" => true; "shelley external")]
        #[test_case("m/44'/1815'/0'/1/5" => true; "byron change")]
        #[test_case("m/1852'/1815'/100'/0/0" => false; "large account")]
        #[test_case("m/1852'/1815'/0'/0/1000000" => false; "large index")]
        #[test_case("m/1852'/1815'/0'/2/0" => false; "staking role")]
        #[test_case("m/1852'/1815'/0'/0/0/1" => false; "too long")]
        #[test_case("m/1852'/0'/0'/0/0" => false; "other coin")]
        fn is_standard_address(s: &str) -> bool {
            s.parse::<DerivationPath>().unwrap().is_standard_address()
        }

        #[test]
        fn same_account() {
            let payment: DerivationPath = "m/1852'/1815'/0'/0/0".parse().unwrap();
            let staking: DerivationPath = "m/1852'/1815'/0'/2/0".parse().unwrap();
            let foreign: DerivationPath = "m/1852'/1815'/1'/2/0".parse().unwrap();
            assert!(payment.same_account(&staking));
            assert!(!payment.same_account(&foreign));
        }

        #[test]
        fn serde_as_string() {
            let path: DerivationPath = serde_json::from_str(r#""m/44'/1815'/0'/0/1""#).unwrap();
            assert!(path.is_byron());
            assert_eq!(
                serde_json::to_string(&path).unwrap(),
                r#""m/44'/1815'/0'/0/1""#
            );
        }

        proptest! {
            #[test]
            fn display_roundtrip(path in any_shelley_path(0)) {
                prop_assert_eq!(path.to_string().parse::<DerivationPath>(), Ok(path));
            }

            #[test]
            fn staking_role_is_recognised(path in any_shelley_path(2)) {
                prop_assert!(path.is_staking());
            }

            #[test]
            fn payment_role_is_never_staking(path in any_shelley_path(0)) {
                prop_assert!(!path.is_staking());
            }
        }
    }
}
