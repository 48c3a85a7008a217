use std::{
    fmt,
    str::FromStr
};

use crate::error::Error;

/**
    Converts a 4 byte big endian array to int
*/
pub fn as_u32_be(array: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*array)
}

/// Bitcoin network a key or address belongs to.
///
/// Regtest shares the testnet Base58 and WIF version bytes and only
/// differs in its bech32 human readable part.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Network {
    Bitcoin,
    Testnet,
    Regtest
}

impl Network {
    /// Coin type used as the second hardened level of BIP-44 style paths
    pub fn coin_type(&self) -> u32 {
        match self {
            Network::Bitcoin => 0,
            Network::Testnet | Network::Regtest => 1
        }
    }

    /// Human readable part of segwit addresses
    pub fn hrp(&self) -> &'static str {
        match self {
            Network::Bitcoin => "bc",
            Network::Testnet => "tb",
            Network::Regtest => "bcrt"
        }
    }

    pub fn is_mainnet(&self) -> bool {
        *self == Network::Bitcoin
    }
}

/// Numeric network tag used by the mnemonic entry points.
/// 0 is mainnet and 1 is testnet.
impl TryFrom<u32> for Network {
    type Error = Error;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Network::Bitcoin),
            1 => Ok(Network::Testnet),
            x => Err(Error::UnsupportedNetwork(x))
        }
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bitcoin" | "mainnet" => Ok(Network::Bitcoin),
            "testnet" => Ok(Network::Testnet),
            "regtest" => Ok(Network::Regtest),
            _ => Err(Error::UnknownNetwork(s.to_string()))
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Network::Bitcoin => "mainnet",
            Network::Testnet => "testnet",
            Network::Regtest => "regtest"
        };
        write!(f, "{}", name)
    }
}
