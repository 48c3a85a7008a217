/*
    The address schemes a wallet can derive, with their
    BIP-44 style purpose and extended key version prefixes.
*/

use std::{
    fmt,
    str::FromStr
};

use crate::{
    encoding::{
        ToVersionPrefix,
        version_prefix::VersionPrefix
    },
    error::Error,
    util::Network
};

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalletType {
    /// Legacy pay to public key hash (BIP-44)
    P2PKH,
    /// P2WPKH nested in P2SH (BIP-49)
    P2SH_P2WPKH,
    /// Native segwit v0 key hash (BIP-84)
    P2WPKH,
    /// Native segwit v0 multisig script (BIP-48)
    P2WSH,
    /// Taproot key path (BIP-86)
    P2TR
}

impl WalletType {
    pub fn purpose(&self) -> u32 {
        match self {
            WalletType::P2PKH => 44,
            WalletType::P2SH_P2WPKH => 49,
            WalletType::P2WPKH => 84,
            WalletType::P2WSH => 48,
            WalletType::P2TR => 86
        }
    }

    /// BIP-48 script type level, hardened, placed after the account
    pub fn script_type(&self) -> Option<u32> {
        match self {
            WalletType::P2WSH => Some(2),
            _ => None
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            WalletType::P2PKH => "p2pkh",
            WalletType::P2SH_P2WPKH => "p2sh-p2wpkh",
            WalletType::P2WPKH => "p2wpkh",
            WalletType::P2WSH => "p2wsh",
            WalletType::P2TR => "p2tr"
        }
    }
}

impl FromStr for WalletType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "p2pkh" => Ok(WalletType::P2PKH),
            "p2sh" | "p2sh-p2wpkh" => Ok(WalletType::P2SH_P2WPKH),
            "p2wpkh" => Ok(WalletType::P2WPKH),
            "p2wsh" => Ok(WalletType::P2WSH),
            "p2tr" => Ok(WalletType::P2TR),
            _ => Err(Error::UnsupportedScheme(s.to_string()))
        }
    }
}

impl fmt::Display for WalletType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl ToVersionPrefix for WalletType {
    fn public_version_prefix(&self, network: Network) -> VersionPrefix {
        match (self, network.is_mainnet()) {
            (WalletType::P2PKH | WalletType::P2TR, true) => VersionPrefix::Xpub,
            (WalletType::P2PKH | WalletType::P2TR, false) => VersionPrefix::Tpub,
            (WalletType::P2SH_P2WPKH, true) => VersionPrefix::Ypub,
            (WalletType::P2SH_P2WPKH, false) => VersionPrefix::Upub,
            (WalletType::P2WPKH, true) => VersionPrefix::Zpub,
            (WalletType::P2WPKH, false) => VersionPrefix::Vpub,
            (WalletType::P2WSH, true) => VersionPrefix::SLIP132Zpub,
            (WalletType::P2WSH, false) => VersionPrefix::SLIP132Vpub
        }
    }

    fn private_version_prefix(&self, network: Network) -> VersionPrefix {
        match (self, network.is_mainnet()) {
            (WalletType::P2PKH | WalletType::P2TR, true) => VersionPrefix::Xprv,
            (WalletType::P2PKH | WalletType::P2TR, false) => VersionPrefix::Tprv,
            (WalletType::P2SH_P2WPKH, true) => VersionPrefix::Yprv,
            (WalletType::P2SH_P2WPKH, false) => VersionPrefix::Uprv,
            (WalletType::P2WPKH, true) => VersionPrefix::Zprv,
            (WalletType::P2WPKH, false) => VersionPrefix::Vprv,
            (WalletType::P2WSH, true) => VersionPrefix::SLIP132Zprv,
            (WalletType::P2WSH, false) => VersionPrefix::SLIP132Vprv
        }
    }
}
