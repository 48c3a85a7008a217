use crate::{
    util::Network
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionPrefix {
    //One byte version prefixes
        BTCAddress = 0x00,
        BTCTestNetAddress = 0x6F,
        P2ScriptAddress = 0x05,
        TestnetP2SHAddress = 0xC4,
        PrivateKeyWIF = 0x80,
        TestNetPrivateKeyWIF = 0xef,

    //Four byte version prefixes
        //BIP-32
        Xprv = 0x0488ADE4, //Legacy P2PKH
        Xpub = 0x0488B21E,
        Tprv = 0x04358394,
        Tpub = 0x043587CF,
        //BIP-49
        Yprv = 0x049d7878, //P2SH nested P2WPKH
        Ypub = 0x049d7cb2,
        Uprv = 0x044a4e28,
        Upub = 0x044a5262,
        //BIP-84
        Zprv = 0x04b2430c, //P2WPKH
        Zpub = 0x04b24746,
        Vprv = 0x045f18bc,
        Vpub = 0x045f1cf6,

        //SLIP-0132
        SLIP132Ypub = 0x0295b43f, //Multi-signature P2WSH in P2SH
        SLIP132Yprv = 0x0295b005,
        SLIP132Zpub = 0x02aa7ed3, //Multi-signature P2WSH
        SLIP132Zprv = 0x02aa7a99,
        SLIP132Upub = 0x024289ef, //Multi-signature P2WSH in P2SH Testnet
        SLIP132Uprv = 0x024285b5,
        SLIP132Vpub = 0x02575483, //Multi-signature P2WSH Testnet
        SLIP132Vprv = 0x02575048,
}

impl VersionPrefix {
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            //Special cases where version bytes is not 4 bytes long
            VersionPrefix::BTCAddress => vec![0x00],
            VersionPrefix::BTCTestNetAddress => vec![0x6F],
            VersionPrefix::P2ScriptAddress => vec![0x05],
            VersionPrefix::TestnetP2SHAddress => vec![0xC4],
            VersionPrefix::PrivateKeyWIF => vec![0x80],
            VersionPrefix::TestNetPrivateKeyWIF => vec![0xef],

            //Cases where version bytes is 4 bytes long
            _ => (*self as u32).to_be_bytes().to_vec()
        }
    }

    pub fn from_int(int: u32) -> Option<Self> {
        Some(match int {
            0x00 => Self::BTCAddress,
            0x6F => Self::BTCTestNetAddress,
            0x05 => Self::P2ScriptAddress,
            0xC4 => Self::TestnetP2SHAddress,
            0x80 => Self::PrivateKeyWIF,
            0xEF => Self::TestNetPrivateKeyWIF,
            0x0488ADE4 => Self::Xprv,
            0x0488B21E => Self::Xpub,
            0x04358394 => Self::Tprv,
            0x043587cf => Self::Tpub,
            0x049d7878 => Self::Yprv,
            0x049d7cb2 => Self::Ypub,
            0x044a4e28 => Self::Uprv,
            0x044a5262 => Self::Upub,
            0x04b2430c => Self::Zprv,
            0x04b24746 => Self::Zpub,
            0x045f18bc => Self::Vprv,
            0x045f1cf6 => Self::Vpub,
            0x0295b43f => Self::SLIP132Ypub,
            0x0295b005 => Self::SLIP132Yprv,
            0x02aa7ed3 => Self::SLIP132Zpub,
            0x02aa7a99 => Self::SLIP132Zprv,
            0x024289ef => Self::SLIP132Upub,
            0x024285b5 => Self::SLIP132Uprv,
            0x02575483 => Self::SLIP132Vpub,
            0x02575048 => Self::SLIP132Vprv,

            _ => return None
        })
    }

    /// True for the version bytes of serialized extended public keys
    pub fn is_extended_public(&self) -> bool {
        matches!(self,
            Self::Xpub | Self::Tpub |
            Self::Ypub | Self::Upub |
            Self::Zpub | Self::Vpub |
            Self::SLIP132Ypub | Self::SLIP132Zpub |
            Self::SLIP132Upub | Self::SLIP132Vpub
        )
    }

    /// True for the version bytes of serialized extended private keys
    pub fn is_extended_private(&self) -> bool {
        matches!(self,
            Self::Xprv | Self::Tprv |
            Self::Yprv | Self::Uprv |
            Self::Zprv | Self::Vprv |
            Self::SLIP132Yprv | Self::SLIP132Zprv |
            Self::SLIP132Uprv | Self::SLIP132Vprv
        )
    }

    /// Whether the prefix is used on the main network.
    /// Testnet prefixes are shared with regtest.
    pub fn is_mainnet(&self) -> bool {
        matches!(self,
            Self::BTCAddress | Self::P2ScriptAddress | Self::PrivateKeyWIF |
            Self::Xprv | Self::Xpub |
            Self::Yprv | Self::Ypub |
            Self::Zprv | Self::Zpub |
            Self::SLIP132Ypub | Self::SLIP132Yprv |
            Self::SLIP132Zpub | Self::SLIP132Zprv
        )
    }

    /// Check the prefix against a network
    pub fn matches_network(&self, network: Network) -> bool {
        self.is_mainnet() == network.is_mainnet()
    }

    /// Single byte prefix for P2PKH addresses
    pub fn p2pkh(network: Network) -> Self {
        match network {
            Network::Bitcoin => Self::BTCAddress,
            Network::Testnet | Network::Regtest => Self::BTCTestNetAddress
        }
    }

    /// Single byte prefix for P2SH addresses
    pub fn p2sh(network: Network) -> Self {
        match network {
            Network::Bitcoin => Self::P2ScriptAddress,
            Network::Testnet | Network::Regtest => Self::TestnetP2SHAddress
        }
    }

    /// Single byte prefix for WIF private keys
    pub fn wif(network: Network) -> Self {
        match network {
            Network::Bitcoin => Self::PrivateKeyWIF,
            Network::Testnet | Network::Regtest => Self::TestNetPrivateKeyWIF
        }
    }
}

pub trait ToVersionPrefix {
    fn public_version_prefix(&self, network: Network) -> VersionPrefix;
    fn private_version_prefix(&self, network: Network) -> VersionPrefix;
    fn get_version_prefix(&self, network: Network) -> (VersionPrefix, VersionPrefix) {
        (self.public_version_prefix(network), self.private_version_prefix(network))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_round_trip_through_int() {
        for p in [VersionPrefix::Xpub, VersionPrefix::Vpub, VersionPrefix::SLIP132Zpub, VersionPrefix::TestnetP2SHAddress] {
            let bytes = p.to_bytes();
            let mut padded = [0u8; 4];
            padded[4 - bytes.len()..].copy_from_slice(&bytes);
            assert_eq!(VersionPrefix::from_int(u32::from_be_bytes(padded)), Some(p));
        }
        assert_eq!(VersionPrefix::from_int(0xdeadbeef), None);
    }

    #[test]
    fn prefix_networks() {
        assert!(VersionPrefix::Zpub.matches_network(Network::Bitcoin));
        assert!(VersionPrefix::Tpub.matches_network(Network::Regtest));
        assert!(!VersionPrefix::Tpub.matches_network(Network::Bitcoin));
        assert!(VersionPrefix::SLIP132Vpub.is_extended_public());
        assert!(!VersionPrefix::SLIP132Vprv.is_extended_public());
    }
}
