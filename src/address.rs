/*
    Address encoding and validation.

    Each wallet type maps to one Address variant. Encoding goes through a
    single match so a new variant cannot be left unhandled.
*/

use crate:: {
    key::PubKey,
    encoding::{
        base58::Base58,
        bech32,
        version_prefix::VersionPrefix
    },
    error::{Error, Result},
    hdwallet::WalletType,
    script::{MultisigPolicy, RedeemScript},
    taproot,
    util::Network
};

/// Version byte plus a 20 byte hash
const BASE58_PAYLOAD_LEN: usize = 21;

#[derive(Debug, Clone)]
pub enum Address {
    P2PKH(PubKey, Network),
    /// P2SH of an arbitrary redeem script
    P2SH(RedeemScript, Network),
    P2WPKH(PubKey, Network),
    P2WSH(RedeemScript, Network),
    /// Internal key; the BIP-86 tweak is applied when encoding
    P2TR(PubKey, Network)
}

impl Address {
    /**
        Encode the address as a string.
        Base58Check for P2PKH and P2SH, Bech32 for segwit v0 and Bech32m for taproot.
    */
    pub fn encode(&self) -> Result<String> {
        Ok(match self {
            Address::P2PKH(pk, network) => Base58::new(Some(VersionPrefix::p2pkh(*network)), &pk.hash160()).check_encode(),
            Address::P2SH(script, network) => Base58::new(Some(VersionPrefix::p2sh(*network)), &script.hash()).check_encode(),
            Address::P2WPKH(pk, network) => bech32::encode(0, &pk.hash160(), *network)?,
            Address::P2WSH(script, network) => bech32::encode(0, &script.witness_hash(), *network)?,
            Address::P2TR(pk, network) => bech32::encode(1, &taproot::output_key(pk)?, *network)?
        })
    }
}

/**
    Address of `pubkey` for a wallet type.
    The multisig policy is only used by P2WSH, where the key is one of the signers.
*/
pub fn encode_address(pubkey: &PubKey, wallet_type: WalletType, network: Network, multisig: &MultisigPolicy) -> Result<String> {
    let address = match wallet_type {
        WalletType::P2PKH => Address::P2PKH(*pubkey, network),
        WalletType::P2SH_P2WPKH => Address::P2SH(RedeemScript::p2wpkh(pubkey), network),
        WalletType::P2WPKH => Address::P2WPKH(*pubkey, network),
        WalletType::P2WSH => Address::P2WSH(multisig.redeem_script(pubkey)?, network),
        WalletType::P2TR => Address::P2TR(*pubkey, network)
    };
    address.encode()
}

/**
    Hash modes of reward addresses given as (version, hash bytes), as used by Stacks PoX.
*/
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashMode {
    P2PKH = 0,
    P2SH = 1,
    P2SH_P2WPKH = 2,
    P2SH_P2WSH = 3,
    P2WPKH = 4,
    P2WSH = 5,
    P2TR = 6
}

impl HashMode {
    /// Length the hash must have for this mode
    pub fn hash_len(&self) -> usize {
        match self {
            HashMode::P2WSH | HashMode::P2TR => 32,
            _ => 20
        }
    }
}

impl TryFrom<u8> for HashMode {
    type Error = Error;

    fn try_from(mode: u8) -> Result<Self> {
        Ok(match mode {
            0 => HashMode::P2PKH,
            1 => HashMode::P2SH,
            2 => HashMode::P2SH_P2WPKH,
            3 => HashMode::P2SH_P2WSH,
            4 => HashMode::P2WPKH,
            5 => HashMode::P2WSH,
            6 => HashMode::P2TR,
            x => return Err(Error::UnsupportedScheme(format!("hash mode {}", x)))
        })
    }
}

/**
    Builds an address from a hash mode and the hex encoded hash it commits to.
    The hash is used as is: a key hash, script hash or taproot output key.
*/
pub fn address_from_hash_bytes(mode: u8, hash_hex: &str, network: Network) -> Result<String> {
    let mode = HashMode::try_from(mode)?;
    let hash = hex::decode(hash_hex).map_err(|e| Error::EncodingFailure(e.to_string()))?;
    if hash.len() != mode.hash_len() {
        return Err(Error::EncodingFailure(format!("expected a {} byte hash, got {}", mode.hash_len(), hash.len())));
    }

    Ok(match mode {
        HashMode::P2PKH => Base58::new(Some(VersionPrefix::p2pkh(network)), &hash).check_encode(),
        HashMode::P2SH |
        HashMode::P2SH_P2WPKH |
        HashMode::P2SH_P2WSH => Base58::new(Some(VersionPrefix::p2sh(network)), &hash).check_encode(),
        HashMode::P2WPKH | HashMode::P2WSH => bech32::encode(0, &hash, network)?,
        HashMode::P2TR => bech32::encode(1, &hash, network)?
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    P2PKH,
    P2SH,
    P2WPKH,
    P2WSH,
    P2TR,
    /// Segwit version 1 to 16 program without a known meaning
    WitnessUnknown(u8)
}

/// What a valid address string decodes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressInfo {
    /// Base58 testnet addresses report Testnet; they are also valid on regtest
    pub network: Network,
    pub kind: AddressKind,
    pub script_pubkey: Vec<u8>
}

impl AddressInfo {
    pub fn is_for(&self, network: Network) -> bool {
        match self.kind {
            //Base58 version bytes are shared by testnet and regtest
            AddressKind::P2PKH | AddressKind::P2SH => self.network.is_mainnet() == network.is_mainnet(),
            _ => self.network == network
        }
    }
}

fn inspect_base58(address: &str) -> Option<AddressInfo> {
    let payload = Base58::check_decode(address).ok()?;
    if payload.len() != BASE58_PAYLOAD_LEN { return None }

    let mut hash = [0u8; 20];
    hash.copy_from_slice(&payload[1..]);

    let (network, kind, script) = match VersionPrefix::from_int(payload[0] as u32)? {
        VersionPrefix::BTCAddress => (Network::Bitcoin, AddressKind::P2PKH, RedeemScript::p2pkh(&hash)),
        VersionPrefix::BTCTestNetAddress => (Network::Testnet, AddressKind::P2PKH, RedeemScript::p2pkh(&hash)),
        VersionPrefix::P2ScriptAddress => (Network::Bitcoin, AddressKind::P2SH, RedeemScript::p2sh(&hash)),
        VersionPrefix::TestnetP2SHAddress => (Network::Testnet, AddressKind::P2SH, RedeemScript::p2sh(&hash)),
        _ => return None
    };

    Some(AddressInfo { network, kind, script_pubkey: script.code })
}

fn inspect_bech32(address: &str) -> Option<AddressInfo> {
    let decoded = bech32::decode(address).ok()?;
    let network = match decoded.hrp.as_str() {
        "bc" => Network::Bitcoin,
        "tb" => Network::Testnet,
        "bcrt" => Network::Regtest,
        _ => return None
    };
    let kind = match (decoded.version, decoded.program.len()) {
        (0, 20) => AddressKind::P2WPKH,
        (0, 32) => AddressKind::P2WSH,
        (1, 32) => AddressKind::P2TR,
        (v, _) if v > 0 => AddressKind::WitnessUnknown(v),
        _ => return None
    };

    let script_pubkey = match kind {
        AddressKind::P2WSH => {
            let mut hash = [0u8; 32];
            hash.copy_from_slice(&decoded.program);
            RedeemScript::p2wsh(&hash).code
        },
        _ => bech32::script_pub_key(decoded.version, &decoded.program)
    };

    Some(AddressInfo { network, kind, script_pubkey })
}

impl Address {
    /**
        Decodes an address string as Base58Check and as a segwit address.
        Exactly one of the two must succeed.
    */
    pub fn inspect(address: &str) -> Option<AddressInfo> {
        match (inspect_base58(address), inspect_bech32(address)) {
            (Some(info), None) | (None, Some(info)) => Some(info),
            _ => None
        }
    }
}

/**
    Checks the checksum, payload and network of an address.
    Never fails; an invalid address is `false`.
*/
pub fn is_valid_address(address: &str, network: Network) -> bool {
    Address::inspect(address).map_or(false, |info| info.is_for(network))
}
