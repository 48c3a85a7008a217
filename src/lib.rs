/*
    Library to derive Bitcoin keys and addresses from BIP-39 mnemonics
    and extended public keys.

    Supported address types are P2PKH, P2SH-P2WPKH, P2WPKH, P2WSH (multisig)
    and P2TR (key path only). Keys can also be read from wallet import format
    and addresses can be validated against a network.

    References:
        - The Bitcoin Book (https://github.com/bitcoinbook/bitcoinbook/)
            most of the general concepts come from here

        - learn me a bitcoin (https://learnmeabitcoin.com/)
            for great visualisation of the concepts inroduced in the book

        - BIP-32, BIP-39, BIP-44/49/84/86, BIP-173/350 and SLIP-132
            for derivation paths, serialization and address formats
*/

//Outward facing modules
pub mod key;
pub mod address;
pub mod bip39;
pub mod hdwallet;
pub mod encoding;
pub mod script;
pub mod taproot;
pub mod wallet;
pub mod util;
pub mod error;
pub mod prelude;

//Modules for internal use
mod hash;

pub use error::{Error, Result};
pub use wallet::{
    seed_from_mnemonic,
    seed_to_master_key_public,
    account_xpub_from_mnemonic,
    address_from_extended_public_key,
    address_from_mnemonic,
    public_key_from_mnemonic,
    private_key_from_mnemonic,
    public_key_from_wif,
    private_key_from_wif,
    is_valid_address
};

//Dependencies
use secp256k1::{PublicKey, Scalar, SecretKey, XOnlyPublicKey, SECP256K1};
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha512, Digest};
use ripemd::Ripemd160;
