/*
    This module contains the default imports for the library.

    Import the library using:
        use btc_deriver::prelude::*;
    to quickly import the essential parts of the library.
*/

pub use crate::{

    key::{
        PubKey,
        PrivKey,
        KeyPair,
        Key
    },

    address::{
        Address,
        AddressInfo,
        AddressKind,
        HashMode,
        address_from_hash_bytes,
        encode_address
    },

    bip39::{
        MnemonicErr,
        Language,
        Mnemonic,
        PhraseLength
    },

    hdwallet::{
        ChildOptions,
        ExtendedKey,
        Xprv, Xpub,
        Path,
        WalletType
    },

    encoding::{
        version_prefix::VersionPrefix,
        ToVersionPrefix
    },

    error::{
        Error,
        Result
    },

    script::{
        MultisigPolicy,
        RedeemScript
    },

    util::Network,

    wallet::*

};
