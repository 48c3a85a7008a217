/*
    Error types for the library.

    Each module keeps its own error enum (mnemonic, base58, bech32, script)
    and every one of them folds into the crate level `Error` so that `?`
    works across module boundaries.
*/

use thiserror::Error;

use crate::{
    bip39::MnemonicErr,
    encoding::{
        base58::Base58Error,
        bech32::Bech32Err
    },
    script::ScriptErr
};

/// Crate level result alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(#[from] MnemonicErr),

    #[error("unsupported address scheme `{0}`")]
    UnsupportedScheme(String),

    #[error("unsupported network tag {0}, expected 0 (mainnet) or 1 (testnet)")]
    UnsupportedNetwork(u32),

    #[error("unknown network `{0}`, expected mainnet, testnet or regtest")]
    UnknownNetwork(String),

    #[error("cannot derive a hardened child from a public-only extended key")]
    HardenedFromPublic,

    #[error("derived key material is outside the curve order")]
    InvalidKeyMaterial,

    #[error("child index {0} must be less than 2^31")]
    InvalidChildIndex(u32),

    #[error("invalid derivation path `{0}`")]
    InvalidPath(String),

    #[error("invalid extended key: {0}")]
    InvalidExtendedKey(&'static str),

    #[error("invalid WIF: {0}")]
    InvalidWIF(&'static str),

    #[error("encoding failure: {0}")]
    EncodingFailure(String),

    #[error("could not derive address: {0}")]
    AddressDerivationFailure(#[from] ScriptErr),
}

impl From<Base58Error> for Error {
    fn from(err: Base58Error) -> Self {
        Error::EncodingFailure(err.to_string())
    }
}

impl From<Bech32Err> for Error {
    fn from(err: Bech32Err) -> Self {
        Error::EncodingFailure(err.to_string())
    }
}

impl From<secp256k1::Error> for Error {
    fn from(_: secp256k1::Error) -> Self {
        Error::InvalidKeyMaterial
    }
}
