use thiserror::Error;

use crate::{
    encoding::{
        version_prefix::VersionPrefix
    },
    hash
};

#[derive(Debug)]
pub struct Base58 {
    prefix: Option<VersionPrefix>,
    payload: Vec<u8>
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Base58Error {
    #[error("invalid base58 character `{0}`")]
    BadChar(char),
    #[error("base58 data too short for a checksum")]
    TooShort,
    #[error("base58 checksum mismatch")]
    BadChecksum
}

impl From<bs58::decode::Error> for Base58Error {
    fn from(err: bs58::decode::Error) -> Self {
        match err {
            bs58::decode::Error::InvalidCharacter { character, .. } => Base58Error::BadChar(character),
            bs58::decode::Error::NonAsciiCharacter { .. } => Base58Error::BadChar('?'),
            _ => Base58Error::TooShort
        }
    }
}

impl Base58 {
    pub fn new(prefix: Option<VersionPrefix>, payload: &[u8]) -> Base58 {
        Base58 {
            prefix,
            payload: payload.to_vec()
        }
    }

    fn bytes(self) -> Vec<u8> {
        match self.prefix {
            Some(x) => {
                let mut d = x.to_bytes();
                d.extend_from_slice(&self.payload);
                d
            },
            None => self.payload
        }
    }

    /// Check encode data by appending the checksum and then encoding it.
    pub fn check_encode(self) -> String {
        //prefix | payload | checksum
        let mut bytes = self.bytes();
        let checksum = hash::sha256d(&bytes);
        bytes.extend_from_slice(&checksum[0..4]);

        Base58::new(None, &bytes).encode()
    }

    /// Encode data in base58 format.
    pub fn encode(self) -> String {
        bs58::encode(self.bytes()).into_string()
    }

    /// Decodes a base58 string into a byte vector.
    /// DOES NOT remove the checksum or version prefix if present.
    /// Whitespace is not part of the alphabet and is rejected.
    pub fn decode(encoded: &str) -> Result<Vec<u8>, Base58Error> {
        Ok(bs58::decode(encoded).into_vec()?)
    }

    /// Returns the decoded payload with the checksum removed.
    /// Version prefix is NOT removed as it is variable length depending on context.
    pub fn check_decode(encoded: &str) -> Result<Vec<u8>, Base58Error> {
        let mut bytes = Base58::decode(encoded)?;
        if bytes.len() < 4 { return Err(Base58Error::TooShort) }

        let split = bytes.len() - 4;
        if hash::sha256d(&bytes[..split])[0..4] != bytes[split..] {
            return Err(Base58Error::BadChecksum);
        }
        bytes.truncate(split);
        Ok(bytes)
    }
}
