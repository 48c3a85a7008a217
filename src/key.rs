/*
    Single secp256k1 keys and the wallet import format.
*/

use std::fmt;

use crate::{
    SECP256K1,
    PublicKey,
    SecretKey,
    XOnlyPublicKey,
    encoding::{
        base58::{Base58, Base58Error},
        version_prefix::VersionPrefix
    },
    error::{Error, Result},
    hash,
    util::Network
};

/// Trailing byte of a WIF that marks the public key as compressed
const WIF_COMPRESSED_FLAG: u8 = 0x01;

pub trait Key {
    /**
        Serialized key as lowercase hex.
    */
    fn hex(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivKey(SecretKey);

impl PrivKey {
    /**
        Use a predefined byte array as a secret key.
        Fails if the bytes are zero or not below the curve order.
    */
    pub fn from_slice(byte_array: &[u8]) -> Result<Self> {
        Ok(Self(SecretKey::from_slice(byte_array)?))
    }

    pub(crate) fn from_secret(key: SecretKey) -> Self {
        Self(key)
    }

    pub(crate) fn secret(&self) -> &SecretKey {
        &self.0
    }

    /**
        Serializes the private key into a array of bytes.
    */
    pub fn as_bytes(&self) -> [u8; 32] {
        self.0.secret_bytes()
    }

    /**
        Export the private key in wallet import format (Base58Check encoded with prefix).
        Use the parameter to indicate if WIF should include the compression byte.
    */
    pub fn export_as_wif(&self, compressed: bool, network: Network) -> String {
        let mut key: Vec<u8> = self.as_bytes().to_vec();
        if compressed {
            key.push(WIF_COMPRESSED_FLAG);
        }

        Base58::new(Some(VersionPrefix::wif(network)), &key).check_encode()
    }

    /**
        Import a private key from wallet import format.

        The version byte must belong to `network`. Returns the key and whether
        the WIF carried the compression flag.
    */
    pub fn from_wif(wif: &str, network: Network) -> Result<(Self, bool)> {
        let bytes = Base58::check_decode(wif).map_err(|e| match e {
            Base58Error::BadChecksum => Error::InvalidWIF("bad checksum"),
            _ => Error::InvalidWIF("not base58check")
        })?;

        //version | key (32) | optional compression flag
        let compressed = match bytes.len() {
            33 => false,
            34 if bytes[33] == WIF_COMPRESSED_FLAG => true,
            34 => return Err(Error::InvalidWIF("bad compression flag")),
            _ => return Err(Error::InvalidWIF("bad length"))
        };
        if VersionPrefix::wif(network).to_bytes() != bytes[..1] {
            return Err(Error::InvalidWIF("version does not match network"));
        }

        let key = Self::from_slice(&bytes[1..33])
            .map_err(|_| Error::InvalidWIF("key out of range"))?;
        Ok((key, compressed))
    }
}

impl Key for PrivKey {
    fn hex(&self) -> String {
        hex::encode(self.as_bytes())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PubKey(PublicKey);

impl PubKey {
    /**
        Finds the compressed public key from a secret key.

        Is the result of static point G on the secp256k1 curve multipled k times, where k is the private key.
    */
    pub fn from_priv_key(k: &PrivKey) -> Self {
        Self(PublicKey::from_secret_key(SECP256K1, &k.0))
    }

    /**
        Use a predefined byte array as a public key.
        Accepts compressed and uncompressed encodings.
    */
    pub fn from_slice(byte_array: &[u8]) -> Result<Self> {
        Ok(Self(PublicKey::from_slice(byte_array)?))
    }

    pub(crate) fn from_point(key: PublicKey) -> Self {
        Self(key)
    }

    pub(crate) fn point(&self) -> &PublicKey {
        &self.0
    }

    /**
        Returns the compressed public key as a byte array.
    */
    pub fn as_bytes(&self) -> [u8; 33] {
        self.0.serialize()
    }

    /**
        Hash160 of the compressed key. Used as the payload of P2PKH and P2WPKH addresses.
    */
    pub fn hash160(&self) -> [u8; 20] {
        hash::hash160(self.as_bytes())
    }

    /**
        X-only form of the key for taproot (BIP-340).
    */
    pub fn x_only(&self) -> XOnlyPublicKey {
        self.0.x_only_public_key().0
    }
}

impl Key for PubKey {
    fn hex(&self) -> String {
        hex::encode(self.as_bytes())
    }
}

impl fmt::Display for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

/// Private key together with its public key, as recovered from a WIF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPair {
    pub private: PrivKey,
    pub public: PubKey,
    /// Whether the source WIF carried the compression flag
    pub compressed: bool,
    pub network: Network
}

impl KeyPair {
    pub fn from_priv_key(private: PrivKey, compressed: bool, network: Network) -> Self {
        Self {
            private,
            public: PubKey::from_priv_key(&private),
            compressed,
            network
        }
    }

    /**
        Decodes a WIF for `network` and derives the public key.
    */
    pub fn from_wif(wif: &str, network: Network) -> Result<Self> {
        let (private, compressed) = PrivKey::from_wif(wif, network)?;
        Ok(Self::from_priv_key(private, compressed, network))
    }

    pub fn to_wif(&self) -> String {
        self.private.export_as_wif(self.compressed, self.network)
    }
}
