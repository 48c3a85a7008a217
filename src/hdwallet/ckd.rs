/*
    This module implements child key deriveration
    from parent extended private and public keys
    under the BIP32 standard.

    Reference:
        https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki
*/

use tracing::trace;

use crate::{
    Scalar,
    SECP256K1,
    error::{Error, Result},
    hash::{
        hmac_sha512,
        hash160
    },
    hdwallet::{
        ExtendedKey, Xprv, Xpub
    },
    key::{
        PubKey,
        PrivKey
    }
};

/// First hardened index (2^31)
pub const HARDENED_OFFSET: u32 = 1 << 31;

/**
    Enum to pattern match child key deriveration options.
    The value is the index below 2^31; hardening is carried by the variant.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOptions {
    Normal(u32),
    Hardened(u32)
}

impl ChildOptions {
    /// Index as serialized in the extended key (hardened indexes have the top bit set)
    pub fn child_number(&self) -> Result<u32> {
        match *self {
            ChildOptions::Normal(x) | ChildOptions::Hardened(x) if x >= HARDENED_OFFSET => Err(Error::InvalidChildIndex(x)),
            ChildOptions::Normal(x) => Ok(x),
            ChildOptions::Hardened(x) => Ok(x + HARDENED_OFFSET)
        }
    }

    pub fn is_hardened(&self) -> bool {
        matches!(self, ChildOptions::Hardened(_))
    }
}

/// Left half of the HMAC as a curve scalar, right half as the child chaincode
fn split_hmac(data: &[u8], chaincode: &[u8; 32]) -> Result<(Scalar, [u8; 32])> {
    let hash: [u8; 64] = hmac_sha512(data, chaincode);

    let mut left_bytes = [0u8; 32];
    let mut child_chaincode = [0u8; 32];
    left_bytes.copy_from_slice(&hash[0..32]);
    child_chaincode.copy_from_slice(&hash[32..64]);

    //IL >= n makes the child invalid
    let tweak = Scalar::from_be_bytes(left_bytes).map_err(|_| Error::InvalidKeyMaterial)?;
    Ok((tweak, child_chaincode))
}

fn fingerprint(parent: &PubKey) -> [u8; 4] {
    let mut fp = [0u8; 4];
    fp.copy_from_slice(&hash160(parent.as_bytes())[0..4]);
    fp
}

fn child_depth(depth: u8) -> Result<u8> {
    depth.checked_add(1).ok_or(Error::InvalidExtendedKey("maximum depth exceeded"))
}

/**
    Function to derive new child xprv keys from parent xprv keys.
    Use ChildOptions::Hardened to generate a hardened child xprv.
*/
pub fn derive_xprv(parent: &Xprv, options: ChildOptions) -> Result<Xprv> {
    let index = options.child_number()?;
    let parent_pub = parent.get_pub();
    trace!(depth = parent.depth, index, hardened = options.is_hardened(), "deriving child xprv");

    let mut data: Vec<u8> = Vec::with_capacity(37);
    match options {
        //Hardened private key child is [0x00 || parent priv bytes || index bytes]
        ChildOptions::Hardened(_) => {
            data.push(0x00);
            data.extend_from_slice(&parent.get_prv().as_bytes());
        },
        //Normal private key child is [parent pub bytes || index bytes]
        ChildOptions::Normal(_) => data.extend_from_slice(&parent_pub.as_bytes())
    }
    data.extend_from_slice(&index.to_be_bytes());

    let (tweak, child_chaincode) = split_hmac(&data, &parent.chaincode())?;

    //k_child = IL + k_parent (mod n). Fails if the result is zero.
    let child_key = parent.get_prv().secret().add_tweak(&tweak)?;

    Ok(
        Xprv::construct(
            PrivKey::from_secret(child_key),
            child_chaincode,
            child_depth(parent.depth)?,
            fingerprint(&parent_pub),
            index.to_be_bytes()
        )
    )
}

/**
    Function to derive new child xpub keys from parent xpub keys.
    Hardened children need the parent private key and are refused.
*/
pub fn derive_xpub(parent: &Xpub, options: ChildOptions) -> Result<Xpub> {
    if options.is_hardened() { return Err(Error::HardenedFromPublic) }
    let index = options.child_number()?;
    trace!(depth = parent.depth, index, "deriving child xpub");

    let parent_pub = parent.get_pub();
    let mut data: Vec<u8> = Vec::with_capacity(37);
    data.extend_from_slice(&parent_pub.as_bytes());
    data.extend_from_slice(&index.to_be_bytes());

    let (tweak, child_chaincode) = split_hmac(&data, &parent.chaincode())?;

    //K_child = IL*G + K_parent. Fails if the result is the point at infinity.
    let child_key = parent_pub.point().add_exp_tweak(SECP256K1, &tweak)?;

    Ok(
        Xpub::construct(
            PubKey::from_point(child_key),
            child_chaincode,
            child_depth(parent.depth)?,
            fingerprint(&parent_pub),
            index.to_be_bytes()
        )
    )
}
