/*
    This module implements the taproot output key tweak (BIP-341).

    Key path only wallets (BIP-86) commit to an empty script tree, so the
    output key is Q = P + int(TapTweak(x(P)))G.
*/
use crate::{
    Scalar,
    SECP256K1,
    XOnlyPublicKey,
    error::{Error, Result},
    hash::tagged_hash,
    key::PubKey
};

pub trait TaprootTaggedHash {
    fn from_slice(slice: &[u8]) -> [u8; 32];
}

/// Macro to create tagged hash types
macro_rules! taproot_tagged_hashes {
    ($name: ident, $tag: expr) => {
        pub struct $name;

        impl TaprootTaggedHash for $name {
            fn from_slice(slice: &[u8]) -> [u8; 32] {
                tagged_hash($tag, slice)
            }
        }
    }
}

taproot_tagged_hashes!(TapTweakHash, "TapTweak");

impl TapTweakHash {
    /// Create the TapTweakHash from an x-only key and the merkle root of its script tree, if any.
    pub fn from_key_and_tweak(key: &XOnlyPublicKey, merkle_root: Option<[u8; 32]>) -> [u8; 32] {
        let mut data = key.serialize().to_vec();
        if let Some(root) = merkle_root {
            data.extend_from_slice(&root);
        }
        TapTweakHash::from_slice(&data)
    }
}

/**
    Tweaks an internal key into a taproot output key.
    Pass `None` as the merkle root for a key path only output.
*/
pub fn tap_tweak(internal_key: &XOnlyPublicKey, merkle_root: Option<[u8; 32]>) -> Result<XOnlyPublicKey> {
    let tweak = TapTweakHash::from_key_and_tweak(internal_key, merkle_root);
    //Fails only if the hash is not below the curve order
    let scalar = Scalar::from_be_bytes(tweak).map_err(|_| Error::InvalidKeyMaterial)?;
    let (output_key, _parity) = internal_key.add_tweak(SECP256K1, &scalar)?;

    Ok(output_key)
}

/**
    The 32 byte witness program of a BIP-86 output for `key`.
*/
pub fn output_key(key: &PubKey) -> Result<[u8; 32]> {
    Ok(tap_tweak(&key.x_only(), None)?.serialize())
}
