/*
    Hash module includes the hash functions necessary to derive
    keys and hash public keys and scripts into addresses.
*/

use crate::{
    Digest, Hmac, Mac, Ripemd160, Sha256, Sha512
};

/*
    Takes in a byte array and returns the ripemd160 hash of it
*/
pub fn ripemd160<T>(input: T) -> [u8; 20]
where T: AsRef<[u8]>
{
    let mut r = Ripemd160::new();
    r.update(input);
    r.finalize().into()
}

/*
    Takes in a byte array and returns the sha256 hash of it
*/
pub fn sha256<T>(input: T) -> [u8; 32]
where T: AsRef<[u8]>
{
    let mut r = Sha256::new();
    r.update(input);
    r.finalize().into()
}

/// Double sha256, used for Base58Check checksums
pub fn sha256d<T>(input: T) -> [u8; 32]
where T: AsRef<[u8]>
{
    sha256(sha256(input))
}

/// Ripemd160(Sha256(input)). Used for public key and script hashes.
pub fn hash160<T>(input: T) -> [u8; 20]
where T: AsRef<[u8]>
{
    ripemd160(sha256(input))
}

/**
    HMAC-SHA512 of `data` under `key`.
*/
pub fn hmac_sha512(data: &[u8], key: &[u8]) -> [u8; 64] {
    //HMAC accepts keys of any length so this cannot fail
    let mut mac = <Hmac<Sha512> as Mac>::new_from_slice(key)
        .unwrap_or_else(|_| unreachable!("hmac takes keys of any size"));
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/**
    BIP-340 tagged hash.
    sha256( sha256(tag) || sha256(tag) || msg )
*/
pub fn tagged_hash(tag: &str, msg: &[u8]) -> [u8; 32] {
    let tag_hash = sha256(tag.as_bytes());
    let mut r = Sha256::new();
    r.update(tag_hash);
    r.update(tag_hash);
    r.update(msg);
    r.finalize().into()
}
