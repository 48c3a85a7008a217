/*
    This module implements extended keys that are
    used in BIP32 hierarchal deterministic wallets.

    An extended key is a key and a 32 byte chaincode, plus the
    depth, parent fingerprint and index needed to serialize it.
*/

use std::str::FromStr;

use crate::{
    key::{
        PrivKey,
        PubKey
    },
    encoding::{
        base58::{Base58, Base58Error},
        version_prefix::VersionPrefix
    },
    error::{Error, Result},
    hdwallet::{
        ckd::{
            derive_xprv,
            derive_xpub,
            ChildOptions,
        },
        Path,
        WalletType
    },
    hash,
    address,
    script::MultisigPolicy,
    util::{
        as_u32_be,
        Network
    }
};

/// HMAC key for the master key of a seed
const MASTER_KEY_SALT: &[u8] = b"Bitcoin seed";
/// version | depth | fingerprint | index | chaincode | key
const SERIALIZED_LEN: usize = 78;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xprv {
    key: PrivKey,
    chaincode: [u8; 32],
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    pub index: [u8; 4]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xpub {
    key: PubKey,
    chaincode: [u8; 32],
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    pub index: [u8; 4]
}

pub trait ExtendedKey {
    type Key;

    /**
        Constructs the Extended Key.
    */
    fn construct(key: Self::Key, chaincode: [u8; 32], depth: u8, pf: [u8; 4], index: [u8; 4]) -> Self;

    /**
        Returns the chaincode of the extended key
    */
    fn chaincode(&self) -> [u8; 32];

    /**
        Serialize the extended key with the selected prefix
    */
    fn serialize(&self, v_prefix: &VersionPrefix) -> String;

    /**
        Derives the child key of self
    */
    fn get_xchild(&self, options: ChildOptions) -> Result<Self>
    where Self: Sized;

    /**
        Return the non extended public key of self.
    */
    fn get_pub(&self) -> PubKey;

    /**
        Converts an extended key to an address.
        The multisig policy is only read for P2WSH.
    */
    fn get_address(&self, r#type: WalletType, network: Network, multisig: &MultisigPolicy) -> Result<String> {
        address::encode_address(&self.get_pub(), r#type, network, multisig)
    }

    /**
        Derive the key at the given path, eg. m/44'/0'/0'/0.
        Any failing segment fails the whole derivation.
    */
    fn derive_from_path(&self, path: &Path) -> Result<Self>
    where Self: Sized + Clone
    {
        path.children.iter().try_fold(self.clone(), |key, child| key.get_xchild(*child))
    }
}

/// Lays out the 78 byte payload shared by both key types
fn serialize_payload(v_prefix: &VersionPrefix, depth: u8, pf: &[u8; 4], index: &[u8; 4], chaincode: &[u8; 32], key: &[u8]) -> String {
    let mut payload: Vec<u8> = Vec::with_capacity(SERIALIZED_LEN - 4);
    payload.push(depth);
    payload.extend_from_slice(pf);
    payload.extend_from_slice(index);
    payload.extend_from_slice(chaincode);
    payload.extend_from_slice(key);

    Base58::new(Some(*v_prefix), &payload).check_encode()
}

/// Fields of a decoded extended key string
struct RawExtendedKey {
    version: VersionPrefix,
    depth: u8,
    parent_fingerprint: [u8; 4],
    index: [u8; 4],
    chaincode: [u8; 32],
    key: [u8; 33]
}

fn decode_payload(key: &str) -> Result<RawExtendedKey> {
    let bytes = Base58::check_decode(key).map_err(|e| match e {
        Base58Error::BadChecksum => Error::InvalidExtendedKey("bad checksum"),
        _ => Error::InvalidExtendedKey("not base58check")
    })?;
    if bytes.len() != SERIALIZED_LEN { return Err(Error::InvalidExtendedKey("bad length")) }

    let mut version = [0u8; 4];
    version.copy_from_slice(&bytes[0..4]);
    let version = VersionPrefix::from_int(as_u32_be(&version))
        .ok_or(Error::InvalidExtendedKey("unknown version"))?;

    let mut raw = RawExtendedKey {
        version,
        depth: bytes[4],
        parent_fingerprint: [0u8; 4],
        index: [0u8; 4],
        chaincode: [0u8; 32],
        key: [0u8; 33]
    };
    raw.parent_fingerprint.copy_from_slice(&bytes[5..9]);
    raw.index.copy_from_slice(&bytes[9..13]);
    raw.chaincode.copy_from_slice(&bytes[13..45]);
    raw.key.copy_from_slice(&bytes[45..78]);

    //A master key has no parent
    if raw.depth == 0 && (raw.parent_fingerprint != [0u8; 4] || raw.index != [0u8; 4]) {
        return Err(Error::InvalidExtendedKey("depth zero key with a parent"));
    }

    Ok(raw)
}

impl ExtendedKey for Xprv {
    type Key = PrivKey;

    fn construct(key: PrivKey, chaincode: [u8; 32], depth: u8, pf: [u8; 4], index: [u8; 4]) -> Self {
        Self {
            key,
            chaincode,
            //Serialisation info
            depth,
            parent_fingerprint: pf,
            index
        }
    }

    fn chaincode(&self) -> [u8; 32] {
        self.chaincode
    }

    fn serialize(&self, v_prefix: &VersionPrefix) -> String {
        //private keys are padded with 0x00 to 33 bytes
        let mut key = [0u8; 33];
        key[1..].copy_from_slice(&self.key.as_bytes());
        serialize_payload(v_prefix, self.depth, &self.parent_fingerprint, &self.index, &self.chaincode, &key)
    }

    fn get_xchild(&self, options: ChildOptions) -> Result<Xprv> {
        derive_xprv(self, options)
    }

    fn get_pub(&self) -> PubKey {
        PubKey::from_priv_key(&self.key)
    }
}

impl Xprv {
    /**
        Master private key of a seed.
        HMAC-SHA512 keyed with "Bitcoin seed", the left half is the key and the right half the chaincode.
    */
    pub fn from_seed(seed: &[u8]) -> Result<Xprv> {
        let mprivkey_bytes: [u8; 64] = hash::hmac_sha512(seed, MASTER_KEY_SALT);
        let key = PrivKey::from_slice(&mprivkey_bytes[0..32])?;
        let mut chaincode = [0u8; 32];
        chaincode.copy_from_slice(&mprivkey_bytes[32..64]);

        Ok(Xprv::construct(key, chaincode, 0x00, [0x00; 4], [0x00; 4]))
    }

    /**
        Parse a serialized extended private key and return the version it was serialized with.
    */
    pub fn decode(key: &str) -> Result<(Xprv, VersionPrefix)> {
        let raw = decode_payload(key)?;
        if !raw.version.is_extended_private() {
            return Err(Error::InvalidExtendedKey("not an extended private key"));
        }
        if raw.key[0] != 0x00 {
            return Err(Error::InvalidExtendedKey("missing private key padding"));
        }
        let prv = PrivKey::from_slice(&raw.key[1..])
            .map_err(|_| Error::InvalidExtendedKey("invalid private key"))?;

        Ok((Xprv::construct(prv, raw.chaincode, raw.depth, raw.parent_fingerprint, raw.index), raw.version))
    }

    /**
        Return the private key part of self
    */
    pub fn get_prv(&self) -> PrivKey {
        self.key
    }

    /**
        Strip the private key, keeping the public key, chaincode and serialization info.
    */
    pub fn neuter(&self) -> Xpub {
        Xpub::construct(
            self.get_pub(),
            self.chaincode,
            self.depth,
            self.parent_fingerprint,
            self.index
        )
    }
}

impl FromStr for Xprv {
    type Err = Error;

    fn from_str(key: &str) -> Result<Self> {
        Ok(Self::decode(key)?.0)
    }
}

impl ExtendedKey for Xpub {
    type Key = PubKey;

    fn construct(key: PubKey, chaincode: [u8; 32], depth: u8, pf: [u8; 4], index: [u8; 4]) -> Self {
        Self {
            key,
            chaincode,
            //Serialisation info
            depth,
            parent_fingerprint: pf,
            index
        }
    }

    fn chaincode(&self) -> [u8; 32] {
        self.chaincode
    }

    fn serialize(&self, v_prefix: &VersionPrefix) -> String {
        serialize_payload(v_prefix, self.depth, &self.parent_fingerprint, &self.index, &self.chaincode, &self.key.as_bytes())
    }

    fn get_xchild(&self, options: ChildOptions) -> Result<Xpub> {
        derive_xpub(self, options)
    }

    fn get_pub(&self) -> PubKey {
        self.key
    }
}

impl Xpub {
    /**
        Parse a serialized extended public key (BIP-32 or SLIP-132 prefix)
        and return the version it was serialized with.
    */
    pub fn decode(key: &str) -> Result<(Xpub, VersionPrefix)> {
        let raw = decode_payload(key)?;
        if !raw.version.is_extended_public() {
            return Err(Error::InvalidExtendedKey("not an extended public key"));
        }
        if raw.key[0] != 0x02 && raw.key[0] != 0x03 {
            return Err(Error::InvalidExtendedKey("public key is not compressed"));
        }
        let pubk = PubKey::from_slice(&raw.key)
            .map_err(|_| Error::InvalidExtendedKey("invalid public key"))?;

        Ok((Xpub::construct(pubk, raw.chaincode, raw.depth, raw.parent_fingerprint, raw.index), raw.version))
    }
}

impl FromStr for Xpub {
    type Err = Error;

    fn from_str(key: &str) -> Result<Self> {
        Ok(Self::decode(key)?.0)
    }
}

#[cfg(test)]
mod tests {
    /*
        Tests for child key deriveration are implemented in ckd.rs
    */

    use super::*;
    use crate::{
        bip39::Mnemonic,
        encoding::ToVersionPrefix
    };

    //Data generated on leanrmeabitcoin.com/technical/hd-wallets
    const TEST_MNEMONIC: &str = "glow laugh acquire menu anchor evil occur put hover renew calm purpose";
    const TEST_MPRIV: &str = "081549973bafbba825b31bcc402a3c4ed8e3185c2f3a31c75e55f423e9629aa3";
    const TEST_MCC: &str = "1d7d2a4c940be028b945302ad79dd2ce2afe5ed55e1a2937a5af57f8401e73dd";
    const TEST_XPRV: &str = "xprv9s21ZrQH143K2MPKHPWh91wRxLKehoCNsRrwizj2xNaj9zD5SHMNiHJesDEYgJAavgNE1fDWLgYNneHeSA8oVeVXVYomhP1wxdzZtKsLJbc";
    const TEST_XPUB: &str = "xpub661MyMwAqRbcEqTnPR3hW9tAWNA97FvEEenYXP8eWi7i2nYDypfdG5d8iWfK8YgesKi2EE5mk9THcTqnveDWwZVMuctjmxeEaUKgtg7CEEc";

    fn master(phrase: &str) -> Xprv {
        let mnemonic: Mnemonic = phrase.parse().unwrap();
        Xprv::from_seed(&mnemonic.to_seed("")[..]).unwrap()
    }

    #[test]
    fn extended_keys_test() {
        let mpriv = master(TEST_MNEMONIC);

        assert_eq!(hex::encode(mpriv.get_prv().as_bytes()), TEST_MPRIV);
        assert_eq!(hex::encode(mpriv.chaincode()), TEST_MCC);
        assert!(matches!(mpriv.neuter().get_pub().as_bytes()[0], 0x02 | 0x03));
    }

    #[test]
    fn serialize_extended_keys() {
        let mpriv = master(TEST_MNEMONIC);
        let (xpub_prefix, xprv_prefix) = WalletType::P2PKH.get_version_prefix(Network::Bitcoin);

        assert_eq!(mpriv.serialize(&xprv_prefix), TEST_XPRV);
        assert_eq!(mpriv.neuter().serialize(&xpub_prefix), TEST_XPUB);
    }

    #[test]
    fn create_xkeys_from_str() {
        let (xprv, version) = Xprv::decode(TEST_XPRV).unwrap();
        assert_eq!(version, VersionPrefix::Xprv);
        assert_eq!(xprv, master(TEST_MNEMONIC));

        assert!(Xprv::from_str("this is definately not a extended private key").is_err());
        assert_eq!(Xprv::from_str(TEST_XPUB), Err(Error::InvalidExtendedKey("not an extended private key")));

        let (xpub, version) = Xpub::decode(TEST_XPUB).unwrap();
        assert_eq!(version, VersionPrefix::Xpub);
        assert_eq!(xpub, master(TEST_MNEMONIC).neuter());
        assert_eq!(Xpub::from_str(TEST_XPRV), Err(Error::InvalidExtendedKey("not an extended public key")));

        //Same payload, last character changed
        let mut broken = TEST_XPUB.to_string();
        broken.pop();
        broken.push('d');
        assert_eq!(Xpub::from_str(&broken), Err(Error::InvalidExtendedKey("bad checksum")));
    }

    #[test]
    fn derive_from_path_tests() {
        let path: Path = "m/44'/0'/0'/0".parse().unwrap();
        let xprv_at_path = master(TEST_MNEMONIC).derive_from_path(&path).unwrap();

        assert_eq!(
            xprv_at_path.serialize(&VersionPrefix::Xprv),
            "xprvA2RVpXN1QL4okLkV3NT6ADt7UcqauZdi6Tyv2wBscQ3kq9zvvfsxBBgQTcoj7GZCa7wkmmeLvQHdqVJEQ1D4PGoDgYV8CZj9w9jqGNbGCaT"
        );
        assert_eq!(
            xprv_at_path.neuter().serialize(&VersionPrefix::Xpub),
            "xpub6FQrE2tuEhd6xppx9Pz6XMpr2eg5K2MZTguWqKbVAjajhxL5UDCCiyztJtCFDrAqPoQfmbVeVX5BKXQ7vxgR42DtsVa3g2YMLZQjbEnxbqi"
        );
    }

    #[test]
    fn bip84_test_vectors() {
        let mnemonic = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
        let wallet_type = WalletType::P2WPKH;
        let account_path = Path::for_account(wallet_type, Network::Bitcoin, 0);
        let account = master(mnemonic).derive_from_path(&account_path).unwrap();

        // Account 0, root = m/84'/0'/0'
        assert_eq!(
            account.serialize(&wallet_type.private_version_prefix(Network::Bitcoin)),
            "zprvAdG4iTXWBoARxkkzNpNh8r6Qag3irQB8PzEMkAFeTRXxHpbF9z4QgEvBRmfvqWvGp42t42nvgGpNgYSJA9iefm1yYNZKEm7z6qUWCroSQnE"
        );
        assert_eq!(
            account.neuter().serialize(&wallet_type.public_version_prefix(Network::Bitcoin)),
            "zpub6rFR7y4Q2AijBEqTUquhVz398htDFrtymD9xYYfG1m4wAcvPhXNfE3EfH1r1ADqtfSdVCToUG868RvUUkgDKf31mGDtKsAYz2oz2AGutZYs"
        );

        let policy = MultisigPolicy::default();
        let cases = [
            // m/84'/0'/0'/0/0
            (0, 0, "KyZpNDKnfs94vbrwhJneDi77V6jF64PWPF8x5cdJb8ifgg2DUc9d", "bc1qcr8te4kr609gcawutmrza0j4xv80jy8z306fyu"),
            // m/84'/0'/0'/0/1
            (0, 1, "Kxpf5b8p3qX56DKEe5NqWbNUP9MnqoRFzZwHRtsFqhzuvUJsYZCy", "bc1qnjg0jd8228aq7egyzacy8cys3knf9xvrerkf9g"),
            // m/84'/0'/0'/1/0
            (1, 0, "KxuoxufJL5csa1Wieb2kp29VNdn92Us8CoaUG3aGtPtcF3AzeXvF", "bc1q8c6fshw2dlwun7ekn9qwf37cu2rn755upcp6el")
        ];
        for (change, index, wif, expected) in cases {
            let key = account.derive_from_path(&Path::relative(change, index)).unwrap();
            assert_eq!(key.get_prv().export_as_wif(true, Network::Bitcoin), wif);
            assert_eq!(key.get_address(wallet_type, Network::Bitcoin, &policy).unwrap(), expected);

            //The same address from the watch only side
            let watch_only = account.neuter().derive_from_path(&Path::relative(change, index)).unwrap();
            assert_eq!(watch_only.get_address(wallet_type, Network::Bitcoin, &policy).unwrap(), expected);
        }
    }
}
