use crate::{
    hash,
    key::PubKey,
    script::{
        ScriptBuilder,
        ScriptErr,
        MAX_MULTISIG_KEYS,
        opcodes
    }
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemScript {
    pub code: Vec<u8>
}

impl RedeemScript {
    /**
        Create a new instance of self
    */
    pub fn new(code: Vec<u8>) -> Self {
        Self {
            code
        }
    }

    /**
        Hash the script with Hash160
    */
    pub fn hash(&self) -> [u8; 20] {
        hash::hash160(&self.code)
    }

    /**
        Hash the script with SHA256. This is the P2WSH witness program.
    */
    pub fn witness_hash(&self) -> [u8; 32] {
        hash::sha256(&self.code)
    }

    ///Creates the redeem script for a m-of-n multisig wallet
    ///BIP-11 and BIP-67 compliant
    pub fn multisig(m: u8, keys: &[PubKey]) -> Result<Self, ScriptErr> {
        let n = keys.len();
        if n == 0 { return Err(ScriptErr::NoKeys) }
        if n > MAX_MULTISIG_KEYS { return Err(ScriptErr::MaxKeyCountExceeded(n)) }
        if m == 0 || m as usize > n { return Err(ScriptErr::InvalidThreshold { threshold: m, keys: n }) }

        //Sort the keys in lexiographical order of their compressed encoding (BIP-67)
        let mut keys: Vec<[u8; 33]> = keys.iter().map(|k| k.as_bytes()).collect();
        keys.sort();

        let mut builder = ScriptBuilder::new().push_int(m);
        for key in keys.iter() {
            builder = builder.push_data(key);
        }

        Ok(builder
            .push_int(n as u8)
            .push_opcode(opcodes::OP_CHECKMULTISIG)
            .into_script())
    }

    /// P2PKH script pub key
    /// OP_DUP OP_HASH160 <Pubkey Hash> OP_EQUALVERIFY OP_CHECKSIG
    pub fn p2pkh(hash: &[u8; 20]) -> Self {
        ScriptBuilder::new()
            .push_opcode(opcodes::OP_DUP)
            .push_opcode(opcodes::OP_HASH160)
            .push_data(hash)
            .push_opcode(opcodes::OP_EQUALVERIFY)
            .push_opcode(opcodes::OP_CHECKSIG)
            .into_script()
    }

    /// P2SH script pub key
    /// OP_HASH160 <Hash160(redeemScript)> OP_EQUAL
    pub fn p2sh(hash: &[u8; 20]) -> Self {
        ScriptBuilder::new()
            .push_opcode(opcodes::OP_HASH160)
            .push_data(hash)
            .push_opcode(opcodes::OP_EQUAL)
            .into_script()
    }

    /// P2WPKH witness program, also the redeem script of nested segwit (BIP-49)
    /// 0x0014 <20-byte-pubkey-hash>
    pub fn p2wpkh(pubkey: &PubKey) -> Self {
        ScriptBuilder::new()
            .push_opcode(opcodes::OP_0)
            .push_opcode(opcodes::OP_PUSHBYTES_20)
            .push_slice(&pubkey.hash160())
            .into_script()
    }

    /// P2WSH witness program
    /// 0x0020 <SHA256(witnessScript)>
    pub fn p2wsh(witness_hash: &[u8; 32]) -> Self {
        ScriptBuilder::new()
            .push_opcode(opcodes::OP_0)
            .push_opcode(opcodes::OP_PUSHBYTES_32)
            .push_slice(witness_hash)
            .into_script()
    }
}

/**
    Who signs for a segwit v0 script address.

    The derived key is always one of the signers. `cosigners` are the other
    keys and `threshold` is the number of signatures required.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultisigPolicy {
    pub threshold: u8,
    pub cosigners: Vec<PubKey>
}

impl Default for MultisigPolicy {
    fn default() -> Self {
        Self {
            threshold: 2,
            cosigners: Vec::new()
        }
    }
}

impl MultisigPolicy {
    pub fn new(threshold: u8, cosigners: Vec<PubKey>) -> Self {
        Self { threshold, cosigners }
    }

    /// Multisig script over the derived key and the cosigners
    pub fn redeem_script(&self, key: &PubKey) -> Result<RedeemScript, ScriptErr> {
        let mut keys = Vec::with_capacity(self.cosigners.len() + 1);
        keys.push(*key);
        keys.extend_from_slice(&self.cosigners);

        RedeemScript::multisig(self.threshold, &keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(h: &str) -> PubKey {
        PubKey::from_slice(&hex::decode(h).unwrap()).unwrap()
    }

    #[test]
    /// First test vector of BIP-67
    fn multisig_keys_are_sorted() {
        let keys = [
            key("02ff12471208c14bd580709cb2358d98975247d8765f92bc25eab3b2763ed605f8"),
            key("02fe6f0a5a297eb38c391581c4413e084773ea23954d93f7753db7dc0adc188b2f")
        ];
        let script = RedeemScript::multisig(2, &keys).unwrap();
        assert_eq!(
            hex::encode(&script.code),
            "522102fe6f0a5a297eb38c391581c4413e084773ea23954d93f7753db7dc0adc188b2f2102ff12471208c14bd580709cb2358d98975247d8765f92bc25eab3b2763ed605f852ae"
        );
    }

    #[test]
    fn unsatisfiable_policies_are_rejected() {
        let k = key("02ff12471208c14bd580709cb2358d98975247d8765f92bc25eab3b2763ed605f8");

        assert_eq!(
            MultisigPolicy::default().redeem_script(&k),
            Err(ScriptErr::InvalidThreshold { threshold: 2, keys: 1 })
        );
        assert_eq!(
            MultisigPolicy::new(0, vec![]).redeem_script(&k),
            Err(ScriptErr::InvalidThreshold { threshold: 0, keys: 1 })
        );
        assert_eq!(
            MultisigPolicy::new(1, vec![k; 15]).redeem_script(&k),
            Err(ScriptErr::MaxKeyCountExceeded(16))
        );
        assert_eq!(RedeemScript::multisig(1, &[]), Err(ScriptErr::NoKeys));
        assert!(MultisigPolicy::new(1, vec![]).redeem_script(&k).is_ok());
    }

    #[test]
    fn nested_segwit_redeem_script() {
        let k = key("0204664c60ceabd82967055ccbd0f56a1585dfbd42032656efa501c463b16fbdfe");
        let script = RedeemScript::p2wpkh(&k);
        assert_eq!(script.code[..2], [0x00, 0x14]);
        assert_eq!(script.code[2..], k.hash160());
    }

    #[test]
    fn witness_script_hash_program() {
        let script = RedeemScript::new(vec![0x6a, 0x29, 0x05, 0x20, 0x03]);
        let program = RedeemScript::p2wsh(&script.witness_hash());
        assert_eq!(program.code.len(), 34);
        assert_eq!(program.code[..2], [0x00, 0x20]);
        assert_eq!(program.code[2..], script.witness_hash());
    }
}
