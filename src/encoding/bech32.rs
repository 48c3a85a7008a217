/*
    Module implements segwit address encoding on top of the bech32 crate.

    Witness version 0 programs are encoded with the original Bech32 checksum,
    version 1 and above use Bech32m (BIP-350).
*/
use thiserror::Error;
use bech32::{
    u5,
    FromBase32,
    ToBase32,
    Variant
};

use crate::util::Network;

/// Longest string a segwit address may be.
const MAX_ADDRESS_LEN: usize = 90;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Bech32Err {
    #[error("bech32: {0}")]
    Codec(#[from] bech32::Error),
    #[error("invalid witness version {0}")]
    InvalidVersion(u8),
    #[error("invalid witness program length {0}")]
    InvalidLength(usize),
    #[error("wrong checksum variant for witness version")]
    WrongVariant,
    #[error("address too long")]
    TooLong,
    #[error("empty witness data")]
    Empty
}

/// A decoded segwit output: human readable part, witness version and program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegwitAddress {
    pub hrp: String,
    pub version: u8,
    pub program: Vec<u8>
}

fn variant_for(witness_version: u8) -> Variant {
    if witness_version == 0 { Variant::Bech32 } else { Variant::Bech32m }
}

fn check_program(witness_version: u8, program: &[u8]) -> Result<(), Bech32Err> {
    if witness_version > 16 {
        return Err(Bech32Err::InvalidVersion(witness_version));
    }
    if program.len() < 2 || program.len() > 40 {
        return Err(Bech32Err::InvalidLength(program.len()));
    }
    //v0 programs are either a key hash or a script hash
    if witness_version == 0 && program.len() != 20 && program.len() != 32 {
        return Err(Bech32Err::InvalidLength(program.len()));
    }
    Ok(())
}

/**
    Encodes a witness program as a segwit address.

    The program is a pubkey hash (p2wpkh), script hash (p2wsh) or tweaked x-only key (p2tr).
    Use witness version 0 for P2WPKH and P2WSH. Use version 1 for P2TR.
*/
pub fn encode(witness_version: u8, program: &[u8], network: Network) -> Result<String, Bech32Err> {
    check_program(witness_version, program)?;

    let mut data = vec![u5::try_from_u8(witness_version)?];
    data.extend(program.to_base32());

    Ok(bech32::encode(network.hrp(), data, variant_for(witness_version))?)
}

/**
    Decodes a segwit address and checks the witness rules:
    the program length, and Bech32 for v0 versus Bech32m for v1 and above.
    The human readable part is returned without being checked against a network.
*/
pub fn decode(address: &str) -> Result<SegwitAddress, Bech32Err> {
    if address.len() > MAX_ADDRESS_LEN { return Err(Bech32Err::TooLong) }

    let (hrp, data, variant) = bech32::decode(address)?;
    let (version, payload) = data.split_first().ok_or(Bech32Err::Empty)?;
    let version = version.to_u8();

    let program = Vec::<u8>::from_base32(payload)?;
    check_program(version, &program)?;
    if variant != variant_for(version) {
        return Err(Bech32Err::WrongVariant);
    }

    Ok(SegwitAddress { hrp, version, program })
}

/// Script pubkey of a witness program: OP_n <push program>
pub fn script_pub_key(witness_version: u8, program: &[u8]) -> Vec<u8> {
    let op = if witness_version == 0 { 0x00 } else { 0x50 + witness_version };
    let mut script = vec![op, program.len() as u8];
    script.extend_from_slice(program);
    script
}
