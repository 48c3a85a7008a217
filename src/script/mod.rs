/*
    Scripts needed to encode addresses: witness programs,
    multisig redeem scripts and standard script pub keys.
*/

mod builder;
mod redeem_script;

use thiserror::Error;

pub use builder::{
    Builder as ScriptBuilder,
    Opcode,
    opcodes
};
pub use redeem_script::{
    MultisigPolicy,
    RedeemScript
};

/// Largest key count for a bare CHECKMULTISIG script
pub const MAX_MULTISIG_KEYS: usize = 15;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptErr {
    #[error("multisig needs at least one key")]
    NoKeys,
    #[error("multisig with {0} keys exceeds the limit of 15")]
    MaxKeyCountExceeded(usize),
    #[error("threshold {threshold} is not satisfiable with {keys} keys")]
    InvalidThreshold { threshold: u8, keys: usize }
}
