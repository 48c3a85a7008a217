/*
    This module implements the BIP-39 standard
    for turning a mnemonic phrase into a wallet seed.

    Phrases are only ever read and checked here, never generated.
*/

mod lang;
mod mnemonic;

use thiserror::Error;

pub use mnemonic::Mnemonic as Mnemonic;
pub use mnemonic::PhraseLength as PhraseLength;
pub use lang::Language as Language;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MnemonicErr {
    #[error("phrase has {0} words, expected 12, 15, 18, 21 or 24")]
    InvalidWordCount(usize),
    #[error("`{0}` is not in the word list")]
    InvalidWord(String),
    #[error("checksum does not match the phrase entropy")]
    ChecksumUnequal
}
