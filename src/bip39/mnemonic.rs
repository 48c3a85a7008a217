use std::{
    fmt,
    str::FromStr
};
use zeroize::Zeroizing;

use crate::{
    hash,
    Sha512
};
use super::{
    lang,
    MnemonicErr
};

/// PBKDF2 iteration count for seed derivation
const SEED_ROUNDS: u32 = 2048;

pub struct Mnemonic {
    phrase: Zeroizing<String>,  //The checked mnemonic phrase, words joined by single spaces
    length: PhraseLength
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseLength {
    Twelve,
    Fifteen,
    Eighteen,
    TwentyOne,
    TwentyFour
}

impl PhraseLength {
    pub fn from_word_count(count: usize) -> Result<Self, MnemonicErr> {
        Ok(match count {
            12 => PhraseLength::Twelve,
            15 => PhraseLength::Fifteen,
            18 => PhraseLength::Eighteen,
            21 => PhraseLength::TwentyOne,
            24 => PhraseLength::TwentyFour,
            x => return Err(MnemonicErr::InvalidWordCount(x))
        })
    }

    pub fn word_count(&self) -> usize {
        match self {
            PhraseLength::Twelve => 12,
            PhraseLength::Fifteen => 15,
            PhraseLength::Eighteen => 18,
            PhraseLength::TwentyOne => 21,
            PhraseLength::TwentyFour => 24
        }
    }

    /// Bytes of entropy encoded by the phrase
    pub fn entropy_len(&self) -> usize {
        self.word_count() * 11 * 32 / 33 / 8
    }

    /// Checksum bits appended to the entropy (ENT / 32)
    pub fn checksum_bits(&self) -> usize {
        self.entropy_len() * 8 / 32
    }
}

impl Mnemonic {
    /**
        Parses and checks a phrase.

        Words are split on any whitespace. Every word must be in the word list of `lang`
        and the checksum bits at the end of the phrase must match the SHA256 of the entropy.
    */
    pub fn from_phrase(phrase: &str, lang: lang::Language) -> Result<Self, MnemonicErr> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        let length = PhraseLength::from_word_count(words.len())?;

        //Pack the 11 bit word indices into a byte array
        let mut bits = Zeroizing::new(vec![0u8; (words.len() * 11 + 7) / 8]);
        for (i, word) in words.iter().enumerate() {
            let index = lang.index_of(word).ok_or_else(|| MnemonicErr::InvalidWord(word.to_string()))?;
            for b in 0..11 {
                if (index >> (10 - b)) & 1 == 1 {
                    let pos = i * 11 + b;
                    bits[pos / 8] |= 0x80 >> (pos % 8);
                }
            }
        }

        //The checksum occupies the first CS bits of the byte following the entropy
        let ent = length.entropy_len();
        let shift = 8 - length.checksum_bits();
        let expected = hash::sha256(&bits[..ent])[0] >> shift;
        if bits[ent] >> shift != expected {
            return Err(MnemonicErr::ChecksumUnequal);
        }

        Ok(Self {
            phrase: Zeroizing::new(words.join(" ")),
            length
        })
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn length(&self) -> PhraseLength {
        self.length
    }

    /**
        Derives the 512 bit seed.
        PBKDF2-HMAC-SHA512 over the phrase, salted with "mnemonic" + passphrase, 2048 rounds.
    */
    pub fn to_seed(&self, passphrase: &str) -> Zeroizing<[u8; 64]> {
        let salt = Zeroizing::new(format!("mnemonic{}", passphrase));
        let mut seed = Zeroizing::new([0u8; 64]);
        pbkdf2::pbkdf2_hmac::<Sha512>(self.phrase.as_bytes(), salt.as_bytes(), SEED_ROUNDS, &mut seed[..]);
        seed
    }
}

impl FromStr for Mnemonic {
    type Err = MnemonicErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_phrase(s, lang::Language::English)
    }
}

//Phrase is kept out of debug output
impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Mnemonic").field("length", &self.length).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABANDON: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn phrase_lengths() {
        assert_eq!(PhraseLength::Twelve.entropy_len(), 16);
        assert_eq!(PhraseLength::Twelve.checksum_bits(), 4);
        assert_eq!(PhraseLength::TwentyOne.entropy_len(), 28);
        assert_eq!(PhraseLength::TwentyFour.entropy_len(), 32);
        assert_eq!(PhraseLength::TwentyFour.checksum_bits(), 8);
    }

    #[test]
    /// Trezor reference vector for all-zero entropy
    fn seed_from_phrase() {
        let mnemonic = Mnemonic::from_str(ABANDON).unwrap();
        assert_eq!(
            hex::encode(&mnemonic.to_seed("TREZOR")[..]),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }

    #[test]
    fn whitespace_is_normalised() {
        let spaced = format!("  {}\n", ABANDON.replace(' ', "\t "));
        let a = Mnemonic::from_str(&spaced).unwrap();
        assert_eq!(a.phrase(), ABANDON);
    }

    #[test]
    fn twenty_four_word_checksum() {
        let phrase = "jazz sibling error milk first mouse acid carpet slice able nothing desert uncover apology warm other speed cart library rhythm scrap crisp twenty magic";
        assert_eq!(Mnemonic::from_str(phrase).unwrap().length(), PhraseLength::TwentyFour);
    }

    #[test]
    /// 5, 6 and 7 checksum bits
    fn middle_lengths_checksum() {
        let phrases = [
            ("legal winner thank year wave sausage worth useful legal winner thank year wave sausage wise", "wish", PhraseLength::Fifteen),
            ("legal winner thank year wave sausage worth useful legal winner thank year wave sausage worth useful legal will", "win", PhraseLength::Eighteen),
            ("legal winner thank year wave sausage worth useful legal winner thank year wave sausage worth useful legal winner thank year viable", "vibrant", PhraseLength::TwentyOne)
        ];

        for (phrase, wrong_last_word, length) in phrases {
            assert_eq!(Mnemonic::from_str(phrase).unwrap().length(), length);

            let mut words: Vec<&str> = phrase.split(' ').collect();
            words.pop();
            words.push(wrong_last_word);
            assert_eq!(Mnemonic::from_str(&words.join(" ")).unwrap_err(), MnemonicErr::ChecksumUnequal);
        }
    }

    #[test]
    /// Trezor reference vector for 0x7f entropy, 18 words
    fn eighteen_word_seed() {
        let mnemonic = Mnemonic::from_str("legal winner thank year wave sausage worth useful legal winner thank year wave sausage worth useful legal will").unwrap();
        assert_eq!(
            hex::encode(&mnemonic.to_seed("TREZOR")[..]),
            "f2b94508732bcbacbcc020faefecfc89feafa6649a5491b8c952cede496c214a0c7b3c392d168748f2d4a612bada0753b52a1c7ac53c1e93abd5c6320b9e95dd"
        );
    }

    #[test]
    fn rejects_bad_phrases() {
        let bad_checksum = ABANDON.replace("about", "abandon");
        assert!(matches!(Mnemonic::from_str(&bad_checksum), Err(MnemonicErr::ChecksumUnequal)));

        let unknown = ABANDON.replace("about", "satoshi");
        assert!(matches!(Mnemonic::from_str(&unknown), Err(MnemonicErr::InvalidWord(w)) if w == "satoshi"));

        let short = "abandon abandon abandon";
        assert!(matches!(Mnemonic::from_str(short), Err(MnemonicErr::InvalidWordCount(3))));
    }
}
