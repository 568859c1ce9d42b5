//! BIP39 mnemonics
//!
//! Seeds follow BIP39 (PBKDF2-HMAC-SHA512, 2048 rounds, salt `"mnemonic" || passphrase`).
//! Account keys are derived with [`crate::derivation`].

use std::fmt;

use bip39::Language;
use rand::{rngs::OsRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::{derive_secret_key, CryptoError, UserSecretKey};

/// Supported mnemonic lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordCount {
    /// 12 words (128-bit entropy)
    Twelve,
    /// 15 words (160-bit entropy)
    Fifteen,
    /// 18 words (192-bit entropy)
    Eighteen,
    /// 21 words (224-bit entropy)
    TwentyOne,
    /// 24 words (256-bit entropy)
    #[default]
    TwentyFour,
}

impl WordCount {
    /// Number of entropy bytes behind this word count
    pub const fn entropy_bytes(self) -> usize {
        match self {
            WordCount::Twelve => 16,
            WordCount::Fifteen => 20,
            WordCount::Eighteen => 24,
            WordCount::TwentyOne => 28,
            WordCount::TwentyFour => 32,
        }
    }

    /// Number of words
    pub const fn words(self) -> usize {
        self.entropy_bytes() * 3 / 4
    }
}

impl TryFrom<usize> for WordCount {
    type Error = CryptoError;

    fn try_from(words: usize) -> Result<Self, Self::Error> {
        match words {
            12 => Ok(WordCount::Twelve),
            15 => Ok(WordCount::Fifteen),
            18 => Ok(WordCount::Eighteen),
            21 => Ok(WordCount::TwentyOne),
            24 => Ok(WordCount::TwentyFour),
            other => Err(CryptoError::InvalidMnemonic(format!(
                "unsupported word count {}",
                other
            ))),
        }
    }
}

/// A validated BIP39 mnemonic (English wordlist)
///
/// The phrase is wiped on drop and never shown by `Debug`; use
/// [`Mnemonic::phrase`] to read it explicitly.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic {
    phrase: String,
}

impl Mnemonic {
    /// Generate a 24-word mnemonic
    pub fn generate() -> Result<Self, CryptoError> {
        Self::generate_with(WordCount::default())
    }

    /// Generate a mnemonic of the given length from the OS random source
    pub fn generate_with(word_count: WordCount) -> Result<Self, CryptoError> {
        let mut buf = Zeroizing::new([0u8; 32]);
        let entropy = &mut buf[..word_count.entropy_bytes()];
        OsRng.fill_bytes(entropy);
        let mnemonic = bip39::Mnemonic::from_entropy_in(Language::English, entropy)
            .map_err(|e| CryptoError::InvalidMnemonic(e.to_string()))?;
        Ok(Self {
            phrase: mnemonic.to_string(),
        })
    }

    /// Validate a phrase: word count, wordlist membership and checksum.
    ///
    /// Surrounding whitespace is trimmed and inner runs collapse to one space.
    pub fn from_phrase(text: &str) -> Result<Self, CryptoError> {
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        bip39::Mnemonic::parse_in_normalized(Language::English, &normalized)
            .map_err(|e| CryptoError::InvalidMnemonic(e.to_string()))?;
        Ok(Self { phrase: normalized })
    }

    /// The space-separated phrase
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Individual words
    pub fn words(&self) -> Vec<&str> {
        self.phrase.split(' ').collect()
    }

    /// Number of words
    pub fn word_count(&self) -> usize {
        self.phrase.split(' ').count()
    }

    /// 64-byte BIP39 seed
    pub fn to_seed(&self, passphrase: &str) -> Result<Zeroizing<[u8; 64]>, CryptoError> {
        let parsed = bip39::Mnemonic::parse_in_normalized(Language::English, &self.phrase)
            .map_err(|e| CryptoError::InvalidMnemonic(e.to_string()))?;
        Ok(Zeroizing::new(parsed.to_seed_normalized(passphrase)))
    }

    /// Secret key at `m/44'/508'/0'/0'/{address_index}'` (empty passphrase)
    pub fn derive_key(&self, address_index: u32) -> Result<UserSecretKey, CryptoError> {
        let seed = self.to_seed("")?;
        let key = derive_secret_key(&seed[..], address_index)?;
        UserSecretKey::from_bytes(&key[..])
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic")
            .field("word_count", &self.word_count())
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}
