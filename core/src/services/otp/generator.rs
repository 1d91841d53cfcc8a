//! OTP code generation

use rand::{rngs::OsRng, Rng};

use super::config::OtpConfig;
use super::traits::RandomSource;

/// Operating system CSPRNG
///
/// `gen_range` rejects out-of-range samples, so indices carry no modulo bias
/// for alphabets whose size is not a power of two.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn uniform_index(&self, upper: usize) -> usize {
        OsRng.gen_range(0..upper)
    }
}

/// Builds codes of a fixed length from a fixed alphabet
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    alphabet: Vec<char>,
    length: usize,
}

impl CodeGenerator {
    /// Create a generator for an already validated configuration
    pub(crate) fn from_config(config: &OtpConfig) -> Self {
        Self {
            alphabet: config.alphabet.chars().collect(),
            length: config.length,
        }
    }

    /// Draw every character independently from the alphabet
    pub fn generate(&self, random: &dyn RandomSource) -> String {
        (0..self.length)
            .map(|_| self.alphabet[random.uniform_index(self.alphabet.len())])
            .collect()
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn length(&self) -> usize {
        self.length
    }
}
