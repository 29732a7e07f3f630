//! Share code generation.

use rand::RngExt;

use droplink_core::types::code::{CODE_ALPHABET, CODE_LENGTH, ShareCode};

/// Generates random share codes.
///
/// Each code is a uniform draw from the 32-symbol alphabet; the code space
/// holds roughly 1.07 billion combinations, so collisions are rare at low
/// volume and handled by retrying the insert.
#[derive(Debug, Clone)]
pub struct CodeGenerator;

impl CodeGenerator {
    /// Creates a new code generator.
    pub fn new() -> Self {
        Self
    }

    /// Generates a random share code.
    pub fn generate(&self) -> ShareCode {
        let mut rng = rand::rng();
        let mut bytes = [0u8; CODE_LENGTH];
        for byte in &mut bytes {
            *byte = CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())];
        }
        ShareCode::from_alphabet_bytes(bytes)
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}
