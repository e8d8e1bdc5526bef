//! Short code generation and validation utilities.
//!
//! Generates random codes over a configurable alphabet and validates
//! caller-supplied custom codes.

use rand::Rng;
use thiserror::Error;

use crate::domain::errors::ShortenError;

/// Default code alphabet: `[A-Za-z0-9]`, 62 symbols.
pub const DEFAULT_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Maximum length of a caller-supplied custom code.
pub const MAX_CUSTOM_CODE_LENGTH: usize = 64;

/// Reserved codes that cannot be used as short links.
///
/// These collide with fixed routes of the HTTP surface.
const RESERVED_CODES: &[&str] = &["api", "health", "metrics", "qr", "static"];

/// Errors raised when building a [`CodeGenerator`] from an alphabet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlphabetError {
    #[error("alphabet must contain at least one symbol")]
    Empty,

    #[error("alphabet symbol {0:?} is not URL-safe (allowed: A-Z, a-z, 0-9, '-', '_')")]
    InvalidSymbol(char),
}

/// Produces random fixed-length codes from an alphabet.
///
/// Holds no mutable state: each call draws from the thread-local RNG, so a
/// single generator can be shared freely between tasks.
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    symbols: Vec<char>,
}

impl CodeGenerator {
    /// Builds a generator over `alphabet`. Duplicate symbols are dropped so
    /// every distinct symbol is equally likely.
    ///
    /// # Errors
    ///
    /// Returns [`AlphabetError`] if the alphabet is empty or contains a
    /// character that is not URL-safe.
    pub fn new(alphabet: &str) -> Result<Self, AlphabetError> {
        let mut symbols: Vec<char> = Vec::with_capacity(alphabet.len());

        for c in alphabet.chars() {
            if !is_code_char(c) {
                return Err(AlphabetError::InvalidSymbol(c));
            }
            if !symbols.contains(&c) {
                symbols.push(c);
            }
        }

        if symbols.is_empty() {
            return Err(AlphabetError::Empty);
        }

        Ok(Self { symbols })
    }

    /// Number of distinct symbols.
    pub fn alphabet_size(&self) -> usize {
        self.symbols.len()
    }

    /// Generates a code of exactly `length` symbols, each drawn uniformly.
    ///
    /// No uniqueness guarantee; that is the allocator's job.
    pub fn generate(&self, length: usize) -> String {
        let mut rng = rand::rng();
        (0..length)
            .map(|_| self.symbols[rng.random_range(0..self.symbols.len())])
            .collect()
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_ALPHABET.chars().collect(),
        }
    }
}

fn is_code_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters, digits, hyphens, underscores
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`ShortenError::InvalidCode`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), ShortenError> {
    if code.is_empty() || code.len() > MAX_CUSTOM_CODE_LENGTH {
        return Err(ShortenError::InvalidCode(format!(
            "custom code must be 1-{MAX_CUSTOM_CODE_LENGTH} characters"
        )));
    }

    if !code.chars().all(is_code_char) {
        return Err(ShortenError::InvalidCode(
            "custom code can only contain letters, digits, '-' and '_'".to_string(),
        ));
    }

    if is_reserved(code) {
        return Err(ShortenError::InvalidCode(format!(
            "'{code}' is reserved"
        )));
    }

    Ok(())
}

/// Returns `true` if `code` collides with a fixed route.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_alphabet_has_62_unique_symbols() {
        let generator = CodeGenerator::default();
        assert_eq!(generator.alphabet_size(), 62);

        let unique: HashSet<char> = DEFAULT_ALPHABET.chars().collect();
        assert_eq!(unique.len(), 62);
    }

    #[test]
    fn test_generate_has_requested_length() {
        let generator = CodeGenerator::default();
        for length in [1, 6, 12] {
            assert_eq!(generator.generate(length).chars().count(), length);
        }
    }

    #[test]
    fn test_generate_zero_length_is_empty() {
        assert!(CodeGenerator::default().generate(0).is_empty());
    }

    #[test]
    fn test_generate_uses_only_alphabet_symbols() {
        let generator = CodeGenerator::new("xyz").unwrap();
        for _ in 0..100 {
            let code = generator.generate(8);
            assert!(code.chars().all(|c| "xyz".contains(c)));
        }
    }

    #[test]
    fn test_generate_produces_unique_codes() {
        let generator = CodeGenerator::default();
        let codes: HashSet<String> = (0..1000).map(|_| generator.generate(12)).collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generate_covers_small_alphabet() {
        let generator = CodeGenerator::new("ab").unwrap();
        let seen: HashSet<String> = (0..200).map(|_| generator.generate(1)).collect();
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_new_removes_duplicates() {
        let generator = CodeGenerator::new("aabbc").unwrap();
        assert_eq!(generator.alphabet_size(), 3);
    }

    #[test]
    fn test_new_rejects_empty_alphabet() {
        assert_eq!(CodeGenerator::new("").unwrap_err(), AlphabetError::Empty);
    }

    #[test]
    fn test_new_rejects_unsafe_symbols() {
        assert_eq!(
            CodeGenerator::new("ab/").unwrap_err(),
            AlphabetError::InvalidSymbol('/')
        );
        assert!(CodeGenerator::new("a b").is_err());
    }

    #[test]
    fn test_validate_accepts_simple_codes() {
        assert!(validate_custom_code("abc").is_ok());
        assert!(validate_custom_code("My-Link_2024").is_ok());
        assert!(validate_custom_code("1").is_ok());
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(matches!(
            validate_custom_code(""),
            Err(ShortenError::InvalidCode(_))
        ));
    }

    #[test]
    fn test_validate_rejects_too_long() {
        let code = "a".repeat(MAX_CUSTOM_CODE_LENGTH + 1);
        assert!(validate_custom_code(&code).is_err());

        let code = "a".repeat(MAX_CUSTOM_CODE_LENGTH);
        assert!(validate_custom_code(&code).is_ok());
    }

    #[test]
    fn test_validate_rejects_special_characters() {
        assert!(validate_custom_code("my code").is_err());
        assert!(validate_custom_code("a/b").is_err());
        assert!(validate_custom_code("caf\u{e9}").is_err());
    }

    #[test]
    fn test_validate_all_reserved_codes() {
        for &reserved in RESERVED_CODES {
            let result = validate_custom_code(reserved);
            assert!(
                result.is_err(),
                "Reserved code '{}' should be invalid",
                reserved
            );
        }
    }

    #[test]
    fn test_is_reserved_is_case_sensitive() {
        assert!(is_reserved("health"));
        assert!(!is_reserved("Health"));
        assert!(!is_reserved("healthy"));
    }
}
