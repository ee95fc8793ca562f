// ABOUTME: API key generation for uls.
// ABOUTME: Keys are a fixed "uls_" prefix followed by 16 bytes of OS randomness as lowercase hex.

use rand::RngCore;
use rand::rngs::OsRng;

pub const API_KEY_PREFIX: &str = "uls_";

const API_KEY_RANDOM_BYTES: usize = 16;

/// Generate a fresh API key from the operating system CSPRNG.
pub fn generate_api_key() -> String {
    let mut bytes = [0u8; API_KEY_RANDOM_BYTES];
    OsRng.fill_bytes(&mut bytes);
    format!("{}{}", API_KEY_PREFIX, hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_has_prefix_and_32_lowercase_hex_chars() {
        let key = generate_api_key();
        let suffix = key.strip_prefix("uls_").expect("key should carry the uls_ prefix");

        assert_eq!(suffix.len(), 32);
        assert!(
            suffix.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)),
            "suffix should be lowercase hex: {}",
            suffix
        );
    }

    #[test]
    fn keys_are_distinct() {
        assert_ne!(generate_api_key(), generate_api_key());
    }
}
