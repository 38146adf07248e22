// src/services/key_material.rs
use rand::{rngs::OsRng, RngCore};

/// AES-256 key length in bytes
pub const KEY_LEN: usize = 32;

/// Length of a hex-encoded key
pub const KEY_HEX_LEN: usize = KEY_LEN * 2;

/// Generate a new random encryption key (lowercase hex)
pub fn generate_key() -> String {
    let mut key = [0u8; KEY_LEN];
    OsRng.fill_bytes(&mut key);
    hex::encode(key)
}

/// True for exactly 64 lowercase hex characters
pub fn is_valid_key(value: &str) -> bool {
    value.len() == KEY_HEX_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_key() {
        let key = generate_key();
        assert_eq!(key.len(), 64);
        assert!(is_valid_key(&key));

        let bytes = hex::decode(&key).unwrap();
        assert_eq!(bytes.len(), KEY_LEN);
    }

    #[test]
    fn test_generated_keys_are_unique() {
        let keys: HashSet<String> = (0..100).map(|_| generate_key()).collect();
        assert_eq!(keys.len(), 100);
    }

    #[test]
    fn test_invalid_key_format() {
        assert!(!is_valid_key("abc123"));
        assert!(!is_valid_key(&"A".repeat(64)));
        assert!(!is_valid_key(&"g".repeat(64)));
        assert!(!is_valid_key(&"a".repeat(65)));
    }
}
