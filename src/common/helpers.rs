// Helper functions for safe logging

/// Masks key material for safe logging
/// Shows only first and last 4 characters
///
/// # Example
/// ```
/// let masked = safe_key_log("3f9a0c1d2e4b5a6978877665544332211");
/// // Returns: "3f9a...2211"
/// ```
pub fn safe_key_log(key: &str) -> String {
    if key.len() > 8 && key.is_ascii() {
        format!("{}...{}", &key[..4], &key[key.len() - 4..])
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_key_log_masks_middle() {
        let key = "0123456789abcdef0123456789abcdef";
        assert_eq!(safe_key_log(key), "0123...cdef");
    }

    #[test]
    fn test_safe_key_log_hides_short_values() {
        assert_eq!(safe_key_log("abc123"), "***");
        assert_eq!(safe_key_log(""), "***");
    }
}
