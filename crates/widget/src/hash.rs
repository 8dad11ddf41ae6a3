//! Fake transaction hashes.

use rand::Rng;

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Length of a rendered hash including the `0x` prefix.
pub const HASH_LENGTH: usize = 66;

/// A random 32-byte-looking transaction hash: `0x` plus 64 lowercase hex
/// characters. Purely decorative, drawn fresh on every call.
#[must_use]
pub fn random_tx_hash() -> String {
    let mut rng = rand::rng();
    let mut hash = String::with_capacity(HASH_LENGTH);
    hash.push_str("0x");
    for _ in 0..64 {
        let nibble = rng.random_range(0..HEX.len());
        hash.push(HEX[nibble] as char);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape() {
        let hash = random_tx_hash();
        assert_eq!(hash.len(), HASH_LENGTH);
        assert!(hash.starts_with("0x"));
        assert!(
            hash[2..]
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        );
    }

    #[test]
    fn test_hashes_vary() {
        // 16^64 values; two identical draws mean the generator is broken.
        assert_ne!(random_tx_hash(), random_tx_hash());
    }
}
