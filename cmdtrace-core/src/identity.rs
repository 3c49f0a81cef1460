// cmdtrace-core/src/identity.rs
//! One-way hashing of identifying fields before they leave the machine.

use sha2::{Digest, Sha512};

/// Lowercase hex SHA-512 digest of `value`.
pub fn hash_identity(value: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_identity_is_stable_hex() {
        let h1 = hash_identity("my-laptop");
        let h2 = hash_identity("my-laptop");
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 128);
        assert!(h1.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_hash_identity_known_vector() {
        assert_eq!(
            hash_identity("abc"),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }
}
