// ダイジェスト計算の具象実装

use crate::core::Digester;
use anyhow::Result;
use sha1::{Digest, Sha1};
use sha2::Sha256;

/// SHA-1ダイジェスト（40桁の小文字16進）
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha1Digester;

impl Sha1Digester {
    pub fn new() -> Self {
        Self
    }
}

impl Digester for Sha1Digester {
    fn algorithm(&self) -> &'static str {
        "sha1"
    }

    fn digest_hex(&self, data: &[u8]) -> Result<String> {
        let mut hasher = Sha1::new();
        hasher.update(data);
        Ok(hex::encode(hasher.finalize()))
    }
}

/// SHA-256ダイジェスト（64桁の小文字16進）
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256Digester;

impl Sha256Digester {
    pub fn new() -> Self {
        Self
    }
}

impl Digester for Sha256Digester {
    fn algorithm(&self) -> &'static str {
        "sha256"
    }

    fn digest_hex(&self, data: &[u8]) -> Result<String> {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Ok(hex::encode(hasher.finalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha1_known_vectors() {
        let digester = Sha1Digester::new();

        assert_eq!(
            digester.digest_hex(b"").unwrap(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
        assert_eq!(
            digester.digest_hex(b"abc").unwrap(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(digester.algorithm(), "sha1");
    }

    #[test]
    fn test_sha256_known_vectors() {
        let digester = Sha256Digester::new();

        assert_eq!(
            digester.digest_hex(b"abc").unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(digester.algorithm(), "sha256");
    }

    #[test]
    fn test_digest_is_lowercase_fixed_length() {
        let sha1 = Sha1Digester::new().digest_hex(b"content1").unwrap();
        let sha256 = Sha256Digester::new().digest_hex(b"content1").unwrap();

        assert_eq!(sha1.len(), 40);
        assert_eq!(sha256.len(), 64);
        assert_eq!(sha1, sha1.to_lowercase());
        assert_eq!(sha256, sha256.to_lowercase());
    }

    #[test]
    fn test_digest_is_deterministic() {
        let digester = Sha1Digester::new();
        assert_eq!(
            digester.digest_hex(b"x").unwrap(),
            digester.digest_hex(b"x").unwrap()
        );
        assert_ne!(
            digester.digest_hex(b"x").unwrap(),
            digester.digest_hex(b"y").unwrap()
        );
    }
}
