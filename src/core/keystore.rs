use crate::utils::error::{Result, VotifierError};
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};

/// An RSA key pair. The public half is what voting sites encrypt with; the
/// private half never leaves this process.
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
}

/// Holds the key pair and performs single-block PKCS#1 v1.5 decryption.
/// Read-only after construction, safe to share across connection tasks.
pub struct KeyStore {
    key_pair: KeyPair,
    block_size: usize,
}

impl KeyStore {
    pub fn new(key_pair: KeyPair) -> Self {
        use rsa::traits::PublicKeyParts;

        let block_size = key_pair.public_key.size();
        Self {
            key_pair,
            block_size,
        }
    }

    /// Size in bytes of one encrypted block (the key's modulus size, 256 for
    /// a 2048-bit key). Submissions are exactly one block long.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.key_pair.public_key
    }

    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.len() != self.block_size {
            return Err(VotifierError::crypto(format!(
                "ciphertext is {} bytes, expected exactly {}",
                ciphertext.len(),
                self.block_size
            )));
        }

        self.key_pair
            .private_key
            .decrypt(Pkcs1v15Encrypt, ciphertext)
            .map_err(|e| VotifierError::crypto(format!("block rejected: {}", e)))
    }
}
