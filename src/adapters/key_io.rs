use crate::core::keystore::KeyPair;
use crate::utils::error::{Result, VotifierError};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::path::Path;

const PUBLIC_KEY_FILE: &str = "public.pem";
const PRIVATE_KEY_FILE: &str = "private.pem";

/// Generates a fresh RSA key pair. 2048 bits is the conventional size for
/// this protocol (one 256-byte block on the wire).
pub fn generate(bits: usize) -> Result<KeyPair> {
    let mut rng = rand::thread_rng();
    let private_key = RsaPrivateKey::new(&mut rng, bits)
        .map_err(|e| VotifierError::key(format!("key generation failed: {}", e)))?;
    let public_key = RsaPublicKey::from(&private_key);

    Ok(KeyPair {
        public_key,
        private_key,
    })
}

/// Writes the pair as PEM files (`public.pem`, `private.pem`) under `dir`,
/// creating the directory if needed. The public file is what operators hand
/// out to voting sites.
pub fn save(dir: &Path, key_pair: &KeyPair) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    let public_pem = key_pair
        .public_key
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| VotifierError::key(format!("public key encoding failed: {}", e)))?;
    std::fs::write(dir.join(PUBLIC_KEY_FILE), public_pem)?;

    let private_pem = key_pair
        .private_key
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| VotifierError::key(format!("private key encoding failed: {}", e)))?;
    std::fs::write(dir.join(PRIVATE_KEY_FILE), private_pem.as_bytes())?;

    Ok(())
}

pub fn load(dir: &Path) -> Result<KeyPair> {
    let public_pem = std::fs::read_to_string(dir.join(PUBLIC_KEY_FILE))?;
    let public_key = RsaPublicKey::from_public_key_pem(&public_pem)
        .map_err(|e| VotifierError::key(format!("unreadable public key: {}", e)))?;

    let private_pem = std::fs::read_to_string(dir.join(PRIVATE_KEY_FILE))?;
    let private_key = RsaPrivateKey::from_pkcs8_pem(&private_pem)
        .map_err(|e| VotifierError::key(format!("unreadable private key: {}", e)))?;

    Ok(KeyPair {
        public_key,
        private_key,
    })
}

/// First run generates and persists a pair; later runs load the saved one.
pub fn load_or_generate(dir: &Path, bits: usize) -> Result<KeyPair> {
    if dir.join(PRIVATE_KEY_FILE).exists() {
        tracing::info!("Loading RSA keys from {}", dir.display());
        load(dir)
    } else {
        tracing::info!("No RSA keys found, generating a {}-bit pair", bits);
        let key_pair = generate(bits)?;
        save(dir, &key_pair)?;
        tracing::info!("RSA keys saved to {}", dir.display());
        Ok(key_pair)
    }
}
