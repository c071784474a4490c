//! Encrypted on-disk store for the API key
//!
//! A random 256-bit key is generated into the key file the first time a
//! secret is saved. The secret file holds `base64(nonce || ciphertext)` from
//! AES-256-GCM under that key.

use crate::config::KeyStoreConfig;
use crate::error::KeyStoreError;
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::RngCore;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

/// Persists one secret (the API key) encrypted at rest
#[derive(Debug, Clone)]
pub struct KeyStore {
    config: KeyStoreConfig,
}

impl KeyStore {
    pub fn new(config: KeyStoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KeyStoreConfig {
        &self.config
    }

    /// Encrypt and write `secret`, creating the key file if needed
    pub fn save(&self, secret: &str) -> Result<(), KeyStoreError> {
        let key = self.get_or_create_key()?;
        let token = encrypt(&key, secret)?;

        fs::create_dir_all(&self.config.dir)?;
        write_private(&self.config.secret_path(), token.as_bytes())?;

        info!("[KeyStore] Saved encrypted API key to {}", self.config.secret_path().display());
        Ok(())
    }

    /// Stored secret, or an empty string.
    ///
    /// Never fails: missing files, a corrupt token or a mismatched key all
    /// read as "no credential configured".
    pub fn load(&self) -> String {
        match self.try_load() {
            Ok(Some(secret)) => secret,
            Ok(None) => String::new(),
            Err(e) => {
                debug!("[KeyStore] Could not decrypt stored API key: {}", e);
                String::new()
            }
        }
    }

    /// Whether a non-empty credential is stored and decryptable
    pub fn has_secret(&self) -> bool {
        !self.load().is_empty()
    }

    fn try_load(&self) -> Result<Option<String>, KeyStoreError> {
        let secret_path = self.config.secret_path();
        if !secret_path.exists() || !self.config.key_path().exists() {
            return Ok(None);
        }

        let key = self.read_key()?;
        let token = fs::read_to_string(&secret_path)?;
        decrypt(&key, token.trim()).map(Some)
    }

    fn get_or_create_key(&self) -> Result<[u8; KEY_LEN], KeyStoreError> {
        if self.config.key_path().exists() {
            return self.read_key();
        }

        let mut key = [0u8; KEY_LEN];
        rand::thread_rng().fill_bytes(&mut key);

        fs::create_dir_all(&self.config.dir)?;
        write_private(&self.config.key_path(), STANDARD.encode(key).as_bytes())?;

        info!("[KeyStore] Generated new encryption key at {}", self.config.key_path().display());
        Ok(key)
    }

    fn read_key(&self) -> Result<[u8; KEY_LEN], KeyStoreError> {
        let encoded = fs::read_to_string(self.config.key_path())?;
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| KeyStoreError::Crypto(format!("key file is not base64: {}", e)))?;
        bytes
            .try_into()
            .map_err(|b: Vec<u8>| KeyStoreError::Crypto(format!("key file holds {} bytes, expected {}", b.len(), KEY_LEN)))
    }
}

fn encrypt(key_bytes: &[u8; KEY_LEN], plaintext: &str) -> Result<String, KeyStoreError> {
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key_bytes));
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
        .map_err(|e| KeyStoreError::Crypto(e.to_string()))?;

    let mut token = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    token.extend_from_slice(&nonce_bytes);
    token.extend_from_slice(&ciphertext);
    Ok(STANDARD.encode(token))
}

fn decrypt(key_bytes: &[u8; KEY_LEN], token: &str) -> Result<String, KeyStoreError> {
    let raw = STANDARD
        .decode(token)
        .map_err(|e| KeyStoreError::Crypto(format!("token is not base64: {}", e)))?;
    if raw.len() <= NONCE_LEN {
        return Err(KeyStoreError::Crypto("token too short".to_string()));
    }
    let (nonce, ciphertext) = raw.split_at(NONCE_LEN);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key_bytes));
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| KeyStoreError::Crypto("decryption failed - wrong key or corrupt token".to_string()))?;

    String::from_utf8(plaintext).map_err(|e| KeyStoreError::Crypto(format!("invalid UTF-8 in secret: {}", e)))
}

#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> Result<(), KeyStoreError> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(contents)?;
    Ok(())
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> Result<(), KeyStoreError> {
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("gamba-deck-test-{}", uuid::Uuid::new_v4()))
    }

    struct Cleanup(PathBuf);

    impl Drop for Cleanup {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn store() -> (KeyStore, Cleanup) {
        let dir = temp_dir();
        (KeyStore::new(KeyStoreConfig::in_dir(&dir)), Cleanup(dir))
    }

    #[test]
    fn test_load_on_fresh_dir_is_empty() {
        let (store, _cleanup) = store();
        assert_eq!(store.load(), "");
        assert!(!store.has_secret());
        assert!(!store.config().key_path().exists());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let (store, _cleanup) = store();
        let secret = "sk-or-v1-0123456789abcdef";

        store.save(secret).unwrap();
        assert_eq!(store.load(), secret);
        assert!(store.has_secret());
    }

    #[test]
    fn test_secret_is_not_stored_in_plaintext() {
        let (store, _cleanup) = store();
        store.save("sk-or-v1-plaintext-check").unwrap();

        let on_disk = fs::read_to_string(store.config().secret_path()).unwrap();
        assert!(!on_disk.contains("sk-or-v1-plaintext-check"));
    }

    #[test]
    fn test_key_is_reused_across_saves() {
        let (store, _cleanup) = store();
        store.save("first").unwrap();
        let key_before = fs::read(store.config().key_path()).unwrap();

        store.save("second").unwrap();
        let key_after = fs::read(store.config().key_path()).unwrap();

        assert_eq!(key_before, key_after);
        assert_eq!(store.load(), "second");
    }

    #[test]
    fn test_corrupt_secret_loads_empty() {
        let (store, _cleanup) = store();
        store.save("sk-or-v1-abc").unwrap();
        fs::write(store.config().secret_path(), "definitely not a token").unwrap();

        assert_eq!(store.load(), "");
    }

    #[test]
    fn test_wrong_key_loads_empty() {
        let (store, _cleanup) = store();
        store.save("sk-or-v1-abc").unwrap();

        let other_key = STANDARD.encode([7u8; KEY_LEN]);
        fs::write(store.config().key_path(), other_key).unwrap();

        assert_eq!(store.load(), "");
    }

    #[test]
    fn test_unicode_round_trip() {
        let (store, _cleanup) = store();
        store.save("ключ-🔑").unwrap();
        assert_eq!(store.load(), "ключ-🔑");
    }
}
