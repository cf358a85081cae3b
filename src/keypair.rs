use ed25519_dalek::{Keypair, PublicKey, SecretKey, Signature, Signer, Verifier};
use std::fs;

use crate::error::{Result, SdkError};
use crate::types::Pubkey;

/// An ed25519 keypair used either as a long-lived wallet key or as a
/// short-lived session key.
pub struct NordKeypair {
    inner: Keypair,
}

impl NordKeypair {
    /// Load a keypair from a JSON file holding a 64-byte array
    /// (`[secret..32, public..32]`, the Solana CLI layout).
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| SdkError::Keypair(format!("Failed to read file '{}': {}", path, e)))?;

        let bytes: Vec<u8> = serde_json::from_str(&content)
            .map_err(|e| SdkError::Keypair(format!("Failed to parse JSON: {}", e)))?;

        Self::from_slice(&bytes)
    }

    /// Create a keypair from either a 64-byte keypair or a 32-byte secret.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        match bytes.len() {
            64 => {
                let inner = Keypair::from_bytes(bytes)
                    .map_err(|e| SdkError::Keypair(format!("Invalid keypair bytes: {}", e)))?;
                Ok(Self { inner })
            }
            32 => Self::from_secret(bytes),
            n => Err(SdkError::Keypair(format!(
                "Keypair must be 32 or 64 bytes, got {}",
                n
            ))),
        }
    }

    /// Create a keypair from a base58-encoded 32-byte secret or 64-byte keypair.
    pub fn from_base58(encoded: &str) -> Result<Self> {
        let bytes = bs58::decode(encoded)
            .into_vec()
            .map_err(|e| SdkError::Keypair(format!("Invalid base58: {}", e)))?;
        Self::from_slice(&bytes)
    }

    fn from_secret(secret_bytes: &[u8]) -> Result<Self> {
        let secret = SecretKey::from_bytes(secret_bytes)
            .map_err(|e| SdkError::Keypair(format!("Invalid secret key: {}", e)))?;
        let public = PublicKey::from(&secret);
        Ok(Self {
            inner: Keypair { secret, public },
        })
    }

    /// Generate a fresh random keypair, e.g. for a new session.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng {};
        Self {
            inner: Keypair::generate(&mut csprng),
        }
    }

    pub fn pubkey(&self) -> Pubkey {
        Pubkey::new_from_array(self.inner.public.to_bytes())
    }

    pub fn pubkey_string(&self) -> String {
        self.pubkey().to_string()
    }

    /// Sign a message and return the raw 64-byte signature.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.inner.sign(message).to_bytes()
    }

    /// Check a signature produced by this key.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        Signature::try_from(signature)
            .map(|sig| self.inner.public.verify(message, &sig).is_ok())
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for NordKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NordKeypair")
            .field("pubkey", &self.pubkey_string())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let keypair = NordKeypair::generate();
        let signature = keypair.sign(b"place order");
        assert_eq!(signature.len(), 64);
        assert!(keypair.verify(b"place order", &signature));
        assert!(!keypair.verify(b"cancel order", &signature));
    }

    #[test]
    fn test_secret_roundtrip_through_base58() {
        let keypair = NordKeypair::generate();
        let secret = keypair.inner.secret.to_bytes();
        let restored = NordKeypair::from_base58(&bs58::encode(secret).into_string()).unwrap();
        assert_eq!(restored.pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = NordKeypair::from_slice(&[7u8; 40]).unwrap_err();
        assert!(err.to_string().contains("got 40"));
    }
}
