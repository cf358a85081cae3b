//! Signed message composition.
//!
//! A signed action is always `encoded_action ++ auth_tag`. The tag is either
//! a raw session-key signature over the encoded bytes, or a wallet
//! signature over a structured message derived from them. The tag length
//! depends on the signer; nothing here assumes a fixed size.

use async_trait::async_trait;
use borsh::BorshSerialize;
use sha2::{Digest, Sha256};

use crate::error::{Result, SdkError};
use crate::keypair::NordKeypair;
use crate::types::Pubkey;

// =============================================================================
// Signing prefix (must match engine)
// =============================================================================

const WALLET_SIGNING_PREFIX: &[u8] = b"NORD_ACTION:";

/// Structured message a wallet signs instead of the raw action bytes.
#[derive(Debug, Clone, BorshSerialize)]
struct WalletEnvelope {
    signer: Pubkey,
    payload_len: u32,
    payload_hash: [u8; 32],
}

// =============================================================================
// Signer seams
// =============================================================================

/// Signs routine trading actions with a delegated session key.
#[async_trait]
pub trait SessionSigner: Send + Sync {
    async fn sign_session(&self, message: &[u8]) -> Result<Vec<u8>>;
}

/// Signs with the long-lived account key. Implement this for hardware or
/// remote wallets.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Public key the signature is bound to.
    fn identity(&self) -> Pubkey;

    async fn sign_wallet(&self, message: &[u8]) -> Result<Vec<u8>>;
}

#[async_trait]
impl SessionSigner for NordKeypair {
    async fn sign_session(&self, message: &[u8]) -> Result<Vec<u8>> {
        Ok(self.sign(message).to_vec())
    }
}

#[async_trait]
impl WalletSigner for NordKeypair {
    fn identity(&self) -> Pubkey {
        self.pubkey()
    }

    async fn sign_wallet(&self, message: &[u8]) -> Result<Vec<u8>> {
        Ok(self.sign(message).to_vec())
    }
}

/// Which key authenticates an action.
#[derive(Clone, Copy)]
pub enum Signing<'a> {
    Session(&'a dyn SessionSigner),
    Wallet(&'a dyn WalletSigner),
}

impl Signing<'_> {
    pub fn mode(&self) -> &'static str {
        match self {
            Signing::Session(_) => "session",
            Signing::Wallet(_) => "wallet",
        }
    }
}

// =============================================================================
// Composition
// =============================================================================

/// Message a wallet signs for `encoded`: hex(SHA256(PREFIX ++ borsh(envelope)))
/// as UTF-8 bytes.
pub fn wallet_message(encoded: &[u8], signer: &Pubkey) -> Result<Vec<u8>> {
    let payload_len = u32::try_from(encoded.len())
        .map_err(|_| SdkError::Signing(format!("payload of {} bytes", encoded.len())))?;
    let envelope = WalletEnvelope {
        signer: *signer,
        payload_len,
        payload_hash: Sha256::digest(encoded).into(),
    };

    let mut data = WALLET_SIGNING_PREFIX.to_vec();
    data.extend(
        envelope
            .try_to_vec()
            .map_err(|e| SdkError::Serialization(format!("Borsh serialization failed: {}", e)))?,
    );

    let hex_string = hex::encode(Sha256::digest(&data));
    tracing::debug!("Wallet signing message: {}", hex_string);
    Ok(hex_string.into_bytes())
}

fn append_tag(encoded: &[u8], tag: Vec<u8>) -> Result<Vec<u8>> {
    if tag.is_empty() {
        return Err(SdkError::Signing("signer returned an empty signature".to_string()));
    }
    let mut signed = Vec::with_capacity(encoded.len() + tag.len());
    signed.extend_from_slice(encoded);
    signed.extend(tag);
    Ok(signed)
}

pub async fn sign_session_payload(encoded: &[u8], signer: &dyn SessionSigner) -> Result<Vec<u8>> {
    let tag = signer.sign_session(encoded).await?;
    append_tag(encoded, tag)
}

pub async fn sign_wallet_payload(encoded: &[u8], signer: &dyn WalletSigner) -> Result<Vec<u8>> {
    let message = wallet_message(encoded, &signer.identity())?;
    let tag = signer.sign_wallet(&message).await?;
    append_tag(encoded, tag)
}

/// Append the authentication tag for `signing` to `encoded`.
pub async fn sign_action(encoded: &[u8], signing: Signing<'_>) -> Result<Vec<u8>> {
    match signing {
        Signing::Session(signer) => sign_session_payload(encoded, signer).await,
        Signing::Wallet(signer) => sign_wallet_payload(encoded, signer).await,
    }
}
