//! Ephemeral session state: the delegated signing key, the engine-assigned
//! session id, and the nonce counter. Nothing here is persisted.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Result, SdkError};
use crate::keypair::NordKeypair;
use crate::types::Pubkey;

/// Hands out each `u32` nonce at most once, in increasing order, then fails.
#[derive(Debug)]
pub struct NonceCounter {
    next: AtomicU64,
}

impl NonceCounter {
    pub fn new(start: u32) -> Self {
        Self {
            next: AtomicU64::new(u64::from(start)),
        }
    }

    /// Safe to call from concurrent tasks: every caller gets a distinct value.
    pub fn next(&self) -> Result<u32> {
        self.next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n <= u64::from(u32::MAX)).then(|| n + 1)
            })
            .ok()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| {
                SdkError::Validation(
                    "nonce space exhausted, start a new session".to_string(),
                )
            })
    }
}

#[derive(Debug)]
pub struct Session {
    keypair: NordKeypair,
    session_id: Option<u64>,
    nonce: NonceCounter,
}

impl Session {
    /// Start a session around `keypair`. `nonce_start` is the first nonce
    /// handed out.
    pub fn new(keypair: NordKeypair, nonce_start: u32) -> Self {
        Self {
            keypair,
            session_id: None,
            nonce: NonceCounter::new(nonce_start),
        }
    }

    pub fn keypair(&self) -> &NordKeypair {
        &self.keypair
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    pub fn session_id(&self) -> Option<u64> {
        self.session_id
    }

    pub fn set_session_id(&mut self, session_id: u64) {
        self.session_id = Some(session_id);
    }

    pub fn clear_session_id(&mut self) {
        self.session_id = None;
    }

    /// Session id for session-signed actions, or a validation error before
    /// CreateSession has succeeded.
    pub fn require_session_id(&self) -> Result<u64> {
        self.session_id.ok_or_else(|| {
            SdkError::Validation("no active session, call create_session first".to_string())
        })
    }

    /// Next nonce for an action signed in this session.
    pub fn next_nonce(&self) -> Result<u32> {
        self.nonce.next()
    }
}
