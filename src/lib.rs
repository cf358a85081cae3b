//! # Nord Trade SDK
//!
//! A Rust SDK for the Nord trading engine's action protocol: building
//! actions, signing them with a wallet or session key, sending them and
//! interpreting the receipts.
//!
//! ## Features
//!
//! - Typed builders for every engine action, user and admin
//! - Session keys: the wallet signs once, the session key signs trading
//! - Atomic batches of up to four place/cancel sub-actions
//! - Human-readable decimal prices and sizes with exact scaling
//! - Pluggable transport and signers for testing or hardware wallets
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nord_trade_sdk::{ClientConfig, MarketScale, NordClient, NordKeypair, OrderParams, Side};
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Load wallet keypair from file
//!     let wallet = NordKeypair::from_file("./my_keypair.json")?;
//!
//!     // Uses NORD_WEB_SERVER_URL env var, or defaults to localhost
//!     let mut client = NordClient::new(wallet, ClientConfig::default())?;
//!
//!     // Wallet-signed; later actions are signed by the session key
//!     client.create_session(None).await?;
//!
//!     let order = OrderParams {
//!         market_id: 0,
//!         scale: MarketScale { price_decimals: 2, size_decimals: 3 },
//!         side: Side::Buy,
//!         price: Decimal::new(18550, 2),
//!         size: Decimal::ONE,
//!         ..Default::default()
//!     };
//!
//!     let placed = client.place_order(&order, None).await?;
//!     println!("Order placed: {:?}", placed.result.order_id());
//!
//!     Ok(())
//! }
//! ```

// Protocol layers
pub mod action;
pub mod atomic;
pub mod proto;
pub mod receipt;
pub mod signing;
pub mod transport;

// Internal modules
mod admin;
mod client;
mod error;
mod keypair;
mod scale;
mod session;
mod types;

// Re-export public API
pub use admin::NordAdmin;
pub use client::{ClientConfig, NordClient, TimestampSource};
pub use error::{Result, SdkError};
pub use keypair::NordKeypair;
pub use receipt::EngineError;
pub use scale::{from_scaled, to_scaled_u128, to_scaled_u64};
pub use session::{NonceCounter, Session};
pub use signing::{SessionSigner, Signing, WalletSigner};
pub use transport::{ActionTransport, HttpTransport};
pub use types::{
    // Order types
    AtomicSubaction,
    MarketScale,
    OrderLimit,
    OrderParams,
    QuoteSizeInput,
    Side,
    TriggerParams,
    // Account types
    TransferParams,
    WithdrawParams,
    // Admin types
    CreateMarketParams,
    CreateTokenParams,
    // Results
    ActionOutcome,
    // Pubkey
    Pubkey,
    // Constants
    LEGACY_MAX_ACTION_SIZE,
    MAX_ACTION_SIZE,
    MAX_ATOMIC_ACTIONS,
    SESSION_TTL,
};
