use borsh::{BorshDeserialize, BorshSerialize};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::proto;

// =============================================================================
// Protocol constants (must match the engine)
// =============================================================================

/// Default session lifetime in seconds (30 days).
pub const SESSION_TTL: i64 = 60 * 60 * 24 * 30;

/// Size bound for encoded and signed actions on the session-based flow.
pub const MAX_ACTION_SIZE: usize = 1024;

/// Bound used by the legacy wallet-signed flow. Only reachable through
/// `ClientConfig::with_max_action_size`.
pub const LEGACY_MAX_ACTION_SIZE: usize = 100 * 1024;

/// Upper bound on sub-actions in one atomic batch.
pub const MAX_ATOMIC_ACTIONS: usize = 4;

// =============================================================================
// Pubkey - 32-byte public key
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, BorshSerialize, BorshDeserialize)]
pub struct Pubkey(pub [u8; 32]);

impl Pubkey {
    pub fn new_from_array(bytes: [u8; 32]) -> Self {
        Pubkey(bytes)
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", bs58::encode(&self.0).into_string())
    }
}

impl FromStr for Pubkey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| format!("Invalid base58: {}", e))?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| format!("Expected 32 bytes, got {}", b.len()))?;
        Ok(Pubkey(arr))
    }
}

impl AsRef<[u8]> for Pubkey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// =============================================================================
// User-facing SDK types
// =============================================================================

/// Side of an order (user-friendly version)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Buy,
    Sell,
}

impl From<Side> for proto::Side {
    fn from(side: Side) -> Self {
        match side {
            Side::Buy => proto::Side::Bid,
            Side::Sell => proto::Side::Ask,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// Quote-denominated limit in human units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSizeInput {
    pub size: Decimal,
    pub price: Decimal,
}

/// Decimal shifts a market uses on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarketScale {
    pub price_decimals: u32,
    pub size_decimals: u32,
}

/// An order to be placed, in human units.
///
/// A zero `price`/`size` means "not set"; at least one of price, size or
/// quote size must be given.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderParams {
    pub market_id: u32,
    pub scale: MarketScale,
    pub side: Side,
    pub fill_mode: proto::FillMode,
    pub is_reduce_only: bool,
    pub price: Decimal,
    pub size: Decimal,
    pub quote_size: Option<QuoteSizeInput>,
    pub client_order_id: Option<u64>,
}

impl Default for OrderParams {
    fn default() -> Self {
        Self {
            market_id: 0,
            scale: MarketScale::default(),
            side: Side::Buy,
            fill_mode: proto::FillMode::Limit,
            is_reduce_only: false,
            price: Decimal::ZERO,
            size: Decimal::ZERO,
            quote_size: None,
            client_order_id: None,
        }
    }
}

/// Price/size/quote-size limit after scaling to engine integers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderLimit {
    pub price: u64,
    pub size: u64,
    pub quote_size: Option<proto::QuoteSize>,
}

impl OrderLimit {
    /// A limit with nothing set cannot be matched and is rejected locally.
    pub fn is_empty(&self) -> bool {
        self.price == 0 && self.size == 0 && self.quote_size.is_none()
    }
}

/// One entry of an atomic batch.
#[derive(Debug, Clone, PartialEq)]
pub enum AtomicSubaction {
    Place(OrderParams),
    Cancel { order_id: u64 },
}

/// A stop-loss / take-profit trigger, in human units.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerParams {
    pub market_id: u32,
    pub price_decimals: u32,
    pub kind: proto::TriggerKind,
    pub side: Side,
    pub trigger_price: Decimal,
    pub limit_price: Option<Decimal>,
    pub account_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithdrawParams {
    pub token_id: u32,
    pub token_decimals: u32,
    pub amount: Decimal,
    /// Destination on the settlement chain; defaults to the owner's wallet.
    pub dest_pubkey: Option<Pubkey>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransferParams {
    pub from_account_id: u32,
    /// `None` opens a fresh account for the receiver.
    pub to_account_id: Option<u32>,
    pub token_id: u32,
    pub token_decimals: u32,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTokenParams {
    pub token_decimals: u32,
    pub weight_bps: u32,
    pub view_symbol: String,
    pub oracle_symbol: String,
    /// Mint address on the settlement chain.
    pub sol_addr: Pubkey,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateMarketParams {
    pub size_decimals: u32,
    pub price_decimals: u32,
    pub imf_bps: u32,
    pub cmf_bps: u32,
    pub mmf_bps: u32,
    pub market_type: proto::MarketType,
    pub view_symbol: String,
    pub oracle_symbol: String,
    pub base_token_id: u32,
}

/// Typed payload of a successful receipt plus the engine's action id.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome<T> {
    pub action_id: u64,
    pub result: T,
}

impl proto::PlaceOrderResult {
    /// Id of the resting remainder, if the order was posted to the book.
    pub fn order_id(&self) -> Option<u64> {
        self.posted.as_ref().map(|posted| posted.order_id)
    }

    /// Total filled size across all fills.
    pub fn filled_size(&self) -> u64 {
        self.fills.iter().map(|fill| fill.size).sum()
    }
}
