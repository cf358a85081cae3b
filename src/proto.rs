//! Nord engine wire schema.
//!
//! Every action and receipt travels as a length-delimited protobuf message.
//! Field tags here MUST match the engine exactly; reordering or renumbering
//! breaks compatibility.

// =============================================================================
// Enumerations
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Side {
    Ask = 0,
    Bid = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum FillMode {
    Limit = 0,
    PostOnly = 1,
    ImmediateOrCancel = 2,
    FillOrKill = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum TriggerKind {
    StopLoss = 0,
    TakeProfit = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum MarketType {
    Spot = 0,
    Perpetual = 1,
}

/// Engine error codes carried by `receipt::Kind::Err`.
///
/// The engine versions this table independently of the SDK, so codes not
/// listed here can still arrive on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ErrorCode {
    Duplicate = 0,
    DecodeFailure = 1,
    InvalidSignature = 2,
    ActionTooLarge = 3,
    StaleTimestamp = 4,
    InvalidNonce = 5,
    SessionNotFound = 6,
    SessionExpired = 7,
    ExpiryInPast = 8,
    UserNotFound = 9,
    AccountNotFound = 10,
    Unauthorized = 11,
    MarketNotFound = 12,
    MarketFrozen = 13,
    TokenNotFound = 14,
    EnginePaused = 15,
    InsufficientMargin = 16,
    InsufficientBalance = 17,
    OrderNotFound = 18,
    InvalidPrice = 19,
    InvalidSize = 20,
    InvalidQuoteSize = 21,
    PostOnlyWouldTrade = 22,
    FillOrKillNotFilled = 23,
    ReduceOnlyViolation = 24,
    TooManyOrders = 25,
    AtomicTooManyActions = 26,
    AtomicOrderingViolation = 27,
    TriggerNotFound = 28,
    TriggerLimitReached = 29,
    FeeTierNotFound = 30,
    InvalidAclRoles = 31,
    OracleUnavailable = 32,
    InvalidGuardianSet = 33,
    AmountTooSmall = 34,
}

impl ErrorCode {
    /// Symbolic name as the engine reports it.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::Duplicate => "Duplicate",
            ErrorCode::DecodeFailure => "DecodeFailure",
            ErrorCode::InvalidSignature => "InvalidSignature",
            ErrorCode::ActionTooLarge => "ActionTooLarge",
            ErrorCode::StaleTimestamp => "StaleTimestamp",
            ErrorCode::InvalidNonce => "InvalidNonce",
            ErrorCode::SessionNotFound => "SessionNotFound",
            ErrorCode::SessionExpired => "SessionExpired",
            ErrorCode::ExpiryInPast => "ExpiryInPast",
            ErrorCode::UserNotFound => "UserNotFound",
            ErrorCode::AccountNotFound => "AccountNotFound",
            ErrorCode::Unauthorized => "Unauthorized",
            ErrorCode::MarketNotFound => "MarketNotFound",
            ErrorCode::MarketFrozen => "MarketFrozen",
            ErrorCode::TokenNotFound => "TokenNotFound",
            ErrorCode::EnginePaused => "EnginePaused",
            ErrorCode::InsufficientMargin => "InsufficientMargin",
            ErrorCode::InsufficientBalance => "InsufficientBalance",
            ErrorCode::OrderNotFound => "OrderNotFound",
            ErrorCode::InvalidPrice => "InvalidPrice",
            ErrorCode::InvalidSize => "InvalidSize",
            ErrorCode::InvalidQuoteSize => "InvalidQuoteSize",
            ErrorCode::PostOnlyWouldTrade => "PostOnlyWouldTrade",
            ErrorCode::FillOrKillNotFilled => "FillOrKillNotFilled",
            ErrorCode::ReduceOnlyViolation => "ReduceOnlyViolation",
            ErrorCode::TooManyOrders => "TooManyOrders",
            ErrorCode::AtomicTooManyActions => "AtomicTooManyActions",
            ErrorCode::AtomicOrderingViolation => "AtomicOrderingViolation",
            ErrorCode::TriggerNotFound => "TriggerNotFound",
            ErrorCode::TriggerLimitReached => "TriggerLimitReached",
            ErrorCode::FeeTierNotFound => "FeeTierNotFound",
            ErrorCode::InvalidAclRoles => "InvalidAclRoles",
            ErrorCode::OracleUnavailable => "OracleUnavailable",
            ErrorCode::InvalidGuardianSet => "InvalidGuardianSet",
            ErrorCode::AmountTooSmall => "AmountTooSmall",
        }
    }
}

// =============================================================================
// Shared payload pieces
// =============================================================================

/// Quote-denominated order limit: `price * size` given as a pre-scaled pair.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QuoteSize {
    #[prost(uint64, tag = "1")]
    pub size: u64,
    #[prost(uint64, tag = "2")]
    pub price: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TriggerKey {
    #[prost(enumeration = "TriggerKind", tag = "1")]
    pub kind: i32,
    #[prost(enumeration = "Side", tag = "2")]
    pub side: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TriggerPrices {
    #[prost(uint64, tag = "1")]
    pub trigger_price: u64,
    #[prost(uint64, optional, tag = "2")]
    pub limit_price: Option<u64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FeeTierConfig {
    #[prost(uint32, tag = "1")]
    pub maker_fee_ppm: u32,
    #[prost(uint32, tag = "2")]
    pub taker_fee_ppm: u32,
}

// =============================================================================
// Action payloads
// =============================================================================

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateSession {
    #[prost(bytes = "vec", tag = "1")]
    pub user_pubkey: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub session_pubkey: Vec<u8>,
    #[prost(int64, tag = "3")]
    pub expiry_timestamp: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RevokeSession {
    #[prost(uint64, tag = "1")]
    pub session_id: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PlaceOrder {
    #[prost(uint64, tag = "1")]
    pub session_id: u64,
    #[prost(uint32, tag = "2")]
    pub market_id: u32,
    #[prost(enumeration = "Side", tag = "3")]
    pub side: i32,
    #[prost(enumeration = "FillMode", tag = "4")]
    pub fill_mode: i32,
    #[prost(bool, tag = "5")]
    pub is_reduce_only: bool,
    #[prost(uint64, tag = "6")]
    pub price: u64,
    #[prost(uint64, tag = "7")]
    pub size: u64,
    #[prost(message, optional, tag = "8")]
    pub quote_size: Option<QuoteSize>,
    #[prost(uint32, optional, tag = "9")]
    pub sender_account_id: Option<u32>,
    #[prost(uint64, optional, tag = "10")]
    pub client_order_id: Option<u64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CancelOrderById {
    #[prost(uint64, tag = "1")]
    pub session_id: u64,
    #[prost(uint64, tag = "2")]
    pub order_id: u64,
    #[prost(uint32, optional, tag = "3")]
    pub sender_account_id: Option<u32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Withdraw {
    #[prost(uint64, tag = "1")]
    pub session_id: u64,
    #[prost(uint32, tag = "2")]
    pub token_id: u32,
    #[prost(uint64, tag = "3")]
    pub amount: u64,
    #[prost(bytes = "vec", optional, tag = "4")]
    pub dest_pubkey: Option<Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Transfer {
    #[prost(uint64, tag = "1")]
    pub session_id: u64,
    #[prost(uint32, tag = "2")]
    pub from_account_id: u32,
    #[prost(uint32, tag = "3")]
    pub token_id: u32,
    #[prost(uint64, tag = "4")]
    pub amount: u64,
    /// `None` asks the engine to open a new account for the receiver.
    #[prost(uint32, optional, tag = "5")]
    pub to_account_id: Option<u32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TradeOrPlace {
    #[prost(uint32, tag = "1")]
    pub market_id: u32,
    #[prost(enumeration = "Side", tag = "2")]
    pub side: i32,
    #[prost(enumeration = "FillMode", tag = "3")]
    pub fill_mode: i32,
    #[prost(bool, tag = "4")]
    pub is_reduce_only: bool,
    #[prost(uint64, tag = "5")]
    pub price: u64,
    #[prost(uint64, tag = "6")]
    pub size: u64,
    #[prost(message, optional, tag = "7")]
    pub quote_size: Option<QuoteSize>,
    #[prost(uint64, optional, tag = "8")]
    pub client_order_id: Option<u64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CancelOrder {
    #[prost(uint64, tag = "1")]
    pub order_id: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AtomicSubactionKind {
    #[prost(oneof = "atomic_subaction_kind::Inner", tags = "1, 2")]
    pub inner: Option<atomic_subaction_kind::Inner>,
}

pub mod atomic_subaction_kind {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Inner {
        #[prost(message, tag = "1")]
        TradeOrPlace(super::TradeOrPlace),
        #[prost(message, tag = "2")]
        CancelOrder(super::CancelOrder),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Atomic {
    #[prost(uint64, tag = "1")]
    pub session_id: u64,
    #[prost(uint32, optional, tag = "2")]
    pub account_id: Option<u32>,
    #[prost(message, repeated, tag = "3")]
    pub actions: Vec<AtomicSubactionKind>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AddTrigger {
    #[prost(uint64, tag = "1")]
    pub session_id: u64,
    #[prost(uint32, tag = "2")]
    pub market_id: u32,
    #[prost(message, optional, tag = "3")]
    pub key: Option<TriggerKey>,
    #[prost(message, optional, tag = "4")]
    pub prices: Option<TriggerPrices>,
    #[prost(uint32, optional, tag = "5")]
    pub account_id: Option<u32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RemoveTrigger {
    #[prost(uint64, tag = "1")]
    pub session_id: u64,
    #[prost(uint32, tag = "2")]
    pub market_id: u32,
    #[prost(message, optional, tag = "3")]
    pub key: Option<TriggerKey>,
    #[prost(uint32, optional, tag = "4")]
    pub account_id: Option<u32>,
}

// -----------------------------------------------------------------------------
// Admin payloads. `acl_pubkey` names the wallet key that signed the action.
// -----------------------------------------------------------------------------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateToken {
    #[prost(bytes = "vec", tag = "1")]
    pub acl_pubkey: Vec<u8>,
    #[prost(uint32, tag = "2")]
    pub token_decimals: u32,
    #[prost(uint32, tag = "3")]
    pub weight_bps: u32,
    #[prost(string, tag = "4")]
    pub view_symbol: String,
    #[prost(string, tag = "5")]
    pub oracle_symbol: String,
    #[prost(bytes = "vec", tag = "6")]
    pub sol_addr: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateMarket {
    #[prost(bytes = "vec", tag = "1")]
    pub acl_pubkey: Vec<u8>,
    #[prost(uint32, tag = "2")]
    pub size_decimals: u32,
    #[prost(uint32, tag = "3")]
    pub price_decimals: u32,
    #[prost(uint32, tag = "4")]
    pub imf_bps: u32,
    #[prost(uint32, tag = "5")]
    pub cmf_bps: u32,
    #[prost(uint32, tag = "6")]
    pub mmf_bps: u32,
    #[prost(enumeration = "MarketType", tag = "7")]
    pub market_type: i32,
    #[prost(string, tag = "8")]
    pub view_symbol: String,
    #[prost(string, tag = "9")]
    pub oracle_symbol: String,
    #[prost(uint32, tag = "10")]
    pub base_token_id: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateAcl {
    #[prost(bytes = "vec", tag = "1")]
    pub acl_pubkey: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub target_pubkey: Vec<u8>,
    #[prost(uint32, tag = "3")]
    pub roles_mask: u32,
    #[prost(uint32, tag = "4")]
    pub roles_value: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Pause {
    #[prost(bytes = "vec", tag = "1")]
    pub acl_pubkey: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Unpause {
    #[prost(bytes = "vec", tag = "1")]
    pub acl_pubkey: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FreezeMarket {
    #[prost(bytes = "vec", tag = "1")]
    pub acl_pubkey: Vec<u8>,
    #[prost(uint32, tag = "2")]
    pub market_id: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UnfreezeMarket {
    #[prost(bytes = "vec", tag = "1")]
    pub acl_pubkey: Vec<u8>,
    #[prost(uint32, tag = "2")]
    pub market_id: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AddFeeTier {
    #[prost(bytes = "vec", tag = "1")]
    pub acl_pubkey: Vec<u8>,
    #[prost(message, optional, tag = "2")]
    pub config: Option<FeeTierConfig>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateFeeTier {
    #[prost(bytes = "vec", tag = "1")]
    pub acl_pubkey: Vec<u8>,
    #[prost(uint32, tag = "2")]
    pub id: u32,
    #[prost(message, optional, tag = "3")]
    pub config: Option<FeeTierConfig>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateAccountsTier {
    #[prost(bytes = "vec", tag = "1")]
    pub acl_pubkey: Vec<u8>,
    #[prost(uint32, repeated, tag = "2")]
    pub accounts: Vec<u32>,
    #[prost(uint32, tag = "3")]
    pub tier_id: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PythSetWormholeGuardians {
    #[prost(bytes = "vec", tag = "1")]
    pub acl_pubkey: Vec<u8>,
    #[prost(uint32, tag = "2")]
    pub guardian_set_index: u32,
    /// 20-byte Ethereum-style guardian addresses.
    #[prost(bytes = "vec", repeated, tag = "3")]
    pub addresses: Vec<Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PythSetSymbolFeed {
    #[prost(bytes = "vec", tag = "1")]
    pub acl_pubkey: Vec<u8>,
    #[prost(string, tag = "2")]
    pub oracle_symbol: String,
    /// 32-byte Pyth price feed id.
    #[prost(bytes = "vec", tag = "3")]
    pub price_feed_id: Vec<u8>,
}

// =============================================================================
// Action envelope
// =============================================================================

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Action {
    #[prost(int64, tag = "1")]
    pub current_timestamp: i64,
    #[prost(uint32, tag = "2")]
    pub nonce: u32,
    #[prost(
        oneof = "action::Kind",
        tags = "3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23"
    )]
    pub kind: Option<action::Kind>,
}

pub mod action {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Kind {
        #[prost(message, tag = "3")]
        CreateSession(super::CreateSession),
        #[prost(message, tag = "4")]
        RevokeSession(super::RevokeSession),
        #[prost(message, tag = "5")]
        PlaceOrder(super::PlaceOrder),
        #[prost(message, tag = "6")]
        CancelOrderById(super::CancelOrderById),
        #[prost(message, tag = "7")]
        Withdraw(super::Withdraw),
        #[prost(message, tag = "8")]
        Transfer(super::Transfer),
        #[prost(message, tag = "9")]
        Atomic(super::Atomic),
        #[prost(message, tag = "10")]
        AddTrigger(super::AddTrigger),
        #[prost(message, tag = "11")]
        RemoveTrigger(super::RemoveTrigger),
        #[prost(message, tag = "12")]
        CreateToken(super::CreateToken),
        #[prost(message, tag = "13")]
        CreateMarket(super::CreateMarket),
        #[prost(message, tag = "14")]
        UpdateAcl(super::UpdateAcl),
        #[prost(message, tag = "15")]
        Pause(super::Pause),
        #[prost(message, tag = "16")]
        Unpause(super::Unpause),
        #[prost(message, tag = "17")]
        FreezeMarket(super::FreezeMarket),
        #[prost(message, tag = "18")]
        UnfreezeMarket(super::UnfreezeMarket),
        #[prost(message, tag = "19")]
        AddFeeTier(super::AddFeeTier),
        #[prost(message, tag = "20")]
        UpdateFeeTier(super::UpdateFeeTier),
        #[prost(message, tag = "21")]
        UpdateAccountsTier(super::UpdateAccountsTier),
        #[prost(message, tag = "22")]
        PythSetWormholeGuardians(super::PythSetWormholeGuardians),
        #[prost(message, tag = "23")]
        PythSetSymbolFeed(super::PythSetSymbolFeed),
    }
}

// =============================================================================
// Receipt payloads
// =============================================================================

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateSessionResult {
    #[prost(uint64, tag = "1")]
    pub session_id: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SessionRevoked {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PostedOrder {
    #[prost(enumeration = "Side", tag = "1")]
    pub side: i32,
    #[prost(uint32, tag = "2")]
    pub market_id: u32,
    #[prost(uint64, tag = "3")]
    pub price: u64,
    #[prost(uint64, tag = "4")]
    pub size: u64,
    #[prost(uint64, tag = "5")]
    pub order_id: u64,
    #[prost(uint32, tag = "6")]
    pub account_id: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Trade {
    #[prost(uint64, tag = "1")]
    pub order_id: u64,
    #[prost(uint64, tag = "2")]
    pub price: u64,
    #[prost(uint64, tag = "3")]
    pub size: u64,
    #[prost(uint32, tag = "4")]
    pub maker_account_id: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PlaceOrderResult {
    /// Remainder resting on the book, if any.
    #[prost(message, optional, tag = "1")]
    pub posted: Option<PostedOrder>,
    #[prost(message, repeated, tag = "2")]
    pub fills: Vec<Trade>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CancelOrderResult {
    #[prost(uint64, tag = "1")]
    pub order_id: u64,
    #[prost(uint32, tag = "2")]
    pub account_id: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WithdrawResult {
    #[prost(uint32, tag = "1")]
    pub token_id: u32,
    #[prost(uint64, tag = "2")]
    pub amount: u64,
    #[prost(uint64, tag = "3")]
    pub balance: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransferResult {
    #[prost(uint32, tag = "1")]
    pub from_account_id: u32,
    #[prost(uint32, tag = "2")]
    pub to_account_id: u32,
    #[prost(uint32, tag = "3")]
    pub token_id: u32,
    #[prost(uint64, tag = "4")]
    pub amount: u64,
    #[prost(bool, tag = "5")]
    pub account_created: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AtomicSubactionResultKind {
    #[prost(oneof = "atomic_subaction_result_kind::Inner", tags = "1, 2")]
    pub inner: Option<atomic_subaction_result_kind::Inner>,
}

pub mod atomic_subaction_result_kind {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Inner {
        #[prost(message, tag = "1")]
        PlaceOrderResult(super::PlaceOrderResult),
        #[prost(message, tag = "2")]
        CancelOrder(super::CancelOrderResult),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AtomicResult {
    /// `results[i]` answers `actions[i]` of the submitted batch.
    #[prost(message, repeated, tag = "1")]
    pub results: Vec<AtomicSubactionResultKind>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TriggerAdded {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TriggerRemoved {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InsertTokenResult {
    #[prost(uint32, tag = "1")]
    pub token_id: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InsertMarketResult {
    #[prost(uint32, tag = "1")]
    pub market_id: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AclUpdated {
    #[prost(bytes = "vec", tag = "1")]
    pub target_pubkey: Vec<u8>,
    #[prost(uint32, tag = "2")]
    pub roles: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Paused {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Unpaused {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MarketFreezeUpdated {
    #[prost(uint32, tag = "1")]
    pub market_id: u32,
    #[prost(bool, tag = "2")]
    pub frozen: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FeeTierAdded {
    #[prost(uint32, tag = "1")]
    pub id: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FeeTierUpdated {
    #[prost(uint32, tag = "1")]
    pub id: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountsTierUpdated {
    #[prost(uint32, tag = "1")]
    pub tier_id: u32,
    #[prost(uint32, repeated, tag = "2")]
    pub accounts: Vec<u32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GuardianSetUpdated {
    #[prost(uint32, tag = "1")]
    pub guardian_set_index: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SymbolFeedUpdated {
    #[prost(string, tag = "1")]
    pub oracle_symbol: String,
}

// =============================================================================
// Receipt envelope
// =============================================================================

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Receipt {
    /// Assigned by the engine when the action executes.
    #[prost(uint64, tag = "1")]
    pub action_id: u64,
    #[prost(
        oneof = "receipt::Kind",
        tags = "2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22"
    )]
    pub kind: Option<receipt::Kind>,
}

pub mod receipt {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Kind {
        #[prost(enumeration = "super::ErrorCode", tag = "2")]
        Err(i32),
        #[prost(message, tag = "3")]
        CreateSessionResult(super::CreateSessionResult),
        #[prost(message, tag = "4")]
        SessionRevoked(super::SessionRevoked),
        #[prost(message, tag = "5")]
        PlaceOrderResult(super::PlaceOrderResult),
        #[prost(message, tag = "6")]
        CancelOrderResult(super::CancelOrderResult),
        #[prost(message, tag = "7")]
        WithdrawResult(super::WithdrawResult),
        #[prost(message, tag = "8")]
        TransferResult(super::TransferResult),
        #[prost(message, tag = "9")]
        AtomicResult(super::AtomicResult),
        #[prost(message, tag = "10")]
        TriggerAdded(super::TriggerAdded),
        #[prost(message, tag = "11")]
        TriggerRemoved(super::TriggerRemoved),
        #[prost(message, tag = "12")]
        InsertTokenResult(super::InsertTokenResult),
        #[prost(message, tag = "13")]
        InsertMarketResult(super::InsertMarketResult),
        #[prost(message, tag = "14")]
        AclUpdated(super::AclUpdated),
        #[prost(message, tag = "15")]
        Paused(super::Paused),
        #[prost(message, tag = "16")]
        Unpaused(super::Unpaused),
        #[prost(message, tag = "17")]
        MarketFreezeUpdated(super::MarketFreezeUpdated),
        #[prost(message, tag = "18")]
        FeeTierAdded(super::FeeTierAdded),
        #[prost(message, tag = "19")]
        FeeTierUpdated(super::FeeTierUpdated),
        #[prost(message, tag = "20")]
        AccountsTierUpdated(super::AccountsTierUpdated),
        #[prost(message, tag = "21")]
        GuardianSetUpdated(super::GuardianSetUpdated),
        #[prost(message, tag = "22")]
        SymbolFeedUpdated(super::SymbolFeedUpdated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_error_code_names_cover_table() {
        assert_eq!(ErrorCode::InsufficientMargin.name(), "InsufficientMargin");
        assert_eq!(ErrorCode::try_from(16).ok(), Some(ErrorCode::InsufficientMargin));
        assert!(ErrorCode::try_from(9999).is_err());
    }

    #[test]
    fn test_receipt_roundtrip_is_byte_stable() {
        let receipt = Receipt {
            action_id: 42,
            kind: Some(receipt::Kind::AtomicResult(AtomicResult {
                results: vec![
                    AtomicSubactionResultKind {
                        inner: Some(atomic_subaction_result_kind::Inner::CancelOrder(
                            CancelOrderResult {
                                order_id: 7,
                                account_id: 1,
                            },
                        )),
                    },
                    AtomicSubactionResultKind {
                        inner: Some(atomic_subaction_result_kind::Inner::PlaceOrderResult(
                            PlaceOrderResult {
                                posted: None,
                                fills: vec![Trade {
                                    order_id: 9,
                                    price: 100,
                                    size: 3,
                                    maker_account_id: 2,
                                }],
                            },
                        )),
                    },
                ],
            })),
        };

        let bytes = receipt.encode_length_delimited_to_vec();
        let decoded = Receipt::decode_length_delimited(bytes.as_slice()).unwrap();
        assert_eq!(decoded, receipt);
        assert_eq!(decoded.encode_length_delimited_to_vec(), bytes);
    }
}
