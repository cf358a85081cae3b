//! Action envelope construction.
//!
//! [`create_action`] only assembles the envelope. The `*_action` helpers
//! check each call site's own constraints first, so nothing invalid ever
//! reaches the encoder.

use crate::error::{Result, SdkError};
use crate::proto::{self, action::Kind, Action};
use crate::scale::to_scaled_u64;
use crate::types::{
    CreateMarketParams, CreateTokenParams, OrderLimit, OrderParams, Pubkey, TransferParams,
    TriggerParams, WithdrawParams, SESSION_TTL,
};

const GUARDIAN_ADDRESS_LEN: usize = 20;
const PRICE_FEED_ID_LEN: usize = 32;
const MAX_FEE_PPM: u32 = 1_000_000;

pub fn create_action(current_timestamp: i64, nonce: u32, kind: Kind) -> Action {
    Action {
        current_timestamp,
        nonce,
        kind: Some(kind),
    }
}

// =============================================================================
// Sessions
// =============================================================================

/// Build a CreateSession action.
///
/// Without an explicit expiry the session lives for [`SESSION_TTL`] seconds
/// from `current_timestamp`.
pub fn create_session_action(
    current_timestamp: i64,
    nonce: u32,
    user_pubkey: &Pubkey,
    session_pubkey: &Pubkey,
    expiry_timestamp: Option<i64>,
) -> Result<Action> {
    let expiry_timestamp = match expiry_timestamp {
        Some(expiry) if expiry <= current_timestamp => {
            return Err(SdkError::Validation(
                "cannot set expiry in the past".to_string(),
            ))
        }
        Some(expiry) => expiry,
        None => current_timestamp.checked_add(SESSION_TTL).ok_or_else(|| {
            SdkError::Validation("session expiry overflows i64".to_string())
        })?,
    };

    Ok(create_action(
        current_timestamp,
        nonce,
        Kind::CreateSession(proto::CreateSession {
            user_pubkey: user_pubkey.to_vec(),
            session_pubkey: session_pubkey.to_vec(),
            expiry_timestamp,
        }),
    ))
}

pub fn revoke_session_action(current_timestamp: i64, nonce: u32, session_id: u64) -> Action {
    create_action(
        current_timestamp,
        nonce,
        Kind::RevokeSession(proto::RevokeSession { session_id }),
    )
}

// =============================================================================
// Trading
// =============================================================================

/// Scale an order's human-unit limits and reject a limit with nothing set.
pub fn scale_order_limit(params: &OrderParams) -> Result<OrderLimit> {
    let price = to_scaled_u64(&params.price, params.scale.price_decimals)?;
    let size = to_scaled_u64(&params.size, params.scale.size_decimals)?;
    let quote_size = params
        .quote_size
        .as_ref()
        .map(|quote| -> Result<proto::QuoteSize> {
            Ok(proto::QuoteSize {
                size: to_scaled_u64(&quote.size, params.scale.size_decimals)?,
                price: to_scaled_u64(&quote.price, params.scale.price_decimals)?,
            })
        })
        .transpose()?;

    let limit = OrderLimit {
        price,
        size,
        quote_size,
    };
    if limit.is_empty() {
        return Err(SdkError::Validation(
            "order must set at least one of price, size or quote size".to_string(),
        ));
    }
    Ok(limit)
}

pub fn place_order_action(
    current_timestamp: i64,
    nonce: u32,
    session_id: u64,
    sender_account_id: Option<u32>,
    params: &OrderParams,
) -> Result<Action> {
    let limit = scale_order_limit(params)?;
    Ok(create_action(
        current_timestamp,
        nonce,
        Kind::PlaceOrder(proto::PlaceOrder {
            session_id,
            market_id: params.market_id,
            side: proto::Side::from(params.side) as i32,
            fill_mode: params.fill_mode as i32,
            is_reduce_only: params.is_reduce_only,
            price: limit.price,
            size: limit.size,
            quote_size: limit.quote_size,
            sender_account_id,
            client_order_id: params.client_order_id,
        }),
    ))
}

pub fn cancel_order_action(
    current_timestamp: i64,
    nonce: u32,
    session_id: u64,
    order_id: u64,
    sender_account_id: Option<u32>,
) -> Action {
    create_action(
        current_timestamp,
        nonce,
        Kind::CancelOrderById(proto::CancelOrderById {
            session_id,
            order_id,
            sender_account_id,
        }),
    )
}

fn positive_amount(what: &str, amount: &rust_decimal::Decimal, decimals: u32) -> Result<u64> {
    let scaled = to_scaled_u64(amount, decimals)?;
    if scaled == 0 {
        return Err(SdkError::Validation(format!(
            "{} amount must be positive",
            what
        )));
    }
    Ok(scaled)
}

pub fn withdraw_action(
    current_timestamp: i64,
    nonce: u32,
    session_id: u64,
    params: &WithdrawParams,
) -> Result<Action> {
    let amount = positive_amount("withdraw", &params.amount, params.token_decimals)?;
    Ok(create_action(
        current_timestamp,
        nonce,
        Kind::Withdraw(proto::Withdraw {
            session_id,
            token_id: params.token_id,
            amount,
            dest_pubkey: params.dest_pubkey.map(|key| key.to_vec()),
        }),
    ))
}

pub fn transfer_action(
    current_timestamp: i64,
    nonce: u32,
    session_id: u64,
    params: &TransferParams,
) -> Result<Action> {
    let amount = positive_amount("transfer", &params.amount, params.token_decimals)?;
    if params.to_account_id == Some(params.from_account_id) {
        return Err(SdkError::Validation(
            "cannot transfer to the same account".to_string(),
        ));
    }
    Ok(create_action(
        current_timestamp,
        nonce,
        Kind::Transfer(proto::Transfer {
            session_id,
            from_account_id: params.from_account_id,
            token_id: params.token_id,
            amount,
            to_account_id: params.to_account_id,
        }),
    ))
}

fn trigger_key(params: &TriggerParams) -> proto::TriggerKey {
    proto::TriggerKey {
        kind: params.kind as i32,
        side: proto::Side::from(params.side) as i32,
    }
}

pub fn add_trigger_action(
    current_timestamp: i64,
    nonce: u32,
    session_id: u64,
    params: &TriggerParams,
) -> Result<Action> {
    let trigger_price = to_scaled_u64(&params.trigger_price, params.price_decimals)?;
    if trigger_price == 0 {
        return Err(SdkError::Validation(
            "trigger price must be positive".to_string(),
        ));
    }
    let limit_price = params
        .limit_price
        .as_ref()
        .map(|price| to_scaled_u64(price, params.price_decimals))
        .transpose()?;

    Ok(create_action(
        current_timestamp,
        nonce,
        Kind::AddTrigger(proto::AddTrigger {
            session_id,
            market_id: params.market_id,
            key: Some(trigger_key(params)),
            prices: Some(proto::TriggerPrices {
                trigger_price,
                limit_price,
            }),
            account_id: params.account_id,
        }),
    ))
}

pub fn remove_trigger_action(
    current_timestamp: i64,
    nonce: u32,
    session_id: u64,
    params: &TriggerParams,
) -> Action {
    create_action(
        current_timestamp,
        nonce,
        Kind::RemoveTrigger(proto::RemoveTrigger {
            session_id,
            market_id: params.market_id,
            key: Some(trigger_key(params)),
            account_id: params.account_id,
        }),
    )
}

// =============================================================================
// Admin
// =============================================================================

/// Decode a hex parameter (optional `0x` prefix) of an exact byte length.
fn decode_hex_exact(what: &str, value: &str, len: usize) -> Result<Vec<u8>> {
    let trimmed = value.strip_prefix("0x").unwrap_or(value);
    let bytes = hex::decode(trimmed)
        .map_err(|e| SdkError::Validation(format!("{} is not valid hex: {}", what, e)))?;
    if bytes.len() != len {
        return Err(SdkError::Validation(format!(
            "{} must be {} bytes, got {}",
            what,
            len,
            bytes.len()
        )));
    }
    Ok(bytes)
}

fn require_symbol(what: &str, symbol: &str) -> Result<()> {
    if symbol.trim().is_empty() {
        return Err(SdkError::Validation(format!("{} cannot be empty", what)));
    }
    Ok(())
}

fn fee_tier_config(maker_fee_ppm: u32, taker_fee_ppm: u32) -> Result<proto::FeeTierConfig> {
    if maker_fee_ppm > MAX_FEE_PPM || taker_fee_ppm > MAX_FEE_PPM {
        return Err(SdkError::Validation(format!(
            "fees are in ppm and cannot exceed {}",
            MAX_FEE_PPM
        )));
    }
    Ok(proto::FeeTierConfig {
        maker_fee_ppm,
        taker_fee_ppm,
    })
}

pub fn create_token_action(
    current_timestamp: i64,
    nonce: u32,
    acl_pubkey: &Pubkey,
    params: &CreateTokenParams,
) -> Result<Action> {
    require_symbol("view symbol", &params.view_symbol)?;
    require_symbol("oracle symbol", &params.oracle_symbol)?;
    Ok(create_action(
        current_timestamp,
        nonce,
        Kind::CreateToken(proto::CreateToken {
            acl_pubkey: acl_pubkey.to_vec(),
            token_decimals: params.token_decimals,
            weight_bps: params.weight_bps,
            view_symbol: params.view_symbol.clone(),
            oracle_symbol: params.oracle_symbol.clone(),
            sol_addr: params.sol_addr.to_vec(),
        }),
    ))
}

pub fn create_market_action(
    current_timestamp: i64,
    nonce: u32,
    acl_pubkey: &Pubkey,
    params: &CreateMarketParams,
) -> Result<Action> {
    require_symbol("view symbol", &params.view_symbol)?;
    require_symbol("oracle symbol", &params.oracle_symbol)?;
    Ok(create_action(
        current_timestamp,
        nonce,
        Kind::CreateMarket(proto::CreateMarket {
            acl_pubkey: acl_pubkey.to_vec(),
            size_decimals: params.size_decimals,
            price_decimals: params.price_decimals,
            imf_bps: params.imf_bps,
            cmf_bps: params.cmf_bps,
            mmf_bps: params.mmf_bps,
            market_type: params.market_type as i32,
            view_symbol: params.view_symbol.clone(),
            oracle_symbol: params.oracle_symbol.clone(),
            base_token_id: params.base_token_id,
        }),
    ))
}

/// Grant or revoke roles: bits of `roles_value` outside `roles_mask` are invalid.
pub fn update_acl_action(
    current_timestamp: i64,
    nonce: u32,
    acl_pubkey: &Pubkey,
    target_pubkey: &Pubkey,
    roles_mask: u32,
    roles_value: u32,
) -> Result<Action> {
    if roles_value & !roles_mask != 0 {
        return Err(SdkError::Validation(format!(
            "roles value {:#x} sets bits outside mask {:#x}",
            roles_value, roles_mask
        )));
    }
    Ok(create_action(
        current_timestamp,
        nonce,
        Kind::UpdateAcl(proto::UpdateAcl {
            acl_pubkey: acl_pubkey.to_vec(),
            target_pubkey: target_pubkey.to_vec(),
            roles_mask,
            roles_value,
        }),
    ))
}

pub fn pause_action(current_timestamp: i64, nonce: u32, acl_pubkey: &Pubkey) -> Action {
    create_action(
        current_timestamp,
        nonce,
        Kind::Pause(proto::Pause {
            acl_pubkey: acl_pubkey.to_vec(),
        }),
    )
}

pub fn unpause_action(current_timestamp: i64, nonce: u32, acl_pubkey: &Pubkey) -> Action {
    create_action(
        current_timestamp,
        nonce,
        Kind::Unpause(proto::Unpause {
            acl_pubkey: acl_pubkey.to_vec(),
        }),
    )
}

pub fn freeze_market_action(
    current_timestamp: i64,
    nonce: u32,
    acl_pubkey: &Pubkey,
    market_id: u32,
) -> Action {
    create_action(
        current_timestamp,
        nonce,
        Kind::FreezeMarket(proto::FreezeMarket {
            acl_pubkey: acl_pubkey.to_vec(),
            market_id,
        }),
    )
}

pub fn unfreeze_market_action(
    current_timestamp: i64,
    nonce: u32,
    acl_pubkey: &Pubkey,
    market_id: u32,
) -> Action {
    create_action(
        current_timestamp,
        nonce,
        Kind::UnfreezeMarket(proto::UnfreezeMarket {
            acl_pubkey: acl_pubkey.to_vec(),
            market_id,
        }),
    )
}

pub fn add_fee_tier_action(
    current_timestamp: i64,
    nonce: u32,
    acl_pubkey: &Pubkey,
    maker_fee_ppm: u32,
    taker_fee_ppm: u32,
) -> Result<Action> {
    Ok(create_action(
        current_timestamp,
        nonce,
        Kind::AddFeeTier(proto::AddFeeTier {
            acl_pubkey: acl_pubkey.to_vec(),
            config: Some(fee_tier_config(maker_fee_ppm, taker_fee_ppm)?),
        }),
    ))
}

pub fn update_fee_tier_action(
    current_timestamp: i64,
    nonce: u32,
    acl_pubkey: &Pubkey,
    tier_id: u32,
    maker_fee_ppm: u32,
    taker_fee_ppm: u32,
) -> Result<Action> {
    Ok(create_action(
        current_timestamp,
        nonce,
        Kind::UpdateFeeTier(proto::UpdateFeeTier {
            acl_pubkey: acl_pubkey.to_vec(),
            id: tier_id,
            config: Some(fee_tier_config(maker_fee_ppm, taker_fee_ppm)?),
        }),
    ))
}

pub fn update_accounts_tier_action(
    current_timestamp: i64,
    nonce: u32,
    acl_pubkey: &Pubkey,
    accounts: &[u32],
    tier_id: u32,
) -> Result<Action> {
    if accounts.is_empty() {
        return Err(SdkError::Validation(
            "accounts list cannot be empty".to_string(),
        ));
    }
    Ok(create_action(
        current_timestamp,
        nonce,
        Kind::UpdateAccountsTier(proto::UpdateAccountsTier {
            acl_pubkey: acl_pubkey.to_vec(),
            accounts: accounts.to_vec(),
            tier_id,
        }),
    ))
}

/// `addresses` are hex-encoded 20-byte guardian addresses.
pub fn pyth_set_wormhole_guardians_action(
    current_timestamp: i64,
    nonce: u32,
    acl_pubkey: &Pubkey,
    guardian_set_index: u32,
    addresses: &[String],
) -> Result<Action> {
    if addresses.is_empty() {
        return Err(SdkError::Validation(
            "guardian set cannot be empty".to_string(),
        ));
    }
    let addresses = addresses
        .iter()
        .map(|address| decode_hex_exact("guardian address", address, GUARDIAN_ADDRESS_LEN))
        .collect::<Result<Vec<_>>>()?;

    Ok(create_action(
        current_timestamp,
        nonce,
        Kind::PythSetWormholeGuardians(proto::PythSetWormholeGuardians {
            acl_pubkey: acl_pubkey.to_vec(),
            guardian_set_index,
            addresses,
        }),
    ))
}

/// `price_feed_id` is the hex-encoded 32-byte Pyth feed id.
pub fn pyth_set_symbol_feed_action(
    current_timestamp: i64,
    nonce: u32,
    acl_pubkey: &Pubkey,
    oracle_symbol: &str,
    price_feed_id: &str,
) -> Result<Action> {
    require_symbol("oracle symbol", oracle_symbol)?;
    let price_feed_id = decode_hex_exact("price feed id", price_feed_id, PRICE_FEED_ID_LEN)?;
    Ok(create_action(
        current_timestamp,
        nonce,
        Kind::PythSetSymbolFeed(proto::PythSetSymbolFeed {
            acl_pubkey: acl_pubkey.to_vec(),
            oracle_symbol: oracle_symbol.to_string(),
            price_feed_id,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MarketScale, QuoteSizeInput};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn order(price: &str, size: &str, quote: Option<(&str, &str)>) -> OrderParams {
        OrderParams {
            market_id: 1,
            scale: MarketScale {
                price_decimals: 2,
                size_decimals: 3,
            },
            price: dec(price),
            size: dec(size),
            quote_size: quote.map(|(size, price)| QuoteSizeInput {
                size: dec(size),
                price: dec(price),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_session_expiry_defaults_to_ttl() {
        let user = Pubkey::new_from_array([1u8; 32]);
        let session = Pubkey::new_from_array([2u8; 32]);
        let action = create_session_action(1_000, 0, &user, &session, None).unwrap();
        match action.kind {
            Some(Kind::CreateSession(create)) => {
                assert_eq!(create.expiry_timestamp, 1_000 + SESSION_TTL);
                assert_eq!(create.user_pubkey, user.to_vec());
                assert_eq!(create.session_pubkey, session.to_vec());
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_session_expiry_in_past_rejected() {
        let key = Pubkey::default();
        for expiry in [999, 1_000] {
            let err = create_session_action(1_000, 0, &key, &key, Some(expiry)).unwrap_err();
            assert!(err.to_string().contains("cannot set expiry in the past"));
        }
        assert!(create_session_action(1_000, 0, &key, &key, Some(1_001)).is_ok());
    }

    #[test]
    fn test_empty_order_limit_rejected() {
        let err = place_order_action(0, 0, 1, None, &order("0", "0", None)).unwrap_err();
        assert!(matches!(err, SdkError::Validation(_)));
    }

    #[test]
    fn test_any_single_limit_is_enough() {
        assert!(place_order_action(0, 0, 1, None, &order("1.5", "0", None)).is_ok());
        assert!(place_order_action(0, 0, 1, None, &order("0", "0.001", None)).is_ok());
        assert!(place_order_action(0, 0, 1, None, &order("0", "0", Some(("1", "2")))).is_ok());
    }

    #[test]
    fn test_place_order_scales_fields() {
        let mut params = order("101.25", "2.5", Some(("0.5", "99")));
        params.client_order_id = Some(5);
        let action = place_order_action(7, 3, 11, Some(4), &params).unwrap();
        assert_eq!(action.current_timestamp, 7);
        assert_eq!(action.nonce, 3);
        match action.kind {
            Some(Kind::PlaceOrder(place)) => {
                assert_eq!(place.session_id, 11);
                assert_eq!(place.price, 10_125);
                assert_eq!(place.size, 2_500);
                assert_eq!(
                    place.quote_size,
                    Some(proto::QuoteSize {
                        size: 500,
                        price: 9_900
                    })
                );
                assert_eq!(place.side, proto::Side::Bid as i32);
                assert_eq!(place.sender_account_id, Some(4));
                assert_eq!(place.client_order_id, Some(5));
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_precision_loss_surfaces_before_encoding() {
        let err = place_order_action(0, 0, 1, None, &order("1.234", "0", None)).unwrap_err();
        assert!(matches!(err, SdkError::DecimalConversion(_)));
    }

    #[test]
    fn test_withdraw_and_transfer_need_positive_amount() {
        let withdraw = WithdrawParams {
            token_id: 0,
            token_decimals: 6,
            amount: dec("0"),
            dest_pubkey: None,
        };
        assert!(withdraw_action(0, 0, 1, &withdraw).is_err());

        let transfer = TransferParams {
            from_account_id: 1,
            to_account_id: Some(2),
            token_id: 0,
            token_decimals: 6,
            amount: dec("0.000000"),
        };
        assert!(transfer_action(0, 0, 1, &transfer).is_err());

        let transfer = TransferParams {
            amount: dec("12.5"),
            ..transfer
        };
        assert!(transfer_action(0, 0, 1, &transfer).is_ok());
    }

    #[test]
    fn test_guardian_address_length_checked() {
        let acl = Pubkey::default();
        let good = format!("0x{}", "ab".repeat(20));
        assert!(pyth_set_wormhole_guardians_action(0, 0, &acl, 4, &[good]).is_ok());

        let short = "ab".repeat(19);
        let err = pyth_set_wormhole_guardians_action(0, 0, &acl, 4, &[short]).unwrap_err();
        assert!(err.to_string().contains("must be 20 bytes, got 19"));

        let err =
            pyth_set_wormhole_guardians_action(0, 0, &acl, 4, &["zz".to_string()]).unwrap_err();
        assert!(err.to_string().contains("not valid hex"));
    }

    #[test]
    fn test_symbol_feed_id_length_checked() {
        let acl = Pubkey::default();
        assert!(pyth_set_symbol_feed_action(0, 0, &acl, "BTC/USD", &"00".repeat(32)).is_ok());
        assert!(pyth_set_symbol_feed_action(0, 0, &acl, "BTC/USD", &"00".repeat(31)).is_err());
        assert!(pyth_set_symbol_feed_action(0, 0, &acl, " ", &"00".repeat(32)).is_err());
    }

    #[test]
    fn test_acl_value_must_fit_mask() {
        let acl = Pubkey::default();
        assert!(update_acl_action(0, 0, &acl, &acl, 0b0110, 0b0100).is_ok());
        assert!(update_acl_action(0, 0, &acl, &acl, 0b0110, 0b1000).is_err());
    }

    #[test]
    fn test_accounts_tier_needs_accounts() {
        let acl = Pubkey::default();
        assert!(update_accounts_tier_action(0, 0, &acl, &[], 1).is_err());
        assert!(update_accounts_tier_action(0, 0, &acl, &[1, 2], 1).is_ok());
    }
}
