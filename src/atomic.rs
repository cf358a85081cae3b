//! Atomic batches: up to four place/cancel sub-actions executed as one action.
//!
//! Within one market the engine requires cancels to come before trades and
//! placements to come last, because a cancel can only reference an order id
//! that exists before the batch runs. A cancel carries no market id, so the
//! encoder cannot check this locally; it keeps the caller's order as given
//! and the engine rejects violations with `AtomicOrderingViolation`.

use crate::action::{create_action, scale_order_limit};
use crate::error::{Result, SdkError};
use crate::proto::{self, action::Kind, atomic_subaction_kind::Inner, Action};
use crate::types::{AtomicSubaction, MAX_ATOMIC_ACTIONS};

/// Check the batch length without touching any sub-action.
pub fn validate_batch_len(len: usize) -> Result<()> {
    if len == 0 || len > MAX_ATOMIC_ACTIONS {
        return Err(SdkError::Validation(format!(
            "atomic batch must hold 1 to {} actions, got {}",
            MAX_ATOMIC_ACTIONS, len
        )));
    }
    Ok(())
}

/// Encode one sub-action into its wire form.
pub fn encode_subaction(subaction: &AtomicSubaction) -> Result<proto::AtomicSubactionKind> {
    let inner = match subaction {
        AtomicSubaction::Place(params) => {
            let limit = scale_order_limit(params)?;
            Inner::TradeOrPlace(proto::TradeOrPlace {
                market_id: params.market_id,
                side: proto::Side::from(params.side) as i32,
                fill_mode: params.fill_mode as i32,
                is_reduce_only: params.is_reduce_only,
                price: limit.price,
                size: limit.size,
                quote_size: limit.quote_size,
                client_order_id: params.client_order_id,
            })
        }
        AtomicSubaction::Cancel { order_id } => Inner::CancelOrder(proto::CancelOrder {
            order_id: *order_id,
        }),
    };
    Ok(proto::AtomicSubactionKind { inner: Some(inner) })
}

/// Build a single Atomic action from an ordered batch of sub-actions.
pub fn atomic_action(
    current_timestamp: i64,
    nonce: u32,
    session_id: u64,
    account_id: Option<u32>,
    actions: &[AtomicSubaction],
) -> Result<Action> {
    validate_batch_len(actions.len())?;
    let actions = actions
        .iter()
        .map(encode_subaction)
        .collect::<Result<Vec<_>>>()?;

    Ok(create_action(
        current_timestamp,
        nonce,
        Kind::Atomic(proto::Atomic {
            session_id,
            account_id,
            actions,
        }),
    ))
}
