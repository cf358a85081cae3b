//! Receipt interpretation.
//!
//! Every typed result is narrowed through [`expect_receipt`], which keeps
//! error messages uniform: "Could not {action}, reason: {name}" for engine
//! errors and "Could not {action}, unexpected receipt: {tag}" otherwise.

use std::fmt;

use crate::error::{Result, SdkError};
use crate::proto::{self, receipt::Kind, ErrorCode, Receipt};
use crate::types::ActionOutcome;

/// Engine error code resolved against the SDK's error table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    Known(ErrorCode),
    /// A code newer than this SDK's table.
    Unknown(i32),
}

impl EngineError {
    pub fn from_code(code: i32) -> Self {
        match ErrorCode::try_from(code) {
            Ok(known) => EngineError::Known(known),
            Err(_) => EngineError::Unknown(code),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            EngineError::Known(known) => *known as i32,
            EngineError::Unknown(code) => *code,
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Known(known) => f.write_str(known.name()),
            EngineError::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Wire tag name of a receipt kind.
pub fn receipt_kind_name(kind: &Kind) -> &'static str {
    match kind {
        Kind::Err(_) => "err",
        Kind::CreateSessionResult(_) => "createSessionResult",
        Kind::SessionRevoked(_) => "sessionRevoked",
        Kind::PlaceOrderResult(_) => "placeOrderResult",
        Kind::CancelOrderResult(_) => "cancelOrderResult",
        Kind::WithdrawResult(_) => "withdrawResult",
        Kind::TransferResult(_) => "transferResult",
        Kind::AtomicResult(_) => "atomicResult",
        Kind::TriggerAdded(_) => "triggerAdded",
        Kind::TriggerRemoved(_) => "triggerRemoved",
        Kind::InsertTokenResult(_) => "insertTokenResult",
        Kind::InsertMarketResult(_) => "insertMarketResult",
        Kind::AclUpdated(_) => "aclUpdated",
        Kind::Paused(_) => "paused",
        Kind::Unpaused(_) => "unpaused",
        Kind::MarketFreezeUpdated(_) => "marketFreezeUpdated",
        Kind::FeeTierAdded(_) => "feeTierAdded",
        Kind::FeeTierUpdated(_) => "feeTierUpdated",
        Kind::AccountsTierUpdated(_) => "accountsTierUpdated",
        Kind::GuardianSetUpdated(_) => "guardianSetUpdated",
        Kind::SymbolFeedUpdated(_) => "symbolFeedUpdated",
    }
}

/// Best available description of what a receipt says went wrong.
///
/// Known error codes give their symbolic name, unknown ones the raw code,
/// non-error receipts their tag name, and a receipt without a kind
/// `"unknown"`.
pub fn format_receipt_error(receipt: &Receipt) -> String {
    match &receipt.kind {
        Some(Kind::Err(code)) => EngineError::from_code(*code).to_string(),
        Some(kind) => receipt_kind_name(kind).to_string(),
        None => "unknown".to_string(),
    }
}

/// Fail with an engine error if `receipt` is the error variant.
pub fn check_receipt(receipt: &Receipt, action: &str) -> Result<()> {
    match receipt.kind {
        Some(Kind::Err(_)) => Err(SdkError::Engine {
            action: action.to_string(),
            reason: format_receipt_error(receipt),
        }),
        _ => Ok(()),
    }
}

/// A result payload that can be narrowed out of a receipt.
pub trait ExpectedReceipt: Sized {
    /// Wire tag this payload arrives under.
    const TAG: &'static str;

    /// Take the payload out of `kind`, or hand `kind` back if it is another variant.
    fn from_kind(kind: Kind) -> std::result::Result<Self, Kind>;
}

macro_rules! expected_receipt {
    ($($payload:ident => $variant:ident, $tag:literal;)*) => {
        $(
            impl ExpectedReceipt for proto::$payload {
                const TAG: &'static str = $tag;

                fn from_kind(kind: Kind) -> std::result::Result<Self, Kind> {
                    match kind {
                        Kind::$variant(payload) => Ok(payload),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

expected_receipt! {
    CreateSessionResult => CreateSessionResult, "createSessionResult";
    SessionRevoked => SessionRevoked, "sessionRevoked";
    PlaceOrderResult => PlaceOrderResult, "placeOrderResult";
    CancelOrderResult => CancelOrderResult, "cancelOrderResult";
    WithdrawResult => WithdrawResult, "withdrawResult";
    TransferResult => TransferResult, "transferResult";
    AtomicResult => AtomicResult, "atomicResult";
    TriggerAdded => TriggerAdded, "triggerAdded";
    TriggerRemoved => TriggerRemoved, "triggerRemoved";
    InsertTokenResult => InsertTokenResult, "insertTokenResult";
    InsertMarketResult => InsertMarketResult, "insertMarketResult";
    AclUpdated => AclUpdated, "aclUpdated";
    Paused => Paused, "paused";
    Unpaused => Unpaused, "unpaused";
    MarketFreezeUpdated => MarketFreezeUpdated, "marketFreezeUpdated";
    FeeTierAdded => FeeTierAdded, "feeTierAdded";
    FeeTierUpdated => FeeTierUpdated, "feeTierUpdated";
    AccountsTierUpdated => AccountsTierUpdated, "accountsTierUpdated";
    GuardianSetUpdated => GuardianSetUpdated, "guardianSetUpdated";
    SymbolFeedUpdated => SymbolFeedUpdated, "symbolFeedUpdated";
}

/// Narrow `receipt` to the payload `T`, or fail naming `action`.
pub fn expect_receipt<T: ExpectedReceipt>(
    receipt: Receipt,
    action: &str,
) -> Result<ActionOutcome<T>> {
    check_receipt(&receipt, action)?;
    let action_id = receipt.action_id;
    match receipt.kind {
        Some(kind) => match T::from_kind(kind) {
            Ok(result) => Ok(ActionOutcome { action_id, result }),
            Err(other) => Err(SdkError::UnexpectedReceipt {
                action: action.to_string(),
                actual: receipt_kind_name(&other).to_string(),
            }),
        },
        None => Err(SdkError::UnexpectedReceipt {
            action: action.to_string(),
            actual: "unknown".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt(kind: Option<Kind>) -> Receipt {
        Receipt { action_id: 12, kind }
    }

    fn placed() -> Receipt {
        receipt(Some(Kind::PlaceOrderResult(proto::PlaceOrderResult {
            posted: None,
            fills: vec![],
        })))
    }

    #[test]
    fn test_expect_matching_kind() {
        let outcome = expect_receipt::<proto::PlaceOrderResult>(placed(), "place order").unwrap();
        assert_eq!(outcome.action_id, 12);
        assert!(outcome.result.fills.is_empty());
        assert_eq!(
            <proto::PlaceOrderResult as ExpectedReceipt>::TAG,
            "placeOrderResult"
        );
    }

    #[test]
    fn test_expect_mismatched_kind() {
        let err = expect_receipt::<proto::CancelOrderResult>(placed(), "cancel order").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("cancel order"));
        assert!(message.contains("placeOrderResult"));
        assert!(matches!(err, SdkError::UnexpectedReceipt { .. }));
    }

    #[test]
    fn test_expect_error_receipt() {
        let failed = receipt(Some(Kind::Err(ErrorCode::InsufficientMargin as i32)));
        let err = expect_receipt::<proto::PlaceOrderResult>(failed, "place order").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not place order, reason: InsufficientMargin"
        );
    }

    #[test]
    fn test_expect_missing_kind() {
        let err = expect_receipt::<proto::WithdrawResult>(receipt(None), "withdraw").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not withdraw, unexpected receipt: unknown"
        );
    }

    #[test]
    fn test_format_receipt_error_fallbacks() {
        let known = receipt(Some(Kind::Err(ErrorCode::OrderNotFound as i32)));
        assert_eq!(format_receipt_error(&known), "OrderNotFound");

        let unknown = receipt(Some(Kind::Err(4242)));
        assert_eq!(format_receipt_error(&unknown), "4242");

        assert_eq!(format_receipt_error(&placed()), "placeOrderResult");
        assert_eq!(format_receipt_error(&receipt(None)), "unknown");
    }

    #[test]
    fn test_engine_error_is_total() {
        assert_eq!(
            EngineError::from_code(16),
            EngineError::Known(ErrorCode::InsufficientMargin)
        );
        assert_eq!(EngineError::from_code(-3), EngineError::Unknown(-3));
        assert_eq!(EngineError::from_code(-3).code(), -3);
    }
}
