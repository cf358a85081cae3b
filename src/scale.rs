//! Conversion between human-readable decimals and the engine's fixed-point
//! integers.

use rust_decimal::Decimal;

use crate::error::{Result, SdkError};

/// Shift `value` left by `decimals` places and return it as a `u128`.
///
/// Fails on negative input, on fractional digits beyond `decimals`
/// (precision loss) and on results that do not fit in the target.
pub fn to_scaled_u128(value: &Decimal, decimals: u32) -> Result<u128> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(SdkError::DecimalConversion(format!(
            "negative value {} cannot be scaled",
            value
        )));
    }

    let normalized = value.normalize();
    if normalized.scale() > decimals {
        return Err(SdkError::DecimalConversion(format!(
            "{} has more than {} decimal places",
            value, decimals
        )));
    }

    // Work on the mantissa directly: Decimal itself tops out near 7.9e28.
    let mantissa = normalized.mantissa().unsigned_abs();
    let shift = decimals - normalized.scale();
    10u128
        .checked_pow(shift)
        .and_then(|factor| mantissa.checked_mul(factor))
        .ok_or_else(|| {
            SdkError::DecimalConversion(format!(
                "{} shifted by {} decimals overflows u128",
                value, decimals
            ))
        })
}

/// Same as [`to_scaled_u128`] but bounded by `u64::MAX`.
pub fn to_scaled_u64(value: &Decimal, decimals: u32) -> Result<u64> {
    let scaled = to_scaled_u128(value, decimals)?;
    u64::try_from(scaled).map_err(|_| {
        SdkError::DecimalConversion(format!(
            "{} shifted by {} decimals overflows u64",
            value, decimals
        ))
    })
}

/// Inverse of [`to_scaled_u64`], for display.
pub fn from_scaled(value: u64, decimals: u32) -> Result<Decimal> {
    let mut decimal = Decimal::from(value);
    decimal.set_scale(decimals).map_err(|e| {
        SdkError::DecimalConversion(format!(
            "cannot shift {} by {} decimals: {}",
            value, decimals, e
        ))
    })?;
    Ok(decimal.normalize())
}
