use crate::error::CoreError;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits carried by every emitted price and EPS value.
pub const CENT_SCALE: u32 = 2;

/// Converts a float into a two-decimal fixed-point value.
///
/// Ties round to even. The result always carries a scale of two, so `20.0`
/// becomes `20.00` rather than `20`.
pub fn to_cents(value: f64) -> Result<Decimal, CoreError> {
    let mut decimal = Decimal::from_f64(value)
        .ok_or(CoreError::NotRepresentable(value))?
        .round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointNearestEven);
    decimal.rescale(CENT_SCALE);
    Ok(decimal)
}
