//! Position of a hammer price within its pre-sale estimate band.

use rust_decimal::Decimal;

/// Normalized position of `hammer` within the `[low, high]` estimate band.
///
/// `0` means the hammer landed on the low estimate, `1` on the high estimate;
/// values below `0` or above `1` mean the hammer fell outside the band.
/// Undefined (`None`) when `high <= low` — callers must treat this as
/// "cannot be computed" and exclude the record, never as zero.
pub fn performance_factor(hammer: Decimal, low: Decimal, high: Decimal) -> Option<Decimal> {
    if high <= low {
        return None;
    }
    Some((hammer - low) / (high - low))
}
