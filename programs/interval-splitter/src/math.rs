use anchor_lang::prelude::*;
use ruint::aliases::U256;

use crate::constants::ONE_HUNDRED;
use crate::errors::ErrorCode;

/// floor(total * percentage / ONE_HUNDRED) with 256-bit intermediates.
///
/// The percentage is first rescaled through `floor(p * SCALE / SCALE)` so the
/// result truncates exactly like the double-scaled reference formula.
pub fn percentage_of(total: u64, percentage: u64) -> Result<u64> {
    let scale = U256::from(ONE_HUNDRED);

    let scaled_percentage = U256::from(percentage)
        .checked_mul(scale)
        .ok_or(ErrorCode::MathOverflow)?
        / scale;

    let amount = U256::from(total)
        .checked_mul(scaled_percentage)
        .ok_or(ErrorCode::MathOverflow)?
        / scale;

    u64::try_from(amount).map_err(|_| error!(ErrorCode::MathOverflow))
}

/// Sums a run of fixed-point percentages without overflowing u64.
pub fn sum_percentages(percentages: &[u64]) -> Result<u128> {
    percentages.iter().try_fold(0u128, |acc, pct| {
        acc.checked_add(*pct as u128)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))
    })
}

/// Whole percent expressed in the 1e18 fixed-point scale.
#[cfg(test)]
pub const fn percent(value: u64) -> u64 {
    value * (ONE_HUNDRED / 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floors_fractional_shares() {
        assert_eq!(percentage_of(95, percent(30)).unwrap(), 28);
        assert_eq!(percentage_of(95, percent(20)).unwrap(), 19);
        assert_eq!(percentage_of(100, percent(5)).unwrap(), 5);
        assert_eq!(percentage_of(1, percent(99)).unwrap(), 0);
    }

    #[test]
    fn full_share_returns_total() {
        assert_eq!(percentage_of(u64::MAX, ONE_HUNDRED).unwrap(), u64::MAX);
        assert_eq!(percentage_of(12_345, 0).unwrap(), 0);
    }

    #[test]
    fn large_balances_do_not_overflow_intermediates() {
        let amount = percentage_of(10_000_000_000_000_000_000, ONE_HUNDRED / 2).unwrap();
        assert_eq!(amount, 5_000_000_000_000_000_000);
    }

    #[test]
    fn shares_above_one_hundred_that_do_not_fit_are_rejected() {
        assert!(percentage_of(u64::MAX, u64::MAX).is_err());
    }

    #[test]
    fn sums_without_overflow() {
        let total = sum_percentages(&[u64::MAX, u64::MAX]).unwrap();
        assert_eq!(total, 2 * u64::MAX as u128);
        assert_eq!(sum_percentages(&[]).unwrap(), 0);
    }
}
