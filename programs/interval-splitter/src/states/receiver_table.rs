use anchor_lang::prelude::*;
use crate::constants::{MAX_RECEIVERS, ONE_HUNDRED};
use crate::errors::ErrorCode;
use crate::math::sum_percentages;

/// Immutable, ordered payout table. The last entry is the remainder receiver:
/// its stored percentage is kept but never used, it receives whatever is left.
#[account]
#[derive(InitSpace)]
pub struct ReceiverTable {
    /// Split config this table belongs to
    pub splitter: Pubkey,
    /// Payout addresses in payout order (default key = zero address)
    #[max_len(16)]
    pub receivers: Vec<Pubkey>,
    /// Fixed-point shares (scale 1e18), index-aligned with `receivers`
    #[max_len(16)]
    pub percentages: Vec<u64>,
    /// Bump seed for the PDA
    pub bump: u8,
}

impl ReceiverTable {
    /// Validates and builds a table.
    ///
    /// Only the first N-1 percentages are summed; a single-entry table always
    /// passes and an empty table is valid (distribution will refuse it later).
    pub fn build(
        splitter: Pubkey,
        receivers: Vec<Pubkey>,
        percentages: Vec<u64>,
        bump: u8,
    ) -> Result<Self> {
        require!(
            receivers.len() == percentages.len(),
            ErrorCode::ReceiverLengthMismatch
        );
        require!(
            receivers.len() <= MAX_RECEIVERS,
            ErrorCode::TooManyReceivers
        );

        if let Some((_, leading)) = percentages.split_last() {
            let leading_total = sum_percentages(leading)?;
            require!(
                leading_total < ONE_HUNDRED as u128,
                ErrorCode::PercentageSumTooHigh
            );
        }

        Ok(Self {
            splitter,
            receivers,
            percentages,
            bump,
        })
    }

    /// Snapshot of the full table as two parallel sequences
    pub fn lookup(&self) -> (Vec<Pubkey>, Vec<u64>) {
        (self.receivers.clone(), self.percentages.clone())
    }

    pub fn len(&self) -> usize {
        self.receivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty()
    }

    /// Entries paid by percentage (all but the last)
    pub fn proportional_entries(&self) -> impl Iterator<Item = (&Pubkey, u64)> {
        let count = self.len().saturating_sub(1);
        self.receivers
            .iter()
            .zip(self.percentages.iter().copied())
            .take(count)
    }

    pub fn remainder_receiver(&self) -> Option<&Pubkey> {
        self.receivers.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::error_code;
    use crate::math::percent;

    fn keys(n: usize) -> Vec<Pubkey> {
        (0..n).map(|_| Pubkey::new_unique()).collect()
    }

    #[test]
    fn builds_table_below_one_hundred() {
        let receivers = keys(3);
        let table = ReceiverTable::build(
            Pubkey::new_unique(),
            receivers.clone(),
            vec![percent(30), percent(20), 0],
            254,
        )
        .unwrap();

        let (stored, pcts) = table.lookup();
        assert_eq!(stored, receivers);
        assert_eq!(pcts, vec![percent(30), percent(20), 0]);
        assert_eq!(table.remainder_receiver(), Some(&receivers[2]));
        assert_eq!(table.proportional_entries().count(), 2);
    }

    #[test]
    fn last_percentage_is_never_summed() {
        // 60% + 39% < 100%; the unused trailing value would push the sum far over.
        let table = ReceiverTable::build(
            Pubkey::new_unique(),
            keys(3),
            vec![percent(60), percent(39), u64::MAX],
            1,
        );
        assert!(table.is_ok());
    }

    #[test]
    fn rejects_leading_sum_at_one_hundred() {
        let result = ReceiverTable::build(
            Pubkey::new_unique(),
            keys(3),
            vec![percent(60), percent(40), 0],
            1,
        );
        assert_eq!(error_code(result), u32::from(ErrorCode::PercentageSumTooHigh));

        let result = ReceiverTable::build(
            Pubkey::new_unique(),
            keys(2),
            vec![ONE_HUNDRED + 1, 0],
            1,
        );
        assert_eq!(error_code(result), u32::from(ErrorCode::PercentageSumTooHigh));
    }

    #[test]
    fn single_receiver_always_passes() {
        let table = ReceiverTable::build(Pubkey::new_unique(), keys(1), vec![u64::MAX], 1).unwrap();
        assert_eq!(table.proportional_entries().count(), 0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn empty_table_is_valid() {
        let table = ReceiverTable::build(Pubkey::new_unique(), vec![], vec![], 1).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.remainder_receiver(), None);
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let result = ReceiverTable::build(Pubkey::new_unique(), keys(2), vec![percent(10)], 1);
        assert_eq!(error_code(result), u32::from(ErrorCode::ReceiverLengthMismatch));
    }

    #[test]
    fn rejects_oversized_tables() {
        let n = MAX_RECEIVERS + 1;
        let result = ReceiverTable::build(Pubkey::new_unique(), keys(n), vec![0; n], 1);
        assert_eq!(error_code(result), u32::from(ErrorCode::TooManyReceivers));
    }
}
