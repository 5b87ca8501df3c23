use anchor_lang::prelude::*;
use crate::errors::ErrorCode;

/// Which clock field a splitter measures its interval in
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum TimeUnit {
    /// Block height (`Clock::slot`)
    Slot,
    /// Unix seconds (`Clock::unix_timestamp`)
    UnixTimestamp,
}

impl TimeUnit {
    pub fn now(&self, clock: &Clock) -> Result<u64> {
        match self {
            TimeUnit::Slot => Ok(clock.slot),
            TimeUnit::UnixTimestamp => {
                u64::try_from(clock.unix_timestamp).map_err(|_| error!(ErrorCode::MathOverflow))
            }
        }
    }
}

/// What to do with a receiver stored as the zero address
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum ZeroAddressPolicy {
    /// Pay the emergency receiver instead
    Fallback,
    /// Fail the whole distribution
    Reject,
}

/// What a trigger does before the interval has elapsed
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum GatePolicy {
    /// Return successfully without touching anything
    Skip,
    /// Fail with TooEarly
    Reject,
}

/// Asset held by the treasury
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum SplitAsset {
    Native,
    Token { mint: Pubkey },
}

impl SplitAsset {
    pub fn mint(&self) -> Option<Pubkey> {
        match self {
            SplitAsset::Native => None,
            SplitAsset::Token { mint } => Some(*mint),
        }
    }
}

/// Splitter configuration and distribution state
#[account]
#[derive(InitSpace)]
pub struct SplitConfig {
    /// Creator used in the PDA seeds
    pub creator: Pubkey,
    /// Creator-chosen id, lets one creator run several splitters
    pub seed_id: u64,
    /// Native lamports or a single SPL token
    pub asset: SplitAsset,
    /// Unit for all slot fields below
    pub time_unit: TimeUnit,
    /// Gate used until the first split has run
    pub first_split_slot: u64,
    /// Minimum gap between two splits
    pub split_interval: u64,
    /// Time-unit of the last successful split (0 = never)
    pub last_split_slot: u64,
    /// Executor reward for regular splits (scale 1e18)
    pub executor_reward_percentage: u64,
    /// Executor reward for flushes (scale 1e18)
    pub flush_executor_reward_percentage: u64,
    /// Flush destination and zero-address fallback (default key = none)
    pub emergency_receiver: Pubkey,
    pub zero_address_policy: ZeroAddressPolicy,
    pub gate_policy: GatePolicy,
    /// Reentrancy guard, held for the duration of a payout run
    pub locked: bool,
    /// Successful distributions so far
    pub distribution_count: u64,
    /// Total paid to receivers by distributions
    pub total_distributed: u64,
    /// Total paid to executors (distributions and flushes)
    pub total_executor_rewards: u64,
    /// Total paid to the emergency receiver by flushes
    pub total_flushed: u64,
    /// Bump seed for the config PDA
    pub bump: u8,
    /// Bump seed for the treasury PDA
    pub treasury_bump: u8,
}

impl SplitConfig {
    /// First time-unit at which a split may run. Saturates, so an interval
    /// that runs past the end of the clock keeps the gate shut.
    pub fn next_split_slot(&self) -> u64 {
        if self.last_split_slot == 0 {
            return self.first_split_slot;
        }
        self.last_split_slot.saturating_add(self.split_interval)
    }

    pub fn is_split_due(&self, now: u64) -> bool {
        now >= self.next_split_slot()
    }

    pub fn configured_emergency_receiver(&self) -> Option<Pubkey> {
        if self.emergency_receiver == Pubkey::default() {
            None
        } else {
            Some(self.emergency_receiver)
        }
    }

    pub fn acquire_lock(&mut self) -> Result<()> {
        require!(!self.locked, ErrorCode::Reentrant);
        self.locked = true;
        Ok(())
    }

    pub fn release_lock(&mut self) {
        self.locked = false;
    }

    /// Closes the gate and updates counters after a successful distribution
    pub fn record_distribution(&mut self, now: u64, distributed: u64, executor_reward: u64) -> Result<()> {
        self.last_split_slot = now;
        self.distribution_count = self.distribution_count
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;
        self.total_distributed = self.total_distributed
            .checked_add(distributed)
            .ok_or(ErrorCode::MathOverflow)?;
        self.total_executor_rewards = self.total_executor_rewards
            .checked_add(executor_reward)
            .ok_or(ErrorCode::MathOverflow)?;

        msg!("Split recorded at {} (next: {})", now, self.next_split_slot());
        Ok(())
    }

    pub fn record_flush(&mut self, flushed: u64, executor_reward: u64) -> Result<()> {
        self.total_flushed = self.total_flushed
            .checked_add(flushed)
            .ok_or(ErrorCode::MathOverflow)?;
        self.total_executor_rewards = self.total_executor_rewards
            .checked_add(executor_reward)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::engine::testing::error_code;

    pub(crate) fn config(split_interval: u64) -> SplitConfig {
        SplitConfig {
            creator: Pubkey::new_unique(),
            seed_id: 0,
            asset: SplitAsset::Native,
            time_unit: TimeUnit::Slot,
            first_split_slot: 0,
            split_interval,
            last_split_slot: 0,
            executor_reward_percentage: 0,
            flush_executor_reward_percentage: 0,
            emergency_receiver: Pubkey::default(),
            zero_address_policy: ZeroAddressPolicy::Reject,
            gate_policy: GatePolicy::Reject,
            locked: false,
            distribution_count: 0,
            total_distributed: 0,
            total_executor_rewards: 0,
            total_flushed: 0,
            bump: 255,
            treasury_bump: 254,
        }
    }

    #[test]
    fn never_split_uses_first_slot() {
        let mut cfg = config(100);
        assert_eq!(cfg.next_split_slot(), 0);
        assert!(cfg.is_split_due(0));

        cfg.first_split_slot = 500;
        assert_eq!(cfg.next_split_slot(), 500);
        assert!(!cfg.is_split_due(499));
        assert!(cfg.is_split_due(500));
    }

    #[test]
    fn next_slot_advances_by_interval() {
        let mut cfg = config(100);
        cfg.record_distribution(1_000, 50, 5).unwrap();
        assert_eq!(cfg.last_split_slot, 1_000);
        assert_eq!(cfg.next_split_slot(), 1_100);
        assert!(!cfg.is_split_due(1_099));
        assert!(cfg.is_split_due(1_100));
        assert_eq!(cfg.distribution_count, 1);
        assert_eq!(cfg.total_distributed, 50);
        assert_eq!(cfg.total_executor_rewards, 5);
    }

    #[test]
    fn oversized_interval_saturates_instead_of_failing() {
        let mut cfg = config(u64::MAX);
        assert!(cfg.is_split_due(10));

        cfg.record_distribution(10, 100, 0).unwrap();
        assert_eq!(cfg.last_split_slot, 10);
        assert_eq!(cfg.next_split_slot(), u64::MAX);
        assert!(!cfg.is_split_due(u64::MAX - 1));
    }

    #[test]
    fn lock_is_exclusive() {
        let mut cfg = config(1);
        cfg.acquire_lock().unwrap();
        assert_eq!(error_code(cfg.acquire_lock()), u32::from(ErrorCode::Reentrant));
        cfg.release_lock();
        assert!(cfg.acquire_lock().is_ok());
    }

    #[test]
    fn default_key_means_no_emergency_receiver() {
        let mut cfg = config(1);
        assert_eq!(cfg.configured_emergency_receiver(), None);
        let receiver = Pubkey::new_unique();
        cfg.emergency_receiver = receiver;
        assert_eq!(cfg.configured_emergency_receiver(), Some(receiver));
    }

    #[test]
    fn timestamp_unit_reads_unix_seconds() {
        let clock = Clock {
            slot: 42,
            unix_timestamp: 1_700_000_000,
            ..Clock::default()
        };
        assert_eq!(TimeUnit::Slot.now(&clock).unwrap(), 42);
        assert_eq!(TimeUnit::UnixTimestamp.now(&clock).unwrap(), 1_700_000_000);

        let before_epoch = Clock { unix_timestamp: -1, ..Clock::default() };
        assert!(TimeUnit::UnixTimestamp.now(&before_epoch).is_err());
    }
}
