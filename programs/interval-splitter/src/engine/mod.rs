//! Distribution engine: interval gating, share computation and the ordered
//! payout run. Runtime access (CPI transfers, events, account writes) goes
//! through the traits below so the engine itself stays pure.

use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::states::{ReceiverTable, SplitConfig, ZeroAddressPolicy};

pub mod distribution;
pub mod flush;

pub use distribution::*;
pub use flush::*;

/// Pushes value out of the treasury. A failed submit fails the whole run.
pub trait ValueTransfer {
    fn submit(&mut self, destination: &Pubkey, amount: u64) -> Result<()>;
}

/// Receives a record of every completed payout
pub trait PayoutNotifier {
    fn executor_rewarded(&mut self, executor: &Pubkey, amount: u64, timestamp: i64);
    fn distribution_completed(&mut self, receiver: &Pubkey, amount: u64, timestamp: i64);
    fn emergency_withdrawn(&mut self, receiver: &Pubkey, amount: u64, timestamp: i64);
}

/// Makes the held guard visible before the first external call
pub trait StateCheckpoint {
    fn persist(&mut self, config: &SplitConfig) -> Result<()>;
}

/// Inputs observed at the start of one trigger
#[derive(Clone, Copy, Debug)]
pub struct Invocation {
    /// Whoever triggered the operation; receives the executor reward
    pub caller: Pubkey,
    /// Current time-unit (slot or unix seconds, per the config)
    pub now: u64,
    /// Wall-clock time stamped on notifications
    pub timestamp: i64,
    /// Treasury balance at entry
    pub balance: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payout {
    pub receiver: Pubkey,
    pub amount: u64,
}

pub struct DistributionEngine<'a> {
    config: &'a mut SplitConfig,
    table: &'a ReceiverTable,
}

impl<'a> DistributionEngine<'a> {
    pub fn new(config: &'a mut SplitConfig, table: &'a ReceiverTable) -> Self {
        Self { config, table }
    }

    /// Runs `body` while holding the reentrancy guard. The guard is released
    /// on both paths; on error the runtime discards every other change.
    fn guarded<T, C, F>(&mut self, checkpoint: &mut C, body: F) -> Result<T>
    where
        C: StateCheckpoint,
        F: FnOnce(&SplitConfig, &ReceiverTable) -> Result<T>,
    {
        self.config.acquire_lock()?;
        let result = checkpoint
            .persist(&*self.config)
            .and_then(|_| body(&*self.config, self.table));
        self.config.release_lock();
        result
    }
}

/// Maps a stored receiver to the address that is actually paid
pub fn resolve_receiver(config: &SplitConfig, receiver: &Pubkey) -> Result<Pubkey> {
    if *receiver != Pubkey::default() {
        return Ok(*receiver);
    }
    match config.zero_address_policy {
        ZeroAddressPolicy::Fallback => config
            .configured_emergency_receiver()
            .ok_or_else(|| error!(ErrorCode::NoEmergencyReceiver)),
        ZeroAddressPolicy::Reject => err!(ErrorCode::InvalidReceiverAddress),
    }
}

/// Pays the caller its share of `available` and returns (reward, rest)
fn pay_executor_reward<T: ValueTransfer, N: PayoutNotifier>(
    invocation: &Invocation,
    available: u64,
    reward_percentage: u64,
    transfer: &mut T,
    notifier: &mut N,
) -> Result<(u64, u64)> {
    if reward_percentage == 0 {
        return Ok((0, available));
    }

    let reward = crate::math::percentage_of(available, reward_percentage)?;
    transfer.submit(&invocation.caller, reward)?;
    notifier.executor_rewarded(&invocation.caller, reward, invocation.timestamp);
    msg!("Executor reward: {} units to {}", reward, invocation.caller);

    let rest = available
        .checked_sub(reward)
        .ok_or(ErrorCode::MathOverflow)?;
    Ok((reward, rest))
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory doubles that behave like the runtime: transfers move
    //! balances immediately and a failed instruction restores the snapshot.

    use super::*;
    use anchor_lang::error::Error;
    use std::collections::HashMap;

    pub(crate) fn error_code<T>(result: Result<T>) -> u32 {
        match result {
            Ok(_) => panic!("expected an error"),
            Err(Error::AnchorError(e)) => e.error_code_number,
            Err(Error::ProgramError(e)) => panic!("unexpected program error: {:?}", e),
        }
    }

    #[derive(Clone, Default)]
    pub(crate) struct Ledger {
        pub treasury: u64,
        pub balances: HashMap<Pubkey, u64>,
        pub transfers: Vec<Payout>,
        pub rejecting: Option<Pubkey>,
    }

    impl Ledger {
        pub fn funded(treasury: u64) -> Self {
            Self { treasury, ..Self::default() }
        }

        pub fn balance_of(&self, key: &Pubkey) -> u64 {
            self.balances.get(key).copied().unwrap_or(0)
        }
    }

    impl ValueTransfer for Ledger {
        fn submit(&mut self, destination: &Pubkey, amount: u64) -> Result<()> {
            if self.rejecting == Some(*destination) {
                return err!(ErrorCode::TransferFailed);
            }
            self.treasury = self.treasury
                .checked_sub(amount)
                .ok_or(ErrorCode::MathOverflow)?;
            *self.balances.entry(*destination).or_default() += amount;
            self.transfers.push(Payout { receiver: *destination, amount });
            Ok(())
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub(crate) enum Note {
        Reward(Pubkey, u64),
        Completed(Pubkey, u64),
        Emergency(Pubkey, u64),
    }

    #[derive(Default)]
    pub(crate) struct Notes(pub Vec<Note>);

    impl PayoutNotifier for Notes {
        fn executor_rewarded(&mut self, executor: &Pubkey, amount: u64, _timestamp: i64) {
            self.0.push(Note::Reward(*executor, amount));
        }

        fn distribution_completed(&mut self, receiver: &Pubkey, amount: u64, _timestamp: i64) {
            self.0.push(Note::Completed(*receiver, amount));
        }

        fn emergency_withdrawn(&mut self, receiver: &Pubkey, amount: u64, _timestamp: i64) {
            self.0.push(Note::Emergency(*receiver, amount));
        }
    }

    /// Records the guard state each time it is persisted
    #[derive(Default)]
    pub(crate) struct Snapshots(pub Vec<bool>);

    impl StateCheckpoint for Snapshots {
        fn persist(&mut self, config: &SplitConfig) -> Result<()> {
            self.0.push(config.locked);
            Ok(())
        }
    }

    /// Runs `op` and restores ledger and config if it fails, like the runtime
    pub(crate) fn atomically<T>(
        ledger: &mut Ledger,
        config: &mut SplitConfig,
        op: impl FnOnce(&mut Ledger, &mut SplitConfig) -> Result<T>,
    ) -> Result<T> {
        let ledger_before = ledger.clone();
        let config_before = config.clone();
        let result = op(ledger, config);
        if result.is_err() {
            *ledger = ledger_before;
            *config = config_before;
        }
        result
    }
}
