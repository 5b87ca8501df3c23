use anchor_lang::prelude::*;

use super::{
    pay_executor_reward, DistributionEngine, Invocation, PayoutNotifier, StateCheckpoint,
    ValueTransfer,
};
use crate::errors::ErrorCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlushOutcome {
    pub emergency_receiver: Pubkey,
    pub executor_reward: u64,
    /// Amount that landed on the emergency receiver
    pub flushed: u64,
}

impl<'a> DistributionEngine<'a> {
    /// Moves the whole treasury to the emergency receiver. Any caller may
    /// flush; there is no interval gate and `last_split_slot` is left alone.
    pub fn flush_balance<T, N, C>(
        &mut self,
        invocation: &Invocation,
        transfer: &mut T,
        notifier: &mut N,
        checkpoint: &mut C,
    ) -> Result<FlushOutcome>
    where
        T: ValueTransfer,
        N: PayoutNotifier,
        C: StateCheckpoint,
    {
        require!(!self.config.locked, ErrorCode::Reentrant);

        let emergency_receiver = self
            .config
            .configured_emergency_receiver()
            .ok_or(ErrorCode::NoEmergencyReceiver)?;
        require!(invocation.balance > 0, ErrorCode::EmptyBalance);

        msg!("Flushing {} units to {}", invocation.balance, emergency_receiver);

        let outcome = self.guarded(checkpoint, |config, _| {
            let (executor_reward, flushed) = pay_executor_reward(
                invocation,
                invocation.balance,
                config.flush_executor_reward_percentage,
                transfer,
                notifier,
            )?;

            transfer.submit(&emergency_receiver, flushed)?;
            notifier.emergency_withdrawn(&emergency_receiver, flushed, invocation.timestamp);

            Ok(FlushOutcome {
                emergency_receiver,
                executor_reward,
                flushed,
            })
        })?;

        self.config.record_flush(outcome.flushed, outcome.executor_reward)?;
        Ok(outcome)
    }
}
