use anchor_lang::prelude::*;

use super::{
    pay_executor_reward, resolve_receiver, DistributionEngine, Invocation, Payout,
    PayoutNotifier, StateCheckpoint, ValueTransfer,
};
use crate::errors::ErrorCode;
use crate::math::percentage_of;
use crate::states::GatePolicy;

/// Result of one completed distribution
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistributionOutcome {
    /// Reward paid to the caller
    pub executor_reward: u64,
    /// Post-reward balance split across the table
    pub distributed: u64,
    /// Payouts in table order, last entry is the remainder receiver
    pub payouts: Vec<Payout>,
}

impl<'a> DistributionEngine<'a> {
    /// Splits the treasury across the receiver table.
    ///
    /// Returns `Ok(None)` when the interval has not elapsed and the gate policy
    /// is `Skip`. Every error leaves gating state untouched; the caller's
    /// runtime is expected to discard transfers already made.
    pub fn trigger_distribution<T, N, C>(
        &mut self,
        invocation: &Invocation,
        transfer: &mut T,
        notifier: &mut N,
        checkpoint: &mut C,
    ) -> Result<Option<DistributionOutcome>>
    where
        T: ValueTransfer,
        N: PayoutNotifier,
        C: StateCheckpoint,
    {
        require!(!self.config.locked, ErrorCode::Reentrant);

        if !self.config.is_split_due(invocation.now) {
            msg!(
                "Split not due: now {} < next {}",
                invocation.now,
                self.config.next_split_slot()
            );
            return match self.config.gate_policy {
                GatePolicy::Skip => Ok(None),
                GatePolicy::Reject => err!(ErrorCode::TooEarly),
            };
        }

        require!(invocation.balance > 0, ErrorCode::EmptyBalance);
        require!(!self.table.is_empty(), ErrorCode::NoReceivers);

        msg!(
            "Distributing {} units across {} receivers",
            invocation.balance,
            self.table.len()
        );

        let outcome = self.guarded(checkpoint, |config, table| {
            let (executor_reward, available) = pay_executor_reward(
                invocation,
                invocation.balance,
                config.executor_reward_percentage,
                transfer,
                notifier,
            )?;

            let mut remaining = available;
            let mut payouts = Vec::with_capacity(table.len());

            for (receiver, percentage) in table.proportional_entries() {
                let destination = resolve_receiver(config, receiver)?;
                // Always against the post-reward total so order never matters.
                let amount = percentage_of(available, percentage)?;

                transfer.submit(&destination, amount)?;
                remaining = remaining
                    .checked_sub(amount)
                    .ok_or(ErrorCode::MathOverflow)?;
                notifier.distribution_completed(&destination, amount, invocation.timestamp);
                msg!("Paid {} units to {}", amount, destination);

                payouts.push(Payout { receiver: destination, amount });
            }

            let last = table.remainder_receiver().ok_or(ErrorCode::NoReceivers)?;
            let destination = resolve_receiver(config, last)?;
            transfer.submit(&destination, remaining)?;
            notifier.distribution_completed(&destination, remaining, invocation.timestamp);
            msg!("Paid remainder {} units to {}", remaining, destination);

            payouts.push(Payout { receiver: destination, amount: remaining });

            Ok(DistributionOutcome {
                executor_reward,
                distributed: available,
                payouts,
            })
        })?;

        self.config.record_distribution(
            invocation.now,
            outcome.distributed,
            outcome.executor_reward,
        )?;

        Ok(Some(outcome))
    }
}
