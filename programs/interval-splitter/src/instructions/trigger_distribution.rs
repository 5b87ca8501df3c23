use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::{RECEIVER_TABLE_SEED, SPLIT_CONFIG_SEED, TREASURY_SEED, TREASURY_TOKEN_SEED};
use crate::engine::{DistributionEngine, Invocation};
use crate::states::{ReceiverTable, SplitConfig};
use crate::treasury::{treasury_balance, treasury_transfer, AccountCheckpoint, EventNotifier};

/// Crank instruction: splits the treasury across the receiver table once the
/// interval has elapsed. Anyone may call it and earns the executor reward.
///
/// Payout accounts go in `remaining_accounts`: receiver wallets for native
/// splitters, receiver-owned token accounts for token splitters (plus one
/// owned by the executor when a reward is configured).
#[derive(Accounts)]
pub struct TriggerDistribution<'info> {
    /// Caller, paid the executor reward
    #[account(mut)]
    pub executor: Signer<'info>,

    /// Split configuration and gating state
    #[account(
        mut,
        seeds = [SPLIT_CONFIG_SEED, split_config.creator.as_ref(), &split_config.seed_id.to_le_bytes()],
        bump = split_config.bump
    )]
    pub split_config: Box<Account<'info, SplitConfig>>,

    /// Receiver table
    #[account(
        seeds = [RECEIVER_TABLE_SEED, split_config.key().as_ref()],
        bump = receiver_table.bump
    )]
    pub receiver_table: Box<Account<'info, ReceiverTable>>,

    /// Treasury PDA holding lamports and signing payouts
    #[account(
        mut,
        seeds = [TREASURY_SEED, split_config.key().as_ref()],
        bump = split_config.treasury_bump
    )]
    pub treasury: SystemAccount<'info>,

    /// Treasury token account (token splitters only)
    #[account(
        mut,
        seeds = [TREASURY_TOKEN_SEED, split_config.key().as_ref()],
        bump
    )]
    pub treasury_token_account: Option<Box<Account<'info, TokenAccount>>>,

    pub token_program: Option<Program<'info, Token>>,
    pub system_program: Program<'info, System>,
}

impl<'info> TriggerDistribution<'info> {
    pub fn handle(mut ctx: Context<'_, '_, 'info, 'info, TriggerDistribution<'info>>) -> Result<()> {
        let clock = Clock::get()?;
        let accounts = &mut ctx.accounts;
        let split_config_key = accounts.split_config.key();

        msg!("Starting distribution for splitter: {}", split_config_key);

        let now = accounts.split_config.time_unit.now(&clock)?;
        let balance = treasury_balance(
            &accounts.split_config.asset,
            &accounts.treasury.to_account_info(),
            accounts.treasury_token_account.as_deref(),
        )?;

        msg!("Treasury balance: {} units", balance);
        msg!(
            "Current time-unit: {} (next split: {})",
            now,
            accounts.split_config.next_split_slot()
        );

        let invocation = Invocation {
            caller: accounts.executor.key(),
            now,
            timestamp: clock.unix_timestamp,
            balance,
        };

        let treasury_bump = [accounts.split_config.treasury_bump];
        let signer_seeds: &[&[&[u8]]] = &[&[TREASURY_SEED, split_config_key.as_ref(), &treasury_bump]];

        let mut destinations = ctx.remaining_accounts.to_vec();
        destinations.push(accounts.executor.to_account_info());

        let mut transfer = treasury_transfer(
            &accounts.split_config.asset,
            &accounts.system_program,
            &accounts.treasury,
            accounts.treasury_token_account.as_deref(),
            accounts.token_program.as_ref(),
            &destinations,
            signer_seeds,
        )?;
        let mut notifier = EventNotifier::new(split_config_key);
        let mut checkpoint = AccountCheckpoint::new(accounts.split_config.to_account_info());

        let outcome = DistributionEngine::new(&mut accounts.split_config, &accounts.receiver_table)
            .trigger_distribution(&invocation, &mut transfer, &mut notifier, &mut checkpoint)?;

        match outcome {
            None => msg!("Split interval not elapsed - nothing distributed"),
            Some(outcome) => {
                msg!("Distribution completed!");
                msg!("Executor reward: {} units", outcome.executor_reward);
                msg!("Distributed: {} units to {} receivers", outcome.distributed, outcome.payouts.len());
                msg!("Next split: {}", accounts.split_config.next_split_slot());
            }
        }

        Ok(())
    }
}
