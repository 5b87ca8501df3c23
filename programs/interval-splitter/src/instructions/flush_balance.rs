use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::{RECEIVER_TABLE_SEED, SPLIT_CONFIG_SEED, TREASURY_SEED, TREASURY_TOKEN_SEED};
use crate::engine::{DistributionEngine, Invocation};
use crate::states::{ReceiverTable, SplitConfig};
use crate::treasury::{treasury_balance, treasury_transfer, AccountCheckpoint, EventNotifier};

/// Emergency path: sends the whole treasury to the configured emergency
/// receiver. Callable by anyone, ignores the split interval.
///
/// `remaining_accounts` must hold the emergency receiver's wallet (native) or
/// a token account it owns (token), plus the executor's token account when a
/// flush reward is configured on a token splitter.
#[derive(Accounts)]
pub struct FlushBalance<'info> {
    /// Caller, paid the flush executor reward
    #[account(mut)]
    pub executor: Signer<'info>,

    /// Split configuration
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

impl<'info> FlushBalance<'info> {
    pub fn handle(mut ctx: Context<'_, '_, 'info, 'info, FlushBalance<'info>>) -> Result<()> {
        let clock = Clock::get()?;
        let accounts = &mut ctx.accounts;
        let split_config_key = accounts.split_config.key();

        msg!("Flushing treasury for splitter: {}", split_config_key);

        let balance = treasury_balance(
            &accounts.split_config.asset,
            &accounts.treasury.to_account_info(),
            accounts.treasury_token_account.as_deref(),
        )?;
        msg!("Treasury balance: {} units", balance);

        let invocation = Invocation {
            caller: accounts.executor.key(),
            now: accounts.split_config.time_unit.now(&clock)?,
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
            .flush_balance(&invocation, &mut transfer, &mut notifier, &mut checkpoint)?;

        msg!("Flush completed!");
        msg!("Executor reward: {} units", outcome.executor_reward);
        msg!("Flushed: {} units to {}", outcome.flushed, outcome.emergency_receiver);

        Ok(())
    }
}
