use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, Token, TokenAccount};
use crate::errors::ErrorCode;
use crate::constants::{SPLIT_CONFIG_SEED, TREASURY_SEED, TREASURY_TOKEN_SEED};
use crate::states::{SplitAsset, SplitConfig};

/// Moves value into the treasury. Plain transfers to the treasury address
/// work just as well; this path only adds the ValueReceived event.
#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub depositor: Signer<'info>,

    #[account(
        seeds = [SPLIT_CONFIG_SEED, split_config.creator.as_ref(), &split_config.seed_id.to_le_bytes()],
        bump = split_config.bump
    )]
    pub split_config: Box<Account<'info, SplitConfig>>,

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

    /// Depositor's source token account (token splitters only)
    #[account(
        mut,
        token::authority = depositor
    )]
    pub depositor_token_account: Option<Box<Account<'info, TokenAccount>>>,

    pub token_program: Option<Program<'info, Token>>,
    pub system_program: Program<'info, System>,
}

impl<'info> Deposit<'info> {
    pub fn handle(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        msg!("Processing deposit of {} units from {}", amount, ctx.accounts.depositor.key());
        require!(amount > 0, ErrorCode::InvalidDepositAmount);

        match ctx.accounts.split_config.asset {
            SplitAsset::Native => {
                system_program::transfer(
                    CpiContext::new(
                        ctx.accounts.system_program.to_account_info(),
                        system_program::Transfer {
                            from: ctx.accounts.depositor.to_account_info(),
                            to: ctx.accounts.treasury.to_account_info(),
                        },
                    ),
                    amount,
                )?;
            }
            SplitAsset::Token { mint } => {
                let accounts = &ctx.accounts;
                let (Some(vault), Some(source), Some(token_program)) = (
                    accounts.treasury_token_account.as_ref(),
                    accounts.depositor_token_account.as_ref(),
                    accounts.token_program.as_ref(),
                ) else {
                    return err!(ErrorCode::AssetMismatch);
                };
                require_keys_eq!(source.mint, mint, ErrorCode::AssetMismatch);

                token::transfer(
                    CpiContext::new(
                        token_program.to_account_info(),
                        token::Transfer {
                            from: source.to_account_info(),
                            to: vault.to_account_info(),
                            authority: accounts.depositor.to_account_info(),
                        },
                    ),
                    amount,
                )?;
            }
        }

        msg!("Deposit completed");

        emit!(crate::events::ValueReceived {
            splitter: ctx.accounts.split_config.key(),
            depositor: ctx.accounts.depositor.key(),
            amount,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
