use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::errors::ErrorCode;
use crate::constants::{SPLIT_CONFIG_SEED, TREASURY_SEED, TREASURY_TOKEN_SEED};
use crate::states::SplitConfig;

/// Creates the treasury token account for a token-denominated splitter
#[derive(Accounts)]
pub struct OpenTokenTreasury<'info> {
    /// Pays for the token account
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Split configuration
    #[account(
        seeds = [SPLIT_CONFIG_SEED, split_config.creator.as_ref(), &split_config.seed_id.to_le_bytes()],
        bump = split_config.bump
    )]
    pub split_config: Box<Account<'info, SplitConfig>>,

    /// Treasury PDA, authority of the token account
    #[account(
        seeds = [TREASURY_SEED, split_config.key().as_ref()],
        bump = split_config.treasury_bump
    )]
    pub treasury: SystemAccount<'info>,

    /// Mint configured for this splitter
    #[account(
        constraint = split_config.asset.mint() == Some(mint.key()) @ ErrorCode::AssetMismatch
    )]
    pub mint: Box<Account<'info, Mint>>,

    /// Treasury token account
    #[account(
        init,
        payer = payer,
        seeds = [TREASURY_TOKEN_SEED, split_config.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = treasury
    )]
    pub treasury_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> OpenTokenTreasury<'info> {
    pub fn handle(ctx: Context<OpenTokenTreasury>) -> Result<()> {
        msg!("Opened token treasury {}", ctx.accounts.treasury_token_account.key());
        msg!("Mint: {}", ctx.accounts.mint.key());
        msg!("Authority: {}", ctx.accounts.treasury.key());
        Ok(())
    }
}
