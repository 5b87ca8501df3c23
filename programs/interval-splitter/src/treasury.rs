use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, Token, TokenAccount};

use crate::engine::{PayoutNotifier, StateCheckpoint, ValueTransfer};
use crate::errors::ErrorCode;
use crate::events::{DistributionCompleted, EmergencyWithdrawn, ExecutorRewarded};
use crate::states::{SplitAsset, SplitConfig};

/// Treasury-signed transfers for one instruction.
///
/// Destinations are looked up among the accounts the caller supplied: by key
/// for lamports, by token-account owner and mint for SPL tokens.
pub enum TreasuryTransfer<'a, 'info> {
    Native {
        system_program: AccountInfo<'info>,
        treasury: AccountInfo<'info>,
        destinations: &'a [AccountInfo<'info>],
        signer_seeds: &'a [&'a [&'a [u8]]],
    },
    Token {
        token_program: AccountInfo<'info>,
        vault: AccountInfo<'info>,
        authority: AccountInfo<'info>,
        mint: Pubkey,
        destinations: &'a [AccountInfo<'info>],
        signer_seeds: &'a [&'a [&'a [u8]]],
    },
}

impl<'a, 'info> ValueTransfer for TreasuryTransfer<'a, 'info> {
    fn submit(&mut self, destination: &Pubkey, amount: u64) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }

        match self {
            TreasuryTransfer::Native {
                system_program: program,
                treasury,
                destinations,
                signer_seeds,
            } => {
                let to = destinations
                    .iter()
                    .find(|info| info.key == destination)
                    .ok_or(ErrorCode::ReceiverAccountMissing)?;

                system_program::transfer(
                    CpiContext::new_with_signer(
                        program.clone(),
                        system_program::Transfer {
                            from: treasury.clone(),
                            to: to.clone(),
                        },
                        *signer_seeds,
                    ),
                    amount,
                )
                .map_err(|e| {
                    msg!("Lamport transfer to {} failed: {}", destination, e);
                    error!(ErrorCode::TransferFailed)
                })
            }
            TreasuryTransfer::Token {
                token_program,
                vault,
                authority,
                mint,
                destinations,
                signer_seeds,
            } => {
                let to = find_token_account(destinations, destination, mint)?;

                token::transfer(
                    CpiContext::new_with_signer(
                        token_program.clone(),
                        token::Transfer {
                            from: vault.clone(),
                            to: to.clone(),
                            authority: authority.clone(),
                        },
                        *signer_seeds,
                    ),
                    amount,
                )
                .map_err(|e| {
                    msg!("Token transfer to {} failed: {}", destination, e);
                    error!(ErrorCode::TransferFailed)
                })
            }
        }
    }
}

/// Builds the transfer primitive matching the splitter asset
pub fn treasury_transfer<'a, 'info>(
    asset: &SplitAsset,
    system_program: &Program<'info, System>,
    treasury: &SystemAccount<'info>,
    treasury_token_account: Option<&Account<'info, TokenAccount>>,
    token_program: Option<&Program<'info, Token>>,
    destinations: &'a [AccountInfo<'info>],
    signer_seeds: &'a [&'a [&'a [u8]]],
) -> Result<TreasuryTransfer<'a, 'info>> {
    match asset {
        SplitAsset::Native => Ok(TreasuryTransfer::Native {
            system_program: system_program.to_account_info(),
            treasury: treasury.to_account_info(),
            destinations,
            signer_seeds,
        }),
        SplitAsset::Token { mint } => {
            let vault = treasury_token_account.ok_or(ErrorCode::AssetMismatch)?;
            let token_program = token_program.ok_or(ErrorCode::AssetMismatch)?;
            Ok(TreasuryTransfer::Token {
                token_program: token_program.to_account_info(),
                vault: vault.to_account_info(),
                authority: treasury.to_account_info(),
                mint: *mint,
                destinations,
                signer_seeds,
            })
        }
    }
}

/// Finds a supplied token account owned by `owner` for `mint`
fn find_token_account<'a, 'info>(
    candidates: &'a [AccountInfo<'info>],
    owner: &Pubkey,
    mint: &Pubkey,
) -> Result<&'a AccountInfo<'info>> {
    candidates
        .iter()
        .filter(|info| info.owner == &token::ID)
        .find(|info| {
            let Ok(data) = info.try_borrow_data() else {
                return false;
            };
            match TokenAccount::try_deserialize(&mut &data[..]) {
                Ok(account) => account.owner == *owner && account.mint == *mint,
                Err(_) => false,
            }
        })
        .ok_or_else(|| error!(ErrorCode::ReceiverAccountMissing))
}

/// Current distributable balance of the treasury
pub fn treasury_balance(
    asset: &SplitAsset,
    treasury: &AccountInfo,
    treasury_token_account: Option<&Account<TokenAccount>>,
) -> Result<u64> {
    match asset {
        SplitAsset::Native => Ok(treasury.lamports()),
        SplitAsset::Token { mint } => {
            let vault = treasury_token_account.ok_or(ErrorCode::AssetMismatch)?;
            require_keys_eq!(vault.mint, *mint, ErrorCode::AssetMismatch);
            Ok(vault.amount)
        }
    }
}

/// Emits Anchor events for every payout
pub struct EventNotifier {
    splitter: Pubkey,
}

impl EventNotifier {
    pub fn new(splitter: Pubkey) -> Self {
        Self { splitter }
    }
}

impl PayoutNotifier for EventNotifier {
    fn executor_rewarded(&mut self, executor: &Pubkey, amount: u64, timestamp: i64) {
        emit!(ExecutorRewarded {
            splitter: self.splitter,
            executor: *executor,
            amount,
            timestamp,
        });
    }

    fn distribution_completed(&mut self, receiver: &Pubkey, amount: u64, timestamp: i64) {
        emit!(DistributionCompleted {
            splitter: self.splitter,
            receiver: *receiver,
            amount,
            timestamp,
        });
    }

    fn emergency_withdrawn(&mut self, receiver: &Pubkey, amount: u64, timestamp: i64) {
        emit!(EmergencyWithdrawn {
            splitter: self.splitter,
            receiver: *receiver,
            amount,
            timestamp,
        });
    }
}

/// Writes the config back to its account data mid-instruction so a nested
/// invocation would load the held guard instead of the entry state.
pub struct AccountCheckpoint<'info> {
    info: AccountInfo<'info>,
}

impl<'info> AccountCheckpoint<'info> {
    pub fn new(info: AccountInfo<'info>) -> Self {
        Self { info }
    }
}

impl<'info> StateCheckpoint for AccountCheckpoint<'info> {
    fn persist(&mut self, config: &SplitConfig) -> Result<()> {
        let mut data = self.info.try_borrow_mut_data()?;
        let mut writer: &mut [u8] = &mut data;
        config.try_serialize(&mut writer)
    }
}
