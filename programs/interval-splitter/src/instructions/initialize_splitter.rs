use anchor_lang::prelude::*;
use crate::errors::ErrorCode;
use crate::constants::{ONE_HUNDRED, RECEIVER_TABLE_SEED, SPLIT_CONFIG_SEED, TREASURY_SEED};
use crate::states::{
    GatePolicy, ReceiverTable, SplitAsset, SplitConfig, TimeUnit, ZeroAddressPolicy,
};

#[derive(Accounts)]
#[instruction(seed_id: u64)]
pub struct InitializeSplitter<'info> {
    /// Creator who pays for the splitter accounts
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Split configuration PDA
    #[account(
        init,
        payer = creator,
        space = SplitConfig::DISCRIMINATOR.len() + SplitConfig::INIT_SPACE,
        seeds = [SPLIT_CONFIG_SEED, creator.key().as_ref(), &seed_id.to_le_bytes()],
        bump
    )]
    pub split_config: Box<Account<'info, SplitConfig>>,

    /// Receiver table PDA
    #[account(
        init,
        payer = creator,
        space = ReceiverTable::DISCRIMINATOR.len() + ReceiverTable::INIT_SPACE,
        seeds = [RECEIVER_TABLE_SEED, split_config.key().as_ref()],
        bump
    )]
    pub receiver_table: Box<Account<'info, ReceiverTable>>,

    /// Treasury PDA that accumulates lamports
    #[account(
        seeds = [TREASURY_SEED, split_config.key().as_ref()],
        bump
    )]
    pub treasury: SystemAccount<'info>,

    /// System program
    pub system_program: Program<'info, System>,
}

/// Borsh-encoded initialization blob
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct SplitterInit {
    /// First time-unit at which a split may run
    pub first_split_slot: u64,
    /// Minimum gap between two splits (> 0)
    pub split_interval: u64,
    /// Payout addresses in payout order; the last takes the remainder
    pub receivers: Vec<Pubkey>,
    /// Shares scaled to 1e18, index-aligned with receivers
    pub percentages: Vec<u64>,
    /// Flush destination and zero-address fallback (default key = none)
    pub emergency_receiver: Pubkey,
    /// Flush executor reward (scale 1e18)
    pub flush_executor_reward_percentage: u64,
    /// Distribution executor reward (scale 1e18)
    pub executor_reward_percentage: u64,
    pub asset: SplitAsset,
    pub time_unit: TimeUnit,
    pub zero_address_policy: ZeroAddressPolicy,
    pub gate_policy: GatePolicy,
}

impl SplitterInit {
    /// Decodes the blob; trailing bytes are treated as malformed
    pub fn decode(blob: &[u8]) -> Result<Self> {
        SplitterInit::try_from_slice(blob).map_err(|e| {
            msg!("Config decode failed: {}", e);
            error!(ErrorCode::MalformedConfig)
        })
    }

    /// Checks everything outside the receiver table
    pub fn validate(&self) -> Result<()> {
        require!(self.split_interval > 0, ErrorCode::InvalidSplitInterval);
        require!(
            self.executor_reward_percentage <= ONE_HUNDRED,
            ErrorCode::InvalidRewardPercentage
        );
        require!(
            self.flush_executor_reward_percentage <= ONE_HUNDRED,
            ErrorCode::InvalidRewardPercentage
        );
        if let SplitAsset::Token { mint } = self.asset {
            require!(mint != Pubkey::default(), ErrorCode::AssetMismatch);
        }
        Ok(())
    }
}

impl<'info> InitializeSplitter<'info> {
    pub fn handle(ctx: Context<InitializeSplitter>, seed_id: u64, config: Vec<u8>) -> Result<()> {
        msg!("Initializing splitter {} for creator {}", seed_id, ctx.accounts.creator.key());

        let init = SplitterInit::decode(&config)?;
        init.validate()?;

        let split_config_key = ctx.accounts.split_config.key();
        let receiver_count = init.receivers.len();

        let table = ReceiverTable::build(
            split_config_key,
            init.receivers,
            init.percentages,
            ctx.bumps.receiver_table,
        )?;
        ctx.accounts.receiver_table.set_inner(table);

        ctx.accounts.split_config.set_inner(SplitConfig {
            creator: ctx.accounts.creator.key(),
            seed_id,
            asset: init.asset,
            time_unit: init.time_unit,
            first_split_slot: init.first_split_slot,
            split_interval: init.split_interval,
            last_split_slot: 0,
            executor_reward_percentage: init.executor_reward_percentage,
            flush_executor_reward_percentage: init.flush_executor_reward_percentage,
            emergency_receiver: init.emergency_receiver,
            zero_address_policy: init.zero_address_policy,
            gate_policy: init.gate_policy,
            locked: false,
            distribution_count: 0,
            total_distributed: 0,
            total_executor_rewards: 0,
            total_flushed: 0,
            bump: ctx.bumps.split_config,
            treasury_bump: ctx.bumps.treasury,
        });

        msg!("Receivers: {}", receiver_count);
        msg!("Split interval: {} ({:?})", init.split_interval, init.time_unit);
        msg!("First split slot: {}", init.first_split_slot);
        msg!("Executor reward: {}", init.executor_reward_percentage);
        msg!("Flush executor reward: {}", init.flush_executor_reward_percentage);
        msg!("Emergency receiver: {}", init.emergency_receiver);
        msg!("Treasury: {}", ctx.accounts.treasury.key());

        emit!(crate::events::SplitterInitialized {
            splitter: split_config_key,
            creator: ctx.accounts.creator.key(),
            mint: init.asset.mint(),
            receiver_count: receiver_count as u8,
            first_split_slot: init.first_split_slot,
            split_interval: init.split_interval,
            executor_reward_percentage: init.executor_reward_percentage,
            flush_executor_reward_percentage: init.flush_executor_reward_percentage,
            emergency_receiver: init.emergency_receiver,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::error_code;
    use crate::math::percent;

    fn sample() -> SplitterInit {
        SplitterInit {
            first_split_slot: 0,
            split_interval: 216_000,
            receivers: vec![Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique()],
            percentages: vec![percent(30), percent(20), 0],
            emergency_receiver: Pubkey::new_unique(),
            flush_executor_reward_percentage: percent(1),
            executor_reward_percentage: percent(5),
            asset: SplitAsset::Native,
            time_unit: TimeUnit::Slot,
            zero_address_policy: ZeroAddressPolicy::Fallback,
            gate_policy: GatePolicy::Reject,
        }
    }

    fn encode(init: &SplitterInit) -> Vec<u8> {
        let mut blob = Vec::new();
        init.serialize(&mut blob).unwrap();
        blob
    }

    #[test]
    fn decodes_a_well_formed_blob() {
        let init = sample();
        let blob = encode(&init);
        assert_eq!(SplitterInit::decode(&blob).unwrap(), init);
    }

    #[test]
    fn truncated_blob_is_malformed() {
        let blob = encode(&sample());
        let result = SplitterInit::decode(&blob[..blob.len() - 1]);
        assert_eq!(error_code(result), u32::from(ErrorCode::MalformedConfig));
    }

    #[test]
    fn trailing_bytes_are_malformed() {
        let mut blob = encode(&sample());
        blob.push(0);
        let result = SplitterInit::decode(&blob);
        assert_eq!(error_code(result), u32::from(ErrorCode::MalformedConfig));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let init = SplitterInit { split_interval: 0, ..sample() };
        assert_eq!(error_code(init.validate()), u32::from(ErrorCode::InvalidSplitInterval));
    }

    #[test]
    fn rewards_above_one_hundred_are_rejected() {
        let init = SplitterInit { executor_reward_percentage: ONE_HUNDRED + 1, ..sample() };
        assert_eq!(error_code(init.validate()), u32::from(ErrorCode::InvalidRewardPercentage));

        let init = SplitterInit { flush_executor_reward_percentage: ONE_HUNDRED + 1, ..sample() };
        assert_eq!(error_code(init.validate()), u32::from(ErrorCode::InvalidRewardPercentage));

        let init = SplitterInit { executor_reward_percentage: ONE_HUNDRED, ..sample() };
        assert!(init.validate().is_ok());
    }

    #[test]
    fn token_asset_needs_a_mint() {
        let init = SplitterInit {
            asset: SplitAsset::Token { mint: Pubkey::default() },
            ..sample()
        };
        assert_eq!(error_code(init.validate()), u32::from(ErrorCode::AssetMismatch));
    }
}
