use anchor_lang::prelude::*;
use crate::constants::{RECEIVER_TABLE_SEED, SPLIT_CONFIG_SEED};
use crate::states::{GatePolicy, ReceiverTable, SplitAsset, SplitConfig, TimeUnit, ZeroAddressPolicy};

/// Read-only view over a splitter, shared by all query instructions
#[derive(Accounts)]
pub struct QuerySplitter<'info> {
    #[account(
        seeds = [SPLIT_CONFIG_SEED, split_config.creator.as_ref(), &split_config.seed_id.to_le_bytes()],
        bump = split_config.bump
    )]
    pub split_config: Box<Account<'info, SplitConfig>>,

    #[account(
        seeds = [RECEIVER_TABLE_SEED, split_config.key().as_ref()],
        bump = receiver_table.bump
    )]
    pub receiver_table: Box<Account<'info, ReceiverTable>>,
}

/// Receiver table as two parallel sequences
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ReceiverTableView {
    pub receivers: Vec<Pubkey>,
    /// Scale 1e18; the last entry is ignored by distribution
    pub percentages: Vec<u64>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RewardView {
    pub executor_reward_percentage: u64,
    pub flush_executor_reward_percentage: u64,
    /// Default key when no emergency receiver is configured
    pub emergency_receiver: Pubkey,
}

/// Response structure for the combined splitter query
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct SplitterInfo {
    pub creator: Pubkey,
    pub seed_id: u64,
    pub asset: SplitAsset,
    pub time_unit: TimeUnit,
    pub zero_address_policy: ZeroAddressPolicy,
    pub gate_policy: GatePolicy,
    pub split_interval: u64,
    pub last_split_slot: u64,
    pub next_split_slot: u64,
    pub receivers: ReceiverTableView,
    pub rewards: RewardView,
    /// Successful distributions so far
    pub distribution_count: u64,
    pub total_distributed: u64,
    pub total_executor_rewards: u64,
    pub total_flushed: u64,
}

impl ReceiverTableView {
    pub fn from_table(table: &ReceiverTable) -> Self {
        let (receivers, percentages) = table.lookup();
        ReceiverTableView { receivers, percentages }
    }
}

impl RewardView {
    pub fn from_config(config: &SplitConfig) -> Self {
        RewardView {
            executor_reward_percentage: config.executor_reward_percentage,
            flush_executor_reward_percentage: config.flush_executor_reward_percentage,
            emergency_receiver: config.emergency_receiver,
        }
    }
}

impl SplitterInfo {
    pub fn from_state(config: &SplitConfig, table: &ReceiverTable) -> Self {
        SplitterInfo {
            creator: config.creator,
            seed_id: config.seed_id,
            asset: config.asset,
            time_unit: config.time_unit,
            zero_address_policy: config.zero_address_policy,
            gate_policy: config.gate_policy,
            split_interval: config.split_interval,
            last_split_slot: config.last_split_slot,
            next_split_slot: config.next_split_slot(),
            receivers: ReceiverTableView::from_table(table),
            rewards: RewardView::from_config(config),
            distribution_count: config.distribution_count,
            total_distributed: config.total_distributed,
            total_executor_rewards: config.total_executor_rewards,
            total_flushed: config.total_flushed,
        }
    }
}

impl<'info> QuerySplitter<'info> {
    pub fn next_split_slot(ctx: Context<QuerySplitter>) -> Result<u64> {
        let next = ctx.accounts.split_config.next_split_slot();
        msg!("Next split slot: {}", next);
        Ok(next)
    }

    pub fn last_split_slot(ctx: Context<QuerySplitter>) -> Result<u64> {
        let last = ctx.accounts.split_config.last_split_slot;
        msg!("Last split slot: {}", last);
        Ok(last)
    }

    pub fn receiver_table(ctx: Context<QuerySplitter>) -> Result<ReceiverTableView> {
        let view = ReceiverTableView::from_table(&ctx.accounts.receiver_table);
        msg!("Receivers: {}", view.receivers.len());
        for (receiver, percentage) in view.receivers.iter().zip(view.percentages.iter()) {
            msg!("  {} -> {}", receiver, percentage);
        }
        Ok(view)
    }

    pub fn reward_config(ctx: Context<QuerySplitter>) -> Result<RewardView> {
        let view = RewardView::from_config(&ctx.accounts.split_config);
        msg!("Executor reward: {}", view.executor_reward_percentage);
        msg!("Flush executor reward: {}", view.flush_executor_reward_percentage);
        msg!("Emergency receiver: {}", view.emergency_receiver);
        Ok(view)
    }

    pub fn splitter_info(ctx: Context<QuerySplitter>) -> Result<SplitterInfo> {
        let info = SplitterInfo::from_state(&ctx.accounts.split_config, &ctx.accounts.receiver_table);

        msg!("Splitter info for: {}", ctx.accounts.split_config.key());
        msg!("Creator: {} (seed {})", info.creator, info.seed_id);
        msg!("Asset: {:?}", info.asset);
        msg!("Split interval: {} ({:?})", info.split_interval, info.time_unit);
        msg!("Last split: {} / next split: {}", info.last_split_slot, info.next_split_slot);
        msg!("Distribution count: {}", info.distribution_count);
        msg!("Total distributed: {} units", info.total_distributed);
        msg!("Total executor rewards: {} units", info.total_executor_rewards);
        msg!("Total flushed: {} units", info.total_flushed);

        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::percent;
    use crate::states::split_config::tests::config;

    #[test]
    fn info_reflects_counters_and_gate() {
        let receivers = vec![Pubkey::new_unique(), Pubkey::new_unique()];
        let table = ReceiverTable::build(
            Pubkey::new_unique(),
            receivers.clone(),
            vec![percent(40), 0],
            255,
        )
        .unwrap();

        let mut cfg = config(100);
        cfg.executor_reward_percentage = percent(5);
        cfg.last_split_slot = 1_000;
        cfg.distribution_count = 3;
        cfg.total_distributed = 9_000;

        let info = SplitterInfo::from_state(&cfg, &table);
        assert_eq!(info.next_split_slot, 1_100);
        assert_eq!(info.last_split_slot, 1_000);
        assert_eq!(info.distribution_count, 3);
        assert_eq!(info.total_distributed, 9_000);
        assert_eq!(info.receivers.receivers, receivers);
        assert_eq!(info.receivers.percentages, vec![percent(40), 0]);
        assert_eq!(info.rewards.executor_reward_percentage, percent(5));
        assert_eq!(info.rewards.emergency_receiver, Pubkey::default());
    }
}
