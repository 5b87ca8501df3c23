use anchor_lang::prelude::*;

declare_id!("J98FvVLnPW66JXhhFK3XaaEFyfnNeLctxmfG8D1ZDznL");

pub mod instructions;
pub mod errors;
pub mod constants;
pub mod states;
pub mod events;
pub mod math;
pub mod engine;
pub mod treasury;

pub use instructions::*;
pub use events::*;

#[program]
pub mod interval_splitter {
    use super::*;

    pub fn initialize_splitter(
        ctx: Context<InitializeSplitter>,
        seed_id: u64,
        config: Vec<u8>
    ) -> Result<()> {
        InitializeSplitter::handle(ctx, seed_id, config)
    }

    pub fn open_token_treasury(ctx: Context<OpenTokenTreasury>) -> Result<()> {
        OpenTokenTreasury::handle(ctx)
    }

    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        Deposit::handle(ctx, amount)
    }

    pub fn trigger_distribution<'info>(
        ctx: Context<'_, '_, 'info, 'info, TriggerDistribution<'info>>
    ) -> Result<()> {
        TriggerDistribution::handle(ctx)
    }

    pub fn flush_balance<'info>(
        ctx: Context<'_, '_, 'info, 'info, FlushBalance<'info>>
    ) -> Result<()> {
        FlushBalance::handle(ctx)
    }

    pub fn get_next_split_slot(ctx: Context<QuerySplitter>) -> Result<u64> {
        QuerySplitter::next_split_slot(ctx)
    }

    pub fn get_last_split_slot(ctx: Context<QuerySplitter>) -> Result<u64> {
        QuerySplitter::last_split_slot(ctx)
    }

    pub fn get_receiver_table(ctx: Context<QuerySplitter>) -> Result<ReceiverTableView> {
        QuerySplitter::receiver_table(ctx)
    }

    pub fn get_reward_config(ctx: Context<QuerySplitter>) -> Result<RewardView> {
        QuerySplitter::reward_config(ctx)
    }

    pub fn get_splitter_info(ctx: Context<QuerySplitter>) -> Result<SplitterInfo> {
        QuerySplitter::splitter_info(ctx)
    }
}
