use anchor_lang::prelude::*;

/// Event emitted when a splitter and its receiver table are created
#[event]
pub struct SplitterInitialized {
    /// Split config address
    pub splitter: Pubkey,
    /// Creator who paid for the accounts
    pub creator: Pubkey,
    /// Token mint, or None for native lamports
    pub mint: Option<Pubkey>,
    /// Number of receivers in the table
    pub receiver_count: u8,
    /// First time-unit at which a split may run
    pub first_split_slot: u64,
    /// Minimum gap between two splits
    pub split_interval: u64,
    /// Executor reward for regular splits (scale 1e18)
    pub executor_reward_percentage: u64,
    /// Executor reward for flushes (scale 1e18)
    pub flush_executor_reward_percentage: u64,
    /// Emergency receiver (default key = none)
    pub emergency_receiver: Pubkey,
    /// Timestamp of initialization
    pub timestamp: i64,
}

/// Event emitted once per receiver for every completed distribution
#[event]
pub struct DistributionCompleted {
    pub splitter: Pubkey,
    /// Resolved payout address
    pub receiver: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

/// Event emitted when the triggering caller is paid its reward
#[event]
pub struct ExecutorRewarded {
    pub splitter: Pubkey,
    pub executor: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

/// Event emitted when the whole treasury is flushed to the emergency receiver
#[event]
pub struct EmergencyWithdrawn {
    pub splitter: Pubkey,
    pub receiver: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

/// Event emitted when value is deposited through the program
#[event]
pub struct ValueReceived {
    pub splitter: Pubkey,
    pub depositor: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}
