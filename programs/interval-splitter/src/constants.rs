// PDA Seeds
pub const SPLIT_CONFIG_SEED: &[u8] = b"split_config";
pub const RECEIVER_TABLE_SEED: &[u8] = b"receiver_table";
pub const TREASURY_SEED: &[u8] = b"treasury";
pub const TREASURY_TOKEN_SEED: &[u8] = b"treasury_token";

// Fixed-point scale: ONE_HUNDRED represents 100%
pub const ONE_HUNDRED: u64 = 1_000_000_000_000_000_000;

// Receiver table limit; also bounds query return data to 1024 bytes.
// Keep in sync with the max_len on ReceiverTable.
pub const MAX_RECEIVERS: usize = 16;
