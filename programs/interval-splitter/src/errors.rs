use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Splitter configuration blob could not be decoded")]
    MalformedConfig,
    #[msg("Receiver and percentage lists must have the same length")]
    ReceiverLengthMismatch,
    #[msg("Too many receivers for one splitter")]
    TooManyReceivers,
    #[msg("Percentages of all but the last receiver must sum below 100%")]
    PercentageSumTooHigh,
    #[msg("Split interval must be greater than zero")]
    InvalidSplitInterval,
    #[msg("Reward percentage must not exceed 100%")]
    InvalidRewardPercentage,
    #[msg("Split interval has not elapsed yet")]
    TooEarly,
    #[msg("Nothing to distribute - treasury balance is zero")]
    EmptyBalance,
    #[msg("Receiver table is empty")]
    NoReceivers,
    #[msg("No emergency receiver configured")]
    NoEmergencyReceiver,
    #[msg("Receiver address is the zero address")]
    InvalidReceiverAddress,
    #[msg("Payout transfer failed")]
    TransferFailed,
    #[msg("Payout destination account was not supplied")]
    ReceiverAccountMissing,
    #[msg("Splitter is already executing")]
    Reentrant,
    #[msg("Math overflow occurred during calculation")]
    MathOverflow,
    #[msg("Invalid deposit amount - must be greater than zero")]
    InvalidDepositAmount,
    #[msg("Supplied accounts do not match the splitter asset")]
    AssetMismatch,
}
