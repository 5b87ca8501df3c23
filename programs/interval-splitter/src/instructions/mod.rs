pub mod initialize_splitter;
pub use initialize_splitter::*;

pub mod open_token_treasury;
pub use open_token_treasury::*;

pub mod deposit;
pub use deposit::*;

pub mod trigger_distribution;
pub use trigger_distribution::*;

pub mod flush_balance;
pub use flush_balance::*;

pub mod query_splitter;
pub use query_splitter::*;
