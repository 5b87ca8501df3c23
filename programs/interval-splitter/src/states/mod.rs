pub mod receiver_table;
pub mod split_config;

pub use receiver_table::*;
pub use split_config::*;
