// Re-export submodules
pub mod constants;
pub mod native;
pub mod spl;
pub mod transaction;

// Re-export commonly used items
pub use constants::SOL_DECIMALS;
pub use native::get_sol_balance;
pub use spl::get_token_balance;
pub use transaction::TransactionBroadcaster;
