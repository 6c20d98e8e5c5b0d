// Re-export everything from submodules
pub mod client;
pub mod dexscreener;
pub mod jupiter;
pub mod tokens;
pub mod utils;
pub mod wallet;

// Re-export commonly used items
pub use client::{create_http_client, create_solana_client};
pub use tokens::constants::SOL_DECIMALS;
pub use tokens::native::get_sol_balance;
pub use tokens::spl::get_token_balance;
pub use tokens::transaction::TransactionBroadcaster;
pub use utils::{from_base_units, to_base_units};
pub use wallet::{keypair_from_base58, KeypairWallet, WalletAdapter};
