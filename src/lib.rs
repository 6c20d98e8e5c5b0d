pub mod commands;
pub mod config;
pub mod di;
pub mod entity;
pub mod interactor;
pub mod orderly;
pub mod presenter;
pub mod router;
pub mod services;
pub mod solana;
pub mod utils;
pub mod view;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export commonly used items
pub use crate::config::AppConfig;
pub use di::*;
pub use entity::*;
pub use router::CommandRouter;
pub use solana::*;
pub use crate::utils::*;
