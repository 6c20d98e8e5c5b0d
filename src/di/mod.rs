mod container;

pub use container::{load_wallet_from_env, ServiceContainer, WALLET_KEY_ENV};
