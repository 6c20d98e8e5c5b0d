use solana_spot_terminal::config::AppConfig;
use solana_spot_terminal::TerminalError;
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("spot-terminal.toml");
    fs::write(&path, body).expect("Failed to write config file");
    path
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = write_config(
        &dir,
        r#"
[rpc]
url = "https://rpc.example.org"

[catalog]
favorite_token = "JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN"
min_volume_24h = 250000.0

[trading]
slippage_bps = 100
"#,
    );

    let config = AppConfig::load_from(Some(&path), false).unwrap();

    assert_eq!(config.rpc.url, "https://rpc.example.org");
    assert_eq!(
        config.catalog.favorite_token.as_deref(),
        Some("JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN")
    );
    assert_eq!(config.catalog.min_volume_24h, 250_000.0);
    assert_eq!(config.trading.slippage_bps, 100);

    // Untouched sections keep their defaults
    assert_eq!(config.catalog.max_pairs_per_query, 5);
    assert_eq!(config.orderly.orderbook_depth, 15);
}

#[test]
fn invalid_values_are_rejected() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = write_config(&dir, "[catalog]\nconcurrency = 0\n");

    let err = AppConfig::load_from(Some(&path), false).unwrap_err();
    assert!(matches!(err, TerminalError::Config(_)));
    assert!(err.to_string().contains("concurrency"));
}

#[test]
fn environment_overrides_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = write_config(&dir, "[trading]\nslippage_bps = 100\n");

    std::env::set_var("SPOT_TERMINAL_TRADING__SLIPPAGE_BPS", "75");
    let config = AppConfig::load_from(Some(&path), true);
    std::env::remove_var("SPOT_TERMINAL_TRADING__SLIPPAGE_BPS");

    assert_eq!(config.unwrap().trading.slippage_bps, 75);
}
