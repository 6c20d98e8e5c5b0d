use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use regex::Regex;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// An order amount as typed by the user
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmountInput {
    Absolute(f64),
    /// Percentage of the balance that pays for the trade
    Percent(f64),
}

// Parse "0.5", ".25", "1,5" or "50%"
pub fn parse_amount_input(input: &str) -> Option<AmountInput> {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^(\d+(?:[.,]\d*)?|[.,]\d+)\s*(%)?$").unwrap();
    }

    let cap = RE.captures(input.trim())?;
    let value = cap.get(1)?.as_str().replace(',', ".").parse::<f64>().ok()?;

    if cap.get(2).is_some() {
        Some(AmountInput::Percent(value))
    } else {
        Some(AmountInput::Absolute(value))
    }
}

// Parse a slippage percentage such as "1", "0.5%" or "2.5 %"
pub fn parse_percent(input: &str) -> Result<f64> {
    let trimmed = input.trim().trim_end_matches('%').trim();
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| anyhow!("Invalid percentage: {}", input))?;

    if !value.is_finite() || value < 0.0 {
        return Err(anyhow!("Invalid percentage: {}", input));
    }
    Ok(value)
}

/// `sol` -> `PERP_SOL_USDC`; full symbols pass through upper-cased
pub fn normalize_perp_symbol(input: &str) -> String {
    let upper = input.trim().to_uppercase();
    if upper.starts_with("PERP_") {
        upper
    } else {
        format!("PERP_{}_USDC", upper)
    }
}

// Validate Solana address
pub fn validate_solana_address(address: &str) -> bool {
    Pubkey::from_str(address).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_and_percentages() {
        assert_eq!(parse_amount_input("0.5"), Some(AmountInput::Absolute(0.5)));
        assert_eq!(parse_amount_input(".25"), Some(AmountInput::Absolute(0.25)));
        assert_eq!(parse_amount_input("1,5"), Some(AmountInput::Absolute(1.5)));
        assert_eq!(parse_amount_input("50%"), Some(AmountInput::Percent(50.0)));
        assert_eq!(parse_amount_input("abc"), None);
        assert_eq!(parse_amount_input("-1"), None);
    }

    #[test]
    fn percent_parsing() {
        assert_eq!(parse_percent("0.5%").unwrap(), 0.5);
        assert_eq!(parse_percent(" 2 ").unwrap(), 2.0);
        assert!(parse_percent("-1").is_err());
        assert!(parse_percent("lots").is_err());
    }

    #[test]
    fn perp_symbols() {
        assert_eq!(normalize_perp_symbol("sol"), "PERP_SOL_USDC");
        assert_eq!(normalize_perp_symbol("perp_eth_usdc"), "PERP_ETH_USDC");
    }

    #[test]
    fn solana_addresses() {
        assert!(validate_solana_address("So11111111111111111111111111111111111111112"));
        assert!(!validate_solana_address("not-an-address"));
    }
}
