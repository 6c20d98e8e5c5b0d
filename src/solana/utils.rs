use anyhow::{anyhow, Result};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::entity::TerminalError;

// Constants for conversion
pub const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;
pub const MAX_TOKEN_DECIMALS: u32 = Decimal::MAX_SCALE;

/// Convert lamports to SOL
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL
}

/// Scale a human-readable amount to the token's smallest units, truncating.
/// Goes through `Decimal` so values like 1.15 with 6 decimals give 1150000.
pub fn to_base_units(amount: f64, decimals: u8) -> Result<u64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(anyhow!("Invalid amount: {}", amount));
    }

    // Decimal holds at most 28 digits of scale
    if u32::from(decimals) > MAX_TOKEN_DECIMALS {
        return Err(TerminalError::Decode(format!("unsupported token decimals: {}", decimals)).into());
    }

    let amount = Decimal::from_f64(amount).ok_or_else(|| anyhow!("Invalid amount: {}", amount))?;
    let scale = Decimal::from_i128_with_scale(10i128.pow(u32::from(decimals)), 0);

    amount
        .checked_mul(scale)
        .and_then(|v| v.trunc().to_u64())
        .ok_or_else(|| anyhow!("Amount out of range: {} with {} decimals", amount, decimals))
}

/// Scale a raw amount back to a human-readable value
pub fn from_base_units(raw: u64, decimals: u8) -> f64 {
    raw as f64 / 10f64.powi(decimals as i32)
}

/// Shorten address for display
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }

    let start: String = chars[..5].iter().collect();
    let end: String = chars[chars.len() - 5..].iter().collect();

    format!("{}...{}", start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_units_avoid_float_truncation() {
        assert_eq!(to_base_units(1.15, 6).unwrap(), 1_150_000);
        assert_eq!(to_base_units(0.1, 9).unwrap(), 100_000_000);
        assert_eq!(to_base_units(2.0, 0).unwrap(), 2);
    }

    #[test]
    fn base_units_reject_bad_input() {
        assert!(to_base_units(-1.0, 9).is_err());
        assert!(to_base_units(f64::NAN, 9).is_err());
        assert!(to_base_units(1e30, 9).is_err());
    }

    #[test]
    fn base_units_reject_oversized_decimals() {
        assert_eq!(to_base_units(0.0, 28).unwrap(), 0);
        assert!(to_base_units(1.0, 30).is_err());
        assert!(to_base_units(1.0, 40).is_err());
        assert!(to_base_units(1.0, u8::MAX).is_err());
    }

    #[test]
    fn from_base_units_scales_down() {
        assert_eq!(from_base_units(1_500_000, 6), 1.5);
        assert_eq!(lamports_to_sol(2_000_000_000), 2.0);
    }

    #[test]
    fn shortens_long_addresses() {
        assert_eq!(
            shorten_address("So11111111111111111111111111111111111111112"),
            "So111...11112"
        );
        assert_eq!(shorten_address("short"), "short");
        assert_eq!(shorten_address("éééééaddressééééé"), "ééééé...ééééé");
        assert_eq!(shorten_address("ééééééééé"), "ééééééééé");
    }
}
