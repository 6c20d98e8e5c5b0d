use serde::{Deserialize, Serialize};

/// Default slippage for quotes, in basis points (0.5%)
pub const DEFAULT_SLIPPAGE_BPS: u16 = 50;

/// Lowest slippage accepted from user input, in percent
pub const MIN_USER_SLIPPAGE_PERCENT: f64 = 1.0;

/// Slippage tolerance sent to the aggregator, in basis points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlippageTolerance {
    bps: u16,
}

impl SlippageTolerance {
    pub fn from_bps(bps: u16) -> Self {
        Self { bps }
    }

    /// Build from a user-entered percentage. Values under 1% are raised to 1%.
    pub fn from_user_percent(percent: f64) -> Self {
        let percent = if percent.is_finite() {
            percent.max(MIN_USER_SLIPPAGE_PERCENT).min(100.0)
        } else {
            MIN_USER_SLIPPAGE_PERCENT
        };
        Self {
            bps: (percent * 100.0).round() as u16,
        }
    }

    pub fn bps(&self) -> u16 {
        self.bps
    }

    pub fn percent(&self) -> f64 {
        self.bps as f64 / 100.0
    }
}

impl Default for SlippageTolerance {
    fn default() -> Self {
        Self::from_bps(DEFAULT_SLIPPAGE_BPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_fifty_bps() {
        assert_eq!(SlippageTolerance::default().bps(), 50);
    }

    #[test]
    fn user_percent_is_floored_at_one_percent() {
        assert_eq!(SlippageTolerance::from_user_percent(0.3).bps(), 100);
        assert_eq!(SlippageTolerance::from_user_percent(2.5).bps(), 250);
        assert_eq!(SlippageTolerance::from_user_percent(f64::NAN).bps(), 100);
    }
}
