/// USD price with precision scaled to magnitude so micro-cap tokens stay readable
pub fn format_price(price: f64) -> String {
    let abs = price.abs();
    if abs < 0.000001 {
        format!("{:.10}", price)
    } else if abs < 0.01 {
        format!("{:.6}", price)
    } else {
        format!("{:.4}", price)
    }
}

/// `$1.23B`, `$4.56M`, `$7.89K`, `$12.34`
pub fn format_compact_usd(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 {
        format!("${:.2}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("${:.2}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("${:.2}K", value / 1e3)
    } else {
        format!("${:.2}", value)
    }
}

pub fn format_percent(change: f64) -> String {
    if change >= 0.0 {
        format!("+{:.2}%", change)
    } else {
        format!("{:.2}%", change)
    }
}

/// Funding rates arrive as fractions (0.0001 = 0.01%)
pub fn format_funding_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) if rate >= 0.0 => format!("+{:.4}%", rate * 100.0),
        Some(rate) => format!("{:.4}%", rate * 100.0),
        None => "-".to_string(),
    }
}

pub fn format_amount(amount: f64) -> String {
    if amount == 0.0 {
        "0".to_string()
    } else if amount.abs() < 1.0 {
        format!("{:.6}", amount)
    } else {
        format!("{:.4}", amount)
    }
}
