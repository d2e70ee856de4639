//! Derived Metrics
//!
//! Display formatting and the two ratios the dashboard computes locally.
//! Currency uses Indian digit grouping (`12,34,567`) to match the
//! dashboard's default rupee display.

/// Currency symbol used when none is given
pub const DEFAULT_CURRENCY: &str = "₹";

/// Format a whole-currency amount, e.g. `482000.0` -> `"₹ 4,82,000"`
pub fn format_currency(value: f64) -> String {
    format_currency_with(value, DEFAULT_CURRENCY)
}

/// Format with an explicit currency symbol, rounded to whole units
pub fn format_currency_with(value: f64, symbol: &str) -> String {
    format!("{} {}", symbol, group_indian(value))
}

/// Compact magnitude: `1.2M`, `4.8K`, or two decimals below a thousand
pub fn format_number(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{:.2}", unsigned_zero(value))
    }
}

pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", unsigned_zero(value))
}

/// Return on ad spend as a multiplier, e.g. `"3.98x"`
pub fn format_roas(roas: f64) -> String {
    format!("{:.2}x", unsigned_zero(roas))
}

/// Return on ad spend; 0 when nothing was spent
pub fn calculate_roas(revenue: f64, spend: f64) -> f64 {
    if spend > 0.0 {
        revenue / spend
    } else {
        0.0
    }
}

/// Customer acquisition cost; 0 when no leads were acquired
pub fn calculate_cac(spend: f64, leads: u64) -> f64 {
    if leads > 0 {
        spend / leads as f64
    } else {
        0.0
    }
}

/// Percentage of `part` in `whole`; 0 for an empty whole
pub fn ratio_percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

// -0.0 prints with a sign
fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// en-IN grouping: last three digits, then pairs
fn group_indian(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
