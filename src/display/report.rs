//! Report formatting utilities for terminal output
//!
//! Provides formatting helpers shared by the dashboard, the printable report
//! and the scenario tables.

/// Text shown for a figure that is undefined (e.g. break-even with no billable hours)
pub const UNDEFINED: &str = "n/a";

/// Insert thousands separators into a whole number
fn group_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Format a dollar amount with cents and thousands separators
pub fn format_money(amount: f64, symbol: &str) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{}{}.{:02}", sign, symbol, group_thousands(cents / 100), cents % 100)
}

/// Format a whole-dollar amount with thousands separators
pub fn format_money_whole(amount: f64, symbol: &str) -> String {
    let whole = amount.abs().round() as u64;
    let sign = if amount < 0.0 && whole > 0 { "-" } else { "" };
    format!("{}{}{}", sign, symbol, group_thousands(whole))
}

/// Format an amount that may be undefined
pub fn format_optional_money(amount: Option<f64>, symbol: &str) -> String {
    amount.map_or_else(|| UNDEFINED.to_string(), |a| format_money(a, symbol))
}

/// Format an hourly rate, e.g. `$94.03/hr`
pub fn format_rate(rate: Option<f64>, symbol: &str) -> String {
    match rate {
        Some(rate) => format!("{}/hr", format_money(rate, symbol)),
        None => UNDEFINED.to_string(),
    }
}

/// Format a whole number of hours with thousands separators
pub fn format_hours(hours: f64) -> String {
    let whole = hours.abs().round() as u64;
    let sign = if hours < 0.0 && whole > 0 { "-" } else { "" };
    format!("{}{}", sign, group_thousands(whole))
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    let magnitude = pct.abs();
    if magnitude < 0.1 && magnitude > 0.0 {
        format!("{:.2}%", pct)
    } else if magnitude < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a header line with padding
pub fn format_header(title: &str, width: usize) -> String {
    let len = title.chars().count();
    let padding = if len >= width { 0 } else { (width - len) / 2 };
    format!("{}{}", " ".repeat(padding), title)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum length with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(143_562.926, "$"), "$143,562.93");
        assert_eq!(format_money(0.0, "$"), "$0.00");
        assert_eq!(format_money(-1_234.5, "$"), "-$1,234.50");
        assert_eq!(format_money(999.999, "€"), "€1,000.00");
        assert_eq!(format_money(-0.001, "$"), "$0.00");
    }

    #[test]
    fn test_format_money_whole() {
        assert_eq!(format_money_whole(1_234_567.4, "$"), "$1,234,567");
        assert_eq!(format_money_whole(-50.0, "$"), "-$50");
    }

    #[test]
    fn test_undefined_figures() {
        assert_eq!(format_rate(None, "$"), "n/a");
        assert_eq!(format_optional_money(None, "$"), "n/a");
        assert_eq!(format_rate(Some(94.0256), "$"), "$94.03/hr");
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(1526.85), "1,527");
        assert_eq!(format_hours(0.0), "0");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(50.0), "50%");
        assert_eq!(format_percentage(-3.26), "-3.3%");
        assert_eq!(format_percentage(-42.0), "-42%");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(0.0, 100.0, 4), "░░░░");
        assert_eq!(format_bar(500.0, 100.0, 4), "████");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Test", 4), "Test");
    }

    #[test]
    fn test_format_header() {
        assert_eq!(format_header("abc", 7), "  abc");
        assert_eq!(format_header("abcdefgh", 4), "abcdefgh");
    }
}
