//! Display formatting for terminal output
//!
//! Provides utilities for formatting money, rates, percentages and category
//! trees for terminal display.

pub mod category;
pub mod report;

pub use category::{format_category_details, format_category_tree};
pub use report::{
    format_bar, format_hours, format_money, format_money_whole, format_optional_money,
    format_percentage, format_rate, separator,
};
