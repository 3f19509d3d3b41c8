//! Recurrence periods and value units for cost line items
//!
//! Both enums carry an `Unknown` variant: a tag that cannot be recognized
//! (for example from a hand-edited or corrupted snapshot) still loads, and
//! simply contributes nothing to any total.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTag {
    Text(String),
    Other(IgnoredAny),
}

impl RawTag {
    fn normalized(&self) -> Option<String> {
        match self {
            RawTag::Text(s) => Some(s.trim().to_ascii_lowercase()),
            RawTag::Other(_) => None,
        }
    }
}

/// How often a line item's value recurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    /// Every paid working hour
    Hourly,
    /// Every working day
    Daily,
    /// Every calendar month
    Monthly,
    /// Once per year
    #[default]
    Yearly,
    /// Unrecognized tag; annualizes to zero
    Unknown,
}

impl Recurrence {
    /// All recognized recurrence periods, in display order
    pub fn all() -> &'static [Self] {
        &[Self::Hourly, Self::Daily, Self::Monthly, Self::Yearly]
    }

    /// Short suffix used next to amounts ("/hr", "/day", ...)
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hourly => "/hr",
            Self::Daily => "/day",
            Self::Monthly => "/mo",
            Self::Yearly => "/yr",
            Self::Unknown => "/?",
        }
    }

    fn from_tag(tag: &str) -> Self {
        match tag {
            "hourly" | "hour" | "hr" | "per-hour" => Self::Hourly,
            "daily" | "day" | "per-day" => Self::Daily,
            "monthly" | "month" | "mo" | "per-month" => Self::Monthly,
            "yearly" | "year" | "yr" | "annual" | "annually" | "per-year" => Self::Yearly,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Recurrence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_tag(&s.trim().to_ascii_lowercase()) {
            Self::Unknown => Err(format!(
                "Unknown recurrence '{}'. Use hourly, daily, monthly or yearly",
                s
            )),
            recurrence => Ok(recurrence),
        }
    }
}

impl<'de> Deserialize<'de> for Recurrence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawTag::deserialize(deserializer)?;
        let recurrence = raw
            .normalized()
            .map(|tag| Self::from_tag(&tag))
            .unwrap_or(Self::Unknown);
        if recurrence == Self::Unknown {
            tracing::warn!("unrecognized recurrence tag; item will contribute zero");
        }
        Ok(recurrence)
    }
}

/// What a line item's numeric value is denominated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueUnit {
    /// Dollars
    #[default]
    Currency,
    /// Paid labor hours, valued at the hourly wage
    Hours,
    /// Paid labor days, valued at the hourly wage times hours per day
    Days,
    /// Unrecognized tag; values to zero
    Unknown,
}

impl ValueUnit {
    /// All recognized units, in display order
    pub fn all() -> &'static [Self] {
        &[Self::Currency, Self::Hours, Self::Days]
    }

    /// Short symbol used in listings
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Currency => "$",
            Self::Hours => "Hr",
            Self::Days => "Day",
            Self::Unknown => "?",
        }
    }

    fn from_tag(tag: &str) -> Self {
        match tag {
            "currency" | "$" | "dollars" | "usd" => Self::Currency,
            "hours" | "hour" | "hr" | "hrs" | "labor-hours" => Self::Hours,
            "days" | "day" | "labor-days" => Self::Days,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ValueUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Currency => "currency",
            Self::Hours => "hours",
            Self::Days => "days",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ValueUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_tag(&s.trim().to_ascii_lowercase()) {
            Self::Unknown => Err(format!(
                "Unknown unit '{}'. Use currency, hours or days",
                s
            )),
            unit => Ok(unit),
        }
    }
}

impl<'de> Deserialize<'de> for ValueUnit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawTag::deserialize(deserializer)?;
        let unit = raw
            .normalized()
            .map(|tag| Self::from_tag(&tag))
            .unwrap_or(Self::Unknown);
        if unit == Self::Unknown {
            tracing::warn!("unrecognized value unit tag; item will contribute zero");
        }
        Ok(unit)
    }
}
