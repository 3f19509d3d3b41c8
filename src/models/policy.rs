//! Statutory labor burden policy
//!
//! Payroll tax is a flat rate on annual wages. State unemployment insurance
//! is a fixed annual amount per technician, looked up by jurisdiction code.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Employer payroll tax rate (Social Security + Medicare)
pub const PAYROLL_TAX_RATE: f64 = 0.0765;

/// Annual unemployment insurance used for jurisdictions missing from the table
pub const FALLBACK_UNEMPLOYMENT: f64 = 507.93;

/// Policy constants applied by the cost roll-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxPolicy {
    /// Fraction of annual wages owed as payroll tax
    pub payroll_tax_rate: f64,

    /// Annual unemployment insurance per technician, by jurisdiction code
    pub unemployment_by_jurisdiction: BTreeMap<String, f64>,

    /// Annual unemployment insurance for any other jurisdiction
    pub fallback_unemployment: f64,
}

impl Default for TaxPolicy {
    fn default() -> Self {
        let mut table = BTreeMap::new();
        table.insert("WI".to_string(), 430.00);
        table.insert("IL".to_string(), 507.93);
        Self {
            payroll_tax_rate: PAYROLL_TAX_RATE,
            unemployment_by_jurisdiction: table,
            fallback_unemployment: FALLBACK_UNEMPLOYMENT,
        }
    }
}

impl TaxPolicy {
    /// Annual unemployment insurance for a jurisdiction code (case-insensitive)
    pub fn unemployment_for(&self, jurisdiction: &str) -> f64 {
        let code = jurisdiction.trim().to_ascii_uppercase();
        self.unemployment_by_jurisdiction
            .get(&code)
            .copied()
            .unwrap_or(self.fallback_unemployment)
    }

    /// Jurisdiction codes with an explicit entry
    pub fn known_jurisdictions(&self) -> Vec<&str> {
        self.unemployment_by_jurisdiction
            .keys()
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = TaxPolicy::default();
        assert_eq!(policy.payroll_tax_rate, 0.0765);
        assert_eq!(policy.unemployment_for("WI"), 430.0);
        assert_eq!(policy.unemployment_for("il"), 507.93);
    }

    #[test]
    fn test_unknown_jurisdiction_uses_fallback() {
        let policy = TaxPolicy::default();
        assert_eq!(policy.unemployment_for("MN"), FALLBACK_UNEMPLOYMENT);
        assert_eq!(policy.unemployment_for(""), FALLBACK_UNEMPLOYMENT);
    }

    #[test]
    fn test_partial_policy_deserializes_with_defaults() {
        let policy: TaxPolicy = serde_json::from_str(r#"{"fallback_unemployment": 600.0}"#).unwrap();
        assert_eq!(policy.fallback_unemployment, 600.0);
        assert_eq!(policy.payroll_tax_rate, PAYROLL_TAX_RATE);
        assert_eq!(policy.known_jurisdictions(), vec!["IL", "WI"]);
    }
}
