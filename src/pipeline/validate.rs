use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

use crate::domain::{fields, StandardizedRecord};

/// Timestamps must be plain calendar dates, no time component.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static ACCOUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{8,16}$").unwrap());

/// Business rule sets for the validator.
///
/// Injected rather than hardcoded in the rule bodies so tests can exercise
/// alternate schemas; insertion order of the sets drives message rendering.
#[derive(Debug, Clone)]
pub struct ValidationRules {
    pub allowed_types: Vec<String>,
    pub allowed_currencies: Vec<String>,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            allowed_types: vec!["WIRE".to_string(), "ACH".to_string(), "DEPOSIT".to_string()],
            allowed_currencies: vec!["CAD".to_string(), "USD".to_string()],
        }
    }
}

/// Applies the per-field business rules to a standardized record.
pub struct RecordValidator {
    rules: ValidationRules,
}

impl RecordValidator {
    pub fn new() -> Self {
        Self {
            rules: ValidationRules::default(),
        }
    }

    pub fn with_rules(rules: ValidationRules) -> Self {
        Self { rules }
    }

    /// Validate one record, returning human-readable violations.
    ///
    /// An empty list means the record is clean. Rules run independently and
    /// in a fixed order; rejected rows join these messages in this order, so
    /// the order is part of the contract. A missing field validates as the
    /// empty string.
    pub fn validate(&self, record: &StandardizedRecord) -> Vec<String> {
        let mut violations = Vec::new();

        if !ACCOUNT_RE.is_match(record.field(fields::ACCOUNT_NUMBER)) {
            violations.push("account_number must be 8-16 digits".to_string());
        }

        let counterparty = record.field(fields::COUNTERPARTY_ACCOUNT);
        if !counterparty.is_empty() && !ACCOUNT_RE.is_match(counterparty) {
            violations.push("counterparty_account must be 8-16 digits or blank".to_string());
        }

        let transaction_type = record.field(fields::TRANSACTION_TYPE);
        if !self.rules.allowed_types.iter().any(|t| t == transaction_type) {
            violations.push(format!(
                "transaction_type must be one of {{{}}}",
                self.rules.allowed_types.join(", ")
            ));
        }

        // The two amount violations are mutually exclusive: a value either
        // fails to parse or parses and gets the sign check.
        match BigDecimal::from_str(record.field(fields::AMOUNT)) {
            Ok(amount) => {
                if amount < BigDecimal::zero() {
                    violations.push("amount cannot be negative".to_string());
                }
            }
            Err(_) => violations.push("amount must be numeric".to_string()),
        }

        let currency = record.field(fields::CURRENCY_CODE);
        if !self.rules.allowed_currencies.iter().any(|c| c == currency) {
            violations.push(format!(
                "currency_code must be {}",
                self.rules.allowed_currencies.join(" or ")
            ));
        }

        // Strict calendar parse: month 13 or Feb 30 must fail, not roll over.
        let timestamp = record.field(fields::TRANSACTION_TIMESTAMP);
        if NaiveDate::parse_from_str(timestamp, DATE_FORMAT).is_err() {
            violations.push("transaction_timestamp must be yyyy-MM-dd".to_string());
        }

        violations
    }
}

impl Default for RecordValidator {
    fn default() -> Self {
        Self::new()
    }
}
