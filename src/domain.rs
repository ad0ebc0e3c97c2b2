use indexmap::IndexMap;

/// One row as read from the source CSV, keyed by original column names.
pub type RawRecord = IndexMap<String, String>;

/// Standardized column names used downstream of the field mapper.
pub mod fields {
    pub const ACCOUNT_NUMBER: &str = "account_number";
    pub const COUNTERPARTY_ACCOUNT: &str = "counterparty_account";
    pub const TRANSACTION_TYPE: &str = "transaction_type";
    pub const AMOUNT: &str = "amount";
    pub const CURRENCY_CODE: &str = "currency_code";
    pub const TRANSACTION_TIMESTAMP: &str = "transaction_timestamp";
    pub const SOURCE_FILE: &str = "source_file";
    pub const RAW_ROW_NUMBER: &str = "raw_row_number";
    pub const ERRORS: &str = "errors";
}

/// Column order for clean.csv and the transactions table.
pub const CLEAN_COLUMNS: [&str; 8] = [
    fields::ACCOUNT_NUMBER,
    fields::COUNTERPARTY_ACCOUNT,
    fields::TRANSACTION_TYPE,
    fields::AMOUNT,
    fields::CURRENCY_CODE,
    fields::TRANSACTION_TIMESTAMP,
    fields::SOURCE_FILE,
    fields::RAW_ROW_NUMBER,
];

/// Column order for rejected.csv: the clean columns plus the violation list.
pub const REJECTED_COLUMNS: [&str; 9] = [
    fields::ACCOUNT_NUMBER,
    fields::COUNTERPARTY_ACCOUNT,
    fields::TRANSACTION_TYPE,
    fields::AMOUNT,
    fields::CURRENCY_CODE,
    fields::TRANSACTION_TIMESTAMP,
    fields::SOURCE_FILE,
    fields::RAW_ROW_NUMBER,
    fields::ERRORS,
];

/// A raw row with its fields renamed to the standardized schema.
///
/// Values are always strings at this stage; typing happens at the load sink.
/// Field order follows the mapping that produced the record, with provenance
/// fields appended by the pipeline driver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandardizedRecord {
    columns: IndexMap<String, String>,
}

impl StandardizedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a field. An existing field keeps its position.
    pub fn set(&mut self, name: &str, value: String) {
        self.columns.insert(name.to_string(), value);
    }

    /// Field value, or the empty string when the field is absent.
    pub fn field(&self, name: &str) -> &str {
        self.columns.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
