use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use tracing::info;

use crate::config::Config;
use crate::domain::{fields, StandardizedRecord};
use crate::error::{OnboarderError, Result};
use crate::pipeline::validate::DATE_FORMAT;

/// Sink that bulk-loads the clean partition into persistent storage.
#[async_trait]
pub trait LoadSink: Send + Sync {
    /// Insert every record, or none: a failure rolls the whole batch back.
    async fn load(&self, records: &[StandardizedRecord]) -> Result<u64>;
}

/// Postgres-backed load sink for standardized transactions.
pub struct TransactionStore {
    pool: PgPool,
}

impl TransactionStore {
    /// Connect using the configured URL and credentials.
    pub async fn connect(config: &Config) -> Result<Self> {
        info!("Connecting to database at {}", config.db_url);

        let options = PgConnectOptions::from_str(&config.db_url)?
            .username(&config.db_user)
            .password(&config.db_password);

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Apply the transactions table migration.
    pub async fn run_migrations(&self) -> Result<()> {
        let migration_sql = include_str!("../migrations/001_create_transactions.sql");
        sqlx::raw_sql(migration_sql).execute(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }
}

#[async_trait]
impl LoadSink for TransactionStore {
    async fn load(&self, records: &[StandardizedRecord]) -> Result<u64> {
        // Convert up front so a malformed record surfaces before the
        // transaction is opened.
        let rows: Vec<TransactionRow> =
            records.iter().map(TransactionRow::try_from).collect::<Result<_>>()?;

        let mut tx = self.pool.begin().await?;
        for row in &rows {
            sqlx::query(
                "INSERT INTO transactions \
                 (account_number, counterparty_account, transaction_type, amount, \
                  currency_code, transaction_timestamp, source_file, raw_row_number) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(&row.account_number)
            .bind(&row.counterparty_account)
            .bind(&row.transaction_type)
            .bind(&row.amount)
            .bind(&row.currency_code)
            .bind(row.transaction_timestamp)
            .bind(&row.source_file)
            .bind(row.raw_row_number)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        info!("Clean rows inserted: {}", rows.len());
        Ok(rows.len() as u64)
    }
}

/// Typed view of a clean record, as bound into the insert statement.
#[derive(Debug)]
struct TransactionRow {
    account_number: String,
    counterparty_account: String,
    transaction_type: String,
    amount: BigDecimal,
    currency_code: String,
    transaction_timestamp: NaiveDate,
    source_file: String,
    raw_row_number: i32,
}

impl TryFrom<&StandardizedRecord> for TransactionRow {
    type Error = OnboarderError;

    fn try_from(record: &StandardizedRecord) -> Result<Self> {
        let amount = BigDecimal::from_str(record.field(fields::AMOUNT))
            .map_err(|e| OnboarderError::Record(format!("amount: {e}")))?;

        let transaction_timestamp =
            NaiveDate::parse_from_str(record.field(fields::TRANSACTION_TIMESTAMP), DATE_FORMAT)
                .map_err(|e| OnboarderError::Record(format!("transaction_timestamp: {e}")))?;

        let raw_row_number: i32 = record
            .field(fields::RAW_ROW_NUMBER)
            .parse()
            .map_err(|e| OnboarderError::Record(format!("raw_row_number: {e}")))?;

        Ok(Self {
            account_number: record.field(fields::ACCOUNT_NUMBER).to_string(),
            counterparty_account: record.field(fields::COUNTERPARTY_ACCOUNT).to_string(),
            transaction_type: record.field(fields::TRANSACTION_TYPE).to_string(),
            amount,
            currency_code: record.field(fields::CURRENCY_CODE).to_string(),
            transaction_timestamp,
            source_file: record.field(fields::SOURCE_FILE).to_string(),
            raw_row_number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_record() -> StandardizedRecord {
        let mut record = StandardizedRecord::new();
        record.set(fields::ACCOUNT_NUMBER, "12345678".to_string());
        record.set(fields::COUNTERPARTY_ACCOUNT, "".to_string());
        record.set(fields::TRANSACTION_TYPE, "WIRE".to_string());
        record.set(fields::AMOUNT, "100.00".to_string());
        record.set(fields::CURRENCY_CODE, "CAD".to_string());
        record.set(fields::TRANSACTION_TIMESTAMP, "2024-01-15".to_string());
        record.set(fields::SOURCE_FILE, "feed.csv".to_string());
        record.set(fields::RAW_ROW_NUMBER, "1".to_string());
        record
    }

    #[test]
    fn test_typed_row_from_clean_record() {
        let row = TransactionRow::try_from(&clean_record()).unwrap();
        assert_eq!(row.account_number, "12345678");
        assert_eq!(row.amount, BigDecimal::from_str("100.00").unwrap());
        assert_eq!(
            row.transaction_timestamp,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(row.raw_row_number, 1);
    }

    #[test]
    fn test_typed_row_keeps_decimal_scale() {
        let mut record = clean_record();
        record.set(fields::AMOUNT, "0.10".to_string());

        let row = TransactionRow::try_from(&record).unwrap();
        assert_eq!(row.amount.to_string(), "0.10");
    }

    #[test]
    fn test_malformed_amount_is_a_record_error() {
        let mut record = clean_record();
        record.set(fields::AMOUNT, "not-a-number".to_string());

        let err = TransactionRow::try_from(&record).unwrap_err();
        assert!(matches!(err, OnboarderError::Record(_)));
    }

    #[test]
    fn test_malformed_row_number_is_a_record_error() {
        let mut record = clean_record();
        record.set(fields::RAW_ROW_NUMBER, "".to_string());

        let err = TransactionRow::try_from(&record).unwrap_err();
        assert!(matches!(err, OnboarderError::Record(_)));
    }
}
