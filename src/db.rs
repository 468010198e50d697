use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};

use rusqlite::{params, params_from_iter, types::Value, Connection, Row};

use log::error;

use crate::model::{
    amount::Amount,
    error::ApiError,
    transaction::{Transaction, TransactionType},
};

/// The conditions a listing query matches against, ANDed together. The date
/// range is inclusive on both ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub transaction_type: Option<TransactionType>,
    pub date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

/// Repository for persisted transactions. Rows are keyed internally by the
/// SQLite rowid; the application-facing `id` column is a separate unique
/// text key. Listing order is ascending rowid, i.e. insertion order, which
/// keeps pagination deterministic.
pub struct Db {
    connection: Mutex<Connection>,
}

impl Db {
    pub fn open_in_memory() -> Db {
        Self::init(Connection::open_in_memory().unwrap())
    }

    pub fn open(path: &str) -> Db {
        Self::init(Connection::open(path).unwrap())
    }

    fn init(connection: Connection) -> Db {
        connection
            .execute(
                "CREATE TABLE IF NOT EXISTS transactions (
                    id TEXT NOT NULL UNIQUE,
                    amount INTEGER NOT NULL,
                    kind TEXT NOT NULL CHECK (kind IN ('credit', 'debit')),
                    description TEXT NOT NULL,
                    date INTEGER NOT NULL
                )",
                (),
            )
            .unwrap();

        Db {
            connection: Mutex::new(connection),
        }
    }

    pub fn insert_transaction(&self, transaction: Transaction) -> Result<Transaction, ApiError> {
        let conn = self.connection.lock().unwrap();

        conn.execute(
            "INSERT INTO transactions (id, amount, kind, description, date) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                transaction.id,
                transaction.amount.as_cents(),
                transaction.transaction_type.as_str(),
                transaction.description,
                transaction.date.timestamp_millis(),
            ],
        )?;

        Ok(transaction)
    }

    pub fn find_transaction(&self, id: &str) -> Result<Option<Transaction>, ApiError> {
        let conn = self.connection.lock().unwrap();

        let mut stmt = conn.prepare(
            "SELECT id, amount, kind, description, date FROM transactions WHERE id = ?1",
        )?;

        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => Ok(Some(Self::row_to_transaction(row)?)),
            None => Ok(None),
        }
    }

    pub fn find_transactions(
        &self,
        filter: &TransactionFilter,
        skip: u32,
        limit: u32,
    ) -> Result<Vec<Transaction>, ApiError> {
        let conn = self.connection.lock().unwrap();

        let mut sql = String::from("SELECT id, amount, kind, description, date FROM transactions");
        let mut conditions: Vec<&str> = Vec::new();
        let mut bindings: Vec<Value> = Vec::new();

        if let Some(transaction_type) = filter.transaction_type {
            conditions.push("kind = ?");
            bindings.push(Value::Text(String::from(transaction_type.as_str())));
        }

        if let Some((start, end)) = filter.date_range {
            conditions.push("date >= ?");
            bindings.push(Value::Integer(start.timestamp_millis()));
            conditions.push("date <= ?");
            bindings.push(Value::Integer(end.timestamp_millis()));
        }

        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        sql.push_str(" ORDER BY rowid ASC LIMIT ? OFFSET ?");
        bindings.push(Value::Integer(i64::from(limit)));
        bindings.push(Value::Integer(i64::from(skip)));

        let mut transactions: Vec<Transaction> = Vec::new();
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bindings))?;
        while let Some(row) = rows.next()? {
            transactions.push(Self::row_to_transaction(row)?);
        }

        Ok(transactions)
    }

    fn row_to_transaction(row: &Row) -> Result<Transaction, ApiError> {
        let date = Utc
            .timestamp_millis_opt(row.get::<usize, i64>(4)?)
            .single()
            .unwrap();

        let kind = row.get::<usize, String>(2)?;
        let transaction_type = match TransactionType::parse(&kind) {
            Some(transaction_type) => transaction_type,
            None => {
                error!("unrecognised transaction kind '{}' in store", kind);
                return Err(ApiError::InternalError(String::from("Internal Error")));
            }
        };

        Ok(Transaction::new(
            row.get::<usize, String>(0)?,
            Amount::from_cents(row.get::<usize, i64>(1)?),
            transaction_type,
            row.get::<usize, String>(3)?,
            date,
        ))
    }
}
