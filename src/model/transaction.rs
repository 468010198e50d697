use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::amount::Amount;

/// Whether money moved into or out of the account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Credit,
    Debit,
}

impl TransactionType {
    pub fn parse(value: &str) -> Option<TransactionType> {
        match value {
            "credit" => Some(TransactionType::Credit),
            "debit" => Some(TransactionType::Debit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Credit => "credit",
            TransactionType::Debit => "debit",
        }
    }
}

/// A recorded transaction. `id` is the application-assigned identifier that
/// clients look records up by; it is generated once, at creation, and never
/// reassigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub amount: Amount,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub description: String,
    pub date: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        id: String,
        amount: Amount,
        transaction_type: TransactionType,
        description: String,
        date: DateTime<Utc>,
    ) -> Transaction {
        Transaction {
            id,
            amount,
            transaction_type,
            description,
            date,
        }
    }

    /// Builds a new transaction from validated fields, assigning a fresh id
    /// and defaulting `date` to now when the caller supplied none. Dates are
    /// held at millisecond precision, the granularity the store keeps, so a
    /// created entity compares equal to its later fetch.
    pub fn create(
        amount: Amount,
        transaction_type: TransactionType,
        description: String,
        date: Option<DateTime<Utc>>,
    ) -> Transaction {
        let date = date.unwrap_or_else(Utc::now);

        Transaction {
            id: nanoid::nanoid!(),
            amount,
            transaction_type,
            description,
            date: Utc
                .timestamp_millis_opt(date.timestamp_millis())
                .single()
                .unwrap(),
        }
    }
}
