use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use log::info;
use serde::Deserialize;

use crate::{
    appstate::AppState,
    db::TransactionFilter,
    middleware::request_tracing::RequestTraceData,
    model::{
        error::ApiError,
        transaction::{Transaction, TransactionType},
    },
};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListTransactionsQuery {
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Accepts an RFC 3339 timestamp or a plain `YYYY-MM-DD` date, read as
/// midnight UTC.
fn parse_date_bound(value: &str) -> Result<DateTime<Utc>, ApiError> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))),
        Err(_) => Err(ApiError::InputFailedValidation(format!(
            "Invalid date '{}'",
            value
        ))),
    }
}

fn validate_query(
    query: &ListTransactionsQuery,
) -> Result<(TransactionFilter, u32, u32), ApiError> {
    let page = query.page.unwrap_or(DEFAULT_PAGE);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    if page == 0 {
        return Err(ApiError::InputFailedValidation(String::from(
            "Page must be at least 1",
        )));
    }

    if limit == 0 {
        return Err(ApiError::InputFailedValidation(String::from(
            "Limit must be at least 1",
        )));
    }

    let skip = match (page - 1).checked_mul(limit) {
        Some(skip) => skip,
        None => {
            return Err(ApiError::InputFailedValidation(String::from(
                "Page is out of range",
            )))
        }
    };

    let transaction_type = match query.transaction_type.as_deref() {
        Some(value) => match TransactionType::parse(value) {
            Some(transaction_type) => Some(transaction_type),
            None => {
                return Err(ApiError::InputFailedValidation(String::from(
                    "Type must be either 'credit' or 'debit'",
                )))
            }
        },
        None => None,
    };

    // The date filter only applies when both bounds are present. A single
    // bound is ignored, not treated as a half-open range.
    let date_range = match (&query.start_date, &query.end_date) {
        (Some(start), Some(end)) => Some((parse_date_bound(start)?, parse_date_bound(end)?)),
        _ => None,
    };

    let filter = TransactionFilter {
        transaction_type,
        date_range,
    };

    return Ok((filter, skip, limit));
}

pub async fn list_transactions(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<ListTransactionsQuery>,
    Extension(request_trace_data): Extension<RequestTraceData>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    info!(
        "[{}] list_transactions called with {:?}",
        request_trace_data.get_id(),
        query
    );

    let (filter, skip, limit) = validate_query(&query)?;
    let transactions = app_state
        .get_db()
        .find_transactions(&filter, skip, limit)?;

    Ok(Json(transactions))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::model::transaction::TransactionType;

    use super::{parse_date_bound, validate_query, ListTransactionsQuery};

    fn query(
        transaction_type: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> ListTransactionsQuery {
        ListTransactionsQuery {
            transaction_type: transaction_type.map(String::from),
            start_date: start_date.map(String::from),
            end_date: end_date.map(String::from),
            page,
            limit,
        }
    }

    #[test]
    fn parse_date_bound_test() {
        assert_eq!(
            parse_date_bound("2024-01-01").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_date_bound("2024-01-01T12:30:00Z").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap()
        );
        assert!(parse_date_bound("January 1st").is_err());
        assert!(parse_date_bound("2024-13-01").is_err());
    }

    #[test]
    fn defaults_to_first_page_of_ten_test() {
        let (filter, skip, limit) = validate_query(&query(None, None, None, None, None)).unwrap();

        assert_eq!(filter.transaction_type, None);
        assert_eq!(filter.date_range, None);
        assert_eq!(skip, 0);
        assert_eq!(limit, 10);
    }

    #[test]
    fn computes_skip_from_one_indexed_page_test() {
        let (_, skip, limit) = validate_query(&query(None, None, None, Some(3), Some(25))).unwrap();

        assert_eq!(skip, 50);
        assert_eq!(limit, 25);
    }

    #[test]
    fn rejects_non_positive_page_and_limit_test() {
        assert!(validate_query(&query(None, None, None, Some(0), None)).is_err());
        assert!(validate_query(&query(None, None, None, None, Some(0))).is_err());
    }

    #[test]
    fn rejects_unrecognised_type_test() {
        assert!(validate_query(&query(Some("transfer"), None, None, None, None)).is_err());
        assert_eq!(
            validate_query(&query(Some("debit"), None, None, None, None))
                .unwrap()
                .0
                .transaction_type,
            Some(TransactionType::Debit)
        );
    }

    #[test]
    fn single_date_bound_is_ignored_test() {
        let (filter, _, _) =
            validate_query(&query(None, Some("2024-01-01"), None, None, None)).unwrap();
        assert_eq!(filter.date_range, None);

        let (filter, _, _) =
            validate_query(&query(None, None, Some("2024-01-31"), None, None)).unwrap();
        assert_eq!(filter.date_range, None);

        let (filter, _, _) = validate_query(&query(
            None,
            Some("2024-01-01"),
            Some("2024-01-31"),
            None,
            None,
        ))
        .unwrap();
        assert!(filter.date_range.is_some());
    }
}
