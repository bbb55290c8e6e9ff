//! Report and CSV export endpoints.

use super::{
    AppState,
    extract::{PathParam, QueryParams},
};
use crate::{
    core::report::{self, DateRange, Report},
    errors::Result,
};
use axum::{
    Json,
    extract::State,
    http::{
        StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// `?start=&end=` (ISO dates); missing or blank ends fall back to the trailing default range.
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    /// First day, inclusive
    #[serde(default, deserialize_with = "blank_as_none")]
    pub start: Option<NaiveDate>,
    /// Last day, inclusive
    #[serde(default, deserialize_with = "blank_as_none")]
    pub end: Option<NaiveDate>,
}

/// Date inputs submit an empty string when cleared.
fn blank_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

impl RangeQuery {
    /// Fills missing ends from the range of `days` ending `today`.
    pub fn resolve(&self, today: NaiveDate, days: u32) -> Result<DateRange> {
        let default = DateRange::trailing(today, days);
        DateRange::new(
            self.start.unwrap_or(default.start),
            self.end.unwrap_or(default.end),
        )
    }
}

fn requested_range(state: &AppState, query: &RangeQuery) -> Result<DateRange> {
    let today = chrono::Local::now().date_naive();
    query.resolve(today, state.config.reports.default_range_days)
}

/// `GET /api/reports` - stats, daily series and the first page of events.
pub async fn report(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<RangeQuery>,
) -> Result<Json<Report>> {
    let range = requested_range(&state, &query)?;
    let report =
        report::build_report(&state.database, range, state.config.reports.display_limit).await?;
    Ok(Json(report))
}

/// `GET /api/reports/export.csv` - every event of the range as a CSV download.
pub async fn export_csv(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<RangeQuery>,
) -> Result<Response> {
    let range = requested_range(&state, &query)?;
    let events = report::fetch_events(&state.database, range).await?;
    let csv = report::export_csv(&events);
    tracing::info!(rows = events.len(), file = %range.csv_file_name(), "CSV exported");

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", range.csv_file_name()),
            ),
        ],
        csv,
    )
        .into_response())
}

/// `DELETE /api/reports/events/{id}` - remove one event from the log.
pub async fn delete_event(
    State(state): State<AppState>,
    PathParam(event_id): PathParam<i64>,
) -> Result<StatusCode> {
    report::delete_event(&state.database, event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_defaults_to_trailing_range() {
        let range = RangeQuery::default().resolve(date(2024, 6, 30), 30).unwrap();
        assert_eq!(range.start, date(2024, 5, 31));
        assert_eq!(range.end, date(2024, 6, 30));
    }

    #[test]
    fn test_resolve_keeps_given_ends() {
        let query = RangeQuery {
            start: Some(date(2024, 1, 1)),
            end: None,
        };
        let range = query.resolve(date(2024, 1, 10), 30).unwrap();
        assert_eq!(range.start, date(2024, 1, 1));
        assert_eq!(range.end, date(2024, 1, 10));
    }

    #[test]
    fn test_resolve_rejects_reversed_range() {
        let query = RangeQuery {
            start: Some(date(2024, 2, 1)),
            end: Some(date(2024, 1, 1)),
        };
        assert!(query.resolve(date(2024, 3, 1), 30).is_err());
    }
}
