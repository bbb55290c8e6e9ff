//! Report generation business logic.
//!
//! A report covers an inclusive range of calendar days. The store is queried
//! once for the events in the range and once for the active people count;
//! everything else (totals, the per-day series, the movement split and the
//! CSV export) is computed from the fetched list.

use crate::{
    core::{
        access::{EventView, expand_events},
        person::count_active_people,
    },
    entities::{AccessEvent, MovementKind, access_event},
    errors::{Error, Result},
};
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use sea_orm::{QueryOrder, prelude::*};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Header row of the CSV export.
pub const CSV_HEADER: &str = "Data/Hora,Placa,Tipo,Motorista,Veículo,Observações";

const NOT_AVAILABLE: &str = "N/A";

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// First day
    pub start: NaiveDate,
    /// Last day
    pub end: NaiveDate,
}

impl DateRange {
    /// Builds a range, rejecting one that ends before it starts.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The range ending on `today` and starting `days` days earlier.
    #[must_use]
    pub fn trailing(today: NaiveDate, days: u32) -> Self {
        Self {
            start: today
                .checked_sub_days(Days::new(u64::from(days)))
                .unwrap_or(NaiveDate::MIN),
            end: today,
        }
    }

    /// Midnight at the start of the first day.
    #[must_use]
    pub fn lower_bound(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// 23:59:59 on the last day.
    #[must_use]
    pub fn upper_bound(&self) -> NaiveDateTime {
        self.end.and_time(NaiveTime::MIN) + TimeDelta::seconds(86_399)
    }

    /// Every calendar day in the range, in order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// Download name for the CSV export of this range.
    #[must_use]
    pub fn csv_file_name(&self) -> String {
        format!("relatorio_acessos_{}_{}.csv", self.start, self.end)
    }
}

/// Summary counts for a report period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportStats {
    /// Number of events in the period
    pub total: usize,
    /// Events that were entries
    pub entries: usize,
    /// Events that were exits
    pub exits: usize,
    /// Distinct plates seen in the period
    pub unique_vehicles: usize,
    /// Active people registered, independent of the period
    pub active_people: u64,
}

/// Entry and exit counts for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    /// The day
    pub date: NaiveDate,
    /// Chart label, `dd/MM`
    pub day: String,
    /// Entries on the day
    pub entries: usize,
    /// Exits on the day
    pub exits: usize,
    /// `entries + exits`
    pub total: usize,
}

/// One slice of the entries-versus-exits chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MovementSlice {
    /// Slice label
    pub name: &'static str,
    /// Number of events
    pub value: usize,
}

/// Everything the reports screen shows for a period.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Period covered
    pub range: DateRange,
    /// Summary counts
    pub stats: ReportStats,
    /// One row per day of the period
    pub daily: Vec<DailyCount>,
    /// Entries and exits for the pie chart
    pub movement_split: [MovementSlice; 2],
    /// Newest events, capped at the display limit
    pub events: Vec<EventView>,
    /// Whether `events` was cut short
    pub truncated: bool,
}

/// Fetches every event recorded in `range`, newest first, with person and vehicle details.
pub async fn fetch_events(db: &DatabaseConnection, range: DateRange) -> Result<Vec<EventView>> {
    let events = AccessEvent::find()
        .filter(access_event::Column::RecordedAt.gte(range.lower_bound()))
        .filter(access_event::Column::RecordedAt.lte(range.upper_bound()))
        .order_by_desc(access_event::Column::RecordedAt)
        .order_by_desc(access_event::Column::Id)
        .all(db)
        .await?;
    tracing::debug!(start = %range.start, end = %range.end, count = events.len(), "Fetched events for report");
    expand_events(db, events).await
}

/// Counts totals, movement kinds and distinct plates.
///
/// `active_people` is left at zero; it does not depend on the events.
#[must_use]
pub fn summarize(events: &[EventView]) -> ReportStats {
    let entries = events
        .iter()
        .filter(|e| e.event.movement == MovementKind::Entry)
        .count();
    let exits = events
        .iter()
        .filter(|e| e.event.movement == MovementKind::Exit)
        .count();
    let plates: HashSet<&str> = events.iter().map(|e| e.event.plate.as_str()).collect();

    ReportStats {
        total: events.len(),
        entries,
        exits,
        unique_vehicles: plates.len(),
        active_people: 0,
    }
}

/// Builds one row per day of `range`, including days without events.
#[must_use]
pub fn daily_series(events: &[EventView], range: DateRange) -> Vec<DailyCount> {
    let mut per_day: HashMap<NaiveDate, (usize, usize)> = HashMap::new();
    for view in events {
        let counts = per_day.entry(view.event.recorded_at.date()).or_default();
        match view.event.movement {
            MovementKind::Entry => counts.0 += 1,
            MovementKind::Exit => counts.1 += 1,
        }
    }

    range
        .days()
        .map(|date| {
            let (entries, exits) = per_day.get(&date).copied().unwrap_or_default();
            DailyCount {
                date,
                day: date.format("%d/%m").to_string(),
                entries,
                exits,
                total: entries + exits,
            }
        })
        .collect()
}

/// Entries versus exits, labelled for the pie chart.
#[must_use]
pub const fn movement_split(stats: &ReportStats) -> [MovementSlice; 2] {
    [
        MovementSlice {
            name: "Entradas",
            value: stats.entries,
        },
        MovementSlice {
            name: "Saídas",
            value: stats.exits,
        },
    ]
}

/// Assembles the full report for `range`, keeping at most `display_limit` events for the table.
pub async fn build_report(
    db: &DatabaseConnection,
    range: DateRange,
    display_limit: usize,
) -> Result<Report> {
    let mut events = fetch_events(db, range).await?;
    let active_people = count_active_people(db).await?;

    let stats = ReportStats {
        active_people,
        ..summarize(&events)
    };
    let daily = daily_series(&events, range);
    let truncated = events.len() > display_limit;
    events.truncate(display_limit);

    Ok(Report {
        range,
        stats,
        daily,
        movement_split: movement_split(&stats),
        events,
        truncated,
    })
}

/// Serializes every event to CSV, one header row plus one row per event.
///
/// Fields are joined with commas as-is; commas or quotes inside a note or
/// name are not escaped.
#[must_use]
pub fn export_csv(events: &[EventView]) -> String {
    std::iter::once(CSV_HEADER.to_string())
        .chain(events.iter().map(csv_row))
        .collect::<Vec<_>>()
        .join("\n")
}

fn csv_row(view: &EventView) -> String {
    let event = &view.event;
    let person = view
        .person
        .as_ref()
        .map_or(NOT_AVAILABLE, |p| p.name.as_str());
    let vehicle = view
        .vehicle
        .as_ref()
        .map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{} {}", v.make, v.model));

    [
        event.recorded_at.format("%d/%m/%Y %H:%M").to_string(),
        event.plate.clone(),
        event.movement.label().to_string(),
        person.to_string(),
        vehicle,
        event.note.clone().unwrap_or_default(),
    ]
    .join(",")
}

/// Deletes a single access event from the log.
pub async fn delete_event(db: &DatabaseConnection, event_id: i64) -> Result<()> {
    let result = AccessEvent::delete_by_id(event_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::EventNotFound { id: event_id });
    }
    tracing::info!(event_id, "Access event deleted");
    Ok(())
}
