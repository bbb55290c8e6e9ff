//! Core business logic - framework-agnostic registration, access logging and reporting.
//!
//! Every operation takes the store connection as an explicit argument; nothing
//! in this module holds a global client.

/// Access logging: plate lookup, recording and recent activity
pub mod access;
/// Person-vehicle links
pub mod link;
/// Person registration
pub mod person;
/// Plate normalization rules
pub mod plate;
/// One-or-many relationship payload adapter
pub mod related;
/// Period reports, daily series and CSV export
pub mod report;
/// Vehicle registration
pub mod vehicle;

/// Trims `value` and maps blank input to `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
