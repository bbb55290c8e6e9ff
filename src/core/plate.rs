//! Plate normalization.
//!
//! A canonical plate is uppercase ASCII alphanumeric. Normalization strips
//! everything else, so applying it twice gives the same result as once.

use crate::errors::{Error, Result};

/// Longest plate accepted for storage
pub const MAX_PLATE_LEN: usize = 7;

/// Shortest normalized input that triggers a vehicle lookup
pub const MIN_LOOKUP_LEN: usize = 3;

/// Strips every non-alphanumeric character and uppercases the rest.
#[must_use]
pub fn normalize_plate(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Normalizes `raw` and checks it can be stored.
///
/// # Errors
/// Returns a validation error when the normalized plate is empty or longer
/// than [`MAX_PLATE_LEN`].
pub fn validated_plate(raw: &str) -> Result<String> {
    let plate = normalize_plate(raw);
    if plate.is_empty() {
        return Err(Error::validation("Please enter the vehicle plate"));
    }
    if plate.len() > MAX_PLATE_LEN {
        return Err(Error::validation(format!(
            "Plate {plate} is longer than {MAX_PLATE_LEN} characters"
        )));
    }
    Ok(plate)
}
