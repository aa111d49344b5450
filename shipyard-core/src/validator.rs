//! Field-level constraints gating ship creation and updates.

use chrono::{DateTime, Datelike, Utc};

use crate::domain::ShipDraft;
use crate::error::{Result, ShipyardError};

/// Maximum length of ship and planet names, in UTF-16 code units.
pub const MAX_NAME_LEN: usize = 50;
/// Slowest accepted speed after rounding.
pub const MIN_SPEED: f64 = 0.01;
/// Fastest accepted speed after rounding.
pub const MAX_SPEED: f64 = 0.99;
/// Smallest accepted crew.
pub const MIN_CREW_SIZE: i32 = 1;
/// Largest accepted crew.
pub const MAX_CREW_SIZE: i32 = 9999;
/// Earliest accepted production year.
pub const MIN_PROD_YEAR: i32 = 2800;
/// Latest accepted production year.
pub const MAX_PROD_YEAR: i32 = 3019;

/// Whether `name` is non-empty and at most [`MAX_NAME_LEN`] UTF-16 code units.
pub fn is_name_valid(name: &str) -> bool {
    is_label_valid(name)
}

/// Whether `planet` is non-empty and at most [`MAX_NAME_LEN`] UTF-16 code units.
pub fn is_planet_valid(planet: &str) -> bool {
    is_label_valid(planet)
}

/// Whether an already-rounded speed is within bounds.
pub fn is_speed_valid(speed: f64) -> bool {
    (MIN_SPEED..=MAX_SPEED).contains(&speed)
}

/// Whether the crew size is within bounds.
pub fn is_crew_size_valid(crew_size: i32) -> bool {
    (MIN_CREW_SIZE..=MAX_CREW_SIZE).contains(&crew_size)
}

/// Whether the production year falls in the accepted range.
pub fn is_prod_date_valid(prod_date: &DateTime<Utc>) -> bool {
    (MIN_PROD_YEAR..=MAX_PROD_YEAR).contains(&prod_date.year())
}

/// Whether a draft carries every required field with an acceptable value.
pub fn is_ship_valid(draft: &ShipDraft) -> bool {
    validate_ship(draft).is_ok()
}

/// Check a complete draft, reporting the first missing or rejected field.
///
/// `isUsed` is optional and never rejected.
pub fn validate_ship(draft: &ShipDraft) -> Result<()> {
    check("name", draft.name.as_deref(), is_name_valid)?;
    check("planet", draft.planet.as_deref(), is_planet_valid)?;
    check("shipType", draft.ship_type, |_| true)?;
    check("speed", draft.speed, is_speed_valid)?;
    check("crewSize", draft.crew_size, is_crew_size_valid)?;
    check("prodDate", draft.prod_date.as_ref(), is_prod_date_valid)?;
    Ok(())
}

fn check<T: Copy>(field: &str, value: Option<T>, valid: impl FnOnce(T) -> bool) -> Result<()> {
    match value {
        None => Err(ShipyardError::Validation(format!("missing {field}"))),
        Some(value) if valid(value) => Ok(()),
        Some(_) => Err(ShipyardError::invalid_field(field)),
    }
}

fn is_label_valid(value: &str) -> bool {
    !value.is_empty() && value.encode_utf16().count() <= MAX_NAME_LEN
}
