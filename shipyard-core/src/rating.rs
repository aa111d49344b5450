//! Derived rating computation.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::Ship;
use crate::error::{Result, ShipyardError};

/// Reference year of the catalog. Ship age is measured against it, never
/// against the wall clock.
pub const CURRENT_YEAR: i32 = 3019;

const BASE_RATING: f64 = 80.0;
const USED_FACTOR: f64 = 0.5;
const NEW_FACTOR: f64 = 1.0;
const SCALE: u32 = 2;

/// Round to two decimals, halves away from zero.
///
/// Rounding works on the shortest decimal form of `value`, so `2.345`
/// becomes `2.35` even though its binary value is slightly below the half.
pub fn round_half_up(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    Decimal::from_str(&value.to_string())
        .ok()
        .and_then(|decimal| {
            decimal
                .round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero)
                .to_f64()
        })
        .unwrap_or_else(|| (value * 100.0).round() / 100.0)
}

/// Compute the rating for the given speed, usage flag and production date.
pub fn compute_rating(speed: f64, is_used: bool, prod_date: &DateTime<Utc>) -> Result<f64> {
    let year = prod_date.year();
    let age = CURRENT_YEAR - year + 1;
    if age <= 0 {
        return Err(ShipyardError::Rating(format!(
            "production year {year} is after {CURRENT_YEAR}"
        )));
    }
    let usage = if is_used { USED_FACTOR } else { NEW_FACTOR };
    Ok(round_half_up(BASE_RATING * speed * usage / f64::from(age)))
}

/// Recompute and store the rating of `ship` from its current fields.
pub fn refresh_rating(ship: &mut Ship) -> Result<()> {
    ship.rating = compute_rating(ship.speed, ship.is_used, &ship.prod_date)?;
    Ok(())
}
