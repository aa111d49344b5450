//! Multi-criteria filtering over ship collections.

use std::cmp::Ordering;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Ship, ShipType};

/// Optional filters applied when listing or counting ships.
///
/// Every `None` field disables the corresponding filter; active filters are
/// combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipCriteria {
    /// Substring that the ship name must contain (case-sensitive).
    pub name: Option<String>,
    /// Substring that the planet must contain (case-sensitive).
    pub planet: Option<String>,
    /// Exact ship type.
    pub ship_type: Option<ShipType>,
    /// Ships produced in this year or later pass.
    pub after: Option<DateTime<Utc>>,
    /// Ships produced strictly before this year pass.
    pub before: Option<DateTime<Utc>>,
    /// Exact usage flag.
    pub is_used: Option<bool>,
    /// Inclusive lower speed bound.
    pub min_speed: Option<f64>,
    /// Inclusive upper speed bound.
    pub max_speed: Option<f64>,
    /// Inclusive lower crew bound.
    pub min_crew_size: Option<i32>,
    /// Inclusive upper crew bound.
    pub max_crew_size: Option<i32>,
    /// Inclusive lower rating bound.
    pub min_rating: Option<f64>,
    /// Inclusive upper rating bound.
    pub max_rating: Option<f64>,
}

impl ShipCriteria {
    /// Whether no filter is active.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether `ship` passes every active filter.
    ///
    /// Date filters compare production years only: `after` is inclusive
    /// while `before` is strict, so a ship built in year Y passes
    /// `after = Y` and fails `before = Y`.
    pub fn matches(&self, ship: &Ship) -> bool {
        self.matches_text(ship)
            && self.matches_year(ship)
            && self.is_used.is_none_or(|is_used| is_used == ship.is_used)
            && within_f64(ship.speed, self.min_speed, self.max_speed)
            && within(ship.crew_size, self.min_crew_size, self.max_crew_size)
            && within_f64(ship.rating, self.min_rating, self.max_rating)
    }

    fn matches_text(&self, ship: &Ship) -> bool {
        self.name
            .as_deref()
            .is_none_or(|name| ship.name.contains(name))
            && self
                .planet
                .as_deref()
                .is_none_or(|planet| ship.planet.contains(planet))
            && self
                .ship_type
                .is_none_or(|ship_type| ship_type == ship.ship_type)
    }

    fn matches_year(&self, ship: &Ship) -> bool {
        let year = ship.prod_year();
        self.after.is_none_or(|after| year >= after.year())
            && self.before.is_none_or(|before| year < before.year())
    }
}

/// Ships from `ships` that pass `criteria`, in their original order.
pub fn query_ships<'a, I>(ships: I, criteria: &ShipCriteria) -> Vec<Ship>
where
    I: IntoIterator<Item = &'a Ship>,
{
    ships
        .into_iter()
        .filter(|ship| criteria.matches(ship))
        .cloned()
        .collect()
}

/// Number of ships in `ships` that pass `criteria`.
pub fn count_ships<'a, I>(ships: I, criteria: &ShipCriteria) -> usize
where
    I: IntoIterator<Item = &'a Ship>,
{
    let ships = ships.into_iter();
    if criteria.is_empty() {
        return ships.count();
    }
    ships.filter(|ship| criteria.matches(ship)).count()
}

fn within<T: Ord>(value: T, min: Option<T>, max: Option<T>) -> bool {
    min.is_none_or(|min| min <= value) && max.is_none_or(|max| value <= max)
}

// Total order: a NaN bound rejects every ship instead of passing them all.
fn within_f64(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.is_none_or(|min| min.total_cmp(&value) != Ordering::Greater)
        && max.is_none_or(|max| max.total_cmp(&value) != Ordering::Less)
}
