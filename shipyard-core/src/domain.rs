//! Domain entities for Shipyard.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{Result, ShipyardError};

/// Identifier carried by ships that storage has not persisted yet.
pub const UNASSIGNED_ID: i64 = 0;

/// Closed set of ship classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShipType {
    /// Cargo and passenger transport.
    Transport,
    /// Armed vessel.
    Military,
    /// Trading vessel.
    Merchant,
}

impl ShipType {
    /// All ship types in declaration order.
    pub const ALL: [ShipType; 3] = [Self::Transport, Self::Military, Self::Merchant];

    /// Wire and storage tag for the ship type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "TRANSPORT",
            Self::Military => "MILITARY",
            Self::Merchant => "MERCHANT",
        }
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipType {
    type Err = ShipyardError;

    fn from_str(value: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|ship_type| ship_type.as_str() == value)
            .ok_or_else(|| ShipyardError::Validation(format!("unknown ship type {value:?}")))
    }
}

/// A ship record as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship classification.
    pub ship_type: ShipType,
    /// Production date, as epoch milliseconds on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[schema(value_type = i64)]
    pub prod_date: DateTime<Utc>,
    /// Whether the ship has had previous owners.
    #[serde(alias = "used")]
    pub is_used: bool,
    /// Cruising speed, rounded to two decimals.
    pub speed: f64,
    /// Number of crew members.
    pub crew_size: i32,
    /// Derived rating, rounded to two decimals.
    pub rating: f64,
}

impl Ship {
    /// Calendar year the ship was produced in.
    pub fn prod_year(&self) -> i32 {
        self.prod_date.year()
    }

    /// Whether storage has assigned an identifier to this ship.
    pub fn is_persisted(&self) -> bool {
        self.id > UNASSIGNED_ID
    }
}

/// Caller-supplied ship fields for creation or partial update.
///
/// Absent fields are left untouched by an update; creation requires all of
/// them except `isUsed`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipDraft {
    /// Ship name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Home planet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planet: Option<String>,
    /// Ship classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_type: Option<ShipType>,
    /// Production date as epoch milliseconds.
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<i64>)]
    pub prod_date: Option<DateTime<Utc>>,
    /// Whether the ship has had previous owners.
    #[serde(default, alias = "used", skip_serializing_if = "Option::is_none")]
    pub is_used: Option<bool>,
    /// Cruising speed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Number of crew members.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew_size: Option<i32>,
}

impl ShipDraft {
    /// Whether the draft touches any field that feeds the rating.
    pub fn affects_rating(&self) -> bool {
        self.prod_date.is_some() || self.is_used.is_some() || self.speed.is_some()
    }
}

#[cfg(test)]
pub(crate) fn year_start(year: i32) -> DateTime<Utc> {
    use chrono::TimeZone;

    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[cfg(test)]
pub(crate) fn sample_ship(id: i64) -> Ship {
    Ship {
        id,
        name: "Enterprise".to_string(),
        planet: "Earth".to_string(),
        ship_type: ShipType::Military,
        prod_date: year_start(3000),
        is_used: false,
        speed: 0.5,
        crew_size: 100,
        rating: 2.0,
    }
}
