//! Sorting of ship listings.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Ship;
use crate::error::{Result, ShipyardError};

/// Field a listing is sorted by, ascending.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShipOrder {
    /// Storage identifier.
    #[default]
    Id,
    /// Speed.
    Speed,
    /// Production date.
    Date,
    /// Derived rating.
    Rating,
}

impl ShipOrder {
    /// All orders in declaration order.
    pub const ALL: [ShipOrder; 4] = [Self::Id, Self::Speed, Self::Date, Self::Rating];

    /// Wire tag for the order.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Speed => "SPEED",
            Self::Date => "DATE",
            Self::Rating => "RATING",
        }
    }

    /// Compare two ships on the selected field.
    pub fn compare(&self, left: &Ship, right: &Ship) -> Ordering {
        match self {
            Self::Id => left.id.cmp(&right.id),
            Self::Speed => left.speed.total_cmp(&right.speed),
            Self::Date => left.prod_date.cmp(&right.prod_date),
            Self::Rating => left.rating.total_cmp(&right.rating),
        }
    }
}

impl fmt::Display for ShipOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipOrder {
    type Err = ShipyardError;

    fn from_str(value: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == value)
            .ok_or_else(|| ShipyardError::InvalidOrder(value.to_string()))
    }
}

/// Parse an optional order parameter, falling back to [`ShipOrder::Id`] only
/// when it is absent.
pub fn parse_order(raw: Option<&str>) -> Result<ShipOrder> {
    raw.map_or(Ok(ShipOrder::default()), |raw| raw.parse())
}

/// Stable ascending sort of `ships` by `order`.
pub fn sort_by_order(ships: &mut [Ship], order: ShipOrder) {
    ships.sort_by(|left, right| order.compare(left, right));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{sample_ship, year_start};

    fn ship(id: i64, speed: f64, year: i32, rating: f64) -> Ship {
        let mut ship = sample_ship(id);
        ship.speed = speed;
        ship.prod_date = year_start(year);
        ship.rating = rating;
        ship
    }

    fn ids(ships: &[Ship]) -> Vec<i64> {
        ships.iter().map(|ship| ship.id).collect()
    }

    fn unsorted() -> Vec<Ship> {
        vec![
            ship(3, 0.2, 2950, 1.5),
            ship(1, 0.9, 3010, 0.4),
            ship(2, 0.5, 2900, 3.1),
        ]
    }

    #[test]
    fn sorts_by_each_field_ascending() {
        let mut ships = unsorted();
        sort_by_order(&mut ships, ShipOrder::Id);
        assert_eq!(ids(&ships), vec![1, 2, 3]);

        sort_by_order(&mut ships, ShipOrder::Speed);
        assert_eq!(ids(&ships), vec![3, 2, 1]);

        sort_by_order(&mut ships, ShipOrder::Date);
        assert_eq!(ids(&ships), vec![2, 3, 1]);

        sort_by_order(&mut ships, ShipOrder::Rating);
        assert_eq!(ids(&ships), vec![1, 3, 2]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let mut ships = vec![
            ship(5, 0.5, 3000, 1.0),
            ship(2, 0.5, 3000, 1.0),
            ship(9, 0.5, 3000, 1.0),
        ];
        sort_by_order(&mut ships, ShipOrder::Speed);

        assert_eq!(ids(&ships), vec![5, 2, 9]);
    }

    #[test]
    fn parse_defaults_only_when_absent() {
        assert_eq!(parse_order(None), Ok(ShipOrder::Id));
        assert_eq!(parse_order(Some("RATING")), Ok(ShipOrder::Rating));
        assert_eq!(
            parse_order(Some("NAME")),
            Err(ShipyardError::InvalidOrder("NAME".to_string()))
        );
        assert!(parse_order(Some("speed")).is_err());
    }
}
