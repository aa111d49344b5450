//! Creation and partial update of ships.

use crate::domain::{Ship, ShipDraft, UNASSIGNED_ID};
use crate::error::{Result, ShipyardError};
use crate::rating::{refresh_rating, round_half_up};
use crate::validator::{
    is_crew_size_valid, is_name_valid, is_planet_valid, is_prod_date_valid, is_speed_valid,
    validate_ship,
};

/// Turn a complete draft into an unsaved ship with its rating computed.
///
/// Speed is rounded before validation and `isUsed` defaults to `false`.
pub fn prepare_ship(draft: &ShipDraft) -> Result<Ship> {
    let draft = ShipDraft {
        speed: draft.speed.map(round_half_up),
        ..draft.clone()
    };
    validate_ship(&draft)?;
    let (
        Some(name),
        Some(planet),
        Some(ship_type),
        Some(prod_date),
        Some(speed),
        Some(crew_size),
    ) = (
        draft.name,
        draft.planet,
        draft.ship_type,
        draft.prod_date,
        draft.speed,
        draft.crew_size,
    ) else {
        return Err(ShipyardError::Validation("incomplete ship".to_string()));
    };
    let mut ship = Ship {
        id: UNASSIGNED_ID,
        name,
        planet,
        ship_type,
        prod_date,
        is_used: draft.is_used.unwrap_or(false),
        speed,
        crew_size,
        rating: 0.0,
    };
    refresh_rating(&mut ship)?;
    Ok(ship)
}

/// Apply the fields present in `patch` to a copy of `existing`.
///
/// Either every supplied field is accepted or the call fails and nothing is
/// applied. The rating is recomputed when the production date, usage flag or
/// speed is supplied.
pub fn apply_update(existing: &Ship, patch: &ShipDraft) -> Result<Ship> {
    let mut updated = existing.clone();

    if let Some(name) = &patch.name {
        if !is_name_valid(name) {
            return Err(ShipyardError::invalid_field("name"));
        }
        updated.name = name.clone();
    }
    if let Some(planet) = &patch.planet {
        if !is_planet_valid(planet) {
            return Err(ShipyardError::invalid_field("planet"));
        }
        updated.planet = planet.clone();
    }
    if let Some(ship_type) = patch.ship_type {
        updated.ship_type = ship_type;
    }
    if let Some(prod_date) = patch.prod_date {
        if !is_prod_date_valid(&prod_date) {
            return Err(ShipyardError::invalid_field("prodDate"));
        }
        updated.prod_date = prod_date;
    }
    if let Some(is_used) = patch.is_used {
        updated.is_used = is_used;
    }
    if let Some(speed) = patch.speed.map(round_half_up) {
        if !is_speed_valid(speed) {
            return Err(ShipyardError::invalid_field("speed"));
        }
        updated.speed = speed;
    }
    if let Some(crew_size) = patch.crew_size {
        if !is_crew_size_valid(crew_size) {
            return Err(ShipyardError::invalid_field("crewSize"));
        }
        updated.crew_size = crew_size;
    }

    if patch.affects_rating() {
        refresh_rating(&mut updated)?;
    }
    Ok(updated)
}
