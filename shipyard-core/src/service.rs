//! Catalog operations composed over a storage collaborator.
//!
//! Each operation reads a fresh snapshot from storage. Read-validate-write
//! sequences such as [`ShipService::update`] are not isolated from concurrent
//! writers to the same ship; storage decides what wins.

use crate::domain::{Ship, ShipDraft};
use crate::error::{Result, ShipyardError};
use crate::ordering::{ShipOrder, sort_by_order};
use crate::page::{PageRequest, paginate};
use crate::query::{ShipCriteria, count_ships, query_ships};
use crate::repository::ShipRepository;
use crate::update::{apply_update, prepare_ship};

/// Parse a path identifier, accepting positive integers only.
pub fn parse_ship_id(raw: &str) -> Result<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ShipyardError::MalformedIdentifier(raw.to_string())),
    }
}

/// Ship catalog operations.
#[derive(Debug, Clone)]
pub struct ShipService<R> {
    repository: R,
}

impl<R: ShipRepository> ShipService<R> {
    /// Wrap a storage collaborator.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Filter, sort and slice the catalog.
    pub fn list(
        &self,
        criteria: &ShipCriteria,
        order: ShipOrder,
        page: PageRequest,
    ) -> Result<Vec<Ship>> {
        let ships = self.repository.find_all()?;
        let mut matching = query_ships(&ships, criteria);
        sort_by_order(&mut matching, order);
        Ok(paginate(matching, page))
    }

    /// Count ships passing `criteria`.
    pub fn count(&self, criteria: &ShipCriteria) -> Result<usize> {
        let ships = self.repository.find_all()?;
        Ok(count_ships(&ships, criteria))
    }

    /// Validate, rate and persist a new ship. A missing body is rejected.
    pub fn create(&self, draft: Option<&ShipDraft>) -> Result<Ship> {
        let draft =
            draft.ok_or_else(|| ShipyardError::Validation("missing ship body".to_string()))?;
        let ship = prepare_ship(draft)?;
        self.repository.save(ship)
    }

    /// Look up a ship by its raw path identifier.
    pub fn get(&self, raw_id: &str) -> Result<Ship> {
        let id = parse_ship_id(raw_id)?;
        self.repository
            .find_by_id(id)?
            .ok_or(ShipyardError::NotFound(id))
    }

    /// Apply `patch` to the ship with the raw path identifier and persist it.
    pub fn update(&self, raw_id: &str, patch: &ShipDraft) -> Result<Ship> {
        let existing = self.get(raw_id)?;
        let updated = apply_update(&existing, patch)?;
        self.repository.save(updated)
    }

    /// Delete the ship with the raw path identifier, returning it.
    pub fn delete(&self, raw_id: &str) -> Result<Ship> {
        let ship = self.get(raw_id)?;
        self.repository.delete(&ship)?;
        Ok(ship)
    }
}
