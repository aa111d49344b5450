//! Storage abstraction for ships.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::domain::Ship;
use crate::error::{Result, ShipyardError};

/// Persistence collaborator for the ship catalog.
#[cfg_attr(test, mockall::automock)]
pub trait ShipRepository {
    /// All stored ships in storage iteration order.
    fn find_all(&self) -> Result<Vec<Ship>>;
    /// The ship with the given identifier, if any.
    fn find_by_id(&self, id: i64) -> Result<Option<Ship>>;
    /// Insert or overwrite a ship, assigning an identifier on first save.
    fn save(&self, ship: Ship) -> Result<Ship>;
    /// Remove a ship permanently.
    fn delete(&self, ship: &Ship) -> Result<()>;
}

impl<R: ShipRepository + ?Sized> ShipRepository for Arc<R> {
    fn find_all(&self) -> Result<Vec<Ship>> {
        (**self).find_all()
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Ship>> {
        (**self).find_by_id(id)
    }

    fn save(&self, ship: Ship) -> Result<Ship> {
        (**self).save(ship)
    }

    fn delete(&self, ship: &Ship) -> Result<()> {
        (**self).delete(ship)
    }
}

#[derive(Debug, Default)]
struct Hold {
    ships: BTreeMap<i64, Ship>,
    last_id: i64,
}

/// Process-local repository keeping ships ordered by identifier.
#[derive(Debug, Default)]
pub struct InMemoryShipRepository {
    hold: RwLock<Hold>,
}

impl InMemoryShipRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding `ships`, saving each in turn.
    pub fn with_ships(ships: impl IntoIterator<Item = Ship>) -> Result<Self> {
        let repository = Self::new();
        for ship in ships {
            repository.save(ship)?;
        }
        Ok(repository)
    }
}

fn poisoned<T>(_: T) -> ShipyardError {
    ShipyardError::Storage("ship store lock poisoned".to_string())
}

impl ShipRepository for InMemoryShipRepository {
    fn find_all(&self) -> Result<Vec<Ship>> {
        let hold = self.hold.read().map_err(poisoned)?;
        Ok(hold.ships.values().cloned().collect())
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Ship>> {
        let hold = self.hold.read().map_err(poisoned)?;
        Ok(hold.ships.get(&id).cloned())
    }

    fn save(&self, mut ship: Ship) -> Result<Ship> {
        let mut hold = self.hold.write().map_err(poisoned)?;
        if !ship.is_persisted() {
            hold.last_id += 1;
            ship.id = hold.last_id;
        }
        hold.last_id = hold.last_id.max(ship.id);
        hold.ships.insert(ship.id, ship.clone());
        Ok(ship)
    }

    fn delete(&self, ship: &Ship) -> Result<()> {
        let mut hold = self.hold.write().map_err(poisoned)?;
        hold.ships.remove(&ship.id);
        Ok(())
    }
}
