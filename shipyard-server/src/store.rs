//! PostgreSQL-backed ship storage.

use std::fmt::Display;

use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::OptionalExtension;
use shipyard_core::{Result, Ship, ShipRepository, ShipyardError};

use crate::db::DbPool;
use crate::models::{NewShipRecord, ShipRecord};
use crate::schema::ships;

type PgPooled = PooledConnection<ConnectionManager<PgConnection>>;

fn storage_error(err: impl Display) -> ShipyardError {
    ShipyardError::Storage(err.to_string())
}

/// Ship repository over a Diesel connection pool.
#[derive(Clone)]
pub struct PgShipRepository {
    pool: DbPool,
}

impl PgShipRepository {
    /// Wrap an initialized pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PgPooled> {
        self.pool.get().map_err(storage_error)
    }
}

impl ShipRepository for PgShipRepository {
    fn find_all(&self) -> Result<Vec<Ship>> {
        let mut conn = self.conn()?;
        ships::table
            .order(ships::id.asc())
            .select(ShipRecord::as_select())
            .load(&mut conn)
            .map_err(storage_error)?
            .into_iter()
            .map(Ship::try_from)
            .collect()
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Ship>> {
        let mut conn = self.conn()?;
        ships::table
            .find(id)
            .select(ShipRecord::as_select())
            .first(&mut conn)
            .optional()
            .map_err(storage_error)?
            .map(Ship::try_from)
            .transpose()
    }

    fn save(&self, ship: Ship) -> Result<Ship> {
        let mut conn = self.conn()?;
        let record = if ship.is_persisted() {
            let record = ShipRecord::from(&ship);
            let updated = diesel::update(ships::table.find(record.id))
                .set(&record)
                .returning(ShipRecord::as_returning())
                .get_result(&mut conn)
                .optional()
                .map_err(storage_error)?;
            match updated {
                Some(updated) => updated,
                None => diesel::insert_into(ships::table)
                    .values(&record)
                    .returning(ShipRecord::as_returning())
                    .get_result(&mut conn)
                    .map_err(storage_error)?,
            }
        } else {
            diesel::insert_into(ships::table)
                .values(NewShipRecord::from(&ship))
                .returning(ShipRecord::as_returning())
                .get_result(&mut conn)
                .map_err(storage_error)?
        };
        Ship::try_from(record)
    }

    fn delete(&self, ship: &Ship) -> Result<()> {
        let mut conn = self.conn()?;
        diesel::delete(ships::table.find(ship.id))
            .execute(&mut conn)
            .map_err(storage_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::PgShipRepository;
    use crate::db::TestDatabase;
    use chrono::{TimeZone, Utc};
    use shipyard_core::{Ship, ShipRepository, ShipType, UNASSIGNED_ID};

    fn unsaved(name: &str) -> Ship {
        Ship {
            id: UNASSIGNED_ID,
            name: name.to_string(),
            planet: "Earth".to_string(),
            ship_type: ShipType::Military,
            prod_date: Utc
                .with_ymd_and_hms(3000, 1, 1, 0, 0, 0)
                .single()
                .expect("timestamp"),
            is_used: false,
            speed: 0.5,
            crew_size: 100,
            rating: 2.0,
        }
    }

    #[test]
    #[ignore = "requires PostgreSQL via TEST_DATABASE_URL"]
    fn save_find_and_delete_round_trip() {
        let mut test_db = TestDatabase::new();
        let repository = PgShipRepository::new(test_db.pool());

        let first = repository.save(unsaved("Enterprise")).expect("insert");
        let second = repository.save(unsaved("Defiant")).expect("insert");
        assert!(first.id > 0);
        assert!(second.id > first.id);

        let mut renamed = first.clone();
        renamed.name = "Enterprise-A".to_string();
        repository.save(renamed.clone()).expect("update");
        assert_eq!(
            repository.find_by_id(first.id).expect("lookup"),
            Some(renamed)
        );

        let all = repository.find_all().expect("all");
        assert_eq!(
            all.iter().map(|ship| ship.id).collect::<Vec<_>>(),
            vec![first.id, second.id]
        );

        repository.delete(&second).expect("delete");
        assert_eq!(repository.find_by_id(second.id).expect("lookup"), None);
    }
}
