#![deny(missing_docs)]
//! Shipyard core library.
//!
//! Domain types and the query, validation and rating engines behind the
//! Shipyard ship catalog. Everything here is synchronous and storage-agnostic;
//! persistence is reached through [`ShipRepository`].

pub mod domain;
pub mod error;
pub mod ordering;
pub mod page;
pub mod query;
pub mod rating;
pub mod repository;
pub mod service;
pub mod update;
pub mod validator;

pub use domain::{Ship, ShipDraft, ShipType, UNASSIGNED_ID};
pub use error::{Result, ShipyardError};
pub use ordering::{ShipOrder, parse_order, sort_by_order};
pub use page::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, PageRequest, paginate};
pub use query::{ShipCriteria, count_ships, query_ships};
pub use rating::{CURRENT_YEAR, compute_rating, refresh_rating, round_half_up};
pub use repository::{InMemoryShipRepository, ShipRepository};
pub use service::{ShipService, parse_ship_id};
pub use update::{apply_update, prepare_ship};
pub use validator::{is_ship_valid, validate_ship};
