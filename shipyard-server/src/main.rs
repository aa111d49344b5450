#![deny(missing_docs)]
//! Shipyard server executable.
//!
//! Hosts the REST endpoints of the ship catalog.

mod config;
mod db;
mod models;
mod openapi;
mod routes;
mod schema;
mod store;

#[cfg(not(test))]
use std::sync::Arc;

#[cfg(not(test))]
use actix_cors::Cors;
#[cfg(not(test))]
use actix_web::{App, HttpServer, http::header, web};
#[cfg(not(test))]
use dotenvy::dotenv;
#[cfg(not(test))]
use shipyard_core::InMemoryShipRepository;

#[cfg(not(test))]
use crate::config::{ServerConfig, StorageBackend};
#[cfg(not(test))]
use crate::db::init_pool;
#[cfg(not(test))]
use crate::routes::{AppState, SharedShipRepository, configure};
#[cfg(not(test))]
use crate::store::PgShipRepository;

#[cfg(not(test))]
fn build_repository(config: &ServerConfig) -> std::io::Result<SharedShipRepository> {
    match config.storage {
        StorageBackend::Memory => {
            log::warn!("using in-memory ship storage; data is lost on restart");
            Ok(Arc::new(InMemoryShipRepository::new()))
        }
        StorageBackend::Postgres => {
            let database_url = config.database_url.as_deref().unwrap_or_default();
            let pool = init_pool(database_url).map_err(std::io::Error::other)?;
            Ok(Arc::new(PgShipRepository::new(pool)))
        }
    }
}

#[cfg(not(test))]
fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;
    let state = web::Data::new(AppState::new(build_repository(&config)?));

    let allowed_origins = config.allowed_origins.clone();
    let listen_addr = config.host.clone();
    let listen_port = config.port;
    log::info!("shipyard listening on {listen_addr}:{listen_port}");

    // Manually start the Actix system
    actix_web::rt::System::new().block_on(async move {
        HttpServer::new(move || {
            let mut cors = Cors::default()
                .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
                .allowed_headers(vec![header::CONTENT_TYPE])
                .max_age(3600);
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            App::new()
                .wrap(actix_web::middleware::Logger::default())
                .wrap(cors)
                .app_data(state.clone())
                .configure(configure)
        })
        .bind((listen_addr, listen_port))?
        .run()
        .await
    })
}

#[cfg(test)]
fn main() {}
