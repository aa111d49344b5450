//! HTTP handlers for Shipyard server.

use std::sync::Arc;

use actix_web::error::{BlockingError, InternalError};
use actix_web::{HttpResponse, Responder, delete, get, post, web};
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use shipyard_core::{
    PageRequest, ShipCriteria, ShipDraft, ShipRepository, ShipService, ShipType, ShipyardError,
    parse_order,
};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::openapi::ApiDoc;

/// Storage shared by every worker.
pub type SharedShipRepository = Arc<dyn ShipRepository + Send + Sync>;

#[derive(Clone)]
/// Shared application state for handlers.
pub struct AppState {
    /// Ship catalog operations.
    pub ships: ShipService<SharedShipRepository>,
}

impl AppState {
    /// Build state around a storage backend.
    pub fn new(repository: SharedShipRepository) -> Self {
        Self {
            ships: ShipService::new(repository),
        }
    }
}

/// Error response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}

/// Listing and counting filters. Timestamps are epoch milliseconds and only
/// their year is compared.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ShipFilterParams {
    /// Substring of the ship name.
    pub name: Option<String>,
    /// Substring of the planet.
    pub planet: Option<String>,
    /// Exact ship type.
    #[param(inline)]
    pub ship_type: Option<ShipType>,
    /// Keep ships produced in this year or later.
    pub after: Option<i64>,
    /// Keep ships produced before this year.
    pub before: Option<i64>,
    /// Exact usage flag.
    pub is_used: Option<bool>,
    /// Minimum speed, inclusive.
    pub min_speed: Option<f64>,
    /// Maximum speed, inclusive.
    pub max_speed: Option<f64>,
    /// Minimum crew size, inclusive.
    pub min_crew_size: Option<i32>,
    /// Maximum crew size, inclusive.
    pub max_crew_size: Option<i32>,
    /// Minimum rating, inclusive.
    pub min_rating: Option<f64>,
    /// Maximum rating, inclusive.
    pub max_rating: Option<f64>,
}

impl ShipFilterParams {
    /// Convert query parameters into engine criteria.
    pub fn criteria(&self) -> Result<ShipCriteria, ShipyardError> {
        Ok(ShipCriteria {
            name: self.name.clone(),
            planet: self.planet.clone(),
            ship_type: self.ship_type,
            after: self.after.map(|ms| timestamp("after", ms)).transpose()?,
            before: self.before.map(|ms| timestamp("before", ms)).transpose()?,
            is_used: self.is_used,
            min_speed: self.min_speed,
            max_speed: self.max_speed,
            min_crew_size: self.min_crew_size,
            max_crew_size: self.max_crew_size,
            min_rating: self.min_rating,
            max_rating: self.max_rating,
        })
    }
}

/// Ordering and paging for listings.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ShipPageParams {
    /// ID, SPEED, DATE or RATING; defaults to ID.
    pub order: Option<String>,
    /// Zero-based page index; defaults to 0.
    pub page_number: Option<u32>,
    /// Page size; defaults to 3.
    pub page_size: Option<u32>,
}

fn timestamp(field: &str, millis: i64) -> Result<DateTime<Utc>, ShipyardError> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| ShipyardError::invalid_field(field))
}

fn error_response(err: &ShipyardError) -> HttpResponse {
    let body = ErrorResponse {
        message: err.to_string(),
    };
    if err.is_client_error() {
        warn!("rejected request: {err}");
        return HttpResponse::BadRequest().json(body);
    }
    match err {
        ShipyardError::NotFound(_) => {
            debug!("{err}");
            HttpResponse::NotFound().json(body)
        }
        _ => {
            error!("{err}");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

fn respond<T>(
    result: Result<Result<T, ShipyardError>, BlockingError>,
    ok: impl FnOnce(T) -> HttpResponse,
) -> HttpResponse {
    match result {
        Ok(Ok(value)) => ok(value),
        Ok(Err(err)) => error_response(&err),
        Err(err) => {
            error!("ship task failed: {err}");
            HttpResponse::InternalServerError().json(ErrorResponse {
                message: format!("ship task failed: {err}"),
            })
        }
    }
}

fn bad_request(message: String) -> HttpResponse {
    warn!("rejected request: {message}");
    HttpResponse::BadRequest().json(ErrorResponse { message })
}

/// Query extractor config answering malformed parameters with JSON 400s.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = bad_request(err.to_string());
        InternalError::from_response(err, response).into()
    })
}

/// JSON extractor config answering malformed bodies with JSON 400s.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = bad_request(err.to_string());
        InternalError::from_response(err, response).into()
    })
}

/// Register extractor configs and every ship route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(query_config())
        .app_data(json_config())
        .service(ships_count)
        .service(ships_list)
        .service(ship_create)
        .service(ship_get)
        .service(ship_update)
        .service(ship_delete)
        .service(openapi_json);
}

#[utoipa::path(
    get,
    path = "/rest/ships",
    params(ShipFilterParams, ShipPageParams),
    responses(
        (status = 200, description = "Page of matching ships", body = [shipyard_core::Ship]),
        (status = 400, description = "Malformed filter or unknown order", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships")]
/// List ships matching the filters, sorted and paged.
pub async fn ships_list(
    state: web::Data<AppState>,
    filters: web::Query<ShipFilterParams>,
    paging: web::Query<ShipPageParams>,
) -> impl Responder {
    let service = state.ships.clone();
    let filters = filters.into_inner();
    let paging = paging.into_inner();
    let result = web::block(move || {
        let criteria = filters.criteria()?;
        let order = parse_order(paging.order.as_deref())?;
        let page = PageRequest::new(paging.page_number, paging.page_size);
        service.list(&criteria, order, page)
    })
    .await;
    respond(result, |ships| HttpResponse::Ok().json(ships))
}

#[utoipa::path(
    get,
    path = "/rest/ships/count",
    params(ShipFilterParams),
    responses(
        (status = 200, description = "Number of matching ships", body = usize),
        (status = 400, description = "Malformed filter", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships/count")]
/// Count ships matching the filters.
pub async fn ships_count(
    state: web::Data<AppState>,
    filters: web::Query<ShipFilterParams>,
) -> impl Responder {
    let service = state.ships.clone();
    let filters = filters.into_inner();
    let result = web::block(move || service.count(&filters.criteria()?)).await;
    respond(result, |count| HttpResponse::Ok().json(count))
}

#[utoipa::path(
    post,
    path = "/rest/ships",
    request_body = ShipDraft,
    responses(
        (status = 200, description = "Created ship", body = shipyard_core::Ship),
        (status = 400, description = "Missing or invalid ship", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[post("/rest/ships")]
/// Create a ship; the rating is computed server-side.
pub async fn ship_create(
    state: web::Data<AppState>,
    payload: web::Json<Option<ShipDraft>>,
) -> impl Responder {
    let service = state.ships.clone();
    let draft = payload.into_inner();
    let result = web::block(move || service.create(draft.as_ref())).await;
    respond(result, |ship| {
        info!("created ship {} ({})", ship.id, ship.name);
        HttpResponse::Ok().json(ship)
    })
}

#[utoipa::path(
    get,
    path = "/rest/ships/{id}",
    params(
        ("id" = String, Path, description = "Positive ship identifier")
    ),
    responses(
        (status = 200, description = "Ship", body = shipyard_core::Ship),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "Ship not found", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships/{id}")]
/// Fetch a ship by identifier.
pub async fn ship_get(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let service = state.ships.clone();
    let raw_id = path.into_inner();
    let result = web::block(move || service.get(&raw_id)).await;
    respond(result, |ship| HttpResponse::Ok().json(ship))
}

#[utoipa::path(
    post,
    path = "/rest/ships/{id}",
    params(
        ("id" = String, Path, description = "Positive ship identifier")
    ),
    request_body = ShipDraft,
    responses(
        (status = 200, description = "Updated ship", body = shipyard_core::Ship),
        (status = 400, description = "Malformed identifier or invalid field", body = ErrorResponse),
        (status = 404, description = "Ship not found", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[post("/rest/ships/{id}")]
/// Apply a partial update to a ship.
pub async fn ship_update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<ShipDraft>,
) -> impl Responder {
    let service = state.ships.clone();
    let raw_id = path.into_inner();
    let patch = payload.into_inner();
    let result = web::block(move || service.update(&raw_id, &patch)).await;
    respond(result, |ship| {
        info!("updated ship {}", ship.id);
        HttpResponse::Ok().json(ship)
    })
}

#[utoipa::path(
    delete,
    path = "/rest/ships/{id}",
    params(
        ("id" = String, Path, description = "Positive ship identifier")
    ),
    responses(
        (status = 200, description = "Ship deleted"),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "Ship not found", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[delete("/rest/ships/{id}")]
/// Delete a ship permanently.
pub async fn ship_delete(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let service = state.ships.clone();
    let raw_id = path.into_inner();
    let result = web::block(move || service.delete(&raw_id)).await;
    respond(result, |ship| {
        info!("deleted ship {}", ship.id);
        HttpResponse::Ok().finish()
    })
}

#[utoipa::path(
    get,
    path = "/rest/openapi.json",
    responses(
        (status = 200, description = "OpenAPI document", body = serde_json::Value)
    ),
    tag = "system"
)]
#[get("/rest/openapi.json")]
/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
