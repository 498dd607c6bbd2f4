//! REST surface: actix-web handlers, path validation and response shapes.

pub mod handlers;
pub mod responses;
pub mod validation;

use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpServer, web};
use std::sync::Arc;
use tracing::info;

use crate::clock::Clock;
use crate::estimator::OutOfRangePolicy;
use crate::services::{RouteInterpolator, TransitApi, WeatherApi};

/// Collaborators shared by every request. Holds no per-request state.
pub struct AppState {
    pub transit: Arc<dyn TransitApi>,
    pub weather: Arc<dyn WeatherApi>,
    pub router: Arc<dyn RouteInterpolator>,
    pub clock: Arc<dyn Clock>,
    pub out_of_range: OutOfRangePolicy,
}

/// Registers every endpoint. Unknown paths answer with a JSON 404.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::documentation)
        .service(handlers::entities)
        .service(handlers::villages)
        .service(handlers::stops)
        .service(handlers::lines)
        .service(handlers::line_stops)
        .service(handlers::weather)
        .service(handlers::vehicles)
        .default_service(web::to(handlers::not_found));
}

/// Open CORS, the service is meant to be called from a browser front-end.
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new().add(("Access-Control-Allow-Origin", "*"))
}

pub async fn serve(state: AppState, bind: &str, workers: usize) -> std::io::Result<()> {
    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors_headers())
            .app_data(state.clone())
            .configure(routes)
    })
    .workers(workers)
    .bind(bind)?;

    info!(bind, workers, "Listening");
    server.run().await
}
