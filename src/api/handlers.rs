use actix_web::{HttpResponse, Responder, get, web};
use tracing::{info, instrument};

use super::AppState;
use super::responses::{self, Entity, Line, LineStop, LineStops, Stop, Weather};
use super::validation::{LineSelector, non_negative_coordinate};
use crate::clock::most_recent_monday;
use crate::error::ApiError;
use crate::estimator::estimate_vehicles;
use crate::services::RequestStopCache;

const DOCUMENTATION: &str = "\
Transit aggregation API

GET /entities                                     entities of De Lijn: [{number, name}]
GET /villages                                     villages: [{id, name}]
GET /stops                                        all stops: [{number, villageName, desc, latlng}]
GET /lines                                        all lines: [{number, entityNumber, desc, type, serviceType}]
GET /lines/{entityNumber}/{lineNumber}/{HEEN|TERUG}    stops of a line: {stops, route}
GET /weather/{lat}/{lon}                          current weather: {clouds, humidity, windspeed, desc, temp}
GET /vehicles/{entityNumber}/{lineNumber}/{HEEN|TERUG} estimated vehicle positions: [[lat, lng]]

Errors are returned as {status, message, error}.
";

#[get("/")]
pub async fn documentation() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(DOCUMENTATION)
}

#[get("/entities")]
#[instrument(skip(state))]
pub async fn entities(state: web::Data<AppState>) -> Result<web::Json<Vec<Entity>>, ApiError> {
    let records = state.transit.entities().await?;
    Ok(web::Json(records.into_iter().map(Entity::from).collect()))
}

#[get("/villages")]
#[instrument(skip(state))]
pub async fn villages(state: web::Data<AppState>) -> Result<web::Json<Vec<responses::Village>>, ApiError> {
    let records = state.transit.villages().await?;
    Ok(web::Json(responses::villages(records)))
}

#[get("/stops")]
#[instrument(skip(state))]
pub async fn stops(state: web::Data<AppState>) -> Result<web::Json<Vec<Stop>>, ApiError> {
    let records = state.transit.stops().await?;
    Ok(web::Json(records.into_iter().map(Stop::from).collect()))
}

#[get("/lines")]
#[instrument(skip(state))]
pub async fn lines(state: web::Data<AppState>) -> Result<web::Json<Vec<Line>>, ApiError> {
    let records = state.transit.lines().await?;
    Ok(web::Json(records.into_iter().map(Line::from).collect()))
}

/// Stops of the first ride of a line on the most recent Monday, each with its
/// coordinate, plus the coordinates alone as the route.
#[get("/lines/{entity}/{line}/{direction}")]
#[instrument(skip(state))]
pub async fn line_stops(
    state: web::Data<AppState>,
    path: web::Path<(String, String, String)>,
) -> Result<web::Json<LineStops>, ApiError> {
    let (entity, line, direction) = path.into_inner();
    let selector = LineSelector::parse(&entity, &line, &direction)?;

    let monday = most_recent_monday(state.clock.today());
    let rides = state
        .transit
        .schedule(selector.entity, selector.line, selector.direction, Some(monday))
        .await?;

    let ride = rides.into_iter().next().ok_or_else(|| {
        ApiError::NotFound(format!(
            "No rides for entity number {}, line number {} and direction {} on {monday}",
            selector.entity, selector.line, selector.direction
        ))
    })?;

    let mut resolved = Vec::with_capacity(ride.transits.len());
    for transit in ride.transits {
        let entity = transit.entity_number.ok_or_else(|| {
            ApiError::Inconsistency(format!(
                "Cannot get stop with number {}: there is no entity number",
                transit.stop_number
            ))
        })?;
        let record = state.transit.stop(entity, transit.stop_number).await?;
        let latlng = record.position.ok_or_else(|| {
            ApiError::upstream(
                "De Lijn",
                format!("stop {} of entity {entity} has no coordinates", record.number),
            )
        })?;
        resolved.push(LineStop {
            number: transit.stop_number,
            desc: record.description,
            village: record.village,
            latlng,
        });
    }

    Ok(web::Json(LineStops::new(resolved)))
}

#[get("/weather/{lat}/{lon}")]
#[instrument(skip(state))]
pub async fn weather(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<web::Json<Weather>, ApiError> {
    let (lat, lon) = path.into_inner();
    let lat = non_negative_coordinate(&lat, "Latitude")?;
    let lon = non_negative_coordinate(&lon, "Longitude")?;

    let report = state.weather.current(lat, lon).await?;
    Ok(web::Json(report.into()))
}

/// Estimated positions of the vehicles currently riding a line.
#[get("/vehicles/{entity}/{line}/{direction}")]
#[instrument(skip(state))]
pub async fn vehicles(
    state: web::Data<AppState>,
    path: web::Path<(String, String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (entity, line, direction) = path.into_inner();
    let selector = LineSelector::parse(&entity, &line, &direction)?;

    let rides = state
        .transit
        .schedule(selector.entity, selector.line, selector.direction, None)
        .await?;

    let locator = RequestStopCache::new(state.transit.as_ref());
    let positions = estimate_vehicles(
        &rides,
        state.clock.now(),
        state.out_of_range,
        &locator,
        state.router.as_ref(),
    )
    .await;

    info!(rides = rides.len(), vehicles = positions.len(), "Vehicle positions estimated");
    Ok(HttpResponse::Ok().json(positions))
}

pub async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound(
        "No such endpoint, see / for the documentation".to_string(),
    ))
}
