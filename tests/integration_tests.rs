use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use lijn_relay::api::{AppState, cors_headers, routes};
use lijn_relay::clock::FixedClock;
use lijn_relay::error::ApiError;
use lijn_relay::estimator::OutOfRangePolicy;
use lijn_relay::services::{
    Direction, EntityRecord, LatLng, LineRecord, Ride, RouteInterpolator, StopRecord, Transit,
    TransitApi, TravelMode, VillageRecord, WeatherApi, WeatherReport,
};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Wednesday 6 March 2024, 10:05.
fn now() -> NaiveDateTime {
    at(10, 5)
}

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 6)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn transit(stop: u32, time: Option<NaiveDateTime>) -> Transit {
    Transit {
        stop_number: stop,
        entity_number: Some(1),
        scheduled: time,
    }
}

/// Stop `n` lies at `(n, n)`; stops without coordinates are listed in `blind`.
#[derive(Default)]
struct FakeTransit {
    rides: Vec<Ride>,
    villages: Vec<VillageRecord>,
    blind: Vec<u32>,
    fail_entities: bool,
    requested_dates: Mutex<Vec<Option<NaiveDate>>>,
    stop_calls: AtomicUsize,
}

#[async_trait]
impl TransitApi for FakeTransit {
    async fn entities(&self) -> Result<Vec<EntityRecord>, ApiError> {
        if self.fail_entities {
            return Err(ApiError::from_upstream_status("De Lijn", 503, "maintenance"));
        }
        Ok(vec![EntityRecord {
            number: 1,
            description: "De Lijn Antwerpen".into(),
        }])
    }

    async fn villages(&self) -> Result<Vec<VillageRecord>, ApiError> {
        Ok(self.villages.clone())
    }

    async fn stops(&self) -> Result<Vec<StopRecord>, ApiError> {
        Ok(Vec::new())
    }

    async fn lines(&self) -> Result<Vec<LineRecord>, ApiError> {
        Ok(vec![LineRecord {
            number: 1,
            entity_number: 2,
            description: "Gent - Evergem".into(),
            transport_type: "TRAM".into(),
            service_type: "NORMAAL".into(),
        }])
    }

    async fn schedule(
        &self,
        _entity: u32,
        _line: u32,
        _direction: Direction,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Ride>, ApiError> {
        self.requested_dates.lock().unwrap().push(date);
        Ok(self.rides.clone())
    }

    async fn stop(&self, entity: u32, stop: u32) -> Result<StopRecord, ApiError> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        Ok(StopRecord {
            number: stop,
            entity_number: Some(entity),
            village: Some("Antwerpen".into()),
            description: format!("Halte {stop}"),
            position: (!self.blind.contains(&stop))
                .then(|| LatLng::new(f64::from(stop), f64::from(stop))),
        })
    }
}

/// Eleven evenly spaced points from `from` to `to`, both ends included.
struct StraightRouter;

#[async_trait]
impl RouteInterpolator for StraightRouter {
    async fn route(&self, from: LatLng, to: LatLng, mode: TravelMode) -> Result<Vec<LatLng>, ApiError> {
        assert_eq!(mode, TravelMode::Bus);
        Ok((0..=10)
            .map(|i| {
                let t = f64::from(i) / 10.0;
                LatLng::new(
                    from.lat + (to.lat - from.lat) * t,
                    from.lng + (to.lng - from.lng) * t,
                )
            })
            .collect())
    }
}

#[derive(Default)]
struct FakeWeather {
    calls: AtomicUsize,
}

#[async_trait]
impl WeatherApi for FakeWeather {
    async fn current(&self, _lat: f64, _lon: f64) -> Result<WeatherReport, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(WeatherReport {
            clouds: 75.0,
            humidity: 87.0,
            wind_speed: 4.6,
            description: "light rain".into(),
            temperature: 11.4,
        })
    }
}

fn state(transit: Arc<FakeTransit>, weather: Arc<FakeWeather>) -> AppState {
    AppState {
        transit,
        weather,
        router: Arc::new(StraightRouter),
        clock: Arc::new(FixedClock(now())),
        out_of_range: OutOfRangePolicy::Discard,
    }
}

async fn get(state: AppState, uri: &str) -> (StatusCode, Option<String>, Value) {
    let app = test::init_service(
        App::new()
            .wrap(cors_headers())
            .app_data(web::Data::new(state))
            .configure(routes),
    )
    .await;
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let cors = resp
        .headers()
        .get("Access-Control-Allow-Origin")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body: Value = test::read_body_json(resp).await;
    (status, cors, body)
}

#[actix_web::test]
async fn test_weather_rejects_negative_latitude_without_calling_upstream() {
    let weather = Arc::new(FakeWeather::default());
    let (status, _, body) = get(
        state(Arc::new(FakeTransit::default()), weather.clone()),
        "/weather/-1/50",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_eq!(body["message"], "Bad Request");
    assert_eq!(body["error"], "Latitude must be a positive float, got -1");
    assert_eq!(weather.calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_weather() {
    let weather = Arc::new(FakeWeather::default());
    let (status, cors, body) = get(
        state(Arc::new(FakeTransit::default()), weather.clone()),
        "/weather/51.05/3.72",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cors.as_deref(), Some("*"));
    assert_eq!(
        body,
        json!({"clouds":75.0,"humidity":87.0,"windspeed":4.6,"desc":"light rain","temp":11.4})
    );
    assert_eq!(weather.calls.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn test_vehicles_midpoint_of_route() {
    let transit = Arc::new(FakeTransit {
        rides: vec![Ride {
            transits: vec![transit(10, Some(at(10, 0))), transit(20, Some(at(10, 10)))],
        }],
        ..Default::default()
    });
    let (status, _, body) = get(
        state(transit, Arc::new(FakeWeather::default())),
        "/vehicles/1/1/HEEN",
    )
    .await;

    // 11 points, floor(0.5 * 11) = 5, the midpoint.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([[15.0, 15.0]]));
}

#[actix_web::test]
async fn test_vehicles_skip_the_broken_ride() {
    let mut orphan = transit(40, Some(at(10, 10)));
    orphan.entity_number = None;

    let transit = Arc::new(FakeTransit {
        rides: vec![
            Ride {
                transits: vec![transit(10, Some(at(10, 0))), transit(20, Some(at(10, 10)))],
            },
            Ride {
                transits: vec![transit(30, Some(at(10, 0))), orphan],
            },
            Ride {
                transits: vec![
                    transit(50, None),
                    transit(60, Some(at(10, 5))),
                    transit(70, Some(at(10, 15))),
                ],
            },
        ],
        ..Default::default()
    });
    let (status, _, body) = get(
        state(transit.clone(), Arc::new(FakeWeather::default())),
        "/vehicles/1/1/HEEN",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([[15.0, 15.0], [60.0, 60.0]]));
    assert_eq!(*transit.requested_dates.lock().unwrap(), vec![None]);
}

#[actix_web::test]
async fn test_vehicles_finished_and_unstarted_rides_give_nothing() {
    let transit = Arc::new(FakeTransit {
        rides: vec![
            Ride {
                transits: vec![transit(10, Some(at(8, 0))), transit(20, Some(at(8, 10)))],
            },
            Ride {
                transits: vec![transit(10, Some(at(11, 0))), transit(20, Some(at(11, 10)))],
            },
        ],
        ..Default::default()
    });
    let (status, _, body) = get(
        state(transit.clone(), Arc::new(FakeWeather::default())),
        "/vehicles/1/1/TERUG",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    assert_eq!(transit.stop_calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_vehicles_reuse_stop_lookups_within_a_request() {
    let ride = Ride {
        transits: vec![transit(10, Some(at(10, 0))), transit(20, Some(at(10, 10)))],
    };
    let transit = Arc::new(FakeTransit {
        rides: vec![ride.clone(), ride],
        ..Default::default()
    });
    let (status, _, body) = get(
        state(transit.clone(), Arc::new(FakeWeather::default())),
        "/vehicles/1/1/HEEN",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(transit.stop_calls.load(Ordering::SeqCst), 2);
}

#[actix_web::test]
async fn test_vehicles_validation() {
    for uri in ["/vehicles/0/1/HEEN", "/vehicles/1/abc/HEEN", "/vehicles/1/1/heen"] {
        let (status, _, body) = get(
            state(Arc::new(FakeTransit::default()), Arc::new(FakeWeather::default())),
            uri,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["message"], "Bad Request");
    }
}

#[actix_web::test]
async fn test_line_stops_uses_most_recent_monday() {
    let transit = Arc::new(FakeTransit {
        rides: vec![Ride {
            transits: vec![transit(10, Some(at(6, 0))), transit(20, None)],
        }],
        ..Default::default()
    });
    let (status, _, body) = get(
        state(transit.clone(), Arc::new(FakeWeather::default())),
        "/lines/1/1/HEEN",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "stops": [
                {"number": 10, "desc": "Halte 10", "village": "Antwerpen", "latlng": [10.0, 10.0]},
                {"number": 20, "desc": "Halte 20", "village": "Antwerpen", "latlng": [20.0, 20.0]}
            ],
            "route": [[10.0, 10.0], [20.0, 20.0]]
        })
    );
    assert_eq!(
        *transit.requested_dates.lock().unwrap(),
        vec![NaiveDate::from_ymd_opt(2024, 3, 4)]
    );
}

#[actix_web::test]
async fn test_line_stops_without_rides_is_not_found() {
    let (status, _, body) = get(
        state(Arc::new(FakeTransit::default()), Arc::new(FakeWeather::default())),
        "/lines/1/1/TERUG",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["message"], "Not Found");
}

#[actix_web::test]
async fn test_line_stops_without_entity_is_internal_error() {
    let mut orphan = transit(10, Some(at(6, 0)));
    orphan.entity_number = None;
    let transit = Arc::new(FakeTransit {
        rides: vec![Ride {
            transits: vec![orphan],
        }],
        ..Default::default()
    });
    let (status, _, body) = get(
        state(transit, Arc::new(FakeWeather::default())),
        "/lines/1/1/HEEN",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Cannot get stop with number 10: there is no entity number");
}

#[actix_web::test]
async fn test_villages_are_formatted_and_filtered() {
    let transit = Arc::new(FakeTransit {
        villages: vec![
            VillageRecord { id: -1, description: "ONBEKEND".into() },
            VillageRecord { id: 0, description: "DE PANNE".into() },
            VillageRecord { id: 46021, description: "sint-niklaas".into() },
        ],
        ..Default::default()
    });
    let (status, _, body) = get(
        state(transit, Arc::new(FakeWeather::default())),
        "/villages",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"id": 0, "name": "De Panne"}, {"id": 46021, "name": "Sint-Niklaas"}])
    );
}

#[actix_web::test]
async fn test_lines_are_lower_cased() {
    let (status, _, body) = get(
        state(Arc::new(FakeTransit::default()), Arc::new(FakeWeather::default())),
        "/lines",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"number": 1, "entityNumber": 2, "desc": "Gent - Evergem", "type": "tram", "serviceType": "normaal"}])
    );
}

#[actix_web::test]
async fn test_upstream_failure_is_bad_gateway() {
    let transit = Arc::new(FakeTransit {
        fail_entities: true,
        ..Default::default()
    });
    let (status, cors, body) = get(
        state(transit, Arc::new(FakeWeather::default())),
        "/entities",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(cors.as_deref(), Some("*"));
    assert_eq!(body["status"], 502);
    assert_eq!(body["error"], "De Lijn failed with status 503: maintenance");
}

#[actix_web::test]
async fn test_unknown_path_is_json_not_found() {
    let (status, _, body) = get(
        state(Arc::new(FakeTransit::default()), Arc::new(FakeWeather::default())),
        "/trams",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not Found");
}
