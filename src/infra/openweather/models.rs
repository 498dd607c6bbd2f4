use serde::Deserialize;

use crate::services::WeatherReport;

/// Subset of the `/weather` response of OpenWeatherMap API 2.5.
#[derive(Debug, Deserialize)]
pub struct CurrentWeather {
    pub clouds: Clouds,
    pub main: Main,
    pub wind: Wind,
    pub weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
pub struct Clouds {
    pub all: f64,
}

#[derive(Debug, Deserialize)]
pub struct Main {
    pub temp: f64,
    pub humidity: f64,
}

#[derive(Debug, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub struct Condition {
    pub description: String,
}

impl CurrentWeather {
    /// `None` when the provider sent no condition description.
    pub fn into_report(self) -> Option<WeatherReport> {
        let description = self.weather.into_iter().next()?.description;
        Some(WeatherReport {
            clouds: self.clouds.all,
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
            description,
            temperature: self.main.temp,
        })
    }
}
