//! OpenWeatherMap current-conditions client.

mod client;
pub mod models;

pub use client::OpenWeatherClient;
