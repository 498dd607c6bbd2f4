//! TomTom Routing API client.

mod client;
pub mod models;

pub use client::TomTomClient;
