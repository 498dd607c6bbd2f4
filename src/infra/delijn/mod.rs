//! De Lijn Kern Open Data client.

mod client;
pub mod models;

pub use client::DeLijnClient;
