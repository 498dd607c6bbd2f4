pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod estimator;
pub mod fetch;
pub mod format;
pub mod infra;
pub mod services;
