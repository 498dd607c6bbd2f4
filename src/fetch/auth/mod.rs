//! Credential wrappers around an [`HttpClient`](super::HttpClient).
//!
//! De Lijn wants its subscription key in a header, OpenWeatherMap and TomTom
//! want theirs in the query string.

mod api_key;
mod url_param;

pub use api_key::{ApiKey, ApiKeyError};
pub use url_param::UrlParam;
