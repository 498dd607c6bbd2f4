//! Concrete clients for the upstream collaborators.

pub mod delijn;
pub mod openweather;
pub mod tomtom;

use anyhow::{Context, Result};
use reqwest::Url;

/// Parses a configured base URL so that relative paths join beneath it.
pub(crate) fn base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).with_context(|| format!("invalid base URL '{raw}'"))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        assert_eq!(
            base_url("https://api.tomtom.com/routing/1").unwrap().as_str(),
            "https://api.tomtom.com/routing/1/"
        );
        assert_eq!(
            base_url("http://localhost:8080/").unwrap().as_str(),
            "http://localhost:8080/"
        );
    }
}
