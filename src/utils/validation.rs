// Validation utilities
use crate::error::{Error, Result};
use tracing::warn;
use url::Url;

/// Largest serving count accepted by the search endpoint
pub const MAX_PEOPLE: u32 = 20;

/// Validate a corpus URL: http or https with a host.
pub fn validate_source_url(url_str: &str) -> Result<Url> {
    let url = Url::parse(url_str)?;

    match url.scheme() {
        "http" | "https" => {}
        _ => {
            warn!(
                "Blocked non-HTTP(S) URL scheme: {} in URL: {}",
                url.scheme(),
                url_str
            );
            return Err(Error::Validation(format!(
                "URL must use http or https scheme: {url_str}"
            )));
        }
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(Error::Validation("URL must have a valid host".to_string()));
    }

    Ok(url)
}

/// Validate the serving count.
pub fn validate_people(people: u32) -> Result<()> {
    if people == 0 || people > MAX_PEOPLE {
        return Err(Error::Validation(format!(
            "Invalid serving count: {people}. Must be between 1 and {MAX_PEOPLE}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_source_url() {
        assert!(validate_source_url("https://example.com/recipes.json").is_ok());
        assert!(validate_source_url("http://127.0.0.1:8080/recipes.json").is_ok());

        assert!(validate_source_url("ftp://example.com/recipes.json").is_err());
        assert!(validate_source_url("not-a-url").is_err());
        assert!(validate_source_url("file:///etc/passwd").is_err());
    }

    #[test]
    fn test_validate_people() {
        assert!(validate_people(1).is_ok());
        assert!(validate_people(5).is_ok());
        assert!(validate_people(MAX_PEOPLE).is_ok());
        assert!(validate_people(0).is_err());
        assert!(validate_people(MAX_PEOPLE + 1).is_err());
    }
}
