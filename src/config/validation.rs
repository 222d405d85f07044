use crate::config::types::{Config, CrawlerConfig, OutputConfig, SeedEntry, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Longest fetch timeout accepted, in seconds
const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_seeds(&config.seeds)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let base = parse_http_url(&config.base_url, "base_url")?;

    if config.base_url.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "base_url must not end with '/', got '{}'",
            config.base_url
        )));
    }

    if base.path() != "/" || base.query().is_some() {
        return Err(ConfigError::Validation(format!(
            "base_url must be a site root without path or query, got '{}'",
            config.base_url
        )));
    }

    if config.request_timeout_secs < 1 || config.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and {}, got {}",
            MAX_REQUEST_TIMEOUT_SECS, config.request_timeout_secs
        )));
    }

    if config.max_targets == Some(0) {
        return Err(ConfigError::Validation(
            "max_targets must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    if config.summary_path.is_empty() {
        return Err(ConfigError::Validation(
            "summary_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates seed entries
fn validate_seeds(seeds: &[SeedEntry]) -> Result<(), ConfigError> {
    for seed in seeds {
        parse_http_url(&seed.url, "seed URL")?;
    }
    Ok(())
}

/// Parses `value` and requires an HTTP(S) scheme
fn parse_http_url(value: &str, what: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", what, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must use HTTP or HTTPS",
            what, value
        )));
    }

    Ok(url)
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| ConfigError::Validation(format!("Invalid email format: '{}'", email)))?;

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("admin@sub.example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());
        assert!(validate_email("a@b@example.com").is_err());
    }

    #[test]
    fn test_validate_base_url() {
        let mut config = CrawlerConfig::default();
        assert!(validate_crawler_config(&config).is_ok());

        config.base_url = "http://127.0.0.1:8080".to_string();
        assert!(validate_crawler_config(&config).is_ok());

        config.base_url = "https://en.wikipedia.org/".to_string();
        assert!(validate_crawler_config(&config).is_err());

        config.base_url = "https://en.wikipedia.org/wiki".to_string();
        assert!(validate_crawler_config(&config).is_err());

        config.base_url = "ftp://en.wikipedia.org".to_string();
        assert!(validate_crawler_config(&config).is_err());
    }

    #[test]
    fn test_validate_timeout_and_limits() {
        let mut config = CrawlerConfig::default();

        config.request_timeout_secs = 601;
        assert!(validate_crawler_config(&config).is_err());

        config.request_timeout_secs = 600;
        config.max_targets = Some(0);
        assert!(validate_crawler_config(&config).is_err());

        config.max_targets = Some(1);
        assert!(validate_crawler_config(&config).is_ok());
    }

    #[test]
    fn test_validate_seeds() {
        use crate::crawler::PageKind;

        let good = SeedEntry {
            url: "https://en.wikipedia.org/wiki/Tom_Hanks".to_string(),
            kind: PageKind::Person,
        };
        let bad = SeedEntry {
            url: "Tom_Hanks".to_string(),
            kind: PageKind::Person,
        };

        assert!(validate_seeds(&[good.clone()]).is_ok());
        assert!(matches!(
            validate_seeds(&[good, bad]),
            Err(ConfigError::InvalidUrl(_))
        ));
    }
}
