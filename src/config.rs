use std::env;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    /// Fixed inbox receiving contact-form messages
    pub support_address: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_name: String,
    /// Only origin allowed by CORS
    pub cors_origin: String,
    pub mail: MailConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());
        let port = |key: &'static str, default: u16| match get(key) {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid { key, value }),
            None => Ok(default),
        };

        let username = required("EMAIL_USER")?;
        let mail = MailConfig {
            smtp_host: or_default("SMTP_HOST", "smtp.gmail.com"),
            smtp_port: port("SMTP_PORT", 465)?,
            password: required("EMAIL_PASS")?,
            support_address: get("SUPPORT_EMAIL").unwrap_or_else(|| username.clone()),
            username,
        };

        Ok(Config {
            host: or_default("HOST", "0.0.0.0"),
            port: port("PORT", 5000)?,
            database_url: required("MONGODB_URI")?,
            database_name: or_default("MONGODB_DATABASE", "storefront"),
            cors_origin: cors_origin(or_default("CORS_ORIGIN", "http://localhost:3000"))?,
            mail,
        })
    }
}

/// A single `scheme://host[:port]` origin; credentialed CORS cannot use `*`
fn cors_origin(value: String) -> Result<String, ConfigError> {
    let invalid = || ConfigError::Invalid { key: "CORS_ORIGIN", value: value.clone() };

    let authority = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
        .ok_or_else(invalid)?;

    let well_formed = !authority.is_empty()
        && authority
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '[' | ']'));
    if !well_formed {
        return Err(invalid());
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const MINIMAL: &[(&str, &str)] = &[
        ("MONGODB_URI", "mongodb://localhost:27017"),
        ("EMAIL_USER", "shop@example.com"),
        ("EMAIL_PASS", "app-password"),
    ];

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(MINIMAL)).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.database_name, "storefront");
        assert_eq!(config.cors_origin, "http://localhost:3000");
        assert_eq!(config.mail.smtp_host, "smtp.gmail.com");
        assert_eq!(config.mail.smtp_port, 465);
        assert_eq!(config.mail.support_address, "shop@example.com");
    }

    #[test]
    fn test_missing_required() {
        let err = Config::from_lookup(lookup(&[("EMAIL_USER", "a@b.c"), ("EMAIL_PASS", "x")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("MONGODB_URI"));

        let blank_pass = [
            ("MONGODB_URI", "mongodb://localhost:27017"),
            ("EMAIL_USER", "shop@example.com"),
            ("EMAIL_PASS", "   "),
        ];
        let err = Config::from_lookup(lookup(&blank_pass)).unwrap_err();
        assert_eq!(err, ConfigError::Missing("EMAIL_PASS"));
    }

    #[test]
    fn test_invalid_port() {
        let mut pairs = MINIMAL.to_vec();
        pairs.push(("PORT", "eighty"));
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid { key: "PORT", value: "eighty".to_string() }
        );
    }

    #[test]
    fn test_cors_origin_must_be_single_origin() {
        for origin in ["*", "localhost:3000", "http://", "http://shop.example.com/", "https://a b.com"] {
            let mut pairs = MINIMAL.to_vec();
            pairs.push(("CORS_ORIGIN", origin));
            let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
            assert_eq!(
                err,
                ConfigError::Invalid { key: "CORS_ORIGIN", value: origin.to_string() }
            );
        }

        let mut pairs = MINIMAL.to_vec();
        pairs.push(("CORS_ORIGIN", "https://shop.example.com:8443"));
        let config = Config::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.cors_origin, "https://shop.example.com:8443");
    }
}
