//! Provisioning runtime configuration.
//!
//! This module defines configuration that should be resolved once at process
//! startup and then passed into the provisioner. The intent is to avoid reading
//! process-wide environment variables during provisioning, which can lead to
//! inconsistent behaviour in test harnesses; the CLI owns the environment and
//! hands values in here.

use crate::constants::DEFAULT_CONNECT_TIMEOUT_SECS;
use crate::{ProvisionError, ProvisionResult};
use std::fmt;
use std::time::Duration;

/// Username/password pair for authenticating against the server.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Connection configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct BootstrapConfig {
    uri: String,
    credentials: Option<Credentials>,
    connect_timeout: Duration,
}

impl BootstrapConfig {
    /// Create a new `BootstrapConfig`.
    pub fn new(
        uri: String,
        credentials: Option<Credentials>,
        connect_timeout: Duration,
    ) -> ProvisionResult<Self> {
        if uri.trim().is_empty() {
            return Err(ProvisionError::InvalidInput(
                "connection URI cannot be empty".into(),
            ));
        }

        Ok(Self {
            uri,
            credentials,
            connect_timeout,
        })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

/// Build credentials from optional username/password environment values.
///
/// Blank or whitespace-only values are treated as unset. The pair must be
/// supplied together: a username without a password (or the reverse) is a
/// misconfiguration rather than an anonymous connection.
pub fn credentials_from_env_values(
    username: Option<String>,
    password: Option<String>,
) -> ProvisionResult<Option<Credentials>> {
    let username = username
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let password = password
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match (username, password) {
        (Some(username), Some(password)) => Ok(Some(Credentials { username, password })),
        (None, None) => Ok(None),
        (Some(_), None) => Err(ProvisionError::InvalidInput(
            "DB_USER is set but DB_PWD is not".into(),
        )),
        (None, Some(_)) => Err(ProvisionError::InvalidInput(
            "DB_PWD is set but DB_USER is not".into(),
        )),
    }
}

/// Parse the connection timeout from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default deadline.
pub fn connect_timeout_from_env_value(value: Option<String>) -> ProvisionResult<Duration> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let secs = match value {
        Some(raw) => raw.parse::<u64>().map_err(|_| {
            ProvisionError::InvalidInput(format!(
                "connection timeout must be a whole number of seconds, got '{raw}'"
            ))
        })?,
        None => DEFAULT_CONNECT_TIMEOUT_SECS,
    };

    if secs == 0 {
        return Err(ProvisionError::InvalidInput(
            "connection timeout cannot be zero".into(),
        ));
    }

    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_rejects_empty_uri() {
        let result = BootstrapConfig::new("   ".into(), None, Duration::from_secs(10));
        assert!(matches!(result, Err(ProvisionError::InvalidInput(_))));
    }

    #[test]
    fn test_config_holds_resolved_values() {
        let credentials = Credentials {
            username: "fhir".into(),
            password: "secret".into(),
        };
        let config = BootstrapConfig::new(
            "mongodb://localhost:27017".into(),
            Some(credentials),
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(config.uri(), "mongodb://localhost:27017");
        assert_eq!(config.credentials().unwrap().username, "fhir");
        assert_eq!(config.connect_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_credentials_require_both_values() {
        let result = credentials_from_env_values(Some("fhir".into()), None);
        assert!(matches!(result, Err(ProvisionError::InvalidInput(_))));

        let result = credentials_from_env_values(None, Some("secret".into()));
        assert!(matches!(result, Err(ProvisionError::InvalidInput(_))));
    }

    #[test]
    fn test_blank_credentials_are_treated_as_unset() {
        let result = credentials_from_env_values(Some("  ".into()), Some("".into())).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_credentials_pair_is_accepted() {
        let credentials = credentials_from_env_values(Some("fhir".into()), Some("secret".into()))
            .unwrap()
            .unwrap();
        assert_eq!(credentials.username, "fhir");
        assert_eq!(credentials.password, "secret");
    }

    #[test]
    fn test_connect_timeout_defaults_when_unset() {
        let timeout = connect_timeout_from_env_value(None).unwrap();
        assert_eq!(timeout, Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));

        let timeout = connect_timeout_from_env_value(Some("  ".into())).unwrap();
        assert_eq!(timeout, Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));
    }

    #[test]
    fn test_connect_timeout_parses_seconds() {
        let timeout = connect_timeout_from_env_value(Some("30".into())).unwrap();
        assert_eq!(timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_connect_timeout_rejects_invalid_values() {
        assert!(connect_timeout_from_env_value(Some("soon".into())).is_err());
        assert!(connect_timeout_from_env_value(Some("-5".into())).is_err());
        assert!(connect_timeout_from_env_value(Some("0".into())).is_err());
    }
}
