//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed
//! into core services. Request handlers never read process-wide
//! environment variables, which keeps behaviour consistent across
//! multi-threaded runtimes and test harnesses.

use crate::{PatientError, PatientResult};

/// Database name used when `ODONTO_DB_NAME` is not set.
pub const DEFAULT_DB_NAME: &str = "odonto";

/// The single frontend origin permitted by default.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://dancing-figolla-581185.netlify.app";

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    mongodb_uri: String,
    db_name: String,
    allowed_origin: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    /// Returns `PatientError::InvalidInput` if the connection string,
    /// database name, or allowed origin is empty.
    pub fn new(
        mongodb_uri: String,
        db_name: String,
        allowed_origin: String,
    ) -> PatientResult<Self> {
        if mongodb_uri.trim().is_empty() {
            return Err(PatientError::InvalidInput(
                "mongodb_uri cannot be empty".into(),
            ));
        }
        if db_name.trim().is_empty() {
            return Err(PatientError::InvalidInput("db_name cannot be empty".into()));
        }
        if allowed_origin.trim().is_empty() {
            return Err(PatientError::InvalidInput(
                "allowed_origin cannot be empty".into(),
            ));
        }

        Ok(Self {
            mongodb_uri,
            db_name,
            allowed_origin,
        })
    }

    pub fn mongodb_uri(&self) -> &str {
        &self.mongodb_uri
    }

    pub fn db_name(&self) -> &str {
        &self.db_name
    }

    pub fn allowed_origin(&self) -> &str {
        &self.allowed_origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_connection_string() {
        let err = CoreConfig::new(
            "  ".into(),
            DEFAULT_DB_NAME.into(),
            DEFAULT_ALLOWED_ORIGIN.into(),
        );
        assert!(matches!(err, Err(PatientError::InvalidInput(_))));
    }

    #[test]
    fn exposes_resolved_values() {
        let cfg = CoreConfig::new(
            "mongodb://localhost:27017".into(),
            "clinic".into(),
            "http://localhost:5173".into(),
        )
        .expect("valid config");
        assert_eq!(cfg.mongodb_uri(), "mongodb://localhost:27017");
        assert_eq!(cfg.db_name(), "clinic");
        assert_eq!(cfg.allowed_origin(), "http://localhost:5173");
    }
}
