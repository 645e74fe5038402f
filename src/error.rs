//! Error types and handling for the `routecast` service

use thiserror::Error;

/// Main error type for the `routecast` service
#[derive(Error, Debug)]
pub enum RoutecastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream API communication errors
    #[error("API error: {message}")]
    Api { message: String },
}

impl RoutecastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = RoutecastError::config("missing API key");
        assert!(matches!(config_err, RoutecastError::Config { .. }));

        let api_err = RoutecastError::api("connection failed");
        assert!(matches!(api_err, RoutecastError::Api { .. }));
    }

    #[test]
    fn test_error_messages() {
        let config_err = RoutecastError::config("missing API key");
        assert!(config_err.to_string().contains("missing API key"));

        let api_err = RoutecastError::api("connection failed");
        assert!(api_err.to_string().contains("connection failed"));
    }
}
