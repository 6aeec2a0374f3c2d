use std::fmt;

/// Default bundle API address, matching the local development stack.
pub const DEFAULT_BUNDLE_API_URL: &str = "http://localhost:29800";

/// Default service auth token used outside production environments.
pub const DEFAULT_SERVICE_TOKEN: &str = "bundle-scheduler-test-auth-token";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Service configuration, resolved once at process start and handed to the
/// publisher by value.
#[derive(Clone)]
pub struct Config {
    /// Base URL of the bundle API.
    pub bundle_api_url: String,
    /// Service auth token sent on every bundle API request.
    pub service_token: String,
}

impl Config {
    pub fn new(bundle_api_url: impl Into<String>, service_token: impl Into<String>) -> Self {
        Self {
            bundle_api_url: bundle_api_url.into(),
            service_token: service_token.into(),
        }
    }
}

/// The service token must never reach the logs; `Debug` renders it redacted.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bundle_api_url", &self.bundle_api_url)
            .field("service_token", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_service_token() {
        let config = Config::new(DEFAULT_BUNDLE_API_URL, "super-secret-token");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret-token"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains(DEFAULT_BUNDLE_API_URL));
    }
}
