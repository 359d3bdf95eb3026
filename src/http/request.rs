use std::time::Duration;

use reqwest::Url;
use reqwest::header::HeaderValue;

use crate::auth::Credentials;
use crate::error::ConfigError;

pub const DEFAULT_USER_AGENT: &str = concat!("formcall/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_MAX_REDIRECTS: usize = 10;
pub const DEFAULT_ENDPOINT: &str = "forms.xml";

/// Everything needed to perform one call. Validated on construction.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    url: Url,
    credentials: Credentials,
    follow_redirects: bool,
    max_redirects: usize,
    verify_tls: bool,
    user_agent: String,
    timeout: Option<Duration>,
}

impl RequestConfig {
    pub fn new(url: &str, credentials: Credentials) -> Result<Self, ConfigError> {
        let url = url.trim();
        let parsed = Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(parsed.scheme().to_string()));
        }

        Ok(Self {
            url: parsed,
            credentials,
            follow_redirects: true,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            verify_tls: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        })
    }

    pub fn with_follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    pub fn with_max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Turning verification off accepts any certificate the server presents.
    pub fn with_verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Result<Self, ConfigError> {
        HeaderValue::from_str(user_agent).map_err(|e| ConfigError::InvalidUserAgent {
            value: user_agent.to_string(),
            reason: e.to_string(),
        })?;
        self.user_agent = user_agent.to_string();
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn follow_redirects(&self) -> bool {
        self.follow_redirects
    }

    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }

    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Build the v3 API URL for an account subdomain, e.g. `forms.xml` or
/// `forms/s1afea8b1vk0jf7/entries.json`.
pub fn form_service_url(subdomain: &str, endpoint: &str) -> Result<String, ConfigError> {
    let subdomain = subdomain.trim();
    let valid = !subdomain.is_empty()
        && !subdomain.starts_with('-')
        && !subdomain.ends_with('-')
        && subdomain.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !valid {
        return Err(ConfigError::InvalidSubdomain(subdomain.to_string()));
    }

    let endpoint = endpoint.trim().trim_start_matches('/');
    Ok(format!("https://{subdomain}.wufoo.com/api/v3/{endpoint}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials::new("marc", "key").unwrap()
    }

    #[test]
    fn defaults_are_secure() {
        let config = RequestConfig::new("https://acme.wufoo.com/api/v3/forms.xml", creds()).unwrap();
        assert!(config.verify_tls());
        assert!(config.follow_redirects());
        assert_eq!(config.max_redirects(), DEFAULT_MAX_REDIRECTS);
        assert_eq!(config.user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn builder_overrides() {
        let config = RequestConfig::new("http://localhost:8080/x", creds())
            .unwrap()
            .with_verify_tls(false)
            .with_follow_redirects(false)
            .with_max_redirects(3)
            .with_timeout(Some(Duration::from_secs(5)))
            .with_user_agent("Testing for API Contest")
            .unwrap();
        assert!(!config.verify_tls());
        assert!(!config.follow_redirects());
        assert_eq!(config.max_redirects(), 3);
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.user_agent(), "Testing for API Contest");
    }

    #[test]
    fn rejects_unparseable_url() {
        let err = RequestConfig::new("not a url", creds()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = RequestConfig::new("ftp://acme.example/forms.xml", creds()).unwrap_err();
        assert_eq!(err, ConfigError::UnsupportedScheme("ftp".into()));
    }

    #[test]
    fn rejects_user_agent_with_newline() {
        let err = RequestConfig::new("https://acme.example", creds())
            .unwrap()
            .with_user_agent("bad\nagent")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUserAgent { .. }));
    }

    #[test]
    fn builds_form_service_url() {
        assert_eq!(
            form_service_url("marcpare", DEFAULT_ENDPOINT).unwrap(),
            "https://marcpare.wufoo.com/api/v3/forms.xml"
        );
        assert_eq!(
            form_service_url("acme", "/forms/abc/entries.json").unwrap(),
            "https://acme.wufoo.com/api/v3/forms/abc/entries.json"
        );
    }

    #[test]
    fn rejects_bad_subdomain() {
        for bad in ["", "a.b", "-acme", "ac me"] {
            assert!(form_service_url(bad, DEFAULT_ENDPOINT).is_err(), "{bad:?}");
        }
    }
}
