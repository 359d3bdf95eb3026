//! # CLI Support
//!
//! Command-line arguments for a single call. Every option can also come from
//! a `FORMCALL_*` environment variable, which keeps the API key out of shell
//! history.

use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};

use crate::auth::Credentials;
use crate::error::ConfigError;
use crate::http::request::{
    DEFAULT_ENDPOINT, DEFAULT_MAX_REDIRECTS, DEFAULT_USER_AGENT, RequestConfig, form_service_url,
};

/// Fetch a resource from the form-service API and print it.
#[derive(Debug, Clone, Parser)]
#[command(name = "formcall", version)]
pub struct CliConfig {
    /// Full URL to request.
    #[arg(long, env = "FORMCALL_URL", conflicts_with = "subdomain", required_unless_present = "subdomain")]
    pub url: Option<String>,

    /// Account subdomain; the URL becomes https://<subdomain>.wufoo.com/api/v3/<endpoint>.
    #[arg(long, env = "FORMCALL_SUBDOMAIN")]
    pub subdomain: Option<String>,

    /// API path used together with --subdomain [default: forms.xml].
    #[arg(long, requires = "subdomain", conflicts_with = "url")]
    pub endpoint: Option<String>,

    #[arg(long, env = "FORMCALL_USERNAME")]
    pub username: String,

    #[arg(long, env = "FORMCALL_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Accept any TLS certificate. Only for development endpoints.
    #[arg(long)]
    pub insecure: bool,

    /// Return redirects as-is instead of following them.
    #[arg(long)]
    pub no_follow: bool,

    #[arg(long, default_value_t = DEFAULT_MAX_REDIRECTS)]
    pub max_redirects: usize,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Give up after this many seconds. Unbounded when omitted.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::default())]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Output format for stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Text
    }
}

impl CliConfig {
    pub fn target_url(&self) -> Result<String, ConfigError> {
        match (&self.url, &self.subdomain) {
            (Some(url), _) => Ok(url.clone()),
            (None, Some(subdomain)) => {
                form_service_url(subdomain, self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT))
            }
            (None, None) => Err(ConfigError::InvalidUrl {
                url: String::new(),
                reason: "either --url or --subdomain is required".to_string(),
            }),
        }
    }

    pub fn request_config(&self) -> Result<RequestConfig, ConfigError> {
        let credentials = Credentials::new(&self.username, &self.api_key)?;
        let config = RequestConfig::new(&self.target_url()?, credentials)?
            .with_follow_redirects(!self.no_follow)
            .with_max_redirects(self.max_redirects)
            .with_verify_tls(!self.insecure)
            .with_timeout(self.timeout_secs.map(Duration::from_secs))
            .with_user_agent(&self.user_agent)?;
        Ok(config)
    }
}
