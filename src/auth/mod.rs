//! # Authentication
//!
//! HTTP Basic credentials for the form service. The account's API key is
//! sent as the Basic-Auth password.

use std::fmt;

use crate::error::ConfigError;

/// Username and API key pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    api_key: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let username = username.into().trim().to_string();
        if username.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }

        Ok(Self {
            username,
            api_key: api_key.into(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Attach the credentials as a preemptive `Authorization: Basic` header.
    pub fn apply(&self, req_builder: reqwest::blocking::RequestBuilder) -> reqwest::blocking::RequestBuilder {
        req_builder.basic_auth(self.username(), Some(self.api_key()))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
