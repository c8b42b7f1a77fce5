//! Service settings, read from an optional TOML file.
//!
//! Every key is optional; missing keys fall back to [`Settings::default`].
//!
//! ```toml
//! bind = "0.0.0.0"
//! login_url = "/login"
//! default_redirect = "/dashboard"
//! message_cookie = "messages"
//! failure_message = "Unable to connect with the external provider, please try again"
//! ```
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Notice shown on the login page after an upstream provider failure.
pub const DEFAULT_FAILURE_MESSAGE: &str =
    "Unable to connect with the external provider, please try again";

/// Settings of the account service.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Address the HTTP server listens on.
    pub bind: String,
    /// Path of the login page. Failed third-party logins are redirected here.
    pub login_url: String,
    /// Where to go after a login when the request names no `next` path.
    pub default_redirect: String,
    /// Name of the cookie carrying flash messages.
    pub message_cookie: String,
    /// Notice shown after an upstream provider failure.
    pub failure_message: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind: String::from("127.0.0.1"),
            login_url: String::from("/login"),
            default_redirect: String::from("/dashboard"),
            message_cookie: String::from("messages"),
            failure_message: String::from(DEFAULT_FAILURE_MESSAGE),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or use the defaults when no path is given.
    ///
    /// # Errors
    /// Errors if the file can't be read or isn't valid settings TOML.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(config_path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(config_path)
            .with_context(|| format!("Unable to read settings at '{}'", config_path.display()))?;
        Self::parse(&raw)
    }

    /// Parse settings from TOML.
    ///
    /// # Errors
    /// Errors if `raw` isn't valid TOML, has unknown keys, or the login URL isn't a path.
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let settings: Self = toml::from_str(raw)?;
        if !settings.login_url.starts_with('/') {
            anyhow::bail!(
                "login_url must be a path starting with '/', got '{}'",
                settings.login_url
            );
        }
        Ok(settings)
    }
}
