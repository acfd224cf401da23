//! Configuration module for environment variable and flag parsing.
//!
//! Secrets come from the environment, the listen address from the `--addr`
//! command-line flag.

use std::env;
use std::fmt;
use std::net::{AddrParseError, SocketAddr};

use clap::Parser;
use thiserror::Error;
use tracing::warn;

/// Default base URL of the Slack Web API.
pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com";

/// Default listen address, all interfaces on port 8080.
pub const DEFAULT_ADDR: &str = ":8080";

/// Errors raised while assembling the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not defined")]
    Missing(&'static str),

    #[error("{0} is empty")]
    Empty(&'static str),

    #[error("invalid listen address {addr:?}: {source}")]
    InvalidAddr {
        addr: String,
        #[source]
        source: AddrParseError,
    },
}

/// Command-line flags.
#[derive(Debug, Clone, Parser)]
#[command(name = "pingbot", about = "Slack Events API receiver")]
pub struct Args {
    /// The address to listen to
    #[arg(long, default_value = DEFAULT_ADDR)]
    pub addr: String,
}

/// Application configuration.
#[derive(Clone)]
pub struct Config {
    /// Slack app signing secret, keys the request signature HMAC
    pub signing_secret: String,

    /// Bot access token used for outbound Web API calls
    pub access_token: String,

    /// Base URL of the Slack Web API
    pub slack_api_url: String,

    /// Outbound HTTP request timeout in milliseconds
    pub request_timeout_ms: u64,

    /// Socket address the web server binds to
    pub listen_addr: SocketAddr,
}

impl Config {
    /// Load configuration from the process environment and parsed flags.
    pub fn from_env(args: &Args) -> Result<Self, ConfigError> {
        Self::from_lookup(args, |name| env::var(name).ok())
    }

    /// Load configuration using `lookup` to resolve variables.
    pub fn from_lookup<F>(args: &Args, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token = required(&lookup, "SLACK_ACCESS_TOKEN")?;
        let signing_secret = required(&lookup, "SLACK_SIGNING_SECRET")?;

        let request_timeout_ms = match lookup("REQUEST_TIMEOUT_MS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(env_var = "REQUEST_TIMEOUT_MS", value = %raw, "Invalid timeout, using default");
                8000
            }),
            None => 8000,
        };

        Ok(Config {
            signing_secret,
            access_token,
            slack_api_url: lookup("SLACK_API_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SLACK_API_URL.to_string()),
            request_timeout_ms,
            listen_addr: parse_listen_addr(&args.addr)?,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("signing_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("slack_api_url", &self.slack_api_url)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("listen_addr", &self.listen_addr)
            .finish()
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Err(ConfigError::Missing(name)),
        Some(v) if v.trim().is_empty() => Err(ConfigError::Empty(name)),
        Some(v) => Ok(v),
    }
}

/// Parse a listen address. A bare `:PORT` binds every interface.
pub fn parse_listen_addr(addr: &str) -> Result<SocketAddr, ConfigError> {
    let candidate = match addr.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{port}"),
        None => addr.to_string(),
    };

    candidate
        .parse()
        .map_err(|source| ConfigError::InvalidAddr {
            addr: addr.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(addr: &str) -> Args {
        Args {
            addr: addr.to_string(),
        }
    }

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_defaults() {
        let lookup = lookup_from(&[
            ("SLACK_ACCESS_TOKEN", "xoxb-token"),
            ("SLACK_SIGNING_SECRET", "secret"),
        ]);
        let config = Config::from_lookup(&args(DEFAULT_ADDR), lookup).unwrap();

        assert_eq!(config.access_token, "xoxb-token");
        assert_eq!(config.signing_secret, "secret");
        assert_eq!(config.slack_api_url, DEFAULT_SLACK_API_URL);
        assert_eq!(config.request_timeout_ms, 8000);
        assert_eq!(config.listen_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let lookup = lookup_from(&[
            ("SLACK_ACCESS_TOKEN", "xoxb-token"),
            ("SLACK_SIGNING_SECRET", "secret"),
            ("SLACK_API_URL", "http://127.0.0.1:9000"),
            ("REQUEST_TIMEOUT_MS", "1500"),
        ]);
        let config = Config::from_lookup(&args("127.0.0.1:3000"), lookup).unwrap();

        assert_eq!(config.slack_api_url, "http://127.0.0.1:9000");
        assert_eq!(config.request_timeout_ms, 1500);
        assert_eq!(config.listen_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_invalid_timeout_uses_default() {
        let lookup = lookup_from(&[
            ("SLACK_ACCESS_TOKEN", "xoxb-token"),
            ("SLACK_SIGNING_SECRET", "secret"),
            ("REQUEST_TIMEOUT_MS", "soon"),
        ]);
        let config = Config::from_lookup(&args(DEFAULT_ADDR), lookup).unwrap();
        assert_eq!(config.request_timeout_ms, 8000);
    }

    #[test]
    fn test_missing_access_token() {
        let lookup = lookup_from(&[("SLACK_SIGNING_SECRET", "secret")]);
        let err = Config::from_lookup(&args(DEFAULT_ADDR), lookup).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SLACK_ACCESS_TOKEN")));
        assert_eq!(err.to_string(), "SLACK_ACCESS_TOKEN not defined");
    }

    #[test]
    fn test_empty_signing_secret() {
        let lookup = lookup_from(&[
            ("SLACK_ACCESS_TOKEN", "xoxb-token"),
            ("SLACK_SIGNING_SECRET", "  "),
        ]);
        let err = Config::from_lookup(&args(DEFAULT_ADDR), lookup).unwrap_err();
        assert!(matches!(err, ConfigError::Empty("SLACK_SIGNING_SECRET")));
    }

    #[test]
    fn test_parse_listen_addr() {
        assert_eq!(
            parse_listen_addr(":9090").unwrap(),
            "0.0.0.0:9090".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(
            parse_listen_addr("[::1]:8080").unwrap(),
            "[::1]:8080".parse::<SocketAddr>().unwrap()
        );
        assert!(matches!(
            parse_listen_addr("localhost"),
            Err(ConfigError::InvalidAddr { .. })
        ));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let lookup = lookup_from(&[
            ("SLACK_ACCESS_TOKEN", "xoxb-token"),
            ("SLACK_SIGNING_SECRET", "secret"),
        ]);
        let config = Config::from_lookup(&args(DEFAULT_ADDR), lookup).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("xoxb-token"));
        assert!(debug.contains("<redacted>"));
    }
}
