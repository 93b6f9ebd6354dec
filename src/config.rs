use std::{env, net::SocketAddr, time::Duration};

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub bind_addr: SocketAddr,
    /// Where the published `data.json` lives, if it has been deployed.
    pub snapshot_url: Option<String>,
    pub snapshot_timeout: Duration,
    /// Consult the local store before the published snapshot.
    pub prefer_local: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://double-santa.db?mode=rwc".into(),
            rust_log: "debug".into(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            snapshot_url: None,
            snapshot_timeout: Duration::from_secs(5),
            prefer_local: false,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // A missing .env file is fine; the process environment still applies.
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_addr = match var("BIND_ADDR") {
            Some(addr) => addr
                .parse()
                .with_context(|| format!("BIND_ADDR is not a socket address: {addr}"))?,
            None => defaults.bind_addr,
        };
        let snapshot_timeout = match var("SNAPSHOT_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(
                secs.parse()
                    .with_context(|| format!("SNAPSHOT_TIMEOUT_SECS is not a number: {secs}"))?,
            ),
            None => defaults.snapshot_timeout,
        };
        let prefer_local = match var("PREFER_LOCAL") {
            Some(flag) => parse_flag(&flag)
                .with_context(|| format!("PREFER_LOCAL is not a boolean: {flag}"))?,
            None => defaults.prefer_local,
        };

        Ok(Self {
            database_url: var("DATABASE_URL").unwrap_or(defaults.database_url),
            rust_log: var("RUST_LOG").unwrap_or(defaults.rust_log),
            bind_addr,
            snapshot_url: var("SNAPSHOT_URL"),
            snapshot_timeout,
            prefer_local,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.database_url, "sqlite://double-santa.db?mode=rwc");
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.snapshot_url, None);
        assert_eq!(config.snapshot_timeout, Duration::from_secs(5));
        assert!(!config.prefer_local);
    }

    #[test]
    fn reads_every_variable() {
        let config = config(&[
            ("DATABASE_URL", "postgres://santa@localhost/santa"),
            ("RUST_LOG", "info"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("SNAPSHOT_URL", "https://example.org/santa/data.json"),
            ("SNAPSHOT_TIMEOUT_SECS", "12"),
            ("PREFER_LOCAL", "yes"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "postgres://santa@localhost/santa");
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(
            config.snapshot_url.as_deref(),
            Some("https://example.org/santa/data.json")
        );
        assert_eq!(config.snapshot_timeout, Duration::from_secs(12));
        assert!(config.prefer_local);
    }

    #[test]
    fn blank_snapshot_url_means_none() {
        assert_eq!(config(&[("SNAPSHOT_URL", "  ")]).unwrap().snapshot_url, None);
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(config(&[("BIND_ADDR", "nowhere")]).is_err());
        assert!(config(&[("SNAPSHOT_TIMEOUT_SECS", "soon")]).is_err());
        assert!(config(&[("PREFER_LOCAL", "maybe")]).is_err());
    }
}
