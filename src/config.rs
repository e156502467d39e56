//! Runtime configuration.
//!
//! Values come from a TOML file or string, and each one can be overridden by an environment
//! variable:
//!
//! | key    | env var          | default          |
//! |--------|------------------|------------------|
//! | `mode` | `ROUTEKIT_MODE`  | `auto`           |
//! | `addr` | `ROUTEKIT_ADDR`  | `127.0.0.1:3000` |
//! | `log`  | `ROUTEKIT_LOG`   | `info`           |

use crate::Error;
use serde::Deserialize;
use std::fmt::{self, Display, Formatter};
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;

pub const MODE_ENV: &str = "ROUTEKIT_MODE";
pub const ADDR_ENV: &str = "ROUTEKIT_ADDR";
pub const LOG_ENV: &str = "ROUTEKIT_LOG";

/// How the hosting process receives requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Command-line mode when the process was given arguments, network mode otherwise.
    #[default]
    Auto,
    /// Requests come from the process arguments.
    Cli,
    /// Requests come from an HTTP listener.
    Http,
}

impl Mode {
    /// Resolves [`Mode::Auto`] against whether the process received any arguments.
    pub fn resolve(self, has_args: bool) -> Mode {
        match self {
            Mode::Auto if has_args => Mode::Cli,
            Mode::Auto => Mode::Http,
            other => other,
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Mode::Auto),
            "cli" => Ok(Mode::Cli),
            "http" => Ok(Mode::Http),
            other => Err(Error::Config(format!("unknown mode `{}`, expected auto, cli or http", other))),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Auto => "auto",
            Mode::Cli => "cli",
            Mode::Http => "http",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub mode: Mode,
    pub addr: SocketAddr,
    /// A `tracing_subscriber::EnvFilter` directive.
    pub log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mode: Mode::Auto,
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            log: "info".to_owned(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Config, Error> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Loads a TOML file, then applies the environment overrides.
    pub fn load(path: &Path) -> Result<Config, Error> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("couldn't read {}: {}", path.display(), e)))?;
        Config::from_toml_str(&content)?.with_overrides(|key| std::env::var(key).ok())
    }

    /// The defaults with the environment overrides applied.
    pub fn from_env() -> Result<Config, Error> {
        Config::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up by environment variable name.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Config, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup(MODE_ENV) {
            self.mode = mode.parse()?;
        }
        if let Some(addr) = lookup(ADDR_ENV) {
            self.addr = addr
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("invalid {} `{}`: {}", ADDR_ENV, addr, e)))?;
        }
        if let Some(log) = lookup(LOG_ENV) {
            self.log = log;
        }
        Ok(self)
    }
}
