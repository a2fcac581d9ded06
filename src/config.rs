//! Feed client configuration, from a JSON file or the environment.
//!
//! ```json
//! {
//!   "api_key": "...",
//!   "feed_id": "ace",
//!   "direction_suffixes": ["N", "S"]
//! }
//! ```

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::station::normalize::{DirectionSuffixes, NORTHBOUND_SUFFIX, SOUTHBOUND_SUFFIX};

/// Base URL of the MTA subway realtime feeds; a feed ID is appended as
/// `-<feed_id>`, except for the numbered lines whose feed ID is empty.
pub const MTA_FEED_BASE_URL: &str =
    "https://api-endpoint.mta.info/Dataservice/mtagtfsfeeds/nyct%2Fgtfs";

pub const API_KEY_VAR: &str = "MTA_API_KEY";
pub const FEED_ID_VAR: &str = "MTA_FEED_ID";
pub const DIRECTION_SUFFIXES_VAR: &str = "MTA_DIRECTION_SUFFIXES";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub api_key: String,
    #[serde(default)]
    pub feed_id: String,
    #[serde(default = "default_direction_suffixes")]
    pub direction_suffixes: Vec<char>,
}

fn default_direction_suffixes() -> Vec<char> {
    vec![NORTHBOUND_SUFFIX, SOUTHBOUND_SUFFIX]
}

fn direction_suffixes_from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Vec<char> {
    match lookup(DIRECTION_SUFFIXES_VAR) {
        Some(suffixes) => suffixes.chars().collect(),
        None => default_direction_suffixes(),
    }
}

impl Config {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("reading config '{path}'"))?;
        let config: Config =
            serde_json::from_str(&content).with_context(|| format!("parsing config '{path}'"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `MTA_API_KEY`, `MTA_FEED_ID` and `MTA_DIRECTION_SUFFIXES` (e.g. `"NS"`).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(API_KEY_VAR).with_context(|| format!("{API_KEY_VAR} must be set"))?;
        let direction_suffixes = direction_suffixes_from_lookup(&lookup);

        let config = Config {
            api_key,
            feed_id: lookup(FEED_ID_VAR).unwrap_or_default(),
            direction_suffixes,
        };
        config.validate()?;
        Ok(config)
    }

    /// Direction suffixes from `MTA_DIRECTION_SUFFIXES`, for runs that read a
    /// snapshot without any other configuration.
    pub fn suffixes_from_env() -> DirectionSuffixes {
        DirectionSuffixes::new(direction_suffixes_from_lookup(&|name: &str| std::env::var(name).ok()))
    }

    fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            bail!("API key is empty");
        }
        Ok(())
    }

    pub fn feed_url(&self) -> String {
        if self.feed_id.is_empty() {
            MTA_FEED_BASE_URL.to_string()
        } else {
            format!("{}-{}", MTA_FEED_BASE_URL, self.feed_id)
        }
    }

    pub fn suffixes(&self) -> DirectionSuffixes {
        DirectionSuffixes::new(self.direction_suffixes.iter().copied())
    }
}
