//! Runtime configuration resolved from the environment.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use crate::search::DEFAULT_THRESHOLD;
use crate::utils::get_data_dir;

pub const BACKEND_URL_ENV: &str = "HOWTO_BACKEND_URL";
pub const THRESHOLD_ENV: &str = "HOWTO_SEARCH_THRESHOLD";
pub const CATALOG_ENV: &str = "HOWTO_CATALOG";

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the history file
    pub data_dir: PathBuf,
    /// Base URL of the "ask" backend
    pub backend_url: String,
    /// Minimum search score
    pub threshold: f64,
    /// JSON catalog to search instead of the builtin guides
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    /// Resolve configuration from `HOWTO_*` environment variables
    pub fn from_env() -> Result<Self> {
        let data_dir = get_data_dir()?;

        let backend_url = non_empty_var(BACKEND_URL_ENV)
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let threshold = match non_empty_var(THRESHOLD_ENV) {
            Some(raw) => parse_threshold(&raw)
                .with_context(|| format!("Invalid {} value: {:?}", THRESHOLD_ENV, raw))?,
            None => DEFAULT_THRESHOLD,
        };

        let catalog_path = non_empty_var(CATALOG_ENV).map(PathBuf::from);

        Ok(Self { data_dir, backend_url, threshold, catalog_path })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parse a threshold in `0.0..=1.0`
pub fn parse_threshold(raw: &str) -> Result<f64> {
    let value: f64 = raw.trim().parse().context("threshold must be a number")?;
    if !(0.0..=1.0).contains(&value) {
        bail!("threshold must be between 0 and 1, got {}", value);
    }
    Ok(value)
}
