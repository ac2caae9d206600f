use crate::config::types::{Config, FileConfig};
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;
use std::str::FromStr;

/// Loads the configuration from defaults, an optional TOML file and the
/// process environment
///
/// # Arguments
///
/// * `path` - Optional path to a TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Loaded configuration; non-fatal problems are logged as warnings
/// * `Err(ConfigError)` - Missing API key, unreadable file, or invalid TOML
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use job_importer::config::load_config;
///
/// let config = load_config(Some(Path::new("importer.toml"))).unwrap();
/// println!("Batch size: {}", config.backend.batch_size);
/// ```
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    load_config_from(path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`], reading environment values through `lookup`
pub fn load_config_from<F>(path: Option<&Path>, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = Config::default();

    if let Some(path) = path {
        let content = std::fs::read_to_string(path)?;
        let file: FileConfig = toml::from_str(&content)?;
        file.apply(&mut config);
    }

    apply_env(&mut config, lookup);

    validate(&config)?;

    Ok(config)
}

/// Overrides configuration values from environment variables
///
/// Empty values count as unset. Numeric values that fail to parse are
/// reported and ignored.
pub fn apply_env<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    if let Some(base_url) = get("BACKEND_URL") {
        config.backend.base_url = base_url;
    }
    if let Some(api_key) = get("CRON_API_KEY") {
        config.backend.api_key = api_key;
    }
    let batch_size = get("IMPORT_BATCH_SIZE").and_then(|v| parse_number("IMPORT_BATCH_SIZE", &v));
    if let Some(batch_size) = batch_size {
        config.backend.batch_size = batch_size;
    }

    if let Some(raw) = get("JOBSPY_QUERIES") {
        let queries = parse_queries(&raw);
        if queries.is_empty() {
            tracing::warn!("JOBSPY_QUERIES contains no queries, keeping the default list");
        } else {
            config.search.queries = queries;
        }
    }
    if let Some(location) = get("JOBSPY_LOCATION") {
        config.search.location = location;
    }
    let results_wanted =
        get("JOBSPY_RESULTS_WANTED").and_then(|v| parse_number("JOBSPY_RESULTS_WANTED", &v));
    if let Some(results_wanted) = results_wanted {
        config.search.results_wanted = results_wanted;
    }
    let hours_old = get("JOBSPY_HOURS_OLD").and_then(|v| parse_number("JOBSPY_HOURS_OLD", &v));
    if let Some(hours_old) = hours_old {
        config.search.hours_old = hours_old;
    }

    if let Some(api_url) = get("JOBSPY_API_URL") {
        config.scraper.api_url = api_url;
    }
    if let Some(api_key) = get("JOBSPY_API_KEY") {
        config.scraper.api_key = Some(api_key);
    }
}

/// Splits a comma-separated query override, dropping blank entries
pub fn parse_queries(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(String::from)
        .collect()
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Option<T> {
    match value.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!("Ignoring {}={:?}: not a valid number", key, value);
            None
        }
    }
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so runs can be matched to the file they used.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and the file hash, if
/// a file was used
pub fn load_config_with_hash(path: Option<&Path>) -> Result<(Config, Option<String>), ConfigError> {
    let config = load_config(path)?;
    let hash = path.map(compute_config_hash).transpose()?;
    Ok((config, hash))
}
