use serde::Deserialize;

/// Production bulk-import host
pub const DEFAULT_BACKEND_URL: &str = "https://api.allfrontoffice.com";

/// Local JobSpy API service
pub const DEFAULT_SCRAPER_URL: &str = "http://localhost:8000";

/// Fallback location for searches and for listings without any location data
pub const DEFAULT_LOCATION: &str = "United States";

pub const DEFAULT_RESULTS_WANTED: u32 = 25;
pub const DEFAULT_HOURS_OLD: u32 = 24;
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Country qualifier passed to Indeed
pub const COUNTRY_INDEED: &str = "USA";

/// Per-request timeout for bulk-import uploads
pub const UPLOAD_TIMEOUT_SECS: u64 = 60;

pub const DEFAULT_QUERIES: &[&str] = &[
    "software engineer",
    "frontend developer",
    "backend developer",
    "data engineer",
    "product manager",
    "devops engineer",
];

/// Main configuration structure for Job-Importer
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub backend: BackendConfig,
    pub search: SearchConfig,
    pub scraper: ScraperConfig,
}

/// Bulk-import endpoint configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Base URL; the import path is appended to it
    pub base_url: String,

    /// Value sent in the `X-API-Key` header. Required before any work starts.
    pub api_key: String,

    /// Maximum number of jobs per POST
    pub batch_size: usize,
}

/// Search parameters shared by every query
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Search terms, processed in order
    pub queries: Vec<String>,

    /// Location string passed to the job boards
    pub location: String,

    /// Results requested per query
    pub results_wanted: u32,

    /// Only listings posted within this many hours
    pub hours_old: u32,
}

/// JobSpy-compatible scraping service
#[derive(Debug, Clone, PartialEq)]
pub struct ScraperConfig {
    pub api_url: String,
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                base_url: DEFAULT_BACKEND_URL.to_string(),
                api_key: String::new(),
                batch_size: DEFAULT_BATCH_SIZE,
            },
            search: SearchConfig {
                queries: DEFAULT_QUERIES.iter().map(|q| q.to_string()).collect(),
                location: DEFAULT_LOCATION.to_string(),
                results_wanted: DEFAULT_RESULTS_WANTED,
                hours_old: DEFAULT_HOURS_OLD,
            },
            scraper: ScraperConfig {
                api_url: DEFAULT_SCRAPER_URL.to_string(),
                api_key: None,
            },
        }
    }
}

/// On-disk TOML layer; every key is optional and overrides the defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub backend: FileBackend,
    pub search: FileSearch,
    pub scraper: FileScraper,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FileBackend {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub batch_size: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FileSearch {
    pub queries: Option<Vec<String>>,
    pub location: Option<String>,
    pub results_wanted: Option<u32>,
    pub hours_old: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FileScraper {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
}

impl FileConfig {
    /// Applies every key present in the file on top of `config`
    pub fn apply(self, config: &mut Config) {
        if let Some(base_url) = self.backend.base_url {
            config.backend.base_url = base_url;
        }
        if let Some(api_key) = self.backend.api_key {
            config.backend.api_key = api_key;
        }
        if let Some(batch_size) = self.backend.batch_size {
            config.backend.batch_size = batch_size;
        }

        if let Some(queries) = self.search.queries {
            config.search.queries = queries;
        }
        if let Some(location) = self.search.location {
            config.search.location = location;
        }
        if let Some(results_wanted) = self.search.results_wanted {
            config.search.results_wanted = results_wanted;
        }
        if let Some(hours_old) = self.search.hours_old {
            config.search.hours_old = hours_old;
        }

        if let Some(api_url) = self.scraper.api_url {
            config.scraper.api_url = api_url;
        }
        if self.scraper.api_key.is_some() {
            config.scraper.api_key = self.scraper.api_key;
        }
    }
}
