use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// CSV file with the full product catalog used for recommendations and search
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// CSV file with the products shown on the landing page
    #[serde(default = "default_trending_path")]
    pub trending_path: String,

    /// PostgreSQL connection URL; accounts are kept in memory when unset
    #[serde(default)]
    pub database_url: Option<String>,

    /// Number of trending products shown on the landing page
    #[serde(default = "default_trending_count")]
    pub trending_count: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_catalog_path() -> String {
    "models/clean_data.csv".to_string()
}

fn default_trending_path() -> String {
    "models/trending_products.csv".to_string()
}

fn default_trending_count() -> usize {
    8
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
