use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the precomputed ingredient embedding artifact (JSON)
    #[serde(default = "default_embeddings_path")]
    pub embeddings_path: String,

    /// Batch size used when streaming recipes into the lexical index
    #[serde(default = "default_index_batch_size")]
    pub index_batch_size: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_embeddings_path() -> String {
    "data/ingredient_embeddings.json".to_string()
}

fn default_index_batch_size() -> usize {
    100
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
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
