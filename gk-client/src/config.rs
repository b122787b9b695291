use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub photo: PhotoConfig,
}

impl Config {
    /// Load the configuration from a YAML file.
    pub fn load(yml_path: &str) -> anyhow::Result<Self> {
        let yml = std::fs::read_to_string(yml_path)?;
        let config = serde_yaml::from_str(&yml)?;
        Ok(config)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the recipe service, without a trailing slash
    pub server: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StorageConfig {
    pub bucket: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    #[serde(default = "default_category")]
    pub category: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PhotoConfig {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
    #[serde(default = "default_quality")]
    pub quality: f32,
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            max_dimension: default_max_dimension(),
            quality: default_quality(),
        }
    }
}

fn default_public_base_url() -> String {
    "https://storage.googleapis.com".into()
}

fn default_category() -> String {
    crate::submit::DEFAULT_PHOTO_CATEGORY.into()
}

fn default_max_bytes() -> usize {
    20_000_000
}

fn default_max_dimension() -> u32 {
    2048
}

fn default_quality() -> f32 {
    75.0
}
