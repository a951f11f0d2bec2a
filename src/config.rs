use std::path::Path;

use ::config as config_rs;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

pub const DEFAULT_COLLECTION_NAME: &str = "API Collection";
pub const DEFAULT_SCHEMA_URL: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";
pub const DEFAULT_RUST_LOG: &str = "info";

pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "PMGEN";
    const SEPARATOR: &'static str = "__";

    fn load_dotenv() {
        // Load .env from crate root (falls back to current dir if missing)
        let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        let _ = dotenvy::from_filename(manifest_dir.join(".env")).or_else(|_| dotenvy::dotenv());
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn from_env() -> Result<Self> {
        Self::load_dotenv();

        let settings = config_rs::Config::builder()
            .add_source(
                config_rs::Environment::with_prefix(Self::PREFIX)
                    .prefix_separator("_")
                    .separator(Self::SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .context("failed to read environment variables for config")?;

        let cfg = settings
            .try_deserialize::<Self>()
            .context("failed to deserialize environment into config")?;

        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        <Self as EnvConfig>::from_env()
    }
}

impl EnvConfig for AppConfig {
    fn validate(&self) -> Result<()> {
        if self.export.collection_name.trim().is_empty() {
            bail!("export.collection_name must not be empty");
        }
        if self.export.schema_url.trim().is_empty() {
            bail!("export.schema_url must not be empty");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub collection_name: String,
    pub schema_url: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
            schema_url: DEFAULT_SCHEMA_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub rust_log: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            rust_log: DEFAULT_RUST_LOG.to_string(),
        }
    }
}
