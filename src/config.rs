// Application configuration
// Layers: built-in defaults -> optional config.toml -> APP_* environment variables

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

// Neutral placeholder (no dealership logo) for cars without photos / missing ids.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://placehold.co/1200x630?text=Vehicle";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server_address: String,
    // Directory holding the static site (cars.html, auction.html, img/...)
    pub static_dir: String,
    pub placeholder_image: String,
    pub sanity: SanitySettings,
}

// Connection details for the Sanity content API
#[derive(Debug, Clone, Deserialize)]
pub struct SanitySettings {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    pub use_cdn: bool,
    // Width requested for gallery images built from asset references
    pub image_width: u32,
}

impl Settings {
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present

        let builder = Config::builder()
            // Add default values
            .set_default("server_address", "127.0.0.1:8888")?
            .set_default("static_dir", "public")?
            .set_default("placeholder_image", DEFAULT_PLACEHOLDER_IMAGE)?
            .set_default("sanity.project_id", "qsql7lvj")?
            .set_default("sanity.dataset", "production")?
            .set_default("sanity.api_version", "2023-12-16")?
            .set_default("sanity.use_cdn", true)?
            .set_default("sanity.image_width", 1200)?
            // Load from a configuration file (e.g., config.toml)
            .add_source(File::with_name("config").required(false))
            // Load from environment variables (e.g., APP_SERVER_ADDRESS, APP_SANITY__DATASET)
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }
}

impl Default for SanitySettings {
    fn default() -> Self {
        Self {
            project_id: "qsql7lvj".to_string(),
            dataset: "production".to_string(),
            api_version: "2023-12-16".to_string(),
            use_cdn: true,
            image_width: 1200,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_address: "127.0.0.1:8888".to_string(),
            static_dir: "public".to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            sanity: SanitySettings::default(),
        }
    }
}
