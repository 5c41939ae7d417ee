use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: Option<String>,
    pub log_level: String,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let config = Config {
            catalog_path: env::var("CATALOG_PATH").ok().filter(|p| !p.is_empty()),
            log_level: env::var("LOG_LEVEL")
                .unwrap_or("info".to_string())
                .to_string(),
            environment: env::var("APP_ENV")
                .unwrap_or("development".to_string())
                .to_string(),
        };

        tracing::debug!(
            "Config: successfully loaded for {} environment",
            config.environment
        );
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if let Some(path) = &self.catalog_path {
            if !path.ends_with(".json") {
                return Err(anyhow::anyhow!("CATALOG_PATH must point to a .json file"));
            }
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
