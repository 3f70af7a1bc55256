use anyhow::Context;

/// Worker configuration loaded from environment variables.
///
/// | Env Var        | Default                        |
/// |----------------|--------------------------------|
/// | `DATABASE_URL` | required                       |
/// | `RULES_PATH`   | `configs/validation_rules.yml` |
/// | `BATCH_PATH`   | first CLI argument             |
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Path to the YAML validation ruleset.
    pub rules_path: String,
    /// Path to the extracted batch file (JSON array of raw records).
    pub batch_path: String,
}

impl WorkerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let rules_path = std::env::var("RULES_PATH")
            .unwrap_or_else(|_| "configs/validation_rules.yml".to_string());

        let batch_path = match std::env::var("BATCH_PATH") {
            Ok(path) => path,
            Err(_) => std::env::args()
                .nth(1)
                .context("BATCH_PATH not set and no batch file argument given")?,
        };

        Ok(Self {
            database_url,
            rules_path,
            batch_path,
        })
    }
}
