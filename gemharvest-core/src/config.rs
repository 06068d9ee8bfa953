use crate::error::{ConfigError, CoreError};

pub const ENV_CLIENT_ID: &str = "REDDIT_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "REDDIT_CLIENT_SECRET";
pub const ENV_USER_AGENT: &str = "REDDIT_USER_AGENT";
pub const ENV_SUBREDDIT: &str = "GEMS_SUBREDDIT";
pub const ENV_OUTPUT_DIR: &str = "GEMS_OUTPUT_DIR";

const DEFAULT_USER_AGENT: &str = "gemharvest/0.1";
const DEFAULT_SUBREDDIT: &str = "GeminiAI";
const DEFAULT_OUTPUT_DIR: &str = "gems";

/// Run configuration, built once at process start and passed into the
/// components that need it. Core logic never reads the environment.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
    pub subreddit: String,
    pub output_dir: String,
}

impl ExtractorConfig {
    /// Builds the config from explicit values. Credentials are validated
    /// here, before any network access: both must be present and neither
    /// may still hold the sample placeholder from the setup docs.
    pub fn from_vars(
        client_id: Option<String>,
        client_secret: Option<String>,
        user_agent: Option<String>,
        subreddit: Option<String>,
        output_dir: Option<String>,
    ) -> Result<Self, CoreError> {
        let client_id = require_credential(ENV_CLIENT_ID, client_id)?;
        let client_secret = require_credential(ENV_CLIENT_SECRET, client_secret)?;

        Ok(Self {
            client_id,
            client_secret,
            user_agent: user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            subreddit: subreddit.unwrap_or_else(|| DEFAULT_SUBREDDIT.to_string()),
            output_dir: output_dir.unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
        })
    }

    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_vars(
            std::env::var(ENV_CLIENT_ID).ok(),
            std::env::var(ENV_CLIENT_SECRET).ok(),
            std::env::var(ENV_USER_AGENT).ok(),
            std::env::var(ENV_SUBREDDIT).ok(),
            std::env::var(ENV_OUTPUT_DIR).ok(),
        )
    }
}

fn require_credential(var_name: &str, value: Option<String>) -> Result<String, CoreError> {
    let value = value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingCredential {
            var_name: var_name.to_string(),
        })?;

    if value.contains("PLACEHOLDER") {
        return Err(ConfigError::PlaceholderCredential {
            var_name: var_name.to_string(),
        }
        .into());
    }

    Ok(value)
}
