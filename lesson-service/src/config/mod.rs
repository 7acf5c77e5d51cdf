use serde::Deserialize;
use service_core::config as core_config;
use service_core::config::get_env;
use service_core::error::AppError;
use std::env;

/// Gemini endpoint used when none is configured.
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, Deserialize)]
pub struct LessonConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub github: GithubSettings,
    pub gemini: GeminiSettings,
}

/// Connection settings for the target GitHub repository.
///
/// `api_base_url` exists so tests can point the client at a local stub.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubSettings {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub api_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    pub api_base_url: String,
    pub model: String,
}

impl LessonConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(LessonConfig {
            common: common_config,
            github: GithubSettings {
                token: get_env("GITHUB_TOKEN", Some(""), is_prod)?,
                owner: get_env("GITHUB_USERNAME", Some(""), is_prod)?,
                repo: get_env("GITHUB_REPO_NAME", Some(""), is_prod)?,
                branch: env::var("GITHUB_BRANCH").unwrap_or_else(|_| "main".to_string()),
                api_base_url: env::var("GITHUB_API_BASE_URL")
                    .unwrap_or_else(|_| "https://api.github.com".to_string()),
            },
            gemini: GeminiSettings {
                api_base_url: env::var("GEMINI_API_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string()),
                model: env::var("GEMINI_MODEL")
                    .unwrap_or_else(|_| "gemini-2.5-flash-preview-05-20".to_string()),
            },
        })
    }
}
